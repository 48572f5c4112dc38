//! Tolerant decoding of agent payloads into engine records.
//!
//! Agents return loosely shaped JSON. Missing or null fields become empty
//! strings, scalar fields of the wrong type are stringified, and a payload
//! without the expected list falls back to whatever free text it carries.

use serde::de::{DeserializeOwned, Deserializer};
use serde::Deserialize;
use serde_json::Value;

use crate::agent::AgentResponse;
use crate::{ContactRecord, ScrapeReply, SuggestReply, SuggestionRecord};

const DEFAULT_CONTACT_STATUS: &str = "found";

#[derive(Debug, Default, Deserialize)]
struct RawContact {
    #[serde(default, deserialize_with = "lenient_string")]
    name: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    email: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    company: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    role: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    source_url: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    status: Option<String>,
}

impl RawContact {
    fn into_record(self) -> ContactRecord {
        ContactRecord {
            name: self.name.unwrap_or_default(),
            email: self.email.unwrap_or_default(),
            company: self.company.unwrap_or_default(),
            role: self.role.unwrap_or_default(),
            source_url: self.source_url.unwrap_or_default(),
            status: self
                .status
                .unwrap_or_else(|| DEFAULT_CONTACT_STATUS.to_string()),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct RawSuggestion {
    #[serde(default, deserialize_with = "lenient_string")]
    url: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    site_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    description: Option<String>,
    #[serde(default, deserialize_with = "lenient_count")]
    estimated_contacts: Option<u64>,
}

impl RawSuggestion {
    fn into_record(self) -> SuggestionRecord {
        SuggestionRecord {
            url: self.url.unwrap_or_default(),
            site_name: self.site_name.unwrap_or_default(),
            description: self.description.unwrap_or_default(),
            estimated_contacts: self.estimated_contacts.unwrap_or(0),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct ResearchPayload {
    #[serde(default, deserialize_with = "lenient_list")]
    contacts: Option<Vec<Value>>,
    #[serde(default, deserialize_with = "lenient_string")]
    summary: Option<String>,
    #[serde(default, deserialize_with = "lenient_count")]
    total_found: Option<u64>,
    #[serde(default, deserialize_with = "lenient_string")]
    text: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct SuggestionPayload {
    #[serde(default, deserialize_with = "lenient_list")]
    suggested_urls: Option<Vec<Value>>,
    #[serde(default, deserialize_with = "lenient_string")]
    search_summary: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    text: Option<String>,
}

/// Interprets a research agent result.
pub fn decode_scrape(response: &AgentResponse) -> ScrapeReply {
    let payload: ResearchPayload = decode_object(&response.result);
    if let Some(items) = payload.contacts {
        let contacts = items
            .iter()
            .map(|item| decode_object::<RawContact>(item).into_record())
            .collect();
        return ScrapeReply::Contacts {
            contacts,
            summary: payload.summary,
            total_found: payload.total_found,
        };
    }
    match fallback_text(payload.text, response.message.as_deref()) {
        Some(text) => ScrapeReply::TextOnly(text),
        None => ScrapeReply::Empty,
    }
}

/// Interprets a suggestion agent result.
pub fn decode_suggestions(response: &AgentResponse) -> SuggestReply {
    let payload: SuggestionPayload = decode_object(&response.result);
    if let Some(items) = payload.suggested_urls {
        let suggestions = items
            .iter()
            .map(|item| decode_object::<RawSuggestion>(item).into_record())
            .collect();
        return SuggestReply::Suggestions {
            suggestions,
            summary: payload.search_summary,
        };
    }
    match fallback_text(payload.text, response.message.as_deref()) {
        Some(text) => SuggestReply::TextOnly(text),
        None => SuggestReply::Empty,
    }
}

/// A string result holding JSON is parsed; any other string is wrapped as
/// `{"text": ...}`.
pub(crate) fn normalize_result(result: Value) -> Value {
    match result {
        Value::String(raw) => match serde_json::from_str::<Value>(&raw) {
            Ok(parsed @ Value::Object(_)) => parsed,
            _ => serde_json::json!({ "text": raw }),
        },
        other => other,
    }
}

pub(crate) fn text_value(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        _ => None,
    }
}

fn count_value(value: &Value) -> Option<u64> {
    match value {
        Value::Number(number) => number.as_u64().or_else(|| {
            number
                .as_f64()
                .filter(|f| f.is_finite() && *f >= 0.0)
                .map(|f| f.round() as u64)
        }),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    }
}

fn decode_object<T: DeserializeOwned + Default>(value: &Value) -> T {
    if value.is_object() {
        serde_json::from_value(value.clone()).unwrap_or_default()
    } else {
        T::default()
    }
}

fn fallback_text(text: Option<String>, message: Option<&str>) -> Option<String> {
    text.filter(|t| !t.trim().is_empty()).or_else(|| {
        message
            .filter(|m| !m.trim().is_empty())
            .map(str::to_string)
    })
}

pub(crate) fn lenient_string<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<String>, D::Error> {
    Ok(text_value(&Value::deserialize(deserializer)?))
}

pub(crate) fn lenient_bool<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Bool(flag) => flag,
        Value::String(text) => text.eq_ignore_ascii_case("true"),
        _ => false,
    })
}

fn lenient_count<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<u64>, D::Error> {
    Ok(count_value(&Value::deserialize(deserializer)?))
}

fn lenient_list<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<Vec<Value>>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => Some(items),
        _ => None,
    })
}
