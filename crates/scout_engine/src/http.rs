use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

use futures_util::StreamExt;
use reqwest::header::CONTENT_TYPE;
use scout_logging::{scout_debug, scout_info, scout_warn};
use url::Url;

use crate::charset::decode_text_lossy;
use crate::{AgentSettings, FailureKind, HttpError};

pub const NOT_FOUND_ALERT: &str = "Backend returned Endpoint Not Found.";
pub const SERVER_ERROR_PROMPT: &str = "Backend is not responding. Click OK to refresh.";
pub const UNREACHABLE_PROMPT: &str = "Cannot connect to backend. Click OK to refresh.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: reqwest::Method,
    pub url: String,
    pub content_type: Option<String>,
    pub body: Option<Vec<u8>>,
}

impl HttpRequest {
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            method: reqwest::Method::GET,
            url: url.into(),
            content_type: None,
            body: None,
        }
    }

    pub fn post_json(url: impl Into<String>, body: &serde_json::Value) -> Self {
        Self {
            method: reqwest::Method::POST,
            url: url.into(),
            content_type: Some("application/json".to_string()),
            body: Some(body.to_string().into_bytes()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub content_type: Option<String>,
    pub final_url: String,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn is_html(&self) -> bool {
        self.content_type
            .as_deref()
            .is_some_and(|ct| ct.contains("text/html"))
    }

    pub fn text(&self) -> String {
        decode_text_lossy(&self.body, self.content_type.as_deref())
    }
}

/// What the caller should do with a finished request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HttpOutcome {
    /// Hand the response to the caller. Agent 5xx responses land here too.
    Response(HttpResponse),
    /// The server redirected; the whole view should move to `location`.
    Navigate { location: String },
    /// A 404 carrying an HTML page that should replace the whole view.
    ReplaceDocument { html: String },
    /// A blocking notice; the caller must not proceed.
    Interrupted(Interruption),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Interruption {
    Alert(String),
    /// Offer to reload the application.
    ConfirmReload(String),
}

impl Interruption {
    pub fn message(&self) -> &str {
        match self {
            Interruption::Alert(message) | Interruption::ConfirmReload(message) => message,
        }
    }
}

/// Single HTTP primitive plus the global error-presentation policy.
///
/// Requests whose path contains the agent path get inline treatment: server
/// errors are passed through and transport failures are returned as `Err`.
/// Everything else is turned into a blocking [`Interruption`].
#[derive(Debug, Clone)]
pub struct HttpWrapper {
    settings: AgentSettings,
}

impl HttpWrapper {
    pub fn new(settings: AgentSettings) -> Self {
        Self { settings }
    }

    pub fn is_agent_call(&self, url: &str) -> bool {
        let agent_path = self.settings.agent_path.as_str();
        match Url::parse(url) {
            Ok(parsed) => parsed.path().contains(agent_path),
            Err(_) => url.contains(agent_path),
        }
    }

    pub async fn send(&self, request: HttpRequest) -> Result<HttpOutcome, HttpError> {
        let agent_call = self.is_agent_call(&request.url);
        let target = request.url.clone();
        match self.perform(request).await {
            Ok((response, redirects)) => {
                let outcome = classify(response, redirects, agent_call);
                if !matches!(outcome, HttpOutcome::Response(_)) {
                    scout_info!("http policy for {}: {:?}", target, outcome_kind(&outcome));
                }
                Ok(outcome)
            }
            Err(err) if agent_call => {
                scout_warn!("agent call to {} failed: {}", target, err);
                Err(err)
            }
            Err(err) => {
                scout_warn!("request to {} failed: {}", target, err);
                Ok(HttpOutcome::Interrupted(Interruption::ConfirmReload(
                    UNREACHABLE_PROMPT.to_string(),
                )))
            }
        }
    }

    fn build_client(&self, redirect_counter: Arc<AtomicUsize>) -> Result<reqwest::Client, HttpError> {
        let redirect_limit = self.settings.redirect_limit;
        let policy = reqwest::redirect::Policy::custom(move |attempt| {
            let count = attempt.previous().len();
            redirect_counter.store(count, Ordering::Relaxed);
            if count > redirect_limit {
                attempt.error("redirect limit exceeded")
            } else {
                attempt.follow()
            }
        });

        let mut builder = reqwest::Client::builder()
            .connect_timeout(self.settings.connect_timeout)
            .redirect(policy);
        if let Some(timeout) = self.settings.request_timeout {
            builder = builder.timeout(timeout);
        }
        builder
            .build()
            .map_err(|err| HttpError::new(FailureKind::Network, err.to_string()))
    }

    async fn perform(&self, request: HttpRequest) -> Result<(HttpResponse, usize), HttpError> {
        let parsed = Url::parse(&request.url)
            .map_err(|err| HttpError::new(FailureKind::InvalidUrl, err.to_string()))?;
        let redirect_counter = Arc::new(AtomicUsize::new(0));
        let client = self.build_client(redirect_counter.clone())?;

        let mut builder = client.request(request.method, parsed);
        if let Some(content_type) = request.content_type {
            builder = builder.header(CONTENT_TYPE, content_type);
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }
        let response = builder.send().await.map_err(map_reqwest_error)?;

        let max_bytes = self.settings.max_response_bytes;
        if let Some(content_len) = response.content_length() {
            if content_len > max_bytes {
                return Err(too_large(max_bytes, content_len));
            }
        }

        let status = response.status().as_u16();
        let final_url = response.url().to_string();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.to_string());

        let mut body = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = body.len() as u64 + chunk.len() as u64;
            if next_len > max_bytes {
                return Err(too_large(max_bytes, next_len));
            }
            body.extend_from_slice(&chunk);
        }

        let redirects = redirect_counter.load(Ordering::Relaxed);
        scout_debug!(
            "{} -> status {} ({} bytes, {} redirects)",
            request.url,
            status,
            body.len(),
            redirects
        );
        Ok((
            HttpResponse {
                status,
                content_type,
                final_url,
                body,
            },
            redirects,
        ))
    }
}

/// Applies the presentation policy to a completed response.
fn classify(response: HttpResponse, redirects: usize, agent_call: bool) -> HttpOutcome {
    if redirects > 0 {
        return HttpOutcome::Navigate {
            location: response.final_url,
        };
    }

    match response.status {
        404 if response.is_html() => HttpOutcome::ReplaceDocument {
            html: response.text(),
        },
        404 if !agent_call => {
            HttpOutcome::Interrupted(Interruption::Alert(NOT_FOUND_ALERT.to_string()))
        }
        status if status >= 500 && !agent_call => HttpOutcome::Interrupted(
            Interruption::ConfirmReload(SERVER_ERROR_PROMPT.to_string()),
        ),
        _ => HttpOutcome::Response(response),
    }
}

fn outcome_kind(outcome: &HttpOutcome) -> &'static str {
    match outcome {
        HttpOutcome::Response(_) => "response",
        HttpOutcome::Navigate { .. } => "navigate",
        HttpOutcome::ReplaceDocument { .. } => "replace-document",
        HttpOutcome::Interrupted(Interruption::Alert(_)) => "alert",
        HttpOutcome::Interrupted(Interruption::ConfirmReload(_)) => "confirm-reload",
    }
}

fn too_large(max_bytes: u64, actual: u64) -> HttpError {
    HttpError::new(
        FailureKind::TooLarge {
            max_bytes,
            actual: Some(actual),
        },
        "response too large",
    )
}

fn map_reqwest_error(err: reqwest::Error) -> HttpError {
    if err.is_timeout() {
        return HttpError::new(FailureKind::Timeout, err.to_string());
    }
    if err.is_redirect() {
        return HttpError::new(FailureKind::RedirectLimitExceeded, err.to_string());
    }
    HttpError::new(FailureKind::Network, err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(status: u16, content_type: Option<&str>) -> HttpResponse {
        HttpResponse {
            status,
            content_type: content_type.map(str::to_string),
            final_url: "http://backend/api/agent".to_string(),
            body: b"<h1>gone</h1>".to_vec(),
        }
    }

    #[test]
    fn redirect_wins_over_status() {
        let outcome = classify(response(500, None), 1, true);
        assert_eq!(
            outcome,
            HttpOutcome::Navigate {
                location: "http://backend/api/agent".to_string()
            }
        );
    }

    #[test]
    fn html_not_found_replaces_document_even_for_agent_calls() {
        let outcome = classify(response(404, Some("text/html; charset=utf-8")), 0, true);
        assert_eq!(
            outcome,
            HttpOutcome::ReplaceDocument {
                html: "<h1>gone</h1>".to_string()
            }
        );
    }

    #[test]
    fn plain_not_found_alerts_only_outside_agent_calls() {
        assert_eq!(
            classify(response(404, Some("application/json")), 0, false),
            HttpOutcome::Interrupted(Interruption::Alert(NOT_FOUND_ALERT.to_string()))
        );
        assert!(matches!(
            classify(response(404, Some("application/json")), 0, true),
            HttpOutcome::Response(r) if r.status == 404
        ));
    }

    #[test]
    fn server_errors_pass_through_for_agent_calls() {
        assert!(matches!(
            classify(response(503, None), 0, true),
            HttpOutcome::Response(r) if r.status == 503
        ));
        assert_eq!(
            classify(response(502, None), 0, false),
            HttpOutcome::Interrupted(Interruption::ConfirmReload(SERVER_ERROR_PROMPT.to_string()))
        );
    }

    #[test]
    fn agent_calls_are_recognised_by_path() {
        let wrapper = HttpWrapper::new(AgentSettings::default());
        assert!(wrapper.is_agent_call("http://localhost:3000/api/agent"));
        assert!(wrapper.is_agent_call("http://localhost:3000/api/agent/stream"));
        assert!(!wrapper.is_agent_call("http://localhost:3000/api/health?next=/api/agent"));
        assert!(wrapper.is_agent_call("not a url /api/agent"));
    }
}
