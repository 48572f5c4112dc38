use async_trait::async_trait;
use scout_logging::{scout_debug, scout_info, scout_warn};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::decode::{lenient_bool, lenient_string, normalize_result, text_value};
use crate::http::{HttpOutcome, HttpRequest, HttpResponse, HttpWrapper};
use crate::AgentSettings;

pub const NETWORK_ERROR_MESSAGE: &str = "Network error.";

/// The useful part of a successful agent reply.
#[derive(Debug, Clone, PartialEq)]
pub struct AgentResponse {
    /// Structured result; string results are already parsed or wrapped as
    /// `{"text": ...}`.
    pub result: Value,
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AgentOutcome {
    Success(AgentResponse),
    Failure { error: String },
}

impl AgentOutcome {
    pub fn failure(error: impl Into<String>) -> Self {
        AgentOutcome::Failure {
            error: error.into(),
        }
    }
}

/// Sends one instruction to one agent. Never panics and never returns a
/// transport error; every failure is folded into [`AgentOutcome::Failure`].
#[async_trait]
pub trait AgentClient: Send + Sync {
    async fn invoke(&self, instruction: &str, agent_id: &str) -> AgentOutcome;
}

#[derive(Debug, Default, Deserialize)]
struct Envelope {
    #[serde(default, deserialize_with = "lenient_bool")]
    success: bool,
    #[serde(default)]
    response: Value,
    #[serde(default, deserialize_with = "lenient_string")]
    error: Option<String>,
}

/// [`AgentClient`] that posts to the backend agent endpoint.
#[derive(Debug, Clone)]
pub struct HttpAgentClient {
    http: HttpWrapper,
    endpoint: String,
}

impl HttpAgentClient {
    pub fn new(settings: AgentSettings) -> Self {
        let endpoint = settings.agent_endpoint();
        Self {
            http: HttpWrapper::new(settings),
            endpoint,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl AgentClient for HttpAgentClient {
    async fn invoke(&self, instruction: &str, agent_id: &str) -> AgentOutcome {
        let body = json!({ "message": instruction, "agent_id": agent_id });
        scout_info!(
            "invoking agent {} ({} chars of instruction)",
            agent_id,
            instruction.chars().count()
        );
        scout_debug!(
            "instruction: {}",
            scout_logging::excerpt(instruction, 160)
        );

        match self.http.send(HttpRequest::post_json(&self.endpoint, &body)).await {
            Ok(HttpOutcome::Response(response)) => interpret_response(&response),
            Ok(HttpOutcome::Navigate { location }) => {
                AgentOutcome::failure(format!("Agent endpoint redirected to {location}"))
            }
            Ok(HttpOutcome::ReplaceDocument { .. }) => {
                AgentOutcome::failure("Agent endpoint returned a not-found page.")
            }
            Ok(HttpOutcome::Interrupted(interruption)) => {
                AgentOutcome::failure(interruption.message())
            }
            Err(err) => {
                scout_warn!("agent {} unreachable: {}", agent_id, err);
                if err.message.trim().is_empty() {
                    AgentOutcome::failure(NETWORK_ERROR_MESSAGE)
                } else {
                    AgentOutcome::failure(err.to_string())
                }
            }
        }
    }
}

/// Turns a raw HTTP reply from the agent endpoint into an outcome.
pub(crate) fn interpret_response(response: &HttpResponse) -> AgentOutcome {
    let status_failure = || format!("Agent request failed with status {}", response.status);

    let envelope: Envelope = match serde_json::from_slice(&response.body) {
        Ok(envelope) => envelope,
        Err(_) if !response.is_success() => return AgentOutcome::failure(status_failure()),
        Err(err) => {
            scout_warn!(
                "undecodable agent reply ({}): {}",
                err,
                scout_logging::excerpt(&response.text(), 200)
            );
            return AgentOutcome::failure(format!("Could not decode agent response: {err}"));
        }
    };

    if !response.is_success() || !envelope.success {
        let error = envelope
            .error
            .filter(|error| !error.trim().is_empty())
            .unwrap_or_else(status_failure);
        scout_warn!("agent reported failure: {}", error);
        return AgentOutcome::failure(error);
    }

    let result = normalize_result(envelope.response.get("result").cloned().unwrap_or(Value::Null));
    let message = envelope.response.get("message").and_then(text_value);
    AgentOutcome::Success(AgentResponse { result, message })
}
