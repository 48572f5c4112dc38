use std::time::Duration;

/// Agent that proposes candidate sites for a topic.
pub const DEFAULT_SUGGESTION_AGENT_ID: &str = "699c3550dd37e749f18292dd";
/// Agent that visits sites and extracts contacts.
pub const DEFAULT_RESEARCH_AGENT_ID: &str = "699c35504087cbffb92b3aba";

/// Immutable transport configuration, fixed at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentSettings {
    pub base_url: String,
    /// Path of the agent endpoint; any URL containing it is an agent call.
    pub agent_path: String,
    pub suggestion_agent_id: String,
    pub research_agent_id: String,
    pub connect_timeout: Duration,
    /// `None` leaves the call open until the transport gives up.
    pub request_timeout: Option<Duration>,
    pub redirect_limit: usize,
    pub max_response_bytes: u64,
}

impl Default for AgentSettings {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:3000".to_string(),
            agent_path: "/api/agent".to_string(),
            suggestion_agent_id: DEFAULT_SUGGESTION_AGENT_ID.to_string(),
            research_agent_id: DEFAULT_RESEARCH_AGENT_ID.to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: None,
            redirect_limit: 5,
            max_response_bytes: 10 * 1024 * 1024,
        }
    }
}

impl AgentSettings {
    /// Full URL of the agent endpoint.
    pub fn agent_endpoint(&self) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            self.agent_path.trim_start_matches('/')
        )
    }
}

#[cfg(test)]
mod tests {
    use super::AgentSettings;

    #[test]
    fn endpoint_joins_without_double_slash() {
        let settings = AgentSettings {
            base_url: "http://localhost:8080/".to_string(),
            ..AgentSettings::default()
        };
        assert_eq!(settings.agent_endpoint(), "http://localhost:8080/api/agent");
    }
}
