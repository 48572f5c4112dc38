use std::fmt;

use crate::{ContactDraft, SuggestedUrl};

pub const NO_CONTACTS_MESSAGE: &str =
    "No contacts found. The agent may not have been able to access these URLs.";
pub const SCRAPE_FAILED_MESSAGE: &str = "An error occurred. Please try again.";
pub const NO_SUGGESTIONS_MESSAGE: &str =
    "No URL suggestions returned. Try a different search term.";
pub const SUGGEST_FAILED_MESSAGE: &str = "Failed to get URL suggestions.";

/// Fences settle messages: only the ticket currently in flight is accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestTicket(pub u64);

impl fmt::Display for RequestTicket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Single-flight guard for one kind of agent request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RequestPhase {
    #[default]
    Idle,
    Requesting { ticket: RequestTicket },
}

impl RequestPhase {
    pub fn is_busy(&self) -> bool {
        matches!(self, RequestPhase::Requesting { .. })
    }

    pub fn ticket(&self) -> Option<RequestTicket> {
        match self {
            RequestPhase::Idle => None,
            RequestPhase::Requesting { ticket } => Some(*ticket),
        }
    }
}

/// Which remote agent is working, for status display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgentRole {
    Suggestion,
    Research,
}

impl AgentRole {
    pub fn label(self) -> &'static str {
        match self {
            AgentRole::Suggestion => "URL suggestion agent",
            AgentRole::Research => "Web research agent",
        }
    }
}

/// Decoded payload of a successful scrape call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScrapeResult {
    Contacts {
        contacts: Vec<ContactDraft>,
        summary: Option<String>,
        total_found: Option<u64>,
    },
    /// No structured list, only free text.
    TextOnly(String),
    /// Neither a list nor usable text.
    Empty,
}

/// Decoded payload of a successful suggestion call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SuggestResult {
    Suggestions {
        suggestions: Vec<SuggestedUrl>,
        summary: Option<String>,
    },
    TextOnly(String),
    Empty,
}

/// How an agent request settled. Transport and agent-reported failures both
/// arrive as `Failed` with a readable message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestOutcome<T> {
    Completed(T),
    Failed(String),
}
