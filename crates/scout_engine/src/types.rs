use std::fmt;

/// Request identifier chosen by the caller and echoed back in events.
pub type Ticket = u64;

/// A decoded contact with every default applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactRecord {
    pub name: String,
    pub email: String,
    pub company: String,
    pub role: String,
    pub source_url: String,
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestionRecord {
    pub url: String,
    pub site_name: String,
    pub description: String,
    pub estimated_contacts: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScrapeReply {
    Contacts {
        contacts: Vec<ContactRecord>,
        summary: Option<String>,
        total_found: Option<u64>,
    },
    TextOnly(String),
    Empty,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SuggestReply {
    Suggestions {
        suggestions: Vec<SuggestionRecord>,
        summary: Option<String>,
    },
    TextOnly(String),
    Empty,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    ScrapeSettled {
        ticket: Ticket,
        result: Result<ScrapeReply, String>,
    },
    SuggestSettled {
        ticket: Ticket,
        result: Result<SuggestReply, String>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct HttpError {
    pub kind: FailureKind,
    pub message: String,
}

impl HttpError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    Timeout,
    RedirectLimitExceeded,
    TooLarge { max_bytes: u64, actual: Option<u64> },
    Network,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::RedirectLimitExceeded => write!(f, "redirect limit exceeded"),
            FailureKind::TooLarge { max_bytes, actual } => {
                write!(f, "response too large (max {max_bytes}, actual {actual:?})")
            }
            FailureKind::Network => write!(f, "network error"),
        }
    }
}
