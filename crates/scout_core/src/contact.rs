use std::fmt;

/// Status assigned when a decoded record carries none.
pub const DEFAULT_STATUS: &str = "found";

/// Locally assigned row identifier; unique within one [`crate::ContactTable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ContactId(pub u64);

impl fmt::Display for ContactId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The columns of the contact table. Also used as the sort key and as the
/// target of inline edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContactField {
    Name,
    Email,
    Company,
    Role,
    SourceUrl,
    Status,
}

impl ContactField {
    /// Display order of the table and of the CSV export.
    pub const ALL: [ContactField; 6] = [
        ContactField::Name,
        ContactField::Email,
        ContactField::Company,
        ContactField::Role,
        ContactField::SourceUrl,
        ContactField::Status,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ContactField::Name => "Name",
            ContactField::Email => "Email",
            ContactField::Company => "Company",
            ContactField::Role => "Role",
            ContactField::SourceUrl => "Source URL",
            ContactField::Status => "Status",
        }
    }

    /// Wire/command name, matching the agent's record keys.
    pub fn key(self) -> &'static str {
        match self {
            ContactField::Name => "name",
            ContactField::Email => "email",
            ContactField::Company => "company",
            ContactField::Role => "role",
            ContactField::SourceUrl => "source_url",
            ContactField::Status => "status",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        let key = key.trim();
        Self::ALL
            .into_iter()
            .find(|field| field.key().eq_ignore_ascii_case(key))
    }

    /// Source URL and status can never be hidden.
    pub fn is_toggleable(self) -> bool {
        !matches!(self, ContactField::SourceUrl | ContactField::Status)
    }

    /// Fields the free-text filter looks at: everything except status.
    pub(crate) fn is_searchable(self) -> bool {
        !matches!(self, ContactField::Status)
    }
}

/// A decoded contact record with every default already applied, waiting for
/// an identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactDraft {
    pub name: String,
    pub email: String,
    pub company: String,
    pub role: String,
    pub source_url: String,
    pub status: String,
}

impl Default for ContactDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            email: String::new(),
            company: String::new(),
            role: String::new(),
            source_url: String::new(),
            status: DEFAULT_STATUS.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contact {
    pub id: ContactId,
    pub name: String,
    pub email: String,
    pub company: String,
    pub role: String,
    pub source_url: String,
    pub status: String,
}

impl Contact {
    pub(crate) fn from_draft(id: ContactId, draft: ContactDraft) -> Self {
        Self {
            id,
            name: draft.name,
            email: draft.email,
            company: draft.company,
            role: draft.role,
            source_url: draft.source_url,
            status: draft.status,
        }
    }

    pub fn field(&self, field: ContactField) -> &str {
        match field {
            ContactField::Name => &self.name,
            ContactField::Email => &self.email,
            ContactField::Company => &self.company,
            ContactField::Role => &self.role,
            ContactField::SourceUrl => &self.source_url,
            ContactField::Status => &self.status,
        }
    }

    pub(crate) fn field_mut(&mut self, field: ContactField) -> &mut String {
        match field {
            ContactField::Name => &mut self.name,
            ContactField::Email => &mut self.email,
            ContactField::Company => &mut self.company,
            ContactField::Role => &mut self.role,
            ContactField::SourceUrl => &mut self.source_url,
            ContactField::Status => &mut self.status,
        }
    }

    pub fn status_kind(&self) -> StatusKind {
        StatusKind::classify(&self.status)
    }
}

/// Presentation class of a contact's free-form status string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Found,
    Partial,
    Failed,
    Unknown,
}

impl StatusKind {
    pub fn classify(status: &str) -> Self {
        match status.to_lowercase().as_str() {
            "found" => StatusKind::Found,
            "partial" => StatusKind::Partial,
            "failed" => StatusKind::Failed,
            _ => StatusKind::Unknown,
        }
    }

    /// Badge text: the canonical word for known statuses, otherwise the raw
    /// string (or `Unknown` when it is empty).
    pub fn badge_label(status: &str) -> String {
        match Self::classify(status) {
            StatusKind::Found => "Found".to_string(),
            StatusKind::Partial => "Partial".to_string(),
            StatusKind::Failed => "Failed".to_string(),
            StatusKind::Unknown if status.is_empty() => "Unknown".to_string(),
            StatusKind::Unknown => status.to_string(),
        }
    }
}
