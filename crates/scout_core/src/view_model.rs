use crate::{
    AddStats, AgentRole, Contact, ContactField, EditingCursor, FieldToggles, SortState,
    StatusKind, SuggestedUrl,
};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub url_input: String,
    pub queued_urls: Vec<String>,
    pub last_add_stats: Option<AddStats>,

    pub topic_input: String,
    pub suggestions: Vec<SuggestionRowView>,
    pub suggest_busy: bool,
    pub suggest_error: Option<String>,
    pub suggest_summary: String,

    pub scrape_busy: bool,
    pub scrape_error: Option<String>,
    pub scrape_summary: String,
    pub total_found: u64,
    pub active_agent: Option<AgentRole>,

    pub filter_query: String,
    pub sort: SortState,
    pub toggles: FieldToggles,
    /// Visible columns in display order.
    pub columns: Vec<ContactField>,
    /// Filtered and sorted rows, exactly as exported.
    pub rows: Vec<ContactRowView>,
    /// Size of the real collection, ignoring filter and sample rows.
    pub contact_count: usize,
    pub editing: Option<EditingCursor>,
    pub show_sample_data: bool,
    pub export_status: Option<ExportStatus>,

    /// When set, only the recovery screen is shown.
    pub fatal: Option<FatalView>,
    pub dirty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestionRowView {
    pub suggestion: SuggestedUrl,
    /// Already in the URL queue.
    pub queued: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactRowView {
    pub contact: Contact,
    pub status: StatusKind,
    pub status_label: String,
    /// Field of this row currently being edited, if any.
    pub editing: Option<ContactField>,
}

impl ContactRowView {
    pub fn is_failed(&self) -> bool {
        self.status == StatusKind::Failed
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportStatus {
    Written(String),
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FatalView {
    pub message: String,
    pub action: RecoveryAction,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecoveryAction {
    /// Discard the session state and start over.
    Reset,
}

impl RecoveryAction {
    pub fn label(self) -> &'static str {
        match self {
            RecoveryAction::Reset => "Try again",
        }
    }
}
