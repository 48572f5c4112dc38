//! Contact scout core: pure state machine and view-model helpers.
mod contact;
mod effect;
mod msg;
mod queue;
mod request;
mod samples;
mod state;
mod suggestion;
mod table;
mod update;
mod view_model;

pub use contact::{Contact, ContactDraft, ContactField, ContactId, StatusKind, DEFAULT_STATUS};
pub use effect::Effect;
pub use msg::Msg;
pub use queue::{is_url_like, parse_url_input, AddStats, UrlQueue};
pub use request::{
    AgentRole, RequestOutcome, RequestPhase, RequestTicket, ScrapeResult, SuggestResult,
    NO_CONTACTS_MESSAGE, NO_SUGGESTIONS_MESSAGE, SCRAPE_FAILED_MESSAGE, SUGGEST_FAILED_MESSAGE,
};
pub use state::{AppState, EditingCursor};
pub use suggestion::{SuggestedUrl, QUICK_TOPICS};
pub use table::{project_rows, view, ContactTable, FieldToggles, SortDirection, SortState};
pub use update::update;
pub use view_model::{
    AppViewModel, ContactRowView, ExportStatus, FatalView, RecoveryAction, SuggestionRowView,
};
