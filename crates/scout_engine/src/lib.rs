//! Contact scout engine: agent transport, payload decoding and CSV export.
mod agent;
mod charset;
mod decode;
mod engine;
mod export;
mod http;
mod instructions;
mod persist;
mod settings;
mod types;

pub use agent::{AgentClient, AgentOutcome, AgentResponse, HttpAgentClient, NETWORK_ERROR_MESSAGE};
pub use charset::decode_text_lossy;
pub use decode::{decode_scrape, decode_suggestions};
pub use engine::{EngineError, EngineHandle};
pub use export::{
    csv_cell, render_csv, write_csv_export, ExportError, ExportOptions, ExportSummary,
    DEFAULT_EXPORT_FILENAME,
};
pub use http::{
    HttpOutcome, HttpRequest, HttpResponse, HttpWrapper, Interruption, NOT_FOUND_ALERT,
    SERVER_ERROR_PROMPT, UNREACHABLE_PROMPT,
};
pub use instructions::{scrape_instruction, suggestion_instruction};
pub use persist::{prepare_export_dir, validate_filename, write_atomically, PersistError, WrittenFile};
pub use settings::{AgentSettings, DEFAULT_RESEARCH_AGENT_ID, DEFAULT_SUGGESTION_AGENT_ID};
pub use types::{
    ContactRecord, EngineEvent, FailureKind, HttpError, ScrapeReply, SuggestReply,
    SuggestionRecord, Ticket,
};
