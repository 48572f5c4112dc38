use scout_logging::{scout_debug, scout_info, scout_warn};

use crate::queue::{AddStats, UrlQueue};
use crate::request::{
    AgentRole, RequestOutcome, RequestPhase, RequestTicket, ScrapeResult, SuggestResult,
    NO_CONTACTS_MESSAGE, NO_SUGGESTIONS_MESSAGE, SCRAPE_FAILED_MESSAGE, SUGGEST_FAILED_MESSAGE,
};
use crate::samples::{sample_contacts, sample_suggestions};
use crate::table::{self, ContactTable, FieldToggles, SortState};
use crate::view_model::{
    AppViewModel, ContactRowView, ExportStatus, FatalView, RecoveryAction, SuggestionRowView,
};
use crate::{Contact, ContactField, ContactId, StatusKind, SuggestedUrl, QUICK_TOPICS};

/// The single cell currently in inline-edit mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditingCursor {
    pub id: ContactId,
    pub field: ContactField,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    url_input: String,
    queue: UrlQueue,
    last_add_stats: Option<AddStats>,

    topic_input: String,
    suggestions: Vec<SuggestedUrl>,
    suggest_phase: RequestPhase,
    suggest_error: Option<String>,
    suggest_summary: String,

    table: ContactTable,
    scrape_phase: RequestPhase,
    scrape_error: Option<String>,
    scrape_summary: String,
    total_found: u64,

    filter_query: String,
    sort: SortState,
    toggles: FieldToggles,
    editing: Option<EditingCursor>,
    show_sample_data: bool,

    active_agent: Option<AgentRole>,
    export_status: Option<ExportStatus>,
    fatal: Option<String>,
    last_ticket: u64,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> AppViewModel {
        let queued = self.queue.urls().to_vec();
        let suggestions = self
            .displayed_suggestions()
            .into_iter()
            .map(|suggestion| SuggestionRowView {
                queued: self.queue.contains(&suggestion.url),
                suggestion,
            })
            .collect();
        let rows = self
            .visible_rows()
            .into_iter()
            .map(|contact| ContactRowView {
                status: contact.status_kind(),
                status_label: StatusKind::badge_label(&contact.status),
                editing: self
                    .editing
                    .filter(|cursor| cursor.id == contact.id)
                    .map(|cursor| cursor.field),
                contact,
            })
            .collect();

        AppViewModel {
            url_input: self.url_input.clone(),
            queued_urls: queued,
            last_add_stats: self.last_add_stats,
            topic_input: self.topic_input.clone(),
            suggestions,
            suggest_busy: self.suggest_phase.is_busy(),
            suggest_error: self.suggest_error.clone(),
            suggest_summary: self.suggest_summary.clone(),
            scrape_busy: self.scrape_phase.is_busy(),
            scrape_error: self.scrape_error.clone(),
            scrape_summary: self.scrape_summary.clone(),
            total_found: self.total_found,
            active_agent: self.active_agent,
            filter_query: self.filter_query.clone(),
            sort: self.sort,
            toggles: self.toggles,
            columns: self.toggles.visible_columns(),
            rows,
            contact_count: self.table.len(),
            editing: self.editing,
            show_sample_data: self.show_sample_data,
            export_status: self.export_status.clone(),
            fatal: self.fatal.as_ref().map(|message| FatalView {
                message: message.clone(),
                action: RecoveryAction::Reset,
            }),
            dirty: self.dirty,
        }
    }

    /// Returns and clears the dirty flag; the app re-renders only when set.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn is_fatal(&self) -> bool {
        self.fatal.is_some()
    }

    pub fn contacts(&self) -> &[Contact] {
        self.table.contacts()
    }

    pub fn queued_urls(&self) -> &[String] {
        self.queue.urls()
    }

    fn shows_sample_contacts(&self) -> bool {
        self.show_sample_data && self.table.is_empty()
    }

    /// Rows exactly as displayed: filtered and sorted.
    pub(crate) fn visible_rows(&self) -> Vec<Contact> {
        let samples;
        let source: &[Contact] = if self.shows_sample_contacts() {
            samples = sample_contacts();
            &samples
        } else {
            self.table.contacts()
        };
        table::view(source, &self.filter_query, self.sort)
            .into_iter()
            .cloned()
            .collect()
    }

    fn displayed_suggestions(&self) -> Vec<SuggestedUrl> {
        if self.show_sample_data && self.suggestions.is_empty() {
            sample_suggestions()
        } else {
            self.suggestions.clone()
        }
    }

    fn issue_ticket(&mut self) -> RequestTicket {
        self.last_ticket += 1;
        RequestTicket(self.last_ticket)
    }

    pub(crate) fn set_url_input(&mut self, text: String) {
        if self.url_input != text {
            self.url_input = text;
            self.mark_dirty();
        }
    }

    pub(crate) fn submit_url_input(&mut self) {
        let stats = self.queue.add(&self.url_input);
        if stats.added + stats.skipped == 0 {
            return;
        }
        scout_debug!("queue add: added={} skipped={}", stats.added, stats.skipped);
        self.url_input.clear();
        self.last_add_stats = Some(stats);
        self.mark_dirty();
    }

    pub(crate) fn remove_url(&mut self, url: &str) {
        if self.queue.remove(url) {
            self.mark_dirty();
        }
    }

    pub(crate) fn clear_queue(&mut self) {
        if !self.queue.is_empty() {
            self.queue.clear();
            self.last_add_stats = None;
            self.mark_dirty();
        }
    }

    pub(crate) fn set_topic_input(&mut self, text: String) {
        if self.topic_input != text {
            self.topic_input = text;
            self.mark_dirty();
        }
    }

    pub(crate) fn pick_quick_topic(&mut self, index: usize) {
        if let Some(topic) = QUICK_TOPICS.get(index) {
            self.set_topic_input((*topic).to_string());
        }
    }

    pub(crate) fn accept_suggestion(&mut self, url: &str) {
        let stats = self.queue.add_all([url]);
        if stats.added > 0 {
            self.last_add_stats = Some(stats);
            self.mark_dirty();
        }
    }

    pub(crate) fn accept_all_suggestions(&mut self) {
        let urls: Vec<String> = self
            .displayed_suggestions()
            .into_iter()
            .map(|s| s.url)
            .collect();
        let stats = self.queue.add_all(&urls);
        if stats.added > 0 {
            self.last_add_stats = Some(stats);
            self.mark_dirty();
        }
    }

    /// Enters `Requesting` for suggestions when the topic is usable and no
    /// suggestion request is in flight. Returns the ticket and trimmed topic.
    pub(crate) fn begin_suggest(&mut self) -> Option<(RequestTicket, String)> {
        let topic = self.topic_input.trim().to_string();
        if topic.is_empty() || self.suggest_phase.is_busy() {
            return None;
        }
        let ticket = self.issue_ticket();
        self.suggest_phase = RequestPhase::Requesting { ticket };
        self.suggest_error = None;
        self.active_agent = Some(AgentRole::Suggestion);
        self.mark_dirty();
        scout_info!("suggest {} started for topic {:?}", ticket, topic);
        Some((ticket, topic))
    }

    pub(crate) fn settle_suggest(
        &mut self,
        ticket: RequestTicket,
        outcome: RequestOutcome<SuggestResult>,
    ) {
        if self.suggest_phase.ticket() != Some(ticket) {
            scout_warn!("dropping stale suggestion result {}", ticket);
            return;
        }
        match outcome {
            RequestOutcome::Completed(SuggestResult::Suggestions {
                suggestions,
                summary,
            }) => {
                scout_info!("suggest {} returned {} urls", ticket, suggestions.len());
                self.suggestions = suggestions;
                self.suggest_summary = summary.unwrap_or_default();
            }
            RequestOutcome::Completed(SuggestResult::TextOnly(text)) => {
                self.suggestions.clear();
                self.suggest_summary = text;
            }
            RequestOutcome::Completed(SuggestResult::Empty) => {
                self.suggest_error = Some(NO_SUGGESTIONS_MESSAGE.to_string());
            }
            RequestOutcome::Failed(message) => {
                scout_warn!("suggest {} failed: {}", ticket, message);
                self.suggest_error = Some(non_empty_or(message, SUGGEST_FAILED_MESSAGE));
            }
        }
        self.suggest_phase = RequestPhase::Idle;
        self.release_agent(AgentRole::Suggestion);
        self.mark_dirty();
    }

    pub(crate) fn begin_scrape(&mut self) -> Option<(RequestTicket, Vec<String>)> {
        if self.queue.is_empty() || self.scrape_phase.is_busy() {
            return None;
        }
        let ticket = self.issue_ticket();
        self.scrape_phase = RequestPhase::Requesting { ticket };
        self.scrape_error = None;
        self.active_agent = Some(AgentRole::Research);
        self.mark_dirty();
        scout_info!("scrape {} started for {} urls", ticket, self.queue.len());
        Some((ticket, self.queue.urls().to_vec()))
    }

    pub(crate) fn settle_scrape(&mut self, ticket: RequestTicket, outcome: RequestOutcome<ScrapeResult>) {
        if self.scrape_phase.ticket() != Some(ticket) {
            scout_warn!("dropping stale scrape result {}", ticket);
            return;
        }
        match outcome {
            RequestOutcome::Completed(ScrapeResult::Contacts {
                contacts,
                summary,
                total_found,
            }) => {
                let added = self.table.ingest(contacts).len();
                scout_info!("scrape {} ingested {} contacts", ticket, added);
                self.scrape_summary = summary.unwrap_or_default();
                self.total_found = total_found.unwrap_or(added as u64);
            }
            RequestOutcome::Completed(ScrapeResult::TextOnly(text)) => {
                self.scrape_summary = text;
            }
            RequestOutcome::Completed(ScrapeResult::Empty) => {
                self.scrape_error = Some(NO_CONTACTS_MESSAGE.to_string());
            }
            RequestOutcome::Failed(message) => {
                scout_warn!("scrape {} failed: {}", ticket, message);
                self.scrape_error = Some(non_empty_or(message, SCRAPE_FAILED_MESSAGE));
            }
        }
        self.scrape_phase = RequestPhase::Idle;
        self.release_agent(AgentRole::Research);
        self.mark_dirty();
    }

    fn release_agent(&mut self, role: AgentRole) {
        if self.active_agent == Some(role) {
            self.active_agent = None;
        }
    }

    pub(crate) fn dismiss_errors(&mut self) {
        if self.scrape_error.is_some() || self.suggest_error.is_some() {
            self.scrape_error = None;
            self.suggest_error = None;
            self.mark_dirty();
        }
    }

    pub(crate) fn set_filter(&mut self, query: String) {
        if self.filter_query != query {
            self.filter_query = query;
            self.mark_dirty();
        }
    }

    pub(crate) fn toggle_sort(&mut self, field: ContactField) {
        self.sort.toggle(field);
        self.mark_dirty();
    }

    pub(crate) fn toggle_field(&mut self, field: ContactField) {
        if !self.toggles.toggle(field) {
            return;
        }
        if !self.toggles.is_visible(field) && self.editing.is_some_and(|c| c.field == field) {
            self.editing = None;
        }
        self.mark_dirty();
    }

    /// Only the visible personal columns can be edited; source URL and status
    /// are read-only.
    pub(crate) fn start_edit(&mut self, id: ContactId, field: ContactField) {
        if self.table.get(id).is_none() {
            return;
        }
        if !field.is_toggleable() || !self.toggles.is_visible(field) {
            scout_debug!("ignoring edit of read-only or hidden column {:?}", field);
            return;
        }
        self.editing = Some(EditingCursor { id, field });
        self.mark_dirty();
    }

    pub(crate) fn commit_edit(&mut self, value: String) {
        let Some(cursor) = self.editing.take() else {
            return;
        };
        self.table.edit(cursor.id, cursor.field, value);
        self.mark_dirty();
    }

    pub(crate) fn cancel_edit(&mut self) {
        if self.editing.take().is_some() {
            self.mark_dirty();
        }
    }

    pub(crate) fn remove_contact(&mut self, id: ContactId) {
        if !self.table.remove(id) {
            return;
        }
        if self.editing.is_some_and(|cursor| cursor.id == id) {
            self.editing = None;
        }
        self.mark_dirty();
    }

    pub(crate) fn toggle_sample_data(&mut self) {
        self.show_sample_data = !self.show_sample_data;
        self.mark_dirty();
    }

    /// Header and rows for the CSV export, or `None` when nothing is shown.
    pub(crate) fn export_grid(&self) -> Option<(Vec<String>, Vec<Vec<String>>)> {
        let rows = self.visible_rows();
        if rows.is_empty() {
            return None;
        }
        Some(table::project_rows(&rows, &self.toggles.visible_columns()))
    }

    pub(crate) fn finish_export(&mut self, result: Result<String, String>) {
        self.export_status = Some(match result {
            Ok(path) => ExportStatus::Written(path),
            Err(message) => ExportStatus::Failed(message),
        });
        self.mark_dirty();
    }

    pub(crate) fn enter_fatal(&mut self, message: String) {
        scout_warn!("render failed, showing recovery screen: {}", message);
        self.fatal = Some(message);
        self.mark_dirty();
    }

    /// Starts over from a fresh state. The ticket counter survives so results
    /// of abandoned requests can never match a new one.
    pub(crate) fn reset(&mut self) {
        let last_ticket = self.last_ticket;
        *self = Self {
            last_ticket,
            ..Self::default()
        };
        self.mark_dirty();
    }
}

fn non_empty_or(message: String, fallback: &str) -> String {
    if message.trim().is_empty() {
        fallback.to_string()
    } else {
        message
    }
}
