use std::path::PathBuf;

use scout_core::{
    ContactDraft, Effect, Msg, RequestOutcome, RequestTicket, ScrapeResult, SuggestResult,
    SuggestedUrl,
};
use scout_engine::{
    write_csv_export, ContactRecord, EngineEvent, EngineHandle, ExportOptions, ScrapeReply,
    SuggestReply, SuggestionRecord,
};
use scout_logging::{scout_error, scout_info, scout_warn};

/// Executes core effects and turns engine completions back into messages.
pub struct EffectRunner {
    engine: EngineHandle,
    export_dir: PathBuf,
    export_options: ExportOptions,
}

impl EffectRunner {
    pub fn new(engine: EngineHandle, export_dir: PathBuf, export_options: ExportOptions) -> Self {
        Self {
            engine,
            export_dir,
            export_options,
        }
    }

    /// Runs `effects`, returning messages that are known right away (export
    /// results, or failures to reach the engine).
    pub fn run(&self, effects: Vec<Effect>) -> Vec<Msg> {
        let mut followups = Vec::new();
        for effect in effects {
            match effect {
                Effect::RequestScrape { ticket, urls } => {
                    if let Err(err) = self.engine.scrape(ticket.0, urls) {
                        scout_error!("scrape {} not started: {}", ticket, err);
                        followups.push(Msg::ScrapeSettled {
                            ticket,
                            outcome: RequestOutcome::Failed(err.to_string()),
                        });
                    }
                }
                Effect::RequestSuggestions { ticket, topic } => {
                    if let Err(err) = self.engine.suggest(ticket.0, topic) {
                        scout_error!("suggest {} not started: {}", ticket, err);
                        followups.push(Msg::SuggestSettled {
                            ticket,
                            outcome: RequestOutcome::Failed(err.to_string()),
                        });
                    }
                }
                Effect::ExportCsv { header, rows } => {
                    followups.push(self.export(&header, &rows));
                }
            }
        }
        followups
    }

    /// Drains completed engine work without blocking.
    pub fn poll_events(&self) -> Vec<Msg> {
        std::iter::from_fn(|| self.engine.try_recv())
            .map(map_event)
            .collect()
    }

    fn export(&self, header: &[String], rows: &[Vec<String>]) -> Msg {
        let result =
            match write_csv_export(&self.export_dir, header, rows, &self.export_options) {
                Ok(summary) => Ok(summary.output_path.display().to_string()),
                Err(err) => {
                    scout_warn!("export to {} failed: {}", self.export_dir.display(), err);
                    Err(err.to_string())
                }
            };
        Msg::ExportFinished { result }
    }
}

fn map_event(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::ScrapeSettled { ticket, result } => Msg::ScrapeSettled {
            ticket: RequestTicket(ticket),
            outcome: match result {
                Ok(reply) => RequestOutcome::Completed(map_scrape_reply(reply)),
                Err(error) => RequestOutcome::Failed(error),
            },
        },
        EngineEvent::SuggestSettled { ticket, result } => Msg::SuggestSettled {
            ticket: RequestTicket(ticket),
            outcome: match result {
                Ok(reply) => RequestOutcome::Completed(map_suggest_reply(reply)),
                Err(error) => RequestOutcome::Failed(error),
            },
        },
    }
}

fn map_scrape_reply(reply: ScrapeReply) -> ScrapeResult {
    match reply {
        ScrapeReply::Contacts {
            contacts,
            summary,
            total_found,
        } => {
            scout_info!("scrape returned {} contacts", contacts.len());
            ScrapeResult::Contacts {
                contacts: contacts.into_iter().map(map_contact).collect(),
                summary,
                total_found,
            }
        }
        ScrapeReply::TextOnly(text) => ScrapeResult::TextOnly(text),
        ScrapeReply::Empty => ScrapeResult::Empty,
    }
}

fn map_suggest_reply(reply: SuggestReply) -> SuggestResult {
    match reply {
        SuggestReply::Suggestions {
            suggestions,
            summary,
        } => SuggestResult::Suggestions {
            suggestions: suggestions.into_iter().map(map_suggestion).collect(),
            summary,
        },
        SuggestReply::TextOnly(text) => SuggestResult::TextOnly(text),
        SuggestReply::Empty => SuggestResult::Empty,
    }
}

fn map_contact(record: ContactRecord) -> ContactDraft {
    ContactDraft {
        name: record.name,
        email: record.email,
        company: record.company,
        role: record.role,
        source_url: record.source_url,
        status: record.status,
    }
}

fn map_suggestion(record: SuggestionRecord) -> SuggestedUrl {
    SuggestedUrl {
        url: record.url,
        site_name: record.site_name,
        description: record.description,
        estimated_contacts: record.estimated_contacts,
    }
}
