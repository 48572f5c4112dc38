use crate::RequestTicket;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Ask the research agent to extract contacts from the queued URLs.
    RequestScrape {
        ticket: RequestTicket,
        urls: Vec<String>,
    },
    /// Ask the suggestion agent for candidate sites on a topic.
    RequestSuggestions {
        ticket: RequestTicket,
        topic: String,
    },
    /// Write the on-screen rows, already projected onto the visible columns.
    ExportCsv {
        header: Vec<String>,
        rows: Vec<Vec<String>>,
    },
}
