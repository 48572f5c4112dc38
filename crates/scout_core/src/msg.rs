use crate::{
    ContactField, ContactId, RequestOutcome, RequestTicket, ScrapeResult, SuggestResult,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User edited the URL input box.
    UrlInputChanged(String),
    /// User submitted the URL input for parsing into the queue.
    UrlsSubmitted,
    /// User removed one queued URL.
    UrlRemoved(String),
    /// User cleared the whole queue.
    QueueCleared,
    /// User edited the suggestion topic.
    TopicChanged(String),
    /// User picked one of the quick topics by index.
    QuickTopicPicked(usize),
    SuggestClicked,
    /// User added one suggested URL to the queue.
    SuggestionAccepted(String),
    /// User added every displayed suggestion to the queue.
    AllSuggestionsAccepted,
    /// Engine completion for a suggestion request.
    SuggestSettled {
        ticket: RequestTicket,
        outcome: RequestOutcome<SuggestResult>,
    },
    ScrapeClicked,
    /// Engine completion for a scrape request.
    ScrapeSettled {
        ticket: RequestTicket,
        outcome: RequestOutcome<ScrapeResult>,
    },
    FilterChanged(String),
    /// User clicked a column header.
    SortClicked(ContactField),
    FieldToggled(ContactField),
    /// User clicked a cell to edit it.
    EditStarted { id: ContactId, field: ContactField },
    /// User confirmed the edit (Enter or blur).
    EditCommitted(String),
    /// User abandoned the edit (Escape).
    EditCancelled,
    ContactRemoved(ContactId),
    SampleDataToggled,
    ExportClicked,
    /// Export finished; `Ok` carries a display path.
    ExportFinished { result: Result<String, String> },
    /// User dismissed the error banners.
    ErrorDismissed,
    /// Rendering the current view failed; show the recovery screen.
    RenderFailed(String),
    /// User chose the recovery action on the recovery screen.
    RecoverClicked,
    /// Render tick.
    Tick,
    /// Fallback for placeholder wiring.
    NoOp,
}
