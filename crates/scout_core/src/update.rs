use crate::{AppState, Effect, Msg};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    // The recovery screen swallows everything except its own action.
    if state.is_fatal() && !matches!(msg, Msg::RecoverClicked) {
        return (state, Vec::new());
    }

    let effects = match msg {
        Msg::UrlInputChanged(text) => {
            state.set_url_input(text);
            Vec::new()
        }
        Msg::UrlsSubmitted => {
            state.submit_url_input();
            Vec::new()
        }
        Msg::UrlRemoved(url) => {
            state.remove_url(&url);
            Vec::new()
        }
        Msg::QueueCleared => {
            state.clear_queue();
            Vec::new()
        }
        Msg::TopicChanged(text) => {
            state.set_topic_input(text);
            Vec::new()
        }
        Msg::QuickTopicPicked(index) => {
            state.pick_quick_topic(index);
            Vec::new()
        }
        Msg::SuggestClicked => match state.begin_suggest() {
            Some((ticket, topic)) => vec![Effect::RequestSuggestions { ticket, topic }],
            None => Vec::new(),
        },
        Msg::SuggestionAccepted(url) => {
            state.accept_suggestion(&url);
            Vec::new()
        }
        Msg::AllSuggestionsAccepted => {
            state.accept_all_suggestions();
            Vec::new()
        }
        Msg::SuggestSettled { ticket, outcome } => {
            state.settle_suggest(ticket, outcome);
            Vec::new()
        }
        Msg::ScrapeClicked => match state.begin_scrape() {
            Some((ticket, urls)) => vec![Effect::RequestScrape { ticket, urls }],
            None => Vec::new(),
        },
        Msg::ScrapeSettled { ticket, outcome } => {
            state.settle_scrape(ticket, outcome);
            Vec::new()
        }
        Msg::FilterChanged(query) => {
            state.set_filter(query);
            Vec::new()
        }
        Msg::SortClicked(field) => {
            state.toggle_sort(field);
            Vec::new()
        }
        Msg::FieldToggled(field) => {
            state.toggle_field(field);
            Vec::new()
        }
        Msg::EditStarted { id, field } => {
            state.start_edit(id, field);
            Vec::new()
        }
        Msg::EditCommitted(value) => {
            state.commit_edit(value);
            Vec::new()
        }
        Msg::EditCancelled => {
            state.cancel_edit();
            Vec::new()
        }
        Msg::ContactRemoved(id) => {
            state.remove_contact(id);
            Vec::new()
        }
        Msg::SampleDataToggled => {
            state.toggle_sample_data();
            Vec::new()
        }
        Msg::ExportClicked => match state.export_grid() {
            Some((header, rows)) => vec![Effect::ExportCsv { header, rows }],
            None => Vec::new(),
        },
        Msg::ExportFinished { result } => {
            state.finish_export(result);
            Vec::new()
        }
        Msg::ErrorDismissed => {
            state.dismiss_errors();
            Vec::new()
        }
        Msg::RenderFailed(message) => {
            state.enter_fatal(message);
            Vec::new()
        }
        Msg::RecoverClicked => {
            if state.is_fatal() {
                state.reset();
            }
            Vec::new()
        }
        Msg::Tick | Msg::NoOp => Vec::new(),
    };

    (state, effects)
}
