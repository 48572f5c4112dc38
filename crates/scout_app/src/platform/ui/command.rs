//! Line commands typed at the prompt.

use scout_core::{AppViewModel, ContactField, ContactId, Msg, QUICK_TOPICS};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Dispatch(Vec<Msg>),
    /// Redraw the screen.
    Show,
    Help,
    Quit,
    Invalid(String),
}

pub const HELP: &[&str] = &[
    "add <urls>            queue URLs (comma or space separated)",
    "rm-url <url>          remove a queued URL",
    "clear-urls            empty the queue",
    "topic <text>          set the suggestion topic",
    "quick <n>             use quick topic n",
    "suggest [topic]       ask the suggestion agent for sites",
    "accept <n>            queue suggestion n",
    "accept-all            queue every suggestion",
    "scrape                send the queue to the research agent",
    "filter [text]         filter contacts (empty clears)",
    "sort <field>          sort by field, again to flip",
    "toggle <field>        show or hide name/email/company/role",
    "edit <id> <field> [value]  start editing a cell, or set it at once",
    "set <value>           commit the open edit",
    "cancel                abandon the open edit",
    "del <id>              remove a contact",
    "samples               toggle sample data",
    "export                write visible rows to CSV",
    "dismiss               clear error banners",
    "reset                 recover after a display failure",
    "show | help | quit",
];

/// Parses one input line. Index-based commands resolve against `view`, the
/// screen the user is looking at.
pub fn parse_command(line: &str, view: &AppViewModel) -> Command {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    match word.to_ascii_lowercase().as_str() {
        "" | "show" => Command::Show,
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        "add" if rest.is_empty() => Command::Invalid("add needs at least one URL".to_string()),
        "add" => {
            let input = rest.split_whitespace().collect::<Vec<_>>().join("\n");
            dispatch([Msg::UrlInputChanged(input), Msg::UrlsSubmitted])
        }
        "rm-url" if rest.is_empty() => Command::Invalid("rm-url needs a URL".to_string()),
        "rm-url" => dispatch([Msg::UrlRemoved(rest.to_string())]),
        "clear-urls" => dispatch([Msg::QueueCleared]),
        "topic" => dispatch([Msg::TopicChanged(rest.to_string())]),
        "quick" => match index_arg(rest, QUICK_TOPICS.len()) {
            Ok(index) => dispatch([Msg::QuickTopicPicked(index)]),
            Err(reason) => Command::Invalid(reason),
        },
        "suggest" if rest.is_empty() => dispatch([Msg::SuggestClicked]),
        "suggest" => dispatch([Msg::TopicChanged(rest.to_string()), Msg::SuggestClicked]),
        "accept" => match index_arg(rest, view.suggestions.len()) {
            Ok(index) => dispatch([Msg::SuggestionAccepted(
                view.suggestions[index].suggestion.url.clone(),
            )]),
            Err(reason) => Command::Invalid(reason),
        },
        "accept-all" => dispatch([Msg::AllSuggestionsAccepted]),
        "scrape" => dispatch([Msg::ScrapeClicked]),
        "filter" => dispatch([Msg::FilterChanged(rest.to_string())]),
        "sort" => match field_arg(rest) {
            Ok(field) => dispatch([Msg::SortClicked(field)]),
            Err(reason) => Command::Invalid(reason),
        },
        "toggle" => match field_arg(rest) {
            Ok(field) if field.is_toggleable() => dispatch([Msg::FieldToggled(field)]),
            Ok(field) => Command::Invalid(format!("{} is always shown", field.label())),
            Err(reason) => Command::Invalid(reason),
        },
        "edit" => parse_edit(rest),
        "set" => dispatch([Msg::EditCommitted(rest.to_string())]),
        "cancel" => dispatch([Msg::EditCancelled]),
        "del" => match id_arg(rest) {
            Ok(id) => dispatch([Msg::ContactRemoved(id)]),
            Err(reason) => Command::Invalid(reason),
        },
        "samples" => dispatch([Msg::SampleDataToggled]),
        "export" => dispatch([Msg::ExportClicked]),
        "dismiss" => dispatch([Msg::ErrorDismissed]),
        "reset" => dispatch([Msg::RecoverClicked]),
        other => Command::Invalid(format!("unknown command '{other}'")),
    }
}

fn dispatch<const N: usize>(msgs: [Msg; N]) -> Command {
    Command::Dispatch(msgs.into())
}

fn parse_edit(rest: &str) -> Command {
    let mut parts = rest.splitn(3, char::is_whitespace);
    let id = match id_arg(parts.next().unwrap_or_default()) {
        Ok(id) => id,
        Err(reason) => return Command::Invalid(reason),
    };
    let field = match field_arg(parts.next().unwrap_or_default()) {
        Ok(field) => field,
        Err(reason) => return Command::Invalid(reason),
    };
    match parts.next() {
        Some(value) => dispatch([
            Msg::EditStarted { id, field },
            Msg::EditCommitted(value.trim().to_string()),
        ]),
        None => dispatch([Msg::EditStarted { id, field }]),
    }
}

/// One-based index on screen, zero-based in the result.
fn index_arg(arg: &str, len: usize) -> Result<usize, String> {
    match arg.parse::<usize>() {
        Ok(n) if (1..=len).contains(&n) => Ok(n - 1),
        _ if len == 0 => Err("nothing to pick from".to_string()),
        _ => Err(format!("expected a number from 1 to {len}")),
    }
}

fn id_arg(arg: &str) -> Result<ContactId, String> {
    arg.trim_start_matches('#')
        .parse::<u64>()
        .map(ContactId)
        .map_err(|_| format!("'{arg}' is not a contact id"))
}

fn field_arg(arg: &str) -> Result<ContactField, String> {
    ContactField::from_key(arg).ok_or_else(|| {
        let keys = ContactField::ALL
            .iter()
            .map(|field| field.key())
            .collect::<Vec<_>>()
            .join(", ");
        format!("unknown field '{arg}' (one of {keys})")
    })
}
