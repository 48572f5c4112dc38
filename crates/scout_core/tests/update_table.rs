use std::sync::Once;

use pretty_assertions::assert_eq;
use scout_core::{
    update, AppState, ContactDraft, ContactField, ContactId, Effect, EditingCursor, ExportStatus,
    Msg, RecoveryAction, RequestOutcome, RequestTicket, ScrapeResult, SortDirection,
};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(scout_logging::initialize_for_tests);
}

fn draft(name: &str, email: &str, status: &str) -> ContactDraft {
    ContactDraft {
        name: name.to_string(),
        email: email.to_string(),
        company: "Acme".to_string(),
        role: "Analyst".to_string(),
        source_url: "https://acme.com".to_string(),
        status: status.to_string(),
    }
}

/// State holding the given contacts with ids 1..=n.
fn loaded(drafts: Vec<ContactDraft>) -> AppState {
    let (state, _) = update(AppState::new(), Msg::UrlInputChanged("https://acme.com".into()));
    let (state, _) = update(state, Msg::UrlsSubmitted);
    let (state, effects) = update(state, Msg::ScrapeClicked);
    let ticket = match effects.as_slice() {
        [Effect::RequestScrape { ticket, .. }] => *ticket,
        other => panic!("unexpected effects {other:?}"),
    };
    let (state, _) = update(
        state,
        Msg::ScrapeSettled {
            ticket,
            outcome: RequestOutcome::Completed(ScrapeResult::Contacts {
                contacts: drafts,
                summary: None,
                total_found: None,
            }),
        },
    );
    state
}

#[test]
fn edit_cursor_commit_and_cancel() {
    init_logging();
    let state = loaded(vec![draft("Ann", "ann@acme.com", "found")]);
    let id = ContactId(1);

    let (state, _) = update(state, Msg::EditStarted { id, field: ContactField::Email });
    let view = state.view();
    assert_eq!(view.editing, Some(EditingCursor { id, field: ContactField::Email }));
    assert_eq!(view.rows[0].editing, Some(ContactField::Email));

    let (state, _) = update(state, Msg::EditCancelled);
    assert_eq!(state.view().editing, None);
    assert_eq!(state.contacts()[0].email, "ann@acme.com");

    let (state, _) = update(state, Msg::EditStarted { id, field: ContactField::Name });
    // Starting another edit moves the single cursor.
    let (state, _) = update(state, Msg::EditStarted { id, field: ContactField::Role });
    let (state, _) = update(state, Msg::EditCommitted(String::new()));
    assert_eq!(state.view().editing, None);
    assert_eq!(state.contacts()[0].role, "");
    assert_eq!(state.contacts()[0].name, "Ann");

    // Commit without an open cursor changes nothing.
    let mut state = state;
    state.consume_dirty();
    let (mut state, _) = update(state, Msg::EditCommitted("ignored".into()));
    assert!(!state.consume_dirty());
}

#[test]
fn removing_edited_row_drops_cursor() {
    init_logging();
    let state = loaded(vec![draft("Ann", "", "found"), draft("Ben", "", "found")]);
    let (state, _) = update(
        state,
        Msg::EditStarted {
            id: ContactId(2),
            field: ContactField::Name,
        },
    );
    let (state, _) = update(state, Msg::ContactRemoved(ContactId(2)));
    let view = state.view();
    assert_eq!(view.editing, None);
    assert_eq!(view.contact_count, 1);
}

#[test]
fn edit_on_unknown_row_is_ignored() {
    init_logging();
    let (mut state, _) = update(
        AppState::new(),
        Msg::EditStarted {
            id: ContactId(7),
            field: ContactField::Name,
        },
    );
    assert_eq!(state.view().editing, None);
    assert!(!state.consume_dirty());
}

#[test]
fn only_visible_personal_columns_are_editable() {
    init_logging();
    let state = loaded(vec![draft("Ann", "ann@acme.com", "found")]);
    let id = ContactId(1);

    let mut state = state;
    state.consume_dirty();
    for field in [ContactField::SourceUrl, ContactField::Status] {
        let (next, _) = update(state, Msg::EditStarted { id, field });
        state = next;
        assert_eq!(state.view().editing, None);
    }
    assert!(!state.consume_dirty());

    let (state, _) = update(state, Msg::FieldToggled(ContactField::Company));
    let (state, _) = update(state, Msg::EditStarted { id, field: ContactField::Company });
    assert_eq!(state.view().editing, None);

    // Hiding the column under the cursor closes the edit.
    let (state, _) = update(state, Msg::EditStarted { id, field: ContactField::Email });
    assert_eq!(state.view().editing, Some(EditingCursor { id, field: ContactField::Email }));
    let (state, _) = update(state, Msg::FieldToggled(ContactField::Email));
    assert_eq!(state.view().editing, None);
    assert_eq!(state.contacts()[0].email, "ann@acme.com");
}

#[test]
fn sort_and_filter_messages_drive_rows() {
    init_logging();
    let state = loaded(vec![
        draft("carol", "c@acme.com", "found"),
        draft("Alice", "a@other.org", "found"),
        draft("bob", "b@acme.com", "failed"),
    ]);
    let names = |state: &AppState| -> Vec<String> {
        state.view().rows.iter().map(|r| r.contact.name.clone()).collect()
    };
    assert_eq!(names(&state), vec!["Alice", "bob", "carol"]);

    let (state, _) = update(state, Msg::SortClicked(ContactField::Name));
    assert_eq!(state.view().sort.direction, SortDirection::Descending);
    assert_eq!(names(&state), vec!["carol", "bob", "Alice"]);

    let (state, _) = update(state, Msg::FilterChanged("@ACME".into()));
    assert_eq!(names(&state), vec!["carol", "bob"]);

    let view = state.view();
    assert!(view.rows.iter().any(|r| r.is_failed()));
    assert_eq!(view.contact_count, 3);
}

#[test]
fn field_toggles_hide_optional_columns_only() {
    init_logging();
    let (state, _) = update(AppState::new(), Msg::FieldToggled(ContactField::Email));
    let (mut state, _) = update(state, Msg::FieldToggled(ContactField::Company));
    state.consume_dirty();
    let (mut state, _) = update(state, Msg::FieldToggled(ContactField::Status));
    assert!(!state.consume_dirty());
    assert_eq!(
        state.view().columns,
        vec![
            ContactField::Name,
            ContactField::Role,
            ContactField::SourceUrl,
            ContactField::Status,
        ]
    );
}

#[test]
fn export_uses_visible_columns_and_on_screen_order() {
    init_logging();
    let state = loaded(vec![
        draft("bob", "b@acme.com", "found"),
        draft("Ann", "", "partial"),
        draft("Zed", "z@other.org", "found"),
    ]);
    let (state, _) = update(state, Msg::FieldToggled(ContactField::Company));
    let (state, _) = update(state, Msg::FieldToggled(ContactField::Role));
    let (state, _) = update(state, Msg::FilterChanged("acme".into()));
    let (state, effects) = update(state, Msg::ExportClicked);

    assert_eq!(
        effects,
        vec![Effect::ExportCsv {
            header: vec![
                "Name".to_string(),
                "Email".to_string(),
                "Source URL".to_string(),
                "Status".to_string(),
            ],
            rows: vec![
                vec![
                    "Ann".to_string(),
                    String::new(),
                    "https://acme.com".to_string(),
                    "partial".to_string(),
                ],
                vec![
                    "bob".to_string(),
                    "b@acme.com".to_string(),
                    "https://acme.com".to_string(),
                    "found".to_string(),
                ],
                vec![
                    "Zed".to_string(),
                    "z@other.org".to_string(),
                    "https://acme.com".to_string(),
                    "found".to_string(),
                ],
            ],
        }]
    );

    let (state, _) = update(
        state,
        Msg::ExportFinished {
            result: Ok("output/analyst_contacts_export.csv".into()),
        },
    );
    assert_eq!(
        state.view().export_status,
        Some(ExportStatus::Written("output/analyst_contacts_export.csv".into()))
    );
}

#[test]
fn export_with_no_rows_is_noop() {
    init_logging();
    let (_state, effects) = update(AppState::new(), Msg::ExportClicked);
    assert!(effects.is_empty());
}

#[test]
fn sample_contacts_are_read_only_placeholders() {
    init_logging();
    let (state, _) = update(AppState::new(), Msg::SampleDataToggled);
    let view = state.view();
    assert_eq!(view.rows.len(), 5);
    assert_eq!(view.contact_count, 0);

    let (state, _) = update(state, Msg::ContactRemoved(ContactId(1)));
    assert_eq!(state.view().rows.len(), 5);

    let (_state, effects) = update(state, Msg::ExportClicked);
    assert!(matches!(effects.as_slice(), [Effect::ExportCsv { rows, .. }] if rows.len() == 5));
}

#[test]
fn render_failure_shows_recovery_and_reset_fences_old_tickets() {
    init_logging();
    let (state, _) = update(AppState::new(), Msg::UrlInputChanged("https://a.com".into()));
    let (state, _) = update(state, Msg::UrlsSubmitted);
    let (state, effects) = update(state, Msg::ScrapeClicked);
    let old_ticket = match effects.as_slice() {
        [Effect::RequestScrape { ticket, .. }] => *ticket,
        other => panic!("unexpected effects {other:?}"),
    };

    let (state, _) = update(state, Msg::RenderFailed("column width overflow".into()));
    let view = state.view();
    let fatal = view.fatal.expect("recovery screen");
    assert_eq!(fatal.message, "column width overflow");
    assert_eq!(fatal.action, RecoveryAction::Reset);

    // Everything but the recovery action is ignored.
    let (state, effects) = update(state, Msg::QueueCleared);
    assert!(effects.is_empty());
    assert_eq!(state.view().queued_urls.len(), 1);

    let (state, _) = update(state, Msg::RecoverClicked);
    let view = state.view();
    assert!(view.fatal.is_none());
    assert!(view.queued_urls.is_empty());
    assert!(!view.scrape_busy);

    // A new request gets a fresh ticket; the abandoned one cannot land.
    let (state, _) = update(state, Msg::UrlInputChanged("https://b.com".into()));
    let (state, _) = update(state, Msg::UrlsSubmitted);
    let (state, effects) = update(state, Msg::ScrapeClicked);
    let new_ticket = match effects.as_slice() {
        [Effect::RequestScrape { ticket, .. }] => *ticket,
        other => panic!("unexpected effects {other:?}"),
    };
    assert_ne!(new_ticket, old_ticket);
    assert_eq!(new_ticket, RequestTicket(old_ticket.0 + 1));

    let (state, _) = update(
        state,
        Msg::ScrapeSettled {
            ticket: old_ticket,
            outcome: RequestOutcome::Completed(ScrapeResult::Contacts {
                contacts: vec![draft("Late", "", "found")],
                summary: None,
                total_found: None,
            }),
        },
    );
    assert!(state.contacts().is_empty());
    assert!(state.view().scrape_busy);
}
