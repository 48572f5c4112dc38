//! Text rendering of the view model.

use scout_core::{
    AppViewModel, ContactField, ContactRowView, ExportStatus, FatalView, SortDirection,
    QUICK_TOPICS,
};

use super::markdown;

const EMPTY_CELL: &str = "--";
const MAX_CELL_WIDTH: usize = 32;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RenderError {
    #[error("contact {id} has a terminal control sequence in {field}")]
    ControlSequence { id: String, field: &'static str },
}

/// Draws the whole screen. A fatal view short-circuits to the recovery
/// screen, which cannot fail.
pub fn render(view: &AppViewModel) -> Result<Vec<String>, RenderError> {
    if let Some(fatal) = &view.fatal {
        return Ok(render_recovery(fatal));
    }

    let mut lines = vec!["== Contact Scout ==".to_string()];
    if let Some(role) = view.active_agent {
        lines.push(format!("[{} is working...]", role.label()));
    }
    lines.push(String::new());

    render_queue(view, &mut lines);
    lines.push(String::new());
    render_suggestions(view, &mut lines);
    lines.push(String::new());
    render_contacts(view, &mut lines)?;

    if let Some(status) = &view.export_status {
        lines.push(match status {
            ExportStatus::Written(path) => format!("Exported to {path}"),
            ExportStatus::Failed(error) => format!("! Export failed: {error}"),
        });
    }
    Ok(lines)
}

pub fn render_recovery(fatal: &FatalView) -> Vec<String> {
    vec![
        "== Something went wrong ==".to_string(),
        fatal.message.clone(),
        String::new(),
        format!("Type 'reset' to {}.", fatal.action.label().to_lowercase()),
    ]
}

fn render_queue(view: &AppViewModel, lines: &mut Vec<String>) {
    lines.push(format!("URL queue ({})", view.queued_urls.len()));
    if view.queued_urls.is_empty() {
        lines.push("  (empty, use 'add <urls>')".to_string());
    }
    for (index, url) in view.queued_urls.iter().enumerate() {
        lines.push(format!("  {}. {}", index + 1, url));
    }
    if let Some(stats) = view.last_add_stats {
        lines.push(format!(
            "  last add: {} added, {} skipped",
            stats.added, stats.skipped
        ));
    }
    if view.scrape_busy {
        lines.push(format!(
            "  scraping {} URL(s)...",
            view.queued_urls.len()
        ));
    }
}

fn render_suggestions(view: &AppViewModel, lines: &mut Vec<String>) {
    let topic = if view.topic_input.is_empty() {
        EMPTY_CELL
    } else {
        view.topic_input.as_str()
    };
    lines.push(format!("Topic: {topic}"));
    let quick = QUICK_TOPICS
        .iter()
        .enumerate()
        .map(|(index, topic)| format!("{}) {}", index + 1, topic))
        .collect::<Vec<_>>()
        .join("  ");
    lines.push(format!("  quick: {quick}"));

    if view.suggest_busy {
        lines.push("  finding sites...".to_string());
    }
    if let Some(error) = &view.suggest_error {
        lines.push(format!("! {error}"));
    }
    lines.extend(markdown::flatten(&view.suggest_summary, "  "));
    for (index, row) in view.suggestions.iter().enumerate() {
        let suggestion = &row.suggestion;
        let name = if suggestion.site_name.is_empty() {
            &suggestion.url
        } else {
            &suggestion.site_name
        };
        lines.push(format!(
            "  {}. {}{} <{}> ~{} contacts",
            index + 1,
            if row.queued { "[queued] " } else { "" },
            name,
            suggestion.url,
            suggestion.estimated_contacts
        ));
        if !suggestion.description.is_empty() {
            lines.push(format!("       {}", suggestion.description));
        }
    }
}

fn render_contacts(view: &AppViewModel, lines: &mut Vec<String>) -> Result<(), RenderError> {
    if let Some(error) = &view.scrape_error {
        lines.push(format!("! {error}"));
    }
    lines.extend(markdown::flatten(&view.scrape_summary, ""));

    let mut heading = format!(
        "Contacts: showing {} of {} (total found {})",
        view.rows.len(),
        view.contact_count,
        view.total_found
    );
    if !view.filter_query.is_empty() {
        heading.push_str(&format!(", filter \"{}\"", view.filter_query));
    }
    if view.show_sample_data && view.contact_count == 0 {
        heading.push_str(" [sample data]");
    }
    lines.push(heading);

    if view.rows.is_empty() {
        lines.push("  (no contacts)".to_string());
        return Ok(());
    }

    let header: Vec<String> = std::iter::once("#".to_string())
        .chain(view.columns.iter().map(|field| {
            let arrow = match view.sort {
                sort if sort.field != *field => "",
                sort if sort.direction == SortDirection::Ascending => " ^",
                _ => " v",
            };
            format!("{}{}", field.label(), arrow)
        }))
        .collect();

    let mut grid = vec![header];
    for row in &view.rows {
        grid.push(row_cells(row, &view.columns)?);
    }
    let widths = column_widths(&grid);

    for (index, cells) in grid.iter().enumerate() {
        let marker = match index.checked_sub(1).map(|i| &view.rows[i]) {
            Some(row) if row.is_failed() => '*',
            _ => ' ',
        };
        let padded = cells
            .iter()
            .zip(&widths)
            .map(|(cell, &width)| format!("{cell:<width$}"))
            .collect::<Vec<_>>()
            .join(" | ");
        lines.push(format!("{marker} {}", padded.trim_end()));
    }
    Ok(())
}

fn row_cells(row: &ContactRowView, columns: &[ContactField]) -> Result<Vec<String>, RenderError> {
    let mut cells = vec![row.contact.id.to_string()];
    for &field in columns {
        let raw = row.contact.field(field);
        if raw.contains('\u{1b}') {
            return Err(RenderError::ControlSequence {
                id: row.contact.id.to_string(),
                field: field.label(),
            });
        }
        let text = match field {
            ContactField::Status => row.status_label.clone(),
            _ if raw.trim().is_empty() => EMPTY_CELL.to_string(),
            _ => clip(&raw.replace(['\n', '\r'], " ")),
        };
        cells.push(if row.editing == Some(field) {
            format!("[{text}]")
        } else {
            text
        });
    }
    Ok(cells)
}

fn clip(text: &str) -> String {
    if text.chars().count() <= MAX_CELL_WIDTH {
        text.to_string()
    } else {
        scout_logging::excerpt(text, MAX_CELL_WIDTH - 1)
    }
}

fn column_widths(grid: &[Vec<String>]) -> Vec<usize> {
    let columns = grid.first().map_or(0, Vec::len);
    (0..columns)
        .map(|col| {
            grid.iter()
                .map(|cells| cells[col].chars().count())
                .max()
                .unwrap_or(0)
        })
        .collect()
}
