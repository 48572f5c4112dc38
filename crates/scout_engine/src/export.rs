use std::path::{Path, PathBuf};

use scout_logging::scout_info;

use crate::persist::{write_atomically, PersistError};

pub const DEFAULT_EXPORT_FILENAME: &str = "analyst_contacts_export.csv";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportOptions {
    pub filename: String,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            filename: DEFAULT_EXPORT_FILENAME.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSummary {
    pub row_count: usize,
    pub output_path: PathBuf,
}

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("persist error: {0}")]
    Persist(#[from] PersistError),
    #[error("row {row} has {actual} cells but the header has {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        actual: usize,
    },
}

/// Quotes a data cell, doubling any embedded quotes.
pub fn csv_cell(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}

/// Renders the header line (labels as-is) followed by one quoted line per
/// row. Lines are joined with `\n` and there is no trailing newline.
pub fn render_csv<S: AsRef<str>>(header: &[S], rows: &[Vec<String>]) -> Result<String, ExportError> {
    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(
        header
            .iter()
            .map(|label| label.as_ref())
            .collect::<Vec<_>>()
            .join(","),
    );
    for (index, row) in rows.iter().enumerate() {
        if row.len() != header.len() {
            return Err(ExportError::RaggedRow {
                row: index,
                expected: header.len(),
                actual: row.len(),
            });
        }
        lines.push(
            row.iter()
                .map(|cell| csv_cell(cell))
                .collect::<Vec<_>>()
                .join(","),
        );
    }
    Ok(lines.join("\n"))
}

/// Renders the grid and writes it atomically into `dir`.
pub fn write_csv_export<S: AsRef<str>>(
    dir: &Path,
    header: &[S],
    rows: &[Vec<String>],
    options: &ExportOptions,
) -> Result<ExportSummary, ExportError> {
    let csv = render_csv(header, rows)?;
    let written = write_atomically(dir, &options.filename, csv.as_bytes())?;
    scout_info!(
        "exported {} contacts ({} bytes) to {}",
        rows.len(),
        written.bytes,
        written.path.display()
    );
    Ok(ExportSummary {
        row_count: rows.len(),
        output_path: written.path,
    })
}
