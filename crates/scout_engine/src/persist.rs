//! Export files land whole or not at all: content goes to a hidden
//! `.part` file next to the target and is renamed over it once synced.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use scout_logging::scout_debug;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("invalid export filename {0:?}")]
    InvalidFilename(String),
    #[error("export directory {} unusable: {reason}", dir.display())]
    OutputDir { dir: PathBuf, reason: String },
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenFile {
    pub path: PathBuf,
    pub bytes: usize,
}

/// Creates `dir` if missing. Fails when the path exists but is not a
/// directory.
pub fn prepare_export_dir(dir: &Path) -> Result<(), PersistError> {
    let unusable = |reason: String| PersistError::OutputDir {
        dir: dir.to_path_buf(),
        reason,
    };
    match fs::metadata(dir) {
        Ok(meta) if meta.is_dir() => Ok(()),
        Ok(_) => Err(unusable("not a directory".to_string())),
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            fs::create_dir_all(dir).map_err(|e| unusable(e.to_string()))
        }
        Err(err) => Err(unusable(err.to_string())),
    }
}

/// A configured export name must be a plain file name inside the export
/// directory.
pub fn validate_filename(filename: &str) -> Result<&str, PersistError> {
    let trimmed = filename.trim();
    let plain = !trimmed.is_empty()
        && trimmed != "."
        && trimmed != ".."
        && !trimmed.contains(['/', '\\']);
    if plain {
        Ok(trimmed)
    } else {
        Err(PersistError::InvalidFilename(filename.to_string()))
    }
}

/// Writes `content` to `dir/filename`, replacing any earlier export.
pub fn write_atomically(
    dir: &Path,
    filename: &str,
    content: &[u8],
) -> Result<WrittenFile, PersistError> {
    let filename = validate_filename(filename)?;
    prepare_export_dir(dir)?;

    let target = dir.join(filename);
    let mut part = tempfile::Builder::new()
        .prefix(&format!(".{filename}."))
        .suffix(".part")
        .tempfile_in(dir)?;
    part.write_all(content)?;
    part.as_file_mut().sync_all()?;
    part.persist(&target).map_err(|e| PersistError::Io(e.error))?;

    scout_debug!("wrote {} bytes to {}", content.len(), target.display());
    Ok(WrittenFile {
        path: target,
        bytes: content.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filenames_must_stay_inside_the_directory() {
        assert_eq!(validate_filename(" contacts.csv ").unwrap(), "contacts.csv");
        for bad in ["", "  ", "..", "../contacts.csv", "sub/contacts.csv", "a\\b.csv"] {
            assert!(
                matches!(validate_filename(bad), Err(PersistError::InvalidFilename(_))),
                "{bad:?} accepted"
            );
        }
    }
}
