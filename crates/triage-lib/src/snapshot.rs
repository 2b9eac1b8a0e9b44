//! JSON snapshot file I/O.
//!
//! A snapshot is a pretty-printed JSON array of records for one
//! organization. Writes go to a temp file and are renamed into place.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::{Result, TriageError};
use crate::model::Record;

/// Snapshot file name for an organization.
#[must_use]
pub fn file_name(org: &str) -> String {
    format!("{}-issues-prs.json", org.trim().to_lowercase())
}

/// Snapshot path for an organization inside `cache_dir`.
#[must_use]
pub fn path_for(cache_dir: &Path, org: &str) -> PathBuf {
    cache_dir.join(file_name(org))
}

/// Load records from a snapshot file.
///
/// # Errors
///
/// Returns `FileNotFound` if the file does not exist, `Io` if it cannot be
/// read, or `SnapshotParse` if it is not a JSON array of records.
pub fn load(path: &Path) -> Result<Vec<Record>> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            TriageError::FileNotFound(path.to_path_buf())
        } else {
            TriageError::Io(e)
        }
    })?;

    if content.trim().is_empty() {
        return Ok(Vec::new());
    }

    serde_json::from_str(&content).map_err(|e| TriageError::SnapshotParse {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

/// Save records to a snapshot file with atomic write.
///
/// Output is a two-space indented JSON array followed by a newline.
/// Missing parent directories are created.
///
/// # Errors
///
/// Returns `Io` if the file cannot be written, or `Json` on serialization failure.
pub fn save(path: &Path, records: &[Record]) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }

    let json = serde_json::to_string_pretty(records)?;

    let tmp_path = path.with_extension("json.tmp");
    let mut file = fs::File::create(&tmp_path)?;
    file.write_all(json.as_bytes())?;
    file.write_all(b"\n")?;
    file.flush()?;
    drop(file);

    // Atomic rename
    fs::rename(&tmp_path, path)?;
    tracing::debug!(path = %path.display(), count = records.len(), "Saved snapshot");

    Ok(())
}
