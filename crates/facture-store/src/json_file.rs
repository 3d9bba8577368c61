//! # JSON Files
//!
//! Whole-file JSON reads and atomic rewrites.
//!
//! ## Atomic Rewrite
//! ```text
//! value ──serialize──► NamedTempFile in same dir ──fsync──► persist ──► clients.json
//!                              │
//!                        any failure: temp removed, target untouched
//! ```
//!
//! Output is pretty printed with four-space indentation and keeps non-ASCII
//! text as-is, matching files written by earlier versions of the tool.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use std::fs;
use std::io::{self, Write};
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::debug;

use crate::error::{StoreError, StoreResult};

/// Reads and parses a JSON file.
///
/// ## Returns
/// * `Ok(None)` - the file does not exist or holds only whitespace
/// * `Ok(Some(value))` - parsed content
/// * `Err(Corrupt)` - content is not valid for `T`
/// * `Err(Persistence)` - the file exists but cannot be read
pub fn read_json<T: DeserializeOwned>(path: &Path) -> StoreResult<Option<T>> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "File not found");
            return Ok(None);
        }
        Err(e) => return Err(StoreError::persistence(path, e)),
    };

    if text.trim().is_empty() {
        debug!(path = %path.display(), "File is empty");
        return Ok(None);
    }

    serde_json::from_str(&text)
        .map(Some)
        .map_err(|e| StoreError::corrupt(path, e))
}

/// Serializes `value` and atomically replaces `path` with it.
///
/// The temp file is created next to `path` so the final rename stays on one
/// filesystem, and it is deleted on every error path. Missing parent
/// directories are created.
pub fn write_json_atomic<T: Serialize + ?Sized>(path: &Path, value: &T) -> StoreResult<()> {
    let bytes = to_pretty_json(value).map_err(|e| StoreError::persistence(path, e))?;

    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(dir).map_err(|e| StoreError::persistence(path, e))?;

    let temp = write_temp(dir, &bytes).map_err(|e| StoreError::persistence(path, e))?;
    temp.persist(path)
        .map_err(|e| StoreError::persistence(path, e.error))?;

    debug!(path = %path.display(), bytes = bytes.len(), "File written");
    Ok(())
}

fn to_pretty_json<T: Serialize + ?Sized>(value: &T) -> io::Result<Vec<u8>> {
    let mut bytes = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut bytes, formatter);
    value
        .serialize(&mut serializer)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    Ok(bytes)
}

fn write_temp(dir: &Path, bytes: &[u8]) -> io::Result<NamedTempFile> {
    let mut temp = NamedTempFile::new_in(dir)?;
    temp.write_all(bytes)?;
    temp.flush()?;
    temp.as_file().sync_all()?;
    Ok(temp)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Sample {
        name: String,
    }

    #[test]
    fn test_missing_and_blank_files_read_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.json");
        assert_eq!(read_json::<Sample>(&path).unwrap(), None);

        fs::write(&path, "  \n").unwrap();
        assert_eq!(read_json::<Sample>(&path).unwrap(), None);
    }

    #[test]
    fn test_invalid_json_is_corrupt() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        fs::write(&path, "{ not json").unwrap();

        assert!(matches!(
            read_json::<Sample>(&path),
            Err(StoreError::Corrupt { .. })
        ));
    }

    #[test]
    fn test_write_then_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("sample.json");
        let value = Sample {
            name: "Café Ütopia".to_string(),
        };

        write_json_atomic(&path, &value).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert!(text.contains("Café Ütopia"));
        assert!(text.contains("\n    \"name\""));
        assert_eq!(read_json::<Sample>(&path).unwrap(), Some(value));
    }

    #[test]
    fn test_write_leaves_no_temp_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sample.json");
        write_json_atomic(&path, &Sample { name: "a".into() }).unwrap();
        write_json_atomic(&path, &Sample { name: "b".into() }).unwrap();

        let entries: Vec<_> = fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn test_failed_replace_keeps_target_and_cleans_up() {
        let dir = tempfile::tempdir().unwrap();
        // a non-empty directory sits where the file should go
        let path = dir.path().join("sample.json");
        fs::create_dir(&path).unwrap();
        fs::write(path.join("keep"), "x").unwrap();

        let result = write_json_atomic(&path, &Sample { name: "x".into() });
        assert!(matches!(result, Err(StoreError::Persistence { .. })));
        assert!(path.join("keep").exists());

        // only the blocking directory is left, no temp file beside it
        let entries: Vec<_> = fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn test_write_into_a_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "").unwrap();

        let result = write_json_atomic(&blocker.join("sample.json"), &Sample { name: "x".into() });
        assert!(matches!(result, Err(StoreError::Persistence { .. })));
    }
}
