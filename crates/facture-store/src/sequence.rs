//! # Invoice Sequencer
//!
//! The durable counter invoice numbers are drawn from.
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  load()          invoiceNumber.json → current (absent/garbage → 1)      │
//! │     │                                                                   │
//! │     ▼                                                                   │
//! │  next()          peek at current, no side effect, callable any time     │
//! │     │                                                                   │
//! │     ▼                                                                   │
//! │  (invoice rendered successfully)                                        │
//! │     │                                                                   │
//! │     ▼                                                                   │
//! │  commit()        write current + 1, then advance in memory              │
//! │                  write fails → current unchanged, error returned        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## File Format
//! ```json
//! {
//!     "invoice_number": 42
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::error::{StoreError, StoreResult};
use crate::json_file::{read_json, write_json_atomic};

/// First number handed out on a fresh install.
pub const FIRST_INVOICE_NUMBER: u64 = 1;

#[derive(Debug, Serialize, Deserialize)]
struct SequenceFile {
    invoice_number: u64,
}

/// Allocates invoice numbers.
///
/// ## Example
/// ```rust,no_run
/// use facture_store::InvoiceSequencer;
///
/// let mut seq = InvoiceSequencer::load("invoiceNumber.json");
/// let number = seq.next();
/// // ... render invoice `number` ...
/// seq.commit()?;
/// assert_eq!(seq.next(), number + 1);
/// # Ok::<(), facture_store::StoreError>(())
/// ```
#[derive(Debug, Clone)]
pub struct InvoiceSequencer {
    path: PathBuf,
    current: u64,
}

impl InvoiceSequencer {
    /// Loads the counter, recovering to [`FIRST_INVOICE_NUMBER`] when the file
    /// is absent, empty, unreadable, malformed or holds zero.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();

        let current = match read_json::<SequenceFile>(&path) {
            Ok(Some(file)) if file.invoice_number >= FIRST_INVOICE_NUMBER => file.invoice_number,
            Ok(Some(file)) => {
                warn!(
                    path = %path.display(),
                    found = file.invoice_number,
                    "Invoice number is not positive, starting at 1"
                );
                FIRST_INVOICE_NUMBER
            }
            Ok(None) => {
                debug!(path = %path.display(), "No invoice number yet, starting at 1");
                FIRST_INVOICE_NUMBER
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Invoice number unreadable, starting at 1");
                FIRST_INVOICE_NUMBER
            }
        };

        info!(path = %path.display(), current, "Invoice sequencer loaded");
        InvoiceSequencer { path, current }
    }

    /// The number the next finalized invoice will carry. Does not consume it.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&self) -> u64 {
        self.current
    }

    /// Same as [`InvoiceSequencer::next`].
    pub fn current(&self) -> u64 {
        self.current
    }

    /// Path of the counter file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Consumes the current number: persists `current + 1`, then advances.
    ///
    /// ## Returns
    /// The new current number.
    ///
    /// ## Errors
    /// [`StoreError::Persistence`] if the file cannot be written; the
    /// in-memory number is left unchanged so the same number is offered again.
    pub fn commit(&mut self) -> StoreResult<u64> {
        let advanced = self
            .current
            .checked_add(1)
            .ok_or_else(|| StoreError::corrupt(&self.path, "invoice number overflow"))?;

        write_json_atomic(
            &self.path,
            &SequenceFile {
                invoice_number: advanced,
            },
        )?;

        info!(consumed = self.current, next = advanced, "Invoice number committed");
        self.current = advanced;
        Ok(advanced)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_fresh_install_starts_at_one() {
        let dir = tempfile::tempdir().unwrap();
        let seq = InvoiceSequencer::load(dir.path().join("invoiceNumber.json"));
        assert_eq!(seq.next(), 1);
    }

    #[test]
    fn test_reads_existing_counter() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("invoiceNumber.json");
        fs::write(&path, r#"{"invoice_number": 17}"#).unwrap();

        assert_eq!(InvoiceSequencer::load(&path).next(), 17);
    }

    #[test]
    fn test_garbage_recovers_to_one() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("invoiceNumber.json");

        for content in ["", "   ", "not json", r#"{"invoice_number": 0}"#, r#"{"invoice_number": -4}"#, "[]"] {
            fs::write(&path, content).unwrap();
            assert_eq!(InvoiceSequencer::load(&path).next(), 1, "content {content:?}");
        }
    }

    #[test]
    fn test_next_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let seq = InvoiceSequencer::load(dir.path().join("n.json"));
        assert_eq!(seq.next(), seq.next());
        assert_eq!(seq.current(), 1);
    }

    #[test]
    fn test_commit_persists_and_advances() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("invoiceNumber.json");
        let mut seq = InvoiceSequencer::load(&path);

        assert_eq!(seq.commit().unwrap(), 2);
        assert_eq!(seq.next(), 2);

        let text = fs::read_to_string(&path).unwrap();
        let json: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(json["invoice_number"], 2);

        assert_eq!(InvoiceSequencer::load(&path).next(), 2);
    }

    #[test]
    fn test_failed_commit_keeps_number() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "").unwrap();

        let mut seq = InvoiceSequencer::load(blocker.join("invoiceNumber.json"));
        assert!(matches!(seq.commit(), Err(StoreError::Persistence { .. })));
        assert_eq!(seq.next(), 1);
    }
}
