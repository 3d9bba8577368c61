//! # Render Module
//!
//! Turns a finalized [`InvoiceDocument`] into a file on disk.
//!
//! ```text
//! render/
//! ├── mod.rs      ◄─── InvoiceRenderer trait, RenderError, artifact cleanup
//! ├── layout.rs   ◄─── Where every cell of the invoice goes (pure)
//! └── xlsx.rs     ◄─── Writes the layout with rust_xlsxwriter
//! ```
//!
//! The workflow only sees the trait, so tests drive it with in-memory
//! renderers and the xlsx writer never has to run in them.

pub mod layout;
pub mod xlsx;

use facture_core::InvoiceDocument;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

pub use xlsx::XlsxRenderer;

// =============================================================================
// Errors
// =============================================================================

/// Spreadsheet production errors.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The workbook could not be assembled.
    #[error("Spreadsheet error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    /// The file could not be written.
    #[error("Could not write {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl RenderError {
    pub(crate) fn io(path: &Path, source: io::Error) -> Self {
        RenderError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Result type for render operations.
pub type RenderResult<T> = Result<T, RenderError>;

// =============================================================================
// Renderer Trait
// =============================================================================

/// Produces the artifact for one invoice.
pub trait InvoiceRenderer {
    /// Where the artifact of invoice `number` lives. Deterministic.
    fn artifact_path(&self, number: u64) -> PathBuf;

    /// Writes the artifact and returns its path.
    fn render(&self, doc: &InvoiceDocument) -> RenderResult<PathBuf>;
}

impl<R: InvoiceRenderer + ?Sized> InvoiceRenderer for Box<R> {
    fn artifact_path(&self, number: u64) -> PathBuf {
        (**self).artifact_path(number)
    }

    fn render(&self, doc: &InvoiceDocument) -> RenderResult<PathBuf> {
        (**self).render(doc)
    }
}

/// File name of the artifact for invoice `number`: `FACTURE {n}.xlsx`.
pub fn artifact_file_name(number: u64) -> String {
    format!("FACTURE {}.xlsx", number)
}

// =============================================================================
// Cleanup
// =============================================================================

/// Deletes the artifact of invoice `number - 1`, if there is one.
///
/// Best effort: a missing file is fine and any other failure is only
/// logged. Returns whether a file was removed.
pub fn remove_previous_artifact<R: InvoiceRenderer + ?Sized>(renderer: &R, number: u64) -> bool {
    let Some(previous) = number.checked_sub(1).filter(|n| *n >= 1) else {
        return false;
    };

    let path = renderer.artifact_path(previous);
    match fs::remove_file(&path) {
        Ok(()) => {
            info!(path = %path.display(), "Previous invoice file removed");
            true
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "No previous invoice file");
            false
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Could not remove previous invoice file");
            false
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    struct DirRenderer(PathBuf);

    impl InvoiceRenderer for DirRenderer {
        fn artifact_path(&self, number: u64) -> PathBuf {
            self.0.join(artifact_file_name(number))
        }

        fn render(&self, doc: &InvoiceDocument) -> RenderResult<PathBuf> {
            Ok(self.artifact_path(doc.number))
        }
    }

    #[test]
    fn test_artifact_file_name() {
        assert_eq!(artifact_file_name(7), "FACTURE 7.xlsx");
    }

    #[test]
    fn test_remove_previous_artifact() {
        let dir = tempfile::tempdir().unwrap();
        let renderer = DirRenderer(dir.path().to_path_buf());
        fs::write(renderer.artifact_path(4), b"old").unwrap();
        fs::write(renderer.artifact_path(5), b"new").unwrap();

        assert!(remove_previous_artifact(&renderer, 5));
        assert!(!renderer.artifact_path(4).exists());
        assert!(renderer.artifact_path(5).exists());

        // already gone
        assert!(!remove_previous_artifact(&renderer, 5));
    }

    #[test]
    fn test_first_invoice_has_no_previous() {
        let dir = tempfile::tempdir().unwrap();
        let renderer = DirRenderer(dir.path().to_path_buf());
        assert!(!remove_previous_artifact(&renderer, 1));
        assert!(!remove_previous_artifact(&renderer, 0));
    }

    #[test]
    fn test_cleanup_failure_is_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let renderer = DirRenderer(dir.path().to_path_buf());
        // a directory cannot be removed with remove_file
        fs::create_dir(renderer.artifact_path(2)).unwrap();

        assert!(!remove_previous_artifact(&renderer, 3));
        assert!(renderer.artifact_path(2).exists());
    }
}
