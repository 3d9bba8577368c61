//! # Store Error Types
//!
//! Error types for the persisted JSON files.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  std::io::Error / serde_json::Error                                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StoreError (this module) ← Adds the file path                         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ApiError (in the app) ← What the form shows                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use facture_core::ValidationError;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Persistence errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A file could not be written, or read for a reason other than absence.
    ///
    /// ## When This Occurs
    /// - Data directory is read-only or missing and cannot be created
    /// - Disk full
    /// - Rename of the temp file failed
    #[error("Could not access {}: {source}", .path.display())]
    Persistence {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A file exists but its content cannot be understood.
    ///
    /// ## When This Occurs
    /// - clients.json was hand-edited into invalid JSON
    /// - A record is missing its company name
    #[error("{} is corrupt: {reason}", .path.display())]
    Corrupt { path: PathBuf, reason: String },

    /// No stored client matches the name.
    #[error("Client not found: {name}")]
    NotFound { name: String },

    /// The record being saved is not acceptable.
    #[error("Invalid client record: {0}")]
    Validation(#[from] ValidationError),
}

impl StoreError {
    pub(crate) fn persistence(path: &Path, source: io::Error) -> Self {
        StoreError::Persistence {
            path: path.to_path_buf(),
            source,
        }
    }

    pub(crate) fn corrupt(path: &Path, reason: impl ToString) -> Self {
        StoreError::Corrupt {
            path: path.to_path_buf(),
            reason: reason.to_string(),
        }
    }

    /// Creates a NotFound error for a client name.
    pub fn not_found(name: impl Into<String>) -> Self {
        StoreError::NotFound { name: name.into() }
    }
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
