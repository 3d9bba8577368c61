//! # facture-store: JSON Persistence for Facture
//!
//! The two files the invoice tool keeps between runs.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Facture Data Flow                                │
//! │                                                                         │
//! │  Workflow (finalize)                                                   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  facture-store (THIS CRATE)                     │   │
//! │  │                                                                 │   │
//! │  │   ┌────────────────┐   ┌────────────────┐   ┌──────────────┐   │   │
//! │  │   │ClientDirectory │   │InvoiceSequencer│   │  json_file   │   │   │
//! │  │   │ (clients.rs)   │   │ (sequence.rs)  │   │ atomic write │   │   │
//! │  │   │ upsert/delete  │   │ next/commit    │◄──│ temp+rename  │   │   │
//! │  │   └────────────────┘   └────────────────┘   └──────────────┘   │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  data_dir/clients.json      data_dir/invoiceNumber.json                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`clients`] - Client directory with conflict detection
//! - [`sequence`] - Invoice number counter
//! - [`store`] - Opening both from one data directory
//! - [`json_file`] - Whole-file JSON reads and atomic rewrites
//! - [`error`] - Store error types
//!
//! ## Usage
//!
//! ```rust,no_run
//! use facture_core::ClientRecord;
//! use facture_store::{Store, StoreConfig, UpsertResult};
//!
//! let mut store = Store::open(&StoreConfig::new("./data"))?;
//!
//! let result = store.clients_mut().upsert(&ClientRecord::new("Acme SARL"))?;
//! assert_eq!(result, UpsertResult::Inserted);
//!
//! let number = store.sequencer().next();
//! // ... render invoice `number` ...
//! store.sequencer_mut().commit()?;
//! # Ok::<(), facture_store::StoreError>(())
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod clients;
pub mod error;
pub mod json_file;
pub mod sequence;
pub mod store;

// =============================================================================
// Re-exports
// =============================================================================

pub use clients::{ClientDirectory, UpsertResult};
pub use error::{StoreError, StoreResult};
pub use sequence::InvoiceSequencer;
pub use store::{Store, StoreConfig};
