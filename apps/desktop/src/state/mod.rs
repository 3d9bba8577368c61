//! # State Module
//!
//! Plain state owned by the application layer.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Types                                          │
//! │                                                                         │
//! │  ┌──────────────────────┐           ┌──────────────────────────┐        │
//! │  │   ConfigState        │           │   InvoiceDraft           │        │
//! │  │                      │           │                          │        │
//! │  │  data/output dirs    │           │  client form             │        │
//! │  │  tax rate, currency  │           │  product lines           │        │
//! │  │  language, seller    │           │  payment method          │        │
//! │  └──────────────────────┘           └──────────────────────────┘        │
//! │                                                                         │
//! │  ConfigState: read-only after startup                                  │
//! │  InvoiceDraft: owned by the Workflow, one per invoice                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod draft;

pub use config::{ConfigError, ConfigResult, ConfigState, CONFIG_FILE};
pub use draft::InvoiceDraft;
