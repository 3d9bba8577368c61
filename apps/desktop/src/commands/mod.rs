//! # Commands Module
//!
//! Entry points for the UI shell. Each takes the workflow it acts on and
//! returns serializable DTOs or an [`ApiError`](crate::error::ApiError).
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs      ◄─── You are here (exports)
//! ├── client.rs   ◄─── Client picker: list, filter, select, delete
//! └── invoice.rs  ◄─── Form commands and the invoice view
//! ```
//!
//! ## How Commands Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  UI shell                                                               │
//! │  ────────                                                               │
//! │  "选择" clicked on "Acme"                                               │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  select_client(&mut session, "Acme")                                    │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  Workflow::handle(SelectClient("Acme"))  ◄── stage checks, lookups     │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  Result<ClientDto, ApiError>             ◄── camelCase JSON             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod client;
pub mod invoice;

pub use client::{delete_client, filter_clients, list_clients, select_client, ClientDto};
pub use invoice::{dispatch, invoice_view, InvoiceView, LineDto, TotalsDto};
