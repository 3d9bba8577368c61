//! # facture-core: Pure Invoice Logic
//!
//! Everything Facture computes, with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Facture Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 apps/desktop (facture-desktop)                  │   │
//! │  │    Workflow ──► Renderer (xlsx) ──► Client picker commands      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ facture-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌────────────┐  ┌──────────┐  │   │
//! │  │   │   money   │  │ calculator│  │   client   │  │ document │  │   │
//! │  │   │   Money   │  │ add_line  │  │ClientRecord│  │ Invoice  │  │   │
//! │  │   │  TaxRate  │  │  totals   │  │ differences│  │ Document │  │   │
//! │  │   └───────────┘  └───────────┘  └────────────┘  └──────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO FILES • NO CLOCK • PURE FUNCTIONS                │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 facture-store (JSON persistence)                │   │
//! │  │          ClientDirectory, InvoiceSequencer, atomic writes       │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (ProductLine, InvoiceTotals, PaymentMethod, Stage)
//! - [`money`] - Money type with integer arithmetic
//! - [`calculator`] - Line creation and totals
//! - [`client`] - Client records and conflict detection
//! - [`document`] - The finalized invoice handed to renderers
//! - [`error`] - Domain error types
//! - [`validation`] - Form text parsing
//!
//! ## Example Usage
//!
//! ```rust
//! use facture_core::{ClientRecord, InvoiceCalculator};
//!
//! let calc = InvoiceCalculator::standard();
//! let lines = vec![
//!     calc.add_line("Widget", "2", "10.00").unwrap(),
//!     calc.add_line("Gadget", "1", "5.50").unwrap(),
//! ];
//!
//! let client = ClientRecord::new("Acme SARL");
//! let totals = calc.compute_totals(&lines, client.is_tax_exempt());
//! assert_eq!(totals.grand_total.to_string(), "30.60");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod calculator;
pub mod client;
pub mod document;
pub mod error;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use calculator::{InvoiceCalculator, LineInput};
pub use client::{ClientField, ClientRecord, FieldChange};
pub use document::{InvoiceDocument, SellerIdentity};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum quantity on a single product line.
///
/// ## Business Reason
/// Catches a mistyped quantity before it ends up on a printed invoice.
pub const MAX_LINE_QUANTITY: u32 = 1_000_000;

/// Maximum unit price, in cents (100 000 000.00).
pub const MAX_UNIT_PRICE_CENTS: i64 = 10_000_000_000;

/// Maximum number of product lines on one invoice.
///
/// Together with [`MAX_LINE_QUANTITY`] and [`MAX_UNIT_PRICE_CENTS`] this
/// keeps the taxed grand total below `i64::MAX` cents.
pub const MAX_INVOICE_LINES: usize = 500;

/// Maximum length of a product or company name, in characters.
pub const MAX_NAME_LENGTH: usize = 200;
