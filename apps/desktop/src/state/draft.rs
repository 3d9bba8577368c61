//! # Invoice Draft
//!
//! Everything typed into the form so far. Lives across page changes and is
//! only turned into an [`InvoiceDocument`](facture_core::InvoiceDocument)
//! at finalization.

use facture_core::{ClientRecord, PaymentMethod, ProductLine};
use serde::Serialize;

/// The invoice being entered.
///
/// Serialize only, like the [`ProductLine`]s it holds.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceDraft {
    /// Client form contents, as typed
    pub client: ClientRecord,

    /// Product lines, in entry order
    pub lines: Vec<ProductLine>,

    /// Selected payment method
    pub payment_method: PaymentMethod,
}

impl InvoiceDraft {
    /// Creates an empty draft.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of product lines.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Checks if no product has been added.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}
