//! # Invoice Document
//!
//! The finalized data handed to a renderer. Everything here is already
//! validated and computed; a renderer only lays it out.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::client::ClientRecord;
use crate::money::Money;
use crate::types::{InvoiceTotals, PaymentMethod, ProductLine};

/// The issuing company, printed in the top-left block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SellerIdentity {
    pub name: String,
    /// Single printed address line.
    pub address: String,
    pub siret: String,
    pub vat_number: String,
    pub contact_phone: String,
    /// Printed under the totals of reverse-charge invoices.
    pub reverse_charge_note: String,
}

impl Default for SellerIdentity {
    fn default() -> Self {
        SellerIdentity {
            name: "ELLIETECH PARIS 2014".to_string(),
            address: "90 Rue de la Haie Coq Bâtiment 243,93300,Aubervilliers".to_string(),
            siret: "98741912400019".to_string(),
            vat_number: "FR 89 987419124".to_string(),
            contact_phone: "07 54 12 06 47".to_string(),
            reverse_charge_note: "TVA communo code 123545".to_string(),
        }
    }
}

/// One invoice, ready to render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceDocument {
    pub number: u64,
    pub issue_date: NaiveDate,
    pub seller: SellerIdentity,
    pub client: ClientRecord,
    pub lines: Vec<ProductLine>,
    pub totals: InvoiceTotals,
    pub payment_method: PaymentMethod,
}

impl InvoiceDocument {
    /// Invoice reference as printed in the title: `FA{number}`.
    pub fn display_number(&self) -> String {
        format!("FA{}", self.number)
    }

    /// True when the tax line is zeroed.
    pub fn tax_exempt(&self) -> bool {
        self.totals.tax_exempt
    }

    /// Issue date in the `dd/mm/yyyy` form used on the invoice.
    pub fn formatted_date(&self) -> String {
        self.issue_date.format("%d/%m/%Y").to_string()
    }

    /// Amount the closing "paid" sentence quotes: the grand total.
    pub fn amount_paid(&self) -> Money {
        self.totals.grand_total
    }
}
