//! # Domain Types
//!
//! Core value types used throughout Facture.
//!
//! ## Type Map
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │  ProductLine    │   │ InvoiceTotals   │   │    TaxRate      │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  name           │   │  subtotal       │   │  bps (u32)      │       │
//! │  │  quantity       │──►│  tax_amount     │   │  2000 = 20%     │       │
//! │  │  unit_price     │   │  grand_total    │   └─────────────────┘       │
//! │  │  line_total     │   │  tax_exempt     │                              │
//! │  └─────────────────┘   └─────────────────┘                              │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌───────────────────────────────────────┐       │
//! │  │ PaymentMethod   │   │ Stage                                 │       │
//! │  │  Card ("CB")    │   │ CollectingClient → CollectingProducts │       │
//! │  │  Transfer       │   │ → CollectingPayment → Finalized       │       │
//! │  └─────────────────┘   └───────────────────────────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::money::Money;

// =============================================================================
// Tax Rate
// =============================================================================

/// Tax rate represented in basis points (bps).
///
/// 1 basis point = 0.01%, so the French standard VAT rate of 20% is 2000 bps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxRate(u32);

impl TaxRate {
    /// The standard 20% rate printed as "TVA 20%".
    pub const STANDARD: TaxRate = TaxRate(2000);

    /// Creates a tax rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        TaxRate(bps)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

}

impl Default for TaxRate {
    fn default() -> Self {
        TaxRate::STANDARD
    }
}

/// `"20%"`, `"5.5%"`.
impl fmt::Display for TaxRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let whole = self.0 / 100;
        let frac = self.0 % 100;
        if frac == 0 {
            write!(f, "{}%", whole)
        } else if frac % 10 == 0 {
            write!(f, "{}.{}%", whole, frac / 10)
        } else {
            write!(f, "{}.{:02}%", whole, frac)
        }
    }
}

// =============================================================================
// Product Line
// =============================================================================

/// One billed product: name, quantity and unit price with its line total.
///
/// Built only through [`crate::calculator::InvoiceCalculator::add_line`] so
/// every instance holds validated values. Lines are never edited in place;
/// an edit removes the line and re-adds it from pre-filled form text.
///
/// Serialize only: there is no way to build a line whose total disagrees
/// with its quantity and price.
///
/// ```rust,compile_fail
/// fn from_json<T: serde::de::DeserializeOwned>() {}
/// from_json::<facture_core::ProductLine>();
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductLine {
    name: String,
    quantity: u32,
    unit_price: Money,
    line_total: Money,
}

impl ProductLine {
    pub(crate) fn new(name: String, quantity: u32, unit_price: Money, line_total: Money) -> Self {
        ProductLine {
            name,
            quantity,
            unit_price,
            line_total,
        }
    }

    /// Product name as printed on the invoice.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of units billed.
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Unit price excluding tax.
    pub fn unit_price(&self) -> Money {
        self.unit_price
    }

    /// `quantity × unit_price`, excluding tax.
    pub fn line_total(&self) -> Money {
        self.line_total
    }

    /// One-line rendering for the product list widget.
    ///
    /// ```rust
    /// use facture_core::calculator::InvoiceCalculator;
    ///
    /// let line = InvoiceCalculator::standard().add_line("Widget", "2", "10").unwrap();
    /// assert_eq!(line.summary(), "Widget // 2 // 10.00 // 20.00");
    /// ```
    pub fn summary(&self) -> String {
        format!(
            "{} // {} // {} // {}",
            self.name, self.quantity, self.unit_price, self.line_total
        )
    }
}

// =============================================================================
// Invoice Totals
// =============================================================================

/// Totals derived from a list of product lines. Never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceTotals {
    /// Sum of line totals ("Total HT").
    pub subtotal: Money,

    /// The rate the tax line is labelled with.
    pub tax_rate: TaxRate,

    /// Tax on the subtotal, zero for reverse-charge clients ("TVA 20%").
    pub tax_amount: Money,

    /// `subtotal + tax_amount` ("Total TTC").
    pub grand_total: Money,

    /// True when the client carries a tax identifier.
    pub tax_exempt: bool,
}

impl InvoiceTotals {
    /// Totals of an invoice with no lines.
    pub const fn empty(tax_rate: TaxRate, tax_exempt: bool) -> Self {
        InvoiceTotals {
            subtotal: Money::zero(),
            tax_rate,
            tax_amount: Money::zero(),
            grand_total: Money::zero(),
            tax_exempt,
        }
    }
}

// =============================================================================
// Payment Method
// =============================================================================

/// How the client paid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Bank card, printed as "CB".
    #[default]
    Card,
    /// Bank transfer, printed as "Virement".
    Transfer,
}

impl PaymentMethod {
    /// Label printed on the invoice.
    pub fn label(&self) -> &'static str {
        match self {
            PaymentMethod::Card => "CB",
            PaymentMethod::Transfer => "Virement",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for PaymentMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "cb" | "card" | "carte" => Ok(PaymentMethod::Card),
            "virement" | "transfer" => Ok(PaymentMethod::Transfer),
            other => Err(format!("unknown payment method: {}", other)),
        }
    }
}

// =============================================================================
// Workflow Stage
// =============================================================================

/// The page of the invoice form the user is on.
///
/// ```text
/// CollectingClient ⇄ CollectingProducts ⇄ CollectingPayment ──► Finalized
/// ```
///
/// Moves are one step forward or one step back; `Finalized` has no exits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    #[default]
    CollectingClient,
    CollectingProducts,
    CollectingPayment,
    Finalized,
}

impl Stage {
    /// The stage a "next page" action leads to.
    ///
    /// `CollectingPayment` has no plain next stage: leaving it requires a
    /// successful finalization.
    pub fn next(self) -> Option<Stage> {
        match self {
            Stage::CollectingClient => Some(Stage::CollectingProducts),
            Stage::CollectingProducts => Some(Stage::CollectingPayment),
            Stage::CollectingPayment | Stage::Finalized => None,
        }
    }

    /// The stage a "previous page" action leads to.
    pub fn previous(self) -> Option<Stage> {
        match self {
            Stage::CollectingClient | Stage::Finalized => None,
            Stage::CollectingProducts => Some(Stage::CollectingClient),
            Stage::CollectingPayment => Some(Stage::CollectingProducts),
        }
    }

    /// Checks if the workflow is over.
    pub fn is_terminal(self) -> bool {
        self == Stage::Finalized
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Stage::CollectingClient => "collecting client details",
            Stage::CollectingProducts => "collecting products",
            Stage::CollectingPayment => "collecting payment",
            Stage::Finalized => "finalized",
        };
        f.write_str(s)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tax_rate_display() {
        assert_eq!(TaxRate::STANDARD.to_string(), "20%");
        assert_eq!(TaxRate::from_bps(550).to_string(), "5.5%");
        assert_eq!(TaxRate::from_bps(825).to_string(), "8.25%");
        assert_eq!(TaxRate::from_bps(0).to_string(), "0%");
    }

    #[test]
    fn test_tax_rate_default_is_standard() {
        assert_eq!(TaxRate::default().bps(), 2000);
        assert_eq!(TaxRate::default(), TaxRate::STANDARD);
    }

    #[test]
    fn test_payment_method_labels() {
        assert_eq!(PaymentMethod::Card.to_string(), "CB");
        assert_eq!(PaymentMethod::Transfer.to_string(), "Virement");
        assert_eq!("virement".parse::<PaymentMethod>(), Ok(PaymentMethod::Transfer));
        assert_eq!(" CB ".parse::<PaymentMethod>(), Ok(PaymentMethod::Card));
        assert!("cheque".parse::<PaymentMethod>().is_err());
    }

    #[test]
    fn test_stage_moves_one_step() {
        assert_eq!(Stage::CollectingClient.next(), Some(Stage::CollectingProducts));
        assert_eq!(Stage::CollectingProducts.next(), Some(Stage::CollectingPayment));
        assert_eq!(Stage::CollectingPayment.next(), None);

        assert_eq!(Stage::CollectingPayment.previous(), Some(Stage::CollectingProducts));
        assert_eq!(Stage::CollectingProducts.previous(), Some(Stage::CollectingClient));
        assert_eq!(Stage::CollectingClient.previous(), None);
    }

    #[test]
    fn test_finalized_is_terminal() {
        assert!(Stage::Finalized.is_terminal());
        assert_eq!(Stage::Finalized.next(), None);
        assert_eq!(Stage::Finalized.previous(), None);
    }

    #[test]
    fn test_empty_totals() {
        let totals = InvoiceTotals::empty(TaxRate::STANDARD, false);
        assert!(totals.subtotal.is_zero());
        assert!(totals.tax_amount.is_zero());
        assert!(totals.grand_total.is_zero());
    }
}
