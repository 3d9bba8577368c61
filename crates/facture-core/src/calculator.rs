//! # Invoice Calculator
//!
//! Builds product lines from form text and aggregates them into totals.
//!
//! ## Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  "Widget", "2", "10.00"                                                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  add_line ── invalid? ──► ValidationError (nothing appended)           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ProductLine { qty: 2, unit: 10.00, total: 20.00 }                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  compute_totals(lines, tax_exempt)                                     │
//! │       │                                                                 │
//! │       ├── tax_exempt: tax = 0                                          │
//! │       └── otherwise:  tax = round(subtotal × 20%, 2)                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;
use crate::types::{InvoiceTotals, ProductLine, TaxRate};
use crate::validation::{parse_price, parse_quantity, validate_product_name, ValidationResult};
use crate::MAX_INVOICE_LINES;

/// Raw product form text, as typed or as pre-filled for an edit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineInput {
    pub name: String,
    pub quantity: String,
    pub price: String,
}

impl LineInput {
    /// Creates form text from its three fields.
    pub fn new(
        name: impl Into<String>,
        quantity: impl Into<String>,
        price: impl Into<String>,
    ) -> Self {
        LineInput {
            name: name.into(),
            quantity: quantity.into(),
            price: price.into(),
        }
    }

    /// Pre-fill text that re-creates `line` when submitted unchanged.
    pub fn from_line(line: &ProductLine) -> Self {
        LineInput {
            name: line.name().to_string(),
            quantity: line.quantity().to_string(),
            price: line.unit_price().to_string(),
        }
    }
}

/// Invoice arithmetic at the fixed 20% rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvoiceCalculator {
    tax_rate: TaxRate,
}

impl Default for InvoiceCalculator {
    fn default() -> Self {
        InvoiceCalculator::standard()
    }
}

impl InvoiceCalculator {
    /// Calculator for the standard 20% rate.
    pub const fn standard() -> Self {
        InvoiceCalculator {
            tax_rate: TaxRate::STANDARD,
        }
    }

    /// The rate applied to taxable invoices.
    pub fn tax_rate(&self) -> TaxRate {
        self.tax_rate
    }

    /// Validates form text and builds a product line.
    ///
    /// ## Errors
    /// - [`ValidationError::InvalidQuantity`] unless the quantity is a positive whole number
    /// - [`ValidationError::InvalidPrice`] unless the price is a non-negative decimal
    /// - [`ValidationError::Required`] for a blank name
    ///
    /// ## Example
    /// ```rust
    /// use facture_core::calculator::InvoiceCalculator;
    ///
    /// let calc = InvoiceCalculator::standard();
    /// let line = calc.add_line("Gadget", "1", "5.50").unwrap();
    /// assert_eq!(line.line_total().cents(), 550);
    ///
    /// assert!(calc.add_line("Gadget", "one", "5.50").is_err());
    /// ```
    pub fn add_line(
        &self,
        name: &str,
        quantity_text: &str,
        price_text: &str,
    ) -> ValidationResult<ProductLine> {
        let quantity = parse_quantity(quantity_text)?;
        let unit_price = parse_price(price_text)?;
        let name = validate_product_name(name)?;

        let line_total = unit_price
            .checked_multiply_quantity(quantity)
            .ok_or_else(|| ValidationError::InvalidPrice {
                input: price_text.trim().to_string(),
                reason: "line total is too large".to_string(),
            })?;

        Ok(ProductLine::new(name, quantity, unit_price, line_total))
    }

    /// [`InvoiceCalculator::add_line`] over a [`LineInput`].
    pub fn add_input(&self, input: &LineInput) -> ValidationResult<ProductLine> {
        self.add_line(&input.name, &input.quantity, &input.price)
    }

    /// Checks that one more line fits on the invoice.
    ///
    /// ## Errors
    /// [`CoreError::TooManyLines`] once `lines` holds [`MAX_INVOICE_LINES`].
    pub fn check_room(&self, lines: &[ProductLine]) -> CoreResult<()> {
        if lines.len() >= MAX_INVOICE_LINES {
            return Err(CoreError::TooManyLines {
                max: MAX_INVOICE_LINES,
            });
        }
        Ok(())
    }

    /// Aggregates lines into totals. Pure: same input, same output.
    ///
    /// Zero lines give zero totals whatever the exemption flag. Lines built
    /// by [`InvoiceCalculator::add_line`], at most [`MAX_INVOICE_LINES`] of
    /// them, always fit in `i64` cents.
    ///
    /// ## Example
    /// ```rust
    /// use facture_core::calculator::InvoiceCalculator;
    ///
    /// let calc = InvoiceCalculator::standard();
    /// let lines = vec![
    ///     calc.add_line("Widget", "2", "10.00").unwrap(),
    ///     calc.add_line("Gadget", "1", "5.50").unwrap(),
    /// ];
    ///
    /// let taxed = calc.compute_totals(&lines, false);
    /// assert_eq!(taxed.subtotal.cents(), 2550);
    /// assert_eq!(taxed.tax_amount.cents(), 510);
    /// assert_eq!(taxed.grand_total.cents(), 3060);
    ///
    /// let exempt = calc.compute_totals(&lines, true);
    /// assert_eq!(exempt.tax_amount.cents(), 0);
    /// assert_eq!(exempt.grand_total.cents(), 2550);
    /// ```
    pub fn compute_totals(&self, lines: &[ProductLine], is_tax_exempt: bool) -> InvoiceTotals {
        let subtotal: Money = lines.iter().map(ProductLine::line_total).sum();

        let tax_amount = if is_tax_exempt {
            Money::zero()
        } else {
            subtotal.calculate_tax(self.tax_rate)
        };

        InvoiceTotals {
            subtotal,
            tax_rate: self.tax_rate,
            tax_amount,
            grand_total: subtotal + tax_amount,
            tax_exempt: is_tax_exempt,
        }
    }

    /// Returns the lines without the one at `index`.
    ///
    /// ## Errors
    /// [`CoreError::IndexOutOfRange`] if `index` is past the end.
    pub fn remove_line(&self, lines: &[ProductLine], index: usize) -> CoreResult<Vec<ProductLine>> {
        check_index(lines, index)?;

        let mut remaining = lines.to_vec();
        remaining.remove(index);
        Ok(remaining)
    }

    /// Edit = remove + pre-fill: returns the remaining lines and the form
    /// text of the removed one.
    pub fn take_line_for_edit(
        &self,
        lines: &[ProductLine],
        index: usize,
    ) -> CoreResult<(Vec<ProductLine>, LineInput)> {
        check_index(lines, index)?;

        let prefill = LineInput::from_line(&lines[index]);
        let remaining = self.remove_line(lines, index)?;
        Ok((remaining, prefill))
    }
}

fn check_index(lines: &[ProductLine], index: usize) -> CoreResult<()> {
    if index >= lines.len() {
        return Err(CoreError::IndexOutOfRange {
            index,
            len: lines.len(),
        });
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
