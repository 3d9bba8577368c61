//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  With floats:                                                           │
//! │    3 × 0.1 = 0.30000000000000004                                        │
//! │    a "TVA 20%" line can disagree with Total TTC by one cent             │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    Unit prices are rounded to cents once, at parse time.                │
//! │    Line totals, subtotal and grand total are exact integer sums.        │
//! │    Tax is the only division and it is rounded explicitly.               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use facture_core::money::Money;
//!
//! let price = Money::from_cents(1099); // 10.99 €
//! let line = price.checked_multiply_quantity(3).unwrap();
//! assert_eq!(line.cents(), 3297);
//! assert_eq!(line.to_string(), "32.97");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Sub};

use crate::types::TaxRate;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in cents (the smallest euro unit).
///
/// ## Where Money Flows
/// ```text
/// price text ──► ProductLine.unit_price ──► ProductLine.line_total
///                                                   │
///                                                   ▼
///                          InvoiceTotals.subtotal ──► tax ──► grand_total
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents.
    ///
    /// ```rust
    /// use facture_core::money::Money;
    ///
    /// assert_eq!(Money::from_cents(550).cents(), 550);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the whole-euro portion.
    #[inline]
    pub const fn euros(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the cents portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Calculates tax on this amount, rounded half away from zero at the cent.
    ///
    /// ## Implementation
    /// Integer math on basis points: `|amount| * bps`, then `+ 5000` and
    /// `/ 10000` rounds the magnitude; the sign is put back afterwards so a
    /// credit note rounds symmetrically to an invoice.
    ///
    /// ```rust
    /// use facture_core::money::Money;
    /// use facture_core::types::TaxRate;
    ///
    /// // 25.50 € × 20% = 5.10 €
    /// let tax = Money::from_cents(2550).calculate_tax(TaxRate::STANDARD);
    /// assert_eq!(tax.cents(), 510);
    ///
    /// // 1.25 € × 10% = 0.125 € → 0.13 €
    /// let tax = Money::from_cents(125).calculate_tax(TaxRate::from_bps(1000));
    /// assert_eq!(tax.cents(), 13);
    /// ```
    pub fn calculate_tax(&self, rate: TaxRate) -> Money {
        // i128 keeps amount * bps from overflowing on large invoices
        let magnitude = (self.0.unsigned_abs() as i128 * rate.bps() as i128 + 5000) / 10000;
        let signed = if self.0 < 0 { -magnitude } else { magnitude };
        Money::from_cents(signed as i64)
    }

    /// Multiplies money by a quantity, returning `None` on overflow.
    ///
    /// ```rust
    /// use facture_core::money::Money;
    ///
    /// let unit_price = Money::from_cents(1000);
    /// assert_eq!(unit_price.checked_multiply_quantity(2), Some(Money::from_cents(2000)));
    /// ```
    #[inline]
    pub fn checked_multiply_quantity(&self, qty: u32) -> Option<Self> {
        self.0.checked_mul(qty as i64).map(Money)
    }

    /// Returns the amount as a float in euros.
    ///
    /// For spreadsheet cells only. Never feed the result back into arithmetic.
    #[inline]
    pub fn to_euros_f64(&self) -> f64 {
        self.0 as f64 / 100.0
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Plain two-decimal rendering (`"25.50"`), the way the product list shows
/// amounts. Currency symbols are added by the app configuration.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}{}.{:02}", sign, self.euros().abs(), self.cents_part())
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents() {
        let money = Money::from_cents(1099);
        assert_eq!(money.cents(), 1099);
        assert_eq!(money.euros(), 10);
        assert_eq!(money.cents_part(), 99);
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_cents(2550).to_string(), "25.50");
        assert_eq!(Money::from_cents(5).to_string(), "0.05");
        assert_eq!(Money::from_cents(-550).to_string(), "-5.50");
        assert_eq!(Money::zero().to_string(), "0.00");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(550);

        assert_eq!((a + b).cents(), 1550);
        assert_eq!((a - b).cents(), 450);

        let mut c = a;
        c += b;
        assert_eq!(c.cents(), 1550);
    }

    #[test]
    fn test_sum() {
        let amounts = [Money::from_cents(2000), Money::from_cents(550)];
        let total: Money = amounts.iter().sum();
        assert_eq!(total.cents(), 2550);

        let empty: Money = Vec::<Money>::new().into_iter().sum();
        assert!(empty.is_zero());
    }

    #[test]
    fn test_standard_tax() {
        let tax = Money::from_cents(2550).calculate_tax(TaxRate::STANDARD);
        assert_eq!(tax.cents(), 510);
    }

    #[test]
    fn test_tax_rounds_half_away_from_zero() {
        // 1.25 € at 10% is 12.5 cents
        let rate = TaxRate::from_bps(1000);
        assert_eq!(Money::from_cents(125).calculate_tax(rate).cents(), 13);
        assert_eq!(Money::from_cents(-125).calculate_tax(rate).cents(), -13);
        assert_eq!(Money::from_cents(124).calculate_tax(rate).cents(), 12);
    }

    #[test]
    fn test_zero_tax_rate() {
        let tax = Money::from_cents(9999).calculate_tax(TaxRate::from_bps(0));
        assert!(tax.is_zero());
    }

    #[test]
    fn test_multiply_quantity() {
        let unit_price = Money::from_cents(550);
        assert_eq!(unit_price.checked_multiply_quantity(3), Some(Money::from_cents(1650)));
        assert_eq!(Money::from_cents(i64::MAX).checked_multiply_quantity(2), None);
    }

    #[test]
    fn test_to_euros_f64() {
        assert_eq!(Money::from_cents(2550).to_euros_f64(), 25.5);
    }
}
