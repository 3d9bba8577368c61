//! # Validation Module
//!
//! Turns raw form text into typed values.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Form (UI shell)                                              │
//! │  └── Raw text exactly as typed                                         │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── parse_quantity  "3"     → 3                                       │
//! │  ├── parse_price     "5,50"  → 550 cents                               │
//! │  └── name checks     "  "    → Required                                │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Calculator                                                   │
//! │  └── Only ever sees typed, in-range values                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use facture_core::validation::{parse_price, parse_quantity};
//!
//! assert_eq!(parse_quantity("3").unwrap(), 3);
//! assert_eq!(parse_price("5,50").unwrap().cents(), 550);
//! assert!(parse_quantity("1.5").is_err());
//! ```

use crate::error::ValidationError;
use crate::money::Money;
use crate::{MAX_LINE_QUANTITY, MAX_NAME_LENGTH, MAX_UNIT_PRICE_CENTS};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Numeric Parsers
// =============================================================================

/// Parses the quantity field.
///
/// ## Rules
/// - Surrounding whitespace is ignored
/// - ASCII digits only: no sign, no decimal point, no exponent
/// - At least 1, at most [`MAX_LINE_QUANTITY`]
///
/// ## Example
/// ```rust
/// use facture_core::validation::parse_quantity;
///
/// assert_eq!(parse_quantity(" 12 ").unwrap(), 12);
/// assert!(parse_quantity("").is_err());
/// assert!(parse_quantity("-1").is_err());
/// assert!(parse_quantity("0").is_err());
/// ```
pub fn parse_quantity(text: &str) -> ValidationResult<u32> {
    let raw = text.trim();

    if raw.is_empty() {
        return Err(ValidationError::quantity(raw, "is required"));
    }

    if !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ValidationError::quantity(raw, "must be a whole number"));
    }

    let qty: u32 = raw
        .parse()
        .map_err(|_| ValidationError::quantity(raw, "is too large"))?;

    if qty == 0 {
        return Err(ValidationError::quantity(raw, "must be at least 1"));
    }

    if qty > MAX_LINE_QUANTITY {
        return Err(ValidationError::quantity(raw, "is too large"));
    }

    Ok(qty)
}

/// Parses the unit price field into cents.
///
/// ## Rules
/// - Surrounding whitespace is ignored
/// - Digits with at most one decimal separator, `.` or `,`
/// - Optional leading `+`; a leading `-` is rejected
/// - More than two decimals are rounded half up at the cent
/// - Zero is allowed (free item)
/// - At most [`MAX_UNIT_PRICE_CENTS`]
///
/// ## Example
/// ```rust
/// use facture_core::validation::parse_price;
///
/// assert_eq!(parse_price("10").unwrap().cents(), 1000);
/// assert_eq!(parse_price("5.5").unwrap().cents(), 550);
/// assert_eq!(parse_price("0.125").unwrap().cents(), 13);
/// assert_eq!(parse_price(".5").unwrap().cents(), 50);
/// assert!(parse_price("abc").is_err());
/// assert!(parse_price("-2").is_err());
/// ```
pub fn parse_price(text: &str) -> ValidationResult<Money> {
    let raw = text.trim();

    if raw.is_empty() {
        return Err(ValidationError::price(raw, "is required"));
    }

    let body = if let Some(rest) = raw.strip_prefix('+') {
        rest
    } else if raw.starts_with('-') {
        return Err(ValidationError::price(raw, "must not be negative"));
    } else {
        raw
    };

    let mut parts = body.splitn(2, ['.', ',']);
    let whole = parts.next().unwrap_or("");
    let fraction = parts.next().unwrap_or("");

    let is_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    if (whole.is_empty() && fraction.is_empty()) || !is_digits(whole) || !is_digits(fraction) {
        return Err(ValidationError::price(raw, "must be a number"));
    }

    let euros: i64 = if whole.is_empty() {
        0
    } else {
        whole
            .parse()
            .map_err(|_| ValidationError::price(raw, "is too large"))?
    };

    let digit = |i: usize| -> i64 {
        fraction
            .as_bytes()
            .get(i)
            .map(|b| (b - b'0') as i64)
            .unwrap_or(0)
    };
    let round_up = if digit(2) >= 5 { 1 } else { 0 };

    euros
        .checked_mul(100)
        .and_then(|c| c.checked_add(digit(0) * 10 + digit(1) + round_up))
        .filter(|&cents| cents <= MAX_UNIT_PRICE_CENTS)
        .map(Money::from_cents)
        .ok_or_else(|| ValidationError::price(raw, "is too large"))
}

// =============================================================================
// String Validators
// =============================================================================

/// Validates a product name and returns it trimmed.
///
/// ## Example
/// ```rust
/// use facture_core::validation::validate_product_name;
///
/// assert_eq!(validate_product_name("  Widget ").unwrap(), "Widget");
/// assert!(validate_product_name("").is_err());
/// ```
pub fn validate_product_name(name: &str) -> ValidationResult<String> {
    validate_label("name", name)
}

/// Validates a client company name and returns it trimmed.
///
/// The company name is the directory key, so it can never be blank.
pub fn validate_company_name(name: &str) -> ValidationResult<String> {
    validate_label("company name", name)
}

fn validate_label(field: &str, value: &str) -> ValidationResult<String> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::required(field));
    }

    if value.chars().count() > MAX_NAME_LENGTH {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: MAX_NAME_LENGTH,
        });
    }

    Ok(value.to_string())
}

// =============================================================================
// Unit Tests
// =============================================================================
