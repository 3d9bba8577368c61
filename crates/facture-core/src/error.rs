//! # Error Types
//!
//! Domain-specific error types for facture-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  facture-core errors (this file)                                       │
//! │  ├── CoreError        - Line list and workflow rule violations         │
//! │  └── ValidationError  - Form input rejected (re-prompt, no mutation)   │
//! │                                                                         │
//! │  facture-store errors (separate crate)                                 │
//! │  └── StoreError       - JSON file read/write failures                  │
//! │                                                                         │
//! │  App errors                                                            │
//! │  ├── RenderError      - Spreadsheet could not be produced              │
//! │  └── ApiError         - What the UI shell sees                         │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ApiError → form prompt            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    /// A product line index does not exist.
    ///
    /// ## When This Occurs
    /// - Removing or editing a line after the list changed underneath the UI
    #[error("Line {index} does not exist (invoice has {len} lines)")]
    IndexOutOfRange { index: usize, len: usize },

    /// The workflow cannot perform the requested action in its current stage.
    ///
    /// ## When This Occurs
    /// - Adding a product while the client form is shown
    /// - Any command after the invoice was finalized
    #[error("Cannot {action} while {stage}")]
    InvalidTransition { stage: String, action: String },

    /// The invoice already holds the maximum number of lines.
    #[error("An invoice cannot have more than {max} lines")]
    TooManyLines { max: usize },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised on form text before any state changes. The UI clears the offending
/// field and prompts again.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// The quantity field is not a positive whole number.
    #[error("Invalid quantity '{input}': {reason}")]
    InvalidQuantity { input: String, reason: String },

    /// The price field is not a non-negative decimal number.
    #[error("Invalid price '{input}': {reason}")]
    InvalidPrice { input: String, reason: String },

    /// A required field is missing or blank.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },
}

impl ValidationError {
    pub(crate) fn quantity(input: &str, reason: &str) -> Self {
        ValidationError::InvalidQuantity {
            input: input.to_string(),
            reason: reason.to_string(),
        }
    }

    pub(crate) fn price(input: &str, reason: &str) -> Self {
        ValidationError::InvalidPrice {
            input: input.to_string(),
            reason: reason.to_string(),
        }
    }

    pub(crate) fn required(field: &str) -> Self {
        ValidationError::Required {
            field: field.to_string(),
        }
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::IndexOutOfRange { index: 4, len: 2 };
        assert_eq!(err.to_string(), "Line 4 does not exist (invoice has 2 lines)");

        let err = CoreError::InvalidTransition {
            stage: "finalized".to_string(),
            action: "add a product".to_string(),
        };
        assert_eq!(err.to_string(), "Cannot add a product while finalized");

        let err = CoreError::TooManyLines { max: 500 };
        assert_eq!(err.to_string(), "An invoice cannot have more than 500 lines");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::quantity("abc", "must be a whole number");
        assert_eq!(err.to_string(), "Invalid quantity 'abc': must be a whole number");

        let err = ValidationError::required("name");
        assert_eq!(err.to_string(), "name is required");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let core_err: CoreError = ValidationError::required("name").into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
