//! # API Error Type
//!
//! The single error type the UI shell sees.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  ValidationError ──┐                                                    │
//! │  CoreError ────────┤                                                    │
//! │  StoreError ───────┼──► ApiError { code, message } ──► UI prompt        │
//! │  RenderError ──────┤                       │                            │
//! │  WorkflowError ────┘                       ▼                            │
//! │                              MessageId::for_error(code)                 │
//! │                              → "请输入正确数量." / "Erreur" ...          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Serialization
//! ```json
//! {
//!   "code": "INVALID_QUANTITY",
//!   "message": "Invalid quantity 'abc': must be a whole number"
//! }
//! ```

use facture_core::{CoreError, ValidationError};
use facture_store::StoreError;
use serde::Serialize;

use crate::messages::{Language, MessageId};
use crate::render::RenderError;
use crate::workflow::WorkflowError;

/// Error returned from commands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for logs and details views
    pub message: String,
}

/// Error codes for command responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// No stored client with that name
    NotFound,

    /// Quantity field rejected
    InvalidQuantity,

    /// Price field rejected
    InvalidPrice,

    /// Company name left blank
    CompanyNameRequired,

    /// Any other input validation failure
    ValidationError,

    /// Command not allowed at the current page, a stale line index, or a full invoice
    InvalidState,

    /// Reading or writing a data file failed
    PersistenceError,

    /// A data file exists but cannot be parsed
    CorruptData,

    /// The invoice file could not be produced
    RenderError,

    /// Anything else
    Internal,
}

/// Result type for commands.
pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }

    /// Localized prompt for this error.
    pub fn prompt(&self, lang: Language) -> &'static str {
        MessageId::for_error(self.code).text(lang)
    }
}

/// Converts validation errors to API errors.
impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        let code = match &err {
            ValidationError::InvalidQuantity { .. } => ErrorCode::InvalidQuantity,
            ValidationError::InvalidPrice { .. } => ErrorCode::InvalidPrice,
            ValidationError::Required { field } if field == "company name" => {
                ErrorCode::CompanyNameRequired
            }
            _ => ErrorCode::ValidationError,
        };
        ApiError::new(code, err.to_string())
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Validation(e) => ApiError::from(e),
            CoreError::IndexOutOfRange { .. }
            | CoreError::InvalidTransition { .. }
            | CoreError::TooManyLines { .. } => {
                ApiError::new(ErrorCode::InvalidState, err.to_string())
            }
        }
    }
}

/// Converts store errors to API errors.
impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { .. } => ApiError::new(ErrorCode::NotFound, err.to_string()),
            StoreError::Validation(e) => ApiError::from(e),
            StoreError::Persistence { .. } => {
                tracing::error!("Persistence failed: {}", err);
                ApiError::new(ErrorCode::PersistenceError, err.to_string())
            }
            StoreError::Corrupt { .. } => {
                tracing::error!("Corrupt data file: {}", err);
                ApiError::new(ErrorCode::CorruptData, err.to_string())
            }
        }
    }
}

/// Converts render errors to API errors.
impl From<RenderError> for ApiError {
    fn from(err: RenderError) -> Self {
        tracing::error!("Invoice rendering failed: {}", err);
        ApiError::new(ErrorCode::RenderError, err.to_string())
    }
}

impl From<WorkflowError> for ApiError {
    fn from(err: WorkflowError) -> Self {
        match err {
            WorkflowError::Core(e) => e.into(),
            WorkflowError::Store(e) => e.into(),
            WorkflowError::Render(e) => e.into(),
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_validation_codes() {
        let err = ApiError::from(ValidationError::InvalidQuantity {
            input: "abc".to_string(),
            reason: "must be a whole number".to_string(),
        });
        assert_eq!(err.code, ErrorCode::InvalidQuantity);
        assert_eq!(err.prompt(Language::Chinese), "请输入正确数量.");

        let err = ApiError::from(CoreError::Validation(ValidationError::InvalidPrice {
            input: "x".to_string(),
            reason: "not a number".to_string(),
        }));
        assert_eq!(err.code, ErrorCode::InvalidPrice);
    }

    #[test]
    fn test_store_codes() {
        let err = ApiError::from(StoreError::not_found("Acme"));
        assert_eq!(err.code, ErrorCode::NotFound);

        let err = ApiError::from(StoreError::Persistence {
            path: PathBuf::from("/data/clients.json"),
            source: std::io::Error::from(std::io::ErrorKind::PermissionDenied),
        });
        assert_eq!(err.code, ErrorCode::PersistenceError);
        assert!(err.message.contains("clients.json"));
    }

    #[test]
    fn test_transition_is_invalid_state() {
        let err = ApiError::from(CoreError::IndexOutOfRange { index: 3, len: 1 });
        assert_eq!(err.code, ErrorCode::InvalidState);

        let err = ApiError::from(CoreError::TooManyLines { max: 500 });
        assert_eq!(err.code, ErrorCode::InvalidState);
        assert!(err.message.contains("500"));
    }

    #[test]
    fn test_serialization() {
        let err = ApiError::new(ErrorCode::InvalidQuantity, "bad");
        let json = serde_json::to_string(&err).unwrap();
        assert_eq!(json, r#"{"code":"INVALID_QUANTITY","message":"bad"}"#);
    }
}
