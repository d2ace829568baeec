//! Error types for the payment service.

use crate::domain::Currency;

/// Fixed messages surfaced to callers.
pub mod messages {
    pub const PAYMENT_ID_REQUIRED: &str = "Payment ID is required";
    pub const PAYMENT_NOT_FOUND: &str = "Payment not found";
    pub const INVALID_CURRENCY_FORMAT: &str =
        "Invalid currency format. Currency must be a 3-letter uppercase code";
    pub const VALIDATION_FAILED: &str = "Validation failed";
    pub const INTERNAL_SERVER_ERROR: &str = "Internal server error";
}

/// Domain-level errors (rule violations found while validating input).
///
/// The `Display` text of each variant is the message reported to callers.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    #[error("Invalid input format")]
    InvalidInputFormat,

    #[error("Amount is required")]
    AmountRequired,

    #[error("Amount must be a number")]
    AmountMustBeNumber,

    #[error("Amount must be a finite number")]
    AmountMustBeFinite,

    #[error("Amount must be greater than 0")]
    AmountMustBePositive,

    #[error("Currency is required")]
    CurrencyRequired,

    #[error("Currency must be a string")]
    CurrencyMustBeString,

    #[error("Currency must be one of: {}", Currency::allowed_codes())]
    CurrencyInvalid,

    #[error("Unexpected fields: {}", .0.join(", "))]
    UnexpectedFields(Vec<String>),
}

/// Repository-level errors (data access failures).
#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    #[error("Database error: {0}")]
    Database(String),

    /// A conditional write found the key already present.
    #[error("Conflict: {0}")]
    Conflict(String),
}

/// Application-level errors (for HTTP responses).
///
/// Every variant has a message and a status code; the HTTP layer uses
/// nothing else.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{}", messages::VALIDATION_FAILED)]
    Validation { details: Vec<String> },

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{message}")]
    Internal { message: String, status_code: u16 },
}

impl AppError {
    /// An internal failure with the default 500 status.
    pub fn internal(message: impl Into<String>) -> Self {
        AppError::Internal {
            message: message.into(),
            status_code: 500,
        }
    }

    /// Builds a validation failure from the violated rules, keeping their order.
    pub fn validation(violations: &[DomainError]) -> Self {
        AppError::Validation {
            details: violations.iter().map(ToString::to_string).collect(),
        }
    }

    /// HTTP status code for this failure.
    pub fn status_code(&self) -> u16 {
        match self {
            AppError::Validation { .. } => 422,
            AppError::BadRequest(_) => 400,
            AppError::NotFound(_) => 404,
            AppError::Conflict(_) => 409,
            AppError::Internal { status_code, .. } => *status_code,
        }
    }

    /// Message for this failure.
    pub fn message(&self) -> String {
        self.to_string()
    }

    /// Individual rule violations, only present for validation failures.
    pub fn details(&self) -> Option<&[String]> {
        match self {
            AppError::Validation { details } => Some(details),
            _ => None,
        }
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::Conflict(msg) => AppError::Conflict(msg),
            RepoError::Database(msg) => AppError::internal(msg),
        }
    }
}
