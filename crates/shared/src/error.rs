//! Application-wide error types.

use thiserror::Error;

/// Result type alias using `AppError`.
pub type AppResult<T> = Result<T, AppError>;

/// Application error types.
///
/// Errors are `Clone` so that a unit of work can keep the first failure and
/// hand the same error back to every later call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AppError {
    /// Caller is not logged in or is unknown.
    #[error("Authentication failed: {0}")]
    Unauthorized(String),

    /// Role or ownership violation.
    #[error("Access denied: {0}")]
    Forbidden(String),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Malformed input (document id, amount text, chart rows).
    #[error("Validation error: {0}")]
    Validation(String),

    /// The caller broke the API contract. Never recoverable.
    #[error("Contract violation: {0}")]
    ContractViolation(String),

    /// Storage error.
    #[error("Database error: {0}")]
    Database(String),
}

impl AppError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::Unauthorized(_) => 401,
            Self::Forbidden(_) => 403,
            Self::NotFound(_) => 404,
            Self::Validation(_) => 400,
            Self::ContractViolation(_) | Self::Database(_) => 500,
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Unauthorized(_) => "UNAUTHORIZED",
            Self::Forbidden(_) => "FORBIDDEN",
            Self::NotFound(_) => "NOT_FOUND",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::ContractViolation(_) => "CONTRACT_VIOLATION",
            Self::Database(_) => "DATABASE_ERROR",
        }
    }

    /// Returns true for programming errors that a user cannot fix by
    /// correcting their input.
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        matches!(self, Self::ContractViolation(_) | Self::Database(_))
    }
}
