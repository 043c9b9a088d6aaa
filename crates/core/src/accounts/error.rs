//! Chart of accounts error types.

use massikone_shared::AppError;
use massikone_shared::types::AccountId;
use thiserror::Error;

/// Errors raised while building the chart of accounts from stored rows.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChartError {
    /// The stored account type code is not one of the known codes.
    #[error("Unknown account type code {code} for account {account_id}")]
    UnknownAccountType {
        /// The offending account.
        account_id: AccountId,
        /// The stored code.
        code: i32,
    },

    /// The nesting level is outside `0..=9`.
    #[error("Invalid nesting level {level} for account {account_id}")]
    InvalidNestingLevel {
        /// The offending account.
        account_id: AccountId,
        /// The stored level.
        level: i32,
    },
}

impl ChartError {
    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownAccountType { .. } => "UNKNOWN_ACCOUNT_TYPE",
            Self::InvalidNestingLevel { .. } => "INVALID_NESTING_LEVEL",
        }
    }
}

impl From<ChartError> for AppError {
    fn from(err: ChartError) -> Self {
        Self::Validation(err.to_string())
    }
}
