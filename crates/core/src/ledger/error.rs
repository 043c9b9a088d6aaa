//! Ledger error types for validation and caller-contract errors.

use massikone_shared::AppError;
use massikone_shared::types::{AmountError, DocumentId};
use thiserror::Error;

/// Errors that can occur while validating document writes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    // ========== Validation Errors ==========
    /// The document ID is not a positive integer.
    #[error("Invalid document ID: {0:?}")]
    InvalidDocumentId(String),

    /// The amount text could not be parsed.
    #[error(transparent)]
    InvalidAmount(#[from] AmountError),

    /// A line total or a sum of amounts does not fit in 64 bits of cents.
    #[error("Amount overflow: total exceeds the supported range")]
    AmountOverflow,

    // ========== Lookup Errors ==========
    /// No document with this ID exists.
    #[error("Document not found: {0}")]
    DocumentNotFound(DocumentId),

    // ========== Contract Violations ==========
    /// Entry row numbers must equal their position.
    #[error("Row number mismatch: expected {expected}, got {actual}")]
    RowNumberMismatch {
        /// The position of the entry.
        expected: i32,
        /// The row number it carried.
        actual: i32,
    },

    /// Only admins may set the payer of a document.
    #[error("Non-admin caller supplied a payer")]
    PayerFromNonAdmin,

    /// Only admins may supply itemized entries.
    #[error("Non-admin caller supplied document entries")]
    EntriesFromNonAdmin,
}

impl LedgerError {
    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidDocumentId(_) => "INVALID_DOCUMENT_ID",
            Self::InvalidAmount(_) => "INVALID_AMOUNT",
            Self::AmountOverflow => "AMOUNT_OVERFLOW",
            Self::DocumentNotFound(_) => "DOCUMENT_NOT_FOUND",
            Self::RowNumberMismatch { .. } => "ROW_NUMBER_MISMATCH",
            Self::PayerFromNonAdmin => "PAYER_FROM_NON_ADMIN",
            Self::EntriesFromNonAdmin => "ENTRIES_FROM_NON_ADMIN",
        }
    }
}

impl From<LedgerError> for AppError {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::InvalidDocumentId(_)
            | LedgerError::InvalidAmount(_)
            | LedgerError::AmountOverflow => Self::Validation(err.to_string()),
            LedgerError::DocumentNotFound(_) => Self::NotFound(err.to_string()),
            LedgerError::RowNumberMismatch { .. }
            | LedgerError::PayerFromNonAdmin
            | LedgerError::EntriesFromNonAdmin => Self::ContractViolation(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(
            LedgerError::InvalidDocumentId("x".into()).error_code(),
            "INVALID_DOCUMENT_ID"
        );
        assert_eq!(
            LedgerError::RowNumberMismatch {
                expected: 0,
                actual: 1
            }
            .error_code(),
            "ROW_NUMBER_MISMATCH"
        );
    }

    #[test]
    fn test_app_error_mapping() {
        let app: AppError = LedgerError::InvalidAmount(AmountError::Invalid("1.5".into())).into();
        assert_eq!(app.status_code(), 400);
        assert!(!app.is_fatal());

        let app: AppError = LedgerError::AmountOverflow.into();
        assert_eq!(app.status_code(), 400);
        assert_eq!(app.error_code(), "VALIDATION_ERROR");

        let app: AppError = LedgerError::DocumentNotFound(DocumentId(9)).into();
        assert_eq!(app, AppError::NotFound("Document not found: 9".into()));

        let app: AppError = LedgerError::PayerFromNonAdmin.into();
        assert!(app.is_fatal());
        assert_eq!(app.error_code(), "CONTRACT_VIOLATION");
    }
}
