//! The transaction-scoped book context.
//!
//! One caller action opens one [`BookContext`], runs any number of
//! operations on it and closes it. The context keeps the first failure:
//! every later operation returns that same error without touching the
//! database, and [`BookContext::close`] rolls the transaction back.
//!
//! # Usage
//!
//! ```ignore
//! let mut book = BookContext::open(&db, user_id).await?;
//! let id = book.post_document(input).await?;
//! let document = book.get_document(&id.to_string()).await?;
//! book.close().await?;
//! ```

mod catalog;
mod documents;
mod reports;
mod settings;
mod users;

pub use settings::Settings;
pub use users::{get_or_put_user, hash_auth_user_id};

use massikone_core::auth::Caller;
use massikone_shared::types::UserId;
use massikone_shared::{AppError, AppResult};
use sea_orm::{DatabaseConnection, DatabaseTransaction, DbErr, TransactionTrait};
use tracing::{debug, error, warn};

/// Wraps a storage failure. Logging happens once, in [`log_failure`].
pub(crate) fn storage(err: DbErr) -> AppError {
    AppError::Database(err.to_string())
}

/// Logs a failed book operation: fatal errors loudly, refusals quietly.
pub(crate) fn log_failure(err: &AppError) {
    if err.is_fatal() {
        error!(code = err.error_code(), error = %err, "Book operation failed");
    } else {
        debug!(code = err.error_code(), error = %err, "Book operation refused");
    }
}

/// A unit of work: one caller, one transaction, one error slot.
///
/// Dropping a context without closing it rolls the transaction back.
pub struct BookContext {
    txn: DatabaseTransaction,
    caller: Caller,
    error: Option<AppError>,
}

impl BookContext {
    /// Opens a context for an already resolved caller.
    ///
    /// # Errors
    ///
    /// Returns a database error if the transaction cannot be started.
    pub async fn begin(db: &DatabaseConnection, caller: Caller) -> AppResult<Self> {
        let txn = db
            .begin()
            .await
            .map_err(storage)
            .inspect_err(log_failure)?;
        debug!(user_id = %caller.user_id, admin = caller.is_admin(), "Opened book context");
        Ok(Self {
            txn,
            caller,
            error: None,
        })
    }

    /// Opens a context for a stored user.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] for unknown users and a database
    /// error if the transaction cannot be started.
    pub async fn open(db: &DatabaseConnection, user_id: UserId) -> AppResult<Self> {
        let txn = db
            .begin()
            .await
            .map_err(storage)
            .inspect_err(log_failure)?;
        let caller = users::load_caller(&txn, user_id)
            .await
            .inspect_err(log_failure)?;
        debug!(user_id = %caller.user_id, admin = caller.is_admin(), "Opened book context");
        Ok(Self {
            txn,
            caller,
            error: None,
        })
    }

    /// The caller this context acts for.
    #[must_use]
    pub const fn caller(&self) -> &Caller {
        &self.caller
    }

    /// The stored error, if an operation has failed.
    #[must_use]
    pub const fn error(&self) -> Option<&AppError> {
        self.error.as_ref()
    }

    /// Returns true while no operation has failed.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.error.is_none()
    }

    /// Commits when no operation failed, rolls back otherwise.
    ///
    /// # Errors
    ///
    /// Returns the stored error after rolling back, or a database error if
    /// the commit fails.
    pub async fn close(self) -> AppResult<()> {
        let user_id = self.caller.user_id;
        match self.error {
            None => {
                self.txn
                    .commit()
                    .await
                    .map_err(storage)
                    .inspect_err(log_failure)?;
                debug!(user_id = %user_id, "Committed book context");
                Ok(())
            }
            Some(err) => {
                if let Err(rollback) = self.txn.rollback().await {
                    error!(error = %rollback, "Rollback failed");
                }
                warn!(user_id = %user_id, error = %err, "Rolled back book context");
                Err(err)
            }
        }
    }

    /// Fails with the stored error once an operation has failed.
    fn ensure_usable(&self) -> AppResult<()> {
        match &self.error {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }

    /// Stores the first failure and passes the result through.
    fn absorb<T>(&mut self, result: AppResult<T>) -> AppResult<T> {
        if let Err(err) = &result {
            log_failure(err);
            self.error.get_or_insert_with(|| err.clone());
        }
        result
    }
}
