//! Admin/owner authorization gate shared by every operation.

use massikone_shared::AppError;
use massikone_shared::types::UserId;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::UserRole;

/// Authorization failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccessError {
    /// The operation requires the admin role.
    #[error("admin role required")]
    AdminRequired,

    /// The record belongs to another user.
    #[error("record belongs to another user")]
    NotOwner,
}

impl From<AccessError> for AppError {
    fn from(err: AccessError) -> Self {
        Self::Forbidden(err.to_string())
    }
}

/// The authenticated caller of a unit of work.
///
/// Resolved by the authentication layer before any bookkeeping operation runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Caller {
    /// The caller's user ID.
    pub user_id: UserId,
    /// Display name.
    pub full_name: String,
    /// The caller's role.
    pub role: UserRole,
}

impl Caller {
    /// Creates a caller.
    #[must_use]
    pub fn new(user_id: UserId, full_name: impl Into<String>, role: UserRole) -> Self {
        Self {
            user_id,
            full_name: full_name.into(),
            role,
        }
    }

    /// Returns true if the caller is an admin.
    #[must_use]
    pub const fn is_admin(&self) -> bool {
        self.role.is_admin()
    }

    /// Succeeds only for admins.
    pub fn require_admin(&self) -> Result<(), AccessError> {
        if self.is_admin() {
            Ok(())
        } else {
            Err(AccessError::AdminRequired)
        }
    }

    /// Succeeds for admins and for the owner of the record.
    ///
    /// A record without an owner is reachable by admins only.
    pub fn require_admin_or_user(&self, owner: Option<UserId>) -> Result<(), AccessError> {
        if self.is_admin() || owner == Some(self.user_id) {
            Ok(())
        } else {
            Err(AccessError::NotOwner)
        }
    }

    /// The payer filter for scoped document queries: `None` means unrestricted.
    #[must_use]
    pub const fn document_scope(&self) -> Option<UserId> {
        if self.is_admin() {
            None
        } else {
            Some(self.user_id)
        }
    }
}
