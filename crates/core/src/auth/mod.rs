//! Caller identity and access scoping.
//!
//! This module provides:
//! - User role definitions
//! - The authenticated caller of a unit of work
//! - Admin and admin-or-owner authorization checks
//! - The user listing view

mod access;

pub use access::{AccessError, Caller};

use massikone_shared::types::UserId;
use serde::{Deserialize, Serialize};

/// User roles within the organization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    /// Unrestricted access to every document and report.
    Admin,
    /// Restricted to documents the user personally paid.
    Normal,
}

impl UserRole {
    /// Maps the stored `is_admin` flag to a role.
    #[must_use]
    pub const fn from_is_admin(is_admin: bool) -> Self {
        if is_admin { Self::Admin } else { Self::Normal }
    }

    /// Returns true if this role may read and write every document.
    #[must_use]
    pub const fn is_admin(&self) -> bool {
        matches!(self, Self::Admin)
    }
}

/// One line of the user listing view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserListing {
    /// User ID.
    pub user_id: UserId,
    /// Display name.
    pub full_name: String,
    /// The user's role.
    pub role: UserRole,
    /// True for the user matching the requested ID.
    pub is_match: bool,
}

/// Builds the user listing, sorted case-insensitively by full name.
///
/// The sort is stable, so users with equal names keep their input order.
#[must_use]
pub fn user_listing(
    users: impl IntoIterator<Item = (UserId, String, UserRole)>,
    match_user_id: Option<UserId>,
) -> Vec<UserListing> {
    let mut listing: Vec<UserListing> = users
        .into_iter()
        .map(|(user_id, full_name, role)| UserListing {
            is_match: match_user_id == Some(user_id),
            user_id,
            full_name,
            role,
        })
        .collect();
    listing.sort_by_cached_key(|u| u.full_name.to_lowercase());
    listing
}
