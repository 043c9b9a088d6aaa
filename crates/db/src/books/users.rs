//! User lookup, listing and first-login provisioning.

use massikone_core::auth::{Caller, UserListing, UserRole, user_listing};
use massikone_shared::types::UserId;
use massikone_shared::{AppError, AppResult};
use sea_orm::{ConnectionTrait, DatabaseConnection, TransactionTrait};
use sha2::{Digest, Sha256};
use tracing::info;

use super::{BookContext, log_failure, storage};
use crate::entities::users;
use crate::repositories::UserRepository;

fn caller_from(user: users::Model) -> Caller {
    Caller::new(
        UserId(user.user_id),
        user.full_name,
        UserRole::from_is_admin(user.is_admin),
    )
}

/// Hex SHA-256 of the provider name followed by the provider's user ID.
#[must_use]
pub fn hash_auth_user_id(auth_provider: &str, auth_user_id: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(auth_provider.as_bytes());
    hasher.update(auth_user_id.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Resolves a stored user into a caller.
pub(super) async fn load_caller<C: ConnectionTrait>(db: &C, user_id: UserId) -> AppResult<Caller> {
    UserRepository::new(db)
        .find_by_id(user_id)
        .await
        .map_err(storage)?
        .map(caller_from)
        .ok_or_else(|| AppError::Unauthorized(format!("Unknown user {user_id}")))
}

/// Returns the user behind an external login, creating it on first login.
///
/// The very first user of the book becomes an admin. Returning users get
/// their full name refreshed.
///
/// # Errors
///
/// Returns a database error if any lookup or write fails; nothing is
/// written in that case.
pub async fn get_or_put_user(
    db: &DatabaseConnection,
    auth_provider: &str,
    auth_user_id: &str,
    full_name: &str,
) -> AppResult<Caller> {
    provision_user(db, auth_provider, auth_user_id, full_name)
        .await
        .inspect_err(log_failure)
}

async fn provision_user(
    db: &DatabaseConnection,
    auth_provider: &str,
    auth_user_id: &str,
    full_name: &str,
) -> AppResult<Caller> {
    let txn = db.begin().await.map_err(storage)?;
    let repo = UserRepository::new(&txn);
    let hashed = hash_auth_user_id(auth_provider, auth_user_id);

    let user = match repo.find_by_auth(auth_provider, &hashed).await.map_err(storage)? {
        Some(user_id) => repo
            .update_full_name(user_id, full_name)
            .await
            .map_err(storage)?,
        None => {
            let is_admin = repo.count().await.map_err(storage)? == 0;
            let user = repo.create(full_name, is_admin).await.map_err(storage)?;
            repo.link_auth(UserId(user.user_id), auth_provider, &hashed)
                .await
                .map_err(storage)?;
            info!(user_id = user.user_id, admin = is_admin, provider = auth_provider, "Created user");
            user
        }
    };

    txn.commit().await.map_err(storage)?;
    Ok(caller_from(user))
}

async fn user_list<C: ConnectionTrait>(
    db: &C,
    caller: &Caller,
    match_user_id: Option<UserId>,
) -> AppResult<Vec<UserListing>> {
    caller.require_admin()?;
    let rows = UserRepository::new(db).list().await.map_err(storage)?;
    Ok(user_listing(
        rows.into_iter().map(|u| {
            (
                UserId(u.user_id),
                u.full_name,
                UserRole::from_is_admin(u.is_admin),
            )
        }),
        match_user_id,
    ))
}

impl BookContext {
    /// Admin only: every user sorted by name, flagging `match_user_id`.
    pub async fn get_users(&mut self, match_user_id: Option<UserId>) -> AppResult<Vec<UserListing>> {
        self.ensure_usable()?;
        let result = user_list(&self.txn, &self.caller, match_user_id).await;
        self.absorb(result)
    }
}
