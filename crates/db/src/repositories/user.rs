//! User repository for database operations.

use massikone_shared::types::UserId;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set, Unchanged,
};

use crate::entities::{user_auth, users};

/// User repository over any connection or transaction.
#[derive(Debug, Clone, Copy)]
pub struct UserRepository<'a, C> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> UserRepository<'a, C> {
    /// Creates a new user repository.
    #[must_use]
    pub const fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Finds a user by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_id(&self, user_id: UserId) -> Result<Option<users::Model>, DbErr> {
        users::Entity::find_by_id(user_id.0).one(self.db).await
    }

    /// Lists every user in ID order.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(&self) -> Result<Vec<users::Model>, DbErr> {
        users::Entity::find()
            .order_by_asc(users::Column::UserId)
            .all(self.db)
            .await
    }

    /// Counts registered users.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn count(&self) -> Result<u64, DbErr> {
        users::Entity::find().count(self.db).await
    }

    /// Creates a user with the next free ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database insert fails.
    pub async fn create(&self, full_name: &str, is_admin: bool) -> Result<users::Model, DbErr> {
        let last = users::Entity::find()
            .order_by_desc(users::Column::UserId)
            .one(self.db)
            .await?;
        users::ActiveModel {
            user_id: Set(last.map_or(1, |u| u.user_id + 1)),
            full_name: Set(full_name.to_string()),
            is_admin: Set(is_admin),
        }
        .insert(self.db)
        .await
    }

    /// Updates a user's display name.
    ///
    /// # Errors
    ///
    /// Returns an error if the database update fails.
    pub async fn update_full_name(
        &self,
        user_id: UserId,
        full_name: &str,
    ) -> Result<users::Model, DbErr> {
        users::ActiveModel {
            user_id: Unchanged(user_id.0),
            full_name: Set(full_name.to_string()),
            ..Default::default()
        }
        .update(self.db)
        .await
    }

    /// Finds the user linked to a hashed external login.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_auth(
        &self,
        auth_provider: &str,
        auth_user_id: &str,
    ) -> Result<Option<UserId>, DbErr> {
        let link = user_auth::Entity::find()
            .filter(user_auth::Column::AuthProvider.eq(auth_provider))
            .filter(user_auth::Column::AuthUserId.eq(auth_user_id))
            .one(self.db)
            .await?;
        Ok(link.map(|l| UserId(l.user_id)))
    }

    /// Links a hashed external login to a user.
    ///
    /// # Errors
    ///
    /// Returns an error if the database insert fails.
    pub async fn link_auth(
        &self,
        user_id: UserId,
        auth_provider: &str,
        auth_user_id: &str,
    ) -> Result<user_auth::Model, DbErr> {
        user_auth::ActiveModel {
            auth_provider: Set(auth_provider.to_string()),
            auth_user_id: Set(auth_user_id.to_string()),
            user_id: Set(user_id.0),
        }
        .insert(self.db)
        .await
    }
}
