//! Account repository for chart of accounts database operations.

use std::collections::HashSet;

use massikone_core::accounts::{Account, AccountType, ChartError};
use massikone_shared::types::AccountId;
use sea_orm::{
    ActiveModelTrait, ConnectionTrait, DbErr, EntityTrait, QueryOrder, QuerySelect, Set,
};

use crate::entities::{accounts, document_entries};

/// Converts a stored chart row into the domain account.
///
/// # Errors
///
/// Returns [`ChartError::UnknownAccountType`] for unknown type codes.
pub fn account_from_model(model: accounts::Model) -> Result<Account, ChartError> {
    let id = AccountId(model.account_id);
    Ok(Account::new(
        id,
        AccountType::from_code(id, model.account_type)?,
        model.nesting_level,
        model.title,
    ))
}

/// Account repository over any connection or transaction.
#[derive(Debug, Clone, Copy)]
pub struct AccountRepository<'a, C> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> AccountRepository<'a, C> {
    /// Creates a new account repository.
    #[must_use]
    pub const fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Lists every chart row ordered by `(account_id, nesting_level)`.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(&self) -> Result<Vec<accounts::Model>, DbErr> {
        accounts::Entity::find()
            .order_by_asc(accounts::Column::AccountId)
            .order_by_asc(accounts::Column::NestingLevel)
            .all(self.db)
            .await
    }

    /// Codes of the accounts referenced by at least one entry.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn used_account_ids(&self) -> Result<HashSet<AccountId>, DbErr> {
        let ids: Vec<i32> = document_entries::Entity::find()
            .select_only()
            .column(document_entries::Column::AccountId)
            .distinct()
            .into_tuple()
            .all(self.db)
            .await?;
        Ok(ids.into_iter().map(AccountId).collect())
    }

    /// Inserts one chart row.
    ///
    /// # Errors
    ///
    /// Returns an error if the database insert fails.
    pub async fn insert(&self, account: &Account) -> Result<accounts::Model, DbErr> {
        accounts::ActiveModel {
            account_id: Set(account.id.0),
            nesting_level: Set(account.nesting_level),
            account_type: Set(account.account_type.code()),
            title: Set(account.title.clone()),
        }
        .insert(self.db)
        .await
    }
}
