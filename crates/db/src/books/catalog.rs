//! Chart of accounts operations.

use massikone_core::accounts::{AccountListing, AccountMap, ChartOfAccounts};
use massikone_shared::AppResult;
use massikone_shared::types::AccountId;
use sea_orm::ConnectionTrait;

use super::{BookContext, storage};
use crate::repositories::{AccountRepository, account_from_model};

/// Loads the chart tree.
pub(super) async fn load_chart<C: ConnectionTrait>(db: &C) -> AppResult<ChartOfAccounts> {
    let rows = AccountRepository::new(db).list().await.map_err(storage)?;
    let accounts = rows
        .into_iter()
        .map(account_from_model)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(ChartOfAccounts::from_accounts(accounts)?)
}

async fn account_list<C: ConnectionTrait>(
    db: &C,
    used_only: bool,
    match_account_id: Option<AccountId>,
) -> AppResult<Vec<AccountListing>> {
    let chart = load_chart(db).await?;
    let used = if used_only {
        Some(
            AccountRepository::new(db)
                .used_account_ids()
                .await
                .map_err(storage)?,
        )
    } else {
        None
    };
    Ok(chart.listing(used.as_ref(), match_account_id))
}

impl BookContext {
    /// Lists the chart of accounts, headings included.
    ///
    /// With `used_only`, accounts without entries are hidden along with
    /// headings left empty. `match_account_id` flags the matching leaf.
    pub async fn get_account_list(
        &mut self,
        used_only: bool,
        match_account_id: Option<AccountId>,
    ) -> AppResult<Vec<AccountListing>> {
        self.ensure_usable()?;
        let result = account_list(&self.txn, used_only, match_account_id).await;
        self.absorb(result)
    }

    /// Postable accounts keyed by code.
    pub async fn get_account_map(&mut self) -> AppResult<AccountMap> {
        self.ensure_usable()?;
        let result = load_chart(&self.txn).await.map(|c| c.account_map());
        self.absorb(result)
    }
}
