//! Journal, ledger, balance and statement operations. Admin only.

use massikone_core::accounts::AccountRange;
use massikone_core::auth::Caller;
use massikone_core::ledger::{AccountBalances, account_balances_and_profit, account_range_balance};
use massikone_core::reports::{Journal, Ledger, ReportService, Statement, StatementLine};
use massikone_shared::AppResult;
use sea_orm::ConnectionTrait;

use super::BookContext;
use super::catalog::load_chart;
use super::documents::{all_entries, journal_documents};

async fn journal<C: ConnectionTrait>(db: &C, caller: &Caller) -> AppResult<Journal> {
    caller.require_admin()?;
    Ok(ReportService::generate_journal(journal_documents(db).await?)?)
}

async fn ledger<C: ConnectionTrait>(db: &C, caller: &Caller) -> AppResult<Ledger> {
    caller.require_admin()?;
    let accounts = load_chart(db).await?.account_map();
    let documents = journal_documents(db).await?;
    Ok(ReportService::generate_ledger(&accounts, &documents)?)
}

async fn balances_and_profit<C: ConnectionTrait>(
    db: &C,
    caller: &Caller,
) -> AppResult<(AccountBalances, i64)> {
    caller.require_admin()?;
    let accounts = load_chart(db).await?.account_map();
    let entries = all_entries(db).await?;
    Ok(account_balances_and_profit(&accounts, &entries)?)
}

async fn range_balance<C: ConnectionTrait>(
    db: &C,
    caller: &Caller,
    ranges: &[AccountRange],
) -> AppResult<i64> {
    caller.require_admin()?;
    let accounts = load_chart(db).await?.account_map();
    let entries = all_entries(db).await?;
    let (balances, _) = account_balances_and_profit(&accounts, &entries)?;
    Ok(account_range_balance(&accounts, &balances, ranges)?)
}

async fn statement<C: ConnectionTrait>(
    db: &C,
    caller: &Caller,
    lines: &[StatementLine],
) -> AppResult<Statement> {
    caller.require_admin()?;
    let accounts = load_chart(db).await?.account_map();
    let entries = all_entries(db).await?;
    Ok(ReportService::generate_statement(&accounts, &entries, lines)?)
}

impl BookContext {
    /// Documents in ID order with entries inline and debit/credit totals.
    pub async fn get_journal(&mut self) -> AppResult<Journal> {
        self.ensure_usable()?;
        let result = journal(&self.txn, &self.caller).await;
        self.absorb(result)
    }

    /// Entries grouped by account with running balances.
    pub async fn get_ledger(&mut self) -> AppResult<Ledger> {
        self.ensure_usable()?;
        let result = ledger(&self.txn, &self.caller).await;
        self.absorb(result)
    }

    /// Signed balance of every account with entries, and the profit.
    pub async fn get_account_balances_and_profit(&mut self) -> AppResult<(AccountBalances, i64)> {
        self.ensure_usable()?;
        let result = balances_and_profit(&self.txn, &self.caller).await;
        self.absorb(result)
    }

    /// Sum of the balances in any of `ranges`, expenses negated.
    pub async fn get_account_range_balance(&mut self, ranges: &[AccountRange]) -> AppResult<i64> {
        self.ensure_usable()?;
        let result = range_balance(&self.txn, &self.caller, ranges).await;
        self.absorb(result)
    }

    /// A statement with one balance per line.
    pub async fn get_statement(&mut self, lines: &[StatementLine]) -> AppResult<Statement> {
        self.ensure_usable()?;
        let result = statement(&self.txn, &self.caller, lines).await;
        self.absorb(result)
    }
}
