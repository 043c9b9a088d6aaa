//! Account balance calculations.
//!
//! Sign convention per account type:
//! - Asset/Expense: a credit subtracts from the balance
//! - Liability/Equity/Revenue/PastProfit/Profit: a debit subtracts
//!
//! Profit is revenue minus expenses over the same entry stream.

use std::collections::BTreeMap;

use massikone_shared::types::AccountId;
use serde::{Deserialize, Serialize};

use crate::accounts::{AccountMap, AccountRange, AccountType, account_in_ranges};

use super::entry::{DocumentEntry, add_cents, negate_cents};
use super::error::LedgerError;

/// Signed balance per account, in cents.
pub type AccountBalances = BTreeMap<AccountId, i64>;

/// Returns true if an entry on the given side reduces the account balance.
#[must_use]
pub const fn entry_subtracts_from_balance(is_debit: bool, account_type: AccountType) -> bool {
    if account_type.is_debit_normal() {
        !is_debit
    } else {
        is_debit
    }
}

/// The type of `id`, defaulting to Asset for accounts missing from the map.
#[must_use]
pub fn account_type_of(accounts: &AccountMap, id: AccountId) -> AccountType {
    accounts
        .get(&id)
        .map(|a| a.account_type)
        .unwrap_or_default()
}

/// The balance change an entry causes on its account.
///
/// # Errors
///
/// Returns [`LedgerError::AmountOverflow`] if the line total overflows.
pub fn balance_change(entry: &DocumentEntry, account_type: AccountType) -> Result<i64, LedgerError> {
    let cents = entry.cents()?;
    if entry_subtracts_from_balance(entry.is_debit, account_type) {
        negate_cents(cents)
    } else {
        Ok(cents)
    }
}

/// Computes every account's balance and the profit in one pass.
///
/// # Errors
///
/// Returns [`LedgerError::AmountOverflow`] if a balance or the profit leaves
/// the 64-bit range.
pub fn account_balances_and_profit(
    accounts: &AccountMap,
    entries: &[DocumentEntry],
) -> Result<(AccountBalances, i64), LedgerError> {
    let mut balances = AccountBalances::new();
    let mut profit_cents = 0i64;
    for entry in entries {
        let account_type = account_type_of(accounts, entry.account_id);
        let balance = balances.entry(entry.account_id).or_default();
        *balance = add_cents(*balance, balance_change(entry, account_type)?)?;
        profit_cents = match account_type {
            AccountType::Expense => add_cents(profit_cents, negate_cents(entry.cents()?)?)?,
            AccountType::Revenue => add_cents(profit_cents, entry.cents()?)?,
            _ => profit_cents,
        };
    }
    Ok((balances, profit_cents))
}

/// Sums the balances of accounts in any of `ranges`, negating Expense accounts.
///
/// # Errors
///
/// Returns [`LedgerError::AmountOverflow`] if the sum leaves the 64-bit range.
pub fn account_range_balance(
    accounts: &AccountMap,
    balances: &AccountBalances,
    ranges: &[AccountRange],
) -> Result<i64, LedgerError> {
    balances
        .iter()
        .filter(|(id, _)| account_in_ranges(**id, ranges))
        .try_fold(0i64, |sum, (id, balance)| {
            let signed = match account_type_of(accounts, *id) {
                AccountType::Expense => negate_cents(*balance)?,
                _ => *balance,
            };
            add_cents(sum, signed)
        })
}

/// Running balance information for a ledger entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunningBalance {
    /// Number of entries applied so far (monotonically increasing).
    pub entry_count: i64,
    /// Balance before this entry.
    pub previous_cents: i64,
    /// Balance after this entry.
    pub current_cents: i64,
}

impl RunningBalance {
    /// Creates the running balance for the first entry on an account.
    #[must_use]
    pub const fn first_entry(change: i64) -> Self {
        Self {
            entry_count: 1,
            previous_cents: 0,
            current_cents: change,
        }
    }

    /// Chains the running balance of the next entry.
    ///
    /// - `current[N] = previous[N] + change`
    /// - `previous[N] = current[N-1]`
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::AmountOverflow`] if the new balance overflows.
    pub fn next_entry(previous: &Self, change: i64) -> Result<Self, LedgerError> {
        Ok(Self {
            entry_count: previous.entry_count + 1,
            previous_cents: previous.current_cents,
            current_cents: add_cents(previous.current_cents, change)?,
        })
    }

    /// Applies `change` to an optional previous balance.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::AmountOverflow`] if the new balance overflows.
    pub fn chain(previous: Option<&Self>, change: i64) -> Result<Self, LedgerError> {
        match previous {
            Some(previous) => Self::next_entry(previous, change),
            None => Ok(Self::first_entry(change)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::accounts::Account;
    use rstest::rstest;

    fn entry(account: i32, is_debit: bool, cents: i64) -> DocumentEntry {
        DocumentEntry {
            row_number: 0,
            account_id: AccountId(account),
            is_debit,
            unit_count: 1,
            unit_cost_cents: cents,
            description: String::new(),
        }
    }

    fn accounts() -> AccountMap {
        [
            Account::leaf(AccountId(1910), AccountType::Asset, "Bank"),
            Account::leaf(AccountId(2870), AccountType::Liability, "Payables"),
            Account::leaf(AccountId(3000), AccountType::Revenue, "Sales"),
            Account::leaf(AccountId(4000), AccountType::Expense, "Purchases"),
        ]
        .into_iter()
        .map(|a| (a.id, a))
        .collect()
    }

    #[rstest]
    #[case(true, AccountType::Asset, false)]
    #[case(false, AccountType::Asset, true)]
    #[case(true, AccountType::Expense, false)]
    #[case(false, AccountType::Expense, true)]
    #[case(true, AccountType::Liability, true)]
    #[case(false, AccountType::Liability, false)]
    #[case(true, AccountType::Equity, true)]
    #[case(true, AccountType::Revenue, true)]
    #[case(false, AccountType::Revenue, false)]
    #[case(true, AccountType::PastProfit, true)]
    #[case(true, AccountType::Profit, true)]
    fn test_entry_subtracts_from_balance(
        #[case] is_debit: bool,
        #[case] account_type: AccountType,
        #[case] expected: bool,
    ) {
        assert_eq!(entry_subtracts_from_balance(is_debit, account_type), expected);
    }

    #[test]
    fn test_credit_asset_debit_expense() {
        let entries = vec![entry(1910, false, 10_000), entry(4000, true, 10_000)];
        let (balances, profit) = account_balances_and_profit(&accounts(), &entries).unwrap();
        assert_eq!(balances[&AccountId(1910)], -10_000);
        assert_eq!(balances[&AccountId(4000)], 10_000);
        assert_eq!(profit, -10_000);
    }

    #[test]
    fn test_revenue_increases_profit() {
        let entries = vec![entry(1910, true, 5_000), entry(3000, false, 5_000)];
        let (balances, profit) = account_balances_and_profit(&accounts(), &entries).unwrap();
        assert_eq!(balances[&AccountId(1910)], 5_000);
        assert_eq!(balances[&AccountId(3000)], 5_000);
        assert_eq!(profit, 5_000);
    }

    #[test]
    fn test_unknown_account_is_asset() {
        let entries = vec![entry(9999, false, 700)];
        let (balances, profit) = account_balances_and_profit(&accounts(), &entries).unwrap();
        assert_eq!(balances[&AccountId(9999)], -700);
        assert_eq!(profit, 0);
    }

    #[test]
    fn test_range_balance_negates_expenses() {
        let entries = vec![
            entry(1910, false, 10_000),
            entry(4000, true, 10_000),
            entry(1910, true, 4_000),
            entry(3000, false, 4_000),
        ];
        let accounts = accounts();
        let (balances, _) = account_balances_and_profit(&accounts, &entries).unwrap();
        let income = [AccountRange::new(3000, 4999)];
        assert_eq!(account_range_balance(&accounts, &balances, &income), Ok(4_000 - 10_000));
        let assets = [AccountRange::new(1000, 1999)];
        assert_eq!(account_range_balance(&accounts, &balances, &assets), Ok(-6_000));
        assert_eq!(account_range_balance(&accounts, &balances, &[]), Ok(0));
    }

    #[test]
    fn test_running_balance_chain() {
        let first = RunningBalance::first_entry(500);
        let second = RunningBalance::next_entry(&first, -200).unwrap();
        assert_eq!(second.entry_count, 2);
        assert_eq!(second.previous_cents, 500);
        assert_eq!(second.current_cents, 300);
        assert_eq!(RunningBalance::chain(None, 7), Ok(RunningBalance::first_entry(7)));
        assert_eq!(
            RunningBalance::next_entry(&RunningBalance::first_entry(i64::MAX), 1),
            Err(LedgerError::AmountOverflow)
        );
    }

    #[test]
    fn test_book_wide_overflow_is_an_error() {
        // Each line fits on its own; their sum on one account does not.
        let half = i64::MAX / 2 + 1;
        let entries = vec![entry(4000, true, half), entry(4000, true, half)];
        assert_eq!(
            account_balances_and_profit(&accounts(), &entries),
            Err(LedgerError::AmountOverflow)
        );

        let mut balances = AccountBalances::new();
        balances.insert(AccountId(4000), i64::MIN);
        let all = [AccountRange::new(0, 9999)];
        assert_eq!(
            account_range_balance(&accounts(), &balances, &all),
            Err(LedgerError::AmountOverflow)
        );
    }
}
