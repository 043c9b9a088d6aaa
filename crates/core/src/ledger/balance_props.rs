//! Property-based tests for the balance engine.

use massikone_shared::types::AccountId;
use proptest::prelude::*;

use super::balance::{
    RunningBalance, account_balances_and_profit, account_type_of, balance_change,
};
use super::entry::{DocumentEntry, EntryTotals};
use crate::accounts::{Account, AccountMap, AccountType};

const ACCOUNT_TYPES: [AccountType; 7] = [
    AccountType::Asset,
    AccountType::Liability,
    AccountType::Equity,
    AccountType::Revenue,
    AccountType::Expense,
    AccountType::PastProfit,
    AccountType::Profit,
];

/// One leaf account per type, coded 1000, 2000, ..., 7000.
fn chart() -> AccountMap {
    ACCOUNT_TYPES
        .iter()
        .zip(1..)
        .map(|(t, i)| Account::leaf(AccountId(i * 1000), *t, format!("{t:?}")))
        .map(|a| (a.id, a))
        .collect()
}

fn entry_strategy() -> impl Strategy<Value = DocumentEntry> {
    (1i32..=8, any::<bool>(), 1i64..=5, 0i64..1_000_000).prop_map(
        |(account, is_debit, unit_count, unit_cost_cents)| DocumentEntry {
            row_number: 0,
            account_id: AccountId(account * 1000),
            is_debit,
            unit_count,
            unit_cost_cents,
            description: String::new(),
        },
    )
}

/// Balanced pairs: each amount is debited to one account and credited to another.
fn balanced_entries_strategy() -> impl Strategy<Value = Vec<DocumentEntry>> {
    prop::collection::vec((1i32..=7, 1i32..=7, 1i64..1_000_000), 1..30).prop_map(|pairs| {
        pairs
            .into_iter()
            .flat_map(|(debit, credit, cents)| {
                [(debit, true), (credit, false)].map(|(account, is_debit)| DocumentEntry {
                    row_number: 0,
                    account_id: AccountId(account * 1000),
                    is_debit,
                    unit_count: 1,
                    unit_cost_cents: cents,
                    description: String::new(),
                })
            })
            .collect()
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Debit-normal balances minus credit-normal balances equal debits minus credits.
    #[test]
    fn prop_balances_reflect_debit_credit_difference(
        entries in prop::collection::vec(entry_strategy(), 0..40),
    ) {
        let accounts = chart();
        let (balances, _) = account_balances_and_profit(&accounts, &entries).unwrap();
        let net: i64 = balances
            .iter()
            .map(|(id, b)| if account_type_of(&accounts, *id).is_debit_normal() { *b } else { -b })
            .sum();
        let totals = EntryTotals::from_entries(&entries).unwrap();
        prop_assert_eq!(net, totals.debit_cents - totals.credit_cents);
    }

    /// For balanced entry sets the signed balances cancel out.
    #[test]
    fn prop_balanced_entries_net_to_zero(entries in balanced_entries_strategy()) {
        let accounts = chart();
        let (balances, _) = account_balances_and_profit(&accounts, &entries).unwrap();
        let net: i64 = balances
            .iter()
            .map(|(id, b)| if account_type_of(&accounts, *id).is_debit_normal() { *b } else { -b })
            .sum();
        prop_assert!(EntryTotals::from_entries(&entries).unwrap().is_balanced());
        prop_assert_eq!(net, 0);
    }

    /// Profit is revenue entry cents minus expense entry cents.
    #[test]
    fn prop_profit_is_revenue_minus_expense(
        entries in prop::collection::vec(entry_strategy(), 0..40),
    ) {
        let accounts = chart();
        let (_, profit) = account_balances_and_profit(&accounts, &entries).unwrap();
        let sum_of = |t: AccountType| -> i64 {
            entries
                .iter()
                .filter(|e| account_type_of(&accounts, e.account_id) == t)
                .map(|e| e.cents().unwrap())
                .sum()
        };
        prop_assert_eq!(profit, sum_of(AccountType::Revenue) - sum_of(AccountType::Expense));
    }

    /// Chaining running balances over an account's entries ends at its balance.
    #[test]
    fn prop_running_balance_ends_at_account_balance(
        entries in prop::collection::vec(entry_strategy(), 1..40),
    ) {
        let accounts = chart();
        let (balances, _) = account_balances_and_profit(&accounts, &entries).unwrap();
        for (id, balance) in &balances {
            let account_type = account_type_of(&accounts, *id);
            let mut running: Option<RunningBalance> = None;
            for e in entries.iter().filter(|e| e.account_id == *id) {
                let change = balance_change(e, account_type).unwrap();
                let next = RunningBalance::chain(running.as_ref(), change).unwrap();
                if let Some(prev) = &running {
                    prop_assert_eq!(next.previous_cents, prev.current_cents);
                    prop_assert_eq!(next.entry_count, prev.entry_count + 1);
                }
                running = Some(next);
            }
            prop_assert_eq!(running.map(|r| r.current_cents), Some(*balance));
        }
    }
}
