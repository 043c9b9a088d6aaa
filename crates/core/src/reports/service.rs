//! Report generation service.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use massikone_shared::types::{AccountId, DocumentId, amount_from_cents};

use super::types::{
    Journal, JournalDocument, Ledger, LedgerAccount, LedgerEntry, Statement, StatementBalance,
    StatementLine,
};
use crate::accounts::AccountMap;
use crate::ledger::{
    DocumentEntry, EntryTotals, LedgerError, RunningBalance, account_balances_and_profit,
    account_range_balance, account_type_of, balance_change,
};

/// Service for generating the journal, the ledger and statements.
pub struct ReportService;

/// An entry waiting for its running balance.
struct Posting<'a> {
    paid_date: Option<NaiveDate>,
    document_id: DocumentId,
    entry: &'a DocumentEntry,
}

impl ReportService {
    /// Generates the journal from documents in ID order.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::AmountOverflow`] if the totals overflow.
    pub fn generate_journal(documents: Vec<JournalDocument>) -> Result<Journal, LedgerError> {
        let totals = EntryTotals::from_entries(documents.iter().flat_map(|d| &d.entries))?;
        Ok(Journal {
            documents,
            total_debit_cents: totals.debit_cents,
            total_credit_cents: totals.credit_cents,
        })
    }

    /// Generates the ledger: entries bucketed by account, ordered by
    /// `(paid_date, document_id)`, with running balances.
    ///
    /// The sort is stable, so entries of one document keep their row order.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::AmountOverflow`] if a total or a running
    /// balance overflows.
    pub fn generate_ledger(
        accounts: &AccountMap,
        documents: &[JournalDocument],
    ) -> Result<Ledger, LedgerError> {
        let mut totals = EntryTotals::default();
        let mut buckets: BTreeMap<AccountId, Vec<Posting<'_>>> = BTreeMap::new();
        for document in documents {
            for entry in &document.entries {
                totals.add(entry)?;
                buckets.entry(entry.account_id).or_default().push(Posting {
                    paid_date: document.summary.paid_date,
                    document_id: document.summary.document_id,
                    entry,
                });
            }
        }

        let accounts = buckets
            .into_iter()
            .map(|(account_id, mut postings)| {
                postings.sort_by_key(|p| (p.paid_date, p.document_id));
                Self::ledger_account(accounts, account_id, &postings)
            })
            .collect::<Result<_, _>>()?;

        Ok(Ledger {
            accounts,
            total_debit_cents: totals.debit_cents,
            total_credit_cents: totals.credit_cents,
        })
    }

    fn ledger_account(
        accounts: &AccountMap,
        account_id: AccountId,
        postings: &[Posting<'_>],
    ) -> Result<LedgerAccount, LedgerError> {
        let account_type = account_type_of(accounts, account_id);
        let mut running: Option<RunningBalance> = None;
        let mut entries = Vec::with_capacity(postings.len());
        for posting in postings {
            let entry = posting.entry;
            let balance =
                RunningBalance::chain(running.as_ref(), balance_change(entry, account_type)?)?;
            let amount = amount_from_cents(entry.cents()?);
            let (debit_amount, credit_amount) = if entry.is_debit {
                (amount, String::new())
            } else {
                (String::new(), amount)
            };
            entries.push(LedgerEntry {
                document_id: posting.document_id,
                paid_date: posting.paid_date,
                description: entry.description.clone(),
                debit_amount,
                credit_amount,
                balance_after: amount_from_cents(balance.current_cents),
                balance_after_cents: balance.current_cents,
            });
            running = Some(balance);
        }
        Ok(LedgerAccount {
            account_id,
            account_title: accounts
                .get(&account_id)
                .map(|a| a.title.clone())
                .unwrap_or_default(),
            current_balance_cents: running.map_or(0, |r| r.current_cents),
            entries,
        })
    }

    /// Generates a statement: each line sums the balances in its ranges.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::AmountOverflow`] if a balance or a line sum
    /// overflows.
    pub fn generate_statement(
        accounts: &AccountMap,
        entries: &[DocumentEntry],
        lines: &[StatementLine],
    ) -> Result<Statement, LedgerError> {
        let (balances, profit_cents) = account_balances_and_profit(accounts, entries)?;
        let lines = lines
            .iter()
            .map(|line| {
                let cents = account_range_balance(accounts, &balances, &line.ranges)?;
                Ok(StatementBalance {
                    title: line.title.clone(),
                    cents,
                    amount: amount_from_cents(cents),
                })
            })
            .collect::<Result<_, LedgerError>>()?;
        Ok(Statement {
            lines,
            profit_cents,
        })
    }
}
