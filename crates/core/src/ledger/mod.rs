//! Double-entry bookkeeping logic.
//!
//! This module implements the core ledger functionality:
//! - Document entries (debits and credits) and their totals
//! - Documents: read views and write input
//! - Balance calculations and the sign convention per account type
//! - Error types for document writes

pub mod balance;
pub mod document;
pub mod entry;
pub mod error;

#[cfg(test)]
mod balance_props;

pub use balance::{
    AccountBalances, RunningBalance, account_balances_and_profit, account_range_balance,
    account_type_of, balance_change, entry_subtracts_from_balance,
};
pub use document::{
    Document, DocumentComparison, DocumentInput, DocumentSummary, EntryLines, UserRef,
    parse_document_id,
};
pub use entry::{
    DocumentEntry, EntryTotals, entries_from_shortcut, shortcut_accounts, validate_row_numbers,
};
pub use error::LedgerError;
