//! Report data types.

use chrono::NaiveDate;
use massikone_shared::types::{AccountId, DocumentId};
use serde::{Deserialize, Serialize};

use crate::accounts::AccountRange;
use crate::ledger::{DocumentEntry, DocumentSummary};

/// A document with its entries, as listed in the journal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalDocument {
    /// Header and amount.
    #[serde(flatten)]
    pub summary: DocumentSummary,
    /// Entries in row order.
    pub entries: Vec<DocumentEntry>,
}

/// Documents in ID order with their entries inline.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Journal {
    /// Documents.
    pub documents: Vec<JournalDocument>,
    /// Sum of all debit entries.
    pub total_debit_cents: i64,
    /// Sum of all credit entries.
    pub total_credit_cents: i64,
}

/// One entry line in an account's ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerEntry {
    /// Document the entry belongs to.
    pub document_id: DocumentId,
    /// Payment date of the document.
    pub paid_date: Option<NaiveDate>,
    /// Entry description.
    pub description: String,
    /// Formatted amount for debit entries, empty otherwise.
    pub debit_amount: String,
    /// Formatted amount for credit entries, empty otherwise.
    pub credit_amount: String,
    /// Formatted balance after this entry.
    pub balance_after: String,
    /// Balance after this entry.
    pub balance_after_cents: i64,
}

/// One account's ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerAccount {
    /// Account code.
    pub account_id: AccountId,
    /// Account title, empty for accounts missing from the chart.
    pub account_title: String,
    /// Balance after the last entry.
    pub current_balance_cents: i64,
    /// Entries ordered by payment date, then document.
    pub entries: Vec<LedgerEntry>,
}

/// Entries grouped by account with running balances.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ledger {
    /// Accounts ordered by code.
    pub accounts: Vec<LedgerAccount>,
    /// Sum of all debit entries.
    pub total_debit_cents: i64,
    /// Sum of all credit entries.
    pub total_credit_cents: i64,
}

/// A statement line definition: a title and the account ranges it sums.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatementLine {
    /// Line title.
    pub title: String,
    /// Ranges summed into the line.
    pub ranges: Vec<AccountRange>,
}

impl StatementLine {
    /// Creates a line.
    #[must_use]
    pub fn new(title: impl Into<String>, ranges: Vec<AccountRange>) -> Self {
        Self {
            title: title.into(),
            ranges,
        }
    }
}

/// A computed statement line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatementBalance {
    /// Line title.
    pub title: String,
    /// Range balance in cents.
    pub cents: i64,
    /// Formatted range balance.
    pub amount: String,
}

/// A balance statement over the whole book.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Statement {
    /// Lines in definition order.
    pub lines: Vec<StatementBalance>,
    /// Revenue minus expenses.
    pub profit_cents: i64,
}
