//! Documents (bills): headers, read views and write input.

use chrono::NaiveDate;
use massikone_shared::types::{AccountId, DocumentId, UserId, amount_from_cents};
use serde::{Deserialize, Serialize};

use crate::auth::Caller;

use super::entry::{DocumentEntry, EntryTotals, entries_from_shortcut, validate_row_numbers};
use super::error::LedgerError;

/// Parses a document ID received as text.
///
/// # Errors
///
/// Returns [`LedgerError::InvalidDocumentId`] unless the text is a positive
/// 32-bit integer.
pub fn parse_document_id(raw: &str) -> Result<DocumentId, LedgerError> {
    DocumentId::parse_positive(raw).ok_or_else(|| LedgerError::InvalidDocumentId(raw.to_string()))
}

/// The user who paid a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRef {
    /// User ID.
    pub user_id: UserId,
    /// Display name.
    pub full_name: String,
}

/// A document as listed, with its derived amount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentSummary {
    /// Document number.
    pub document_id: DocumentId,
    /// Payment date.
    pub paid_date: Option<NaiveDate>,
    /// Free-text description.
    pub description: String,
    /// The payer, if any.
    pub paid_user: Option<UserRef>,
    /// Amount in cents: the larger of the debit and credit sums.
    pub cents: i64,
    /// Amount formatted as `units,cc`.
    pub amount: String,
}

impl DocumentSummary {
    /// Builds a summary, deriving the amount from the entry totals.
    #[must_use]
    pub fn new(
        document_id: DocumentId,
        paid_date: Option<NaiveDate>,
        description: String,
        paid_user: Option<UserRef>,
        totals: EntryTotals,
    ) -> Self {
        let cents = totals.amount_cents();
        Self {
            document_id,
            paid_date,
            description,
            paid_user,
            cents,
            amount: amount_from_cents(cents),
        }
    }

    /// The payer's user ID.
    #[must_use]
    pub fn paid_user_id(&self) -> Option<UserId> {
        self.paid_user.as_ref().map(|u| u.user_id)
    }
}

/// A single document with everything needed to display and edit it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// Header and amount.
    #[serde(flatten)]
    pub summary: DocumentSummary,
    /// First credit account by row number.
    pub credit_account_id: Option<AccountId>,
    /// First debit account by row number.
    pub debit_account_id: Option<AccountId>,
    /// Attached image references, in order.
    pub image_ids: Vec<String>,
    /// All entries in row order.
    pub entries: Vec<DocumentEntry>,
    /// Nearest lower document ID within the caller's scope.
    pub prev_document_id: Option<DocumentId>,
    /// Nearest higher document ID within the caller's scope.
    pub next_document_id: Option<DocumentId>,
}

/// One row of the bank-statement comparison list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentComparison {
    /// Document number.
    pub document_id: DocumentId,
    /// Payment date.
    pub paid_date: Option<NaiveDate>,
    /// Amount in cents.
    pub cents: i64,
    /// Free-text description.
    pub description: String,
}

impl From<DocumentSummary> for DocumentComparison {
    fn from(summary: DocumentSummary) -> Self {
        Self {
            document_id: summary.document_id,
            paid_date: summary.paid_date,
            cents: summary.cents,
            description: summary.description,
        }
    }
}

/// How the entries of a written document are given.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryLines {
    /// One credit and one debit account sharing one amount.
    Shortcut {
        /// Account credited.
        credit_account_id: Option<AccountId>,
        /// Account debited.
        debit_account_id: Option<AccountId>,
        /// Amount text, `units` or `units,cc`.
        amount: String,
    },
    /// An explicit entry list.
    Itemized(Vec<DocumentEntry>),
}

impl Default for EntryLines {
    fn default() -> Self {
        Self::Shortcut {
            credit_account_id: None,
            debit_account_id: None,
            amount: String::new(),
        }
    }
}

impl EntryLines {
    /// Resolves the lines into the entry set to store.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::InvalidAmount`] for bad shortcut amounts,
    /// [`LedgerError::RowNumberMismatch`] for misnumbered itemized entries and
    /// [`LedgerError::AmountOverflow`] when the totals do not fit in cents.
    pub fn resolve(self) -> Result<Vec<DocumentEntry>, LedgerError> {
        let entries = match self {
            Self::Shortcut {
                credit_account_id,
                debit_account_id,
                amount,
            } => entries_from_shortcut(credit_account_id, debit_account_id, &amount)?,
            Self::Itemized(entries) => {
                validate_row_numbers(&entries)?;
                entries
            }
        };
        EntryTotals::from_entries(&entries)?;
        Ok(entries)
    }

    /// Returns true for a non-empty itemized list.
    #[must_use]
    pub fn is_itemized(&self) -> bool {
        matches!(self, Self::Itemized(entries) if !entries.is_empty())
    }
}

/// Fields of a document write (post or put).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentInput {
    /// Payment date.
    pub paid_date: Option<NaiveDate>,
    /// Free-text description.
    pub description: String,
    /// Payer. Admin only; `None` from an admin clears the payer.
    pub paid_user_id: Option<UserId>,
    /// Entries. Admin only; ignored for other callers when given as a shortcut.
    pub lines: EntryLines,
    /// Image references replacing the current list.
    pub image_ids: Vec<String>,
}

impl DocumentInput {
    /// Checks the fields a non-admin caller must leave empty.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::PayerFromNonAdmin`] or
    /// [`LedgerError::EntriesFromNonAdmin`] for non-admin callers.
    pub fn check_caller(&self, caller: &Caller) -> Result<(), LedgerError> {
        if caller.is_admin() {
            return Ok(());
        }
        if self.paid_user_id.is_some() {
            return Err(LedgerError::PayerFromNonAdmin);
        }
        if self.lines.is_itemized() {
            return Err(LedgerError::EntriesFromNonAdmin);
        }
        Ok(())
    }
}
