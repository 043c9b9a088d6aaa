//! Document entries (debit and credit lines).

use massikone_shared::types::{AccountId, cents_from_amount};
use serde::{Deserialize, Serialize};

use super::error::LedgerError;

/// Description of the credit entry derived from the two-account shortcut.
pub const SHORTCUT_CREDIT_DESCRIPTION: &str = "Credit";
/// Description of the debit entry derived from the two-account shortcut.
pub const SHORTCUT_DEBIT_DESCRIPTION: &str = "Debit";

/// One debit or credit line of a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentEntry {
    /// 0-based position within the document.
    pub row_number: i32,
    /// The account posted to.
    pub account_id: AccountId,
    /// Debit when true, credit otherwise.
    pub is_debit: bool,
    /// Number of units.
    pub unit_count: i64,
    /// Price of one unit in cents.
    pub unit_cost_cents: i64,
    /// Free-text line description.
    pub description: String,
}

impl DocumentEntry {
    /// Total of the line in cents.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::AmountOverflow`] if the product does not fit.
    pub fn cents(&self) -> Result<i64, LedgerError> {
        self.unit_count
            .checked_mul(self.unit_cost_cents)
            .ok_or(LedgerError::AmountOverflow)
    }
}

/// Adds two cent amounts without wrapping.
pub(crate) fn add_cents(a: i64, b: i64) -> Result<i64, LedgerError> {
    a.checked_add(b).ok_or(LedgerError::AmountOverflow)
}

/// Negates a cent amount without wrapping.
pub(crate) fn negate_cents(cents: i64) -> Result<i64, LedgerError> {
    cents.checked_neg().ok_or(LedgerError::AmountOverflow)
}

/// Debit and credit sums of a set of entries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryTotals {
    /// Sum of debit lines.
    pub debit_cents: i64,
    /// Sum of credit lines.
    pub credit_cents: i64,
}

impl EntryTotals {
    /// Sums a set of entries.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::AmountOverflow`] if a line or a side overflows.
    pub fn from_entries<'a>(
        entries: impl IntoIterator<Item = &'a DocumentEntry>,
    ) -> Result<Self, LedgerError> {
        entries
            .into_iter()
            .try_fold(Self::default(), |mut totals, e| {
                totals.add(e)?;
                Ok(totals)
            })
    }

    /// Adds one entry to the matching side.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::AmountOverflow`] if the line or the side
    /// overflows; the totals are left unchanged in that case.
    pub fn add(&mut self, entry: &DocumentEntry) -> Result<(), LedgerError> {
        let cents = entry.cents()?;
        let side = if entry.is_debit {
            &mut self.debit_cents
        } else {
            &mut self.credit_cents
        };
        *side = add_cents(*side, cents)?;
        Ok(())
    }

    /// The document amount: the larger of the two sides.
    #[must_use]
    pub fn amount_cents(&self) -> i64 {
        self.debit_cents.max(self.credit_cents)
    }

    /// Returns true if debits equal credits.
    #[must_use]
    pub const fn is_balanced(&self) -> bool {
        self.debit_cents == self.credit_cents
    }
}

/// Checks that every entry's row number equals its position.
///
/// # Errors
///
/// Returns [`LedgerError::RowNumberMismatch`] for the first offending entry.
pub fn validate_row_numbers(entries: &[DocumentEntry]) -> Result<(), LedgerError> {
    for (position, entry) in entries.iter().enumerate() {
        let expected = i32::try_from(position).unwrap_or(i32::MAX);
        if entry.row_number != expected {
            return Err(LedgerError::RowNumberMismatch {
                expected,
                actual: entry.row_number,
            });
        }
    }
    Ok(())
}

/// Expands the two-account shortcut into entries.
///
/// The credit entry comes first, then the debit entry. Each has one unit
/// costing `amount`. Missing accounts are skipped.
///
/// # Errors
///
/// Returns [`LedgerError::InvalidAmount`] if `amount` is not a valid amount.
pub fn entries_from_shortcut(
    credit_account_id: Option<AccountId>,
    debit_account_id: Option<AccountId>,
    amount: &str,
) -> Result<Vec<DocumentEntry>, LedgerError> {
    let unit_cost_cents = cents_from_amount(amount)?;
    let lines = [
        (credit_account_id, false, SHORTCUT_CREDIT_DESCRIPTION),
        (debit_account_id, true, SHORTCUT_DEBIT_DESCRIPTION),
    ];
    let mut entries = Vec::with_capacity(lines.len());
    for (account_id, is_debit, description) in lines {
        let Some(account_id) = account_id.filter(|id| id.0 > 0) else {
            continue;
        };
        entries.push(DocumentEntry {
            row_number: i32::try_from(entries.len()).unwrap_or(i32::MAX),
            account_id,
            is_debit,
            unit_count: 1,
            unit_cost_cents,
            description: description.to_string(),
        });
    }
    Ok(entries)
}

/// The first credit and first debit account by row number.
#[must_use]
pub fn shortcut_accounts(entries: &[DocumentEntry]) -> (Option<AccountId>, Option<AccountId>) {
    let first = |is_debit: bool| {
        entries
            .iter()
            .filter(|e| e.is_debit == is_debit)
            .min_by_key(|e| e.row_number)
            .map(|e| e.account_id)
    };
    (first(false), first(true))
}
