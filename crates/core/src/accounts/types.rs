//! Account domain types.

use std::collections::HashMap;

use massikone_shared::types::AccountId;
use serde::{Deserialize, Serialize};

use super::error::ChartError;

/// Nesting level of postable leaf accounts. Lower levels are headings.
pub const LEAF_NESTING_LEVEL: i32 = 9;

/// Account types, in stored code order.
///
/// - Asset/Expense: debit-normal, a credit subtracts from the balance
/// - Liability/Equity/Revenue/PastProfit/Profit: credit-normal, a debit subtracts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountType {
    /// Assets (code 0).
    #[default]
    Asset,
    /// Liabilities (code 1).
    Liability,
    /// Equity (code 2).
    Equity,
    /// Revenue (code 3).
    Revenue,
    /// Expenses (code 4).
    Expense,
    /// Profit of previous financial periods (code 5).
    PastProfit,
    /// Profit of the current financial period (code 6).
    Profit,
}

impl AccountType {
    /// Maps a stored code to an account type.
    ///
    /// # Errors
    ///
    /// Returns [`ChartError::UnknownAccountType`] for codes outside `0..=6`.
    pub const fn from_code(account_id: AccountId, code: i32) -> Result<Self, ChartError> {
        Ok(match code {
            0 => Self::Asset,
            1 => Self::Liability,
            2 => Self::Equity,
            3 => Self::Revenue,
            4 => Self::Expense,
            5 => Self::PastProfit,
            6 => Self::Profit,
            _ => return Err(ChartError::UnknownAccountType { account_id, code }),
        })
    }

    /// Returns the stored code.
    #[must_use]
    pub const fn code(self) -> i32 {
        match self {
            Self::Asset => 0,
            Self::Liability => 1,
            Self::Equity => 2,
            Self::Revenue => 3,
            Self::Expense => 4,
            Self::PastProfit => 5,
            Self::Profit => 6,
        }
    }

    /// Returns true for Asset and Expense accounts.
    #[must_use]
    pub const fn is_debit_normal(self) -> bool {
        matches!(self, Self::Asset | Self::Expense)
    }
}

/// One row of the chart of accounts: a postable leaf or a heading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Numeric account code.
    pub id: AccountId,
    /// Account type.
    pub account_type: AccountType,
    /// 0..=9, where 9 marks a postable leaf.
    pub nesting_level: i32,
    /// Display title.
    pub title: String,
}

impl Account {
    /// Creates an account row.
    #[must_use]
    pub fn new(
        id: AccountId,
        account_type: AccountType,
        nesting_level: i32,
        title: impl Into<String>,
    ) -> Self {
        Self {
            id,
            account_type,
            nesting_level,
            title: title.into(),
        }
    }

    /// Creates a postable leaf account.
    #[must_use]
    pub fn leaf(id: AccountId, account_type: AccountType, title: impl Into<String>) -> Self {
        Self::new(id, account_type, LEAF_NESTING_LEVEL, title)
    }

    /// Returns true if entries may be posted to this account.
    #[must_use]
    pub const fn is_postable(&self) -> bool {
        self.nesting_level == LEAF_NESTING_LEVEL
    }
}

/// Leaf-only lookup from account code to account.
pub type AccountMap = HashMap<AccountId, Account>;
