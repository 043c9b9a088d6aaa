//! Chart of accounts.
//!
//! This module provides:
//! - Account types and their stored codes
//! - The chart as an explicit heading/leaf tree
//! - The account listing view and the leaf lookup map
//! - Inclusive account ranges for statements

pub mod chart;
pub mod error;
pub mod range;
pub mod types;

pub use chart::{AccountListing, ChartNode, ChartOfAccounts};
pub use error::ChartError;
pub use range::{AccountRange, account_in_ranges};
pub use types::{Account, AccountMap, AccountType, LEAF_NESTING_LEVEL};
