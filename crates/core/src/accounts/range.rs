//! Inclusive account code ranges.

use massikone_shared::types::AccountId;
use serde::{Deserialize, Serialize};

/// An inclusive range of account codes, e.g. `3000..=3999` for revenue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountRange {
    /// First code in the range.
    pub start: AccountId,
    /// Last code in the range.
    pub end: AccountId,
}

impl AccountRange {
    /// Creates a range from raw codes.
    #[must_use]
    pub const fn new(start: i32, end: i32) -> Self {
        Self {
            start: AccountId(start),
            end: AccountId(end),
        }
    }

    /// Returns true if `id` lies within the range.
    #[must_use]
    pub fn contains(&self, id: AccountId) -> bool {
        self.start <= id && id <= self.end
    }
}

/// Returns true if `id` lies within any of `ranges`.
#[must_use]
pub fn account_in_ranges(id: AccountId, ranges: &[AccountRange]) -> bool {
    ranges.iter().any(|r| r.contains(id))
}
