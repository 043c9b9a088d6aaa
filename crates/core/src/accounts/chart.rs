//! Hierarchical chart of accounts.
//!
//! The chart is stored as flat rows ordered by `(account_id, nesting_level)`.
//! A node's parent is the nearest preceding node with a lower nesting level,
//! so headings enclose every following row until a heading of the same or a
//! higher level appears.

use std::collections::HashSet;

use massikone_shared::types::AccountId;
use serde::{Deserialize, Serialize};

use super::error::ChartError;
use super::types::{Account, AccountMap, AccountType, LEAF_NESTING_LEVEL};

/// A node of the chart tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartNode {
    /// The account row.
    pub account: Account,
    /// Index of the enclosing heading, if any.
    pub parent: Option<usize>,
    /// Number of enclosing headings.
    pub depth: usize,
}

/// One line of the account listing view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountListing {
    /// Account code.
    pub account_id: AccountId,
    /// Account type.
    pub account_type: AccountType,
    /// Display title.
    pub title: String,
    /// The code for leaves, `nesting_level + 1` equals signs for headings.
    pub prefix: String,
    /// Heading level for rendering (`nesting_level + 2`), headings only.
    pub heading_level: Option<i32>,
    /// True for non-postable headings.
    pub is_heading: bool,
    /// True for the leaf matching the requested code.
    pub is_match: bool,
    /// Number of enclosing headings.
    pub depth: usize,
}

/// The chart of accounts as an explicit tree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChartOfAccounts {
    nodes: Vec<ChartNode>,
}

impl ChartOfAccounts {
    /// Builds the tree from flat rows in any order.
    ///
    /// # Errors
    ///
    /// Returns [`ChartError::InvalidNestingLevel`] for levels outside `0..=9`.
    pub fn from_accounts(mut accounts: Vec<Account>) -> Result<Self, ChartError> {
        if let Some(bad) = accounts
            .iter()
            .find(|a| !(0..=LEAF_NESTING_LEVEL).contains(&a.nesting_level))
        {
            return Err(ChartError::InvalidNestingLevel {
                account_id: bad.id,
                level: bad.nesting_level,
            });
        }
        accounts.sort_by_key(|a| (a.id, a.nesting_level));

        let mut nodes: Vec<ChartNode> = Vec::with_capacity(accounts.len());
        // Indices of the open headings, innermost last.
        let mut open: Vec<usize> = Vec::new();
        for account in accounts {
            while open
                .last()
                .is_some_and(|&i| nodes[i].account.nesting_level >= account.nesting_level)
            {
                open.pop();
            }
            let parent = open.last().copied();
            let depth = parent.map_or(0, |p| nodes[p].depth + 1);
            let is_heading = !account.is_postable();
            nodes.push(ChartNode {
                account,
                parent,
                depth,
            });
            if is_heading {
                open.push(nodes.len() - 1);
            }
        }
        Ok(Self { nodes })
    }

    /// All nodes in `(account_id, nesting_level)` order.
    #[must_use]
    pub fn nodes(&self) -> &[ChartNode] {
        &self.nodes
    }

    /// Number of rows, headings included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if the chart has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Leaf-only lookup by account code.
    #[must_use]
    pub fn account_map(&self) -> AccountMap {
        self.nodes
            .iter()
            .filter(|n| n.account.is_postable())
            .map(|n| (n.account.id, n.account.clone()))
            .collect()
    }

    /// Builds the listing view.
    ///
    /// With `used` set, leaves outside the set are hidden and headings are
    /// kept only when some descendant leaf is kept. `match_id` flags the
    /// matching leaf.
    #[must_use]
    pub fn listing(
        &self,
        used: Option<&HashSet<AccountId>>,
        match_id: Option<AccountId>,
    ) -> Vec<AccountListing> {
        let keep = match used {
            Some(used) => self.keep_used(used),
            None => vec![true; self.nodes.len()],
        };
        self.nodes
            .iter()
            .zip(keep)
            .filter(|(_, keep)| *keep)
            .map(|(node, _)| Self::listing_line(node, match_id))
            .collect()
    }

    fn keep_used(&self, used: &HashSet<AccountId>) -> Vec<bool> {
        let mut keep: Vec<bool> = self
            .nodes
            .iter()
            .map(|n| n.account.is_postable() && used.contains(&n.account.id))
            .collect();
        // Parents precede children, so a reverse walk reaches every ancestor.
        for i in (0..self.nodes.len()).rev() {
            if keep[i]
                && let Some(p) = self.nodes[i].parent
            {
                keep[p] = true;
            }
        }
        keep
    }

    fn listing_line(node: &ChartNode, match_id: Option<AccountId>) -> AccountListing {
        let account = &node.account;
        let is_heading = !account.is_postable();
        let prefix = if is_heading {
            "=".repeat(usize::try_from(account.nesting_level + 1).unwrap_or(1))
        } else {
            account.id.to_string()
        };
        AccountListing {
            account_id: account.id,
            account_type: account.account_type,
            title: account.title.clone(),
            prefix,
            heading_level: is_heading.then_some(account.nesting_level + 2),
            is_heading,
            is_match: !is_heading && match_id == Some(account.id),
            depth: node.depth,
        }
    }
}
