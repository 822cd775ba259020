//! # Classification Registry
//!
//! Three independent account sets consulted by the tax policy: the whitelist,
//! the long-governance-list and the short-governance-list. Membership in one
//! says nothing about the others. Authorization is enforced by the caller.

use crate::domain::value_objects::Address;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Which governance list an update targets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GovernanceList {
    /// Long-governance-list.
    Long,
    /// Short-governance-list.
    Short,
}

impl GovernanceList {
    /// Maps the boolean `isLong` flag of the external interface.
    #[must_use]
    pub const fn from_is_long(is_long: bool) -> Self {
        if is_long {
            Self::Long
        } else {
            Self::Short
        }
    }
}

impl fmt::Display for GovernanceList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Long => write!(f, "long"),
            Self::Short => write!(f, "short"),
        }
    }
}

/// Flag storage for whitelist and governance lists.
#[derive(Clone, Debug, Default)]
pub struct ClassificationRegistry {
    whitelist: HashSet<Address>,
    long_list: HashSet<Address>,
    short_list: HashSet<Address>,
}

impl ClassificationRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// True if `account` is whitelisted.
    #[must_use]
    pub fn is_whitelisted(&self, account: &Address) -> bool {
        self.whitelist.contains(account)
    }

    /// True if `account` is on the long-governance-list.
    #[must_use]
    pub fn is_long(&self, account: &Address) -> bool {
        self.long_list.contains(account)
    }

    /// True if `account` is on the short-governance-list.
    #[must_use]
    pub fn is_short(&self, account: &Address) -> bool {
        self.short_list.contains(account)
    }

    /// True if `account` is on `list`.
    #[must_use]
    pub fn is_listed(&self, account: &Address, list: GovernanceList) -> bool {
        match list {
            GovernanceList::Long => self.is_long(account),
            GovernanceList::Short => self.is_short(account),
        }
    }

    /// Sets whitelist membership. Returns the previous flag.
    pub fn set_whitelist(&mut self, account: Address, listed: bool) -> bool {
        set_flag(&mut self.whitelist, account, listed)
    }

    /// Sets governance-list membership. Returns the previous flag.
    pub fn set_governance_list(
        &mut self,
        account: Address,
        list: GovernanceList,
        listed: bool,
    ) -> bool {
        let set = match list {
            GovernanceList::Long => &mut self.long_list,
            GovernanceList::Short => &mut self.short_list,
        };
        set_flag(set, account, listed)
    }

    /// Number of whitelisted accounts.
    #[must_use]
    pub fn whitelist_len(&self) -> usize {
        self.whitelist.len()
    }
}

fn set_flag(set: &mut HashSet<Address>, account: Address, listed: bool) -> bool {
    if listed {
        !set.insert(account)
    } else {
        set.remove(&account)
    }
}

// =============================================================================
// TESTS
// =============================================================================
