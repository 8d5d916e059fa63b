//! Address gates and per-event log filters
//!
//! An [`AddressFilter`] is the tri-state gate consulted for both the
//! event-address and the method-address dimension of a contract.
//! A [`LogFilter`] is the contract + event-signature criterion handed to
//! whatever fetches raw logs.

use alloy_primitives::B256;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Tri-state address gate.
///
/// - `BlockAll`: nothing passes
/// - `AllowAll`: no restriction configured, everything passes
/// - `AllowList`: only members pass
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AddressFilter {
    BlockAll,
    #[default]
    AllowAll,
    AllowList(HashSet<String>),
}

impl AddressFilter {
    /// Build an allow-list gate. An empty list means no restriction.
    pub fn allow_list<I, S>(addresses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let set: HashSet<String> = addresses.into_iter().map(Into::into).collect();
        if set.is_empty() {
            Self::AllowAll
        } else {
            Self::AllowList(set)
        }
    }

    /// Check whether a single address passes the gate.
    pub fn permits(&self, address: &str) -> bool {
        match self {
            Self::BlockAll => false,
            Self::AllowAll => true,
            Self::AllowList(set) => set.contains(address),
        }
    }

    /// Check whether any of the given values passes the gate.
    ///
    /// `AllowAll` passes even with no values at all.
    pub fn permits_any<'a, I>(&self, values: I) -> bool
    where
        I: IntoIterator<Item = &'a str>,
    {
        match self {
            Self::BlockAll => false,
            Self::AllowAll => true,
            Self::AllowList(set) => values.into_iter().any(|v| set.contains(v)),
        }
    }

    /// Canonicalise allow-list entries that parse as addresses.
    pub fn canonicalized(self) -> Self {
        match self {
            Self::AllowList(set) => Self::allow_list(set.into_iter().map(|a| canonical_address(&a))),
            other => other,
        }
    }
}

/// Legacy nullable representation: `None` blocks, empty allows.
impl From<Option<HashSet<String>>> for AddressFilter {
    fn from(set: Option<HashSet<String>>) -> Self {
        match set {
            None => Self::BlockAll,
            Some(set) => Self::allow_list(set),
        }
    }
}

/// Return the EIP-55 form of `s` if it is a hex address, else `s` unchanged.
pub fn canonical_address(s: &str) -> String {
    match s.trim().parse::<alloy_primitives::Address>() {
        Ok(addr) => addr.to_checksum(None),
        Err(_) => s.to_string(),
    }
}

/// Criterion used by a log source to select the raw logs of one contract event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogFilter {
    /// Event name
    pub name: String,
    /// Contract address the logs must originate from
    pub address: String,
    /// Canonical event signature, e.g. `Transfer(address,address,uint256)`
    pub signature: String,
    /// Topic constraints; topic0 is the event selector
    pub topics: Vec<Option<B256>>,
    /// First block to search
    pub from_block: u64,
    /// Last block to search, `None` means the chain head
    pub to_block: Option<u64>,
}
