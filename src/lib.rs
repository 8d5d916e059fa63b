//! omni-indexer - contract event log filtering and conversion
//!
//! This library decodes smart-contract event logs against the contract's
//! ABI, gates them by configurable address allow-lists and turns them into
//! string-valued records, caching every address seen along the way as a
//! token holder.

pub mod cache;
pub mod cli;
pub mod config;
pub mod contract;
pub mod converter;
pub mod error;
pub mod filter;
pub mod normalize;
pub mod types;

#[cfg(test)]
pub(crate) mod test_utils;

// Re-export the main types for convenience
pub use contract::Contract;
pub use converter::{Converter, LogConverter};
pub use error::{Error, Result};
pub use filter::{AddressFilter, LogFilter};
pub use normalize::FieldValue;
pub use types::{Event, Field, Log, WatchedEvent};
