//! Contract filter model
//!
//! A [`Contract`] bundles everything the pipeline knows about one tracked
//! contract: its address and ABI, the events being watched, the log filters
//! derived from them, the two address gates and the token holder cache.
//!
//! The event and method gates are configured from outside and only read
//! here. The token holder cache is the one piece of state written during
//! conversion, and it is safe to write through `&Contract`.

use crate::cache::TokenHolderCache;
use crate::error::{Error, Result};
use crate::filter::{canonical_address, AddressFilter, LogFilter};
use crate::types::Event;
use alloy_json_abi::JsonAbi;
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// A tracked contract and its filtering state.
#[derive(Debug, Clone, Default)]
pub struct Contract {
    /// Human-readable name
    pub name: String,
    /// Network the contract lives on
    pub network: String,
    /// Checksummed contract address
    pub address: String,
    /// Parsed interface description
    pub abi: Option<JsonAbi>,
    /// First block to watch
    pub starting_block: u64,
    /// Last block to watch, `None` follows the chain head
    pub last_block: Option<u64>,
    /// Event names to watch; empty watches every ABI event
    pub watched_events: Vec<String>,
    /// Watched events resolved from the ABI by [`Contract::generate_filters`]
    pub events: BTreeMap<String, Event>,
    /// Log filters keyed by event name
    pub filters: BTreeMap<String, LogFilter>,
    /// Gate over addresses referenced by emitted log values
    pub event_addresses: AddressFilter,
    /// Gate over addresses that called contract methods
    pub method_addresses: AddressFilter,
    token_holders: TokenHolderCache,
}

impl Contract {
    /// Create a contract with open gates and no watched events.
    pub fn new(address: &str, abi: JsonAbi) -> Self {
        Self {
            address: canonical_address(address),
            abi: Some(abi),
            ..Self::default()
        }
    }

    pub fn with_name(mut self, name: impl Into<String>, network: impl Into<String>) -> Self {
        self.name = name.into();
        self.network = network.into();
        self
    }

    pub fn with_watched_events(mut self, events: Vec<String>) -> Self {
        self.watched_events = events;
        self
    }

    pub fn with_blocks(mut self, starting_block: u64, last_block: Option<u64>) -> Self {
        self.starting_block = starting_block;
        self.last_block = last_block;
        self
    }

    /// Set the event gate. Entries that parse as addresses are checksummed
    /// so they compare equal to normalized log values.
    pub fn with_event_addresses(mut self, gate: AddressFilter) -> Self {
        self.event_addresses = gate.canonicalized();
        self
    }

    /// Set the method gate, checksumming entries like [`Self::with_event_addresses`].
    pub fn with_method_addresses(mut self, gate: AddressFilter) -> Self {
        self.method_addresses = gate.canonicalized();
        self
    }

    /// Derive one log filter per watched event from the ABI.
    ///
    /// Recomputes `events` and `filters` from scratch, so it is safe to call
    /// again after the ABI changes. Address gates play no part here.
    pub fn generate_filters(&mut self) -> Result<()> {
        let abi = match &self.abi {
            Some(abi) if !(abi.events.is_empty() && abi.functions.is_empty()) => abi,
            _ => {
                return Err(Error::Configuration {
                    address: self.address.clone(),
                })
            }
        };

        let abi_events: Vec<&alloy_json_abi::Event> = if self.watched_events.is_empty() {
            abi.events.values().filter_map(|overloads| overloads.first()).collect()
        } else {
            self.watched_events
                .iter()
                .filter_map(|name| match abi.event(name).and_then(|o| o.first()) {
                    Some(event) => Some(event),
                    None => {
                        warn!("Event {} not found in ABI of {}", name, self.address);
                        None
                    }
                })
                .collect()
        };

        let mut events = BTreeMap::new();
        let mut filters = BTreeMap::new();
        for abi_event in abi_events {
            let event = Event::from(abi_event);
            let topics = if event.anonymous {
                Vec::new()
            } else {
                vec![Some(event.selector)]
            };
            filters.insert(
                event.name.clone(),
                LogFilter {
                    name: event.name.clone(),
                    address: self.address.clone(),
                    signature: event.signature.clone(),
                    topics,
                    from_block: self.starting_block,
                    to_block: self.last_block,
                },
            );
            events.insert(event.name.clone(), event);
        }

        debug!("Generated {} log filters for {}", filters.len(), self.address);
        self.events = events;
        self.filters = filters;
        Ok(())
    }

    /// ABI definition matching `event`, picking the right overload by selector.
    pub fn abi_event(&self, event: &Event) -> Option<&alloy_json_abi::Event> {
        self.abi
            .as_ref()?
            .event(&event.name)?
            .iter()
            .find(|e| e.selector() == event.selector)
    }

    /// Check an address against the event-address gate.
    pub fn is_event_addr(&self, address: &str) -> bool {
        self.event_addresses.permits(address)
    }

    /// Check an address against the method-address gate.
    pub fn is_method_addr(&self, address: &str) -> bool {
        self.method_addresses.permits(address)
    }

    /// Check whether a converted log's values pass the event-address gate.
    ///
    /// Passes when the gate is open or any value is an allowed address.
    pub fn passes_event_filter(&self, values: &BTreeMap<String, String>) -> bool {
        self.event_addresses
            .permits_any(values.values().map(String::as_str))
    }

    /// Cache `address` as a token holder if the method-address gate allows it.
    ///
    /// Returns true if the address was newly added. The event-address gate
    /// is not consulted.
    pub fn add_token_holder_address(&self, address: &str) -> bool {
        if !self.is_method_addr(address) {
            return false;
        }
        self.token_holders.insert(address)
    }

    pub fn is_token_holder(&self, address: &str) -> bool {
        self.token_holders.contains(address)
    }

    /// Sorted snapshot of the cached token holders.
    pub fn token_holders(&self) -> Vec<String> {
        self.token_holders.snapshot()
    }

    /// Forget every cached token holder.
    pub fn reset_token_holders(&self) {
        self.token_holders.clear();
    }
}
