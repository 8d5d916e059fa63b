//! Watched log conversion
//!
//! Decodes a raw watched log against its ABI event, normalizes every field
//! to a string, records address-typed values as token holders and applies
//! the contract's event-address gate. Logs rejected by the gate come back as
//! `Ok(None)`; only malformed logs and unsupported field types are errors.

use crate::contract::Contract;
use crate::error::{Error, Result};
use crate::normalize::FieldValue;
use crate::types::{Event, Log, WatchedEvent};
use alloy_dyn_abi::EventExt;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::trace;

/// Converts watched logs into string-valued [`Log`] records.
pub trait LogConverter {
    /// Convert one watched log decoded as `event`.
    ///
    /// Returns `Ok(None)` when the log is filtered out by the event-address gate.
    fn convert(&self, watched: &WatchedEvent, event: &Event) -> Result<Option<Log>>;

    /// Point the converter at a refreshed contract.
    fn update(&mut self, contract: Arc<Contract>);
}

/// Converter bound to a single contract.
#[derive(Debug, Clone)]
pub struct Converter {
    contract: Arc<Contract>,
}

impl Converter {
    /// Create a converter for the given contract.
    pub fn new(contract: Arc<Contract>) -> Self {
        Self { contract }
    }

    /// Contract currently used for decoding and filtering.
    pub fn contract(&self) -> &Arc<Contract> {
        &self.contract
    }
}

impl LogConverter for Converter {
    fn convert(&self, watched: &WatchedEvent, event: &Event) -> Result<Option<Log>> {
        let contract = &self.contract;
        let abi_event = contract.abi_event(event).ok_or_else(|| {
            Error::decode(
                &event.name,
                watched.log_id,
                format!("{} is not in the ABI of {}", event.signature, contract.address),
            )
        })?;

        let decoded = abi_event
            .decode_log_parts(watched.topics.iter().copied(), &watched.data)
            .map_err(|e| Error::decode(&event.name, watched.log_id, e))?;

        // Indexed and body values come back separately; restore declaration order
        let mut indexed = decoded.indexed.into_iter();
        let mut body = decoded.body.into_iter();

        let mut values = BTreeMap::new();
        let mut holders = Vec::new();
        for field in &event.fields {
            let raw = if field.indexed {
                indexed.next()
            } else {
                body.next()
            };
            let raw = raw.ok_or_else(|| {
                Error::decode(
                    &event.name,
                    watched.log_id,
                    format!("no decoded value for field {}", field.name),
                )
            })?;

            let value = FieldValue::from_decoded(raw, &field.name, &field.ty)?;
            let normalized = value.normalize();
            if value.as_address().is_some() {
                holders.push(normalized.clone());
            }
            values.insert(field.name.clone(), normalized);
        }

        // Only logs that normalized completely feed the token holder cache
        for holder in &holders {
            contract.add_token_holder_address(holder);
        }

        if !contract.passes_event_filter(&values) {
            trace!(
                "Log {} ({}) in block {} filtered out by event address gate",
                watched.log_id,
                event.name,
                watched.block_number
            );
            return Ok(None);
        }

        Ok(Some(Log {
            id: watched.log_id,
            block: watched.block_number,
            tx: watched.tx_hash,
            values,
        }))
    }

    fn update(&mut self, contract: Arc<Contract>) {
        self.contract = contract;
    }
}
