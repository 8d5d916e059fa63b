//! Watched logs, ABI events and converted log records
//!
//! `WatchedEvent` is what the log source hands us, deserialized from its JSON
//! with hex-string fields. `Event` is the slice of the ABI a conversion
//! needs. `Log` is the normalized output record.

use alloy_primitives::{Address, B256};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// Raw log delivered by the log source for one contract event.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct WatchedEvent {
    /// Log source's identifier for this log
    #[serde(rename = "logId")]
    pub log_id: i64,

    /// Name of the event the log was matched against
    #[serde(rename = "name")]
    pub name: String,

    /// Containing block number
    #[serde(rename = "blockNumber")]
    pub block_number: u64,

    /// Address of the contract that emitted the log (hex string in JSON)
    #[serde(rename = "address", deserialize_with = "deserialize_hex_address")]
    pub address: Address,

    /// Containing transaction hash (hex string in JSON)
    #[serde(rename = "transactionHash", deserialize_with = "deserialize_hex_b256")]
    pub tx_hash: B256,

    /// Log index within the block
    #[serde(rename = "logIndex", default)]
    pub index: u64,

    /// Indexed topics (topic0 = event selector unless the event is anonymous)
    #[serde(rename = "topics", default, deserialize_with = "deserialize_hex_b256_vec")]
    pub topics: Vec<B256>,

    /// Non-indexed event data (hex string in JSON)
    #[serde(rename = "data", deserialize_with = "deserialize_hex_bytes")]
    pub data: Vec<u8>,
}

/// One declared input of an ABI event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Field {
    /// Parameter name, `arg{i}` when the ABI leaves it blank
    pub name: String,
    /// Solidity type as used in the event signature
    pub ty: String,
    /// Whether the value travels in a topic instead of the data section
    pub indexed: bool,
}

/// Event definition resolved from a contract ABI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Event {
    pub name: String,
    pub anonymous: bool,
    /// Canonical signature, e.g. `Transfer(address,address,uint256)`
    pub signature: String,
    /// keccak256 of the signature
    pub selector: B256,
    /// Inputs in declaration order
    pub fields: Vec<Field>,
}

impl From<&alloy_json_abi::Event> for Event {
    fn from(event: &alloy_json_abi::Event) -> Self {
        let fields = event
            .inputs
            .iter()
            .enumerate()
            .map(|(i, param)| Field {
                name: field_name(&param.name, i),
                ty: param.selector_type().into_owned(),
                indexed: param.indexed,
            })
            .collect();

        Self {
            name: event.name.clone(),
            anonymous: event.anonymous,
            signature: event.signature(),
            selector: event.selector(),
            fields,
        }
    }
}

/// Name under which a parameter's value is stored in a [`Log`].
pub(crate) fn field_name(name: &str, index: usize) -> String {
    if name.is_empty() {
        format!("arg{}", index)
    } else {
        name.to_string()
    }
}

/// Converted log: every event field rendered as a string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Log {
    /// Log identifier carried over from the watched event
    pub id: i64,
    /// Block number
    pub block: u64,
    /// Transaction hash
    pub tx: B256,
    /// Field name -> normalized value
    pub values: BTreeMap<String, String>,
}

// Hex deserialization helpers

/// Decode a hex string into exactly `N` bytes.
///
/// Odd-length input is rejected: topics, hashes and addresses are whole
/// words, a missing nibble means the value is truncated.
fn decode_fixed<const N: usize>(s: &str) -> Result<[u8; N], String> {
    let s = s.strip_prefix("0x").unwrap_or(s);
    let bytes = hex::decode(s).map_err(|e| format!("Invalid hex {:?}: {}", s, e))?;
    <[u8; N]>::try_from(bytes.as_slice())
        .map_err(|_| format!("Expected {} bytes, got {}", N, bytes.len()))
}

/// Deserialize a hex string to B256.
fn deserialize_hex_b256<'de, D>(deserializer: D) -> Result<B256, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    decode_fixed::<32>(&s)
        .map(B256::from)
        .map_err(serde::de::Error::custom)
}

/// Deserialize a list of hex strings to B256 topics.
fn deserialize_hex_b256_vec<'de, D>(deserializer: D) -> Result<Vec<B256>, D::Error>
where
    D: Deserializer<'de>,
{
    let topics = Vec::<String>::deserialize(deserializer)?;
    topics
        .iter()
        .map(|t| decode_fixed::<32>(t).map(B256::from))
        .collect::<Result<Vec<_>, _>>()
        .map_err(serde::de::Error::custom)
}

/// Deserialize a hex string to Address.
fn deserialize_hex_address<'de, D>(deserializer: D) -> Result<Address, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    decode_fixed::<20>(&s)
        .map(Address::from)
        .map_err(serde::de::Error::custom)
}

/// Deserialize a hex string to bytes. Odd-length input is rejected.
fn deserialize_hex_bytes<'de, D>(deserializer: D) -> Result<Vec<u8>, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    let s = s.strip_prefix("0x").unwrap_or(&s);
    hex::decode(s).map_err(serde::de::Error::custom)
}
