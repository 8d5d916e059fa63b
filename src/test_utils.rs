//! Shared fixtures for unit tests.

use crate::contract::Contract;
use crate::types::WatchedEvent;
use alloy_dyn_abi::DynSolValue;
use alloy_json_abi::JsonAbi;
use alloy_primitives::{address, b256, Address, B256, U256};

/// TrueUSD token address on mainnet.
pub const TUSD_ADDRESS: &str = "0x8dd5fbce2f6a956c3022ba3663759011dd51e73e";

/// ERC20-style ABI with a couple of extra events for type coverage.
pub const TUSD_ABI: &str = r#"[
  {"type":"function","name":"balanceOf","stateMutability":"view",
   "inputs":[{"name":"who","type":"address"}],
   "outputs":[{"name":"","type":"uint256"}]},
  {"type":"event","name":"Transfer","anonymous":false,"inputs":[
    {"name":"from","type":"address","indexed":true},
    {"name":"to","type":"address","indexed":true},
    {"name":"value","type":"uint256","indexed":false}]},
  {"type":"event","name":"Approval","anonymous":false,"inputs":[
    {"name":"owner","type":"address","indexed":true},
    {"name":"spender","type":"address","indexed":true},
    {"name":"value","type":"uint256","indexed":false}]},
  {"type":"event","name":"Mint","anonymous":false,"inputs":[
    {"name":"to","type":"address","indexed":true},
    {"name":"amount","type":"uint256","indexed":false}]},
  {"type":"event","name":"Note","anonymous":false,"inputs":[
    {"name":"sender","type":"address","indexed":true},
    {"name":"memo","type":"string","indexed":false},
    {"name":"flag","type":"bool","indexed":false},
    {"name":"payload","type":"bytes","indexed":false},
    {"name":"id","type":"bytes32","indexed":false},
    {"name":"delta","type":"int256","indexed":false}]},
  {"type":"event","name":"Batch","anonymous":false,"inputs":[
    {"name":"sender","type":"address","indexed":true},
    {"name":"values","type":"uint256[]","indexed":false}]},
  {"type":"event","name":"Sweep","anonymous":true,"inputs":[
    {"name":"to","type":"address","indexed":true},
    {"name":"amount","type":"uint256","indexed":false}]},
  {"type":"event","name":"Tagged","anonymous":false,"inputs":[
    {"name":"sender","type":"address","indexed":true},
    {"name":"tag","type":"string","indexed":true},
    {"name":"amount","type":"uint256","indexed":false}]}
]"#;

/// keccak256("Transfer(address,address,uint256)")
pub const TRANSFER_TOPIC: B256 =
    b256!("ddf252ad1be2c89b69c2b068fc378daa952ba7f163c4a11628f55a4df523b3ef");

/// keccak256("Approval(address,address,uint256)")
pub const APPROVAL_TOPIC: B256 =
    b256!("8c5be1e5ebec7d5bd14f71427d1e84f3dd0314c0f7b2291e5b200ac8c7c3b925");

pub const ALICE: Address = address!("f39fd6e51aad88f6f4ce6ab8827279cfffb92266");
pub const BOB: Address = address!("70997970c51812dc3a010c7d01b50e0d17dc79c8");

pub const TX_HASH: B256 =
    b256!("135391a0962a63944e5908e6fedfff90fb4be3e3290a21017861099bad6546ae");

pub fn tusd_abi() -> JsonAbi {
    serde_json::from_str(TUSD_ABI).unwrap()
}

/// TUSD contract watching the given events, both gates open.
pub fn tusd_contract(events: &[&str]) -> Contract {
    Contract::new(TUSD_ADDRESS, tusd_abi())
        .with_watched_events(events.iter().map(|e| e.to_string()).collect())
        .with_blocks(5197514, None)
}

/// Raw Transfer log from `from` to `to`.
pub fn transfer_log(from: Address, to: Address, value: u64) -> WatchedEvent {
    watched(
        "Transfer",
        vec![TRANSFER_TOPIC, from.into_word(), to.into_word()],
        DynSolValue::Uint(U256::from(value), 256).abi_encode(),
    )
}

/// Raw log for the named event with explicit topics and data.
pub fn watched(name: &str, topics: Vec<B256>, data: Vec<u8>) -> WatchedEvent {
    WatchedEvent {
        log_id: 1,
        name: name.to_string(),
        block_number: 5488076,
        address: TUSD_ADDRESS.parse().unwrap(),
        tx_hash: TX_HASH,
        index: 110,
        topics,
        data,
    }
}
