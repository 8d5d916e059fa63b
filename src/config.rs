//! Contract configuration and address list loading
//!
//! A contract is described by a JSON file naming its address, ABI file,
//! block range, watched events and the two address gates. Address gates can
//! also be supplied as plain lists, one address per line.

use crate::contract::Contract;
use crate::filter::{canonical_address, AddressFilter};
use alloy_json_abi::JsonAbi;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// On-disk description of a tracked contract.
///
/// # Example file format:
/// ```json
/// {
///   "name": "TrueUSD",
///   "network": "mainnet",
///   "address": "0x8dd5fbce2f6a956c3022ba3663759011dd51e73e",
///   "abi_path": "tusd.json",
///   "starting_block": 5197514,
///   "events": ["Transfer", "Approval"],
///   "event_addresses": "allow_all",
///   "method_addresses": { "allow_list": ["0x70997970c51812dc3a010c7d01b50e0d17dc79c8"] }
/// }
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct ContractConfig {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub network: String,
    /// Contract address (hex, with or without 0x prefix)
    pub address: String,
    /// ABI file, relative paths resolve against the config file's directory
    pub abi_path: PathBuf,
    #[serde(default)]
    pub starting_block: u64,
    #[serde(default)]
    pub last_block: Option<u64>,
    /// Events to watch, empty watches all
    #[serde(default)]
    pub events: Vec<String>,
    #[serde(default)]
    pub event_addresses: AddressFilter,
    #[serde(default)]
    pub method_addresses: AddressFilter,
}

impl ContractConfig {
    /// Read a contract configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read contract config: {:?}", path))?;
        let mut config: Self = serde_json::from_str(&contents)
            .with_context(|| format!("Invalid contract config: {:?}", path))?;

        if config.abi_path.is_relative() {
            if let Some(dir) = path.parent() {
                config.abi_path = dir.join(&config.abi_path);
            }
        }
        Ok(config)
    }

    /// Build the contract, reading its ABI from disk.
    pub fn into_contract(self) -> Result<Contract> {
        let abi = load_abi(&self.abi_path)?;
        Ok(Contract::new(&self.address, abi)
            .with_name(self.name, self.network)
            .with_blocks(self.starting_block, self.last_block)
            .with_watched_events(self.events)
            .with_event_addresses(self.event_addresses)
            .with_method_addresses(self.method_addresses))
    }
}

/// Parse a JSON ABI file.
pub fn load_abi(path: &Path) -> Result<JsonAbi> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("Failed to read ABI file: {:?}", path))?;
    serde_json::from_str(&contents).with_context(|| format!("Invalid ABI JSON in {:?}", path))
}

/// Load an allow-list gate from a file.
///
/// Each line holds one address in hex format (with or without 0x prefix).
/// Empty lines and lines starting with '#' are ignored.
pub fn load_address_list(path: &Path) -> Result<AddressFilter> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read address list: {:?}", path))?;

    let mut addresses = Vec::new();
    for (line_num, line) in contents.lines().enumerate() {
        let line = line.trim();

        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let addr = parse_address(line)
            .with_context(|| format!("Invalid address on line {}: {}", line_num + 1, line))?;
        addresses.push(addr);
    }

    if addresses.is_empty() {
        anyhow::bail!("Address list is empty (no valid addresses found)");
    }

    Ok(AddressFilter::allow_list(addresses))
}

/// Parse a hex address into its checksummed form.
fn parse_address(s: &str) -> Result<String> {
    let hex = s.strip_prefix("0x").unwrap_or(s);
    if hex.len() != 40 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        anyhow::bail!("Address must be 40 hex chars, got {:?}", s);
    }
    Ok(canonical_address(s))
}
