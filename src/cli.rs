//! CLI implementation for omnictl
//!
//! Drives filter generation and log conversion offline, from a contract
//! config and a JSON file of watched logs. All commands output pretty JSON.

use crate::config::{load_address_list, ContractConfig};
use crate::contract::Contract;
use crate::converter::{Converter, LogConverter};
use crate::types::{Log, WatchedEvent};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use serde_json::json;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Contract event log indexing tool
#[derive(Parser)]
#[command(name = "omnictl")]
#[command(about = "Generate log filters and convert watched contract logs")]
pub struct Cli {
    /// Path to the contract config file (JSON)
    #[arg(short, long, default_value = "contract.json")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the log filters derived from the contract ABI
    Filters,
    /// Convert a file of watched logs into normalized records
    Convert {
        /// JSON array of watched logs
        #[arg(short, long)]
        logs: PathBuf,
        /// Event address allow-list file (one address per line), overrides the config
        #[arg(long)]
        event_addresses: Option<PathBuf>,
        /// Method address allow-list file (one address per line), overrides the config
        #[arg(long)]
        method_addresses: Option<PathBuf>,
    },
}

/// Outcome of converting a batch of watched logs.
#[derive(Debug, Default, Serialize)]
pub struct ConvertReport {
    /// Records that passed the event address gate
    pub logs: Vec<Log>,
    /// Logs dropped by the event address gate
    pub filtered: usize,
    /// Logs that failed to decode or convert
    pub failed: usize,
    /// Token holders cached after the batch
    pub token_holders: Vec<String>,
}

/// Convert every watched log, resolving its event by name.
///
/// Per-log failures are logged and counted, they never abort the batch.
pub fn convert_all(converter: &Converter, watched: &[WatchedEvent]) -> ConvertReport {
    let contract = converter.contract();
    let mut report = ConvertReport::default();

    for log in watched {
        let Some(event) = contract.events.get(&log.name) else {
            warn!("Log {}: event {} is not watched", log.log_id, log.name);
            report.failed += 1;
            continue;
        };

        match converter.convert(log, event) {
            Ok(Some(record)) => report.logs.push(record),
            Ok(None) => report.filtered += 1,
            Err(e) => {
                warn!("Log {}: {}", log.log_id, e);
                report.failed += 1;
            }
        }
    }

    report.token_holders = contract.token_holders();
    report
}

/// Load the contract described by the config file and derive its filters.
fn load_contract(path: &Path) -> Result<Contract> {
    let config = ContractConfig::load(path)?;
    let mut contract = config
        .into_contract()
        .with_context(|| format!("Failed to build contract from {:?}", path))?;
    contract
        .generate_filters()
        .context("Failed to generate filters")?;
    Ok(contract)
}

/// Read a JSON array of watched logs.
fn load_watched_events(path: &Path) -> Result<Vec<WatchedEvent>> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("Failed to read logs file: {:?}", path))?;
    serde_json::from_str(&contents).with_context(|| format!("Invalid watched logs in {:?}", path))
}

/// Run the CLI command and print JSON output.
pub fn run() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut contract = load_contract(&cli.config)?;
    info!(
        "Loaded contract {} ({}) with {} watched events",
        contract.address,
        contract.name,
        contract.events.len()
    );

    let result = match cli.command {
        Commands::Filters => json!({
            "address": contract.address,
            "filters": contract.filters,
        }),
        Commands::Convert {
            logs,
            event_addresses,
            method_addresses,
        } => {
            if let Some(path) = event_addresses {
                contract.event_addresses = load_address_list(&path)?;
            }
            if let Some(path) = method_addresses {
                contract.method_addresses = load_address_list(&path)?;
            }

            let watched = load_watched_events(&logs)?;
            let converter = Converter::new(Arc::new(contract));
            let report = convert_all(&converter, &watched);
            info!(
                "Converted {} logs: {} kept, {} filtered, {} failed",
                watched.len(),
                report.logs.len(),
                report.filtered,
                report.failed
            );
            serde_json::to_value(&report)?
        }
    };

    // Pretty print JSON
    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}
