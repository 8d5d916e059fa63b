//! omnictl - contract event log indexing CLI
//!
//! Generates log filters for a configured contract and converts watched
//! logs into normalized, string-valued records.

use omni_indexer::cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
