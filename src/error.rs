//! Error types for filter generation and log conversion
//!
//! Every error here is per-item: a failed conversion drops one log and leaves
//! the contract state untouched. Logs rejected by the address gates are not
//! errors at all, they come back as `Ok(None)` from the converter.

use thiserror::Error;

/// Errors produced by the contract filter model and the log converter.
#[derive(Debug, Error)]
pub enum Error {
    /// The contract has no interface description to derive filters from.
    #[error("contract {address} has no ABI events or methods, cannot generate filters")]
    Configuration {
        /// Address of the misconfigured contract
        address: String,
    },

    /// The raw log does not match the expected event layout.
    #[error("failed to decode log {log_id} as event {event}: {reason}")]
    Decode {
        /// Event the log was decoded against
        event: String,
        /// Identifier of the offending log
        log_id: i64,
        /// Underlying decoder message
        reason: String,
    },

    /// A decoded field has a type with no string representation.
    #[error("unhandled abi type {ty} for field {field}")]
    Conversion {
        /// Name of the event field
        field: String,
        /// Solidity type of the field
        ty: String,
    },
}

impl Error {
    /// Build a decode error for the given log and event.
    pub fn decode(event: &str, log_id: i64, reason: impl ToString) -> Self {
        Self::Decode {
            event: event.to_string(),
            log_id,
            reason: reason.to_string(),
        }
    }
}

/// Result alias used throughout the library.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_name_the_culprit() {
        let err = Error::Conversion {
            field: "values".to_string(),
            ty: "uint256[]".to_string(),
        };
        assert_eq!(err.to_string(), "unhandled abi type uint256[] for field values");

        let err = Error::decode("Transfer", 7, "topic count mismatch");
        assert!(err.to_string().contains("log 7"));
        assert!(err.to_string().contains("Transfer"));
    }
}
