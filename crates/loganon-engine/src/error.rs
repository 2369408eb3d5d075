//! Error types for the anonymization engine.

use crate::AddressFamily;
use thiserror::Error;

/// Result type for engine operations.
pub type Result<T> = std::result::Result<T, AnonError>;

/// Errors that can occur while configuring or running the engine.
#[derive(Error, Debug)]
pub enum AnonError {
    /// Text matched an address pattern but is not a valid address.
    /// Processors recover from this locally; it never aborts a run.
    #[error("invalid {family} address: {text:?}")]
    InvalidAddress { text: String, family: AddressFamily },

    /// A requested processor name is not in the registry.
    #[error("unknown processor '{name}' (valid processors: {valid})")]
    UnknownProcessor { name: String, valid: String },

    /// Mask width outside `1..=width` for the address family.
    #[error("invalid {family} mask: {bits} bits (expected 1..={width})")]
    InvalidMask {
        family: AddressFamily,
        bits: u32,
        width: u32,
    },

    /// Email keep-ratio outside `0.0..=1.0`.
    #[error("invalid email ratio: {0} (expected 0.0..=1.0)")]
    InvalidRatio(f64),

    /// Failed to load or validate configuration.
    #[error("config error: {0}")]
    ConfigError(String),

    /// I/O error while streaming or reading configuration.
    #[error("io error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON parsing error.
    #[error("json error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl AnonError {
    /// Whether this error stems from configuration rather than data or I/O.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            AnonError::UnknownProcessor { .. }
                | AnonError::InvalidMask { .. }
                | AnonError::InvalidRatio(_)
                | AnonError::ConfigError(_)
                | AnonError::JsonError(_)
        )
    }
}
