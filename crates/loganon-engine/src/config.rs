//! Engine configuration.
//!
//! Supplied once by the caller before any line is processed; immutable
//! afterwards. Can be loaded from a JSON file, with every field optional.

use crate::codec::{AddressFamily, AddressMask};
use crate::processor::email::DEFAULT_EMAIL_RATIO;
use crate::{AnonError, ProcessorKind, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Per-family address masking options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressOptions {
    /// Rightmost bits cleared in each address.
    pub mask_bits: u32,

    /// Whether private-range addresses are anonymized too.
    #[serde(default)]
    pub include_private: bool,
}

impl AddressOptions {
    pub fn ipv4_default() -> Self {
        Self {
            mask_bits: 8,
            include_private: false,
        }
    }

    pub fn ipv6_default() -> Self {
        Self {
            mask_bits: 64,
            include_private: false,
        }
    }
}

/// Email redaction options.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EmailOptions {
    /// Share of the local-part (prefix) and domain (suffix) that is kept.
    #[serde(default = "default_ratio")]
    pub ratio: f64,
}

fn default_ratio() -> f64 {
    DEFAULT_EMAIL_RATIO
}

impl Default for EmailOptions {
    fn default() -> Self {
        Self {
            ratio: DEFAULT_EMAIL_RATIO,
        }
    }
}

/// Complete engine configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Processors to run, by registry name.
    #[serde(default = "default_processors")]
    pub processors: Vec<String>,

    #[serde(default = "AddressOptions::ipv4_default")]
    pub ipv4: AddressOptions,

    #[serde(default = "AddressOptions::ipv6_default")]
    pub ipv6: AddressOptions,

    #[serde(default)]
    pub email: EmailOptions,
}

fn default_processors() -> Vec<String> {
    ProcessorKind::ALL
        .iter()
        .map(|kind| kind.name().to_string())
        .collect()
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            processors: default_processors(),
            ipv4: AddressOptions::ipv4_default(),
            ipv6: AddressOptions::ipv6_default(),
            email: EmailOptions::default(),
        }
    }
}

impl EngineConfig {
    /// Load a configuration from a JSON file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: EngineConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save the configuration as pretty JSON.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Check mask ranges and the email ratio.
    ///
    /// Processor names are checked against a registry when the pipeline is
    /// built, not here.
    pub fn validate(&self) -> Result<()> {
        AddressMask::new(AddressFamily::Ipv4, self.ipv4.mask_bits)?;
        AddressMask::new(AddressFamily::Ipv6, self.ipv6.mask_bits)?;
        if !(0.0..=1.0).contains(&self.email.ratio) {
            return Err(AnonError::InvalidRatio(self.email.ratio));
        }
        Ok(())
    }

    /// Select processors by name (replaces the current selection).
    pub fn with_processors<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.processors = names.into_iter().map(Into::into).collect();
        self
    }
}
