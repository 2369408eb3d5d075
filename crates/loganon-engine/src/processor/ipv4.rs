//! IPv4 address processor.

use super::address::AddressMasker;
use super::LineProcessor;
use crate::codec::AddressFamily;
use crate::{AddressOptions, EngineConfig, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use std::borrow::Cow;

/// Dotted quad. Deliberately permissive on octet values (`999.1.1.1`
/// matches); out-of-range octets fall through to the codec fallback.
static IPV4_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(?:[0-9]{1,3}\.){3}[0-9]{1,3}\b").unwrap());

/// Masks the rightmost bits of every IPv4 address in a line.
#[derive(Debug, Clone)]
pub struct Ipv4Processor {
    inner: AddressMasker,
}

impl Ipv4Processor {
    pub const NAME: &'static str = "ipv4";

    /// Create a processor clearing `mask_bits` (1..=32) low-order bits.
    pub fn new(mask_bits: u32, include_private: bool) -> Result<Self> {
        Self::with_options(&AddressOptions {
            mask_bits,
            include_private,
        })
    }

    pub fn with_options(options: &AddressOptions) -> Result<Self> {
        let inner = AddressMasker::new(Self::NAME, AddressFamily::Ipv4, &IPV4_PATTERN, options)?;
        Ok(Self { inner })
    }
}

impl LineProcessor for Ipv4Processor {
    fn configure(config: &EngineConfig) -> Result<Self> {
        Self::with_options(&config.ipv4)
    }

    fn name(&self) -> &'static str {
        self.inner.name()
    }

    fn apply<'a>(&self, line: &'a str) -> Cow<'a, str> {
        self.inner.apply(line)
    }
}
