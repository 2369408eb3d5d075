//! IPv6 address processor.

use super::address::AddressMasker;
use super::LineProcessor;
use crate::codec::AddressFamily;
use crate::{AddressOptions, EngineConfig, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use std::borrow::Cow;

/// RFC 4291 text forms: full, `::`-compressed, and IPv4-embedded, with an
/// optional `%zone` suffix.
///
/// The regex engine takes the first alternative that matches at the leftmost
/// position, so the order below puts the longest possible reading first:
/// embedded IPv4 before plain hex groups, and compressed forms by ascending
/// number of groups before the `::`.
static IPV6_PATTERN: Lazy<Regex> = Lazy::new(|| {
    let h = "[0-9a-fA-F]{1,4}";
    let octet = "(?:25[0-5]|2[0-4][0-9]|1[0-9]{2}|[1-9]?[0-9])";
    let v4 = format!(r"(?:{octet}\.){{3}}{octet}");

    let alternatives = [
        format!("(?:{h}:){{6}}{v4}"),
        format!("(?:{h}:){{1,5}}(?::{h}){{0,4}}:{v4}"),
        format!("::(?:{h}:){{0,5}}{v4}"),
        format!("(?:{h}:){{7}}{h}"),
        format!("{h}:(?::{h}){{1,6}}"),
        format!("(?:{h}:){{1,2}}(?::{h}){{1,5}}"),
        format!("(?:{h}:){{1,3}}(?::{h}){{1,4}}"),
        format!("(?:{h}:){{1,4}}(?::{h}){{1,3}}"),
        format!("(?:{h}:){{1,5}}(?::{h}){{1,2}}"),
        format!("(?:{h}:){{1,6}}:{h}"),
        format!("(?:{h}:){{1,7}}:"),
        format!(":(?:(?::{h}){{1,7}}|:)"),
    ];

    Regex::new(&format!(
        "(?:{})(?:%[0-9A-Za-z]+)?",
        alternatives.join("|")
    ))
    .unwrap()
});

/// Masks the rightmost bits of every IPv6 address in a line.
#[derive(Debug, Clone)]
pub struct Ipv6Processor {
    pub(super) inner: AddressMasker,
}

impl Ipv6Processor {
    pub const NAME: &'static str = "ipv6";

    /// Create a processor clearing `mask_bits` (1..=128) low-order bits.
    pub fn new(mask_bits: u32, include_private: bool) -> Result<Self> {
        Self::with_options(&AddressOptions {
            mask_bits,
            include_private,
        })
    }

    pub fn with_options(options: &AddressOptions) -> Result<Self> {
        let inner = AddressMasker::new(Self::NAME, AddressFamily::Ipv6, &IPV6_PATTERN, options)?;
        Ok(Self { inner })
    }
}

impl LineProcessor for Ipv6Processor {
    fn configure(config: &EngineConfig) -> Result<Self> {
        Self::with_options(&config.ipv6)
    }

    fn name(&self) -> &'static str {
        self.inner.name()
    }

    fn apply<'a>(&self, line: &'a str) -> Cow<'a, str> {
        self.inner.apply(line)
    }
}
