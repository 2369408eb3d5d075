//! Scan-and-mask logic shared by the IPv4 and IPv6 processors.

use super::{has_dotted_tail, is_embedded, splice, MatchSpan};
use crate::classify;
use crate::codec::{self, AddressFamily, AddressMask};
use crate::{AddressOptions, Result};
use regex::Regex;
use std::borrow::Cow;

#[derive(Debug, Clone)]
pub(crate) struct AddressMasker {
    name: &'static str,
    pattern: &'static Regex,
    mask: AddressMask,
    include_private: bool,
}

impl AddressMasker {
    pub(crate) fn new(
        name: &'static str,
        family: AddressFamily,
        pattern: &'static Regex,
        options: &AddressOptions,
    ) -> Result<Self> {
        Ok(Self {
            name,
            pattern,
            mask: AddressMask::new(family, options.mask_bits)?,
            include_private: options.include_private,
        })
    }

    pub(crate) fn name(&self) -> &'static str {
        self.name
    }

    fn family(&self) -> AddressFamily {
        self.mask.family()
    }

    /// Mask every address in `line`.
    ///
    /// A single private address (when private addresses are excluded)
    /// leaves the whole line untouched, including addresses before it.
    pub(crate) fn apply<'a>(&self, line: &'a str) -> Cow<'a, str> {
        let mut spans = Vec::new();

        for m in self.pattern.find_iter(line) {
            if is_embedded(line, m.start(), m.end()) {
                continue;
            }
            // A hex-only IPv6 reading cut short of an embedded dotted quad.
            if self.family() == AddressFamily::Ipv6 && has_dotted_tail(line, m.end()) {
                continue;
            }

            let token = m.as_str();
            if !self.include_private && classify::is_private(token, self.family()) {
                return Cow::Borrowed(line);
            }

            spans.push(MatchSpan::new(m.start(), m.end(), self.mask_token(token)));
        }

        splice(line, &spans)
    }

    /// Masked replacement text for one matched token. A zone index, if
    /// present, is carried over unchanged.
    pub(crate) fn mask_token(&self, token: &str) -> String {
        let family = self.family();
        let (address, zone) = match family {
            AddressFamily::Ipv4 => (token, None),
            AddressFamily::Ipv6 => codec::split_zone(token),
        };

        let value = codec::parse(address, family).unwrap_or_else(|err| {
            tracing::warn!(
                processor = self.name,
                token = %token,
                error = %err,
                "unparseable address, substituting default"
            );
            family.default_address()
        });

        let mut replacement = codec::format(self.mask.apply(value), family);
        if let Some(zone) = zone {
            replacement.push('%');
            replacement.push_str(zone);
        }
        replacement
    }
}
