//! Address codec: textual IPv4/IPv6 addresses to fixed-width integers and back.
//!
//! Addresses are held as `u128` in network byte order regardless of family;
//! IPv4 values only ever occupy the low 32 bits. All arithmetic is unsigned,
//! so shifting and masking never sign-extend.

use crate::{AnonError, Result};
use serde::{Deserialize, Serialize};
use std::net::{Ipv4Addr, Ipv6Addr};

/// IP address family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AddressFamily {
    Ipv4,
    Ipv6,
}

impl AddressFamily {
    /// Bit width of an address in this family.
    pub fn width(self) -> u32 {
        match self {
            AddressFamily::Ipv4 => 32,
            AddressFamily::Ipv6 => 128,
        }
    }

    /// All bits of the family's width set.
    pub fn full_mask(self) -> u128 {
        match self {
            AddressFamily::Ipv4 => u32::MAX as u128,
            AddressFamily::Ipv6 => u128::MAX,
        }
    }

    /// Substitute used when a matched token does not parse
    /// (`0.0.0.0` or `::`).
    pub fn default_address(self) -> u128 {
        0
    }
}

impl std::fmt::Display for AddressFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AddressFamily::Ipv4 => write!(f, "IPv4"),
            AddressFamily::Ipv6 => write!(f, "IPv6"),
        }
    }
}

/// Split an IPv6 literal into address and optional zone index
/// (`fe80::1%eth0` -> `("fe80::1", Some("eth0"))`).
pub fn split_zone(text: &str) -> (&str, Option<&str>) {
    match text.split_once('%') {
        Some((addr, zone)) => (addr, Some(zone)),
        None => (text, None),
    }
}

/// Parse a textual address of `family` into its integer value.
///
/// IPv6 zone indices are stripped first; they carry no numeric value.
pub fn parse(text: &str, family: AddressFamily) -> Result<u128> {
    let invalid = || AnonError::InvalidAddress {
        text: text.to_string(),
        family,
    };

    match family {
        AddressFamily::Ipv4 => text
            .parse::<Ipv4Addr>()
            .map(|addr| u32::from(addr) as u128)
            .map_err(|_| invalid()),
        AddressFamily::Ipv6 => {
            let (addr, _zone) = split_zone(text);
            addr.parse::<Ipv6Addr>()
                .map(u128::from)
                .map_err(|_| invalid())
        }
    }
}

/// Format an integer as an address of `family`.
///
/// Bits above the family's width are ignored, so this never fails.
pub fn format(value: u128, family: AddressFamily) -> String {
    match family {
        AddressFamily::Ipv4 => Ipv4Addr::from((value & family.full_mask()) as u32).to_string(),
        AddressFamily::Ipv6 => Ipv6Addr::from(value).to_string(),
    }
}

/// Mask clearing the rightmost `bits` bits of an address.
///
/// Invariant: `value == full_mask << bits` truncated to the family width.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddressMask {
    family: AddressFamily,
    bits: u32,
    value: u128,
}

impl AddressMask {
    /// Build a mask, validating `1 <= bits <= width`.
    pub fn new(family: AddressFamily, bits: u32) -> Result<Self> {
        let width = family.width();
        if bits == 0 || bits > width {
            return Err(AnonError::InvalidMask {
                family,
                bits,
                width,
            });
        }

        // A shift by the full width would overflow; the mask is then empty.
        let full = family.full_mask();
        let value = full.checked_shl(bits).unwrap_or(0) & full;

        Ok(Self {
            family,
            bits,
            value,
        })
    }

    pub fn family(&self) -> AddressFamily {
        self.family
    }

    /// Number of cleared low-order bits.
    pub fn bits(&self) -> u32 {
        self.bits
    }

    /// The raw mask value.
    pub fn value(&self) -> u128 {
        self.value
    }

    /// Clear the masked bits of `address`.
    pub fn apply(&self, address: u128) -> u128 {
        address & self.value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ipv4() {
        assert_eq!(parse("0.0.0.0", AddressFamily::Ipv4).unwrap(), 0);
        assert_eq!(parse("203.0.113.42", AddressFamily::Ipv4).unwrap(), 0xCB00_712A);
        assert_eq!(
            parse("255.255.255.255", AddressFamily::Ipv4).unwrap(),
            u32::MAX as u128
        );
    }

    #[test]
    fn test_parse_ipv4_invalid() {
        for text in ["256.1.1.1", "1.2.3", "999.999.999.999", "a.b.c.d"] {
            let err = parse(text, AddressFamily::Ipv4).unwrap_err();
            assert!(matches!(err, AnonError::InvalidAddress { .. }), "{}", text);
        }
    }

    #[test]
    fn test_parse_ipv6() {
        assert_eq!(parse("::", AddressFamily::Ipv6).unwrap(), 0);
        assert_eq!(parse("::1", AddressFamily::Ipv6).unwrap(), 1);
        assert_eq!(
            parse("fe80::1", AddressFamily::Ipv6).unwrap(),
            0xfe80_0000_0000_0000_0000_0000_0000_0001
        );
    }

    #[test]
    fn test_parse_ipv6_strips_zone() {
        assert_eq!(
            parse("fe80::1%eth0", AddressFamily::Ipv6).unwrap(),
            parse("fe80::1", AddressFamily::Ipv6).unwrap()
        );
    }

    #[test]
    fn test_parse_ipv6_invalid() {
        let err = parse("1:2:3:4:5:6:7:8:9", AddressFamily::Ipv6).unwrap_err();
        assert!(matches!(
            err,
            AnonError::InvalidAddress {
                family: AddressFamily::Ipv6,
                ..
            }
        ));
    }

    #[test]
    fn test_format() {
        assert_eq!(format(0xCB00_7100, AddressFamily::Ipv4), "203.0.113.0");
        assert_eq!(format(0, AddressFamily::Ipv4), "0.0.0.0");
        assert_eq!(format(0, AddressFamily::Ipv6), "::");
        assert_eq!(
            format(0xfe80 << 112, AddressFamily::Ipv6),
            "fe80::"
        );
    }

    #[test]
    fn test_format_ignores_high_bits_for_ipv4() {
        let value = (1u128 << 40) | 0x0A00_0001;
        assert_eq!(format(value, AddressFamily::Ipv4), "10.0.0.1");
    }

    #[test]
    fn test_split_zone() {
        assert_eq!(split_zone("fe80::1%eth0"), ("fe80::1", Some("eth0")));
        assert_eq!(split_zone("2001:db8::1"), ("2001:db8::1", None));
    }

    #[test]
    fn test_mask_values() {
        assert_eq!(
            AddressMask::new(AddressFamily::Ipv4, 8).unwrap().value(),
            0xFFFF_FF00
        );
        assert_eq!(AddressMask::new(AddressFamily::Ipv4, 32).unwrap().value(), 0);
        assert_eq!(
            AddressMask::new(AddressFamily::Ipv6, 64).unwrap().value(),
            0xFFFF_FFFF_FFFF_FFFF_0000_0000_0000_0000
        );
        assert_eq!(AddressMask::new(AddressFamily::Ipv6, 128).unwrap().value(), 0);
        assert_eq!(
            AddressMask::new(AddressFamily::Ipv6, 1).unwrap().value(),
            u128::MAX - 1
        );
    }

    #[test]
    fn test_mask_rejects_out_of_range() {
        assert!(AddressMask::new(AddressFamily::Ipv4, 0).is_err());
        assert!(AddressMask::new(AddressFamily::Ipv4, 33).is_err());
        assert!(AddressMask::new(AddressFamily::Ipv6, 0).is_err());
        assert!(AddressMask::new(AddressFamily::Ipv6, 129).is_err());
    }

    #[test]
    fn test_mask_apply() {
        let mask = AddressMask::new(AddressFamily::Ipv4, 8).unwrap();
        let addr = parse("203.0.113.42", AddressFamily::Ipv4).unwrap();
        assert_eq!(format(mask.apply(addr), AddressFamily::Ipv4), "203.0.113.0");
    }
}
