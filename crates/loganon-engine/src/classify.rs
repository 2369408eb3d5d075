//! Private/reserved address range classification.
//!
//! IPv4: RFC1918 (10/8, 172.16/12, 192.168/16), loopback (127/8),
//! link-local (169.254/16), "this network" (0/8), and shared address
//! space (100.64/10, RFC6598).
//!
//! IPv6: unspecified (::), loopback (::1), unique local (fc00::/7, RFC4193),
//! link-local (fe80::/10), deprecated site-local (fec0::/10), and
//! IPv4-mapped addresses whose embedded IPv4 address is private.

use crate::codec::{self, AddressFamily};

/// `(network, prefix_len)` pairs for private IPv4 blocks.
const PRIVATE_IPV4: &[(u32, u32)] = &[
    (0x0000_0000, 8),  // 0.0.0.0/8
    (0x0A00_0000, 8),  // 10.0.0.0/8
    (0x6440_0000, 10), // 100.64.0.0/10
    (0x7F00_0000, 8),  // 127.0.0.0/8
    (0xA9FE_0000, 16), // 169.254.0.0/16
    (0xAC10_0000, 12), // 172.16.0.0/12
    (0xC0A8_0000, 16), // 192.168.0.0/16
];

/// `(network, prefix_len)` pairs for private IPv6 blocks.
const PRIVATE_IPV6: &[(u128, u32)] = &[
    (0, 128),                                        // ::/128
    (1, 128),                                        // ::1/128
    (0xfc00_u128 << 112, 7),                         // fc00::/7
    (0xfe80_u128 << 112, 10),                        // fe80::/10
    (0xfec0_u128 << 112, 10),                        // fec0::/10
];

const IPV4_MAPPED_PREFIX: u128 = 0xffff << 32;

/// Whether `text` is an address of `family` inside a private/reserved range.
///
/// Text that does not parse is not private; the caller's invalid-address
/// fallback handles it.
pub fn is_private(text: &str, family: AddressFamily) -> bool {
    match codec::parse(text, family) {
        Ok(value) => match family {
            AddressFamily::Ipv4 => is_private_ipv4(value as u32),
            AddressFamily::Ipv6 => is_private_ipv6(value),
        },
        Err(_) => false,
    }
}

/// Private-range test on a numeric IPv4 address.
pub fn is_private_ipv4(addr: u32) -> bool {
    PRIVATE_IPV4
        .iter()
        .any(|&(network, prefix)| addr & prefix_mask_v4(prefix) == network)
}

/// Private-range test on a numeric IPv6 address.
pub fn is_private_ipv6(addr: u128) -> bool {
    if addr >> 32 == IPV4_MAPPED_PREFIX >> 32 {
        return is_private_ipv4(addr as u32);
    }
    PRIVATE_IPV6
        .iter()
        .any(|&(network, prefix)| addr & prefix_mask_v6(prefix) == network)
}

fn prefix_mask_v4(prefix: u32) -> u32 {
    u32::MAX.checked_shl(32 - prefix).unwrap_or(0)
}

fn prefix_mask_v6(prefix: u32) -> u128 {
    u128::MAX.checked_shl(128 - prefix).unwrap_or(0)
}
