//! IPv4 address and CIDR range arithmetic
//!
//! The semantic validator only needs static containment checks, so addresses
//! are packed into plain `u32` values and ranges are compared with integer
//! arithmetic. Range sizes are computed in `u64` because a `/0` range covers
//! 2^32 addresses.
//!
//! Copyright (c) 2025 Talospec Team
//! Licensed under the Apache-2.0 license

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Malformed IPv4 or CIDR literal. The offending text is carried verbatim so
/// the validation message can quote it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AddrParseError {
    /// Not a dotted-decimal IPv4 address
    #[error("'{0}' is not a valid IPv4 address")]
    Ipv4(String),

    /// Not `<address>/<prefix>` with a prefix in 0..=32
    #[error("'{0}' is not a valid CIDR")]
    Cidr(String),
}

/// Parse a dotted-decimal IPv4 address into its big-endian `u32` value.
///
/// Exactly four segments are required, each an integer in 0..=255.
pub fn parse_ipv4(text: &str) -> Result<u32, AddrParseError> {
    let octets: Vec<&str> = text.split('.').collect();
    if octets.len() != 4 {
        return Err(AddrParseError::Ipv4(text.to_string()));
    }

    let mut value: u32 = 0;
    for octet in octets {
        let part: u32 = octet
            .parse()
            .map_err(|_| AddrParseError::Ipv4(text.to_string()))?;
        if part > 255 {
            return Err(AddrParseError::Ipv4(text.to_string()));
        }
        value = (value << 8) | part;
    }
    Ok(value)
}

/// Render a packed address back to dotted-decimal notation.
pub fn format_ipv4(value: u32) -> String {
    format!(
        "{}.{}.{}.{}",
        value >> 24,
        (value >> 16) & 0xff,
        (value >> 8) & 0xff,
        value & 0xff
    )
}

/// An IPv4 CIDR range: canonical network base plus prefix length.
///
/// The base is canonicalized at parse time by masking the written address, so
/// `10.0.0.7/24` and `10.0.0.0/24` describe the same range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cidr {
    network: u32,
    prefix: u8,
}

impl Cidr {
    /// Parse `<address>/<prefix>` notation.
    ///
    /// A malformed address part surfaces as [`AddrParseError::Ipv4`] with the
    /// address literal; everything else about the notation surfaces as
    /// [`AddrParseError::Cidr`] with the full literal.
    pub fn parse(text: &str) -> Result<Self, AddrParseError> {
        let (address, prefix_text) = text
            .split_once('/')
            .ok_or_else(|| AddrParseError::Cidr(text.to_string()))?;
        if address.is_empty() || prefix_text.is_empty() {
            return Err(AddrParseError::Cidr(text.to_string()));
        }

        let prefix: u8 = prefix_text
            .parse()
            .map_err(|_| AddrParseError::Cidr(text.to_string()))?;
        if prefix > 32 {
            return Err(AddrParseError::Cidr(text.to_string()));
        }

        let address = parse_ipv4(address)?;
        Ok(Self {
            network: address & Self::mask(prefix),
            prefix,
        })
    }

    /// Canonical network base address.
    pub fn network(&self) -> u32 {
        self.network
    }

    /// Prefix length in 0..=32.
    pub fn prefix(&self) -> u8 {
        self.prefix
    }

    /// Whether `ip` falls inside this range.
    pub fn contains(&self, ip: u32) -> bool {
        let start = u64::from(self.network);
        let end = start + self.size() - 1;
        (u64::from(ip)) >= start && u64::from(ip) <= end
    }

    /// Number of addresses covered by the range; up to 2^32 for `/0`.
    fn size(&self) -> u64 {
        1u64 << (32 - self.prefix)
    }

    fn mask(prefix: u8) -> u32 {
        if prefix == 0 {
            0
        } else {
            u32::MAX << (32 - u32::from(prefix))
        }
    }
}

impl FromStr for Cidr {
    type Err = AddrParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Cidr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", format_ipv4(self.network), self.prefix)
    }
}
