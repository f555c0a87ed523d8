//! IPv4 network ranges in CIDR notation.
//!
//! A `NetworkRange` is parsed once from operator input and then only
//! enumerated. Enumeration follows the usual CIDR host semantics: for
//! prefixes up to /30 the network and broadcast addresses are skipped, a /31
//! yields both of its addresses (point-to-point link) and a /32 yields its
//! single address.

use ipnetwork::{IpNetwork, Ipv4Network};
use std::fmt;
use std::net::Ipv4Addr;
use std::ops::RangeInclusive;
use std::str::FromStr;

/// Error type for network range parsing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NetworkError {
    #[error("invalid CIDR notation: '{0}'")]
    InvalidCidr(String),
    #[error("IPv6 networks are not supported: '{0}'")]
    Ipv6Unsupported(String),
    #[error("'{0}' has host bits set (did you mean {1}?)")]
    HostBitsSet(String, String),
    #[error("network range too large: {0} addresses (max: {1})")]
    TooLarge(u64, u64),
}

/// An IPv4 CIDR block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NetworkRange {
    network: Ipv4Network,
}

impl NetworkRange {
    /// Largest range accepted by default (a /16).
    pub const DEFAULT_MAX_ADDRESSES: u64 = 65536;

    /// Parse a CIDR block, rejecting ranges with more than `max_addresses`
    /// addresses.
    pub fn parse_with_limit(s: &str, max_addresses: u64) -> Result<Self, NetworkError> {
        let range: Self = s.parse()?;
        let size = range.address_count();
        if size > max_addresses {
            return Err(NetworkError::TooLarge(size, max_addresses));
        }
        Ok(range)
    }

    pub fn prefix(&self) -> u8 {
        self.network.prefix()
    }

    /// Total number of addresses in the block, including network and broadcast.
    pub fn address_count(&self) -> u64 {
        1u64 << (32 - u32::from(self.prefix()))
    }

    /// Number of usable host addresses yielded by [`hosts`](Self::hosts).
    pub fn host_count(&self) -> u64 {
        let bounds = self.host_bounds();
        u64::from(*bounds.end()) - u64::from(*bounds.start()) + 1
    }

    /// Usable host addresses in ascending order.
    ///
    /// The iterator is cheap to clone, so the sequence can be restarted.
    pub fn hosts(&self) -> impl Iterator<Item = Ipv4Addr> + Clone {
        self.host_bounds().map(Ipv4Addr::from)
    }

    fn host_bounds(&self) -> RangeInclusive<u32> {
        let first = u32::from(self.network.network());
        let last = u32::from(self.network.broadcast());
        if self.prefix() <= 30 {
            (first + 1)..=(last - 1)
        } else {
            first..=last
        }
    }
}

impl FromStr for NetworkRange {
    type Err = NetworkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let parsed: IpNetwork = s
            .parse()
            .map_err(|_| NetworkError::InvalidCidr(s.to_string()))?;

        let network = match parsed {
            IpNetwork::V4(net) => net,
            IpNetwork::V6(_) => return Err(NetworkError::Ipv6Unsupported(s.to_string())),
        };

        if network.ip() != network.network() {
            return Err(NetworkError::HostBitsSet(
                s.to_string(),
                format!("{}/{}", network.network(), network.prefix()),
            ));
        }

        Ok(Self { network })
    }
}

impl fmt::Display for NetworkRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.network.network(), self.network.prefix())
    }
}
