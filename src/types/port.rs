//! Port types with validation and parsing.
//!
//! The `Port` newtype ensures values are always valid port numbers (1-65535).
//! `PortRange` and `PortSpec` handle textual port specifications.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// A validated TCP port number (1-65535).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Port(u16);

impl Port {
    /// Minimum valid port number.
    pub const MIN: u16 = 1;

    /// Create a new Port from a u16, returning None for port 0.
    #[inline]
    pub const fn new(port: u16) -> Option<Self> {
        if port >= Self::MIN {
            Some(Self(port))
        } else {
            None
        }
    }

    /// Get the raw port number.
    #[inline]
    pub const fn as_u16(self) -> u16 {
        self.0
    }
}

impl fmt::Display for Port {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<u16> for Port {
    type Error = PortError;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        Self::new(value).ok_or(PortError::OutOfRange(value.into()))
    }
}

impl From<Port> for u16 {
    fn from(port: Port) -> Self {
        port.0
    }
}

/// Error type for port parsing and validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PortError {
    #[error("port {0} is out of valid range (1-65535)")]
    OutOfRange(u32),
    #[error("invalid port number: '{0}'")]
    InvalidFormat(String),
    #[error("invalid port range: start ({0}) > end ({1})")]
    InvalidRange(u16, u16),
    #[error("empty port specification")]
    Empty,
}

/// An inclusive range of ports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PortRange {
    start: Port,
    end: Port,
}

impl PortRange {
    pub fn new(start: Port, end: Port) -> Result<Self, PortError> {
        if start > end {
            Err(PortError::InvalidRange(start.0, end.0))
        } else {
            Ok(Self { start, end })
        }
    }

    pub const fn single(port: Port) -> Self {
        Self {
            start: port,
            end: port,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = Port> {
        (self.start.0..=self.end.0).map(Port)
    }
}

impl fmt::Display for PortRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.start == self.end {
            write!(f, "{}", self.start)
        } else {
            write!(f, "{}-{}", self.start, self.end)
        }
    }
}

/// A port specification made of single ports and inclusive ranges.
///
/// Supports formats like:
/// - Single port: "80"
/// - Comma-separated: "80,443,8080"
/// - Range: "1-1000"
/// - Mixed: "22,80,443,8000-9000"
///
/// The default specification covers ports 1-1000.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortSpec {
    ranges: Vec<PortRange>,
}

impl PortSpec {
    /// Ports scanned when no specification is given.
    pub const DEFAULT: &'static str = "1-1000";

    /// Resolve an optional textual specification, falling back to the default.
    pub fn resolve(spec: Option<&str>) -> Result<Self, PortError> {
        match spec {
            Some(s) => s.parse(),
            None => Ok(Self::default()),
        }
    }

    /// Get all ports as a sorted, deduplicated vector.
    pub fn to_ports(&self) -> Vec<Port> {
        let mut ports: Vec<Port> = self.ranges.iter().flat_map(|r| r.iter()).collect();
        ports.sort_unstable();
        ports.dedup();
        ports
    }
}

impl Default for PortSpec {
    fn default() -> Self {
        Self {
            ranges: vec![PortRange {
                start: Port(1),
                end: Port(1000),
            }],
        }
    }
}

fn parse_port(text: &str) -> Result<Port, PortError> {
    let text = text.trim();
    let value: u32 = text
        .parse()
        .map_err(|_| PortError::InvalidFormat(text.to_string()))?;
    u16::try_from(value)
        .ok()
        .and_then(Port::new)
        .ok_or(PortError::OutOfRange(value))
}

impl FromStr for PortSpec {
    type Err = PortError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(PortError::Empty);
        }

        let mut ranges = Vec::new();
        for part in s.split(',') {
            let part = part.trim();
            let range = match part.split_once('-') {
                Some((start, end)) => {
                    if end.contains('-') {
                        return Err(PortError::InvalidFormat(part.to_string()));
                    }
                    PortRange::new(parse_port(start)?, parse_port(end)?)?
                }
                None => PortRange::single(parse_port(part)?),
            };
            ranges.push(range);
        }

        Ok(Self { ranges })
    }
}

impl fmt::Display for PortSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.ranges.iter().map(|r| r.to_string()).collect();
        write!(f, "{}", parts.join(","))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ports(spec: &str) -> Vec<u16> {
        spec.parse::<PortSpec>()
            .unwrap()
            .to_ports()
            .into_iter()
            .map(u16::from)
            .collect()
    }

    #[test]
    fn test_port_validation() {
        assert!(Port::new(0).is_none());
        assert!(Port::new(1).is_some());
        assert!(Port::new(65535).is_some());
        assert_eq!(Port::try_from(0), Err(PortError::OutOfRange(0)));
    }

    #[test]
    fn test_order_independent() {
        assert_eq!(ports("443,80"), vec![80, 443]);
        assert_eq!(ports("80,443"), vec![80, 443]);
    }

    #[test]
    fn test_dedup_across_range_and_literal() {
        assert_eq!(ports("1-3,2"), vec![1, 2, 3]);
        assert_eq!(ports("80,80,443,80"), vec![80, 443]);
    }

    #[test]
    fn test_mixed_with_whitespace() {
        assert_eq!(ports(" 22, 80 ,100 - 102"), vec![22, 80, 100, 101, 102]);
    }

    #[test]
    fn test_default_is_first_thousand() {
        let spec = PortSpec::resolve(None).unwrap();
        let all = spec.to_ports();
        assert_eq!(all.len(), 1000);
        assert_eq!(all.first().map(|p| p.as_u16()), Some(1));
        assert_eq!(all.last().map(|p| p.as_u16()), Some(1000));
        assert_eq!(spec.to_string(), PortSpec::DEFAULT);
    }

    #[test]
    fn test_rejections() {
        assert_eq!("".parse::<PortSpec>(), Err(PortError::Empty));
        assert_eq!("0".parse::<PortSpec>(), Err(PortError::OutOfRange(0)));
        assert_eq!("70000".parse::<PortSpec>(), Err(PortError::OutOfRange(70000)));
        assert_eq!("100-50".parse::<PortSpec>(), Err(PortError::InvalidRange(100, 50)));
        assert!(matches!("80,".parse::<PortSpec>(), Err(PortError::InvalidFormat(_))));
        assert!(matches!("abc".parse::<PortSpec>(), Err(PortError::InvalidFormat(_))));
        assert!(matches!("1-2-3".parse::<PortSpec>(), Err(PortError::InvalidFormat(_))));
    }

    #[test]
    fn test_display_roundtrips_ranges() {
        let spec: PortSpec = "80,443,1000-1100".parse().unwrap();
        assert_eq!(spec.to_string(), "80,443,1000-1100");
        assert_eq!(spec.to_ports().len(), 103);
    }
}
