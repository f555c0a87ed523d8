//! Scanner module - host discovery and TCP port scanning.
//!
//! The probers ([`TcpConnector`], [`IcmpPinger`], [`HostProber`]) each answer
//! a single yes/no question and never surface errors. [`PortScanner`] and
//! [`HostDiscovery`] fan them out over bounded pools on the tokio runtime,
//! and [`NetworkSweep`] sequences the two phases.

pub mod discovery;
pub mod host;
pub mod icmp;
mod pool;
pub mod ports;
pub mod sweep;
pub mod tcp;
pub mod traits;

#[cfg(test)]
pub(crate) mod testing;

pub use discovery::HostDiscovery;
pub use host::{HostProber, FALLBACK_PORTS};
pub use icmp::IcmpPinger;
pub use ports::PortScanner;
pub use sweep::{HostReport, NetworkSweep, SweepObserver, SweepOutcome};
pub use tcp::TcpConnector;
pub use traits::{Connector, Pinger};
