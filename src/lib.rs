//! # netsweep - Subnet Host Discovery and Port Scanning
//!
//! netsweep finds live hosts on an IPv4 subnet and lists the open TCP ports
//! on each of them.
//!
//! ## How It Works
//!
//! - **Host discovery**: every usable address in the range is probed with an
//!   ICMP echo, falling back to TCP connects on ports 80, 443, 22 and 445
//!   when raw sockets are unavailable or the echo gets no answer. At most 50
//!   hosts are probed at once.
//! - **Port scanning**: each live host, in ascending order, gets a TCP
//!   connect scan with at most 50 ports in flight.
//! - Results are always sorted, whatever order the probes finish in.
//!
//! ## Example Usage
//!
//! ```rust,ignore
//! use netsweep::scanner::{HostDiscovery, HostProber, IcmpPinger, NetworkSweep, PortScanner, TcpConnector};
//! use netsweep::types::{NetworkRange, PortSpec};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() {
//!     let range: NetworkRange = "192.168.1.0/24".parse().unwrap();
//!     let ports = PortSpec::resolve(Some("22,80,443")).unwrap().to_ports();
//!
//!     let connector = Arc::new(TcpConnector::new());
//!     let prober = HostProber::new(Arc::new(IcmpPinger::new()), Arc::clone(&connector));
//!     let sweep = NetworkSweep::new(HostDiscovery::new(prober), PortScanner::new(connector));
//!
//!     for report in sweep.run(&range, &ports, &mut ()).await.reports() {
//!         println!("{}: {:?}", report.host, report.open_ports);
//!     }
//! }
//! ```
//!
//! ## Architecture
//!
//! - [`types`] - Validated ports, port specifications and network ranges
//! - [`scanner`] - Probers, bounded fan-out and the discovery/scan sequence
//! - [`net`] - Interface listing and reverse DNS
//! - [`config`] - Optional settings file
//! - [`error`] - Error types
//! - [`output`] - Plain, JSON and CSV rendering

pub mod cli;
pub mod config;
pub mod error;
pub mod net;
pub mod output;
pub mod scanner;
pub mod types;

// Re-export commonly used types
pub use error::{CliError, ScanError};
pub use scanner::{HostReport, NetworkSweep, SweepOutcome};
pub use types::{NetworkRange, Port, PortSpec};
