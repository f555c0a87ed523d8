//! Core input types: validated ports, port specifications and IPv4 ranges.
//!
//! These are parsed once from operator input and stay read-only for the run.

mod network;
mod port;

pub use network::{NetworkError, NetworkRange};
pub use port::{Port, PortError, PortRange, PortSpec};
