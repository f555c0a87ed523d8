//! Transport abstractions used by the probers.
//!
//! The probers never touch sockets directly; they go through these traits so
//! the probing policy (timeouts, fallback order, concurrency bounds) can be
//! exercised against an in-memory network in tests.

use crate::error::ScanResult;
use async_trait::async_trait;
use std::net::{Ipv4Addr, SocketAddrV4};
use std::time::Duration;

/// TCP reachability probe for a single address.
#[async_trait]
pub trait Connector: Send + Sync {
    /// Returns `true` iff a TCP handshake with `addr` completes within `timeout`.
    ///
    /// Refusals, timeouts and socket errors all yield `false`.
    async fn probe(&self, addr: SocketAddrV4, timeout: Duration) -> bool;
}

/// ICMP echo probe for a single host.
#[async_trait]
pub trait Pinger: Send + Sync {
    /// Whether echo probes can be attempted at all (e.g. raw socket privilege).
    fn is_available(&self) -> bool {
        true
    }

    /// Send one echo request and wait up to `timeout` for the reply.
    async fn echo(&self, host: Ipv4Addr, timeout: Duration) -> ScanResult<()>;
}
