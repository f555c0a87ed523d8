//! TCP connect probing.
//!
//! Uses the operating system's socket API to complete a full handshake.
//! Does not require elevated privileges. The connection is torn down as soon
//! as it is established; no data is exchanged.

use crate::scanner::traits::Connector;
use async_trait::async_trait;
use socket2::SockRef;
use std::net::{Shutdown, SocketAddrV4};
use std::time::Duration;
use tokio::net::TcpStream;
use tokio::time::timeout;
use tracing::trace;

/// Real-network TCP connect prober. Opens exactly one socket per probe.
#[derive(Debug, Clone, Copy, Default)]
pub struct TcpConnector;

impl TcpConnector {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Connector for TcpConnector {
    async fn probe(&self, addr: SocketAddrV4, limit: Duration) -> bool {
        match timeout(limit, TcpStream::connect(addr)).await {
            Ok(Ok(stream)) => {
                close(stream);
                true
            }
            Ok(Err(e)) => {
                trace!(%addr, error = %e, "connect failed");
                false
            }
            Err(_) => {
                trace!(%addr, "connect timed out");
                false
            }
        }
    }
}

/// Shut down both directions, then close. A failed shutdown is not an error.
fn close(stream: TcpStream) {
    if let Err(e) = SockRef::from(&stream).shutdown(Shutdown::Both) {
        trace!(error = %e, "shutdown failed");
    }
    drop(stream);
}
