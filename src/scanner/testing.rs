//! In-memory network used by the scanner tests.

use super::traits::{Connector, Pinger};
use crate::error::{ScanError, ScanResult};
use async_trait::async_trait;
use std::collections::HashSet;
use std::net::{Ipv4Addr, SocketAddrV4};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

/// Accepts TCP connections only on the listed addresses and answers echo
/// requests only from the listed hosts. Records every call.
#[derive(Default)]
pub(crate) struct FakeNetwork {
    open: HashSet<SocketAddrV4>,
    echo_hosts: HashSet<Ipv4Addr>,
    icmp_unavailable: bool,
    echo_error: Option<fn() -> ScanError>,
    delay: Duration,
    connects: Mutex<Vec<SocketAddrV4>>,
    echoes: Mutex<Vec<Ipv4Addr>>,
    in_flight: AtomicUsize,
    peak: AtomicUsize,
}

impl FakeNetwork {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_open(mut self, host: Ipv4Addr, port: u16) -> Self {
        self.open.insert(SocketAddrV4::new(host, port));
        self
    }

    pub(crate) fn with_echo(mut self, host: Ipv4Addr) -> Self {
        self.echo_hosts.insert(host);
        self
    }

    pub(crate) fn without_icmp(mut self) -> Self {
        self.icmp_unavailable = true;
        self
    }

    /// Fail echoes to unlisted hosts with `make()` instead of a timeout.
    pub(crate) fn with_echo_error(mut self, make: fn() -> ScanError) -> Self {
        self.echo_error = Some(make);
        self
    }

    /// Make each connect attempt take `delay`, so overlapping probes are observable.
    pub(crate) fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub(crate) fn connects(&self) -> Vec<SocketAddrV4> {
        self.connects.lock().unwrap().clone()
    }

    pub(crate) fn echoes(&self) -> Vec<Ipv4Addr> {
        self.echoes.lock().unwrap().clone()
    }

    /// Highest number of connect probes observed in flight at once.
    pub(crate) fn peak_in_flight(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Connector for FakeNetwork {
    async fn probe(&self, addr: SocketAddrV4, _timeout: Duration) -> bool {
        self.connects.lock().unwrap().push(addr);
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        self.open.contains(&addr)
    }
}

#[async_trait]
impl Pinger for FakeNetwork {
    fn is_available(&self) -> bool {
        !self.icmp_unavailable
    }

    async fn echo(&self, host: Ipv4Addr, _timeout: Duration) -> ScanResult<()> {
        self.echoes.lock().unwrap().push(host);
        if self.echo_hosts.contains(&host) {
            Ok(())
        } else {
            Err(self.echo_error.map_or(ScanError::Timeout, |make| make()))
        }
    }
}
