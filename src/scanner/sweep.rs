//! Discovery followed by per-host port scans.
//!
//! A sweep runs host discovery once, then scans the live hosts one at a
//! time in ascending order. Only the probes inside a phase run concurrently.
//! Progress is pushed to a [`SweepObserver`] as each phase completes so a
//! presentation layer can render results host by host.

use crate::scanner::discovery::HostDiscovery;
use crate::scanner::ports::PortScanner;
use crate::scanner::traits::{Connector, Pinger};
use crate::types::{NetworkRange, Port};
use async_trait::async_trait;
use serde::Serialize;
use std::net::Ipv4Addr;
use tracing::info;

/// Open ports found on one live host. An empty list means the host was
/// scanned and nothing answered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HostReport {
    pub host: Ipv4Addr,
    pub open_ports: Vec<Port>,
}

/// How a sweep ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SweepOutcome {
    /// Discovery found nothing; no port scans were run.
    NoActiveHosts,
    /// One report per live host, in ascending host order.
    Scanned(Vec<HostReport>),
}

impl SweepOutcome {
    pub fn reports(&self) -> &[HostReport] {
        match self {
            Self::NoActiveHosts => &[],
            Self::Scanned(reports) => reports,
        }
    }
}

/// Receives sweep progress. Every method defaults to doing nothing.
#[async_trait]
pub trait SweepObserver: Send {
    async fn discovery_started(&mut self, _range: &NetworkRange) {}

    async fn hosts_discovered(&mut self, _hosts: &[Ipv4Addr]) {}

    async fn host_scan_started(&mut self, _host: Ipv4Addr, _port_count: usize) {}

    async fn host_scanned(&mut self, _report: &HostReport) {}
}

#[async_trait]
impl SweepObserver for () {}

/// Sequences host discovery and port scanning.
pub struct NetworkSweep<P, C> {
    discovery: HostDiscovery<P, C>,
    scanner: PortScanner<C>,
}

impl<P, C> NetworkSweep<P, C>
where
    P: Pinger + 'static,
    C: Connector + 'static,
{
    pub fn new(discovery: HostDiscovery<P, C>, scanner: PortScanner<C>) -> Self {
        Self { discovery, scanner }
    }

    pub async fn run<O: SweepObserver>(
        &self,
        range: &NetworkRange,
        ports: &[Port],
        observer: &mut O,
    ) -> SweepOutcome {
        observer.discovery_started(range).await;
        let hosts = self.discovery.discover(range).await;
        observer.hosts_discovered(&hosts).await;

        if hosts.is_empty() {
            info!(%range, "no active hosts");
            return SweepOutcome::NoActiveHosts;
        }

        let mut reports = Vec::with_capacity(hosts.len());
        for host in hosts {
            observer.host_scan_started(host, ports.len()).await;
            let open_ports = self.scanner.scan(host, ports).await;
            let report = HostReport { host, open_ports };
            observer.host_scanned(&report).await;
            reports.push(report);
        }

        SweepOutcome::Scanned(reports)
    }
}
