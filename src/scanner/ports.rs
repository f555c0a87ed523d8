//! Port scanning for a single host.

use crate::scanner::pool::probe_all;
use crate::scanner::traits::Connector;
use crate::types::Port;
use std::net::{Ipv4Addr, SocketAddrV4};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Fans a port list out to a [`Connector`] and collects the open ports.
///
/// Never runs more than `min(max_concurrency, ports.len())` probes at once.
pub struct PortScanner<C> {
    connector: Arc<C>,
    timeout: Duration,
    max_concurrency: usize,
}

impl<C: Connector + 'static> PortScanner<C> {
    /// Upper bound on concurrent probes per host.
    pub const MAX_CONCURRENCY: usize = 50;
    /// Connect timeout per port.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(2);

    pub fn new(connector: Arc<C>) -> Self {
        Self {
            connector,
            timeout: Self::DEFAULT_TIMEOUT,
            max_concurrency: Self::MAX_CONCURRENCY,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_max_concurrency(mut self, max_concurrency: usize) -> Self {
        self.max_concurrency = max_concurrency.max(1);
        self
    }

    /// Number of probes allowed in flight for a scan of `port_count` ports.
    pub fn concurrency_for(&self, port_count: usize) -> usize {
        self.max_concurrency.min(port_count)
    }

    /// Scan `ports` on `host` and return the open ones in ascending order.
    pub async fn scan(&self, host: Ipv4Addr, ports: &[Port]) -> Vec<Port> {
        if ports.is_empty() {
            return Vec::new();
        }

        let limit = self.concurrency_for(ports.len());
        let started = Instant::now();
        debug!(%host, ports = ports.len(), concurrency = limit, "port scan started");

        let connector = Arc::clone(&self.connector);
        let timeout = self.timeout;
        let open = probe_all(ports.iter().copied(), limit, move |port: Port| {
            let connector = Arc::clone(&connector);
            async move {
                connector
                    .probe(SocketAddrV4::new(host, port.as_u16()), timeout)
                    .await
            }
        })
        .await;

        info!(
            %host,
            scanned = ports.len(),
            open = open.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "port scan finished"
        );
        open
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scanner::testing::FakeNetwork;
    use crate::types::PortSpec;

    const HOST: Ipv4Addr = Ipv4Addr::new(198, 51, 100, 1);

    fn ports(spec: &str) -> Vec<Port> {
        spec.parse::<PortSpec>().unwrap().to_ports()
    }

    #[tokio::test]
    async fn test_reports_open_ports_sorted() {
        let net = Arc::new(
            FakeNetwork::new()
                .with_open(HOST, 8080)
                .with_open(HOST, 22)
                .with_open(HOST, 443),
        );
        let scanner = PortScanner::new(Arc::clone(&net));

        let open = scanner.scan(HOST, &ports("1-1000,8080")).await;
        let open: Vec<u16> = open.into_iter().map(u16::from).collect();
        assert_eq!(open, vec![22, 443, 8080]);
        assert_eq!(net.connects().len(), 1001);
    }

    #[tokio::test]
    async fn test_no_open_ports() {
        let net = Arc::new(FakeNetwork::new());
        let scanner = PortScanner::new(Arc::clone(&net));

        assert!(scanner.scan(HOST, &ports("80,443")).await.is_empty());
        assert!(scanner.scan(HOST, &[]).await.is_empty());
    }

    #[tokio::test]
    async fn test_single_port_runs_one_probe_at_a_time() {
        let net = Arc::new(FakeNetwork::new().with_delay(Duration::from_millis(5)));
        let scanner = PortScanner::new(Arc::clone(&net));

        scanner.scan(HOST, &ports("80")).await;
        assert_eq!(scanner.concurrency_for(1), 1);
        assert_eq!(net.peak_in_flight(), 1);
    }

    #[tokio::test]
    async fn test_concurrency_capped_at_fifty() {
        let net = Arc::new(FakeNetwork::new().with_delay(Duration::from_millis(10)));
        let scanner = PortScanner::new(Arc::clone(&net));

        scanner.scan(HOST, &ports("1-200")).await;
        assert_eq!(scanner.concurrency_for(200), 50);
        assert!(net.peak_in_flight() <= 50);
        assert!(net.peak_in_flight() > 1);
        assert_eq!(net.connects().len(), 200);
    }

    #[tokio::test]
    async fn test_small_scan_never_exceeds_port_count() {
        let net = Arc::new(FakeNetwork::new().with_delay(Duration::from_millis(5)));
        let scanner = PortScanner::new(Arc::clone(&net));

        scanner.scan(HOST, &ports("20-25")).await;
        assert!(net.peak_in_flight() <= 6);
    }
}
