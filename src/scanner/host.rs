//! Liveness probing for a single host.
//!
//! The primary probe is an ICMP echo. When echo is unavailable or gets no
//! reply, the host is probed with TCP connects to a short list of commonly
//! open ports, one after another, stopping at the first that accepts.

use crate::scanner::traits::{Connector, Pinger};
use std::net::{Ipv4Addr, SocketAddrV4};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, trace};

/// Ports tried by the TCP fallback, in order.
pub const FALLBACK_PORTS: [u16; 4] = [80, 443, 22, 445];

/// Two-stage liveness prober: ICMP echo, then sequential TCP connects.
pub struct HostProber<P, C> {
    pinger: Arc<P>,
    connector: Arc<C>,
    echo_timeout: Duration,
    fallback_timeout: Duration,
}

impl<P: Pinger, C: Connector> HostProber<P, C> {
    pub const DEFAULT_ECHO_TIMEOUT: Duration = Duration::from_secs(1);
    pub const DEFAULT_FALLBACK_TIMEOUT: Duration = Duration::from_secs(1);

    pub fn new(pinger: Arc<P>, connector: Arc<C>) -> Self {
        Self {
            pinger,
            connector,
            echo_timeout: Self::DEFAULT_ECHO_TIMEOUT,
            fallback_timeout: Self::DEFAULT_FALLBACK_TIMEOUT,
        }
    }

    pub fn with_echo_timeout(mut self, timeout: Duration) -> Self {
        self.echo_timeout = timeout;
        self
    }

    pub fn with_fallback_timeout(mut self, timeout: Duration) -> Self {
        self.fallback_timeout = timeout;
        self
    }

    /// Whether `host` is alive. Never fails; every fault means "not alive".
    ///
    /// The loopback address is always alive and is not probed.
    pub async fn probe(&self, host: Ipv4Addr) -> bool {
        if host == Ipv4Addr::LOCALHOST {
            return true;
        }

        if self.pinger.is_available() {
            match self.pinger.echo(host, self.echo_timeout).await {
                Ok(()) => {
                    debug!(%host, "echo reply received");
                    return true;
                }
                Err(e) => trace!(%host, error = %e, "echo failed, trying TCP fallback"),
            }
        }

        self.tcp_fallback(host).await
    }

    async fn tcp_fallback(&self, host: Ipv4Addr) -> bool {
        for port in FALLBACK_PORTS {
            let addr = SocketAddrV4::new(host, port);
            if self.connector.probe(addr, self.fallback_timeout).await {
                debug!(%host, port, "alive via TCP fallback");
                return true;
            }
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ScanError;
    use crate::scanner::testing::FakeNetwork;

    const HOST: Ipv4Addr = Ipv4Addr::new(192, 0, 2, 10);

    fn prober(net: &Arc<FakeNetwork>) -> HostProber<FakeNetwork, FakeNetwork> {
        HostProber::new(Arc::clone(net), Arc::clone(net))
    }

    fn attempted_ports(net: &FakeNetwork) -> Vec<u16> {
        net.connects().iter().map(|addr| addr.port()).collect()
    }

    #[tokio::test]
    async fn test_loopback_is_alive_without_probing() {
        let net = Arc::new(FakeNetwork::new());
        assert!(prober(&net).probe(Ipv4Addr::LOCALHOST).await);
        assert!(net.echoes().is_empty());
        assert!(net.connects().is_empty());
    }

    #[tokio::test]
    async fn test_echo_reply_skips_fallback() {
        let net = Arc::new(FakeNetwork::new().with_echo(HOST));
        assert!(prober(&net).probe(HOST).await);
        assert_eq!(net.echoes(), vec![HOST]);
        assert!(net.connects().is_empty());
    }

    #[tokio::test]
    async fn test_fallback_order_stops_at_first_success() {
        let net = Arc::new(FakeNetwork::new().with_open(HOST, 22).with_open(HOST, 445));
        assert!(prober(&net).probe(HOST).await);
        assert_eq!(net.echoes(), vec![HOST]);
        assert_eq!(attempted_ports(&net), vec![80, 443, 22]);
    }

    #[tokio::test]
    async fn test_earlier_fallback_port_preferred() {
        let net = Arc::new(FakeNetwork::new().with_open(HOST, 443).with_open(HOST, 80));
        assert!(prober(&net).probe(HOST).await);
        assert_eq!(attempted_ports(&net), vec![80]);
    }

    #[tokio::test]
    async fn test_dead_host_tries_every_fallback_port() {
        let net = Arc::new(FakeNetwork::new());
        assert!(!prober(&net).probe(HOST).await);
        assert_eq!(attempted_ports(&net), FALLBACK_PORTS.to_vec());
    }

    #[tokio::test]
    async fn test_unavailable_icmp_goes_straight_to_fallback() {
        let net = Arc::new(FakeNetwork::new().without_icmp().with_open(HOST, 445));
        assert!(prober(&net).probe(HOST).await);
        assert!(net.echoes().is_empty());
        assert_eq!(attempted_ports(&net), FALLBACK_PORTS.to_vec());
    }

    #[tokio::test]
    async fn test_echo_permission_denied_falls_back_to_tcp() {
        let net = Arc::new(
            FakeNetwork::new()
                .with_echo_error(|| ScanError::PermissionDenied("raw ICMP socket".to_string()))
                .with_open(HOST, 443),
        );
        assert!(prober(&net).probe(HOST).await);
        assert_eq!(net.echoes(), vec![HOST]);
        assert_eq!(attempted_ports(&net), vec![80, 443]);
    }

    #[tokio::test]
    async fn test_echo_socket_error_on_dead_host_is_not_alive() {
        let net = Arc::new(
            FakeNetwork::new().with_echo_error(|| ScanError::RawSocket("send failed".to_string())),
        );
        assert!(!prober(&net).probe(HOST).await);
        assert_eq!(attempted_ports(&net), FALLBACK_PORTS.to_vec());
    }

    #[tokio::test]
    async fn test_fallback_probes_run_sequentially() {
        let net = Arc::new(FakeNetwork::new().with_delay(Duration::from_millis(2)));
        assert!(!prober(&net).probe(HOST).await);
        assert_eq!(net.peak_in_flight(), 1);
    }
}
