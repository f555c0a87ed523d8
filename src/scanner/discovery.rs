//! Host discovery across a network range.

use crate::scanner::host::HostProber;
use crate::scanner::pool::probe_all;
use crate::scanner::traits::{Connector, Pinger};
use crate::types::NetworkRange;
use std::net::Ipv4Addr;
use std::sync::Arc;
use std::time::Instant;
use tracing::info;

/// Probes every host in a range with a fixed-size pool and collects the live ones.
///
/// Unlike port scanning, the pool size does not shrink for small ranges.
pub struct HostDiscovery<P, C> {
    prober: Arc<HostProber<P, C>>,
    concurrency: usize,
}

impl<P, C> HostDiscovery<P, C>
where
    P: Pinger + 'static,
    C: Connector + 'static,
{
    pub const DEFAULT_CONCURRENCY: usize = 50;

    pub fn new(prober: HostProber<P, C>) -> Self {
        Self {
            prober: Arc::new(prober),
            concurrency: Self::DEFAULT_CONCURRENCY,
        }
    }

    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    pub fn concurrency(&self) -> usize {
        self.concurrency
    }

    /// Live hosts in `range`, in ascending order.
    pub async fn discover(&self, range: &NetworkRange) -> Vec<Ipv4Addr> {
        let started = Instant::now();
        info!(%range, candidates = range.host_count(), "host discovery started");

        let prober = Arc::clone(&self.prober);
        let live = probe_all(range.hosts(), self.concurrency, move |host| {
            let prober = Arc::clone(&prober);
            async move { prober.probe(host).await }
        })
        .await;

        info!(
            %range,
            live = live.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "host discovery finished"
        );
        live
    }
}
