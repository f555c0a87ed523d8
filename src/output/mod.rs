//! Output formatting module.
//!
//! Plain output is streamed host by host through [`PlainReporter`]. JSON and
//! CSV are written once the sweep has finished, from a [`ScanReport`].

mod csv_format;
mod json_format;
mod plain;

pub use csv_format::print_csv;
pub use json_format::print_json;
pub use plain::{
    print_error, print_interfaces, print_notice, print_summary, print_warning, PlainReporter,
};

use crate::net::HostnameResolver;
use crate::scanner::SweepOutcome;
use crate::types::{NetworkRange, Port};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::net::Ipv4Addr;
use std::time::Duration;

/// One live host in a finished sweep.
#[derive(Debug, Clone, Serialize)]
pub struct HostEntry {
    pub ip: Ipv4Addr,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hostname: Option<String>,
    pub open_ports: Vec<Port>,
}

/// Summary of a finished sweep, for structured output.
#[derive(Debug, Clone, Serialize)]
pub struct ScanReport {
    pub network: String,
    pub ports_scanned: usize,
    pub started_at: DateTime<Utc>,
    pub duration_ms: u64,
    pub hosts: Vec<HostEntry>,
}

impl ScanReport {
    pub fn new(
        range: &NetworkRange,
        ports_scanned: usize,
        started_at: DateTime<Utc>,
        duration: Duration,
        outcome: &SweepOutcome,
    ) -> Self {
        let hosts = outcome
            .reports()
            .iter()
            .map(|report| HostEntry {
                ip: report.host,
                hostname: None,
                open_ports: report.open_ports.clone(),
            })
            .collect();

        Self {
            network: range.to_string(),
            ports_scanned,
            started_at,
            duration_ms: duration.as_millis() as u64,
            hosts,
        }
    }

    /// Message for a sweep that found nothing, for formats whose body alone
    /// cannot say so.
    pub fn empty_notice(&self) -> Option<&'static str> {
        self.hosts.is_empty().then_some("No active hosts found.")
    }

    /// Fill in reverse DNS names for every host.
    pub async fn resolve_hostnames(&mut self, resolver: &HostnameResolver) {
        for entry in &mut self.hosts {
            entry.hostname = resolver.resolve(entry.ip).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scanner::HostReport;

    #[test]
    fn test_report_from_outcome() {
        let range: NetworkRange = "192.0.2.0/24".parse().unwrap();
        let outcome = SweepOutcome::Scanned(vec![
            HostReport {
                host: Ipv4Addr::new(192, 0, 2, 1),
                open_ports: vec![Port::new(22).unwrap(), Port::new(80).unwrap()],
            },
            HostReport {
                host: Ipv4Addr::new(192, 0, 2, 9),
                open_ports: vec![],
            },
        ]);

        let report = ScanReport::new(&range, 2, Utc::now(), Duration::from_millis(1500), &outcome);
        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(json["network"], "192.0.2.0/24");
        assert_eq!(json["duration_ms"], 1500);
        assert_eq!(json["hosts"][0]["ip"], "192.0.2.1");
        assert_eq!(json["hosts"][0]["open_ports"], serde_json::json!([22, 80]));
        assert_eq!(json["hosts"][1]["open_ports"], serde_json::json!([]));
        assert!(json["hosts"][0].get("hostname").is_none());
        assert_eq!(report.empty_notice(), None);
    }

    #[test]
    fn test_report_without_hosts() {
        let range: NetworkRange = "192.0.2.0/30".parse().unwrap();
        let report = ScanReport::new(
            &range,
            1000,
            Utc::now(),
            Duration::ZERO,
            &SweepOutcome::NoActiveHosts,
        );
        assert!(report.hosts.is_empty());
        assert_eq!(report.ports_scanned, 1000);
        assert_eq!(report.empty_notice(), Some("No active hosts found."));
    }
}
