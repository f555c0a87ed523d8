//! Scan subcommand implementation.
//!
//! Handles `netsweep scan <network>`: host discovery over the range, then a
//! port scan of every live host.

use crate::cli::OutputFormat;
use crate::config::AppSettings;
use crate::error::CliResult;
use crate::net::HostnameResolver;
use crate::output::{self, PlainReporter, ScanReport};
use crate::scanner::{
    HostDiscovery, HostProber, IcmpPinger, NetworkSweep, Pinger, PortScanner, TcpConnector,
};
use crate::types::{NetworkRange, PortSpec};
use chrono::Utc;
use clap::Parser;
use std::sync::Arc;
use std::time::Instant;

/// Discover live hosts in a network and scan their open TCP ports.
#[derive(Parser, Debug)]
pub struct ScanCommand {
    /// Network to scan in CIDR notation
    ///
    /// Examples:
    ///   192.168.1.0/24     256-address subnet (254 hosts)
    ///   10.0.0.7           Single host
    #[arg(value_name = "NETWORK")]
    pub network: String,

    /// Ports to scan (e.g., "80", "80,443", "1-1000", "22,80,443,8000-9000") [default: 1-1000]
    #[arg(short, long)]
    pub ports: Option<String>,

    /// Output format for results
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Plain)]
    pub output: OutputFormat,

    /// Resolve hostnames of live hosts via reverse DNS
    #[arg(long)]
    pub resolve: bool,
}

impl ScanCommand {
    /// Execute the scan command.
    ///
    /// Input is validated before anything touches the network.
    pub async fn execute(&self, settings: &AppSettings, quiet: bool) -> CliResult<()> {
        let range = NetworkRange::parse_with_limit(&self.network, settings.max_hosts)?;
        let ports = PortSpec::resolve(self.ports.as_deref())?.to_ports();

        let connector = Arc::new(TcpConnector::new());
        let pinger = Arc::new(IcmpPinger::new());
        if !pinger.is_available() && !quiet {
            let hint = if is_root() { "" } else { " (try running as root)" };
            output::print_warning(&format!(
                "raw ICMP sockets unavailable{}; host discovery will use TCP connects only",
                hint
            ));
        }

        let prober = HostProber::new(pinger, Arc::clone(&connector))
            .with_echo_timeout(settings.echo_timeout())
            .with_fallback_timeout(settings.fallback_timeout());
        let discovery =
            HostDiscovery::new(prober).with_concurrency(settings.discovery_concurrency);
        let scanner = PortScanner::new(connector)
            .with_timeout(settings.port_timeout())
            .with_max_concurrency(settings.port_concurrency);
        let sweep = NetworkSweep::new(discovery, scanner);

        let started_at = Utc::now();
        let clock = Instant::now();

        match self.output {
            OutputFormat::Plain => {
                let mut reporter = PlainReporter::new(quiet);
                if self.resolve {
                    reporter = reporter.with_resolver(HostnameResolver::new());
                }
                let outcome = sweep.run(&range, &ports, &mut reporter).await;
                if !quiet {
                    output::print_summary(&outcome, clock.elapsed());
                }
            }
            format => {
                let outcome = sweep.run(&range, &ports, &mut ()).await;
                let mut report =
                    ScanReport::new(&range, ports.len(), started_at, clock.elapsed(), &outcome);
                if self.resolve {
                    report.resolve_hostnames(&HostnameResolver::new()).await;
                }
                match format {
                    OutputFormat::Csv => {
                        output::print_csv(&report)?;
                        match report.empty_notice() {
                            Some(notice) if !quiet => output::print_notice(notice),
                            _ => {}
                        }
                    }
                    _ => output::print_json(&report)?,
                }
            }
        }

        Ok(())
    }
}

/// Check if running with root privileges.
fn is_root() -> bool {
    #[cfg(unix)]
    {
        unsafe { libc::geteuid() == 0 }
    }
    #[cfg(not(unix))]
    {
        false
    }
}
