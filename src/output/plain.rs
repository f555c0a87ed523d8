//! Plain text output formatting.
//!
//! Produces human-readable output with colors, streamed as the sweep
//! progresses.

use crate::net::{HostnameResolver, InterfaceAddr};
use crate::scanner::{HostReport, SweepObserver, SweepOutcome};
use crate::types::NetworkRange;
use async_trait::async_trait;
use console::{style, Term};
use indicatif::{ProgressBar, ProgressStyle};
use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::net::Ipv4Addr;
use std::time::Duration;

const RULE: &str = "───────────────────────────────────────────";

/// Streams sweep progress and results to the terminal.
pub struct PlainReporter {
    quiet: bool,
    spinner: Option<ProgressBar>,
    resolver: Option<HostnameResolver>,
}

impl PlainReporter {
    pub fn new(quiet: bool) -> Self {
        Self {
            quiet,
            spinner: None,
            resolver: None,
        }
    }

    /// Show reverse DNS names next to live hosts.
    pub fn with_resolver(mut self, resolver: HostnameResolver) -> Self {
        self.resolver = Some(resolver);
        self
    }

    fn start_spinner(&mut self, message: String) {
        if self.quiet || !Term::stdout().is_term() {
            return;
        }
        let spinner = ProgressBar::new_spinner();
        if let Ok(spinner_style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
            spinner.set_style(spinner_style);
        }
        spinner.set_message(message);
        spinner.enable_steady_tick(Duration::from_millis(100));
        self.spinner = Some(spinner);
    }

    fn stop_spinner(&mut self) {
        if let Some(spinner) = self.spinner.take() {
            spinner.finish_and_clear();
        }
    }
}

#[async_trait]
impl SweepObserver for PlainReporter {
    async fn discovery_started(&mut self, range: &NetworkRange) {
        if !self.quiet {
            println!();
            println!(
                "{} {} ({} hosts)",
                style("Starting host discovery on").bold(),
                style(range).cyan(),
                range.host_count()
            );
        }
        self.start_spinner(format!("Probing {} hosts...", range.host_count()));
    }

    async fn hosts_discovered(&mut self, hosts: &[Ipv4Addr]) {
        self.stop_spinner();
        if hosts.is_empty() {
            println!("{}", style("No active hosts found.").yellow());
            return;
        }

        let mut rows = Vec::with_capacity(hosts.len());
        for &host in hosts {
            let name = match &self.resolver {
                Some(resolver) => resolver.resolve(host).await,
                None => None,
            };
            rows.push((host, name));
        }
        print!("{}", hosts_table(&rows, self.resolver.is_some()));
    }

    async fn host_scan_started(&mut self, host: Ipv4Addr, port_count: usize) {
        if !self.quiet {
            println!();
            println!(
                "{} {} ({} ports)",
                style("Scanning ports for").bold(),
                style(host).cyan(),
                port_count
            );
        }
        self.start_spinner(format!("Scanning {}...", host));
    }

    async fn host_scanned(&mut self, report: &HostReport) {
        self.stop_spinner();
        if report.open_ports.is_empty() {
            println!("{}", style("No open ports found.").yellow());
        } else {
            print!("{}", ports_table(report));
        }
    }
}

fn hosts_table(rows: &[(Ipv4Addr, Option<String>)], with_names: bool) -> String {
    let mut out = String::new();
    let _ = writeln!(out);
    let _ = writeln!(out, "  {}", style(format!("Active Hosts ({})", rows.len())).bold());
    let _ = writeln!(out, "  {}", style(RULE).dim());
    if with_names {
        let _ = writeln!(
            out,
            "  {:<16} {:<32} {}",
            style("IP ADDRESS").bold(),
            style("HOSTNAME").bold(),
            style("STATUS").bold()
        );
    } else {
        let _ = writeln!(out, "  {:<16} {}", style("IP ADDRESS").bold(), style("STATUS").bold());
    }
    let _ = writeln!(out, "  {}", style(RULE).dim());

    for (host, name) in rows {
        let ip = host.to_string();
        if with_names {
            let _ = writeln!(
                out,
                "  {:<16} {:<32} {}",
                style(ip).cyan(),
                name.as_deref().unwrap_or("-"),
                style("active").green().bold()
            );
        } else {
            let _ = writeln!(out, "  {:<16} {}", style(ip).cyan(), style("active").green().bold());
        }
    }
    let _ = writeln!(out, "  {}", style(RULE).dim());
    out
}

fn ports_table(report: &HostReport) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "  {}",
        style(format!("Open Ports for {}", report.host)).bold()
    );
    let _ = writeln!(out, "  {}", style(RULE).dim());
    let _ = writeln!(out, "  {:>6}  {}", style("PORT").bold(), style("STATE").bold());
    let _ = writeln!(out, "  {}", style(RULE).dim());
    for port in &report.open_ports {
        let _ = writeln!(out, "  {:>6}  {}", port, style("open").green().bold());
    }
    let _ = writeln!(out, "  {}", style(RULE).dim());
    out
}

/// Print a one-line summary after the sweep.
pub fn print_summary(outcome: &SweepOutcome, elapsed: Duration) {
    let reports = outcome.reports();
    let open: usize = reports.iter().map(|r| r.open_ports.len()).sum();
    println!();
    println!(
        "{} {} live hosts, {} open ports in {:.2}s",
        style("Done:").green().bold(),
        reports.len(),
        open,
        elapsed.as_secs_f64()
    );
}

/// Print local IPv4 interfaces.
pub fn print_interfaces(interfaces: &BTreeMap<String, InterfaceAddr>) {
    if interfaces.is_empty() {
        println!("{}", style("No IPv4 interfaces found.").yellow());
        return;
    }

    println!();
    println!("  {}", style("Network Interfaces").bold());
    println!("  {}", style(RULE).dim());
    println!(
        "  {:<16} {:<16} {}",
        style("INTERFACE").bold(),
        style("IP ADDRESS").bold(),
        style("NETMASK").bold()
    );
    println!("  {}", style(RULE).dim());
    for (name, addr) in interfaces {
        println!(
            "  {:<16} {:<16} {}",
            style(name).cyan(),
            style(addr.ip.to_string()).green(),
            style(addr.netmask.to_string()).yellow()
        );
    }
    println!("  {}", style(RULE).dim());
}

/// Print an error message.
pub fn print_error(msg: &str) {
    eprintln!("{} {}", style("Error:").red().bold(), msg);
}

/// Print an informational line to stderr, keeping stdout machine-readable.
pub fn print_notice(msg: &str) {
    eprintln!("{}", style(msg).yellow());
}

/// Print a warning message.
pub fn print_warning(msg: &str) {
    eprintln!("{} {}", style("Warning:").yellow().bold(), msg);
}
