//! CLI subcommand definitions and handlers.
//!
//! - `netsweep scan <network>` - Discover live hosts and scan their ports
//! - `netsweep interfaces` - List local IPv4 interfaces

mod interfaces;
mod scan;

pub use interfaces::InterfacesCommand;
pub use scan::ScanCommand;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// netsweep - find live hosts on an IPv4 subnet and their open TCP ports.
///
/// Hosts are detected with an ICMP echo (when raw sockets are permitted)
/// and a TCP connect fallback to ports 80, 443, 22 and 445.
#[derive(Parser, Debug)]
#[command(name = "netsweep")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Subnet host discovery and TCP port scanner", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose (debug) logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Path to a settings file (defaults to the XDG config directory)
    #[arg(long, global = true, value_name = "PATH", env = "NETSWEEP_CONFIG")]
    pub config: Option<PathBuf>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Discover live hosts in a network and scan their ports
    #[command(alias = "s")]
    Scan(ScanCommand),

    /// List local network interfaces
    #[command(alias = "i")]
    Interfaces(InterfacesCommand),
}

/// Output format for results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable tables, printed host by host
    #[default]
    Plain,
    /// JSON document printed when the sweep finishes
    Json,
    /// CSV rows (host,hostname,port) printed when the sweep finishes
    Csv,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Plain => write!(f, "plain"),
            Self::Json => write!(f, "json"),
            Self::Csv => write!(f, "csv"),
        }
    }
}
