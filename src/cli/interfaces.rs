//! Interfaces subcommand implementation.

use crate::error::CliResult;
use crate::net::list_interfaces;
use crate::output;
use clap::Parser;

/// List local network interfaces with their IPv4 address and netmask.
#[derive(Parser, Debug)]
pub struct InterfacesCommand {
    /// Print as JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

impl InterfacesCommand {
    pub fn execute(&self) -> CliResult<()> {
        let interfaces = list_interfaces();
        if self.json {
            println!("{}", serde_json::to_string_pretty(&interfaces)?);
        } else {
            output::print_interfaces(&interfaces);
        }
        Ok(())
    }
}
