//! CSV output formatting.

use super::ScanReport;
use std::io::{self, Write};

/// Write one `host,hostname,port` row per open port. A live host with no open
/// ports still gets a row, with an empty `port` field.
pub fn write_csv<W: Write>(report: &ScanReport, writer: W) -> csv::Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(["host", "hostname", "port"])?;

    for entry in &report.hosts {
        let host = entry.ip.to_string();
        let hostname = entry.hostname.as_deref().unwrap_or("");
        if entry.open_ports.is_empty() {
            wtr.write_record([host.as_str(), hostname, ""])?;
        }
        for port in &entry.open_ports {
            let port = port.to_string();
            wtr.write_record([host.as_str(), hostname, port.as_str()])?;
        }
    }

    wtr.flush()?;
    Ok(())
}

/// Print the report as CSV on stdout.
pub fn print_csv(report: &ScanReport) -> csv::Result<()> {
    let stdout = io::stdout();
    write_csv(report, stdout.lock())
}
