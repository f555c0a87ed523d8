use anyhow::Context;
use clap::Parser;
use netsweep::cli::{Cli, Commands};
use netsweep::config::AppSettings;
use netsweep::error::CliError;
use netsweep::output;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            output::print_error(&format!("{:#}", e));
            let input_error = e
                .downcast_ref::<CliError>()
                .is_some_and(CliError::is_input_error);
            ExitCode::from(if input_error { 2 } else { 1 })
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let settings = match &cli.config {
        Some(path) => AppSettings::load_from(path)
            .with_context(|| format!("failed to load settings from {}", path.display()))?,
        None => AppSettings::load().context("failed to load settings")?,
    };

    match cli.command {
        Commands::Scan(cmd) => cmd.execute(&settings, cli.quiet).await?,
        Commands::Interfaces(cmd) => cmd.execute()?,
    }
    Ok(())
}

/// Logs go to stderr so structured output on stdout stays parseable.
/// `RUST_LOG` overrides the verbosity flags.
fn init_logging(verbose: bool, quiet: bool) {
    let default = if verbose {
        "netsweep=debug"
    } else if quiet {
        "error"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
