//! Error types for netsweep.
//!
//! Uses `thiserror` for ergonomic error definitions. Probe-level failures
//! (`ScanError`) never leave the probers: they are logged and collapsed into
//! a negative probe result. Only input and configuration errors reach the
//! operator.

use crate::types::{NetworkError, PortError};
use std::path::PathBuf;
use thiserror::Error;

/// Faults raised while performing a single probe.
#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Timed out waiting for a reply")]
    Timeout,

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Raw socket error: {0}")]
    RawSocket(String),

    #[error("Probe task failed: {0}")]
    TaskFailed(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for probe operations.
pub type ScanResult<T> = Result<T, ScanError>;

/// Errors loading application settings.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("could not determine a configuration directory")]
    DirectoryNotFound,

    #[error("failed to read {path}: {reason}")]
    ReadFailed { path: PathBuf, reason: String },

    #[error("invalid settings file: {0}")]
    InvalidFormat(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors a subcommand can fail with.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("invalid network: {0}")]
    Network(#[from] NetworkError),

    #[error("invalid ports: {0}")]
    Ports(#[from] PortError),

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("output error: {0}")]
    Output(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Whether the operator supplied bad input (as opposed to a runtime failure).
    pub fn is_input_error(&self) -> bool {
        matches!(self, Self::Network(_) | Self::Ports(_))
    }
}

impl From<csv::Error> for CliError {
    fn from(e: csv::Error) -> Self {
        Self::Output(e.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        Self::Output(e.to_string())
    }
}

pub type CliResult<T> = Result<T, CliError>;
