//! Application settings and paths.
//!
//! Settings are read from `settings.json` in the XDG config directory
//! (`~/.config/netsweep` on Linux) or from an explicit `--config` path. The
//! file is optional and is never written by netsweep.

use crate::error::{ConfigError, ConfigResult};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

/// Application directory paths following the XDG Base Directory Specification.
#[derive(Debug, Clone)]
pub struct Paths {
    /// Configuration directory (~/.config/netsweep)
    pub config_dir: PathBuf,
}

impl Paths {
    /// Locate the platform directories. Does not create anything.
    pub fn discover() -> ConfigResult<Self> {
        let project = ProjectDirs::from("com", "netsweep", "netsweep")
            .ok_or(ConfigError::DirectoryNotFound)?;

        Ok(Self {
            config_dir: project.config_dir().to_path_buf(),
        })
    }

    /// Get the path to the settings file.
    pub fn settings_file(&self) -> PathBuf {
        self.config_dir.join("settings.json")
    }
}

/// Scanner tunables. Defaults are the standard probing policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    /// TCP connect timeout for port scanning, in milliseconds.
    pub port_timeout_ms: u64,
    /// How long to wait for an ICMP echo reply, in milliseconds.
    pub echo_timeout_ms: u64,
    /// TCP connect timeout per fallback liveness port, in milliseconds.
    pub fallback_timeout_ms: u64,
    /// Upper bound on concurrent port probes per host.
    pub port_concurrency: usize,
    /// Concurrent host probes during discovery.
    pub discovery_concurrency: usize,
    /// Largest network (in addresses) accepted for a sweep.
    pub max_hosts: u64,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            port_timeout_ms: 2000,
            echo_timeout_ms: 1000,
            fallback_timeout_ms: 1000,
            port_concurrency: 50,
            discovery_concurrency: 50,
            max_hosts: 65536,
        }
    }
}

impl AppSettings {
    /// Load settings from the default location, or defaults if there is no file.
    pub fn load() -> ConfigResult<Self> {
        let file = match Paths::discover() {
            Ok(paths) => paths.settings_file(),
            Err(e) => {
                debug!(error = %e, "using default settings");
                return Ok(Self::default());
            }
        };
        if !file.exists() {
            return Ok(Self::default());
        }
        Self::load_from(&file)
    }

    /// Load settings from a specific file.
    pub fn load_from(path: &Path) -> ConfigResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadFailed {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let settings: Self =
            serde_json::from_str(&content).map_err(|e| ConfigError::InvalidFormat(e.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> ConfigResult<()> {
        if self.port_concurrency == 0 || self.discovery_concurrency == 0 {
            return Err(ConfigError::InvalidFormat(
                "concurrency limits must be at least 1".to_string(),
            ));
        }
        if self.port_timeout_ms == 0 || self.echo_timeout_ms == 0 || self.fallback_timeout_ms == 0 {
            return Err(ConfigError::InvalidFormat(
                "timeouts must be at least 1ms".to_string(),
            ));
        }
        Ok(())
    }

    pub fn port_timeout(&self) -> Duration {
        Duration::from_millis(self.port_timeout_ms)
    }

    pub fn echo_timeout(&self) -> Duration {
        Duration::from_millis(self.echo_timeout_ms)
    }

    pub fn fallback_timeout(&self) -> Duration {
        Duration::from_millis(self.fallback_timeout_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_settings() {
        let settings = AppSettings::default();
        assert_eq!(settings.port_timeout(), Duration::from_secs(2));
        assert_eq!(settings.echo_timeout(), Duration::from_secs(1));
        assert_eq!(settings.fallback_timeout(), Duration::from_secs(1));
        assert_eq!(settings.port_concurrency, 50);
        assert_eq!(settings.discovery_concurrency, 50);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"port_timeout_ms": 500, "max_hosts": 1024}}"#).unwrap();

        let settings = AppSettings::load_from(file.path()).unwrap();
        assert_eq!(settings.port_timeout_ms, 500);
        assert_eq!(settings.max_hosts, 1024);
        assert_eq!(settings.echo_timeout_ms, 1000);
        assert_eq!(settings.port_concurrency, 50);
    }

    #[test]
    fn test_malformed_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();

        let err = AppSettings::load_from(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidFormat(_)));
    }

    #[test]
    fn test_zero_concurrency_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"port_concurrency": 0}}"#).unwrap();

        assert!(matches!(
            AppSettings::load_from(file.path()),
            Err(ConfigError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = AppSettings::load_from(&dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, ConfigError::ReadFailed { .. }));
    }
}
