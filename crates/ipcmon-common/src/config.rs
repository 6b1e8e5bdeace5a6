//! ---
//! ipcmon_section: "01-core-functionality"
//! ipcmon_subsection: "module"
//! ipcmon_type: "source"
//! ipcmon_scope: "code"
//! ipcmon_description: "Shared primitives and utilities for the monitor runtime."
//! ipcmon_version: "v0.1.0"
//! ipcmon_owner: "tbd"
//! ---
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DurationMilliSeconds};
use tracing::debug;

use crate::logging::LogFormat;

/// Config files inspected, in order, when `IPCMON_CONFIG` is not set.
pub const DEFAULT_CONFIG_CANDIDATES: [&str; 2] = ["ipcmon.toml", "configs/ipcmon.toml"];

fn default_simulation_seed() -> u64 {
    0x1FC_u64
}

fn default_connection_interval() -> Duration {
    Duration::from_secs(3)
}

fn default_activity_interval() -> Duration {
    Duration::from_secs(5)
}

fn default_report_interval() -> Duration {
    Duration::from_secs(2)
}

fn default_logging_directory() -> PathBuf {
    PathBuf::from("target/logs")
}

fn default_log_format() -> LogFormat {
    LogFormat::Pretty
}

fn default_export_directory() -> PathBuf {
    PathBuf::from("reports")
}

/// Primary configuration object for the monitor binaries.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub simulation: SimulationConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub export: ExportConfig,
}

/// Metadata describing where an [`AppConfig`] was loaded from.
#[derive(Debug, Clone)]
pub struct LoadedAppConfig {
    pub config: AppConfig,
    /// `None` when no file was found and defaults are in effect.
    pub source: Option<PathBuf>,
}

impl AppConfig {
    pub const ENV_CONFIG_PATH: &str = "IPCMON_CONFIG";

    /// Load configuration together with the effective source path, falling back to
    /// defaults when neither the environment override nor any candidate exists.
    pub fn load_with_source<P: AsRef<Path>>(candidates: &[P]) -> Result<LoadedAppConfig> {
        if let Ok(env_path) = std::env::var(Self::ENV_CONFIG_PATH) {
            if !env_path.trim().is_empty() {
                let path = PathBuf::from(env_path);
                let config = Self::from_path(&path)?;
                return Ok(LoadedAppConfig {
                    config,
                    source: Some(path),
                });
            }
        }

        for candidate in candidates {
            if candidate.as_ref().exists() {
                let path = candidate.as_ref().to_path_buf();
                let config = Self::from_path(&path)?;
                return Ok(LoadedAppConfig {
                    config,
                    source: Some(path),
                });
            }
        }

        Ok(LoadedAppConfig {
            config: Self::default(),
            source: None,
        })
    }

    /// Load an explicit file, bypassing the candidate search.
    pub fn from_path(path: &Path) -> Result<Self> {
        debug!(config_path = %path.display(), "loading configuration");
        let contents = fs::read_to_string(path)
            .with_context(|| format!("unable to read config file {}", path.display()))?;
        contents
            .parse::<AppConfig>()
            .with_context(|| format!("failed to parse config file {}", path.display()))
    }

    /// Validate structural invariants.
    pub fn validate(&self) -> Result<()> {
        self.simulation.validate()
    }
}

impl std::str::FromStr for AppConfig {
    type Err = anyhow::Error;

    fn from_str(content: &str) -> std::result::Result<Self, Self::Err> {
        let config: AppConfig =
            toml::from_str(content).with_context(|| "failed to parse configuration")?;
        config.validate()?;
        Ok(config)
    }
}

/// Seed and tick cadences for the telemetry simulator.
#[serde_as]
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SimulationConfig {
    #[serde(default = "default_simulation_seed")]
    pub seed: u64,
    #[serde(rename = "connection_interval_ms", default = "default_connection_interval")]
    #[serde_as(as = "DurationMilliSeconds<u64>")]
    pub connection_interval: Duration,
    #[serde(rename = "activity_interval_ms", default = "default_activity_interval")]
    #[serde_as(as = "DurationMilliSeconds<u64>")]
    pub activity_interval: Duration,
    #[serde(rename = "report_interval_ms", default = "default_report_interval")]
    #[serde_as(as = "DurationMilliSeconds<u64>")]
    pub report_interval: Duration,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            seed: default_simulation_seed(),
            connection_interval: default_connection_interval(),
            activity_interval: default_activity_interval(),
            report_interval: default_report_interval(),
        }
    }
}

impl SimulationConfig {
    pub fn validate(&self) -> Result<()> {
        for (name, interval) in [
            ("connection_interval_ms", self.connection_interval),
            ("activity_interval_ms", self.activity_interval),
            ("report_interval_ms", self.report_interval),
        ] {
            if interval.is_zero() {
                return Err(anyhow!("simulation.{} must be greater than zero", name));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_logging_directory")]
    pub directory: PathBuf,
    #[serde(default = "default_log_format")]
    pub format: LogFormat,
    #[serde(default)]
    pub file_prefix: Option<String>,
    /// Mirror log events to stdout. The dashboard keeps this off since it owns the terminal.
    #[serde(default)]
    pub stdout: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            directory: default_logging_directory(),
            format: default_log_format(),
            file_prefix: None,
            stdout: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    #[serde(default = "default_export_directory")]
    pub directory: PathBuf,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            directory: default_export_directory(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_uses_defaults() {
        let config: AppConfig = "".parse().unwrap();
        assert_eq!(config.simulation, SimulationConfig::default());
        assert_eq!(config.simulation.connection_interval, Duration::from_secs(3));
        assert_eq!(config.simulation.activity_interval, Duration::from_secs(5));
        assert_eq!(config.simulation.report_interval, Duration::from_secs(2));
        assert_eq!(config.logging.format, LogFormat::Pretty);
        assert!(!config.logging.stdout);
        assert_eq!(config.export.directory, PathBuf::from("reports"));
    }

    #[test]
    fn parses_millisecond_intervals() {
        let config: AppConfig = r#"
            [simulation]
            seed = 7
            connection_interval_ms = 250
            activity_interval_ms = 500
            report_interval_ms = 100

            [logging]
            format = "structured-json"
            stdout = true

            [export]
            directory = "out"
        "#
        .parse()
        .unwrap();
        assert_eq!(config.simulation.seed, 7);
        assert_eq!(config.simulation.connection_interval, Duration::from_millis(250));
        assert_eq!(config.simulation.activity_interval, Duration::from_millis(500));
        assert_eq!(config.simulation.report_interval, Duration::from_millis(100));
        assert_eq!(config.logging.format, LogFormat::StructuredJson);
        assert!(config.logging.stdout);
        assert_eq!(config.export.directory, PathBuf::from("out"));
    }

    #[test]
    fn rejects_zero_interval() {
        let err = r#"
            [simulation]
            report_interval_ms = 0
        "#
        .parse::<AppConfig>()
        .unwrap_err();
        assert!(err.to_string().contains("report_interval_ms"));
    }

    #[test]
    fn rejects_unknown_log_format() {
        let result = r#"
            [logging]
            format = "xml"
        "#
        .parse::<AppConfig>();
        assert!(result.is_err());
    }
}
