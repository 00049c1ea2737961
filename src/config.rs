//! Configuration management for coretemp-graph
//!
//! Settings live in a TOML file. Every field has a default, so a missing file or
//! a partial file is fine; command-line flags override whatever is loaded here.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// coretemp-graph configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Sampling cadence and window length
    #[serde(default)]
    pub sampling: SamplingConfig,
    /// Where and what to read
    #[serde(default)]
    pub sensor: SensorConfig,
    /// Display options
    #[serde(default)]
    pub display: DisplayConfig,
}

/// Sampling configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SamplingConfig {
    /// Delay between two ticks in milliseconds
    #[serde(default = "default_refresh_interval")]
    pub refresh_interval_ms: u64,
    /// Number of samples kept per core
    #[serde(default = "default_window_size")]
    pub window_size: usize,
}

/// Sensor source configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SensorConfig {
    /// Root of the hwmon class directory
    #[serde(default = "default_hwmon_root")]
    pub hwmon_root: PathBuf,
    /// hwmon chip name to read (contents of the chip's `name` file)
    #[serde(default = "default_driver")]
    pub driver: String,
    /// Only sensor labels starting with this prefix are treated as cores
    #[serde(default = "default_label_prefix")]
    pub label_prefix: String,
}

/// Display configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Show the current/high/critical legend inside each chart
    #[serde(default = "default_true")]
    pub show_legend: bool,
}

fn default_refresh_interval() -> u64 {
    100
}

fn default_window_size() -> usize {
    600
}

fn default_hwmon_root() -> PathBuf {
    PathBuf::from("/sys/class/hwmon")
}

fn default_driver() -> String {
    "coretemp".to_string()
}

fn default_label_prefix() -> String {
    "Core".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            refresh_interval_ms: default_refresh_interval(),
            window_size: default_window_size(),
        }
    }
}

impl Default for SensorConfig {
    fn default() -> Self {
        Self {
            hwmon_root: default_hwmon_root(),
            driver: default_driver(),
            label_prefix: default_label_prefix(),
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self { show_legend: true }
    }
}

impl SamplingConfig {
    /// Refresh interval as a `Duration`
    pub fn refresh_interval(&self) -> Duration {
        Duration::from_millis(self.refresh_interval_ms)
    }
}

impl Config {
    /// Get the default configuration directory
    ///
    /// Returns `~/.config/coretemp-graph` on Unix-like systems,
    /// or `%APPDATA%\coretemp-graph` on Windows.
    pub fn default_path() -> Result<PathBuf> {
        let config_dir = if cfg!(windows) {
            std::env::var("APPDATA")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("."))
        } else {
            std::env::var("HOME")
                .map(|home| PathBuf::from(home).join(".config"))
                .unwrap_or_else(|_| PathBuf::from(".config"))
        };

        Ok(config_dir.join("coretemp-graph"))
    }

    /// Load configuration from the default path, falling back to defaults
    pub fn load() -> Result<Self> {
        let config_file = Self::default_path()?.join("config.toml");

        if !config_file.exists() {
            log::debug!("No config at {}, using defaults", config_file.display());
            return Ok(Self::default());
        }

        Self::load_from(&config_file)
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)
            .map_err(|e| Error::Parse(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to the default path
    pub fn save(&self) -> Result<()> {
        let config_dir = Self::default_path()?;
        std::fs::create_dir_all(&config_dir)?;
        self.save_to(&config_dir.join("config.toml"))
    }

    /// Save configuration to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let contents = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Reject settings the sampling loop cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.sampling.window_size == 0 {
            return Err(Error::Config("window_size must be at least 1".into()));
        }
        if self.sampling.refresh_interval_ms == 0 {
            return Err(Error::Config(
                "refresh_interval_ms must be greater than 0".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.sampling.refresh_interval_ms, 100);
        assert_eq!(config.sampling.window_size, 600);
        assert_eq!(config.sensor.driver, "coretemp");
        assert_eq!(config.sensor.label_prefix, "Core");
        assert_eq!(config.sensor.hwmon_root, PathBuf::from("/sys/class/hwmon"));
        assert!(config.display.show_legend);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let toml_str = toml::to_string(&config).unwrap();
        let deserialized: Config = toml::from_str(&toml_str).unwrap();

        assert_eq!(
            config.sampling.refresh_interval_ms,
            deserialized.sampling.refresh_interval_ms
        );
        assert_eq!(config.sensor.driver, deserialized.sensor.driver);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let config: Config = toml::from_str("[sampling]\nwindow_size = 42\n").unwrap();
        assert_eq!(config.sampling.window_size, 42);
        assert_eq!(config.sampling.refresh_interval_ms, 100);
        assert_eq!(config.sensor.driver, "coretemp");
    }

    #[test]
    fn test_zero_window_rejected() {
        let mut config = Config::default();
        config.sampling.window_size = 0;
        assert!(matches!(config.validate(), Err(Error::Config(_))));
    }

    #[test]
    fn test_save_and_load_from() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = Config::default();
        config.sampling.refresh_interval_ms = 250;
        config.sensor.driver = "k10temp".to_string();
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.sampling.refresh_interval_ms, 250);
        assert_eq!(loaded.sensor.driver, "k10temp");
    }
}
