//! Configuration for a pisim driver run
//!
//! The handshake itself has no tunables: the clock, reset and start sequencing
//! are fixed. What can be configured is the digit count requested from the
//! device and how chatty the harness is on stderr.
use std::path::Path;

use serde::Deserialize;

use crate::core::errors::ConfigError;

/// Number of digits requested when no configuration says otherwise
pub const DEFAULT_REQUESTED_DIGITS: u64 = 1_000_000;

/// Configuration for a driver run
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DriverConfig {
    /// Value driven on the `digits` port for the whole run.
    /// The harness never stops on it; only `done` ends a run.
    pub requested_digits: u64,
    /// Default log filter for the binaries, overridden by `RUST_LOG`
    pub log_level: String,
    /// Log a progress line every this many digits; 0 disables it
    pub progress_interval: u64,
}

impl DriverConfig {
    /// Create a new driver configuration with default values
    pub fn new() -> Self {
        Self {
            requested_digits: DEFAULT_REQUESTED_DIGITS,
            log_level: "info".to_string(),
            progress_interval: 100_000,
        }
    }

    /// Set the digit count driven on the `digits` port
    ///
    /// # Arguments
    /// * `digits` - Number of digits to request from the device
    ///
    /// # Returns
    /// A new configuration with the specified digit count
    ///
    /// # Note
    /// `from_toml_str` rejects counts wider than the 32-bit port; this builder does not
    pub fn with_requested_digits(mut self, digits: u64) -> Self {
        self.requested_digits = digits;
        self
    }

    /// Set the default log filter
    ///
    /// # Arguments
    /// * `level` - A `log` level name such as `"warn"` or `"debug"`
    ///
    /// # Returns
    /// A new configuration with the specified log level
    pub fn with_log_level(mut self, level: &str) -> Self {
        self.log_level = level.to_string();
        self
    }

    /// Set how often progress is logged
    ///
    /// # Arguments
    /// * `interval` - Digits between progress lines; 0 disables progress logging
    ///
    /// # Returns
    /// A new configuration with the specified progress interval
    pub fn with_progress_interval(mut self, interval: u64) -> Self {
        self.progress_interval = interval;
        self
    }

    /// Parse and validate a configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: DriverConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a configuration file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// The log level as a `log` filter
    pub fn level_filter(&self) -> Result<log::LevelFilter, ConfigError> {
        self.log_level
            .parse::<log::LevelFilter>()
            .map_err(|e| ConfigError::InvalidValue {
                field: "log_level",
                reason: e.to_string(),
            })
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.requested_digits > u64::from(u32::MAX) {
            return Err(ConfigError::InvalidValue {
                field: "requested_digits",
                reason: format!("{} does not fit the 32-bit digits port", self.requested_digits),
            });
        }
        self.level_filter()?;
        Ok(())
    }
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self::new()
    }
}
