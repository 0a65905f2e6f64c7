//! Configuration loading — TOML file with environment variable overrides.
//!
//! Looks for `homedash.toml` in the working directory. Every field has a
//! sensible default so the file is optional. Environment variables take
//! precedence over file values.

use std::path::Path;
use std::time::Duration;

use homedash_domain::id::DeviceKind;
use serde::Deserialize;

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Brightness animation settings.
    pub animation: AnimationConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
    /// Devices registered at start-up, in order.
    pub devices: Vec<DeviceSeed>,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    /// Milliseconds between two ramp steps.
    pub tick_ms: u64,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

/// A device to register before the console starts.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DeviceSeed {
    pub kind: DeviceKind,
    pub id: String,
}

impl Config {
    /// Load configuration from `homedash.toml` (if present) then apply
    /// environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but is malformed, or if the
    /// resulting configuration is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::from_file("homedash.toml")?;
        config.apply_overrides(|name| std::env::var(name).ok());
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    /// Apply overrides read through `lookup`, later names winning.
    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(tick_ms) = lookup("HOMEDASH_TICK_MS").and_then(|v| v.parse().ok()) {
            self.animation.tick_ms = tick_ms;
        }
        if let Some(val) = lookup("HOMEDASH_LOG") {
            self.logging.filter = val;
        }
        if let Some(val) = lookup("RUST_LOG") {
            self.logging.filter = val;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.animation.tick_ms == 0 {
            return Err(ConfigError::Validation(
                "animation.tick_ms must be non-zero".to_string(),
            ));
        }
        if let Some(seed) = self.devices.iter().find(|d| d.id.trim().is_empty()) {
            return Err(ConfigError::Validation(format!(
                "{} seed has an empty id",
                seed.kind
            )));
        }
        Ok(())
    }

    /// Period of the brightness animation.
    #[must_use]
    pub fn tick_period(&self) -> Duration {
        Duration::from_millis(self.animation.tick_ms)
    }
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self { tick_ms: 100 }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "homedashd=info,homedash_app=info".to_string(),
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
}
