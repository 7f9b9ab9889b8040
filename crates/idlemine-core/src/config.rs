//! Configuration loading and typed config structures for the engine.
//!
//! The canonical configuration lives in `idlemine-config.yaml` next to
//! the binary. This module defines strongly-typed structs that mirror
//! the YAML structure and provides a loader that reads and validates the
//! file. Every field has a default matching the original game's tuning,
//! so a missing file simply means "stock rules".

use std::path::Path;

use serde::Deserialize;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// A value is outside its allowed range.
    #[error("invalid configuration: {reason}")]
    Invalid {
        /// Explanation of what is wrong with the configuration.
        reason: String,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level engine configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct EngineConfig {
    /// Automatic accrual timing.
    #[serde(default)]
    pub accrual: AccrualConfig,

    /// Manual mining pacing.
    #[serde(default)]
    pub mining: MiningConfig,

    /// Offline catch-up bounds.
    #[serde(default)]
    pub offline: OfflineConfig,

    /// Save-slot storage settings.
    #[serde(default)]
    pub storage: StorageConfig,
}

impl EngineConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// Environment variables override YAML values for storage locations:
    /// - `IDLEMINE_REDIS_URL` overrides `storage.redis_url`
    /// - `IDLEMINE_SAVE_PATH` overrides `storage.save_path`
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read,
    /// [`ConfigError::Yaml`] if the content is not valid YAML, or
    /// [`ConfigError::Invalid`] if a value is out of range.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] or [`ConfigError::Invalid`] as for
    /// [`EngineConfig::from_file`].
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let mut config: Self = serde_yml::from_str(yaml)?;
        config.storage.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Check value ranges that serde cannot express.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.accrual.tick_interval_ms == 0 {
            return Err(ConfigError::Invalid {
                reason: "accrual.tick_interval_ms must be at least 1".to_owned(),
            });
        }
        if self.mining.step_interval_ms == 0 {
            return Err(ConfigError::Invalid {
                reason: "mining.step_interval_ms must be at least 1".to_owned(),
            });
        }
        if self.mining.step_percent == 0 || self.mining.step_percent > 100 {
            return Err(ConfigError::Invalid {
                reason: "mining.step_percent must be between 1 and 100".to_owned(),
            });
        }
        Ok(())
    }
}

/// Automatic accrual timing.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AccrualConfig {
    /// Milliseconds between accrual ticks.
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,

    /// Seconds between periodic autosaves (checked on productive ticks).
    #[serde(default = "default_autosave_interval_secs")]
    pub autosave_interval_secs: u64,
}

impl AccrualConfig {
    /// The tick period as a [`std::time::Duration`].
    pub const fn tick_interval(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.tick_interval_ms)
    }

    /// The autosave cadence as a [`chrono::Duration`].
    ///
    /// Saturates at the maximum representable duration for absurd
    /// configured values instead of overflowing.
    pub fn autosave_interval(&self) -> chrono::Duration {
        i64::try_from(self.autosave_interval_secs)
            .ok()
            .and_then(chrono::Duration::try_seconds)
            .unwrap_or(chrono::Duration::MAX)
    }
}

impl Default for AccrualConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: default_tick_interval_ms(),
            autosave_interval_secs: default_autosave_interval_secs(),
        }
    }
}

/// Manual mining pacing. The payout is independent of these values;
/// they only pace how fast the progress bar fills.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MiningConfig {
    /// Milliseconds between progress steps.
    #[serde(default = "default_step_interval_ms")]
    pub step_interval_ms: u64,

    /// Progress percent added per step (1..=100).
    #[serde(default = "default_step_percent")]
    pub step_percent: u8,
}

impl MiningConfig {
    /// The step period as a [`std::time::Duration`].
    pub const fn step_interval(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.step_interval_ms)
    }
}

impl Default for MiningConfig {
    fn default() -> Self {
        Self {
            step_interval_ms: default_step_interval_ms(),
            step_percent: default_step_percent(),
        }
    }
}

/// Offline catch-up bounds.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct OfflineConfig {
    /// Hard cap on credited offline time, in seconds.
    #[serde(default = "default_offline_cap_secs")]
    pub cap_secs: u64,
}

impl Default for OfflineConfig {
    fn default() -> Self {
        Self {
            cap_secs: default_offline_cap_secs(),
        }
    }
}

/// Which save-slot backend to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// Redis-compatible key-value store.
    Redis,
    /// JSON file on local disk.
    File,
    /// In-memory slot (state is lost on exit; useful for demos/tests).
    Memory,
}

/// Save-slot storage settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StorageConfig {
    /// Selected backend.
    #[serde(default = "default_backend")]
    pub backend: BackendKind,

    /// Save-file path (file backend).
    #[serde(default = "default_save_path")]
    pub save_path: String,

    /// Redis connection URL (redis backend).
    #[serde(default = "default_redis_url")]
    pub redis_url: String,

    /// Key holding the save record (redis backend).
    #[serde(default = "default_redis_key")]
    pub redis_key: String,

    /// Directory snapshot exports are written into.
    #[serde(default = "default_export_dir")]
    pub export_dir: String,
}

impl StorageConfig {
    /// Apply environment-variable overrides for storage locations.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var("IDLEMINE_REDIS_URL") {
            if !url.is_empty() {
                self.redis_url = url;
            }
        }
        if let Ok(path) = std::env::var("IDLEMINE_SAVE_PATH") {
            if !path.is_empty() {
                self.save_path = path;
            }
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: default_backend(),
            save_path: default_save_path(),
            redis_url: default_redis_url(),
            redis_key: default_redis_key(),
            export_dir: default_export_dir(),
        }
    }
}

const fn default_tick_interval_ms() -> u64 {
    100
}

const fn default_autosave_interval_secs() -> u64 {
    30
}

const fn default_step_interval_ms() -> u64 {
    50
}

const fn default_step_percent() -> u8 {
    2
}

const fn default_offline_cap_secs() -> u64 {
    86_400
}

const fn default_backend() -> BackendKind {
    BackendKind::File
}

fn default_save_path() -> String {
    "idlemine-save.json".to_owned()
}

fn default_redis_url() -> String {
    "redis://localhost:6379".to_owned()
}

fn default_redis_key() -> String {
    idlemine_store::SAVE_KEY.to_owned()
}

fn default_export_dir() -> String {
    ".".to_owned()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_stock_rules() {
        let config = EngineConfig::default();
        assert_eq!(config.accrual.tick_interval_ms, 100);
        assert_eq!(config.accrual.autosave_interval_secs, 30);
        assert_eq!(config.mining.step_interval_ms, 50);
        assert_eq!(config.mining.step_percent, 2);
        assert_eq!(config.offline.cap_secs, 86_400);
        assert_eq!(config.storage.backend, BackendKind::File);
    }

    #[test]
    fn empty_yaml_parses_to_defaults() {
        let config = EngineConfig::parse("{}").unwrap();
        assert_eq!(config, EngineConfig::default());
    }

    #[test]
    fn partial_yaml_overrides_only_named_fields() {
        let yaml = r"
accrual:
  autosave_interval_secs: 60
storage:
  backend: memory
";
        let config = EngineConfig::parse(yaml).unwrap();
        assert_eq!(config.accrual.autosave_interval_secs, 60);
        assert_eq!(config.accrual.tick_interval_ms, 100);
        assert_eq!(config.storage.backend, BackendKind::Memory);
    }

    #[test]
    fn zero_tick_interval_is_rejected() {
        let yaml = r"
accrual:
  tick_interval_ms: 0
";
        assert!(matches!(
            EngineConfig::parse(yaml),
            Err(ConfigError::Invalid { .. })
        ));
    }

    #[test]
    fn step_percent_over_100_is_rejected() {
        let yaml = r"
mining:
  step_percent: 150
";
        assert!(matches!(
            EngineConfig::parse(yaml),
            Err(ConfigError::Invalid { .. })
        ));
    }
}
