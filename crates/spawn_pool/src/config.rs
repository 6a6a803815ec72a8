//! Pool configuration
//!
//! Configuration is plain serde data loadable from RON or TOML through the
//! [`Config`] trait, so hosts can ship pool tuning next to their other
//! config files.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration for the pool manager and the groups it creates.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PoolConfig {
    /// Upper bound on parked (idle) instances per group. A despawn that
    /// finds the idle list at this cap retires the instance instead of
    /// parking it.
    pub max_idle_per_group: usize,

    /// Prefix for group anchor names, so pooled instances are easy to spot
    /// in the host's scene hierarchy.
    pub pool_name_prefix: String,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            max_idle_per_group: 1024,
            pool_name_prefix: "pool_".to_owned(),
        }
    }
}

/// Configuration trait: serde-backed load/save with format chosen by file
/// extension (`.toml` or `.ron`).
pub trait Config: Serialize + for<'de> Deserialize<'de> + Default {
    /// Load configuration from file
    fn load_from_file(path: &str) -> Result<Self, ConfigError> {
        // Reject unknown extensions before touching the filesystem.
        let format = extension(path);
        if !matches!(format, Some("toml" | "ron")) {
            return Err(ConfigError::UnsupportedFormat(path.to_owned()));
        }

        let contents = std::fs::read_to_string(path)?;
        match format {
            Some("toml") => toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string())),
            Some("ron") => ron::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string())),
            _ => Err(ConfigError::UnsupportedFormat(path.to_owned())),
        }
    }

    /// Save configuration to file
    fn save_to_file(&self, path: &str) -> Result<(), ConfigError> {
        let contents = match extension(path) {
            Some("toml") => {
                toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?
            }
            Some("ron") => ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
                .map_err(|e| ConfigError::Serialize(e.to_string()))?,
            _ => return Err(ConfigError::UnsupportedFormat(path.to_owned())),
        };

        std::fs::write(path, contents).map_err(ConfigError::Io)
    }
}

impl Config for PoolConfig {}

fn extension(path: &str) -> Option<&str> {
    std::path::Path::new(path)
        .extension()
        .and_then(std::ffi::OsStr::to_str)
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("parse error: {0}")]
    Parse(String),

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialize(String),

    /// Unsupported format
    #[error("unsupported config format: {0}")]
    UnsupportedFormat(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let config = PoolConfig::default();
        assert_eq!(config.max_idle_per_group, 1024);
        assert_eq!(config.pool_name_prefix, "pool_");
    }

    #[test]
    fn test_partial_ron_falls_back_to_defaults() {
        let config: PoolConfig = ron::from_str("(max_idle_per_group: 8)").unwrap();
        assert_eq!(config.max_idle_per_group, 8);
        assert_eq!(config.pool_name_prefix, "pool_");
    }

    #[test]
    fn test_toml_parse() {
        let config: PoolConfig =
            toml::from_str("max_idle_per_group = 4\npool_name_prefix = \"recycled_\"").unwrap();
        assert_eq!(config.max_idle_per_group, 4);
        assert_eq!(config.pool_name_prefix, "recycled_");
    }

    #[test]
    fn test_ron_file_round_trip() {
        let path = std::env::temp_dir().join("spawn_pool_config_round_trip.ron");
        let path = path.to_str().unwrap();

        let config = PoolConfig {
            max_idle_per_group: 2,
            pool_name_prefix: "recycled_".to_owned(),
        };
        config.save_to_file(path).unwrap();
        let loaded = PoolConfig::load_from_file(path).unwrap();
        let _ = std::fs::remove_file(path);

        assert_eq!(loaded.max_idle_per_group, 2);
        assert_eq!(loaded.pool_name_prefix, "recycled_");
    }

    #[test]
    fn test_unsupported_format_is_rejected() {
        let result = PoolConfig::load_from_file("pool.yaml");
        assert!(matches!(result, Err(ConfigError::UnsupportedFormat(_))));
    }
}
