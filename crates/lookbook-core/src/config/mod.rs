//! Configuration management for Lookbook.
//!
//! Configuration is loaded from `~/.lookbook/config.toml` (or the platform
//! config directory) with defaults for every field. The fusion, diversity and
//! boost defaults are the tuned re-ranking constants.

mod types;
mod validate;

pub use types::*;

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Root configuration structure for Lookbook.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Search call settings
    pub search: SearchConfig,

    /// Similarity-weighted fusion weights
    pub fusion: FusionWeights,

    /// Diversity suppression settings
    pub diversity: DiversityConfig,

    /// Attribute boost settings
    pub boost: BoostConfig,

    /// Embedding collaborator settings
    pub embedding: EmbeddingConfig,

    /// Vector index collaborator settings
    pub index: IndexConfig,

    /// Output settings
    pub output: OutputConfig,

    /// Logging settings
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from the default location.
    ///
    /// Returns default configuration if the file doesn't exist.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse and validate configuration from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default config file path.
    ///
    /// Uses platform-appropriate directories:
    /// - macOS: ~/Library/Application Support/com.lookbook.lookbook/config.toml
    /// - Linux: ~/.config/lookbook/config.toml
    /// - Windows: C:\Users\<User>\AppData\Roaming\lookbook\config\config.toml
    ///
    /// Falls back to ~/.lookbook/config.toml if directory detection fails.
    pub fn default_path() -> PathBuf {
        directories::ProjectDirs::from("com", "lookbook", "lookbook")
            .map(|dirs| dirs.config_dir().to_path_buf().join("config.toml"))
            .unwrap_or_else(|| {
                let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
                PathBuf::from(home).join(".lookbook").join("config.toml")
            })
    }

    /// Number of candidates requested from the index for `k` results.
    pub fn search_limit(&self, k: usize) -> usize {
        k.saturating_mul(self.search.oversample)
    }

    /// Serialize the config to a pretty TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ValidationError(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rerank::{DiversityStrategy, FusionKind};

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.search.top_k, 3);
        assert_eq!(config.search.oversample, 5);
        assert_eq!(config.search.fusion, FusionKind::Weighted);
        assert_eq!(config.diversity.strategy, DiversityStrategy::HalfSeeded);
        assert!((config.fusion.base - 0.40).abs() < f32::EPSILON);
        assert!((config.boost.max_contribution - 0.5).abs() < f32::EPSILON);
    }

    #[test]
    fn test_config_to_toml() {
        let config = Config::default();
        let toml = config.to_toml().unwrap();
        assert!(toml.contains("[search]"));
        assert!(toml.contains("[boost]"));
        assert!(toml.contains("fusion = \"weighted\""));
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config = Config::from_toml(
            r#"
            [search]
            top_k = 5
            fusion = "attribute_boost"

            [diversity]
            strategy = "sequential"
            "#,
        )
        .unwrap();
        assert_eq!(config.search.top_k, 5);
        assert_eq!(config.search.oversample, 5);
        assert_eq!(config.search.fusion, FusionKind::AttributeBoost);
        assert_eq!(config.diversity.strategy, DiversityStrategy::Sequential);
        assert!((config.diversity.penalty - 0.3).abs() < f32::EPSILON);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[index]\ncollection = \"lookbook\"\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.index.collection, "lookbook");
        assert_eq!(config.index.provider, "memory");
    }

    #[test]
    fn test_load_rejects_invalid_values() {
        let err = Config::from_toml("[search]\ntop_k = 0\n").unwrap_err();
        assert!(err.to_string().contains("top_k"));
    }

    #[test]
    fn test_roundtrip_through_toml() {
        let toml = Config::default().to_toml().unwrap();
        let parsed = Config::from_toml(&toml).unwrap();
        assert_eq!(parsed.embedding.dimensions, 512);
        assert_eq!(parsed.index.collection, "fashion");
    }

    #[test]
    fn test_search_limit_oversamples() {
        let config = Config::default();
        assert_eq!(config.search_limit(3), 15);
        assert_eq!(config.search_limit(0), 0);
    }

    #[test]
    fn test_catalog_path_expands_tilde() {
        let mut config = Config::default();
        config.index.catalog = "/tmp/catalog.jsonl".to_string();
        assert_eq!(config.index.catalog_path(), PathBuf::from("/tmp/catalog.jsonl"));

        config.index.catalog = "~/catalog.jsonl".to_string();
        assert!(!config.index.catalog_path().to_string_lossy().starts_with('~'));
    }
}
