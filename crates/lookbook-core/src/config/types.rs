//! Sub-configuration structs with their defaults.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::rerank::{DiversityStrategy, FusionKind};

/// Search call settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Number of unique images returned
    pub top_k: usize,

    /// Candidates fetched per requested result (`limit = top_k * oversample`)
    pub oversample: usize,

    /// Fusion policy applied to the candidate batch
    pub fusion: FusionKind,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            top_k: 3,
            oversample: 5,
            fusion: FusionKind::Weighted,
        }
    }
}

/// Weights of the similarity-weighted fusion policy.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FusionWeights {
    /// Base similarity from the vector index
    pub base: f32,

    /// Query-to-caption embedding similarity
    pub direct: f32,

    /// Color-item composition score
    pub composition: f32,

    /// Caption-length uniqueness, centered at 0.5
    pub uniqueness: f32,

    /// Diversity score, centered at 1.0
    pub diversity: f32,
}

impl Default for FusionWeights {
    fn default() -> Self {
        Self {
            base: 0.40,
            direct: 0.30,
            composition: 0.20,
            uniqueness: 0.05,
            diversity: 0.05,
        }
    }
}

/// Diversity suppression settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DiversityConfig {
    /// How the selected set grows ("half_seeded" or "sequential")
    pub strategy: DiversityStrategy,

    /// Multiplier on the maximum similarity to already-selected captions
    pub penalty: f32,
}

impl Default for DiversityConfig {
    fn default() -> Self {
        Self {
            strategy: DiversityStrategy::HalfSeeded,
            penalty: 0.3,
        }
    }
}

/// Attribute boost weights and normalization.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BoostConfig {
    /// Per matching color
    pub colors: f32,

    /// Per matching clothing item
    pub clothing: f32,

    /// Per matching context term
    pub context: f32,

    /// Per matching style term
    pub style: f32,

    /// Empirical maximum raw boost the raw sum is divided by.
    /// 2.0 ≈ three colors, three garments, three context terms and two styles.
    pub normalization_max: f32,

    /// Cap on the normalized boost added to the base score
    pub max_contribution: f32,
}

impl Default for BoostConfig {
    fn default() -> Self {
        Self {
            colors: 0.20,
            clothing: 0.25,
            context: 0.15,
            style: 0.12,
            normalization_max: 2.0,
            max_contribution: 0.5,
        }
    }
}

/// Text embedding collaborator settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbeddingConfig {
    /// Provider: "hashing" (local, deterministic) or "http" (OpenAI-compatible)
    pub provider: String,

    /// Vector dimension
    pub dimensions: usize,

    /// Base URL of the embeddings endpoint (http provider)
    pub endpoint: String,

    /// API key (supports ${ENV_VAR} syntax)
    pub api_key: String,

    /// Model name sent to the endpoint
    pub model: String,

    /// Request timeout in milliseconds
    pub timeout_ms: u64,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            provider: "hashing".to_string(),
            dimensions: 512,
            endpoint: "http://localhost:8080/v1".to_string(),
            api_key: "${EMBEDDING_API_KEY}".to_string(),
            model: "clip-ViT-B-32".to_string(),
            timeout_ms: 30000,
        }
    }
}

/// Vector index collaborator settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexConfig {
    /// Provider: "memory" (built from a caption catalog) or "qdrant"
    pub provider: String,

    /// Caption catalog (JSON Lines) for the memory index
    pub catalog: String,

    /// Qdrant base URL
    pub url: String,

    /// Qdrant API key (supports ${ENV_VAR} syntax)
    pub api_key: String,

    /// Collection name
    pub collection: String,

    /// Request timeout in milliseconds
    pub timeout_ms: u64,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            provider: "memory".to_string(),
            catalog: "~/.lookbook/catalog.jsonl".to_string(),
            url: "http://localhost:6333".to_string(),
            api_key: "${QDRANT_API_KEY}".to_string(),
            collection: "fashion".to_string(),
            timeout_ms: 10000,
        }
    }
}

impl IndexConfig {
    /// Resolved caption catalog path (with ~ expansion).
    pub fn catalog_path(&self) -> PathBuf {
        PathBuf::from(shellexpand::tilde(&self.catalog).into_owned())
    }
}

/// Output settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Default output format ("json" or "jsonl")
    pub format: String,

    /// Pretty-print JSON output
    pub pretty: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: "json".to_string(),
            pretty: false,
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: error, warn, info, debug, trace
    pub level: String,

    /// Log format: "pretty" or "json"
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}
