//! Text embedding collaborators.
//!
//! The retriever only needs two things from an embedder: one vector for the
//! query and one vector per candidate caption. Both come through the
//! [`TextEmbedder`] trait so the search path never depends on a particular
//! model host.
//!
//! # Usage
//!
//! ```rust,ignore
//! use lookbook_core::embedding::EmbedderFactory;
//! use lookbook_core::Config;
//!
//! let config = Config::default();
//! let embedder = EmbedderFactory::create(&config.embedding)?;
//! let vector = embedder.embed("a red tie and a white shirt").await?;
//! ```

pub mod hashing;
pub mod http;

pub use hashing::HashingEmbedder;
pub use http::HttpEmbedder;

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

use crate::config::EmbeddingConfig;
use crate::error::{SearchError, SearchResult};

/// Trait that all text embedders implement.
///
/// Uses `async_trait` because native async fn in trait is not object-safe
/// (the retriever holds an `Arc<dyn TextEmbedder>`).
#[async_trait]
pub trait TextEmbedder: Send + Sync {
    /// Embedder name for logging (e.g., "hashing", "http").
    fn name(&self) -> &str;

    /// Length of every vector this embedder returns.
    fn dimensions(&self) -> usize;

    /// Embed a single text.
    async fn embed(&self, text: &str) -> SearchResult<Vec<f32>>;

    /// Embed a batch of texts, one vector per input in input order.
    ///
    /// The default calls [`TextEmbedder::embed`] sequentially.
    async fn embed_batch(&self, texts: &[String]) -> SearchResult<Vec<Vec<f32>>> {
        let mut vectors = Vec::with_capacity(texts.len());
        for text in texts {
            vectors.push(self.embed(text).await?);
        }
        Ok(vectors)
    }
}

/// Resolve `${ENV_VAR}` references in config strings.
pub fn resolve_env_var(value: &str) -> Option<String> {
    if value.starts_with("${") && value.ends_with('}') {
        let var_name = &value[2..value.len() - 1];
        std::env::var(var_name).ok()
    } else if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Factory that creates the configured embedder.
pub struct EmbedderFactory;

impl EmbedderFactory {
    /// Create an embedder from the `[embedding]` config section.
    ///
    /// The http provider works without an API key; local model servers
    /// usually don't need one.
    pub fn create(config: &EmbeddingConfig) -> SearchResult<Arc<dyn TextEmbedder>> {
        match config.provider.as_str() {
            "hashing" => Ok(Arc::new(HashingEmbedder::new(config.dimensions))),
            "http" => {
                let api_key = resolve_env_var(&config.api_key);
                Ok(Arc::new(HttpEmbedder::new(
                    &config.endpoint,
                    api_key.as_deref(),
                    &config.model,
                    config.dimensions,
                    Duration::from_millis(config.timeout_ms),
                )))
            }
            other => Err(SearchError::encoding(format!(
                "Unknown embedding provider: {other}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_env_var() {
        // Non-env-var strings pass through
        assert_eq!(resolve_env_var("plain-key"), Some("plain-key".to_string()));
        // Empty returns None
        assert_eq!(resolve_env_var(""), None);
        // Unset env var returns None
        assert_eq!(resolve_env_var("${DEFINITELY_NOT_SET_XYZ_123}"), None);
    }

    #[test]
    fn test_factory_creates_hashing_by_default() {
        let embedder = EmbedderFactory::create(&EmbeddingConfig::default()).unwrap();
        assert_eq!(embedder.name(), "hashing");
        assert_eq!(embedder.dimensions(), 512);
    }

    #[test]
    fn test_factory_creates_http() {
        let config = EmbeddingConfig {
            provider: "http".to_string(),
            ..Default::default()
        };
        let embedder = EmbedderFactory::create(&config).unwrap();
        assert_eq!(embedder.name(), "http");
    }

    #[test]
    fn test_factory_rejects_unknown_provider() {
        let config = EmbeddingConfig {
            provider: "siglip".to_string(),
            ..Default::default()
        };
        let err = EmbedderFactory::create(&config).err().unwrap();
        assert!(err.to_string().contains("Unknown embedding provider"));
    }

    #[tokio::test]
    async fn test_default_embed_batch_preserves_order() {
        let embedder = HashingEmbedder::new(64);
        let texts = vec!["red tie".to_string(), "blue jeans".to_string()];
        let batch = embedder.embed_batch(&texts).await.unwrap();
        assert_eq!(batch.len(), 2);
        assert_eq!(batch[0], embedder.embed("red tie").await.unwrap());
        assert_eq!(batch[1], embedder.embed("blue jeans").await.unwrap());
    }
}
