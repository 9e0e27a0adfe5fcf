//! Vector index collaborators and index-time payload construction.
//!
//! The search path talks to an index through [`VectorIndex`]. Two adapters
//! ship with the crate: an in-memory brute-force index built from a caption
//! catalog, and a Qdrant REST client for an existing collection.

pub mod catalog;
pub mod memory;
pub mod qdrant;

pub use catalog::{load_catalog, parse_catalog, CatalogRecord, IndexReport, Indexer};
pub use memory::MemoryIndex;
pub use qdrant::QdrantIndex;

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

use crate::config::IndexConfig;
use crate::embedding::{resolve_env_var, TextEmbedder};
use crate::error::{LookbookError, SearchError, SearchResult};
use crate::types::SearchHit;

/// Trait that all vector indexes implement.
#[async_trait]
pub trait VectorIndex: Send + Sync {
    /// Index name for logging (e.g., "memory", "qdrant").
    fn name(&self) -> &str;

    /// Return up to `limit` hits for `vector`, highest similarity first.
    async fn similarity_search(&self, vector: &[f32], limit: usize) -> SearchResult<Vec<SearchHit>>;
}

/// Factory that creates the configured index.
pub struct IndexFactory;

impl IndexFactory {
    /// Create an index from the `[index]` config section.
    ///
    /// The memory provider reads `catalog` (after `~` expansion) and embeds
    /// every caption with `embedder`, so it has to be the same embedder the
    /// retriever queries with.
    pub async fn create(
        config: &IndexConfig,
        embedder: Arc<dyn TextEmbedder>,
    ) -> Result<Arc<dyn VectorIndex>, LookbookError> {
        match config.provider.as_str() {
            "memory" => {
                let path = config.catalog_path();
                let records = load_catalog(&path)?;
                let (index, report) = Indexer::new(embedder).index_captions(records).await?;
                tracing::info!(
                    indexed = report.indexed,
                    catalog = %path.display(),
                    "Built in-memory index"
                );
                Ok(Arc::new(index))
            }
            "qdrant" => {
                let api_key = resolve_env_var(&config.api_key);
                Ok(Arc::new(QdrantIndex::new(
                    &config.url,
                    &config.collection,
                    api_key.as_deref(),
                    Duration::from_millis(config.timeout_ms),
                )))
            }
            other => Err(SearchError::search(format!("Unknown index provider: {other}")).into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embedding::HashingEmbedder;

    #[tokio::test]
    async fn test_factory_builds_memory_index_from_catalog() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.jsonl");
        std::fs::write(
            &path,
            "{\"image_name\": \"a.jpg\", \"caption\": \"a red tie\"}\n\
             {\"image_name\": \"b.jpg\", \"caption\": \"a blue dress\"}\n",
        )
        .unwrap();

        let config = IndexConfig {
            catalog: path.to_string_lossy().into_owned(),
            ..Default::default()
        };
        let index = IndexFactory::create(&config, Arc::new(HashingEmbedder::new(64)))
            .await
            .unwrap();
        assert_eq!(index.name(), "memory");
    }

    #[tokio::test]
    async fn test_factory_missing_catalog() {
        let config = IndexConfig {
            catalog: "/definitely/not/here/catalog.jsonl".to_string(),
            ..Default::default()
        };
        let err = IndexFactory::create(&config, Arc::new(HashingEmbedder::new(64)))
            .await
            .err()
            .unwrap();
        assert!(matches!(err, LookbookError::Catalog(_)));
    }

    #[tokio::test]
    async fn test_factory_creates_qdrant() {
        let config = IndexConfig {
            provider: "qdrant".to_string(),
            ..Default::default()
        };
        let index = IndexFactory::create(&config, Arc::new(HashingEmbedder::new(64)))
            .await
            .unwrap();
        assert_eq!(index.name(), "qdrant");
    }

    #[tokio::test]
    async fn test_factory_rejects_unknown_provider() {
        let config = IndexConfig {
            provider: "pinecone".to_string(),
            ..Default::default()
        };
        let err = IndexFactory::create(&config, Arc::new(HashingEmbedder::new(64)))
            .await
            .err()
            .unwrap();
        assert!(err.to_string().contains("Unknown index provider"));
    }
}
