//! Lookbook Core - Fashion image retrieval and re-ranking.
//!
//! Lookbook answers natural-language fashion queries against an index of
//! captioned images. A vector index supplies the first-pass candidates; the
//! re-ranker scores them on structured attributes and caption signals and
//! returns the top unique images.
//!
//! # Architecture
//!
//! ```text
//! Query → Embed → Similarity search → Candidates
//!       → Composition / Diversity / Uniqueness / Attribute boost
//!       → Fusion → Sort → Dedup → Top k
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! use lookbook_core::{Config, Lookbook, SearchOptions};
//!
//! #[tokio::main]
//! async fn main() -> lookbook_core::Result<()> {
//!     let config = Config::load()?;
//!     let lookbook = Lookbook::new(config).await?;
//!
//!     let results = lookbook
//!         .search("A red tie and a white shirt in a formal setting.", SearchOptions::default())
//!         .await;
//!     for r in &results {
//!         println!("{} {:.3}", r.image_identity, r.final_score);
//!     }
//!     Ok(())
//! }
//! ```

// Module declarations
pub mod attributes;
pub mod config;
pub mod embedding;
pub mod error;
pub mod index;
pub mod math;
pub mod output;
pub mod rerank;
pub mod search;
pub mod types;

// Re-exports for convenient access
pub use attributes::{AttributeCategory, AttributeExtractor, StyleInferrer};
pub use config::Config;
pub use embedding::{EmbedderFactory, TextEmbedder};
pub use error::{CatalogError, ConfigError, LookbookError, Result, SearchError, SearchResult};
pub use index::{IndexFactory, VectorIndex};
pub use output::{OutputFormat, OutputWriter, RankedResult};
pub use rerank::{FusionKind, Reranker, ScoringContext};
pub use search::{Retriever, SearchOptions};
pub use types::{Candidate, ImagePayload, ScoreBreakdown, SearchHit, StructuredAttributes};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Lookbook engine - the main entry point for searching.
///
/// Wires the configured embedder and index into a [`Retriever`].
pub struct Lookbook {
    retriever: Retriever,
}

impl Lookbook {
    /// Create a new Lookbook instance with the given configuration.
    ///
    /// With the memory index provider this reads and embeds the whole
    /// caption catalog.
    pub async fn new(config: Config) -> Result<Self> {
        tracing::debug!("Initializing Lookbook v{}", VERSION);
        let embedder = EmbedderFactory::create(&config.embedding)?;
        let index = IndexFactory::create(&config.index, embedder.clone()).await?;
        tracing::debug!(
            embedder = embedder.name(),
            index = index.name(),
            "Collaborators ready"
        );
        Ok(Self {
            retriever: Retriever::new(config, embedder, index),
        })
    }

    /// Create a new Lookbook instance with the config file's settings.
    pub async fn with_defaults() -> Result<Self> {
        let config = Config::load()?;
        Self::new(config).await
    }

    /// Get a reference to the current configuration.
    pub fn config(&self) -> &Config {
        self.retriever.config()
    }

    /// The underlying retriever.
    pub fn retriever(&self) -> &Retriever {
        &self.retriever
    }

    /// Search, soft-failing to an empty list. See [`Retriever::search`].
    pub async fn search(&self, query: &str, options: SearchOptions) -> Vec<Candidate> {
        self.retriever.search(query, options).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }

    #[tokio::test]
    async fn test_lookbook_new_from_catalog() {
        let dir = tempfile::tempdir().unwrap();
        let catalog = dir.path().join("catalog.jsonl");
        std::fs::write(
            &catalog,
            "{\"image_name\": \"suit.jpg\", \"caption\": \"a navy suit with a red tie\"}\n",
        )
        .unwrap();

        let mut config = Config::default();
        config.index.catalog = catalog.to_string_lossy().into_owned();
        let lookbook = Lookbook::new(config).await.unwrap();
        assert_eq!(lookbook.config().search.top_k, 3);

        let results = lookbook.search("red tie", SearchOptions::default()).await;
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].image_identity, "suit.jpg");
    }

    #[tokio::test]
    async fn test_lookbook_new_missing_catalog() {
        let mut config = Config::default();
        config.index.catalog = "/no/such/catalog.jsonl".to_string();
        assert!(Lookbook::new(config).await.is_err());
    }
}
