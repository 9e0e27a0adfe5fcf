//! The search call.
//!
//! ```text
//! query → embed → similarity_search(k × oversample) → candidates
//!       → [embed captions] → fuse → sort → dedup → top k
//! ```

use std::sync::Arc;
use std::time::Instant;

use crate::config::Config;
use crate::embedding::TextEmbedder;
use crate::error::{SearchError, SearchResult};
use crate::index::VectorIndex;
use crate::rerank::{Deduplicator, FusionKind, Reranker, ScoringContext};
use crate::types::Candidate;

/// Per-call overrides of the configured search settings.
#[derive(Debug, Clone, Copy, Default)]
pub struct SearchOptions {
    /// Number of unique images to return (defaults to `search.top_k`)
    pub top_k: Option<usize>,

    /// Fusion policy (defaults to `search.fusion`)
    pub fusion: Option<FusionKind>,
}

/// Runs searches against one embedder and one index.
pub struct Retriever {
    config: Config,
    embedder: Arc<dyn TextEmbedder>,
    index: Arc<dyn VectorIndex>,
}

impl Retriever {
    pub fn new(config: Config, embedder: Arc<dyn TextEmbedder>, index: Arc<dyn VectorIndex>) -> Self {
        Self {
            config,
            embedder,
            index,
        }
    }

    /// Get a reference to the configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Search with the configured defaults, soft-failing to an empty list.
    ///
    /// Collaborator failures and empty index results are logged at `warn`
    /// and produce no results.
    pub async fn search(&self, query: &str, options: SearchOptions) -> Vec<Candidate> {
        match self.try_search(query, options).await {
            Ok(results) => results,
            Err(e) => {
                tracing::warn!(query, error = %e, "Search returned no results");
                Vec::new()
            }
        }
    }

    /// Search, surfacing the first collaborator failure.
    ///
    /// Returns at most `k` candidates with distinct image identities, in
    /// descending `final_score` order. `k == 0` returns an empty list without
    /// calling any collaborator.
    pub async fn try_search(&self, query: &str, options: SearchOptions) -> SearchResult<Vec<Candidate>> {
        let k = options.top_k.unwrap_or(self.config.search.top_k);
        if k == 0 {
            return Ok(Vec::new());
        }
        let kind = options.fusion.unwrap_or(self.config.search.fusion);
        let reranker = Reranker::new(kind.build(&self.config));
        let start = Instant::now();

        let query_embedding = self.embedder.embed(query).await?;

        let limit = self.config.search_limit(k);
        let hits = self.index.similarity_search(&query_embedding, limit).await?;
        if hits.is_empty() {
            return Err(SearchError::EmptyResult);
        }
        let retrieved = hits.len();

        let candidates: Vec<Candidate> = hits.into_iter().map(Candidate::from_hit).collect();
        let mut ctx = ScoringContext::new(query, query_embedding, candidates);

        if reranker.policy().needs_caption_embeddings() {
            let captions = ctx.captions();
            let embeddings = self.embedder.embed_batch(&captions).await?;
            if embeddings.len() != captions.len() {
                return Err(SearchError::encoding(format!(
                    "Embedder returned {} vectors for {} captions",
                    embeddings.len(),
                    captions.len()
                )));
            }
            ctx = ctx.with_caption_embeddings(embeddings);
        }

        let ranked = reranker.rerank(ctx);
        let results = Deduplicator::select(ranked, k);

        tracing::debug!(
            embedder = self.embedder.name(),
            index = self.index.name(),
            policy = reranker.policy().name(),
            retrieved,
            returned = results.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Search complete"
        );
        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embedding::HashingEmbedder;
    use crate::index::MemoryIndex;
    use crate::types::{ImagePayload, SearchHit};
    use async_trait::async_trait;

    struct FailingEmbedder;

    #[async_trait]
    impl TextEmbedder for FailingEmbedder {
        fn name(&self) -> &str {
            "failing"
        }

        fn dimensions(&self) -> usize {
            4
        }

        async fn embed(&self, _text: &str) -> SearchResult<Vec<f32>> {
            Err(SearchError::encoding("model offline"))
        }
    }

    /// Embeds queries but fails on caption batches.
    struct QueryOnlyEmbedder(HashingEmbedder);

    #[async_trait]
    impl TextEmbedder for QueryOnlyEmbedder {
        fn name(&self) -> &str {
            "query-only"
        }

        fn dimensions(&self) -> usize {
            self.0.dimensions()
        }

        async fn embed(&self, text: &str) -> SearchResult<Vec<f32>> {
            Ok(self.0.embed_text(text))
        }

        async fn embed_batch(&self, _texts: &[String]) -> SearchResult<Vec<Vec<f32>>> {
            Err(SearchError::encoding("batch rejected"))
        }
    }

    struct FixedIndex(Vec<SearchHit>);

    #[async_trait]
    impl VectorIndex for FixedIndex {
        fn name(&self) -> &str {
            "fixed"
        }

        async fn similarity_search(&self, _vector: &[f32], limit: usize) -> SearchResult<Vec<SearchHit>> {
            Ok(self.0.iter().take(limit).cloned().collect())
        }
    }

    fn hit(id: &str, image: &str, score: f32, caption: &str) -> SearchHit {
        SearchHit {
            id: id.to_string(),
            score,
            payload: ImagePayload {
                image_name: Some(image.to_string()),
                caption: Some(caption.to_string()),
                ..Default::default()
            },
        }
    }

    fn retriever(embedder: Arc<dyn TextEmbedder>, hits: Vec<SearchHit>) -> Retriever {
        Retriever::new(Config::default(), embedder, Arc::new(FixedIndex(hits)))
    }

    #[tokio::test]
    async fn test_results_are_unique_and_sorted() {
        let r = retriever(
            Arc::new(HashingEmbedder::new(128)),
            vec![
                hit("1", "a.jpg", 0.9, "a red tie and a white shirt"),
                hit("2", "a.jpg", 0.85, "a man in a red tie"),
                hit("3", "b.jpg", 0.8, "blue jeans"),
                hit("4", "c.jpg", 0.7, "a white shirt"),
            ],
        );
        let results = r
            .try_search("a red tie and a white shirt", SearchOptions::default())
            .await
            .unwrap();

        assert_eq!(results.len(), 3);
        let identities: std::collections::HashSet<&str> =
            results.iter().map(|c| c.image_identity.as_str()).collect();
        assert_eq!(identities.len(), 3);
        for pair in results.windows(2) {
            assert!(pair[0].final_score >= pair[1].final_score);
        }
    }

    #[tokio::test]
    async fn test_top_k_override_and_zero() {
        let r = retriever(
            Arc::new(HashingEmbedder::new(64)),
            vec![
                hit("1", "a.jpg", 0.9, "red dress"),
                hit("2", "b.jpg", 0.8, "blue dress"),
            ],
        );
        let one = r
            .try_search("dress", SearchOptions { top_k: Some(1), fusion: None })
            .await
            .unwrap();
        assert_eq!(one.len(), 1);

        let none = r
            .try_search("dress", SearchOptions { top_k: Some(0), fusion: None })
            .await
            .unwrap();
        assert!(none.is_empty());
    }

    #[tokio::test]
    async fn test_encoding_failure() {
        let r = retriever(Arc::new(FailingEmbedder), vec![hit("1", "a.jpg", 0.9, "x")]);
        let err = r.try_search("red tie", SearchOptions::default()).await.unwrap_err();
        assert!(matches!(err, SearchError::Encoding { .. }));
        assert!(r.search("red tie", SearchOptions::default()).await.is_empty());
    }

    #[tokio::test]
    async fn test_empty_index_result() {
        let r = retriever(Arc::new(HashingEmbedder::new(64)), vec![]);
        let err = r.try_search("red tie", SearchOptions::default()).await.unwrap_err();
        assert!(matches!(err, SearchError::EmptyResult));
        assert!(r.search("red tie", SearchOptions::default()).await.is_empty());
    }

    #[tokio::test]
    async fn test_caption_batch_failure_is_not_partial() {
        let hits = vec![hit("1", "a.jpg", 0.9, "red tie"), hit("2", "b.jpg", 0.8, "white shirt")];
        let r = retriever(Arc::new(QueryOnlyEmbedder(HashingEmbedder::new(64))), hits);

        let weighted = r.try_search("red tie", SearchOptions::default()).await;
        assert!(matches!(weighted, Err(SearchError::Encoding { .. })));

        // The boost policy never embeds captions
        let boosted = r
            .try_search(
                "red tie",
                SearchOptions {
                    top_k: None,
                    fusion: Some(FusionKind::AttributeBoost),
                },
            )
            .await
            .unwrap();
        assert_eq!(boosted.len(), 2);
    }

    #[tokio::test]
    async fn test_against_memory_index() {
        let embedder = Arc::new(HashingEmbedder::new(256));
        let mut index = MemoryIndex::new();
        for (i, caption) in ["a yellow raincoat on a rainy street", "a navy suit in an office"]
            .iter()
            .enumerate()
        {
            index.insert(
                i.to_string(),
                embedder.embed_text(caption),
                ImagePayload {
                    image_name: Some(format!("{i}.jpg")),
                    caption: Some(caption.to_string()),
                    ..Default::default()
                },
            );
        }
        let r = Retriever::new(Config::default(), embedder, Arc::new(index));
        let results = r
            .search("A person in a bright yellow raincoat.", SearchOptions::default())
            .await;
        assert_eq!(results[0].image_identity, "0.jpg");
        assert!(results[0].breakdown.is_some());
    }
}
