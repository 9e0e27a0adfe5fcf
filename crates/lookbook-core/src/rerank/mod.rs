//! Re-ranking of similarity-search candidates.
//!
//! Independent signals (composition, diversity, attribute boost, caption
//! uniqueness) annotate each candidate; a [`FusionPolicy`] merges them into
//! `final_score`; the batch is sorted and deduplicated to the top k.

pub mod boost;
pub mod composition;
pub mod dedup;
pub mod diversity;
pub mod fusion;

pub use boost::AttributeBooster;
pub use composition::CompositionScorer;
pub use dedup::Deduplicator;
pub use diversity::{DiversityStrategy, DiversitySuppressor};
pub use fusion::{BoostFusion, FusionKind, FusionPolicy, WeightedFusion};

use std::cmp::Ordering;

use crate::attributes::AttributeExtractor;
use crate::types::{Candidate, QueryAttributes};

/// Per-search state owned by the fusion step and dropped after the call.
pub struct ScoringContext {
    /// Raw query text
    pub query: String,

    /// Query embedding from the embedding collaborator
    pub query_embedding: Vec<f32>,

    /// Attributes parsed from the query
    pub query_attributes: QueryAttributes,

    /// Candidates in incoming rank order
    pub candidates: Vec<Candidate>,

    /// Caption embeddings aligned with `candidates`, when the policy needs them
    pub caption_embeddings: Option<Vec<Vec<f32>>>,
}

impl ScoringContext {
    /// Build a context, parsing the query's attributes.
    pub fn new(query: impl Into<String>, query_embedding: Vec<f32>, candidates: Vec<Candidate>) -> Self {
        let query = query.into();
        let query_attributes = AttributeExtractor::extract(&query);
        Self {
            query,
            query_embedding,
            query_attributes,
            candidates,
            caption_embeddings: None,
        }
    }

    /// Attach caption embeddings, one per candidate in order.
    pub fn with_caption_embeddings(mut self, embeddings: Vec<Vec<f32>>) -> Self {
        self.caption_embeddings = Some(embeddings);
        self
    }

    /// Candidate captions in order, for batched embedding.
    pub fn captions(&self) -> Vec<String> {
        self.candidates.iter().map(|c| c.caption.clone()).collect()
    }
}

/// Applies a fusion policy and orders the result.
pub struct Reranker {
    policy: Box<dyn FusionPolicy>,
}

impl Reranker {
    pub fn new(policy: Box<dyn FusionPolicy>) -> Self {
        Self { policy }
    }

    /// The active fusion policy.
    pub fn policy(&self) -> &dyn FusionPolicy {
        self.policy.as_ref()
    }

    /// Fuse scores and return candidates sorted by `final_score` descending.
    ///
    /// The sort is stable: ties keep their incoming rank order.
    pub fn rerank(&self, mut ctx: ScoringContext) -> Vec<Candidate> {
        self.policy.fuse(&mut ctx);

        let mut candidates = ctx.candidates;
        sort_by_final_score(&mut candidates);

        tracing::debug!(
            policy = self.policy.name(),
            candidates = candidates.len(),
            top_score = candidates.first().map(|c| c.final_score),
            "Reranked candidates"
        );
        candidates
    }
}

/// Stable descending sort by `final_score`; incomparable scores tie.
pub fn sort_by_final_score(candidates: &mut [Candidate]) {
    candidates.sort_by(|a, b| {
        b.final_score
            .partial_cmp(&a.final_score)
            .unwrap_or(Ordering::Equal)
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::types::StructuredAttributes;

    fn candidate(id: &str, base: f32, caption: &str) -> Candidate {
        Candidate {
            id: id.to_string(),
            base_score: base,
            caption: caption.to_string(),
            image_identity: format!("{id}.jpg"),
            attributes: AttributeExtractor::extract_indexed(caption),
            final_score: 0.0,
            breakdown: None,
        }
    }

    #[test]
    fn test_context_parses_query_attributes() {
        let ctx = ScoringContext::new("a bright yellow raincoat", vec![], vec![]);
        assert!(ctx.query_attributes.colors.contains("bright yellow"));
        assert!(ctx.query_attributes.clothing.contains("raincoat"));
        // Style inference is index-time only
        assert!(ctx.query_attributes.style.is_empty());
    }

    #[test]
    fn test_captions_in_order() {
        let ctx = ScoringContext::new(
            "q",
            vec![],
            vec![candidate("a", 0.1, "first"), candidate("b", 0.2, "second")],
        );
        assert_eq!(ctx.captions(), vec!["first", "second"]);
    }

    #[test]
    fn test_rerank_sorts_descending() {
        let reranker = Reranker::new(FusionKind::AttributeBoost.build(&Config::default()));
        let ctx = ScoringContext::new(
            "a red jacket",
            vec![],
            vec![
                candidate("plain", 0.6, "a person outdoors"),
                candidate("match", 0.55, "a red jacket"),
            ],
        );
        let ranked = reranker.rerank(ctx);
        assert_eq!(ranked[0].id, "match");
        assert!(ranked[0].final_score >= ranked[1].final_score);
    }

    #[test]
    fn test_sort_is_stable_for_ties() {
        let mut batch: Vec<Candidate> = ["a", "b", "c"]
            .iter()
            .map(|id| {
                let mut c = candidate(id, 0.5, "");
                c.final_score = 0.5;
                c.attributes = StructuredAttributes::default();
                c
            })
            .collect();
        sort_by_final_score(&mut batch);
        let ids: Vec<&str> = batch.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }
}
