//! Result-set diversification over caption embeddings.
//!
//! An approximate Maximal Marginal Relevance pass: each candidate is
//! compared against an already-selected set and lightly penalized for its
//! closest match. Duplicate images are handled by the deduplicator; this
//! signal targets near-duplicate descriptions of distinct images.

use serde::{Deserialize, Serialize};

use crate::math::cosine_similarity;

/// How the selected set grows while candidates are processed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiversityStrategy {
    /// Only the first half of the incoming candidates join the selected set.
    /// Candidates in the second half are compared against that frozen half.
    #[default]
    HalfSeeded,
    /// Every processed candidate joins the selected set (strict sequential MMR).
    Sequential,
}

/// Computes one diversity score per candidate.
pub struct DiversitySuppressor {
    strategy: DiversityStrategy,
    penalty: f32,
}

impl DiversitySuppressor {
    /// Create a suppressor. `penalty` scales the maximum similarity
    /// (0.3 keeps every score at or above 0.7 for non-negative similarities).
    pub fn new(strategy: DiversityStrategy, penalty: f32) -> Self {
        Self { strategy, penalty }
    }

    /// Diversity scores for `embeddings`, given in incoming rank order.
    ///
    /// The first candidate scores 1.0; each later one scores
    /// `1.0 - max_similarity_to_selected * penalty`.
    pub fn scores(&self, embeddings: &[Vec<f32>]) -> Vec<f32> {
        let n = embeddings.len();
        let seed_len = n / 2;
        let mut selected: Vec<&[f32]> = Vec::new();
        let mut scores = Vec::with_capacity(n);

        for (i, embedding) in embeddings.iter().enumerate() {
            let score = selected
                .iter()
                .map(|other| cosine_similarity(embedding, other))
                .fold(None, |max: Option<f32>, sim| {
                    Some(max.map_or(sim, |m| m.max(sim)))
                })
                .map_or(1.0, |max_sim| 1.0 - max_sim * self.penalty);
            scores.push(score);

            let joins = match self.strategy {
                DiversityStrategy::HalfSeeded => i < seed_len,
                DiversityStrategy::Sequential => true,
            };
            if joins {
                selected.push(embedding);
            }
        }

        scores
    }
}
