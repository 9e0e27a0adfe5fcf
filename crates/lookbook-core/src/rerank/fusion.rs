//! Score fusion policies.
//!
//! A policy merges the base similarity with the rerank signals into one
//! `final_score` per candidate. Two policies exist; callers pick one through
//! [`FusionKind`] and both run behind the same [`Reranker`].

use serde::{Deserialize, Serialize};

use crate::config::{Config, FusionWeights};
use crate::math::{clamp01, cosine_similarity, logistic};
use crate::types::{Candidate, ScoreBreakdown};

use super::boost::AttributeBooster;
use super::composition::CompositionScorer;
use super::diversity::DiversitySuppressor;
use super::ScoringContext;

/// Guards the length z-score against an all-empty batch.
const LENGTH_EPSILON: f32 = 1e-6;

/// Steepness of the length-uniqueness logistic.
const UNIQUENESS_STEEPNESS: f32 = 2.0;

/// Strategy for turning rerank signals into final scores.
///
/// Implementations write only `final_score` (and the breakdown) and must be
/// deterministic for a fixed context.
pub trait FusionPolicy: Send + Sync {
    /// Policy name for logging.
    fn name(&self) -> &str;

    /// Whether the caller must attach caption embeddings to the context.
    fn needs_caption_embeddings(&self) -> bool {
        false
    }

    /// Assign `final_score` to every candidate in the context.
    fn fuse(&self, ctx: &mut ScoringContext);
}

/// Fusion policy selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FusionKind {
    /// Full-signal weighted fusion, clamped to [0, 1]
    #[default]
    Weighted,
    /// Base score plus normalized attribute boost, renormalized
    AttributeBoost,
}

impl FusionKind {
    /// Parse a policy name (case-insensitive, `-` or `_` separated).
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "weighted" | "similarity_weighted" => Some(Self::Weighted),
            "attribute_boost" | "boost" => Some(Self::AttributeBoost),
            _ => None,
        }
    }

    /// Build the policy with parameters from `config`.
    pub fn build(self, config: &Config) -> Box<dyn FusionPolicy> {
        match self {
            FusionKind::Weighted => Box::new(WeightedFusion::new(
                config.fusion.clone(),
                DiversitySuppressor::new(config.diversity.strategy, config.diversity.penalty),
            )),
            FusionKind::AttributeBoost => {
                Box::new(BoostFusion::new(AttributeBooster::new(config.boost.clone())))
            }
        }
    }
}

/// Length-based uniqueness per caption.
///
/// Token counts are compared to the batch mean as a relative deviation and
/// squashed through a logistic centered at 0.5; longer-than-average captions
/// score above 0.5.
pub fn uniqueness_scores(candidates: &[Candidate]) -> Vec<f32> {
    if candidates.is_empty() {
        return Vec::new();
    }
    let lengths: Vec<f32> = candidates
        .iter()
        .map(|c| c.caption.split_whitespace().count() as f32)
        .collect();
    let mean = lengths.iter().sum::<f32>() / lengths.len() as f32;

    lengths
        .iter()
        .map(|len| {
            let deviation = (len - mean) / (mean + LENGTH_EPSILON);
            logistic(deviation * UNIQUENESS_STEEPNESS)
        })
        .collect()
}

/// Similarity-weighted fusion over every signal.
///
/// `clamp01(base*w_b + direct*w_d + composition*w_c
///   + (uniqueness - 0.5)*w_u + (diversity - 1.0)*w_v)`
pub struct WeightedFusion {
    weights: FusionWeights,
    diversity: DiversitySuppressor,
}

impl WeightedFusion {
    pub fn new(weights: FusionWeights, diversity: DiversitySuppressor) -> Self {
        Self { weights, diversity }
    }
}

impl FusionPolicy for WeightedFusion {
    fn name(&self) -> &str {
        "weighted"
    }

    fn needs_caption_embeddings(&self) -> bool {
        true
    }

    fn fuse(&self, ctx: &mut ScoringContext) {
        let n = ctx.candidates.len();
        let uniqueness = uniqueness_scores(&ctx.candidates);

        // Without caption embeddings the embedding signals are neutral
        let (direct, diversity) = match &ctx.caption_embeddings {
            Some(embeddings) if embeddings.len() == n => (
                embeddings
                    .iter()
                    .map(|e| cosine_similarity(&ctx.query_embedding, e))
                    .collect::<Vec<_>>(),
                self.diversity.scores(embeddings),
            ),
            _ => {
                tracing::debug!("No caption embeddings attached; direct and diversity signals neutral");
                (vec![0.0; n], vec![1.0; n])
            }
        };

        let w = &self.weights;
        for (i, candidate) in ctx.candidates.iter_mut().enumerate() {
            let composition = CompositionScorer::score(&ctx.query, &candidate.caption);
            let fused = w.base * candidate.base_score
                + w.direct * direct[i]
                + w.composition * composition
                + w.uniqueness * (uniqueness[i] - 0.5)
                + w.diversity * (diversity[i] - 1.0);

            candidate.final_score = clamp01(fused);
            candidate.breakdown = Some(ScoreBreakdown {
                direct_similarity: Some(direct[i]),
                composition: Some(composition),
                uniqueness: Some(uniqueness[i]),
                diversity: Some(diversity[i]),
                attribute_boost: None,
            });
        }
    }
}

/// Attribute-boost fusion: `base + normalized_boost`, renormalized so the
/// batch maximum is at most 1.0, then clamped to [0, 1].
pub struct BoostFusion {
    booster: AttributeBooster,
}

impl BoostFusion {
    pub fn new(booster: AttributeBooster) -> Self {
        Self { booster }
    }
}

impl FusionPolicy for BoostFusion {
    fn name(&self) -> &str {
        "attribute_boost"
    }

    fn fuse(&self, ctx: &mut ScoringContext) {
        for candidate in ctx.candidates.iter_mut() {
            let raw = self.booster.boost(&candidate.attributes, &ctx.query_attributes);
            let boost = self.booster.normalized(raw);
            candidate.final_score = candidate.base_score + boost;
            candidate.breakdown = Some(ScoreBreakdown {
                attribute_boost: Some(boost),
                ..Default::default()
            });
        }

        let max = ctx
            .candidates
            .iter()
            .map(|c| c.final_score)
            .fold(f32::NEG_INFINITY, f32::max);
        let scale = if max > 1.0 { max } else { 1.0 };
        for candidate in ctx.candidates.iter_mut() {
            // base scores from a cosine index can be negative
            candidate.final_score = clamp01(candidate.final_score / scale);
        }
    }
}
