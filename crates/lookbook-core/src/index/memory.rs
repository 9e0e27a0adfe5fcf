//! Brute-force in-memory cosine index.

use async_trait::async_trait;
use std::cmp::Ordering;

use super::VectorIndex;
use crate::error::SearchResult;
use crate::math::cosine_similarity;
use crate::types::{ImagePayload, SearchHit};

struct Point {
    id: String,
    vector: Vec<f32>,
    payload: ImagePayload,
}

/// Exhaustive index over a few thousand captions.
///
/// Hits come back in descending cosine order; equal scores keep insertion
/// order.
#[derive(Default)]
pub struct MemoryIndex {
    points: Vec<Point>,
}

impl MemoryIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: impl Into<String>, vector: Vec<f32>, payload: ImagePayload) {
        self.points.push(Point {
            id: id.into(),
            vector,
            payload,
        });
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Synchronous search used by the async trait method.
    pub fn search(&self, vector: &[f32], limit: usize) -> Vec<SearchHit> {
        let mut scored: Vec<(usize, f32)> = self
            .points
            .iter()
            .enumerate()
            .map(|(i, p)| (i, cosine_similarity(vector, &p.vector)))
            .collect();
        scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));

        scored
            .into_iter()
            .take(limit)
            .map(|(i, score)| {
                let point = &self.points[i];
                SearchHit {
                    id: point.id.clone(),
                    score,
                    payload: point.payload.clone(),
                }
            })
            .collect()
    }
}

#[async_trait]
impl VectorIndex for MemoryIndex {
    fn name(&self) -> &str {
        "memory"
    }

    async fn similarity_search(&self, vector: &[f32], limit: usize) -> SearchResult<Vec<SearchHit>> {
        Ok(self.search(vector, limit))
    }
}
