//! Image-level deduplication and top-k selection.

use std::collections::HashSet;

use crate::types::Candidate;

/// Collapses candidates that refer to the same image.
pub struct Deduplicator;

impl Deduplicator {
    /// Keep the first occurrence of each `image_identity` from a list sorted
    /// by `final_score` descending, stopping at `k` unique candidates.
    ///
    /// Returns fewer than `k` when the input runs out; never pads.
    pub fn select(sorted: Vec<Candidate>, k: usize) -> Vec<Candidate> {
        let mut seen: HashSet<String> = HashSet::new();
        let mut unique = Vec::with_capacity(k.min(sorted.len()));

        for candidate in sorted {
            if unique.len() >= k {
                break;
            }
            if seen.insert(candidate.image_identity.clone()) {
                unique.push(candidate);
            }
        }

        unique
    }
}
