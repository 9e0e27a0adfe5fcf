//! Deterministic feature-hashing text embedder.
//!
//! Words and character trigrams are hashed with BLAKE3 into a fixed number
//! of buckets and the result is L2-normalized. Texts that share vocabulary
//! land close together under cosine similarity, which is enough to exercise
//! the full search path offline without a model server.

use async_trait::async_trait;

use super::TextEmbedder;
use crate::error::SearchResult;
use crate::math::l2_normalize_in_place;

/// Weight of a whole-word feature relative to a trigram.
const WORD_WEIGHT: f32 = 2.0;
const TRIGRAM_WEIGHT: f32 = 1.0;

/// Local embedder with no external dependencies.
#[derive(Debug, Clone)]
pub struct HashingEmbedder {
    dimensions: usize,
}

impl HashingEmbedder {
    pub fn new(dimensions: usize) -> Self {
        Self {
            dimensions: dimensions.max(1),
        }
    }

    /// Embed synchronously. Blank text maps to the zero vector.
    pub fn embed_text(&self, text: &str) -> Vec<f32> {
        let mut vector = vec![0.0f32; self.dimensions];
        let normalized = text.to_lowercase();

        for word in normalized
            .split(|c: char| !c.is_alphanumeric() && c != '-')
            .filter(|w| !w.is_empty())
        {
            vector[self.bucket(b"w:", word)] += WORD_WEIGHT;
        }

        for trigram in trigrams(&normalized) {
            vector[self.bucket(b"t:", &trigram)] += TRIGRAM_WEIGHT;
        }

        l2_normalize_in_place(&mut vector);
        vector
    }

    fn bucket(&self, namespace: &[u8], feature: &str) -> usize {
        let mut hasher = blake3::Hasher::new();
        hasher.update(namespace);
        hasher.update(feature.as_bytes());
        let hash = hasher.finalize();

        let mut prefix = [0u8; 8];
        prefix.copy_from_slice(&hash.as_bytes()[..8]);
        (u64::from_le_bytes(prefix) % self.dimensions as u64) as usize
    }
}

/// Character trigrams of the whitespace-collapsed text, padded with spaces.
fn trigrams(text: &str) -> Vec<String> {
    let collapsed: Vec<&str> = text.split_whitespace().collect();
    if collapsed.is_empty() {
        return Vec::new();
    }
    let padded: Vec<char> = format!(" {} ", collapsed.join(" ")).chars().collect();
    padded
        .windows(3)
        .map(|w| w.iter().collect::<String>())
        .collect()
}

#[async_trait]
impl TextEmbedder for HashingEmbedder {
    fn name(&self) -> &str {
        "hashing"
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    async fn embed(&self, text: &str) -> SearchResult<Vec<f32>> {
        Ok(self.embed_text(text))
    }

    async fn embed_batch(&self, texts: &[String]) -> SearchResult<Vec<Vec<f32>>> {
        Ok(texts.iter().map(|t| self.embed_text(t)).collect())
    }
}
