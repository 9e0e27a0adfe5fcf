//! Color-garment composition scoring.
//!
//! Bag-of-words similarity cannot tell "red jacket, black pants" from
//! "black jacket, red pants". This signal checks whether each color-garment
//! pair named in the query appears with the same pairing in the caption.

use crate::attributes::vocabulary::{COMPOSITION_COLORS, COMPOSITION_ITEMS};

/// Credit for a pair whose color and garment both occur in the caption,
/// but not adjacent to each other.
const PARTIAL_CREDIT: f32 = 0.3;

/// Scores how well a caption preserves the query's color-garment pairings.
pub struct CompositionScorer;

impl CompositionScorer {
    /// Adjacent `(color, item)` pairs named in `text`, in vocabulary order.
    pub fn pairs(text: &str) -> Vec<(&'static str, &'static str)> {
        let lower = text.to_lowercase();
        COMPOSITION_COLORS
            .iter()
            .flat_map(|&color| COMPOSITION_ITEMS.iter().map(move |&item| (color, item)))
            .filter(|(color, item)| lower.contains(&format!("{color} {item}")))
            .collect()
    }

    /// Score `caption` against the pairs in `query`, in `[0, 1]`.
    ///
    /// Returns 1.0 when the query names no pair. Otherwise each pair scores
    /// 1.0 when the caption has the same adjacent pair, 0.3 when the color
    /// and garment both appear separately, 0.0 otherwise; the result is the
    /// mean over pairs.
    pub fn score(query: &str, caption: &str) -> f32 {
        let pairs = Self::pairs(query);
        if pairs.is_empty() {
            return 1.0;
        }

        let caption = caption.to_lowercase();
        let total: f32 = pairs
            .iter()
            .map(|(color, item)| {
                if caption.contains(&format!("{color} {item}")) {
                    1.0
                } else if caption.contains(color) && caption.contains(item) {
                    PARTIAL_CREDIT
                } else {
                    0.0
                }
            })
            .sum();

        total / pairs.len() as f32
    }
}
