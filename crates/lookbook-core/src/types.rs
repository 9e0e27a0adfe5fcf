//! Core data types for the Lookbook retrieval engine.
//!
//! These types carry one search call's worth of data: raw hits from the
//! vector index, the candidates built from them, and the structured fashion
//! attributes both sides are compared on.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::attributes::vocabulary::CANONICAL;
use crate::attributes::{AttributeCategory, AttributeExtractor};

/// Structured fashion attributes extracted from a caption or a query.
///
/// Each field is a deduplicated set of lowercase tokens from the fixed
/// vocabularies. A category with no match is an empty set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StructuredAttributes {
    /// Colors, optionally with a shade modifier ("bright yellow")
    pub colors: BTreeSet<String>,

    /// Garments, fits and cuts
    pub clothing: BTreeSet<String>,

    /// Settings and scenes
    pub context: BTreeSet<String>,

    /// Style adjectives (explicit, or inferred from clothing at index time)
    pub style: BTreeSet<String>,
}

impl StructuredAttributes {
    /// Whether all four categories are empty.
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
            && self.clothing.is_empty()
            && self.context.is_empty()
            && self.style.is_empty()
    }

    /// Token set for one category.
    pub fn get(&self, category: AttributeCategory) -> &BTreeSet<String> {
        match category {
            AttributeCategory::Color => &self.colors,
            AttributeCategory::Clothing => &self.clothing,
            AttributeCategory::Context => &self.context,
            AttributeCategory::Style => &self.style,
        }
    }

    /// Total number of tokens across all categories.
    pub fn len(&self) -> usize {
        self.colors.len() + self.clothing.len() + self.context.len() + self.style.len()
    }
}

/// Attributes parsed from the user's query. Lives for one search call.
pub type QueryAttributes = StructuredAttributes;

/// Payload stored alongside each vector in the index.
///
/// Attribute lists are optional so payloads written by other tools (caption
/// only) still deserialize.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ImagePayload {
    /// Image file name, used as the dedup identity
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_name: Option<String>,

    /// Generated caption
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub colors: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub clothing: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<Vec<String>>,
}

impl ImagePayload {
    /// Build a payload from an image name, caption and extracted attributes.
    pub fn new(
        image_name: impl Into<String>,
        caption: impl Into<String>,
        attributes: &StructuredAttributes,
    ) -> Self {
        Self {
            image_name: Some(image_name.into()),
            caption: Some(caption.into()),
            colors: Some(attributes.colors.iter().cloned().collect()),
            clothing: Some(attributes.clothing.iter().cloned().collect()),
            context: Some(attributes.context.iter().cloned().collect()),
            style: Some(attributes.style.iter().cloned().collect()),
        }
    }

    /// Stored attributes, or `None` if the payload carries none of the lists.
    pub fn attributes(&self) -> Option<StructuredAttributes> {
        if self.colors.is_none()
            && self.clothing.is_none()
            && self.context.is_none()
            && self.style.is_none()
        {
            return None;
        }

        // older collections store the matched spelling ("button down")
        let to_set = |list: &Option<Vec<String>>| -> BTreeSet<String> {
            list.iter()
                .flatten()
                .map(|token| {
                    let token = token.trim().to_lowercase();
                    match CANONICAL.canonical(&token) {
                        Some(canonical) => canonical.to_string(),
                        None => token,
                    }
                })
                .collect()
        };

        Some(StructuredAttributes {
            colors: to_set(&self.colors),
            clothing: to_set(&self.clothing),
            context: to_set(&self.context),
            style: to_set(&self.style),
        })
    }
}

/// One hit returned by the vector index, in index rank order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchHit {
    /// Point identifier, stringified
    pub id: String,

    /// Similarity reported by the index
    pub score: f32,

    /// Stored payload
    pub payload: ImagePayload,
}

/// Per-signal contributions behind a candidate's final score.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    /// Cosine similarity between the query and caption embeddings
    #[serde(skip_serializing_if = "Option::is_none")]
    pub direct_similarity: Option<f32>,

    /// Color-item pairing score
    #[serde(skip_serializing_if = "Option::is_none")]
    pub composition: Option<f32>,

    /// Caption-length uniqueness score
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uniqueness: Option<f32>,

    /// Redundancy-dampened diversity score
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diversity: Option<f32>,

    /// Normalized, capped attribute boost
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attribute_boost: Option<f32>,
}

/// A search hit annotated for re-ranking.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Candidate {
    /// Unique result identifier
    pub id: String,

    /// Raw similarity from the vector index; never modified by re-ranking
    pub base_score: f32,

    /// Caption text (empty if the payload had none)
    pub caption: String,

    /// Dedup key; several index entries may share one image
    pub image_identity: String,

    /// Structured attributes stored with the image
    pub attributes: StructuredAttributes,

    /// Score written by the fusion policy
    pub final_score: f32,

    /// Signal breakdown behind `final_score`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub breakdown: Option<ScoreBreakdown>,
}

impl Candidate {
    /// Build a candidate from a raw index hit.
    ///
    /// A missing caption becomes the empty string. A missing image name falls
    /// back to the hit id. Payloads without stored attributes get them
    /// extracted from the caption, with style inference, as the indexer does.
    pub fn from_hit(hit: SearchHit) -> Self {
        let SearchHit { id, score, payload } = hit;
        let attributes = payload.attributes();
        let caption = payload.caption.unwrap_or_default();
        let image_identity = payload.image_name.unwrap_or_else(|| id.clone());
        let attributes =
            attributes.unwrap_or_else(|| AttributeExtractor::extract_indexed(&caption));

        Self {
            id,
            base_score: score,
            caption,
            image_identity,
            attributes,
            final_score: 0.0,
            breakdown: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hit(payload: ImagePayload) -> SearchHit {
        SearchHit {
            id: "p-1".to_string(),
            score: 0.42,
            payload,
        }
    }

    #[test]
    fn test_candidate_from_hit_with_stored_attributes() {
        let mut attrs = StructuredAttributes::default();
        attrs.colors.insert("red".to_string());
        let payload = ImagePayload::new("img_001.jpg", "a red coat", &attrs);

        let candidate = Candidate::from_hit(hit(payload));
        assert_eq!(candidate.image_identity, "img_001.jpg");
        assert_eq!(candidate.caption, "a red coat");
        assert_eq!(candidate.base_score, 0.42);
        // Stored attributes win over re-extraction ("coat" is not re-added)
        assert!(candidate.attributes.clothing.is_empty());
        assert!(candidate.attributes.colors.contains("red"));
    }

    #[test]
    fn test_stored_tokens_use_canonical_spelling() {
        let payload = ImagePayload {
            image_name: Some("shirt.jpg".to_string()),
            caption: Some("a white button down shirt".to_string()),
            colors: Some(vec!["White".to_string()]),
            clothing: Some(vec!["Button Down".to_string(), "shirt".to_string()]),
            context: Some(vec!["fashion show".to_string()]),
            style: None,
        };

        let attrs = payload.attributes().unwrap();
        assert!(attrs.colors.contains("white"));
        assert!(attrs.clothing.contains("button-down"));
        assert!(attrs.clothing.contains("shirt"));
        assert!(!attrs.clothing.contains("button down"));
        assert!(attrs.context.contains("fashion-show"));
        assert!(attrs.style.is_empty());

        let query = AttributeExtractor::extract("a button down shirt");
        assert!(query.clothing.is_subset(&attrs.clothing));
    }

    #[test]
    fn test_candidate_from_hit_missing_fields() {
        let candidate = Candidate::from_hit(hit(ImagePayload::default()));
        assert_eq!(candidate.caption, "");
        assert_eq!(candidate.image_identity, "p-1");
        // Extracted from the empty caption: only the inferred default style
        assert!(candidate.attributes.colors.is_empty());
        assert_eq!(
            candidate.attributes.style.iter().collect::<Vec<_>>(),
            vec!["casual"]
        );
    }

    #[test]
    fn test_candidate_from_hit_extracts_when_payload_has_caption_only() {
        let payload = ImagePayload {
            image_name: Some("img_002.jpg".to_string()),
            caption: Some("a woman in a navy blazer".to_string()),
            ..Default::default()
        };
        let candidate = Candidate::from_hit(hit(payload));
        assert!(candidate.attributes.colors.contains("navy"));
        assert!(candidate.attributes.clothing.contains("blazer"));
        assert!(candidate.attributes.style.contains("formal"));
    }

    #[test]
    fn test_payload_serde_skips_missing_lists() {
        let payload = ImagePayload {
            image_name: Some("a.jpg".to_string()),
            caption: Some("x".to_string()),
            ..Default::default()
        };
        let json = serde_json::to_string(&payload).unwrap();
        assert!(!json.contains("colors"));

        let parsed: ImagePayload =
            serde_json::from_str(r#"{"image_name":"b.jpg","colors":["Red"]}"#).unwrap();
        let attrs = parsed.attributes().unwrap();
        assert!(attrs.colors.contains("red"));
        assert!(attrs.clothing.is_empty());
    }

    #[test]
    fn test_attributes_len_and_empty() {
        let mut attrs = StructuredAttributes::default();
        assert!(attrs.is_empty());
        attrs.style.insert("formal".to_string());
        attrs.context.insert("office".to_string());
        assert_eq!(attrs.len(), 2);
        assert!(!attrs.is_empty());
    }

    #[test]
    fn test_breakdown_skips_absent_signals() {
        let breakdown = ScoreBreakdown {
            attribute_boost: Some(0.25),
            ..Default::default()
        };
        let json = serde_json::to_string(&breakdown).unwrap();
        assert_eq!(json, r#"{"attribute_boost":0.25}"#);
    }
}
