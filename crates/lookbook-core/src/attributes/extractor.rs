//! Lexical fashion attribute extraction.
//!
//! Pulls colors, clothing, context and style tokens out of free text with
//! word-bounded matchers compiled once from the vocabulary tables.

use std::collections::BTreeSet;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::types::StructuredAttributes;

use super::style::StyleInferrer;
use super::vocabulary::{
    alternation, AttributeCategory, CANONICAL, CLOTHING, COLORS, COLOR_MODIFIERS, CONTEXT,
    STYLES,
};

static COLOR_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"\b(?:({})\s+)?({})\b",
        COLOR_MODIFIERS.join("|"),
        alternation(COLORS)
    ))
    .expect("color pattern compiles")
});

static CLOTHING_RE: Lazy<Regex> = Lazy::new(|| word_matcher(CLOTHING));
static CONTEXT_RE: Lazy<Regex> = Lazy::new(|| word_matcher(CONTEXT));
static STYLE_RE: Lazy<Regex> = Lazy::new(|| word_matcher(STYLES));

fn word_matcher(terms: &[&str]) -> Regex {
    Regex::new(&format!(r"\b(?:{})\b", alternation(terms))).expect("vocabulary pattern compiles")
}

/// Phrases that mark a runway scene.
const RUNWAY_MARKERS: &[&str] = &["runway", "fashion show", "fashion-show", "catwalk"];

/// Words that, together with "walk", mark a street scene.
const STREET_MARKERS: &[&str] = &["street", "city", "down"];

/// Extracts structured fashion attributes from captions and queries.
pub struct AttributeExtractor;

impl AttributeExtractor {
    /// Extract attributes from `text`.
    ///
    /// Pure and total: text with no vocabulary matches yields empty sets.
    pub fn extract(text: &str) -> StructuredAttributes {
        let lower = text.to_lowercase();

        StructuredAttributes {
            colors: Self::colors(&lower),
            clothing: Self::terms(&CLOTHING_RE, &lower),
            context: Self::context(&lower),
            style: Self::terms(&STYLE_RE, &lower),
        }
    }

    /// Extract attributes from a caption at index time.
    ///
    /// Same as [`extract`](Self::extract), with styles inferred from the
    /// detected clothing unioned into `style`.
    pub fn extract_indexed(caption: &str) -> StructuredAttributes {
        let mut attributes = Self::extract(caption);
        let inferred = StyleInferrer::infer(&attributes.clothing);
        attributes.style.extend(inferred);
        attributes
    }

    fn colors(lower: &str) -> BTreeSet<String> {
        COLOR_RE
            .captures_iter(lower)
            .filter_map(|caps| {
                let color = caps.get(2)?.as_str();
                Some(match caps.get(1) {
                    Some(modifier) => format!("{} {}", modifier.as_str(), color),
                    None => color.to_string(),
                })
            })
            .collect()
    }

    fn terms(re: &Regex, lower: &str) -> BTreeSet<String> {
        re.find_iter(lower)
            .filter_map(|m| CANONICAL.canonical(m.as_str()))
            .map(String::from)
            .collect()
    }

    fn context(lower: &str) -> BTreeSet<String> {
        let mut context = Self::terms(&CONTEXT_RE, lower);

        if RUNWAY_MARKERS.iter().any(|m| lower.contains(m)) {
            context.insert("runway".to_string());
            context.insert("fashion-show".to_string());
        }
        if lower.contains("walk") && STREET_MARKERS.iter().any(|m| lower.contains(m)) {
            context.insert("street".to_string());
        }
        if lower.contains("stand") {
            context.insert("standing".to_string());
        }
        if lower.contains("sit") {
            context.insert("sitting".to_string());
        }

        debug_assert!(context
            .iter()
            .all(|token| AttributeCategory::Context.contains(token)));
        context
    }
}
