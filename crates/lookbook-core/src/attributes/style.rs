//! Style inference from detected clothing.
//!
//! Captions rarely name a style outright, so the indexer derives style tags
//! from the garments it found. Categories overlap: "shorts" is both casual
//! and athletic.

use std::collections::BTreeSet;

const FORMAL_ITEMS: &[&str] = &[
    "blazer", "suit", "tie", "waistcoat", "vest", "dress", "button-down", "collared",
];

const CASUAL_ITEMS: &[&str] = &[
    "hoodie", "t-shirt", "jeans", "shorts", "sweatpants", "sneakers", "tank", "sweater",
];

const ATHLETIC_ITEMS: &[&str] = &["shorts", "tank", "sneakers", "sweatpants"];

const OUTERWEAR_ITEMS: &[&str] = &["jacket", "coat", "raincoat", "windbreaker", "cardigan"];

/// Style tag emitted when no category matches.
pub const DEFAULT_STYLE: &str = "casual";

/// Style categories in emission order.
const CATEGORIES: &[(&str, &[&str])] = &[
    ("formal", FORMAL_ITEMS),
    ("casual", CASUAL_ITEMS),
    ("athletic", ATHLETIC_ITEMS),
    ("outerwear", OUTERWEAR_ITEMS),
];

/// Derives style tags from a set of clothing items.
pub struct StyleInferrer;

impl StyleInferrer {
    /// Infer style tags for `clothing`.
    ///
    /// Emits every category tag whose garment set intersects the input, or
    /// exactly `{"casual"}` when none does. Never returns an empty set.
    pub fn infer(clothing: &BTreeSet<String>) -> BTreeSet<String> {
        let items: BTreeSet<String> = clothing.iter().map(|c| c.to_lowercase()).collect();

        let mut styles: BTreeSet<String> = CATEGORIES
            .iter()
            .filter(|(_, members)| members.iter().any(|m| items.contains(*m)))
            .map(|(tag, _)| tag.to_string())
            .collect();

        if styles.is_empty() {
            styles.insert(DEFAULT_STYLE.to_string());
        }
        styles
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(tokens: &[&str]) -> BTreeSet<String> {
        tokens.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn test_formal_from_tie() {
        assert_eq!(StyleInferrer::infer(&set(&["tie", "shirt"])), set(&["formal"]));
    }

    #[test]
    fn test_overlapping_categories() {
        assert_eq!(
            StyleInferrer::infer(&set(&["shorts"])),
            set(&["athletic", "casual"])
        );
    }

    #[test]
    fn test_multiple_categories() {
        assert_eq!(
            StyleInferrer::infer(&set(&["blazer", "jeans", "coat"])),
            set(&["casual", "formal", "outerwear"])
        );
    }

    #[test]
    fn test_default_is_casual() {
        assert_eq!(StyleInferrer::infer(&set(&[])), set(&["casual"]));
        assert_eq!(StyleInferrer::infer(&set(&["scarf", "hat"])), set(&["casual"]));
    }

    #[test]
    fn test_case_insensitive_membership() {
        assert_eq!(StyleInferrer::infer(&set(&["Raincoat"])), set(&["outerwear"]));
    }
}
