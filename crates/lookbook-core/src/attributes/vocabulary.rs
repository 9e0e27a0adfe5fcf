//! Controlled vocabularies for fashion attribute extraction.
//!
//! Every token the extractor emits comes from one of these tables. Multi-word
//! and hyphenated terms are stored in their canonical hyphenated form
//! ("button-down", "fashion-show"); the matcher accepts spaced, hyphenated
//! and joined spellings of them alike.

use std::collections::HashMap;

use once_cell::sync::Lazy;

/// Shade/intensity modifiers that may precede a base color.
pub const COLOR_MODIFIERS: &[&str] = &["bright", "dark", "light", "neon"];

/// Base color names.
pub const COLORS: &[&str] = &[
    "red", "blue", "green", "yellow", "black", "white", "orange", "purple", "pink", "brown",
    "gray", "grey", "beige", "navy", "maroon", "crimson", "turquoise", "khaki", "cream",
    "silver", "gold", "bronze",
];

/// Garments, fits and cuts.
pub const CLOTHING: &[&str] = &[
    "button-down", "button-up", "collared", "polo", "t-shirt", "tank", "sleeveless", "crop",
    "oversized", "fitted", "slim", "skinny", "straight", "bootcut", "flared", "pleated",
    "pencil", "mini", "midi", "maxi", "shorts", "pants", "jeans", "trousers", "denim",
    "chinos", "sweatpants", "hoodie", "jacket", "blazer", "suit", "coat", "raincoat",
    "windbreaker", "dress", "skirt", "sweater", "cardigan", "vest", "waistcoat", "tie",
    "scarf", "belt", "hat", "cap", "shirt", "blouse", "top",
];

/// Settings, scenes and poses.
pub const CONTEXT: &[&str] = &[
    "office", "corporate", "workplace", "conference", "meeting", "street", "urban", "city",
    "downtown", "park", "outdoor", "indoor", "home", "professional", "business", "event",
    "weekend", "garden", "beach", "hiking", "gym", "runway", "fashion-show", "catwalk",
    "studio", "photoshoot", "model", "walking", "standing", "sitting", "bench", "building",
    "room", "store", "shop", "mall", "restaurant", "cafe", "bar", "club", "party", "wedding",
    "gala", "red-carpet", "stage", "sidewalk", "road", "path", "field", "forest", "mountain",
    "lake", "river", "pool", "hallway", "lobby", "staircase", "balcony", "terrace", "rooftop",
    "window", "mirror", "wall", "background",
];

/// Style adjectives matched directly.
pub const STYLES: &[&str] = &[
    "casual", "formal", "business", "smart", "elegant", "trendy", "vintage", "modern",
    "minimalist", "bohemian", "preppy", "athletic", "streetwear", "haute-couture", "chic",
    "sporty", "classic", "edgy", "glamorous", "sophisticated",
];

/// Colors considered when pairing colors with garments in a query.
pub const COMPOSITION_COLORS: &[&str] = &[
    "red", "blue", "green", "yellow", "black", "white", "orange", "purple", "pink", "brown",
    "gray", "grey", "beige", "navy",
];

/// Garments considered when pairing colors with garments in a query.
pub const COMPOSITION_ITEMS: &[&str] = &[
    "pants", "jacket", "shirt", "dress", "skirt", "coat", "top", "jeans", "shorts", "sweater",
    "hoodie", "blazer", "suit",
];

/// The four structured attribute categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttributeCategory {
    Color,
    Clothing,
    Context,
    Style,
}

impl AttributeCategory {
    /// All categories, in payload field order.
    pub const ALL: [AttributeCategory; 4] = [
        AttributeCategory::Color,
        AttributeCategory::Clothing,
        AttributeCategory::Context,
        AttributeCategory::Style,
    ];

    /// Whether `token` is a valid token for this category.
    ///
    /// Colors accept both bare names and "modifier color" pairs.
    pub fn contains(self, token: &str) -> bool {
        match self {
            AttributeCategory::Color => match token.split_once(' ') {
                Some((modifier, color)) => {
                    COLOR_MODIFIERS.contains(&modifier) && COLORS.contains(&color)
                }
                None => COLORS.contains(&token),
            },
            AttributeCategory::Clothing => CLOTHING.contains(&token),
            AttributeCategory::Context => CONTEXT.contains(&token),
            AttributeCategory::Style => STYLES.contains(&token),
        }
    }
}

/// Lookup from a separator-free spelling ("buttondown") to its canonical term.
pub(crate) struct CanonicalIndex {
    by_key: HashMap<String, &'static str>,
}

impl CanonicalIndex {
    fn new(tables: &[&'static [&'static str]]) -> Self {
        let by_key = tables
            .iter()
            .flat_map(|table| table.iter())
            .map(|&term| (squash(term), term))
            .collect();
        Self { by_key }
    }

    /// Canonical spelling of a matched span, if it belongs to a table.
    pub(crate) fn canonical(&self, matched: &str) -> Option<&'static str> {
        self.by_key.get(&squash(matched)).copied()
    }
}

/// Shared canonical index over the clothing, context and style tables.
pub(crate) static CANONICAL: Lazy<CanonicalIndex> =
    Lazy::new(|| CanonicalIndex::new(&[CLOTHING, CONTEXT, STYLES]));

/// Drop hyphens and whitespace so all spellings of a term share one key.
fn squash(term: &str) -> String {
    term.chars()
        .filter(|c| *c != '-' && !c.is_whitespace())
        .collect()
}

/// Regex alternative for a term: separators in multi-part terms become
/// `[-\s]*` so "button-down", "button down" and "buttondown" all match.
pub(crate) fn term_pattern(term: &str) -> String {
    term.split('-')
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join(r"[-\s]*")
}

/// Alternation over a table, longest terms first so a longer term is never
/// shadowed by a shorter one starting at the same position.
pub(crate) fn alternation(terms: &[&str]) -> String {
    let mut sorted: Vec<&str> = terms.to_vec();
    sorted.sort_by(|a, b| b.len().cmp(&a.len()).then(a.cmp(b)));
    sorted
        .into_iter()
        .map(term_pattern)
        .collect::<Vec<_>>()
        .join("|")
}
