//! Structured fashion attributes.
//!
//! Extracts colors, clothing, context and style from captions and queries
//! using fixed vocabularies, and infers style tags from clothing.

pub mod extractor;
pub mod style;
pub mod vocabulary;

pub use extractor::AttributeExtractor;
pub use style::StyleInferrer;
pub use vocabulary::AttributeCategory;
