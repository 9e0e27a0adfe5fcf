//! Additive bonus for structured-attribute overlap with the query.

use crate::attributes::AttributeCategory;
use crate::config::BoostConfig;
use crate::types::{QueryAttributes, StructuredAttributes};

/// Scores attribute overlap between a candidate and the parsed query.
#[derive(Debug, Clone)]
pub struct AttributeBooster {
    config: BoostConfig,
}

impl AttributeBooster {
    pub fn new(config: BoostConfig) -> Self {
        Self { config }
    }

    fn weight(&self, category: AttributeCategory) -> f32 {
        match category {
            AttributeCategory::Color => self.config.colors,
            AttributeCategory::Clothing => self.config.clothing,
            AttributeCategory::Context => self.config.context,
            AttributeCategory::Style => self.config.style,
        }
    }

    /// Raw boost: each token present in both sets adds its category weight.
    ///
    /// Unbounded above; see [`normalized`](Self::normalized).
    pub fn boost(&self, result: &StructuredAttributes, query: &QueryAttributes) -> f32 {
        AttributeCategory::ALL
            .iter()
            .map(|&category| {
                let matches = result
                    .get(category)
                    .intersection(query.get(category))
                    .count();
                matches as f32 * self.weight(category)
            })
            .sum()
    }

    /// Scale a raw boost by the empirical maximum and cap the contribution.
    pub fn normalized(&self, raw: f32) -> f32 {
        (raw / self.config.normalization_max).min(self.config.max_contribution)
    }
}
