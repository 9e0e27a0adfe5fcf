//! Configuration validation with range checks.

use crate::error::ConfigError;

use super::Config;

impl Config {
    /// Validate configuration values are within acceptable ranges.
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.search.top_k == 0 {
            return Err(ConfigError::ValidationError(
                "search.top_k must be > 0".into(),
            ));
        }
        if self.search.oversample == 0 {
            return Err(ConfigError::ValidationError(
                "search.oversample must be > 0".into(),
            ));
        }

        let weights = [
            ("fusion.base", self.fusion.base),
            ("fusion.direct", self.fusion.direct),
            ("fusion.composition", self.fusion.composition),
            ("fusion.uniqueness", self.fusion.uniqueness),
            ("fusion.diversity", self.fusion.diversity),
            ("boost.colors", self.boost.colors),
            ("boost.clothing", self.boost.clothing),
            ("boost.context", self.boost.context),
            ("boost.style", self.boost.style),
        ];
        for (name, value) in weights {
            if !(value >= 0.0) {
                return Err(ConfigError::ValidationError(format!(
                    "{name} must be >= 0.0"
                )));
            }
        }

        if !(0.0..=1.0).contains(&self.diversity.penalty) {
            return Err(ConfigError::ValidationError(
                "diversity.penalty must be between 0.0 and 1.0".into(),
            ));
        }
        if !(self.boost.normalization_max > 0.0) {
            return Err(ConfigError::ValidationError(
                "boost.normalization_max must be > 0.0".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.boost.max_contribution) {
            return Err(ConfigError::ValidationError(
                "boost.max_contribution must be between 0.0 and 1.0".into(),
            ));
        }
        if self.embedding.dimensions == 0 {
            return Err(ConfigError::ValidationError(
                "embedding.dimensions must be > 0".into(),
            ));
        }
        if self.embedding.timeout_ms == 0 {
            return Err(ConfigError::ValidationError(
                "embedding.timeout_ms must be > 0".into(),
            ));
        }
        if self.index.timeout_ms == 0 {
            return Err(ConfigError::ValidationError(
                "index.timeout_ms must be > 0".into(),
            ));
        }
        Ok(())
    }
}
