//! CLI enum types shared by the search commands: output format, fusion policy.

use clap::ValueEnum;
use lookbook_core::{FusionKind, OutputFormat as CoreOutputFormat};

/// Supported output formats.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum OutputFormat {
    /// Single JSON array
    Json,
    /// One JSON object per line (newline-delimited)
    Jsonl,
}

impl From<OutputFormat> for CoreOutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Json => CoreOutputFormat::Json,
            OutputFormat::Jsonl => CoreOutputFormat::JsonLines,
        }
    }
}

/// Fusion policies selectable on the command line.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum Fusion {
    /// Weighted fusion of similarity, composition, uniqueness and diversity
    Weighted,
    /// Base score plus normalized attribute boost
    AttributeBoost,
}

impl From<Fusion> for FusionKind {
    fn from(fusion: Fusion) -> Self {
        match fusion {
            Fusion::Weighted => FusionKind::Weighted,
            Fusion::AttributeBoost => FusionKind::AttributeBoost,
        }
    }
}

/// Resolve the output format: CLI flag first, then `[output] format`.
pub fn resolve_format(flag: Option<OutputFormat>, configured: &str) -> CoreOutputFormat {
    match flag {
        Some(format) => format.into(),
        None => CoreOutputFormat::parse(configured).unwrap_or_else(|| {
            tracing::warn!("Unknown output format '{configured}' in config, using json");
            CoreOutputFormat::Json
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flag_overrides_config() {
        assert_eq!(
            resolve_format(Some(OutputFormat::Jsonl), "json"),
            CoreOutputFormat::JsonLines
        );
        assert_eq!(resolve_format(None, "jsonl"), CoreOutputFormat::JsonLines);
        assert_eq!(resolve_format(None, "yaml"), CoreOutputFormat::Json);
    }

    #[test]
    fn test_fusion_conversion() {
        assert_eq!(FusionKind::from(Fusion::AttributeBoost), FusionKind::AttributeBoost);
        assert_eq!(Fusion::AttributeBoost.to_possible_value().unwrap().get_name(), "attribute-boost");
    }
}
