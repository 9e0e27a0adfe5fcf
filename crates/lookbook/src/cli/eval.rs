//! The `lookbook eval` command: run the fixed evaluation queries.

use clap::Args;
use lookbook_core::{Config, Lookbook, OutputWriter, RankedResult, SearchOptions};
use std::path::PathBuf;

use super::types::{resolve_format, Fusion, OutputFormat};

/// Queries covering color, garment, setting and composition matching.
pub const EVAL_QUERIES: &[&str] = &[
    "A person in a bright yellow raincoat.",
    "Professional business attire inside a modern office.",
    "Someone wearing a blue shirt sitting on a park bench.",
    "Casual weekend outfit for a city walk.",
    "A red tie and a white shirt in a formal setting.",
];

/// Arguments for the `eval` command.
#[derive(Args, Debug)]
pub struct EvalArgs {
    /// Caption catalog (JSON Lines) to search with the in-memory index
    #[arg(long)]
    pub catalog: Option<PathBuf>,

    /// Number of unique images per query
    #[arg(short, long, default_value = "2")]
    pub k: usize,

    /// Fusion policy (defaults to `search.fusion` from config)
    #[arg(long, value_enum)]
    pub fusion: Option<Fusion>,

    /// Output format (defaults to jsonl)
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Include the per-signal score breakdown
    #[arg(long)]
    pub explain: bool,
}

/// Execute the eval command.
pub async fn execute(args: EvalArgs) -> anyhow::Result<()> {
    let mut config = Config::load()?;
    if let Some(catalog) = &args.catalog {
        super::use_catalog(&mut config, catalog)?;
    }
    let format = resolve_format(args.format.or(Some(OutputFormat::Jsonl)), &config.output.format);

    let lookbook = Lookbook::new(config).await?;
    let options = SearchOptions {
        top_k: Some(args.k),
        fusion: args.fusion.map(Into::into),
    };

    let stdout = std::io::stdout();
    let mut writer = OutputWriter::new(stdout.lock(), format, false);
    let mut answered = 0;

    for query in EVAL_QUERIES {
        let results = lookbook.search(query, options).await;
        if results.is_empty() {
            tracing::warn!(query, "No matches found");
            continue;
        }
        answered += 1;
        let records = RankedResult::from_candidates(query, &results, args.explain);
        writer.write_all(&records)?;
    }
    writer.flush()?;

    tracing::info!(
        "Answered {answered}/{} evaluation queries ({} results)",
        EVAL_QUERIES.len(),
        writer.items_written()
    );
    Ok(())
}
