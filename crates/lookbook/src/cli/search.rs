//! The `lookbook search` command.

use clap::Args;
use lookbook_core::{Config, Lookbook, OutputWriter, RankedResult, SearchOptions};
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use super::types::{resolve_format, Fusion, OutputFormat};

/// Arguments for the `search` command.
#[derive(Args, Debug)]
pub struct SearchArgs {
    /// Natural-language description of the look
    #[arg(required = true)]
    pub query: String,

    /// Number of unique images to return
    #[arg(short, long)]
    pub k: Option<usize>,

    /// Fusion policy (defaults to `search.fusion` from config)
    #[arg(long, value_enum)]
    pub fusion: Option<Fusion>,

    /// Caption catalog (JSON Lines) to search with the in-memory index
    #[arg(long)]
    pub catalog: Option<PathBuf>,

    /// Output file (defaults to stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Output format (defaults to `output.format` from config)
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Include the per-signal score breakdown
    #[arg(long)]
    pub explain: bool,
}

/// Execute the search command.
pub async fn execute(args: SearchArgs) -> anyhow::Result<()> {
    let mut config = Config::load()?;
    if let Some(catalog) = &args.catalog {
        super::use_catalog(&mut config, catalog)?;
    }

    let format = resolve_format(args.format, &config.output.format);
    let pretty = args.pretty || config.output.pretty;

    let lookbook = Lookbook::new(config).await?;
    let options = SearchOptions {
        top_k: args.k,
        fusion: args.fusion.map(Into::into),
    };
    let results = lookbook.search(&args.query, options).await;

    if results.is_empty() {
        eprintln!("No matches found for: {}", args.query);
    }

    let records = RankedResult::from_candidates(&args.query, &results, args.explain);
    match &args.output {
        Some(path) => {
            let file = File::create(path)?;
            let mut writer = OutputWriter::new(BufWriter::new(file), format, pretty);
            writer.write_all(&records)?;
            writer.flush()?;
            tracing::info!("Wrote {} results to {:?}", writer.items_written(), path);
        }
        None => {
            let stdout = std::io::stdout();
            let mut writer = OutputWriter::new(stdout.lock(), format, pretty);
            writer.write_all(&records)?;
            writer.flush()?;
        }
    }

    Ok(())
}
