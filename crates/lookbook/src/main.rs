//! Lookbook CLI - Fashion image search with attribute-aware re-ranking.
//!
//! Lookbook answers natural-language fashion queries against an index of
//! captioned images and re-ranks the hits on colors, garments, settings and
//! styles.
//!
//! # Usage
//!
//! ```bash
//! # Search a caption catalog
//! lookbook search "A red tie and a white shirt in a formal setting." --catalog captions.jsonl
//!
//! # Compare the attribute-boost policy, with score breakdowns
//! lookbook search "navy blazer" --fusion attribute-boost --explain --pretty
//!
//! # See which attributes a text yields
//! lookbook extract "a man in a navy blazer" --infer-style
//!
//! # Run the evaluation queries
//! lookbook eval --catalog captions.jsonl
//!
//! # View configuration
//! lookbook config show
//! ```

use clap::{Parser, Subcommand};

mod cli;
mod logging;

/// Lookbook - Fashion image search with attribute-aware re-ranking.
#[derive(Parser, Debug)]
#[command(name = "lookbook")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose (debug) logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output logs in JSON format
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Search for images matching a description
    Search(cli::search::SearchArgs),

    /// Extract structured fashion attributes from text
    Extract(cli::extract::ExtractArgs),

    /// Run the evaluation queries against the configured index
    Eval(cli::eval::EvalArgs),

    /// View and manage configuration
    Config(cli::config::ConfigArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logging isn't initialized yet, so use eprintln for config warnings.
    let config = match lookbook_core::Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!(
                "Warning: Failed to load config: {e}\n  \
                 Using default configuration. Check your config file with `lookbook config path`."
            );
            lookbook_core::Config::default()
        }
    };
    logging::init_from_config(&config, cli.verbose, cli.json_logs);

    tracing::debug!("Lookbook v{}", lookbook_core::VERSION);

    match cli.command {
        Commands::Search(args) => cli::search::execute(args).await,
        Commands::Extract(args) => cli::extract::execute(args).await,
        Commands::Eval(args) => cli::eval::execute(args).await,
        Commands::Config(args) => cli::config::execute(args).await,
    }
}
