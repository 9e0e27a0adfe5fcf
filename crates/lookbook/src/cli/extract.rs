//! The `lookbook extract` command: show what the extractor sees in a text.

use clap::Args;
use lookbook_core::AttributeExtractor;

/// Arguments for the `extract` command.
#[derive(Args, Debug)]
pub struct ExtractArgs {
    /// Caption or query text
    #[arg(required = true)]
    pub text: String,

    /// Add styles inferred from clothing, as done for indexed captions
    #[arg(long)]
    pub infer_style: bool,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,
}

/// Execute the extract command.
pub async fn execute(args: ExtractArgs) -> anyhow::Result<()> {
    let attributes = if args.infer_style {
        AttributeExtractor::extract_indexed(&args.text)
    } else {
        AttributeExtractor::extract(&args.text)
    };

    let json = if args.pretty {
        serde_json::to_string_pretty(&attributes)?
    } else {
        serde_json::to_string(&attributes)?
    };
    println!("{json}");
    Ok(())
}
