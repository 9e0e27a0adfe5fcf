//! Logging initialization.
//!
//! Uses the `tracing` ecosystem with human-readable or JSON output. Logs go
//! to stderr; stdout carries search results.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const LEVELS: &[&str] = &["error", "warn", "info", "debug", "trace"];

/// Initialize the logging subsystem at `level`.
///
/// The RUST_LOG environment variable overrides `level` when set.
pub fn init(level: &str, json_format: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    if json_format {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_writer(std::io::stderr)
                    .with_ansi(true),
            )
            .init();
    }
}

/// Initialize logging from the `[logging]` section plus CLI overrides.
pub fn init_from_config(
    config: &lookbook_core::Config,
    verbose_override: bool,
    json_logs_override: bool,
) {
    let level = effective_level(&config.logging.level, verbose_override);
    let json_format = json_logs_override || config.logging.format == "json";
    init(level, json_format);
}

/// `--verbose` raises the level to at least debug; unknown levels fall back
/// to info.
fn effective_level(configured: &str, verbose: bool) -> &'static str {
    let configured = configured.to_lowercase();
    let level = LEVELS
        .iter()
        .copied()
        .find(|l| *l == configured)
        .unwrap_or("info");
    if verbose && level != "trace" {
        "debug"
    } else {
        level
    }
}
