//! Command implementations for the `lookbook` binary.

pub mod config;
pub mod eval;
pub mod extract;
pub mod search;
pub mod types;

use lookbook_core::Config;
use std::path::Path;

/// Point the config at a catalog file and switch to the memory index.
pub(crate) fn use_catalog(config: &mut Config, catalog: &Path) -> anyhow::Result<()> {
    let expanded = shellexpand::tilde(&catalog.to_string_lossy()).into_owned();
    if !Path::new(&expanded).exists() {
        anyhow::bail!(
            "Catalog does not exist: {expanded}\n\n  Hint: Check the file path and try again."
        );
    }
    config.index.provider = "memory".to_string();
    config.index.catalog = expanded;
    Ok(())
}
