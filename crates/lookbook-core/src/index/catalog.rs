//! Caption catalogs and index-time payload construction.
//!
//! A catalog is a JSON Lines file with one `{"image_name", "caption"}`
//! record per image. Captions are produced upstream; this module only
//! extracts attributes, embeds and stores them.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use super::MemoryIndex;
use crate::attributes::AttributeExtractor;
use crate::embedding::TextEmbedder;
use crate::error::{CatalogError, SearchError, SearchResult};
use crate::types::ImagePayload;

/// Caption used when a record has an empty one.
pub const FALLBACK_CAPTION: &str = "A fashion image";

/// One catalog line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogRecord {
    pub image_name: String,
    #[serde(default)]
    pub caption: String,
}

/// Read a JSON Lines catalog.
///
/// Blank lines are skipped. Line numbers in errors are 1-based.
pub fn load_catalog(path: &Path) -> Result<Vec<CatalogRecord>, CatalogError> {
    if !path.exists() {
        return Err(CatalogError::NotFound(path.to_path_buf()));
    }
    let content = std::fs::read_to_string(path).map_err(|source| CatalogError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_catalog(&content)
}

/// Parse catalog content already in memory.
pub fn parse_catalog(content: &str) -> Result<Vec<CatalogRecord>, CatalogError> {
    content
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(i, line)| {
            serde_json::from_str(line).map_err(|e| CatalogError::InvalidRecord {
                line: i + 1,
                message: e.to_string(),
            })
        })
        .collect()
}

/// Summary of an indexing run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct IndexReport {
    /// Points written
    pub indexed: usize,

    /// Records whose caption was replaced by the fallback
    pub fallback_captions: usize,

    /// Wall time in milliseconds
    pub elapsed_ms: u64,
}

/// Builds an in-memory index from caption records.
pub struct Indexer {
    embedder: Arc<dyn TextEmbedder>,
}

impl Indexer {
    pub fn new(embedder: Arc<dyn TextEmbedder>) -> Self {
        Self { embedder }
    }

    /// Build the stored payload for one record: attributes are extracted
    /// from the caption with style inference.
    pub fn payload(record: &CatalogRecord) -> ImagePayload {
        let caption = effective_caption(&record.caption);
        let attributes = AttributeExtractor::extract_indexed(caption);
        ImagePayload::new(&record.image_name, caption, &attributes)
    }

    /// Extract, embed (one batch call) and insert every record.
    ///
    /// Point ids are the record positions, so they are stable for a given
    /// catalog.
    pub async fn index_captions(
        &self,
        records: Vec<CatalogRecord>,
    ) -> SearchResult<(MemoryIndex, IndexReport)> {
        let start = Instant::now();

        let fallback_captions = records
            .iter()
            .filter(|r| r.caption.trim().is_empty())
            .count();
        let payloads: Vec<ImagePayload> = records.iter().map(Self::payload).collect();
        let captions: Vec<String> = payloads
            .iter()
            .map(|p| p.caption.clone().unwrap_or_default())
            .collect();

        let vectors = self.embedder.embed_batch(&captions).await?;
        if vectors.len() != payloads.len() {
            return Err(SearchError::encoding(format!(
                "Embedder returned {} vectors for {} captions",
                vectors.len(),
                payloads.len()
            )));
        }

        let mut index = MemoryIndex::new();
        for (i, (vector, payload)) in vectors.into_iter().zip(payloads).enumerate() {
            index.insert(i.to_string(), vector, payload);
        }

        let report = IndexReport {
            indexed: index.len(),
            fallback_captions,
            elapsed_ms: start.elapsed().as_millis() as u64,
        };
        tracing::debug!(
            embedder = self.embedder.name(),
            indexed = report.indexed,
            fallback_captions = report.fallback_captions,
            elapsed_ms = report.elapsed_ms,
            "Indexed captions"
        );
        Ok((index, report))
    }
}

fn effective_caption(caption: &str) -> &str {
    let trimmed = caption.trim();
    if trimmed.is_empty() {
        FALLBACK_CAPTION
    } else {
        trimmed
    }
}
