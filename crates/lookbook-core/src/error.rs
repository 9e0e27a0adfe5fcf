//! Error types for the Lookbook retrieval engine.
//!
//! Only the collaborator boundaries (embedding and vector search), config
//! loading and catalog reading can fail. Scoring signals are total functions
//! and have no error type.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type for Lookbook operations.
#[derive(Error, Debug)]
pub enum LookbookError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Embedding or similarity-search failures
    #[error("Search error: {0}")]
    Search(#[from] SearchError),

    /// Catalog loading errors
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the config file from disk
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    /// Failed to parse TOML configuration
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Configuration values are invalid
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Failures at the two external-call boundaries of a search.
///
/// Both abort the search call; [`crate::Retriever::search`] turns them into
/// an empty result set.
#[derive(Error, Debug)]
pub enum SearchError {
    /// The embedding collaborator could not produce a vector
    #[error("Encoding failed: {message}")]
    Encoding { message: String },

    /// The similarity-search collaborator failed
    #[error("Similarity search failed: {message}")]
    Search {
        message: String,
        /// HTTP status code, when the failure came from an HTTP response
        status_code: Option<u16>,
    },

    /// The similarity search returned no hits
    #[error("Similarity search returned no results")]
    EmptyResult,
}

impl SearchError {
    /// Shorthand for an encoding failure.
    pub fn encoding(message: impl Into<String>) -> Self {
        Self::Encoding {
            message: message.into(),
        }
    }

    /// Shorthand for a search failure without an HTTP status.
    pub fn search(message: impl Into<String>) -> Self {
        Self::Search {
            message: message.into(),
            status_code: None,
        }
    }
}

/// Errors reading a caption catalog.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// Catalog file missing
    #[error("Catalog not found: {0}")]
    NotFound(PathBuf),

    /// Failed to read the catalog file
    #[error("Failed to read catalog {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A catalog line is not a valid record
    #[error("Invalid catalog record at line {line}: {message}")]
    InvalidRecord { line: usize, message: String },
}

/// Convenience type alias for Lookbook results.
pub type Result<T> = std::result::Result<T, LookbookError>;

/// Convenience type alias for collaborator-boundary results.
pub type SearchResult<T> = std::result::Result<T, SearchError>;
