//! End-to-end search: embed, retrieve, rerank, deduplicate.

mod retriever;

pub use retriever::{Retriever, SearchOptions};
