//! Qdrant REST client for similarity search.
//!
//! Uses the universal query endpoint:
//! `POST {url}/collections/{collection}/points/query`.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

use super::VectorIndex;
use crate::error::{SearchError, SearchResult};
use crate::types::{ImagePayload, SearchHit};

/// Searches an existing Qdrant collection.
pub struct QdrantIndex {
    api_key: Option<String>,
    collection: String,
    client: reqwest::Client,
    endpoint: String,
    timeout: Duration,
}

impl QdrantIndex {
    pub fn new(url: &str, collection: &str, api_key: Option<&str>, timeout: Duration) -> Self {
        Self {
            api_key: api_key.map(String::from),
            collection: collection.to_string(),
            client: reqwest::Client::new(),
            endpoint: format!(
                "{}/collections/{}/points/query",
                url.trim_end_matches('/'),
                collection
            ),
            timeout,
        }
    }

    /// Full request URL.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

// --- Request types ---

#[derive(Serialize)]
struct QueryRequest<'a> {
    query: &'a [f32],
    limit: usize,
    with_payload: bool,
}

// --- Response types ---

#[derive(Deserialize)]
struct QueryResponse {
    result: QueryResult,
}

#[derive(Deserialize)]
struct QueryResult {
    points: Vec<ScoredPoint>,
}

#[derive(Deserialize)]
struct ScoredPoint {
    /// Unsigned integer or UUID string
    id: serde_json::Value,
    score: f32,
    #[serde(default)]
    payload: Option<ImagePayload>,
}

impl ScoredPoint {
    fn into_hit(self) -> SearchHit {
        let id = match self.id {
            serde_json::Value::String(s) => s,
            other => other.to_string(),
        };
        SearchHit {
            id,
            score: self.score,
            payload: self.payload.unwrap_or_default(),
        }
    }
}

#[async_trait]
impl VectorIndex for QdrantIndex {
    fn name(&self) -> &str {
        "qdrant"
    }

    async fn similarity_search(&self, vector: &[f32], limit: usize) -> SearchResult<Vec<SearchHit>> {
        let start = Instant::now();

        let body = QueryRequest {
            query: vector,
            limit,
            with_payload: true,
        };

        let mut request = self
            .client
            .post(&self.endpoint)
            .header("Content-Type", "application/json")
            .json(&body)
            .timeout(self.timeout);
        if let Some(key) = &self.api_key {
            request = request.header("api-key", key);
        }

        let resp = request
            .send()
            .await
            .map_err(|e| SearchError::search(format!("Qdrant request failed: {e}")))?;

        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            return Err(SearchError::Search {
                message: format!("Qdrant HTTP {status}: {text}"),
                status_code: Some(status.as_u16()),
            });
        }

        let parsed: QueryResponse = resp
            .json()
            .await
            .map_err(|e| SearchError::search(format!("Failed to parse Qdrant response: {e}")))?;

        let hits: Vec<SearchHit> = parsed
            .result
            .points
            .into_iter()
            .map(ScoredPoint::into_hit)
            .collect();

        tracing::debug!(
            collection = %self.collection,
            hits = hits.len(),
            latency_ms = start.elapsed().as_millis() as u64,
            "Qdrant query"
        );
        Ok(hits)
    }
}
