//! OpenAI-compatible embeddings endpoint.
//!
//! Works against any server that implements `POST /embeddings` with the
//! OpenAI request and response shapes (hosted APIs, text-embeddings servers,
//! local CLIP servers).

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

use super::TextEmbedder;
use crate::error::{SearchError, SearchResult};

/// Embedder backed by an HTTP embeddings API.
pub struct HttpEmbedder {
    api_key: Option<String>,
    model: String,
    dimensions: usize,
    client: reqwest::Client,
    endpoint: String,
    timeout: Duration,
}

impl HttpEmbedder {
    /// `base_url` is the API root (e.g., `http://localhost:8080/v1`).
    pub fn new(
        base_url: &str,
        api_key: Option<&str>,
        model: &str,
        dimensions: usize,
        timeout: Duration,
    ) -> Self {
        Self {
            api_key: api_key.map(String::from),
            model: model.to_string(),
            dimensions,
            client: reqwest::Client::new(),
            endpoint: format!("{}/embeddings", base_url.trim_end_matches('/')),
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
struct EmbeddingRequest<'a> {
    model: &'a str,
    input: &'a [String],
}

// --- Response types ---

#[derive(Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingData>,
}

#[derive(Deserialize)]
struct EmbeddingData {
    embedding: Vec<f32>,
    #[serde(default)]
    index: Option<usize>,
}

/// Put response vectors back in input order and check their count.
fn into_ordered(mut data: Vec<EmbeddingData>, expected: usize) -> SearchResult<Vec<Vec<f32>>> {
    if data.len() != expected {
        return Err(SearchError::encoding(format!(
            "Embedding endpoint returned {} vectors for {expected} inputs",
            data.len()
        )));
    }
    if data.iter().all(|d| d.index.is_some()) {
        data.sort_by_key(|d| d.index);
    }
    Ok(data.into_iter().map(|d| d.embedding).collect())
}

#[async_trait]
impl TextEmbedder for HttpEmbedder {
    fn name(&self) -> &str {
        "http"
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    async fn embed(&self, text: &str) -> SearchResult<Vec<f32>> {
        let mut vectors = self.embed_batch(&[text.to_string()]).await?;
        vectors
            .pop()
            .ok_or_else(|| SearchError::encoding("Embedding endpoint returned no vectors"))
    }

    async fn embed_batch(&self, texts: &[String]) -> SearchResult<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }
        let start = Instant::now();

        let body = EmbeddingRequest {
            model: &self.model,
            input: texts,
        };

        let mut request = self
            .client
            .post(&self.endpoint)
            .header("Content-Type", "application/json")
            .json(&body)
            .timeout(self.timeout);
        if let Some(key) = &self.api_key {
            request = request.header("Authorization", format!("Bearer {key}"));
        }

        let resp = request
            .send()
            .await
            .map_err(|e| SearchError::encoding(format!("Embedding request failed: {e}")))?;

        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            return Err(SearchError::encoding(format!(
                "Embedding HTTP {status}: {text}"
            )));
        }

        let parsed: EmbeddingResponse = resp.json().await.map_err(|e| {
            SearchError::encoding(format!("Failed to parse embedding response: {e}"))
        })?;

        let vectors = into_ordered(parsed.data, texts.len())?;

        tracing::debug!(
            model = %self.model,
            inputs = texts.len(),
            latency_ms = start.elapsed().as_millis() as u64,
            "Embedded batch"
        );
        Ok(vectors)
    }
}
