//! OpenAI-compatible embedding provider.
//!
//! Speaks the `/embeddings` wire format: a `model` plus an `input` array
//! of strings in, a `data` array of indexed embeddings out.

use crate::embeddings::provider::EmbeddingProvider;
use askdocs_core::{AppError, AppResult};
use serde::{Deserialize, Serialize};

/// Request payload for the embeddings API.
#[derive(Debug, Serialize)]
struct EmbeddingRequest<'a> {
    model: &'a str,
    input: &'a [String],
}

/// Response from the embeddings API.
#[derive(Debug, Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingDatum>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingDatum {
    index: usize,
    embedding: Vec<f32>,
}

/// OpenAI-compatible embedding provider.
#[derive(Debug)]
pub struct OpenAiEmbeddings {
    /// Base URL for the API
    base_url: String,

    /// Model identifier sent with every request
    model: String,

    /// Vector width the model is expected to return
    dimensions: usize,

    /// Bearer API key; local gateways may not need one
    api_key: Option<String>,

    /// HTTP client
    client: reqwest::Client,
}

impl OpenAiEmbeddings {
    /// Create a new provider for the given endpoint and model.
    ///
    /// The client is built without a request timeout; an embedding call
    /// blocks until the service answers or the connection drops.
    pub fn new(
        base_url: impl Into<String>,
        model: impl Into<String>,
        dimensions: usize,
        api_key: Option<String>,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            model: model.into(),
            dimensions,
            api_key,
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait::async_trait]
impl EmbeddingProvider for OpenAiEmbeddings {
    fn provider_name(&self) -> &str {
        "openai"
    }

    fn model_name(&self) -> &str {
        &self.model
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    async fn embed_batch(&self, texts: &[String]) -> AppResult<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(vec![]);
        }

        tracing::debug!("Embedding batch of {} texts via {}", texts.len(), self.base_url);

        let request = EmbeddingRequest {
            model: &self.model,
            input: texts,
        };
        let url = format!("{}/embeddings", self.base_url);

        let mut builder = self.client.post(&url).json(&request);
        if let Some(ref key) = self.api_key {
            builder = builder.bearer_auth(key);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| AppError::Embedding(format!("Failed to send embedding request: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AppError::Embedding(format!(
                "Embedding API error ({}): {}",
                status, error_text
            )));
        }

        let body: EmbeddingResponse = response
            .json()
            .await
            .map_err(|e| AppError::Embedding(format!("Failed to parse embedding response: {}", e)))?;

        if body.data.len() != texts.len() {
            return Err(AppError::Embedding(format!(
                "Embedding service returned {} vectors for {} inputs",
                body.data.len(),
                texts.len()
            )));
        }

        // The service may return vectors out of order; restore input order
        let mut data = body.data;
        data.sort_by_key(|datum| datum.index);

        Ok(data.into_iter().map(|datum| datum.embedding).collect())
    }
}
