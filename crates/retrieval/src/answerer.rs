//! Context assembly and answer generation.

use crate::prompt;
use crate::retriever::{RetrievedChunk, Retriever};
use askdocs_core::AppResult;
use askdocs_llm::{ChatClient, ChatMessage, ChatRequest};
use std::sync::Arc;

/// Answers a query from retrieved context via the chat-completion service.
pub struct Answerer {
    retriever: Retriever,
    client: Arc<dyn ChatClient>,
    model: String,
}

impl Answerer {
    /// Create an answerer over a retriever and chat client.
    pub fn new(retriever: Retriever, client: Arc<dyn ChatClient>, model: impl Into<String>) -> Self {
        Self {
            retriever,
            client,
            model: model.into(),
        }
    }

    /// Answer a query using the top-k retrieved chunks as context.
    ///
    /// Returns the first completion choice's text verbatim. The remote
    /// call is made once, with no retry or timeout; its failure propagates
    /// to the caller.
    pub async fn answer(&self, query: &str, k: usize) -> AppResult<String> {
        let (answer, _) = self.answer_with_sources(query, k).await?;
        Ok(answer)
    }

    /// Answer a query, also returning the chunks the answer was built from.
    pub async fn answer_with_sources(
        &self,
        query: &str,
        k: usize,
    ) -> AppResult<(String, Vec<RetrievedChunk>)> {
        let retrieved = self.retriever.retrieve(query, k).await?;

        let context = build_context(&retrieved);
        let full_prompt = prompt::render_prompt(&context, query)?;

        tracing::debug!(
            "Assembled prompt from {} chunks ({} bytes)",
            retrieved.len(),
            full_prompt.len()
        );

        let request = ChatRequest::new(&self.model, vec![ChatMessage::system(full_prompt)]);
        let response = self.client.complete(&request).await?;

        let answer = response.into_text()?;
        Ok((answer, retrieved))
    }
}

/// Join retrieved chunk texts with a blank line, in retrieval order.
pub fn build_context(chunks: &[RetrievedChunk]) -> String {
    chunks
        .iter()
        .map(|chunk| chunk.text.as_str())
        .collect::<Vec<_>>()
        .join("\n\n")
}
