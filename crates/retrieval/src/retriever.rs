//! Query-to-chunks retrieval.

use crate::chunks::ChunkStore;
use crate::embeddings::EmbeddingProvider;
use crate::index::VectorIndex;
use askdocs_core::AppResult;
use std::sync::Arc;

/// A chunk returned by retrieval, with its index position and distance.
#[derive(Debug, Clone, PartialEq)]
pub struct RetrievedChunk {
    /// Position in the chunk collection
    pub position: usize,

    /// Squared Euclidean distance reported by the index
    pub distance: f32,

    /// The chunk text
    pub text: String,
}

/// Retrieves the chunks nearest to a query.
///
/// Holds the corpus artifacts and the embedding provider for the process
/// lifetime; each call is stateless.
pub struct Retriever {
    index: VectorIndex,
    chunks: ChunkStore,
    embedder: Arc<dyn EmbeddingProvider>,
}

impl Retriever {
    /// Create a retriever over loaded corpus artifacts.
    pub fn new(index: VectorIndex, chunks: ChunkStore, embedder: Arc<dyn EmbeddingProvider>) -> Self {
        Self {
            index,
            chunks,
            embedder,
        }
    }

    /// Return up to k chunks ordered by ascending distance to the query.
    ///
    /// Index positions that fall outside the chunk collection are dropped
    /// silently; an index/chunk-file size mismatch is not an error. Repeated
    /// positions are not deduplicated.
    pub async fn retrieve(&self, query: &str, k: usize) -> AppResult<Vec<RetrievedChunk>> {
        tracing::info!("Retrieving top-{} chunks", k);

        let query_embedding = self.embedder.embed(query).await?;
        let hits = self.index.search(&query_embedding, k)?;

        tracing::debug!("Index returned {} hits", hits.len());

        let retrieved: Vec<RetrievedChunk> = hits
            .into_iter()
            .filter_map(|hit| match self.chunks.get(hit.position) {
                Some(text) => Some(RetrievedChunk {
                    position: hit.position,
                    distance: hit.distance,
                    text: text.to_string(),
                }),
                None => {
                    tracing::debug!(
                        "Skipping index position {} outside chunk collection of {}",
                        hit.position,
                        self.chunks.len()
                    );
                    None
                }
            })
            .collect();

        tracing::info!("Retrieved {} chunks", retrieved.len());

        Ok(retrieved)
    }
}
