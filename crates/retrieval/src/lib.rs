//! Retrieval pipeline for askdocs.
//!
//! Provides read-only access to the prebuilt corpus artifacts (vector
//! index and chunk-mapping file), the embedding provider abstraction,
//! and the two operations built on top of them:
//!
//! - [`Retriever`]: embed a query, search the index, map positions back
//!   to chunk texts.
//! - [`Answerer`]: assemble retrieved chunks into a prompt and ask the
//!   chat-completion service for an answer.

pub mod answerer;
pub mod chunks;
pub mod embeddings;
pub mod index;
pub mod prompt;
pub mod retriever;

#[cfg(test)]
mod tests;

// Re-export commonly used types
pub use answerer::Answerer;
pub use chunks::ChunkStore;
pub use embeddings::{create_provider, EmbeddingProvider};
pub use index::{SearchHit, VectorIndex};
pub use retriever::{RetrievedChunk, Retriever};
