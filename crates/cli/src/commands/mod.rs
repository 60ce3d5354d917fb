//! Command handlers for the askdocs CLI.
//!
//! This module organizes all CLI commands into separate submodules.

pub mod ask;
pub mod search;
pub mod stats;

// Re-export command types for convenience
pub use ask::AskCommand;
pub use search::SearchCommand;
pub use stats::StatsCommand;

use askdocs_core::{config::AppConfig, AppResult};
use askdocs_retrieval::{create_provider, ChunkStore, Retriever, VectorIndex};

/// Load the corpus artifacts and embedding provider into a retriever.
pub(crate) fn build_retriever(config: &AppConfig) -> AppResult<Retriever> {
    config.validate()?;

    let index = VectorIndex::open(&config.index)?;
    let chunks = ChunkStore::load(&config.chunks)?;
    let embedder = create_provider(&config.embedding, config.embedding_api_key().as_deref())?;

    tracing::debug!(
        "Corpus loaded: {} vectors, {} chunks",
        index.len()?,
        chunks.len()
    );

    Ok(Retriever::new(index, chunks, embedder))
}
