//! Embedding provider abstraction and implementations.

pub mod provider;
pub mod providers;

pub use provider::{create_provider, EmbeddingProvider};
