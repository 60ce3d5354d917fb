//! Ordered chunk collection loaded from the chunk-mapping file.

use askdocs_core::{AppError, AppResult};
use std::path::Path;

/// The corpus chunk texts, in index order.
///
/// Loaded once from a JSON array of strings and held read-only for the
/// process lifetime. A chunk is identified solely by its position.
pub struct ChunkStore {
    chunks: Vec<String>,
}

impl ChunkStore {
    /// Load the chunk-mapping file.
    pub fn load(path: &Path) -> AppResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            AppError::ChunkStore(format!("Failed to read chunk-mapping file {:?}: {}", path, e))
        })?;

        let chunks: Vec<String> = serde_json::from_str(&contents).map_err(|e| {
            AppError::ChunkStore(format!(
                "Failed to parse chunk-mapping file {:?}: {}",
                path, e
            ))
        })?;

        tracing::debug!("Loaded {} chunks from {:?}", chunks.len(), path);

        Ok(Self { chunks })
    }

    /// Get the chunk text at a position, if it exists.
    pub fn get(&self, position: usize) -> Option<&str> {
        self.chunks.get(position).map(String::as_str)
    }

    /// Number of chunks in the collection.
    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    /// Whether the collection is empty.
    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_and_get() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"["first chunk", "second chunk"]"#).unwrap();

        let store = ChunkStore::load(file.path()).unwrap();
        assert_eq!(store.len(), 2);
        assert!(!store.is_empty());
        assert_eq!(store.get(0), Some("first chunk"));
        assert_eq!(store.get(1), Some("second chunk"));
        assert_eq!(store.get(2), None);
    }

    #[test]
    fn test_load_empty_collection() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "[]").unwrap();

        let store = ChunkStore::load(file.path()).unwrap();
        assert!(store.is_empty());
        assert_eq!(store.get(0), None);
    }

    #[test]
    fn test_load_missing_file() {
        let result = ChunkStore::load(Path::new("/nonexistent/chunks.json"));
        assert!(matches!(result, Err(AppError::ChunkStore(_))));
    }

    #[test]
    fn test_load_malformed_json() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"not": "an array"}}"#).unwrap();

        let result = ChunkStore::load(file.path());
        assert!(matches!(result, Err(AppError::ChunkStore(_))));
    }
}
