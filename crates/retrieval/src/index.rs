//! Read-only SQLite-backed vector index.
//!
//! The index file is produced by an external preprocessing step. It holds
//! a `vectors(position, embedding)` table with little-endian f32 blobs and
//! a `meta(key, value)` table carrying at least the vector `dimension`.
//! This module never writes to the file.

use askdocs_core::{AppError, AppResult};
use rusqlite::{Connection, OpenFlags};
use std::path::Path;

/// One nearest-neighbor search result.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchHit {
    /// Position of the stored vector, matching the chunk collection
    pub position: usize,

    /// Squared Euclidean distance to the query vector
    pub distance: f32,
}

/// A prebuilt vector index, opened read-only for the process lifetime.
pub struct VectorIndex {
    conn: Connection,
    dimension: usize,
}

impl VectorIndex {
    /// Open an index file read-only and read its dimension from `meta`.
    pub fn open(path: &Path) -> AppResult<Self> {
        let conn = Connection::open_with_flags(path, OpenFlags::SQLITE_OPEN_READ_ONLY)
            .map_err(|e| AppError::Index(format!("Failed to open vector index {:?}: {}", path, e)))?;

        let dimension: String = conn
            .query_row("SELECT value FROM meta WHERE key = 'dimension'", [], |row| {
                row.get(0)
            })
            .map_err(|e| AppError::Index(format!("Failed to read index dimension: {}", e)))?;

        let dimension: usize = dimension
            .parse()
            .map_err(|_| AppError::Index(format!("Invalid index dimension: '{}'", dimension)))?;

        tracing::debug!("Opened vector index {:?} (dimension {})", path, dimension);

        Ok(Self { conn, dimension })
    }

    /// Vector width stored in the index.
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Number of vectors in the index.
    pub fn len(&self) -> AppResult<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM vectors", [], |row| row.get(0))
            .map_err(|e| AppError::Index(format!("Failed to count vectors: {}", e)))?;

        Ok(count as usize)
    }

    /// Find the k vectors nearest to the query.
    ///
    /// Returns (distance, position) pairs ordered by ascending squared
    /// Euclidean distance. Rows whose blob does not decode to a vector of
    /// the index dimension are skipped silently.
    pub fn search(&self, query: &[f32], k: usize) -> AppResult<Vec<SearchHit>> {
        let mut stmt = self
            .conn
            .prepare("SELECT position, embedding FROM vectors")
            .map_err(|e| AppError::Index(format!("Failed to prepare search query: {}", e)))?;

        let rows = stmt
            .query_map([], |row| {
                let position: i64 = row.get(0)?;
                let blob: Vec<u8> = row.get(1)?;
                Ok((position, blob))
            })
            .map_err(|e| AppError::Index(format!("Failed to scan vectors: {}", e)))?;

        let mut hits = Vec::new();
        for row in rows {
            let (position, blob) =
                row.map_err(|e| AppError::Index(format!("Failed to read vector row: {}", e)))?;

            let embedding = match bytes_to_embedding(&blob) {
                Ok(embedding) if embedding.len() == self.dimension => embedding,
                _ => {
                    tracing::debug!("Skipping malformed vector at position {}", position);
                    continue;
                }
            };

            hits.push(SearchHit {
                position: position as usize,
                distance: squared_distance(query, &embedding),
            });
        }

        // Sort by distance ascending
        hits.sort_by(|a, b| {
            a.distance
                .partial_cmp(&b.distance)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        // Take top-k
        hits.truncate(k);

        tracing::debug!("Index search returned {} hits (requested top-{})", hits.len(), k);

        Ok(hits)
    }
}

/// Convert stored bytes back to an embedding vector.
fn bytes_to_embedding(bytes: &[u8]) -> AppResult<Vec<f32>> {
    if bytes.len() % 4 != 0 {
        return Err(AppError::Index("Invalid embedding bytes length".to_string()));
    }

    let mut embedding = Vec::with_capacity(bytes.len() / 4);
    for chunk in bytes.chunks_exact(4) {
        let value = f32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
        embedding.push(value);
    }

    Ok(embedding)
}

/// Squared Euclidean distance between two vectors.
///
/// Order-equivalent to L2 distance, without a sqrt per row.
fn squared_distance(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b.iter()).map(|(x, y)| (x - y) * (x - y)).sum()
}

/// Convert an embedding vector to bytes, as the index builder stores them.
#[cfg(test)]
pub(crate) fn embedding_to_bytes(embedding: &[f32]) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(embedding.len() * 4);
    for &value in embedding {
        bytes.extend_from_slice(&value.to_le_bytes());
    }
    bytes
}
