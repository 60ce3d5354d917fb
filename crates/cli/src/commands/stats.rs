//! Stats command handler.
//!
//! Displays corpus statistics.

use askdocs_core::{config::AppConfig, AppResult};
use askdocs_retrieval::{ChunkStore, VectorIndex};
use clap::Args;

/// Show corpus statistics
#[derive(Args, Debug)]
pub struct StatsCommand {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl StatsCommand {
    /// Execute the stats command.
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing stats command");

        config.validate()?;

        let index = VectorIndex::open(&config.index)?;
        let chunks = ChunkStore::load(&config.chunks)?;

        let vector_count = index.len()?;

        if self.json {
            let output = serde_json::json!({
                "index": config.index,
                "chunks": config.chunks,
                "vectorCount": vector_count,
                "dimension": index.dimension(),
                "chunkCount": chunks.len(),
            });

            println!("{}", serde_json::to_string_pretty(&output)?);
        } else {
            println!("Index:      {:?}", config.index);
            println!("Chunks:     {:?}", config.chunks);
            println!("Vectors:    {}", vector_count);
            println!("Dimension:  {}", index.dimension());
            println!("Chunk count: {}", chunks.len());

            if vector_count != chunks.len() {
                println!(
                    "Note: index and chunk collection sizes differ; out-of-range \
                     positions are skipped at query time."
                );
            }
        }

        Ok(())
    }
}
