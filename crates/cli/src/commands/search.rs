//! Search command handler.
//!
//! Runs retrieval only and prints the nearest chunks.

use askdocs_core::{config::AppConfig, AppResult};
use clap::Args;

/// Retrieve the chunks nearest to a query, without answering
#[derive(Args, Debug)]
pub struct SearchCommand {
    /// The query text
    pub query: String,

    /// Number of chunks to retrieve (defaults to the configured topK)
    #[arg(short = 'k', long = "top-k")]
    pub top_k: Option<usize>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl SearchCommand {
    /// Execute the search command.
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing search command");
        tracing::debug!("Search options: {:?}", self);

        let k = self.top_k.unwrap_or(config.top_k);

        let retriever = super::build_retriever(config)?;
        let results = retriever.retrieve(&self.query, k).await?;

        if self.json {
            let output = serde_json::json!({
                "query": self.query,
                "results": results
                    .iter()
                    .map(|chunk| serde_json::json!({
                        "position": chunk.position,
                        "distance": chunk.distance,
                        "text": chunk.text,
                    }))
                    .collect::<Vec<_>>(),
            });

            println!("{}", serde_json::to_string_pretty(&output)?);
        } else if results.is_empty() {
            println!("No chunks retrieved.");
        } else {
            for chunk in &results {
                println!("[{}] (distance {:.4})", chunk.position, chunk.distance);
                println!("{}", chunk.text);
                println!();
            }
        }

        Ok(())
    }
}
