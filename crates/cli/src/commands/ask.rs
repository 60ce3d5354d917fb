//! Ask command handler.
//!
//! Runs the full retrieve-then-answer chain and prints the answer.

use askdocs_core::{config::AppConfig, AppResult};
use askdocs_llm::create_client;
use askdocs_retrieval::Answerer;
use clap::Args;

/// Ask a question and get an answer grounded in the corpus
#[derive(Args, Debug)]
pub struct AskCommand {
    /// The question to ask
    pub query: String,

    /// Number of chunks to retrieve (defaults to the configured topK)
    #[arg(short = 'k', long = "top-k")]
    pub top_k: Option<usize>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl AskCommand {
    /// Execute the ask command.
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing ask command");
        tracing::debug!("Ask options: {:?}", self);

        let k = self.top_k.unwrap_or(config.top_k);

        let retriever = super::build_retriever(config)?;
        let client = create_client(
            &config.chat.provider,
            Some(&config.chat.endpoint),
            config.chat_api_key().as_deref(),
        )?;

        let answerer = Answerer::new(retriever, client, config.chat.model.clone());
        let (answer, sources) = answerer.answer_with_sources(&self.query, k).await?;

        if self.json {
            let output = serde_json::json!({
                "answer": answer,
                "model": config.chat.model,
                "sources": sources
                    .iter()
                    .map(|chunk| serde_json::json!({
                        "position": chunk.position,
                        "distance": chunk.distance,
                    }))
                    .collect::<Vec<_>>(),
            });

            println!("{}", serde_json::to_string_pretty(&output)?);
        } else {
            println!("{}", answer);
        }

        Ok(())
    }
}
