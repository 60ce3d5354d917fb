//! Chat-completion integration crate for askdocs.
//!
//! This crate abstracts the remote chat-completion service behind a
//! unified trait-based interface. Any service speaking the OpenAI
//! `/chat/completions` wire format is supported.
//!
//! # Example
//! ```no_run
//! use askdocs_llm::{create_client, ChatMessage, ChatRequest};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = create_client("openai", None, Some("sk-..."))?;
//! let request = ChatRequest::new("gpt-4o-mini", vec![ChatMessage::system("Say hello.")]);
//! let answer = client.complete(&request).await?.into_text()?;
//! println!("{}", answer);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod factory;
pub mod providers;

// Re-export main types
pub use client::{ChatChoice, ChatClient, ChatMessage, ChatRequest, ChatResponse, Role, Usage};
pub use factory::create_client;
pub use providers::OpenAiClient;
