//! Chat-completion client factory.
//!
//! This module creates chat clients based on application configuration.
//! It handles provider resolution and API-key injection.

use crate::client::ChatClient;
use crate::providers::OpenAiClient;
use askdocs_core::{AppError, AppResult};
use std::sync::Arc;

/// Default base URL when no endpoint is configured.
const DEFAULT_OPENAI_ENDPOINT: &str = "https://api.openai.com/v1";

/// Create a chat client based on the provider name.
///
/// # Arguments
/// * `provider` - Provider identifier ("openai" covers any compatible endpoint)
/// * `endpoint` - Optional custom base URL
/// * `api_key` - Optional API key; local gateways may run without one
///
/// # Errors
/// Returns `AppError::Config` when the provider is unknown.
pub fn create_client(
    provider: &str,
    endpoint: Option<&str>,
    api_key: Option<&str>,
) -> AppResult<Arc<dyn ChatClient>> {
    match provider.to_lowercase().as_str() {
        "openai" | "openai-compatible" => {
            let base_url = endpoint.unwrap_or(DEFAULT_OPENAI_ENDPOINT);
            let client = OpenAiClient::new(base_url, api_key.map(str::to_string));
            Ok(Arc::new(client))
        }
        _ => Err(AppError::Config(format!(
            "Unknown chat provider: '{}'. Supported providers: openai",
            provider
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_openai_client() {
        let client = create_client("openai", None, Some("sk-test")).unwrap();
        assert_eq!(client.provider_name(), "openai");
    }

    #[test]
    fn test_create_with_custom_endpoint_no_key() {
        // Local OpenAI-compatible gateways do not require a key
        let client = create_client("openai", Some("http://localhost:8080/v1"), None);
        assert!(client.is_ok());
    }

    #[test]
    fn test_provider_name_case_insensitive() {
        let client = create_client("OpenAI", None, None);
        assert!(client.is_ok());
    }

    #[test]
    fn test_unknown_provider() {
        match create_client("unknown", None, None) {
            Err(AppError::Config(msg)) => assert!(msg.contains("Unknown chat provider")),
            other => panic!("Expected config error, got {:?}", other.map(|_| ())),
        }
    }
}
