//! OpenAI-compatible chat-completion provider.
//!
//! Speaks the `/chat/completions` wire format used by OpenAI and by
//! compatible gateways (vLLM, LiteLLM, llama.cpp server, ...).

use crate::client::{ChatChoice, ChatClient, ChatMessage, ChatRequest, ChatResponse, Role, Usage};
use askdocs_core::{AppError, AppResult};
use serde::{Deserialize, Serialize};

/// OpenAI chat-completion request format.
#[derive(Debug, Serialize)]
struct OpenAiRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

/// OpenAI chat-completion response format.
#[derive(Debug, Deserialize)]
struct OpenAiResponse {
    #[serde(default)]
    model: String,
    choices: Vec<OpenAiChoice>,
    #[serde(default)]
    usage: Option<OpenAiUsage>,
}

#[derive(Debug, Deserialize)]
struct OpenAiChoice {
    message: OpenAiMessage,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OpenAiMessage {
    role: Role,
    /// Some gateways omit content for empty completions
    #[serde(default)]
    content: String,
}

#[derive(Debug, Deserialize)]
struct OpenAiUsage {
    #[serde(default)]
    prompt_tokens: u32,
    #[serde(default)]
    completion_tokens: u32,
    #[serde(default)]
    total_tokens: u32,
}

/// OpenAI-compatible chat client.
pub struct OpenAiClient {
    /// Base URL for the API (e.g., "https://api.openai.com/v1")
    base_url: String,

    /// Bearer API key; local gateways may not need one
    api_key: Option<String>,

    /// HTTP client
    client: reqwest::Client,
}

impl OpenAiClient {
    /// Create a new client for the given base URL.
    ///
    /// The client is built without a request timeout; a completion call
    /// blocks until the service answers or the connection drops.
    pub fn new(base_url: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key,
            client: reqwest::Client::new(),
        }
    }

    /// Convert ChatRequest to the OpenAI wire format.
    fn to_openai_request<'a>(&self, request: &'a ChatRequest) -> OpenAiRequest<'a> {
        OpenAiRequest {
            model: &request.model,
            messages: &request.messages,
            temperature: request.temperature,
            max_tokens: request.max_tokens,
        }
    }

    /// Convert an OpenAI response to ChatResponse.
    fn convert_response(&self, response: OpenAiResponse) -> ChatResponse {
        let usage = response
            .usage
            .map(|u| Usage {
                prompt_tokens: u.prompt_tokens,
                completion_tokens: u.completion_tokens,
                total_tokens: u.total_tokens,
            })
            .unwrap_or_default();

        ChatResponse {
            model: response.model,
            choices: response
                .choices
                .into_iter()
                .map(|choice| ChatChoice {
                    message: ChatMessage {
                        role: choice.message.role,
                        content: choice.message.content,
                    },
                    finish_reason: choice.finish_reason,
                })
                .collect(),
            usage,
        }
    }
}

#[async_trait::async_trait]
impl ChatClient for OpenAiClient {
    fn provider_name(&self) -> &str {
        "openai"
    }

    async fn complete(&self, request: &ChatRequest) -> AppResult<ChatResponse> {
        tracing::info!("Sending completion request to {}", self.base_url);
        tracing::debug!("Model: {}, messages: {}", request.model, request.messages.len());

        let openai_request = self.to_openai_request(request);
        let url = format!("{}/chat/completions", self.base_url);

        let mut builder = self.client.post(&url).json(&openai_request);
        if let Some(ref key) = self.api_key {
            builder = builder.bearer_auth(key);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| AppError::Completion(format!("Failed to send completion request: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AppError::Completion(format!(
                "Completion API error ({}): {}",
                status, error_text
            )));
        }

        let openai_response: OpenAiResponse = response
            .json()
            .await
            .map_err(|e| AppError::Completion(format!("Failed to parse completion response: {}", e)))?;

        tracing::info!(
            "Received completion with {} choice(s)",
            openai_response.choices.len()
        );

        Ok(self.convert_response(openai_response))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = OpenAiClient::new("https://api.openai.com/v1", Some("sk-test".to_string()));
        assert_eq!(client.provider_name(), "openai");
        assert_eq!(client.base_url, "https://api.openai.com/v1");
    }

    #[test]
    fn test_request_conversion() {
        let client = OpenAiClient::new("https://api.openai.com/v1", None);
        let request = ChatRequest::new("gpt-4o-mini", vec![ChatMessage::system("context")])
            .with_temperature(0.2);

        let openai_req = client.to_openai_request(&request);
        assert_eq!(openai_req.model, "gpt-4o-mini");
        assert_eq!(openai_req.messages.len(), 1);
        assert_eq!(openai_req.temperature, Some(0.2));
        assert_eq!(openai_req.max_tokens, None);

        let json = serde_json::to_string(&openai_req).unwrap();
        assert!(json.contains(r#""role":"system""#));
        assert!(!json.contains("max_tokens"));
    }

    #[test]
    fn test_response_conversion() {
        let client = OpenAiClient::new("https://api.openai.com/v1", None);
        let raw = r#"{
            "id": "chatcmpl-123",
            "object": "chat.completion",
            "model": "gpt-4o-mini",
            "choices": [
                {
                    "index": 0,
                    "message": {"role": "assistant", "content": "The answer."},
                    "finish_reason": "stop"
                }
            ],
            "usage": {"prompt_tokens": 12, "completion_tokens": 3, "total_tokens": 15}
        }"#;

        let openai_response: OpenAiResponse = serde_json::from_str(raw).unwrap();
        let response = client.convert_response(openai_response);

        assert_eq!(response.model, "gpt-4o-mini");
        assert_eq!(response.choices.len(), 1);
        assert_eq!(response.choices[0].message.content, "The answer.");
        assert_eq!(response.choices[0].finish_reason.as_deref(), Some("stop"));
        assert_eq!(response.usage.total_tokens, 15);
        assert_eq!(response.into_text().unwrap(), "The answer.");
    }

    #[test]
    fn test_response_conversion_empty_choices() {
        let client = OpenAiClient::new("https://api.openai.com/v1", None);
        let raw = r#"{"model": "gpt-4o-mini", "choices": []}"#;

        let openai_response: OpenAiResponse = serde_json::from_str(raw).unwrap();
        let response = client.convert_response(openai_response);

        assert!(response.choices.is_empty());
        assert!(matches!(
            response.into_text(),
            Err(AppError::EmptyCompletion)
        ));
    }
}
