//! Chat-completion backend
//!
//! Speaks the OpenAI `/chat/completions` wire format, which Groq exposes
//! unchanged. The model, output budget and temperature come from the
//! profile passed with each call; the backend itself only holds the
//! endpoint, credentials and HTTP client.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use eco_assistant_config::LlmConfig;
use eco_assistant_core::{
    CompletionService, FinishReason, GenerateResponse, Message, ModelProfile,
};
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::LlmError;

/// Configuration for OpenAI-compatible backends
#[derive(Debug, Clone)]
pub struct OpenAIConfig {
    /// API root, e.g. `https://api.groq.com/openai/v1`
    pub endpoint: String,
    pub api_key: String,
    /// Request timeout
    pub timeout: Duration,
}

impl Default for OpenAIConfig {
    fn default() -> Self {
        Self {
            endpoint: eco_assistant_config::constants::endpoints::GROQ_DEFAULT.to_string(),
            api_key: String::new(),
            timeout: Duration::from_millis(
                eco_assistant_config::constants::timeouts::LLM_REQUEST_MS,
            ),
        }
    }
}

impl OpenAIConfig {
    /// Build from the `llm` settings section
    pub fn from_settings(settings: &LlmConfig) -> Self {
        Self {
            endpoint: settings.endpoint.clone(),
            api_key: settings.api_key.clone().unwrap_or_default(),
            timeout: Duration::from_millis(settings.timeout_ms),
        }
    }
}

/// OpenAI-compatible completion backend
pub struct OpenAIBackend {
    config: OpenAIConfig,
    client: Client,
}

impl OpenAIBackend {
    pub fn new(config: OpenAIConfig) -> Result<Self, LlmError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| LlmError::Configuration(e.to_string()))?;

        Ok(Self { config, client })
    }

    /// Get the full API URL for chat completions
    fn chat_url(&self) -> String {
        format!("{}/chat/completions", self.config.endpoint.trim_end_matches('/'))
    }

    /// Build request headers
    fn build_headers(&self) -> reqwest::header::HeaderMap {
        use reqwest::header::HeaderValue;

        let mut headers = reqwest::header::HeaderMap::new();

        let auth_value = format!("Bearer {}", self.config.api_key);
        if let Ok(val) = HeaderValue::from_str(&auth_value) {
            headers.insert(reqwest::header::AUTHORIZATION, val);
        }

        headers.insert(
            reqwest::header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );

        headers
    }

    fn build_request(messages: &[Message], profile: &ModelProfile) -> OpenAIChatRequest {
        OpenAIChatRequest {
            model: profile.identifier.clone(),
            messages: messages
                .iter()
                .map(|m| OpenAIMessage {
                    role: m.role.to_string(),
                    content: m.content.clone(),
                })
                .collect(),
            max_tokens: profile.max_output_tokens,
            temperature: profile.temperature,
            stream: false,
        }
    }

    /// Issue one completion request
    pub async fn chat(
        &self,
        messages: &[Message],
        profile: &ModelProfile,
    ) -> Result<GenerateResponse, LlmError> {
        if self.config.api_key.is_empty() {
            return Err(LlmError::Configuration("API key not configured".to_string()));
        }

        let start = Instant::now();
        let request = Self::build_request(messages, profile);

        let response = self
            .client
            .post(self.chat_url())
            .headers(self.build_headers())
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(LlmError::Api(format!("HTTP {}: {}", status, error_text)));
        }

        let response: OpenAIChatResponse = response
            .json()
            .await
            .map_err(|e| LlmError::InvalidResponse(e.to_string()))?;

        let result = parse_response(response)?;

        tracing::debug!(
            model = %profile.identifier,
            elapsed_ms = start.elapsed().as_millis() as u64,
            completion_tokens = ?result.completion_tokens,
            "Completion received"
        );

        Ok(result)
    }
}

fn parse_response(response: OpenAIChatResponse) -> Result<GenerateResponse, LlmError> {
    let choice = response
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| LlmError::InvalidResponse("No choices in response".to_string()))?;

    Ok(GenerateResponse {
        text: choice.message.content.unwrap_or_default(),
        finish_reason: match choice.finish_reason.as_deref() {
            Some("length") => FinishReason::Length,
            _ => FinishReason::Stop,
        },
        completion_tokens: response.usage.map(|u| u.completion_tokens),
    })
}

#[async_trait]
impl CompletionService for OpenAIBackend {
    async fn complete(
        &self,
        messages: &[Message],
        profile: &ModelProfile,
    ) -> eco_assistant_core::Result<GenerateResponse> {
        Ok(self.chat(messages, profile).await?)
    }

    async fn is_available(&self) -> bool {
        let url = format!("{}/models", self.config.endpoint.trim_end_matches('/'));
        self.client
            .get(&url)
            .headers(self.build_headers())
            .timeout(Duration::from_secs(5))
            .send()
            .await
            .map(|r| r.status().is_success())
            .unwrap_or(false)
    }

    fn provider_name(&self) -> &str {
        "openai-compatible"
    }
}

// OpenAI API types
#[derive(Debug, Serialize)]
struct OpenAIChatRequest {
    model: String,
    messages: Vec<OpenAIMessage>,
    max_tokens: u32,
    temperature: f32,
    stream: bool,
}

#[derive(Debug, Serialize)]
struct OpenAIMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct OpenAIChatResponse {
    choices: Vec<OpenAIChoice>,
    usage: Option<OpenAIUsage>,
}

#[derive(Debug, Deserialize)]
struct OpenAIChoice {
    message: OpenAIResponseMessage,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OpenAIResponseMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OpenAIUsage {
    completion_tokens: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use eco_assistant_config::ModelCatalog;
    use eco_assistant_core::ProfileName;

    #[test]
    fn test_config_default() {
        let config = OpenAIConfig::default();
        assert_eq!(config.endpoint, "https://api.groq.com/openai/v1");
        assert!(config.api_key.is_empty());
        assert_eq!(config.timeout, Duration::from_secs(60));
    }

    #[test]
    fn test_chat_url_trims_slash() {
        let backend = OpenAIBackend::new(OpenAIConfig {
            endpoint: "http://localhost:8000/v1/".to_string(),
            api_key: "gsk_test".to_string(),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(backend.chat_url(), "http://localhost:8000/v1/chat/completions");
    }

    #[test]
    fn test_request_uses_profile() {
        let catalog = ModelCatalog::default();
        let profile = catalog.get(ProfileName::Creative);
        let request = OpenAIBackend::build_request(
            &[Message::system("sys"), Message::user("hi")],
            profile,
        );

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["model"], "mixtral-8x7b-32768");
        assert_eq!(json["max_tokens"], 400);
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["messages"][1]["content"], "hi");
        assert_eq!(json["stream"], false);
    }

    #[test]
    fn test_parse_response() {
        let body = r#"{
            "choices": [{"message": {"role": "assistant", "content": "Recycle it."}, "finish_reason": "length"}],
            "usage": {"prompt_tokens": 10, "completion_tokens": 3, "total_tokens": 13}
        }"#;
        let response: OpenAIChatResponse = serde_json::from_str(body).unwrap();
        let result = parse_response(response).unwrap();
        assert_eq!(result.text, "Recycle it.");
        assert_eq!(result.finish_reason, FinishReason::Length);
        assert_eq!(result.completion_tokens, Some(3));
    }

    #[test]
    fn test_parse_empty_choices() {
        let response: OpenAIChatResponse = serde_json::from_str(r#"{"choices": []}"#).unwrap();
        assert!(matches!(
            parse_response(response),
            Err(LlmError::InvalidResponse(_))
        ));
    }

    #[tokio::test]
    async fn test_missing_key_fails_before_request() {
        let backend = OpenAIBackend::new(OpenAIConfig::default()).unwrap();
        let profile = ModelCatalog::default().get(ProfileName::Basic).clone();
        let err = backend.chat(&[Message::user("hi")], &profile).await.unwrap_err();
        assert!(matches!(err, LlmError::Configuration(_)));
    }
}
