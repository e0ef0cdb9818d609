//! Whisper transcription backend

use std::time::Duration;

use async_trait::async_trait;
use eco_assistant_config::{LlmConfig, TranscriptionConfig};
use eco_assistant_core::{AudioInput, Transcriber};
use reqwest::multipart::{Form, Part};
use reqwest::Client;

use crate::SpeechError;

/// Upload name used when the client sent none
const DEFAULT_FILE_NAME: &str = "recording.webm";
const DEFAULT_MIME: &str = "audio/webm";

/// Whisper backend configuration
#[derive(Debug, Clone)]
pub struct WhisperConfig {
    /// OpenAI-compatible API root
    pub endpoint: String,
    pub api_key: String,
    pub model: String,
    pub language: String,
    pub timeout: Duration,
}

impl Default for WhisperConfig {
    fn default() -> Self {
        Self {
            endpoint: eco_assistant_config::constants::endpoints::GROQ_DEFAULT.to_string(),
            api_key: String::new(),
            model: eco_assistant_config::constants::transcription::MODEL.to_string(),
            language: eco_assistant_config::constants::transcription::LANGUAGE.to_string(),
            timeout: Duration::from_millis(eco_assistant_config::constants::timeouts::STT_TIMEOUT_MS),
        }
    }
}

impl WhisperConfig {
    /// Build from settings; the completion endpoint and key are reused
    /// unless transcription names its own endpoint
    pub fn from_settings(transcription: &TranscriptionConfig, llm: &LlmConfig) -> Self {
        Self {
            endpoint: transcription
                .endpoint
                .clone()
                .unwrap_or_else(|| llm.endpoint.clone()),
            api_key: llm.api_key.clone().unwrap_or_default(),
            model: transcription.model.clone(),
            language: transcription.language.clone(),
            timeout: Duration::from_millis(transcription.timeout_ms),
        }
    }
}

pub struct WhisperTranscriber {
    config: WhisperConfig,
    client: Client,
}

impl WhisperTranscriber {
    pub fn new(config: WhisperConfig) -> Result<Self, SpeechError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| SpeechError::Transcription(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    fn transcriptions_url(&self) -> String {
        format!(
            "{}/audio/transcriptions",
            self.config.endpoint.trim_end_matches('/')
        )
    }

    async fn request(&self, audio: AudioInput) -> Result<String, SpeechError> {
        let file_name = if audio.file_name.trim().is_empty() {
            DEFAULT_FILE_NAME.to_string()
        } else {
            audio.file_name
        };
        let mime = audio.mime_type.as_deref().unwrap_or(DEFAULT_MIME);

        let file_part = Part::bytes(audio.bytes)
            .file_name(file_name)
            .mime_str(mime)
            .map_err(|e| SpeechError::Transcription(format!("MIME error: {}", e)))?;

        let form = Form::new()
            .text("model", self.config.model.clone())
            .text("language", self.config.language.clone())
            .text("response_format", "text")
            .text("temperature", "0")
            .part("file", file_part);

        let response = self
            .client
            .post(self.transcriptions_url())
            .bearer_auth(&self.config.api_key)
            .multipart(form)
            .send()
            .await
            .map_err(|e| SpeechError::Transcription(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SpeechError::Transcription(format!("HTTP {}: {}", status, body)));
        }

        let text = response
            .text()
            .await
            .map_err(|e| SpeechError::Transcription(e.to_string()))?;

        Ok(text.trim().to_string())
    }
}

#[async_trait]
impl Transcriber for WhisperTranscriber {
    async fn transcribe(&self, audio: AudioInput) -> eco_assistant_core::Result<String> {
        let bytes = audio.bytes.len();
        let text = self.request(audio).await?;
        tracing::debug!(bytes, chars = text.chars().count(), "Transcription complete");
        Ok(text)
    }

    fn model_name(&self) -> &str {
        &self.config.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{extract::Multipart, http::StatusCode, routing::post, Router};

    async fn serve(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}", addr)
    }

    fn transcriber(endpoint: String) -> WhisperTranscriber {
        WhisperTranscriber::new(WhisperConfig {
            endpoint,
            api_key: "gsk_test".to_string(),
            ..Default::default()
        })
        .unwrap()
    }

    #[test]
    fn test_from_settings_reuses_llm_endpoint() {
        let llm = LlmConfig {
            endpoint: "https://llm.example/v1".to_string(),
            api_key: Some("key".to_string()),
            ..Default::default()
        };
        let config = WhisperConfig::from_settings(&TranscriptionConfig::default(), &llm);
        assert_eq!(config.endpoint, "https://llm.example/v1");
        assert_eq!(config.api_key, "key");
        assert_eq!(config.model, "whisper-large-v3-turbo");
        assert_eq!(config.language, "en");
    }

    #[tokio::test]
    async fn test_transcribe_sends_form_and_trims() {
        let router = Router::new().route(
            "/v1/audio/transcriptions",
            post(|mut multipart: Multipart| async move {
                let mut fields = Vec::new();
                while let Some(field) = multipart.next_field().await.unwrap() {
                    let name = field.name().unwrap_or_default().to_string();
                    let file_name = field.file_name().map(str::to_string);
                    let value = field.text().await.unwrap_or_default();
                    fields.push((name, file_name, value));
                }

                let get = |key: &str| {
                    fields
                        .iter()
                        .find(|(name, _, _)| name == key)
                        .map(|(_, _, v)| v.clone())
                };
                let file_name = fields
                    .iter()
                    .find(|(name, _, _)| name == "file")
                    .and_then(|(_, f, _)| f.clone());

                if get("model").as_deref() != Some("whisper-large-v3-turbo")
                    || get("response_format").as_deref() != Some("text")
                    || file_name.as_deref() != Some("recording.webm")
                {
                    return (StatusCode::BAD_REQUEST, "bad form".to_string());
                }
                (StatusCode::OK, format!("  {}  \n", get("file").unwrap_or_default()))
            }),
        );
        let base = serve(router).await;

        let text = transcriber(format!("{}/v1", base))
            .transcribe(AudioInput::new(b"hello there".to_vec(), ""))
            .await
            .unwrap();
        assert_eq!(text, "hello there");
    }

    #[tokio::test]
    async fn test_transcribe_http_error() {
        let router = Router::new().route(
            "/audio/transcriptions",
            post(|| async { (StatusCode::UNAUTHORIZED, "invalid key") }),
        );
        let base = serve(router).await;

        let err = transcriber(base)
            .transcribe(AudioInput::new(vec![0u8; 4], "clip.webm"))
            .await
            .unwrap_err();
        match err {
            eco_assistant_core::Error::Transcription(msg) => assert!(msg.contains("401")),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
