//! Google Translate TTS backend
//!
//! The endpoint accepts short text fragments only, so longer input is split
//! on word boundaries and the returned MP3 segments are concatenated.

use std::time::Duration;

use async_trait::async_trait;
use eco_assistant_config::SpeechConfig;
use eco_assistant_core::SpeechSynthesizer;
use reqwest::Client;

use super::SpeechError;

/// Longest fragment sent in one request
const MAX_FRAGMENT_CHARS: usize = 100;

/// TTS backend configuration
#[derive(Debug, Clone)]
pub struct TtsConfig {
    /// Full translate_tts URL
    pub endpoint: String,
    /// Per-request timeout
    pub timeout: Duration,
}

impl Default for TtsConfig {
    fn default() -> Self {
        Self {
            endpoint: eco_assistant_config::constants::endpoints::TRANSLATE_TTS_DEFAULT.to_string(),
            timeout: Duration::from_secs(10),
        }
    }
}

impl TtsConfig {
    pub fn from_settings(settings: &SpeechConfig) -> Self {
        Self {
            endpoint: settings.endpoint.clone(),
            ..Default::default()
        }
    }
}

pub struct GoogleTranslateTts {
    config: TtsConfig,
    client: Client,
}

impl GoogleTranslateTts {
    pub fn new(config: TtsConfig) -> Result<Self, SpeechError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| SpeechError::Synthesis(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    async fn fetch_fragment(
        &self,
        fragment: &str,
        index: usize,
        total: usize,
        language: &str,
    ) -> Result<Vec<u8>, SpeechError> {
        let total = total.to_string();
        let index = index.to_string();
        let textlen = fragment.chars().count().to_string();

        let response = self
            .client
            .get(&self.config.endpoint)
            .query(&[
                ("ie", "UTF-8"),
                ("client", "tw-ob"),
                ("tl", language),
                ("q", fragment),
                ("total", total.as_str()),
                ("idx", index.as_str()),
                ("textlen", textlen.as_str()),
            ])
            .send()
            .await
            .map_err(|e| SpeechError::Synthesis(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SpeechError::Http {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| SpeechError::Synthesis(e.to_string()))?;
        Ok(bytes.to_vec())
    }
}

/// Split text into fragments of at most `max_chars`, preferring word breaks
pub(crate) fn split_fragments(text: &str, max_chars: usize) -> Vec<String> {
    let mut fragments = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let word_len = word.chars().count();

        if word_len > max_chars {
            if !current.is_empty() {
                fragments.push(std::mem::take(&mut current));
            }
            let chars: Vec<char> = word.chars().collect();
            for piece in chars.chunks(max_chars) {
                fragments.push(piece.iter().collect());
            }
            continue;
        }

        let needed = if current.is_empty() {
            word_len
        } else {
            current.chars().count() + 1 + word_len
        };

        if needed > max_chars {
            fragments.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }

    if !current.is_empty() {
        fragments.push(current);
    }
    fragments
}

#[async_trait]
impl SpeechSynthesizer for GoogleTranslateTts {
    async fn synthesize(&self, text: &str, language: &str) -> eco_assistant_core::Result<Vec<u8>> {
        let fragments = split_fragments(text, MAX_FRAGMENT_CHARS);
        let mut audio = Vec::new();

        for (idx, fragment) in fragments.iter().enumerate() {
            let bytes = self
                .fetch_fragment(fragment, idx, fragments.len(), language)
                .await?;
            audio.extend_from_slice(&bytes);
        }

        Ok(audio)
    }

    fn model_name(&self) -> &str {
        "google-translate-tts"
    }
}
