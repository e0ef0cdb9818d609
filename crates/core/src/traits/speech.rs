//! Speech processing traits

use crate::Result;
use async_trait::async_trait;

/// Text-to-Speech interface
///
/// Implementations:
/// - `GoogleTranslateTts` - unauthenticated translate_tts endpoint (MP3)
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync + 'static {
    /// Synthesize text into encoded audio bytes
    async fn synthesize(&self, text: &str, language: &str) -> Result<Vec<u8>>;

    /// Get model name for logging
    fn model_name(&self) -> &str;
}

/// Uploaded audio awaiting transcription
#[derive(Debug, Clone)]
pub struct AudioInput {
    pub bytes: Vec<u8>,
    pub file_name: String,
    pub mime_type: Option<String>,
}

impl AudioInput {
    pub fn new(bytes: Vec<u8>, file_name: impl Into<String>) -> Self {
        Self {
            bytes,
            file_name: file_name.into(),
            mime_type: None,
        }
    }

    pub fn with_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = Some(mime_type.into());
        self
    }
}

/// Speech-to-Text interface
///
/// Implementations:
/// - `WhisperTranscriber` - hosted Whisper over multipart upload
#[async_trait]
pub trait Transcriber: Send + Sync + 'static {
    /// Transcribe an uploaded clip; returns trimmed text (possibly empty)
    async fn transcribe(&self, audio: AudioInput) -> Result<String>;

    /// Get model name for logging
    fn model_name(&self) -> &str;
}
