//! Collaborator adapters for the eco assistant
//!
//! This crate provides everything that talks to the outside world on behalf
//! of a request:
//! - Speech synthesis scheduling under a time budget, plus the TTS backend
//! - Whisper transcription over multipart upload
//! - Document text extraction (TXT, PDF, DOCX, RTF)
//! - Image lookup by probing candidate URLs

pub mod documents;
pub mod images;
pub mod stt;
pub mod tts;

pub use documents::{DocumentExtractor, DocumentKind, ExtractedDocument, ExtractionError};
pub use images::{ImageSourceConfig, ProbingImageSource};
pub use stt::{WhisperConfig, WhisperTranscriber};
pub use tts::{
    AudioPayload, GoogleTranslateTts, SchedulerConfig, SpeechError, SpeechScheduler, TtsConfig,
};

use thiserror::Error;

/// Pipeline errors
#[derive(Error, Debug, Clone)]
pub enum PipelineError {
    #[error(transparent)]
    Extraction(#[from] ExtractionError),

    #[error(transparent)]
    Speech(#[from] SpeechError),

    #[error("Image error: {0}")]
    Image(String),
}

impl From<PipelineError> for eco_assistant_core::Error {
    fn from(err: PipelineError) -> Self {
        match err {
            PipelineError::Extraction(e) => e.into(),
            PipelineError::Speech(e) => e.into(),
            PipelineError::Image(msg) => eco_assistant_core::Error::Image(msg),
        }
    }
}
