//! Text-to-Speech
//!
//! - `GoogleTranslateTts`: MP3 synthesis through the translate_tts endpoint
//! - `SpeechScheduler`: decides whether a reply gets audio and runs the
//!   synthesis call under a hard time budget

mod google;
mod scheduler;

pub use google::{GoogleTranslateTts, TtsConfig};
pub use scheduler::{AudioPayload, SchedulerConfig, SpeechScheduler};

use thiserror::Error;

/// Speech service errors
#[derive(Error, Debug, Clone)]
pub enum SpeechError {
    #[error("Synthesis failed: {0}")]
    Synthesis(String),

    #[error("Transcription failed: {0}")]
    Transcription(String),

    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },
}

impl From<SpeechError> for eco_assistant_core::Error {
    fn from(err: SpeechError) -> Self {
        match err {
            SpeechError::Transcription(msg) => eco_assistant_core::Error::Transcription(msg),
            other => eco_assistant_core::Error::Synthesis(other.to_string()),
        }
    }
}
