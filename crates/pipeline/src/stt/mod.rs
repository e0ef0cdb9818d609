//! Speech-to-Text
//!
//! - `WhisperTranscriber`: hosted Whisper via the OpenAI-compatible
//!   `/audio/transcriptions` endpoint

mod whisper;

pub use whisper::{WhisperConfig, WhisperTranscriber};
