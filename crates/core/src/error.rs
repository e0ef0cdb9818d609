//! Error types shared by every crate in the gateway

use thiserror::Error;

/// Errors raised at collaborator boundaries.
///
/// The pure components (classifier, router, formatter, windower, keyword
/// extractor) are total and never produce one of these.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Completion error: {0}")]
    Completion(String),

    #[error("Speech synthesis error: {0}")]
    Synthesis(String),

    #[error("Transcription error: {0}")]
    Transcription(String),

    /// Carries the user-facing extraction message verbatim.
    #[error("{0}")]
    Extraction(String),

    #[error("Image service error: {0}")]
    Image(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

pub type Result<T> = std::result::Result<T, Error>;
