//! LLM integration for the eco assistant
//!
//! Features:
//! - Prompt templates (basic, research, diagram, document analysis)
//! - Model routing from mode + query classification
//! - OpenAI-compatible chat-completion backend (Groq by default)

pub mod backend;
pub mod prompt;
pub mod router;

pub use backend::{OpenAIBackend, OpenAIConfig};
pub use prompt::{build_messages, document_analysis_messages, PromptTemplate};
pub use router::{ModelRouter, RouteDecision};

use thiserror::Error;

/// LLM errors
#[derive(Error, Debug)]
pub enum LlmError {
    #[error("API error: {0}")]
    Api(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Request timed out")]
    Timeout,

    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl From<reqwest::Error> for LlmError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            LlmError::Timeout
        } else {
            LlmError::Network(err.to_string())
        }
    }
}

impl From<LlmError> for eco_assistant_core::Error {
    fn from(err: LlmError) -> Self {
        eco_assistant_core::Error::Completion(err.to_string())
    }
}
