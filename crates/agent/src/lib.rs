//! Request orchestration for the eco assistant
//!
//! Features:
//! - History windowing by mode
//! - Chat turns: classify, route, complete, format, speak
//! - Document analysis over extracted upload text

pub mod chat;
pub mod document;
pub mod history;

pub use chat::{ChatAssistant, ChatReply};
pub use document::{DocumentAnalysis, DocumentAnalyzer, DocumentLimits};
pub use history::{recent_turns, window, window_size};

use thiserror::Error;

/// Agent errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AgentError {
    /// Missing or empty request input; the message is shown to the user
    #[error("{0}")]
    InvalidInput(String),

    /// Rejected or unreadable upload; the message is shown to the user
    #[error("{0}")]
    Extraction(String),

    #[error("LLM error: {0}")]
    Llm(String),

    #[error("Pipeline error: {0}")]
    Pipeline(String),
}

impl From<eco_assistant_core::Error> for AgentError {
    fn from(err: eco_assistant_core::Error) -> Self {
        use eco_assistant_core::Error;
        match err {
            Error::Completion(msg) => AgentError::Llm(msg),
            Error::Extraction(msg) => AgentError::Extraction(msg),
            Error::InvalidInput(msg) => AgentError::InvalidInput(msg),
            other => AgentError::Pipeline(other.to_string()),
        }
    }
}

impl From<eco_assistant_llm::LlmError> for AgentError {
    fn from(err: eco_assistant_llm::LlmError) -> Self {
        AgentError::Llm(err.to_string())
    }
}

impl From<eco_assistant_pipeline::ExtractionError> for AgentError {
    fn from(err: eco_assistant_pipeline::ExtractionError) -> Self {
        AgentError::Extraction(err.to_string())
    }
}

impl From<eco_assistant_pipeline::PipelineError> for AgentError {
    fn from(err: eco_assistant_pipeline::PipelineError) -> Self {
        match err {
            eco_assistant_pipeline::PipelineError::Extraction(e) => e.into(),
            other => AgentError::Pipeline(other.to_string()),
        }
    }
}
