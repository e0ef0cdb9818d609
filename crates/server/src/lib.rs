//! Eco Assistant Server
//!
//! HTTP endpoints for chat, document upload, transcription and image lookup.

pub mod error;
pub mod http;
pub mod metrics;
pub mod state;

pub use error::ApiError;
pub use http::create_router;
pub use metrics::{init_metrics, metrics_handler};
pub use state::{AppState, Services};

use thiserror::Error;

/// Startup errors
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Backend initialization failed: {0}")]
    Backend(String),
}

impl From<eco_assistant_config::ConfigError> for ServerError {
    fn from(err: eco_assistant_config::ConfigError) -> Self {
        ServerError::Configuration(err.to_string())
    }
}

impl From<eco_assistant_llm::LlmError> for ServerError {
    fn from(err: eco_assistant_llm::LlmError) -> Self {
        ServerError::Backend(err.to_string())
    }
}

impl From<eco_assistant_pipeline::SpeechError> for ServerError {
    fn from(err: eco_assistant_pipeline::SpeechError) -> Self {
        ServerError::Backend(err.to_string())
    }
}

impl From<eco_assistant_pipeline::PipelineError> for ServerError {
    fn from(err: eco_assistant_pipeline::PipelineError) -> Self {
        ServerError::Backend(err.to_string())
    }
}
