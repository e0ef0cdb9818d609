//! Configuration management for the eco assistant gateway
//!
//! Supports loading configuration from:
//! - YAML/TOML/JSON files under `config/`
//! - Environment variables (ECO_ASSISTANT_ prefix, `__` separator)
//!
//! The model profile catalog is built once from the loaded settings and
//! shared read-only for the life of the process.

pub mod constants;
pub mod profiles;
pub mod settings;

pub use profiles::{ModelCatalog, ProfileEntry, ProfilesConfig};
pub use settings::{
    load_settings, DocumentsConfig, ImagesConfig, LlmConfig, ObservabilityConfig,
    RuntimeEnvironment, ServerConfig, Settings, SpeechConfig, TranscriptionConfig,
};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },
}

impl From<config::ConfigError> for ConfigError {
    fn from(err: config::ConfigError) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}

impl From<ConfigError> for eco_assistant_core::Error {
    fn from(err: ConfigError) -> Self {
        eco_assistant_core::Error::Configuration(err.to_string())
    }
}
