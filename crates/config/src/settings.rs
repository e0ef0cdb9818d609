//! Main settings module

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::constants::{documents, endpoints, speech, timeouts, transcription};
use crate::{ConfigError, ProfilesConfig};

/// Runtime environment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RuntimeEnvironment {
    /// Relaxed validation, warnings only
    #[default]
    Development,
    Staging,
    /// All validations enforced
    Production,
}

impl RuntimeEnvironment {
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

/// Main application settings
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Settings {
    #[serde(default)]
    pub environment: RuntimeEnvironment,

    /// HTTP surface
    #[serde(default)]
    pub server: ServerConfig,

    /// Completion service and model profiles
    #[serde(default)]
    pub llm: LlmConfig,

    /// Speech synthesis
    #[serde(default)]
    pub speech: SpeechConfig,

    /// Speech transcription
    #[serde(default)]
    pub transcription: TranscriptionConfig,

    /// Document ingestion limits
    #[serde(default)]
    pub documents: DocumentsConfig,

    /// Image candidate sources
    #[serde(default)]
    pub images: ImagesConfig,

    #[serde(default)]
    pub observability: ObservabilityConfig,
}

impl Settings {
    /// Validate settings
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_server()?;
        self.validate_llm()?;
        self.validate_speech()?;
        self.validate_documents()?;
        Ok(())
    }

    fn validate_server(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::InvalidValue {
                field: "server.port".to_string(),
                message: "Port cannot be 0".to_string(),
            });
        }

        if self.server.max_upload_bytes == 0 {
            return Err(ConfigError::InvalidValue {
                field: "server.max_upload_bytes".to_string(),
                message: "Upload limit must be at least 1 byte".to_string(),
            });
        }

        if self.server.timeout_seconds == 0 {
            return Err(ConfigError::InvalidValue {
                field: "server.timeout_seconds".to_string(),
                message: "Timeout must be at least 1 second".to_string(),
            });
        }

        Ok(())
    }

    fn validate_llm(&self) -> Result<(), ConfigError> {
        self.llm.profiles.validate()?;

        if self.llm.endpoint.trim().is_empty() {
            return Err(ConfigError::MissingField("llm.endpoint".to_string()));
        }

        if self.llm.api_key.is_none() {
            if self.environment.is_production() {
                return Err(ConfigError::MissingField("llm.api_key".to_string()));
            }
            tracing::warn!(
                "No completion API key configured (set GROQ_API_KEY or ECO_ASSISTANT__LLM__API_KEY); \
                 chat requests will fail upstream"
            );
        }

        Ok(())
    }

    fn validate_speech(&self) -> Result<(), ConfigError> {
        let speech = &self.speech;

        if speech.budget_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "speech.budget_ms".to_string(),
                message: "Budget must be at least 1ms".to_string(),
            });
        }

        if speech.truncate_chars > speech.max_clean_chars {
            return Err(ConfigError::InvalidValue {
                field: "speech.truncate_chars".to_string(),
                message: format!(
                    "Cannot exceed speech.max_clean_chars ({})",
                    speech.max_clean_chars
                ),
            });
        }

        Ok(())
    }

    fn validate_documents(&self) -> Result<(), ConfigError> {
        let docs = &self.documents;

        if docs.analysis_char_limit == 0 || docs.preview_char_limit == 0 {
            return Err(ConfigError::InvalidValue {
                field: "documents".to_string(),
                message: "Character limits must be at least 1".to_string(),
            });
        }

        if docs.allowed_extensions.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "documents.allowed_extensions".to_string(),
                message: "At least one file type must be accepted".to_string(),
            });
        }

        Ok(())
    }

    /// Upload limit rendered for the health report, e.g. `50MB`
    pub fn max_upload_label(&self) -> String {
        format!("{}MB", self.server.max_upload_bytes / (1024 * 1024))
    }
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,

    /// Enable CORS
    #[serde(default = "default_true")]
    pub cors_enabled: bool,

    /// CORS allowed origins; empty allows any origin
    #[serde(default)]
    pub cors_origins: Vec<String>,

    /// Maximum request body size for uploads
    #[serde(default = "default_max_upload")]
    pub max_upload_bytes: usize,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}
fn default_port() -> u16 {
    5000
}
fn default_timeout() -> u64 {
    120
}
fn default_true() -> bool {
    true
}
fn default_max_upload() -> usize {
    documents::MAX_UPLOAD_BYTES
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            timeout_seconds: default_timeout(),
            cors_enabled: true,
            cors_origins: Vec::new(),
            max_upload_bytes: default_max_upload(),
        }
    }
}

/// Completion service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// OpenAI-compatible API root
    #[serde(default = "default_llm_endpoint")]
    pub endpoint: String,

    /// Bearer token; falls back to GROQ_API_KEY
    #[serde(default = "default_api_key")]
    pub api_key: Option<String>,

    #[serde(default = "default_llm_timeout")]
    pub timeout_ms: u64,

    #[serde(default)]
    pub profiles: ProfilesConfig,
}

fn default_llm_endpoint() -> String {
    endpoints::GROQ_DEFAULT.to_string()
}
fn default_api_key() -> Option<String> {
    std::env::var("GROQ_API_KEY").ok().filter(|k| !k.is_empty())
}
fn default_llm_timeout() -> u64 {
    timeouts::LLM_REQUEST_MS
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            endpoint: default_llm_endpoint(),
            api_key: default_api_key(),
            timeout_ms: default_llm_timeout(),
            profiles: ProfilesConfig::default(),
        }
    }
}

/// Speech synthesis configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeechConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,

    #[serde(default = "default_speech_language")]
    pub language: String,

    /// Join budget for the synthesis task
    #[serde(default = "default_tts_budget")]
    pub budget_ms: u64,

    #[serde(default = "default_max_raw_chars")]
    pub max_raw_chars: usize,

    #[serde(default = "default_max_clean_chars")]
    pub max_clean_chars: usize,

    #[serde(default = "default_truncate_chars")]
    pub truncate_chars: usize,

    #[serde(default = "default_tts_endpoint")]
    pub endpoint: String,
}

fn default_speech_language() -> String {
    speech::DEFAULT_LANGUAGE.to_string()
}
fn default_tts_budget() -> u64 {
    timeouts::TTS_BUDGET_MS
}
fn default_max_raw_chars() -> usize {
    speech::MAX_RAW_CHARS
}
fn default_max_clean_chars() -> usize {
    speech::MAX_CLEAN_CHARS
}
fn default_truncate_chars() -> usize {
    speech::TRUNCATE_CHARS
}
fn default_tts_endpoint() -> String {
    endpoints::TRANSLATE_TTS_DEFAULT.to_string()
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            language: default_speech_language(),
            budget_ms: default_tts_budget(),
            max_raw_chars: default_max_raw_chars(),
            max_clean_chars: default_max_clean_chars(),
            truncate_chars: default_truncate_chars(),
            endpoint: default_tts_endpoint(),
        }
    }
}

/// Speech transcription configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriptionConfig {
    /// OpenAI-compatible API root; the llm endpoint and key are reused when unset
    #[serde(default)]
    pub endpoint: Option<String>,

    #[serde(default = "default_stt_model")]
    pub model: String,

    #[serde(default = "default_stt_language")]
    pub language: String,

    #[serde(default = "default_stt_timeout")]
    pub timeout_ms: u64,
}

fn default_stt_model() -> String {
    transcription::MODEL.to_string()
}
fn default_stt_language() -> String {
    transcription::LANGUAGE.to_string()
}
fn default_stt_timeout() -> u64 {
    timeouts::STT_TIMEOUT_MS
}

impl Default for TranscriptionConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            model: default_stt_model(),
            language: default_stt_language(),
            timeout_ms: default_stt_timeout(),
        }
    }
}

/// Document ingestion configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentsConfig {
    #[serde(default = "default_analysis_limit")]
    pub analysis_char_limit: usize,

    #[serde(default = "default_preview_limit")]
    pub preview_char_limit: usize,

    /// Lowercase extensions without the dot
    #[serde(default = "default_allowed_extensions")]
    pub allowed_extensions: Vec<String>,
}

fn default_analysis_limit() -> usize {
    documents::ANALYSIS_CHAR_LIMIT
}
fn default_preview_limit() -> usize {
    documents::PREVIEW_CHAR_LIMIT
}
fn default_allowed_extensions() -> Vec<String> {
    documents::ALLOWED_EXTENSIONS
        .iter()
        .map(|ext| ext.to_string())
        .collect()
}

impl Default for DocumentsConfig {
    fn default() -> Self {
        Self {
            analysis_char_limit: default_analysis_limit(),
            preview_char_limit: default_preview_limit(),
            allowed_extensions: default_allowed_extensions(),
        }
    }
}

/// Image candidate configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImagesConfig {
    #[serde(default = "default_unsplash")]
    pub unsplash_url: String,

    #[serde(default = "default_picsum")]
    pub picsum_url: String,

    #[serde(default = "default_placeholder")]
    pub placeholder_url: String,

    #[serde(default = "default_probe_timeout")]
    pub probe_timeout_ms: u64,
}

fn default_unsplash() -> String {
    endpoints::UNSPLASH_SOURCE.to_string()
}
fn default_picsum() -> String {
    endpoints::PICSUM.to_string()
}
fn default_placeholder() -> String {
    endpoints::PLACEHOLDER.to_string()
}
fn default_probe_timeout() -> u64 {
    timeouts::IMAGE_PROBE_MS
}

impl Default for ImagesConfig {
    fn default() -> Self {
        Self {
            unsplash_url: default_unsplash(),
            picsum_url: default_picsum(),
            placeholder_url: default_placeholder(),
            probe_timeout_ms: default_probe_timeout(),
        }
    }
}

/// Observability configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservabilityConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Enable JSON logging
    #[serde(default)]
    pub log_json: bool,

    /// Expose Prometheus metrics at /metrics
    #[serde(default = "default_true")]
    pub metrics_enabled: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_json: false,
            metrics_enabled: true,
        }
    }
}

/// Load settings from `config/` and the environment
pub fn load_settings(env: Option<&str>) -> Result<Settings, ConfigError> {
    load_settings_from(Path::new("config"), env)
}

/// Load settings from files in `dir`, then environment variables
///
/// Layers, later wins: `{dir}/default.*`, `{dir}/{env}.*`, `ECO_ASSISTANT__*`.
pub fn load_settings_from(dir: &Path, env: Option<&str>) -> Result<Settings, ConfigError> {
    let mut builder = Config::builder();

    // Load default config
    let default_path = dir.join("default");
    builder = builder.add_source(File::with_name(&default_path.to_string_lossy()).required(false));

    // Load environment-specific config
    if let Some(env_name) = env {
        let env_path = dir.join(env_name);
        builder = builder.add_source(File::with_name(&env_path.to_string_lossy()).required(false));
    }

    // Load from environment variables
    builder = builder.add_source(
        Environment::with_prefix("ECO_ASSISTANT")
            .separator("__")
            .try_parsing(true),
    );

    let config = builder.build()?;
    let settings: Settings = config.try_deserialize()?;

    settings.validate()?;

    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.server.port, 5000);
        assert_eq!(settings.speech.budget_ms, 5000);
        assert_eq!(settings.documents.analysis_char_limit, 4000);
        assert_eq!(settings.documents.preview_char_limit, 1500);
        assert_eq!(settings.max_upload_label(), "50MB");
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_speech_validation() {
        let mut settings = Settings::default();
        settings.speech.truncate_chars = 2000;
        assert!(settings.validate().is_err());

        settings.speech.truncate_chars = 800;
        settings.speech.budget_ms = 0;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_production_requires_api_key() {
        let mut settings = Settings::default();
        settings.environment = RuntimeEnvironment::Production;
        settings.llm.api_key = None;
        assert!(settings.validate().is_err());

        settings.llm.api_key = Some("gsk_test".to_string());
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_load_layered_files() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("default.yaml"),
            "server:\n  port: 8088\nspeech:\n  language: en\n",
        )
        .unwrap();
        fs::write(
            dir.path().join("staging.yaml"),
            "environment: staging\nserver:\n  port: 9099\ndocuments:\n  preview_char_limit: 200\n",
        )
        .unwrap();

        let base = load_settings_from(dir.path(), None).unwrap();
        assert_eq!(base.server.port, 8088);
        assert_eq!(base.documents.preview_char_limit, 1500);

        let staged = load_settings_from(dir.path(), Some("staging")).unwrap();
        assert_eq!(staged.environment, RuntimeEnvironment::Staging);
        assert_eq!(staged.server.port, 9099);
        assert_eq!(staged.documents.preview_char_limit, 200);
        assert_eq!(staged.llm.profiles.basic.identifier, "llama-3.1-8b-instant");
    }

    #[test]
    fn test_load_rejects_invalid_profile() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("default.yaml"),
            "llm:\n  profiles:\n    basic:\n      identifier: tiny\n      max_output_tokens: 0\n      temperature: 0.5\n",
        )
        .unwrap();

        let result = load_settings_from(dir.path(), None);
        assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
    }
}
