//! Application State
//!
//! Shared state across all handlers. Collaborators are built once and only
//! read afterwards.

use std::sync::Arc;

use eco_assistant_agent::{ChatAssistant, DocumentAnalyzer, DocumentLimits};
use eco_assistant_config::{ModelCatalog, Settings};
use eco_assistant_core::{CompletionService, ImageSource, SpeechSynthesizer, Transcriber};
use eco_assistant_llm::{ModelRouter, OpenAIBackend, OpenAIConfig};
use eco_assistant_pipeline::{
    DocumentExtractor, GoogleTranslateTts, ImageSourceConfig, ProbingImageSource,
    SchedulerConfig, SpeechScheduler, TtsConfig, WhisperConfig, WhisperTranscriber,
};
use metrics_exporter_prometheus::PrometheusHandle;

use crate::ServerError;

/// External collaborators behind their traits
#[derive(Clone)]
pub struct Services {
    pub completion: Arc<dyn CompletionService>,
    pub synthesizer: Arc<dyn SpeechSynthesizer>,
    pub transcriber: Arc<dyn Transcriber>,
    pub images: Arc<dyn ImageSource>,
}

impl Services {
    /// HTTP-backed collaborators described by the settings
    pub fn from_settings(settings: &Settings) -> Result<Self, ServerError> {
        let completion = OpenAIBackend::new(OpenAIConfig::from_settings(&settings.llm))?;
        let synthesizer = GoogleTranslateTts::new(TtsConfig::from_settings(&settings.speech))?;
        let transcriber = WhisperTranscriber::new(WhisperConfig::from_settings(
            &settings.transcription,
            &settings.llm,
        ))?;
        let images = ProbingImageSource::new(ImageSourceConfig::from_settings(&settings.images))?;

        Ok(Self {
            completion: Arc::new(completion),
            synthesizer: Arc::new(synthesizer),
            transcriber: Arc::new(transcriber),
            images: Arc::new(images),
        })
    }
}

/// Application state
#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<Settings>,
    pub catalog: Arc<ModelCatalog>,
    pub chat: Arc<ChatAssistant>,
    pub documents: Arc<DocumentAnalyzer>,
    pub completion: Arc<dyn CompletionService>,
    pub transcriber: Arc<dyn Transcriber>,
    pub images: Arc<dyn ImageSource>,
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    /// Build state with the HTTP-backed collaborators
    pub fn new(settings: Settings) -> Result<Self, ServerError> {
        let services = Services::from_settings(&settings)?;
        Ok(Self::with_services(settings, services))
    }

    /// Build state around caller-supplied collaborators
    pub fn with_services(settings: Settings, services: Services) -> Self {
        tracing::info!(
            completion = services.completion.provider_name(),
            synthesizer = services.synthesizer.model_name(),
            transcriber = services.transcriber.model_name(),
            "Building application state"
        );
        let catalog = Arc::new(ModelCatalog::from_config(&settings.llm.profiles));

        let scheduler = SpeechScheduler::new(
            services.synthesizer,
            SchedulerConfig::from_settings(&settings.speech),
        );
        let chat = ChatAssistant::new(
            Arc::clone(&services.completion),
            ModelRouter::new(Arc::clone(&catalog)),
            Arc::new(scheduler),
        );
        let documents = DocumentAnalyzer::new(
            Arc::clone(&services.completion),
            Arc::clone(&catalog),
            DocumentExtractor::from_settings(&settings.documents),
            DocumentLimits::from_settings(&settings.documents),
        );

        Self {
            settings: Arc::new(settings),
            catalog,
            chat: Arc::new(chat),
            documents: Arc::new(documents),
            completion: services.completion,
            transcriber: services.transcriber,
            images: services.images,
            metrics: None,
        }
    }

    pub fn with_metrics(mut self, handle: Option<PrometheusHandle>) -> Self {
        self.metrics = handle;
        self
    }
}
