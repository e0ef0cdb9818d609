//! Document analysis
//!
//! Extracts text from an upload on a blocking thread, sends a bounded slice
//! of it to the research profile with the analysis prompt, and returns the
//! formatted analysis alongside a preview of the extracted text.

use std::sync::Arc;

use eco_assistant_config::{DocumentsConfig, ModelCatalog};
use eco_assistant_core::{CompletionService, ProfileName};
use eco_assistant_llm::document_analysis_messages;
use eco_assistant_pipeline::DocumentExtractor;
use eco_assistant_text_processing::{format_response, truncate_chars};

use crate::AgentError;

/// Character limits applied to extracted text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DocumentLimits {
    /// Characters placed in the analysis prompt
    pub analysis_chars: usize,
    /// Characters echoed back as the preview
    pub preview_chars: usize,
}

impl Default for DocumentLimits {
    fn default() -> Self {
        Self::from_settings(&DocumentsConfig::default())
    }
}

impl DocumentLimits {
    pub fn from_settings(settings: &DocumentsConfig) -> Self {
        Self {
            analysis_chars: settings.analysis_char_limit,
            preview_chars: settings.preview_char_limit,
        }
    }
}

/// Result of analyzing one upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentAnalysis {
    pub filename: String,
    /// Leading slice of the extracted text, `...`-suffixed when cut
    pub file_content: String,
    /// Formatted markup
    pub analysis: String,
    /// Characters in the full extraction
    pub content_length: usize,
    /// Uppercased extension
    pub file_type: String,
}

pub struct DocumentAnalyzer {
    completion: Arc<dyn CompletionService>,
    catalog: Arc<ModelCatalog>,
    extractor: DocumentExtractor,
    limits: DocumentLimits,
}

impl DocumentAnalyzer {
    pub fn new(
        completion: Arc<dyn CompletionService>,
        catalog: Arc<ModelCatalog>,
        extractor: DocumentExtractor,
        limits: DocumentLimits,
    ) -> Self {
        Self {
            completion,
            catalog,
            extractor,
            limits,
        }
    }

    pub fn extractor(&self) -> &DocumentExtractor {
        &self.extractor
    }

    pub async fn analyze(&self, file_name: &str, bytes: Vec<u8>) -> Result<DocumentAnalysis, AgentError> {
        if file_name.is_empty() {
            return Err(AgentError::InvalidInput("No file selected".to_string()));
        }
        self.extractor.validate(file_name)?;

        metrics::counter!("eco_assistant_requests_total", "endpoint" => "upload-file").increment(1);
        tracing::info!(file_name, bytes = bytes.len(), "Processing uploaded document");

        let extractor = self.extractor.clone();
        let name = file_name.to_string();
        let extracted = tokio::task::spawn_blocking(move || extractor.extract(&name, &bytes))
            .await
            .map_err(|e| AgentError::Pipeline(format!("Extraction task failed: {}", e)))??;

        let content_length = extracted.text.chars().count();
        let excerpt = truncate_chars(&extracted.text, self.limits.analysis_chars);
        let messages = document_analysis_messages(excerpt);

        let profile = self.catalog.get(ProfileName::Research);
        let response = self.completion.complete(&messages, profile).await?;
        let analysis = format_response(&response.text);

        tracing::info!(file_name, content_length, "Document analysis completed");

        Ok(DocumentAnalysis {
            filename: file_name.to_string(),
            file_content: preview(&extracted.text, self.limits.preview_chars),
            analysis,
            content_length,
            file_type: extracted.extension.to_uppercase(),
        })
    }
}

fn preview(text: &str, limit: usize) -> String {
    let head = truncate_chars(text, limit);
    if head.len() < text.len() {
        format!("{}...", head)
    } else {
        text.to_string()
    }
}
