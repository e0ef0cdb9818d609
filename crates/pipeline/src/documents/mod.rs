//! Document text extraction
//!
//! Uploaded files are dispatched on their (case-insensitive) extension:
//!
//! | extension     | extractor                                   |
//! |---------------|---------------------------------------------|
//! | `txt`         | ordered decoder list, lossy UTF-8 last      |
//! | `pdf`         | per-page text via `lopdf`                   |
//! | `docx`, `doc` | OOXML body paragraphs then table rows       |
//! | `rtf`         | control words and groups stripped           |
//!
//! Extraction failures carry the message shown to the user.

mod docx;
mod pdf;
mod rtf;
mod text;

use eco_assistant_config::DocumentsConfig;
use thiserror::Error;

pub use text::decode_text;

/// Extraction failures, worded for the end user
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractionError {
    #[error("File type not supported. Supported: {supported}")]
    UnsupportedFormat { supported: String },

    #[error("Error reading PDF file: {0}")]
    Pdf(String),

    #[error("No readable text found in PDF")]
    EmptyPdf,

    #[error("Error reading Word document: {0}")]
    Word(String),

    #[error("No readable text found in document")]
    EmptyDocument,

    #[error("Error reading RTF file: {0}")]
    Rtf(String),

    #[error("Error reading text file: {0}")]
    Text(String),

    /// Decoding succeeded but produced no characters
    #[error("Could not extract text from file")]
    NoText,
}

impl From<ExtractionError> for eco_assistant_core::Error {
    fn from(err: ExtractionError) -> Self {
        eco_assistant_core::Error::Extraction(err.to_string())
    }
}

/// Supported document families
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Text,
    Pdf,
    Word,
    Rtf,
}

impl DocumentKind {
    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension.to_ascii_lowercase().as_str() {
            "txt" => Some(DocumentKind::Text),
            "pdf" => Some(DocumentKind::Pdf),
            "docx" | "doc" => Some(DocumentKind::Word),
            "rtf" => Some(DocumentKind::Rtf),
            _ => None,
        }
    }
}

/// Text pulled out of an upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedDocument {
    pub text: String,
    pub kind: DocumentKind,
    /// Extension as uploaded, without the dot
    pub extension: String,
}

/// Extension after the last dot, if any
pub fn file_extension(file_name: &str) -> Option<&str> {
    file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext)
        .filter(|ext| !ext.is_empty())
}

/// Validates uploads against the accepted extensions and extracts their text
#[derive(Debug, Clone)]
pub struct DocumentExtractor {
    allowed: Vec<String>,
}

impl Default for DocumentExtractor {
    fn default() -> Self {
        Self::from_settings(&DocumentsConfig::default())
    }
}

impl DocumentExtractor {
    pub fn from_settings(settings: &DocumentsConfig) -> Self {
        Self {
            allowed: settings
                .allowed_extensions
                .iter()
                .map(|ext| ext.to_ascii_lowercase())
                .collect(),
        }
    }

    /// Comma-separated list of accepted extensions
    pub fn supported_formats(&self) -> String {
        self.allowed.join(", ")
    }

    pub fn allowed_extensions(&self) -> &[String] {
        &self.allowed
    }

    /// Resolve the document kind for a file name, rejecting anything not allowed
    pub fn validate(&self, file_name: &str) -> Result<(DocumentKind, String), ExtractionError> {
        let unsupported = || ExtractionError::UnsupportedFormat {
            supported: self.supported_formats(),
        };

        let extension = file_extension(file_name).ok_or_else(unsupported)?;
        if !self.allowed.iter().any(|a| a.eq_ignore_ascii_case(extension)) {
            return Err(unsupported());
        }

        let kind = DocumentKind::from_extension(extension).ok_or_else(unsupported)?;
        Ok((kind, extension.to_string()))
    }

    /// Extract text from an upload. CPU-bound; callers on the async runtime
    /// should run it on a blocking thread.
    pub fn extract(&self, file_name: &str, bytes: &[u8]) -> Result<ExtractedDocument, ExtractionError> {
        let (kind, extension) = self.validate(file_name)?;

        let text = match kind {
            DocumentKind::Text => decode_text(bytes),
            DocumentKind::Pdf => pdf::extract(bytes)?,
            DocumentKind::Word => docx::extract(bytes)?,
            DocumentKind::Rtf => rtf::extract(bytes)?,
        };
        if text.is_empty() {
            return Err(ExtractionError::NoText);
        }

        tracing::debug!(
            file_name,
            kind = ?kind,
            chars = text.chars().count(),
            "Extracted document text"
        );

        Ok(ExtractedDocument {
            text,
            kind,
            extension,
        })
    }
}
