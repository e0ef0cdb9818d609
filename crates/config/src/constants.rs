//! Centralized constants for the gateway
//!
//! Single source of truth for default values. Settings fall back to these
//! when a key is absent from every configuration layer.

/// External service endpoints
pub mod endpoints {
    /// Groq's OpenAI-compatible API root
    pub const GROQ_DEFAULT: &str = "https://api.groq.com/openai/v1";

    /// Unauthenticated Google Translate TTS endpoint
    pub const TRANSLATE_TTS_DEFAULT: &str = "https://translate.google.com/translate_tts";

    /// Keyword image search
    pub const UNSPLASH_SOURCE: &str = "https://source.unsplash.com/1024x768/";

    /// Random stock image
    pub const PICSUM: &str = "https://picsum.photos/1024/768";

    /// Static placeholder, always last in the candidate list
    pub const PLACEHOLDER: &str =
        "https://via.placeholder.com/1024x768/667eea/FFFFFF?text=Generated+Visualization";
}

/// Timeouts (in milliseconds unless noted)
pub mod timeouts {
    /// Completion request timeout (ms)
    pub const LLM_REQUEST_MS: u64 = 60_000;

    /// Speech synthesis join budget (ms)
    pub const TTS_BUDGET_MS: u64 = 5_000;

    /// Transcription request timeout (ms)
    pub const STT_TIMEOUT_MS: u64 = 30_000;

    /// Image candidate probe timeout (ms)
    pub const IMAGE_PROBE_MS: u64 = 10_000;
}

/// Speech synthesis thresholds (characters)
pub mod speech {
    /// Raw reply must be shorter than this for speech to be attempted
    pub const MAX_RAW_CHARS: usize = 500;

    /// Tag-stripped text longer than this is never sent
    pub const MAX_CLEAN_CHARS: usize = 1_000;

    /// Text is truncated to this before synthesis
    pub const TRUNCATE_CHARS: usize = 800;

    pub const DEFAULT_LANGUAGE: &str = "en";
}

/// Document ingestion limits
pub mod documents {
    /// Characters of extracted text placed in the analysis prompt
    pub const ANALYSIS_CHAR_LIMIT: usize = 4_000;

    /// Characters of extracted text echoed back to the client
    pub const PREVIEW_CHAR_LIMIT: usize = 1_500;

    /// Maximum upload size in bytes (50 MB)
    pub const MAX_UPLOAD_BYTES: usize = 50 * 1024 * 1024;

    pub const ALLOWED_EXTENSIONS: [&str; 5] = ["txt", "pdf", "docx", "doc", "rtf"];
}

/// Transcription defaults
pub mod transcription {
    pub const MODEL: &str = "whisper-large-v3-turbo";
    pub const LANGUAGE: &str = "en";
}

/// Model profile defaults
pub mod models {
    pub const BASIC: &str = "llama-3.1-8b-instant";
    pub const RESEARCH: &str = "llama-3.3-70b-versatile";
    pub const CREATIVE: &str = "mixtral-8x7b-32768";
    pub const TECHNICAL: &str = "llama-3.3-70b-versatile";
}
