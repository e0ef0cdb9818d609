//! HTTP Endpoints
//!
//! REST API for the eco assistant.

use std::time::Duration;

use axum::{
    extract::{
        multipart::{Multipart, MultipartError, MultipartRejection},
        rejection::JsonRejection,
        DefaultBodyLimit, Json, State,
    },
    http::{HeaderValue, Method, StatusCode},
    routing::{get, post},
    Router,
};
use eco_assistant_core::{AudioInput, ContentType};
use eco_assistant_text_processing::extract_keywords;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::error::ApiError;
use crate::metrics::metrics_handler;
use crate::state::AppState;

const BANNER: &str = "Advanced Eco AI Assistant - Multi-Modal LLM System";

const FEATURES: [&str; 5] = [
    "basic_mode",
    "research_mode",
    "image_generation",
    "flow_diagrams",
    "pdf_support",
];

/// Create the application router
pub fn create_router(state: AppState) -> Router {
    let server = &state.settings.server;
    let cors_layer = build_cors_layer(&server.cors_origins, server.cors_enabled);
    let body_limit = server.max_upload_bytes;
    let timeout = Duration::from_secs(server.timeout_seconds);

    Router::new()
        .route("/", get(index))
        .route("/health", get(health_check))
        .route("/ready", get(readiness_check))
        .route("/chat", post(chat))
        .route("/upload-file", post(upload_file))
        .route("/transcribe", post(transcribe))
        .route("/generate-image", post(generate_image))
        .route("/metrics", get(metrics_handler))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TimeoutLayer::new(timeout))
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(cors_layer)
        .with_state(state)
}

/// Build CORS layer from configured origins
///
/// - disabled: no cross-origin access
/// - enabled with no origins: any origin
/// - otherwise: the configured origins
fn build_cors_layer(origins: &[String], enabled: bool) -> CorsLayer {
    if !enabled {
        tracing::info!("CORS disabled");
        return CorsLayer::new();
    }

    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any);

    let parsed_origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| {
            origin.parse::<HeaderValue>().ok().or_else(|| {
                tracing::warn!("Invalid CORS origin: {}", origin);
                None
            })
        })
        .collect();

    if parsed_origins.is_empty() {
        if !origins.is_empty() {
            tracing::error!("All configured CORS origins are invalid, allowing any origin");
        }
        return layer.allow_origin(Any);
    }

    tracing::info!("CORS configured with {} origins", parsed_origins.len());
    layer.allow_origin(parsed_origins)
}

async fn index() -> &'static str {
    BANNER
}

async fn health_check(State(state): State<AppState>) -> Json<Value> {
    let models: Vec<&str> = state.catalog.iter().map(|p| p.label.as_str()).collect();
    let timestamp = chrono::Utc::now().timestamp_millis() as f64 / 1000.0;

    Json(serde_json::json!({
        "status": "healthy",
        "models": models,
        "supported_formats": state.documents.extractor().allowed_extensions(),
        "max_file_size": state.settings.max_upload_label(),
        "features": FEATURES,
        "timestamp": timestamp,
    }))
}

/// Readiness: the completion service must answer
async fn readiness_check(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    let ready = state.completion.is_available().await;
    let status_code = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        status_code,
        Json(serde_json::json!({
            "status": if ready { "ready" } else { "not_ready" },
            "checks": {
                "completion": {
                    "provider": state.completion.provider_name(),
                    "status": if ready { "ok" } else { "unreachable" },
                }
            }
        })),
    )
}

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub history: Vec<Value>,
    #[serde(default)]
    pub mode: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub reply_text: String,
    /// Base64 MP3, null when no audio was produced
    pub reply_audio: Option<String>,
    pub image_prompt: Option<String>,
    pub mode_used: String,
    pub model_used: String,
    pub content_type: ContentType,
    pub auto_generate_image: bool,
}

async fn chat(
    State(state): State<AppState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, ApiError> {
    let Json(request) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let mode = eco_assistant_core::Mode::from_request(request.mode.as_deref());
    let message = request.message.unwrap_or_default();

    let reply = state
        .chat
        .handle_turn(&message, &request.history, mode)
        .await
        .map_err(|e| ApiError::from_agent("Chat processing", e))?;

    Ok(Json(ChatResponse {
        reply_text: reply.reply_text,
        reply_audio: reply.reply_audio.map(|audio| audio.to_base64()),
        image_prompt: reply.image_prompt,
        mode_used: reply.mode_used.to_string(),
        model_used: reply.model_used,
        content_type: reply.content_type,
        auto_generate_image: reply.auto_generate_image,
    }))
}

/// One file part pulled out of a multipart body
struct UploadedFile {
    file_name: Option<String>,
    content_type: Option<String>,
    bytes: Vec<u8>,
}

async fn read_file_field(
    multipart: &mut Multipart,
    field_name: &str,
) -> Result<Option<UploadedFile>, ApiError> {
    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() != Some(field_name) {
            continue;
        }
        let file_name = field.file_name().map(str::to_string);
        let content_type = field.content_type().map(str::to_string);
        let bytes = field.bytes().await.map_err(multipart_error)?;
        return Ok(Some(UploadedFile {
            file_name,
            content_type,
            bytes: bytes.to_vec(),
        }));
    }
    Ok(None)
}

fn multipart_error(err: MultipartError) -> ApiError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ApiError::PayloadTooLarge("File too large".to_string())
    } else {
        ApiError::BadRequest(err.body_text())
    }
}

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub filename: String,
    pub file_content: String,
    pub analysis: String,
    pub content_length: usize,
    pub file_type: String,
    pub status: &'static str,
}

async fn upload_file(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadResponse>, ApiError> {
    let no_file = || ApiError::BadRequest("No file uploaded".to_string());
    let mut multipart = multipart.map_err(|_| no_file())?;
    let file = read_file_field(&mut multipart, "file").await?.ok_or_else(no_file)?;

    let file_name = file.file_name.unwrap_or_default();
    let analysis = state
        .documents
        .analyze(&file_name, file.bytes)
        .await
        .map_err(|e| ApiError::from_agent("File processing", e))?;

    Ok(Json(UploadResponse {
        filename: analysis.filename,
        file_content: analysis.file_content,
        analysis: analysis.analysis,
        content_length: analysis.content_length,
        file_type: analysis.file_type,
        status: "success",
    }))
}

#[derive(Debug, Serialize)]
pub struct TranscribeResponse {
    pub transcribed_text: String,
    pub show_transcription: bool,
}

async fn transcribe(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<TranscribeResponse>, ApiError> {
    let no_audio = || ApiError::BadRequest("No audio file provided".to_string());
    let mut multipart = multipart.map_err(|_| no_audio())?;
    let file = read_file_field(&mut multipart, "audio_data")
        .await?
        .filter(|f| !f.bytes.is_empty())
        .ok_or_else(no_audio)?;

    metrics::counter!("eco_assistant_requests_total", "endpoint" => "transcribe").increment(1);

    let mut audio = AudioInput::new(file.bytes, file.file_name.unwrap_or_default());
    if let Some(mime) = file.content_type {
        audio = audio.with_mime_type(mime);
    }

    let text = state.transcriber.transcribe(audio).await.map_err(|e| match e {
        eco_assistant_core::Error::Transcription(msg) => ApiError::upstream("Transcription", msg),
        other => ApiError::upstream("Transcription", other),
    })?;

    let text = text.trim();
    if text.is_empty() {
        return Err(ApiError::BadRequest("No speech detected in audio".to_string()));
    }

    Ok(Json(TranscribeResponse {
        transcribed_text: text.to_string(),
        show_transcription: false,
    }))
}

#[derive(Debug, Deserialize)]
pub struct GenerateImageRequest {
    #[serde(default)]
    pub prompt: Option<String>,
    #[serde(default)]
    pub style: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct GenerateImageResponse {
    pub image_url: String,
    pub keywords: Vec<String>,
    pub style: String,
    pub source: String,
}

async fn generate_image(
    State(state): State<AppState>,
    payload: Result<Json<GenerateImageRequest>, JsonRejection>,
) -> Result<Json<GenerateImageResponse>, ApiError> {
    let Json(request) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let prompt = request
        .prompt
        .filter(|p| !p.trim().is_empty())
        .ok_or_else(|| ApiError::BadRequest("No image prompt provided".to_string()))?;
    let style = request.style.unwrap_or_else(|| "professional".to_string());

    metrics::counter!("eco_assistant_requests_total", "endpoint" => "generate-image").increment(1);

    let keywords = extract_keywords(&prompt);
    tracing::info!(keywords = ?keywords, style = %style, "Looking up image");

    let image = state.images.find_image(&keywords).await.map_err(|e| match e {
        eco_assistant_core::Error::Image(_) => {
            ApiError::ServiceUnavailable("Image generation temporarily unavailable".to_string())
        }
        other => ApiError::upstream("Image generation", other),
    })?;

    Ok(Json(GenerateImageResponse {
        image_url: image.url,
        keywords,
        style,
        source: image.source,
    }))
}
