//! JSON error responses
//!
//! Every failure leaves the server as `{"error": "<message>"}` with a status
//! chosen by the variant.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use eco_assistant_agent::AgentError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// 400: missing input, unsupported upload, unreadable document
    BadRequest(String),
    /// 413: upload above the body limit
    PayloadTooLarge(String),
    /// 500: a collaborator call failed
    Internal(String),
    /// 503: every image candidate was unreachable
    ServiceUnavailable(String),
}

impl ApiError {
    /// Upstream failure worded as `"<operation> failed: <cause>"`
    pub fn upstream(operation: &str, cause: impl std::fmt::Display) -> Self {
        ApiError::Internal(format!("{} failed: {}", operation, cause))
    }

    /// Map an agent error raised while performing `operation`
    pub fn from_agent(operation: &str, err: AgentError) -> Self {
        match err {
            AgentError::InvalidInput(msg) | AgentError::Extraction(msg) => ApiError::BadRequest(msg),
            AgentError::Llm(msg) | AgentError::Pipeline(msg) => ApiError::upstream(operation, msg),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            ApiError::BadRequest(msg)
            | ApiError::PayloadTooLarge(msg)
            | ApiError::Internal(msg)
            | ApiError::ServiceUnavailable(msg) => msg,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), error = %self.message(), "Request failed");
        } else {
            tracing::debug!(status = status.as_u16(), error = %self.message(), "Request rejected");
        }

        (status, Json(serde_json::json!({ "error": self.message() }))).into_response()
    }
}
