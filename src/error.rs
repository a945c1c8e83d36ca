use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

/// Main application error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    SsmlUnsupportedVoice(String),

    #[error("{0}")]
    Upstream(String),

    #[error("Server configuration error: {0}")]
    Configuration(String),
}

/// Machine-readable error tag, so clients can branch without matching on text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Validation,
    SsmlUnsupportedVoice,
    Upstream,
    Configuration,
}

/// Error response structure
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub kind: ErrorKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

impl AppError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::SsmlUnsupportedVoice(_) => StatusCode::BAD_REQUEST,
            Self::Upstream(_) | Self::Configuration(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) => ErrorKind::Validation,
            Self::SsmlUnsupportedVoice(_) => ErrorKind::SsmlUnsupportedVoice,
            Self::Upstream(_) => ErrorKind::Upstream,
            Self::Configuration(_) => ErrorKind::Configuration,
        }
    }

    pub fn to_response(&self, context: Option<&str>) -> ErrorResponse {
        ErrorResponse {
            error: self.to_string(),
            kind: self.kind(),
            context: context.map(str::to_string),
        }
    }

    /// Attach an endpoint-specific hint that is rendered next to the error
    pub fn with_context(self, context: &'static str) -> ContextualError {
        ContextualError {
            error: self,
            context,
        }
    }
}

fn render(error: &AppError, context: Option<&str>) -> Response {
    let status = error.status_code();
    tracing::error!(
        error = %error,
        kind = ?error.kind(),
        status = %status.as_u16(),
        "Request failed"
    );

    (status, Json(error.to_response(context))).into_response()
}

/// Implement IntoResponse for automatic conversion in handlers
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        render(&self, None)
    }
}

/// An `AppError` carrying the handler's context string
#[derive(Debug)]
pub struct ContextualError {
    pub error: AppError,
    pub context: &'static str,
}

impl IntoResponse for ContextualError {
    fn into_response(self) -> Response {
        render(&self.error, Some(self.context))
    }
}

/// Custom result type for the application
pub type AppResult<T> = Result<T, AppError>;
