use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::error::Category;

use crate::types::GenerationResponse;

pub const MISSING_PARAMETERS: &str = "Missing required parameters";
pub const GENERATION_FAILED: &str = "Failed to generate video";

/// Errors returned by the generation endpoint.
///
/// Only the two public messages ever reach the client; the detail carried by
/// [`ApiError::Internal`] is logged and dropped.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Missing required parameters")]
    MissingParameters,

    #[error("Failed to generate video: {0}")]
    Internal(String),
}

pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::MissingParameters => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn public_message(&self) -> &'static str {
        match self {
            ApiError::MissingParameters => MISSING_PARAMETERS,
            ApiError::Internal(_) => GENERATION_FAILED,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Internal(detail) = &self {
            tracing::error!(error = %detail, "Error generating video");
        }
        let body = GenerationResponse::failed(self.public_message());
        (self.status(), Json(body)).into_response()
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        let kind = match e.classify() {
            Category::Syntax => "JSON syntax error",
            Category::Eof => "unexpected end of JSON body",
            Category::Data => "JSON data structure mismatch",
            Category::Io => "failed to read JSON body",
        };
        ApiError::Internal(format!("{kind}: {e}"))
    }
}
