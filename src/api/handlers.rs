use std::any::Any;

use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use serde_json::{json, Value};
use tracing::{debug, info, instrument, warn};

use crate::{
    error::{ApiError, ApiResult},
    state::AppState,
    types::{GenerationPayload, GenerationResponse, VideoMetadata},
    utils::{duration_label, is_truthy, iso_timestamp, truncate_prompt},
};

pub const RESOLUTION: &str = "1920x1080";
pub const FORMAT: &str = "MP4";

#[instrument]
pub async fn health_check() -> (StatusCode, Json<Value>) {
    let response = json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    });
    (StatusCode::OK, Json(response))
}

/// Reads `{prompt, duration}` from the body whatever its content type.
///
/// Unparsable JSON and a `null` body are processing failures; any other
/// non-object body simply has no fields.
#[instrument(skip(state, body), fields(body_len = body.len()))]
pub async fn generate_video(
    State(state): State<AppState>,
    body: Bytes,
) -> ApiResult<Json<GenerationResponse>> {
    let value: Value = serde_json::from_slice(&body)?;
    let payload = GenerationPayload::from_json(value)
        .ok_or_else(|| ApiError::Internal("cannot read fields of a null body".to_string()))?;

    if !is_truthy(&payload.prompt) || !is_truthy(&payload.duration) {
        warn!(
            prompt_present = is_truthy(&payload.prompt),
            duration_present = is_truthy(&payload.duration),
            "Missing required parameters"
        );
        return Err(ApiError::MissingParameters);
    }

    let prompt = payload.prompt.as_str().ok_or_else(|| {
        ApiError::Internal(format!("prompt is not a string: {}", payload.prompt))
    })?;
    let duration = duration_label(&payload.duration);

    let video_url = generate_demo_video(&state);
    debug!(video_url = %video_url, "Resolved demo video");

    let metadata = VideoMetadata {
        duration,
        resolution: RESOLUTION.to_string(),
        format: FORMAT.to_string(),
        timestamp: iso_timestamp(Utc::now()),
        prompt: truncate_prompt(prompt),
    };
    info!(duration = %metadata.duration, prompt_chars = prompt.chars().count(), "Generated video");

    Ok(Json(GenerationResponse::generated(video_url, metadata)))
}

// Placeholder for real synthesis: every prompt gets the configured sample clip.
fn generate_demo_video(state: &AppState) -> String {
    state.demo_video_url().to_string()
}

/// Maps a panic inside a handler to the generic 500 body.
pub fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };
    ApiError::Internal(format!("handler panicked: {detail}")).into_response()
}
