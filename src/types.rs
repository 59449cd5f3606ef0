use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Body accepted by `POST /api/generate`.
///
/// Both fields are kept as raw JSON values so that presence can be judged the
/// way the form submits them: an absent field, `null`, `""`, `0` and `false`
/// all count as missing.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct GenerationPayload {
    pub prompt: Value,
    pub duration: Value,
}

impl GenerationPayload {
    /// Picks the two fields out of a parsed body. `None` for a `null` body,
    /// which has no fields to read; other non-object bodies yield empty fields.
    pub fn from_json(body: Value) -> Option<Self> {
        match body {
            Value::Null => None,
            Value::Object(mut fields) => Some(Self {
                prompt: fields.remove("prompt").unwrap_or_default(),
                duration: fields.remove("duration").unwrap_or_default(),
            }),
            _ => Some(Self::default()),
        }
    }
}

/// Request sent by the client view on submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub prompt: String,
    pub duration: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoMetadata {
    pub duration: String,
    pub resolution: String,
    pub format: String,
    pub timestamp: String,
    pub prompt: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<VideoMetadata>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl GenerationResponse {
    pub fn generated(video_url: impl Into<String>, metadata: VideoMetadata) -> Self {
        Self {
            success: true,
            video_url: Some(video_url.into()),
            metadata: Some(metadata),
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            video_url: None,
            metadata: None,
            error: Some(error.into()),
        }
    }
}
