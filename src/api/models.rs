// API request/response models (DTOs)

use actix_web::{http::StatusCode, HttpResponse};
use serde::{Deserialize, Serialize};

pub const JSON_UTF8: &str = "application/json; charset=utf-8";

/// Validated input for a provider update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateRequest {
    pub id: i64,
    /// Trimmed exactly as submitted; never re-serialized from the parsed URL.
    pub youtube_url: String,
}

/// Body of a successful update.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct UpdateSuccess {
    pub ok: bool,
    pub id: i64,
    pub youtube_url: String,
}

impl From<UpdateRequest> for UpdateSuccess {
    fn from(req: UpdateRequest) -> Self {
        Self {
            ok: true,
            id: req.id,
            youtube_url: req.youtube_url,
        }
    }
}

/// Uniform failure envelope.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorEnvelope {
    pub ok: bool,
    pub error: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
}

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub ok: bool,
    pub status: String,
}

/// Serializes `body` with an explicit utf-8 JSON content type.
///
/// serde_json leaves `/` and non-ASCII text unescaped, so URLs and driver
/// messages go out verbatim. The content type set here takes precedence over
/// the builder's plain `application/json`.
pub fn json_response<T: Serialize>(status: StatusCode, body: &T) -> HttpResponse {
    HttpResponse::build(status).content_type(JSON_UTF8).json(body)
}
