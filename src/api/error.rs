// Handler error type and its mapping onto the JSON envelope

use crate::api::models::{json_response, ErrorEnvelope};
use crate::store::StoreError;
use actix_web::{http::StatusCode, HttpResponse, ResponseError};

/// Every way a provider update can end other than success.
#[derive(Debug, thiserror::Error)]
pub enum UpdateError {
    #[error("Required query params: id (int), youtube_url (string)")]
    MissingParameters,
    #[error("youtube_url is not a valid URL: {0}")]
    InvalidUrl(String),
    #[error(transparent)]
    Storage(#[from] StoreError),
    #[error("No row updated. Check id exists.")]
    NotFound { id: i64 },
}

impl UpdateError {
    /// Machine-readable code placed in the envelope's `error` field.
    pub fn code(&self) -> &'static str {
        match self {
            UpdateError::MissingParameters => "missing_parameters",
            UpdateError::InvalidUrl(_) => "invalid_url",
            UpdateError::Storage(StoreError::Connect(_)) => "db_connection_failed",
            UpdateError::Storage(StoreError::Charset(_)) => "db_charset_failed",
            UpdateError::Storage(StoreError::Prepare(_)) => "prepare_failed",
            UpdateError::Storage(StoreError::Execute(_)) => "db_update_failed",
            UpdateError::NotFound { .. } => "not_found",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            UpdateError::MissingParameters | UpdateError::InvalidUrl(_) => StatusCode::BAD_REQUEST,
            UpdateError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            UpdateError::NotFound { .. } => StatusCode::NOT_FOUND,
        }
    }

    pub fn envelope(&self) -> ErrorEnvelope {
        ErrorEnvelope {
            ok: false,
            error: self.code().to_string(),
            message: self.to_string(),
            id: match self {
                UpdateError::NotFound { id } => Some(*id),
                _ => None,
            },
        }
    }
}

impl ResponseError for UpdateError {
    fn status_code(&self) -> StatusCode {
        self.status()
    }

    fn error_response(&self) -> HttpResponse {
        json_response(self.status(), &self.envelope())
    }
}
