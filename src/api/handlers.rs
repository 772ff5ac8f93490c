// HTTP request handlers for API endpoints

use crate::api::error::UpdateError;
use crate::api::models::{json_response, HealthResponse, UpdateSuccess};
use crate::api::params::UpdateParams;
use crate::store::MediaStore;
use actix_web::{http::StatusCode, web, HttpRequest, HttpResponse};

/// Health check endpoint. Never touches storage.
pub async fn health_check() -> HttpResponse {
    json_response(
        StatusCode::OK,
        &HealthResponse {
            ok: true,
            status: "healthy".to_string(),
        },
    )
}

/// Point a media row's `provider` at a new URL.
///
/// Accepts any method; `id` and `youtube_url` are read from the query string.
/// Every failure is returned as `UpdateError`, which renders the envelope.
pub async fn update_provider(
    req: HttpRequest,
    store: web::Data<dyn MediaStore>,
) -> Result<HttpResponse, UpdateError> {
    let update = UpdateParams::from_query(req.query_string())
        .validate()
        .inspect_err(|e| {
            tracing::debug!(method = %req.method(), code = e.code(), reason = %e, "rejected update input");
        })?;

    let affected = store
        .update_provider(update.id, &update.youtube_url)
        .await
        .map_err(|e| {
            let err = UpdateError::from(e);
            tracing::warn!(id = update.id, code = err.code(), error = %err, "provider update failed");
            err
        })?;

    if affected == 0 {
        tracing::warn!(id = update.id, "provider update matched no rows");
        return Err(UpdateError::NotFound { id: update.id });
    }

    tracing::info!(
        id = update.id,
        affected,
        youtube_url = %update.youtube_url,
        "provider updated"
    );
    Ok(json_response(StatusCode::OK, &UpdateSuccess::from(update)))
}
