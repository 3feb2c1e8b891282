//! API route handlers

use super::error::ApiError;
use super::state::AppState;
use crate::models::{IdentifyResponse, ImageInput};
use crate::Error;
use axum::extract::multipart::MultipartRejection;
use axum::extract::{Multipart, State};
use axum::Json;
use serde_json::{json, Value};
use uuid::Uuid;

/// Multipart field carrying the photo.
pub const IMAGE_FIELD: &str = "image";

/// Identify the plant in an uploaded photo.
///
/// Expects `multipart/form-data` with a file part named `image`. The
/// identifier is only consulted once an image has been read. Reading the
/// body and identifying share one deadline.
#[tracing::instrument(skip_all, fields(request_id = %Uuid::new_v4()))]
pub async fn identify(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<IdentifyResponse>, ApiError> {
    let timeout = state.request_timeout;
    match tokio::time::timeout(timeout, identify_upload(&state, multipart)).await {
        Ok(result) => result,
        Err(_) => Err(ApiError::identification(Error::Timeout(timeout.as_secs()))),
    }
}

async fn identify_upload(
    state: &AppState,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<IdentifyResponse>, ApiError> {
    let image = read_image(multipart?).await?.ok_or_else(|| {
        tracing::warn!("Identification request without an image file");
        ApiError::missing_image()
    })?;

    tracing::info!(
        "Received {} upload ({} bytes)",
        image.mime_type,
        image.bytes.len()
    );

    let plant = state
        .identifier
        .identify(&image)
        .await
        .map_err(ApiError::identification)?;

    Ok(Json(IdentifyResponse { plant }))
}

/// Pulls the first non-empty file part named `image` out of the body.
async fn read_image(mut multipart: Multipart) -> Result<Option<ImageInput>, ApiError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(IMAGE_FIELD) {
            continue;
        }
        if field.file_name().is_none() {
            tracing::warn!("Ignoring `image` field that is not a file part");
            continue;
        }

        let bytes = field.bytes().await?;
        if bytes.is_empty() {
            tracing::warn!("Ignoring empty `image` upload");
            continue;
        }
        return Ok(Some(ImageInput::from_bytes(bytes.to_vec())));
    }

    Ok(None)
}

/// Liveness probe reporting which identifier is active.
pub async fn health(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "identifier": state.identifier.name(),
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// 404 handler
pub async fn not_found() -> ApiError {
    ApiError::not_found()
}
