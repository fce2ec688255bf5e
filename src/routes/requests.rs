use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde_json::json;

use crate::error::{self, AppError};
use crate::middleware::auth::AdminKey;
use crate::models::request::{clean_string, CreateRequestBody, NAME_MIN, SONG_MIN};
use crate::object_id;
use crate::state::AppState;

/// POST /requests — public submission.
pub async fn create_request(
    state: State<AppState>,
    body: Result<Json<CreateRequestBody>, JsonRejection>,
) -> Result<(StatusCode, Json<serde_json::Value>), AppError> {
    let Json(body) = body.map_err(|_| AppError::BadRequest("Invalid JSON body.".to_string()))?;

    let name = clean_string(&body.name);
    let song = clean_string(&body.song);

    if name.chars().count() < NAME_MIN {
        return Err(AppError::BadRequest(
            "Name must be at least 2 characters.".to_string(),
        ));
    }
    if song.chars().count() < SONG_MIN {
        return Err(AppError::BadRequest(
            "Song must be at least 2 characters.".to_string(),
        ));
    }

    let created = state.store.create_request(name, song).await?;
    tracing::debug!(id = %created.id, "request created");

    Ok((
        StatusCode::CREATED,
        Json(json!({ "ok": true, "request": created.public_json() })),
    ))
}

/// GET /requests — admin list, newest first, capped at 500.
pub async fn list_requests(
    state: State<AppState>,
    _auth: AdminKey,
) -> Result<Json<serde_json::Value>, AppError> {
    let requests = state.store.list_requests().await?;
    let data: Vec<serde_json::Value> = requests.iter().map(|r| r.public_json()).collect();
    Ok(Json(json!({ "ok": true, "requests": data })))
}

/// DELETE /requests/{id} — admin delete. The id shape is checked before
/// any store access; deleting an absent id is 404, not success.
pub async fn delete_request(
    state: State<AppState>,
    _auth: AdminKey,
    Path(raw_id): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    let id = raw_id.trim();
    if !object_id::is_valid(id) {
        tracing::error!(raw_id, len = id.len(), "delete with invalid id");
        let message = if error::verbose_errors() {
            format!("Invalid request id ({} chars): {id}", id.len())
        } else {
            "Invalid request id.".to_string()
        };
        return Err(AppError::BadRequest(message));
    }

    state.store.delete_request(id).await?;
    Ok(Json(json!({ "ok": true })))
}
