//! Handlers for the deprecated flat `/files` resource.
//!
//! Files are addressed by id alone; uploads land in the default project.

use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use verso_store::models::file::{CompletionUpdate, UpdateTranslation};
use verso_store::models::legacy::{LegacyFile, LegacyUpload};
use verso_store::repositories::LegacyFileRepo;

use crate::error::AppResult;
use crate::extract::AppJson;
use crate::handlers::{attachment, parse_id, read_upload};
use crate::response::MessageResponse;
use crate::state::AppState;

/// GET /api/files
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<LegacyFile>>> {
    let files = LegacyFileRepo::list(&state.store).await?;
    Ok(Json(files))
}

/// POST /api/files
pub async fn upload(
    State(state): State<AppState>,
    multipart: Multipart,
) -> AppResult<(StatusCode, Json<LegacyUpload>)> {
    let upload = read_upload(multipart).await?;
    let created = LegacyFileRepo::upload(&state.store, &state.artifacts, &upload).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// GET /api/files/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<LegacyFile>> {
    let id = parse_id("File", &id)?;
    let file = LegacyFileRepo::find(&state.store, id).await?;
    Ok(Json(file))
}

/// PUT /api/files/{id}
pub async fn update_translation(
    State(state): State<AppState>,
    Path(id): Path<String>,
    AppJson(input): AppJson<UpdateTranslation>,
) -> AppResult<Json<CompletionUpdate>> {
    let id = parse_id("File", &id)?;
    let segments = input.into_segments()?;
    let update = LegacyFileRepo::update_translation(&state.store, id, segments).await?;
    Ok(Json(update))
}

/// DELETE /api/files/{id}
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<MessageResponse>> {
    let id = parse_id("File", &id)?;
    LegacyFileRepo::delete(&state.store, &state.artifacts, id).await?;
    Ok(Json(MessageResponse::new("File deleted successfully")))
}

/// GET /api/files/{id}/download
pub async fn download(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let id = parse_id("File", &id)?;
    let rendered = LegacyFileRepo::download(&state.store, id).await?;
    Ok(attachment(rendered))
}
