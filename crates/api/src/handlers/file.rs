//! Handlers for files nested under `/projects/{project_id}/files`.

use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use verso_store::models::file::{CompletionUpdate, ProjectFile, UpdateTranslation};
use verso_store::repositories::FileRepo;

use crate::error::AppResult;
use crate::extract::AppJson;
use crate::handlers::{attachment, parse_id, read_upload};
use crate::response::MessageResponse;
use crate::state::AppState;

/// GET /api/projects/{project_id}/files
pub async fn list_by_project(
    State(state): State<AppState>,
    Path(project_id): Path<String>,
) -> AppResult<Json<Vec<ProjectFile>>> {
    let project_id = parse_id("Project", &project_id)?;
    let files = FileRepo::list_by_project(&state.store, project_id).await?;
    Ok(Json(files))
}

/// POST /api/projects/{project_id}/files
///
/// Accepts a multipart form with a required `file` field. The text is split
/// into segments and attached to the project with empty translations.
pub async fn upload(
    State(state): State<AppState>,
    Path(project_id): Path<String>,
    multipart: Multipart,
) -> AppResult<(StatusCode, Json<ProjectFile>)> {
    let project_id = parse_id("Project", &project_id)?;
    let upload = read_upload(multipart).await?;
    let file = FileRepo::upload(&state.store, &state.artifacts, project_id, &upload).await?;
    Ok((StatusCode::CREATED, Json(file)))
}

/// GET /api/projects/{project_id}/files/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path((project_id, id)): Path<(String, String)>,
) -> AppResult<Json<ProjectFile>> {
    let project_id = parse_id("Project", &project_id)?;
    let id = parse_id("File", &id)?;
    let file = FileRepo::find(&state.store, project_id, id).await?;
    Ok(Json(file))
}

/// PUT /api/projects/{project_id}/files/{id}
///
/// Replaces the whole translation array and returns the recomputed rates.
pub async fn update_translation(
    State(state): State<AppState>,
    Path((project_id, id)): Path<(String, String)>,
    AppJson(input): AppJson<UpdateTranslation>,
) -> AppResult<Json<CompletionUpdate>> {
    let project_id = parse_id("Project", &project_id)?;
    let id = parse_id("File", &id)?;
    let segments = input.into_segments()?;
    let update = FileRepo::update_translation(&state.store, project_id, id, segments).await?;
    Ok(Json(update))
}

/// DELETE /api/projects/{project_id}/files/{id}
pub async fn delete(
    State(state): State<AppState>,
    Path((project_id, id)): Path<(String, String)>,
) -> AppResult<Json<MessageResponse>> {
    let project_id = parse_id("Project", &project_id)?;
    let id = parse_id("File", &id)?;
    FileRepo::delete(&state.store, &state.artifacts, project_id, id).await?;
    Ok(Json(MessageResponse::new("File deleted successfully")))
}

/// GET /api/projects/{project_id}/files/{id}/download
///
/// Fails with 400 until every segment has a translation.
pub async fn download(
    State(state): State<AppState>,
    Path((project_id, id)): Path<(String, String)>,
) -> AppResult<impl IntoResponse> {
    let project_id = parse_id("Project", &project_id)?;
    let id = parse_id("File", &id)?;
    let rendered = FileRepo::download(&state.store, project_id, id).await?;
    Ok(attachment(rendered))
}
