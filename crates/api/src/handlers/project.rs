//! Handlers for the `/projects` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use verso_core::error::CoreError;
use verso_store::models::project::{CreateProject, Project, UpdateProject};
use verso_store::repositories::ProjectRepo;

use crate::error::{AppError, AppResult};
use crate::extract::AppJson;
use crate::handlers::parse_id;
use crate::response::MessageResponse;
use crate::state::AppState;

/// POST /api/projects
pub async fn create(
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateProject>,
) -> AppResult<(StatusCode, Json<Project>)> {
    let project = ProjectRepo::create(&state.store, &state.artifacts, &input).await?;
    Ok((StatusCode::CREATED, Json(project)))
}

/// GET /api/projects
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<Project>>> {
    let projects = ProjectRepo::list(&state.store).await?;
    Ok(Json(projects))
}

/// GET /api/projects/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Project>> {
    let id = parse_id("Project", &id)?;
    let project = ProjectRepo::find_by_id(&state.store, id)
        .await?
        .ok_or(AppError::Core(CoreError::not_found("Project", id)))?;
    Ok(Json(project))
}

/// PUT /api/projects/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    AppJson(input): AppJson<UpdateProject>,
) -> AppResult<Json<Project>> {
    let id = parse_id("Project", &id)?;
    let project = ProjectRepo::update(&state.store, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::not_found("Project", id)))?;
    Ok(Json(project))
}

/// DELETE /api/projects/{id}
///
/// Removes the project together with its files and upload directory.
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<MessageResponse>> {
    let id = parse_id("Project", &id)?;
    if ProjectRepo::delete(&state.store, &state.artifacts, id).await? {
        Ok(Json(MessageResponse::new("Project deleted successfully")))
    } else {
        Err(AppError::Core(CoreError::not_found("Project", id)))
    }
}
