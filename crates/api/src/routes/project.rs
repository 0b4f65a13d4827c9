//! Route definitions for the `/projects` resource.
//!
//! Also nests the project-scoped file routes under
//! `/projects/{project_id}/files`.

use axum::routing::get;
use axum::Router;

use crate::handlers::{file, project};
use crate::state::AppState;

/// Routes mounted at `/projects`.
///
/// ```text
/// GET    /                                  -> list
/// POST   /                                  -> create
/// GET    /{id}                              -> get_by_id
/// PUT    /{id}                              -> update
/// DELETE /{id}                              -> delete
///
/// GET    /{project_id}/files                -> list_by_project
/// POST   /{project_id}/files                -> upload
/// GET    /{project_id}/files/{id}           -> get_by_id
/// PUT    /{project_id}/files/{id}           -> update_translation
/// DELETE /{project_id}/files/{id}           -> delete
/// GET    /{project_id}/files/{id}/download  -> download
/// ```
pub fn router() -> Router<AppState> {
    let file_routes = Router::new()
        .route("/", get(file::list_by_project).post(file::upload))
        .route(
            "/{id}",
            get(file::get_by_id)
                .put(file::update_translation)
                .delete(file::delete),
        )
        .route("/{id}/download", get(file::download));

    Router::new()
        .route("/", get(project::list).post(project::create))
        .route(
            "/{id}",
            get(project::get_by_id)
                .put(project::update)
                .delete(project::delete),
        )
        .nest("/{project_id}/files", file_routes)
}
