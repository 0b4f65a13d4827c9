pub mod health;
pub mod legacy;
pub mod project;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /projects                                        list, create
/// /projects/{id}                                   get, update, delete
/// /projects/{project_id}/files                     list, upload (multipart)
/// /projects/{project_id}/files/{id}                get, update translation, delete
/// /projects/{project_id}/files/{id}/download       download translation
///
/// /files                                           list, upload (deprecated flat view)
/// /files/{id}                                      get, update translation, delete
/// /files/{id}/download                             download translation
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/projects", project::router())
        .nest("/files", legacy::router())
}
