//! Route definitions for the deprecated flat `/files` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::legacy;
use crate::state::AppState;

/// Routes mounted at `/files`.
///
/// ```text
/// GET    /                 -> list
/// POST   /                 -> upload
/// GET    /{id}             -> get_by_id
/// PUT    /{id}             -> update_translation
/// DELETE /{id}             -> delete
/// GET    /{id}/download    -> download
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(legacy::list).post(legacy::upload))
        .route(
            "/{id}",
            get(legacy::get_by_id)
                .put(legacy::update_translation)
                .delete(legacy::delete),
        )
        .route("/{id}/download", get(legacy::download))
}
