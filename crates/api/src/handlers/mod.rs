//! Request handlers.
//!
//! Each submodule provides async handler functions for one resource.
//! Handlers delegate to the corresponding repository in `verso_store` and
//! map errors via [`AppError`].

pub mod file;
pub mod legacy;
pub mod project;

use axum::extract::Multipart;
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use axum::http::{HeaderName, StatusCode};
use verso_core::download::RenderedTranslation;
use verso_core::error::CoreError;
use verso_core::naming::content_disposition;
use verso_core::types::EntityId;
use verso_store::models::file::NewUpload;

use crate::error::{AppError, AppResult};

/// Name of the multipart field that carries the uploaded file.
pub const UPLOAD_FIELD: &str = "file";

/// Parse a path id. Ids that are not UUIDs cannot exist, so they are
/// reported as not found rather than as a bad request.
pub(crate) fn parse_id(entity: &'static str, raw: &str) -> AppResult<EntityId> {
    raw.parse::<EntityId>()
        .map_err(|_| AppError::Core(CoreError::not_found(entity, raw)))
}

/// Buffer the `file` field of a multipart upload. Other fields are ignored.
pub(crate) async fn read_upload(mut multipart: Multipart) -> AppResult<NewUpload> {
    let mut upload: Option<NewUpload> = None;

    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }
        let file_name = field.file_name().unwrap_or_default().to_string();
        let content = field.bytes().await?;
        upload = Some(NewUpload {
            file_name,
            content: content.to_vec(),
        });
    }

    upload.ok_or_else(|| AppError::BadRequest("No file uploaded".into()))
}

/// Response parts for a rendered translation sent as a text attachment.
pub(crate) fn attachment(
    rendered: RenderedTranslation,
) -> (StatusCode, [(HeaderName, String); 2], String) {
    (
        StatusCode::OK,
        [
            (CONTENT_TYPE, "text/plain; charset=utf-8".to_string()),
            (CONTENT_DISPOSITION, content_disposition(&rendered.file_name)),
        ],
        rendered.body,
    )
}
