use std::path::PathBuf;

use verso_core::error::CoreError;

/// Errors raised by the document store, the artifact store and the
/// repositories built on them.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A domain-level error (not found, validation, incomplete translation).
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed document {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl StoreError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        StoreError::Io {
            path: path.into(),
            source,
        }
    }
}
