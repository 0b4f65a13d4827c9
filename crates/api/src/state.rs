use std::sync::Arc;

use verso_store::{ArtifactStore, DocumentStore};

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// The JSON document holding every project and file record.
    pub store: Arc<DocumentStore>,
    /// On-disk storage for uploaded originals.
    pub artifacts: Arc<ArtifactStore>,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
}

impl AppState {
    /// Open both stores under `config.data_dir`.
    ///
    /// The document is created empty if it does not exist yet.
    pub async fn open(config: ServerConfig) -> Result<Self, verso_store::StoreError> {
        let store = DocumentStore::open(config.document_path()).await?;
        let artifacts = ArtifactStore::open(config.projects_dir()).await?;
        Ok(Self {
            store: Arc::new(store),
            artifacts: Arc::new(artifacts),
            config: Arc::new(config),
        })
    }
}
