//! Persistence for the verso translation service.
//!
//! All state lives in one JSON [`Document`](document::Document) owned by a
//! [`DocumentStore`]; uploaded originals live on disk under an
//! [`ArtifactStore`]. The repositories in [`repositories`] implement the
//! project and file lifecycle on top of both.

pub mod artifacts;
pub mod document;
pub mod error;
pub mod models;
pub mod repositories;

pub use artifacts::ArtifactStore;
pub use document::DocumentStore;
pub use error::StoreError;

/// Verify the document can still be read and parsed.
pub async fn health_check(store: &DocumentStore) -> Result<(), StoreError> {
    store.read().await.map(|_| ())
}
