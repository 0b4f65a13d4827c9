//! Project and file lifecycle operations.
//!
//! Repositories are stateless; every call takes the stores it needs.
//! Mutations run inside a single [`DocumentStore`](crate::DocumentStore)
//! read-modify-write cycle and recompute completion rates before persisting.

pub mod file_repo;
pub mod legacy_file_repo;
pub mod project_repo;

pub use file_repo::FileRepo;
pub use legacy_file_repo::LegacyFileRepo;
pub use project_repo::ProjectRepo;
