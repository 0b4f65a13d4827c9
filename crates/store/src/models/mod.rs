//! Persisted records and request DTOs.
//!
//! Field names serialize in camelCase to stay compatible with documents
//! written by earlier deployments.

pub mod file;
pub mod legacy;
pub mod project;
