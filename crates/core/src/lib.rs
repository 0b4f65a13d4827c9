//! Domain logic for the verso translation service.
//!
//! Everything in this crate is pure: segment parsing, completion math,
//! download naming and rendering, and input validation. Persistence lives in
//! `verso_store`, HTTP in `verso_api`.

pub mod completion;
pub mod download;
pub mod error;
pub mod naming;
pub mod segments;
pub mod types;
pub mod validation;
