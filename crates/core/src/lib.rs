//! Domain logic for the courseware studio backend.
//!
//! This crate has no web or database dependencies. Storage is reached through
//! the repository traits in [`store`]; the API and database crates provide the
//! HTTP surface and the PostgreSQL implementations.

pub mod assets;
pub mod course;
pub mod error;
pub mod files;
pub mod roles;
pub mod store;
pub mod types;
