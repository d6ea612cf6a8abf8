//! Row types for the courseware tables.

pub mod asset;
pub mod asset_metadata;
pub mod course;
