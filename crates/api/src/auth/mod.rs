//! Token handling for authenticated requests.

pub mod jwt;
