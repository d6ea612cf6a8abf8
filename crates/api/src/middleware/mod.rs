//! Authentication and authorization extractors.
//!
//! - [`auth::AuthUser`] -- Extracts the authenticated user from a JWT Bearer token.
//! - [`auth::OptionalUser`] -- Like `AuthUser`, but anonymous requests pass.
//! - [`rbac::RequireStaff`] -- Requires the `staff` role.
//! - [`rbac::RequireAuth`] -- Requires any authenticated user.

pub mod auth;
pub mod rbac;
