//! Well-known role name constants carried in access tokens.

/// Course staff: may manage assets and always sees the about page.
pub const ROLE_STAFF: &str = "staff";

/// Regular learner.
pub const ROLE_STUDENT: &str = "student";
