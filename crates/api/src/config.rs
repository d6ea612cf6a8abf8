use courseware_core::assets::listing::DEFAULT_PAGE_SIZE;
use courseware_core::course::gate::FeatureFlags;

use crate::auth::jwt::JwtConfig;

/// Bytes per megabyte for `MAX_ASSET_UPLOAD_FILE_SIZE_IN_MB`.
const BYTES_PER_MB: u64 = 1000 * 1000;

/// Server configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development except the JWT
/// secret.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Graceful shutdown timeout in seconds (default: `30`).
    pub shutdown_timeout_secs: u64,
    /// PostgreSQL URL. In-memory stores are used when unset.
    pub database_url: Option<String>,
    /// Prefix for asset `external_url`s (default: empty).
    pub lms_base: String,
    /// Largest accepted asset upload in bytes.
    pub max_upload_bytes: u64,
    /// Asset listing page size when the client does not send one.
    pub asset_page_size: i64,
    pub features: FeatureFlags,
    /// JWT token configuration.
    pub jwt: JwtConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                             | Default                 |
    /// |-------------------------------------|-------------------------|
    /// | `HOST`                              | `0.0.0.0`               |
    /// | `PORT`                              | `3000`                  |
    /// | `CORS_ORIGINS`                      | `http://localhost:5173` |
    /// | `REQUEST_TIMEOUT_SECS`              | `30`                    |
    /// | `SHUTDOWN_TIMEOUT_SECS`             | `30`                    |
    /// | `DATABASE_URL`                      | unset                   |
    /// | `LMS_BASE`                          | empty                   |
    /// | `MAX_ASSET_UPLOAD_FILE_SIZE_IN_MB`  | `10`                    |
    /// | `ASSET_PAGE_SIZE`                   | `50`                    |
    /// | `ENABLE_MKTG_SITE`                  | `false`                 |
    /// | `ENABLE_PAID_COURSE_REGISTRATION`   | `false`                 |
    /// | `ENABLE_SHOPPING_CART`              | `false`                 |
    /// | `ENABLE_PREREQUISITE_COURSES`       | `false`                 |
    /// | `RESTRICT_ENROLL_BY_REG_METHOD`     | `false`                 |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let shutdown_timeout_secs: u64 = std::env::var("SHUTDOWN_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("SHUTDOWN_TIMEOUT_SECS must be a valid u64");

        let database_url = std::env::var("DATABASE_URL")
            .ok()
            .filter(|url| !url.is_empty());

        let lms_base = std::env::var("LMS_BASE").unwrap_or_default();

        let max_upload_mb: u64 = std::env::var("MAX_ASSET_UPLOAD_FILE_SIZE_IN_MB")
            .unwrap_or_else(|_| "10".into())
            .parse()
            .expect("MAX_ASSET_UPLOAD_FILE_SIZE_IN_MB must be a valid u64");

        let asset_page_size: i64 = std::env::var("ASSET_PAGE_SIZE")
            .unwrap_or_else(|_| DEFAULT_PAGE_SIZE.to_string())
            .parse()
            .expect("ASSET_PAGE_SIZE must be a valid i64");

        let features = FeatureFlags {
            marketing_site: env_flag("ENABLE_MKTG_SITE"),
            paid_course_registration: env_flag("ENABLE_PAID_COURSE_REGISTRATION"),
            shopping_cart: env_flag("ENABLE_SHOPPING_CART"),
            prerequisite_courses: env_flag("ENABLE_PREREQUISITE_COURSES"),
            restrict_enroll_by_reg_method: env_flag("RESTRICT_ENROLL_BY_REG_METHOD"),
        };

        let jwt = JwtConfig::from_env();

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            shutdown_timeout_secs,
            database_url,
            lms_base,
            max_upload_bytes: upload_limit_bytes(max_upload_mb)
                .expect("MAX_ASSET_UPLOAD_FILE_SIZE_IN_MB is too large"),
            asset_page_size,
            features,
            jwt,
        }
    }
}

/// `true`, `1`, or `yes` (any case) enable a flag; anything else disables it.
fn env_flag(name: &str) -> bool {
    std::env::var(name)
        .map(|v| parse_flag(&v))
        .unwrap_or(false)
}

/// Upload limit in bytes for a size in megabytes, `None` on overflow.
fn upload_limit_bytes(megabytes: u64) -> Option<u64> {
    megabytes.checked_mul(BYTES_PER_MB)
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "true" | "1" | "yes"
    )
}
