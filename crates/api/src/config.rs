use crate::auth::jwt::JwtConfig;

/// Default unsubscribe token lifetime in days.
const DEFAULT_UNSUBSCRIBE_TTL_DAYS: i64 = 30;

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
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
    /// Public base URL used in sitemap entries and unsubscribe links.
    pub public_base_url: String,
    /// Secret for signing unsubscribe tokens. Falls back to `JWT_SECRET`.
    pub unsubscribe_secret: String,
    /// Unsubscribe token lifetime in days (default: `30`).
    pub unsubscribe_token_ttl_days: i64,
    /// Max transactional emails per recipient per hour (default: `10`).
    pub email_rate_limit_per_hour: usize,
    /// JWT token configuration (secret, expiry duration).
    pub jwt: JwtConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                      | Default                  |
    /// |------------------------------|--------------------------|
    /// | `HOST`                       | `0.0.0.0`                |
    /// | `PORT`                       | `3000`                   |
    /// | `CORS_ORIGINS`               | `http://localhost:5173`  |
    /// | `REQUEST_TIMEOUT_SECS`       | `30`                     |
    /// | `PUBLIC_BASE_URL`            | `http://localhost:3000`  |
    /// | `UNSUBSCRIBE_SECRET`         | value of `JWT_SECRET`    |
    /// | `UNSUBSCRIBE_TOKEN_TTL_DAYS` | `30`                     |
    /// | `EMAIL_RATE_LIMIT_PER_HOUR`  | `10`                     |
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

        let public_base_url = std::env::var("PUBLIC_BASE_URL")
            .unwrap_or_else(|_| "http://localhost:3000".into());

        let jwt = JwtConfig::from_env();

        let unsubscribe_secret =
            std::env::var("UNSUBSCRIBE_SECRET").unwrap_or_else(|_| jwt.secret.clone());

        let unsubscribe_token_ttl_days: i64 = std::env::var("UNSUBSCRIBE_TOKEN_TTL_DAYS")
            .unwrap_or_else(|_| DEFAULT_UNSUBSCRIBE_TTL_DAYS.to_string())
            .parse()
            .expect("UNSUBSCRIBE_TOKEN_TTL_DAYS must be a valid i64");

        let email_rate_limit_per_hour: usize = std::env::var("EMAIL_RATE_LIMIT_PER_HOUR")
            .unwrap_or_else(|_| "10".into())
            .parse()
            .expect("EMAIL_RATE_LIMIT_PER_HOUR must be a valid usize");

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            public_base_url,
            unsubscribe_secret,
            unsubscribe_token_ttl_days,
            email_rate_limit_per_hour,
            jwt,
        }
    }
}
