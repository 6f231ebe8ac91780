use std::sync::Arc;

use crate::config::ServerConfig;
use crate::notifications::EmailDispatcher;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Constructed exactly once at startup and cheaply cloneable (inner data is
/// behind `Arc` or is already `Clone`), so every request observes the same
/// pool, config, and dispatcher under the multi-threaded runtime.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: sofra_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Preference-gated, rate-limited email dispatch.
    pub mailer: Arc<EmailDispatcher>,
}
