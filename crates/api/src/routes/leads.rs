//! Route definitions for lead intake.

use axum::routing::post;
use axum::Router;

use crate::handlers::leads;
use crate::state::AppState;

/// Lead routes, nested under `/leads`.
///
/// ```text
/// POST /    submit_lead (public, optional auth)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", post(leads::submit_lead))
}
