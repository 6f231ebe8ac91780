//! Route definitions for vendors.

use axum::routing::get;
use axum::Router;

use crate::handlers::vendors;
use crate::state::AppState;

/// Vendor routes, nested under `/vendors`.
///
/// `/me` is registered before `/{slug}` so the literal segment wins.
///
/// ```text
/// GET  /         list_vendors (public)
/// POST /         create_vendor (vendor owner)
/// GET  /me       my_vendor (vendor owner)
/// GET  /{slug}   get_vendor (public)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(vendors::list_vendors).post(vendors::create_vendor))
        .route("/me", get(vendors::my_vendor))
        .route("/{slug}", get(vendors::get_vendor))
}
