//! Route definitions for the public geographic lookups.

use axum::routing::get;
use axum::Router;

use crate::handlers::geo;
use crate::state::AppState;

/// Public geo routes, merged at the API root. Admin CRUD lives under
/// `/admin`.
///
/// ```text
/// GET /cities                 list_cities
/// GET /districts?city_id=     list_districts
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/cities", get(geo::list_cities))
        .route("/districts", get(geo::list_districts))
}
