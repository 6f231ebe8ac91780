//! Route definitions for the back office. Every handler here performs its
//! own capability check via `RequireAdmin`.

use axum::routing::{delete, get, post, put};
use axum::Router;

use crate::handlers::{admin, blog, geo};
use crate::state::AppState;

/// Back-office routes, nested under `/admin`.
///
/// ```text
/// GET    /stats                     aggregate counts
/// GET    /users                     list, PUT /users/{id} update
/// GET    /leads                     list, PUT/DELETE /leads/{id}
/// GET    /vendors                   list, PUT /vendors/{id}/status
/// GET    /reviews?status=           moderation queue
/// PUT    /reviews/{id}/moderate     approve / reject
/// DELETE /reviews/{id}              soft delete
/// CRUD   /cities, /districts        geo lookup tables
/// CRUD   /blog                      editorial content
/// GET    /activity                  audit trail
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/stats", get(admin::stats))
        .route("/users", get(admin::list_users))
        .route("/users/{id}", put(admin::update_user))
        .route("/leads", get(admin::list_leads))
        .route(
            "/leads/{id}",
            put(admin::update_lead).delete(admin::delete_lead),
        )
        .route("/vendors", get(admin::list_vendors))
        .route("/vendors/{id}/status", put(admin::update_vendor_status))
        .route("/reviews", get(admin::list_reviews))
        .route("/reviews/{id}/moderate", put(admin::moderate_review))
        .route("/reviews/{id}", delete(admin::delete_review))
        .route("/cities", post(geo::create_city))
        .route(
            "/cities/{id}",
            put(geo::update_city).delete(geo::delete_city),
        )
        .route("/districts", post(geo::create_district))
        .route(
            "/districts/{id}",
            put(geo::update_district).delete(geo::delete_district),
        )
        .route("/blog", get(blog::list_all_posts).post(blog::create_post))
        .route(
            "/blog/{id}",
            put(blog::update_post).delete(blog::delete_post),
        )
        .route("/activity", get(admin::list_activity))
}
