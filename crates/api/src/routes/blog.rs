//! Route definitions for public blog content.

use axum::routing::get;
use axum::Router;

use crate::handlers::blog;
use crate::state::AppState;

/// Blog routes, nested under `/blog`. Admin CRUD lives under `/admin`.
///
/// ```text
/// GET /          list_posts (published)
/// GET /{slug}    get_post (published)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(blog::list_posts))
        .route("/{slug}", get(blog::get_post))
}
