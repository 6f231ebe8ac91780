//! Route tree assembly.

pub mod admin;
pub mod auth;
pub mod blog;
pub mod geo;
pub mod health;
pub mod leads;
pub mod messages;
pub mod notifications;
pub mod quotes;
pub mod reviews;
pub mod vendors;

use axum::routing::get;
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/register, /auth/login, /auth/me
///
/// /leads                          lead intake (public, optional auth)
///
/// /vendors                        public listing; vendor registration
/// /vendors/me                     the owner's own vendor
/// /vendors/{slug}                 public profile with badges
///
/// /quotes                         create (vendor), list (mine)
/// /quotes/{id}                    detail, participants only
/// /quotes/{id}/status             viewed | accepted | rejected (customer)
/// /quotes/{id}/counter-offer      customer price proposal
/// /quotes/{id}/revise             vendor revision of a countered quote
/// /quotes/{id}/history            append-only action history
///
/// /messages                       thread fetch, send
/// /messages/read                  mark counterpart messages read
/// /messages/unread                caller's unread total
/// /conversations                  inbox with previews and unread counts
///
/// /reviews                        public listing, create (customer)
/// /reviews/{id}/vote              cast / withdraw helpfulness vote
/// /reviews/{id}/reply             vendor reply, post / delete
///
/// /notifications                  in-app feed, mark read, unread count
/// /notification-preferences       per-category email opt-outs
/// /unsubscribe                    signed-token unsubscribe (public)
///
/// /cities, /districts             public geo lookups
///
/// /blog, /blog/{slug}             published content
///
/// /admin/...                      back office (capability-gated)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/leads", leads::router())
        .nest("/vendors", vendors::router())
        .nest("/quotes", quotes::router())
        .merge(messages::router())
        .nest("/reviews", reviews::router())
        .merge(notifications::router())
        .merge(geo::router())
        .nest("/blog", blog::router())
        .route("/unsubscribe", get(handlers::unsubscribe::unsubscribe))
        .nest("/admin", admin::router())
}
