//! Route definitions for in-app notifications and email preferences.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::notifications;
use crate::state::AppState;

/// Notification routes, merged at the API root.
///
/// ```text
/// GET /notifications               list_notifications
/// POST /notifications/read         mark_all_read
/// GET /notifications/unread        unread_count
/// GET /notification-preferences    list_preferences
/// PUT /notification-preferences    update_preference
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/notifications", get(notifications::list_notifications))
        .route("/notifications/read", post(notifications::mark_all_read))
        .route("/notifications/unread", get(notifications::unread_count))
        .route(
            "/notification-preferences",
            get(notifications::list_preferences).put(notifications::update_preference),
        )
}
