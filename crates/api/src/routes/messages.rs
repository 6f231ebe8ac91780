//! Route definitions for conversations.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::messages;
use crate::state::AppState;

/// Messaging routes, merged at the API root.
///
/// ```text
/// GET  /messages?vendor_lead_id=   list_messages (participants)
/// POST /messages                   send_message (participants)
/// POST /messages/read              mark_read (participants)
/// GET  /messages/unread            unread_count (caller)
/// GET  /conversations              list_conversations (caller)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/messages",
            get(messages::list_messages).post(messages::send_message),
        )
        .route("/messages/read", post(messages::mark_read))
        .route("/messages/unread", get(messages::unread_count))
        .route("/conversations", get(messages::list_conversations))
}
