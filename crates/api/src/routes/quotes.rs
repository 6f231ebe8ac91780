//! Route definitions for the quote lifecycle.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::quotes;
use crate::state::AppState;

/// Quote routes, nested under `/quotes`.
///
/// ```text
/// GET  /                      list_quotes (mine, by role)
/// POST /                      create_quote (vendor owner)
/// GET  /{id}                  get_quote (participants)
/// POST /{id}/status           change_status (customer)
/// POST /{id}/counter-offer    counter_offer (customer)
/// POST /{id}/revise           revise_quote (vendor owner)
/// GET  /{id}/history          quote_history (participants)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(quotes::list_quotes).post(quotes::create_quote))
        .route("/{id}", get(quotes::get_quote))
        .route("/{id}/status", post(quotes::change_status))
        .route("/{id}/counter-offer", post(quotes::counter_offer))
        .route("/{id}/revise", post(quotes::revise_quote))
        .route("/{id}/history", get(quotes::quote_history))
}
