//! Domain-level error type shared by the `db` and `api` crates.

use crate::types::DbId;

/// Errors produced by domain logic and surfaced through the API layer.
///
/// The API crate maps each variant onto an HTTP status and a stable
/// `UPPER_SNAKE` error code; see `sofra-api`'s `AppError`.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// A referenced entity does not exist.
    #[error("{entity} with id {id} not found")]
    NotFound { entity: &'static str, id: DbId },

    /// Input failed validation before any write was attempted.
    #[error("{0}")]
    Validation(String),

    /// The request conflicts with current state (duplicate row, rejected
    /// status transition, stale optimistic check).
    #[error("{0}")]
    Conflict(String),

    /// The caller is not authenticated.
    #[error("{0}")]
    Unauthorized(String),

    /// The caller is authenticated but lacks the required capability.
    #[error("{0}")]
    Forbidden(String),

    /// An unexpected internal failure. Never shown verbatim to callers.
    #[error("{0}")]
    Internal(String),
}
