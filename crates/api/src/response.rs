//! Shared response envelope types for API handlers.
//!
//! All success responses use the `{ "ok": true, "data": ... }` envelope,
//! mirroring the error envelope produced by `AppError`. Use
//! [`DataResponse::new`] instead of ad-hoc `serde_json::json!` so the shape
//! is enforced at compile time.

use serde::Serialize;

/// Standard `{ "ok": true, "data": T }` response envelope.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub ok: bool,
    pub data: T,
}

impl<T: Serialize> DataResponse<T> {
    /// Wrap a payload in the success envelope.
    pub fn new(data: T) -> Self {
        DataResponse { ok: true, data }
    }
}
