//! Outbound notification infrastructure.
//!
//! [`EmailDispatcher`] owns the full dispatch pipeline for transactional
//! email: per-recipient category preference check, sliding-window rate
//! limit, template render with a signed unsubscribe link, SMTP send, and
//! an outcome row in `email_logs`. Failures are logged and swallowed --
//! the operation that triggered the email is never failed by it.

pub mod dispatcher;
pub mod email;
pub mod rate_limit;
pub mod templates;

pub use dispatcher::{EmailDispatcher, Recipient};
