//! Entity models and DTOs.
//!
//! One module per table family. Row structs derive `FromRow` and
//! `Serialize`; create/update DTOs derive `Deserialize`.

pub mod activity_log;
pub mod blog_post;
pub mod email_log;
pub mod geo;
pub mod lead;
pub mod message;
pub mod notification;
pub mod profile;
pub mod quote;
pub mod review;
pub mod vendor;
pub mod vendor_lead;
