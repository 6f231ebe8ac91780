//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod activity_log_repo;
pub mod blog_repo;
pub mod email_log_repo;
pub mod geo_repo;
pub mod lead_repo;
pub mod message_repo;
pub mod notification_preference_repo;
pub mod notification_repo;
pub mod profile_repo;
pub mod quote_repo;
pub mod review_repo;
pub mod vendor_lead_repo;
pub mod vendor_repo;

pub use activity_log_repo::ActivityLogRepo;
pub use blog_repo::BlogRepo;
pub use email_log_repo::EmailLogRepo;
pub use geo_repo::GeoRepo;
pub use lead_repo::LeadRepo;
pub use message_repo::MessageRepo;
pub use notification_preference_repo::NotificationPreferenceRepo;
pub use notification_repo::NotificationRepo;
pub use profile_repo::ProfileRepo;
pub use quote_repo::QuoteRepo;
pub use review_repo::ReviewRepo;
pub use vendor_lead_repo::VendorLeadRepo;
pub use vendor_repo::VendorRepo;
