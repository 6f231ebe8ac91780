//! HTTP handlers, one module per resource.

pub mod admin;
pub mod auth;
pub mod blog;
pub mod geo;
pub mod leads;
pub mod messages;
pub mod notifications;
pub mod quotes;
pub mod reviews;
pub mod sitemap;
pub mod unsubscribe;
pub mod vendors;
