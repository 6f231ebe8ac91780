//! Domain logic for the Sofra catering marketplace.
//!
//! Everything in this crate is pure: status state machines with checked
//! transition tables, the role/capability policy table, field validation,
//! and signed unsubscribe tokens. No I/O and no async -- the `db` and `api`
//! crates build on top of these types.

pub mod capabilities;
pub mod email;
pub mod error;
pub mod lead;
pub mod message;
pub mod quote;
pub mod review;
pub mod roles;
pub mod types;
pub mod unsubscribe;
pub mod vendor;
pub mod vendor_lead;
