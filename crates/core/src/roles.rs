//! Well-known role name constants.
//!
//! These must match the values stored in `profiles.role` and the seed data
//! in the migrations.

use crate::error::CoreError;

/// Event customer: submits leads, responds to quotes, writes reviews.
pub const ROLE_CUSTOMER: &str = "customer";

/// Owner of a vendor business: receives leads, sends quotes, replies to reviews.
pub const ROLE_VENDOR_OWNER: &str = "vendor_owner";

/// Back-office administrator.
pub const ROLE_ADMIN: &str = "admin";

/// All valid role values.
pub const VALID_ROLES: &[&str] = &[ROLE_CUSTOMER, ROLE_VENDOR_OWNER, ROLE_ADMIN];

/// Validate that a role string is one of the accepted values.
pub fn validate_role(role: &str) -> Result<(), CoreError> {
    if VALID_ROLES.contains(&role) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid role '{role}'. Must be one of: {}",
            VALID_ROLES.join(", ")
        )))
    }
}
