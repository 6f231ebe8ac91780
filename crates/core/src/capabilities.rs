//! Role capability policy table.
//!
//! Authorization is decided once per request by checking the caller's role
//! against this table, instead of comparing role strings inside individual
//! handlers. The table is the single source of truth for what each role may
//! do; handlers ask for a [`Capability`] and get a yes/no answer.

use crate::error::CoreError;
use crate::roles::{ROLE_ADMIN, ROLE_CUSTOMER, ROLE_VENDOR_OWNER};

/// A single permissible action within the marketplace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    /// Submit a lead against a vendor.
    SubmitLead,
    /// Respond to a quote: view, accept, reject, counter-offer.
    RespondToQuote,
    /// Create or revise a quote on an owned vendor lead.
    SendQuote,
    /// Participate in a conversation thread.
    SendMessage,
    /// Create a review for a vendor.
    SubmitReview,
    /// Vote a review helpful / not helpful.
    VoteOnReview,
    /// Reply to a review on an owned vendor.
    ReplyToReview,
    /// Moderate reviews and other user content.
    ModerateContent,
    /// Approve, suspend, and edit vendors.
    ManageVendors,
    /// Edit users, leads, and back-office data.
    ManageUsers,
    /// Edit geographic lookup tables.
    ManageGeo,
    /// Author and publish blog content.
    ManageBlog,
    /// View back-office aggregate statistics.
    ViewAdminStats,
}

/// Capabilities granted to the `customer` role.
const CUSTOMER_CAPABILITIES: &[Capability] = &[
    Capability::SubmitLead,
    Capability::RespondToQuote,
    Capability::SendMessage,
    Capability::SubmitReview,
    Capability::VoteOnReview,
];

/// Capabilities granted to the `vendor_owner` role.
const VENDOR_OWNER_CAPABILITIES: &[Capability] = &[
    Capability::SendQuote,
    Capability::SendMessage,
    Capability::ReplyToReview,
    Capability::VoteOnReview,
];

/// Capabilities granted to the `admin` role.
const ADMIN_CAPABILITIES: &[Capability] = &[
    Capability::ModerateContent,
    Capability::ManageVendors,
    Capability::ManageUsers,
    Capability::ManageGeo,
    Capability::ManageBlog,
    Capability::ViewAdminStats,
];

/// Resolve the capability set for a role name.
///
/// Unknown roles get an empty set, which denies everything.
pub fn role_capabilities(role: &str) -> &'static [Capability] {
    match role {
        ROLE_CUSTOMER => CUSTOMER_CAPABILITIES,
        ROLE_VENDOR_OWNER => VENDOR_OWNER_CAPABILITIES,
        ROLE_ADMIN => ADMIN_CAPABILITIES,
        _ => &[],
    }
}

/// Check whether a role holds a capability.
pub fn has_capability(role: &str, capability: Capability) -> bool {
    role_capabilities(role).contains(&capability)
}

/// Require a capability, producing a `Forbidden` error when absent.
pub fn require_capability(role: &str, capability: Capability) -> Result<(), CoreError> {
    if has_capability(role, capability) {
        Ok(())
    } else {
        Err(CoreError::Forbidden(format!(
            "Role '{role}' may not perform this action"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn customer_can_submit_lead_but_not_quote() {
        assert!(has_capability(ROLE_CUSTOMER, Capability::SubmitLead));
        assert!(!has_capability(ROLE_CUSTOMER, Capability::SendQuote));
    }

    #[test]
    fn vendor_owner_can_quote_but_not_moderate() {
        assert!(has_capability(ROLE_VENDOR_OWNER, Capability::SendQuote));
        assert!(has_capability(ROLE_VENDOR_OWNER, Capability::ReplyToReview));
        assert!(!has_capability(ROLE_VENDOR_OWNER, Capability::ModerateContent));
    }

    #[test]
    fn admin_holds_back_office_capabilities_only() {
        assert!(has_capability(ROLE_ADMIN, Capability::ManageVendors));
        assert!(has_capability(ROLE_ADMIN, Capability::ModerateContent));
        // Admins act through the back office, not as marketplace participants.
        assert!(!has_capability(ROLE_ADMIN, Capability::SubmitLead));
    }

    #[test]
    fn unknown_role_is_denied_everything() {
        assert!(role_capabilities("superuser").is_empty());
        assert!(require_capability("superuser", Capability::SendMessage).is_err());
    }

    #[test]
    fn require_capability_formats_forbidden_error() {
        let err = require_capability(ROLE_CUSTOMER, Capability::ManageVendors).unwrap_err();
        assert!(err.to_string().contains("customer"));
    }
}
