//! Vendor status state machine, slug validation, and badge derivation.

use crate::error::CoreError;

/// Moderation state of a vendor listing. Only `approved` vendors are
/// publicly visible (listing, profile page, sitemap).
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VendorStatus {
    /// Awaiting back-office approval.
    Pending,
    /// Publicly visible.
    Approved,
    /// Hidden by the back office; may be re-approved.
    Suspended,
}

impl VendorStatus {
    /// Stable string form stored in the `vendors.status` column.
    pub fn as_str(self) -> &'static str {
        match self {
            VendorStatus::Pending => "pending",
            VendorStatus::Approved => "approved",
            VendorStatus::Suspended => "suspended",
        }
    }

    /// Parse the stored string form.
    pub fn parse(s: &str) -> Result<Self, CoreError> {
        match s {
            "pending" => Ok(VendorStatus::Pending),
            "approved" => Ok(VendorStatus::Approved),
            "suspended" => Ok(VendorStatus::Suspended),
            other => Err(CoreError::Validation(format!(
                "Invalid vendor status '{other}'"
            ))),
        }
    }

    /// Whether the vendor appears in public surfaces.
    pub fn is_public(self) -> bool {
        self == VendorStatus::Approved
    }

    /// The checked transition table.
    ///
    /// ```text
    /// pending   -> approved | suspended
    /// approved  -> suspended
    /// suspended -> approved
    /// ```
    pub fn can_transition(self, to: VendorStatus) -> bool {
        use VendorStatus::*;
        matches!(
            (self, to),
            (Pending, Approved) | (Pending, Suspended) | (Approved, Suspended) | (Suspended, Approved)
        )
    }

    /// Validate a requested transition, producing a `Conflict` on refusal.
    pub fn ensure_transition(self, to: VendorStatus) -> Result<(), CoreError> {
        if self.can_transition(to) {
            Ok(())
        } else {
            Err(CoreError::Conflict(format!(
                "Vendor cannot move from '{}' to '{}'",
                self.as_str(),
                to.as_str()
            )))
        }
    }
}

/* --------------------------------------------------------------------------
Slug validation
-------------------------------------------------------------------------- */

/// Maximum length for a vendor URL slug.
pub const MAX_SLUG_LENGTH: usize = 80;

/// Validate a URL slug: lowercase ASCII letters, digits, and single hyphens.
pub fn validate_slug(slug: &str) -> Result<(), CoreError> {
    if slug.is_empty() || slug.len() > MAX_SLUG_LENGTH {
        return Err(CoreError::Validation(format!(
            "Slug must be 1-{MAX_SLUG_LENGTH} characters"
        )));
    }
    if slug.starts_with('-') || slug.ends_with('-') || slug.contains("--") {
        return Err(CoreError::Validation(
            "Slug must not start or end with a hyphen or contain consecutive hyphens".to_string(),
        ));
    }
    if !slug
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
    {
        return Err(CoreError::Validation(
            "Slug may only contain lowercase letters, digits, and hyphens".to_string(),
        ));
    }
    Ok(())
}

/* --------------------------------------------------------------------------
Badges
-------------------------------------------------------------------------- */

/// Presentational badges shown on a vendor's public listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Badge {
    /// High average rating over a meaningful review base.
    TopRated,
    /// Substantial number of won bookings.
    Experienced,
    /// Strong early ratings before the review base is large.
    RisingStar,
}

/// Minimum approved reviews before `TopRated` applies.
pub const TOP_RATED_MIN_REVIEWS: i64 = 10;
/// Minimum average rating for `TopRated` and `RisingStar`.
pub const TOP_RATED_MIN_AVG: f64 = 4.5;
/// Minimum won leads for `Experienced`.
pub const EXPERIENCED_MIN_WON: i64 = 25;

/// Derive the badge set from already-aggregated vendor stats.
pub fn compute_badges(avg_rating: f64, review_count: i64, won_lead_count: i64) -> Vec<Badge> {
    let mut badges = Vec::new();
    if review_count >= TOP_RATED_MIN_REVIEWS && avg_rating >= TOP_RATED_MIN_AVG {
        badges.push(Badge::TopRated);
    } else if review_count > 0 && review_count < TOP_RATED_MIN_REVIEWS && avg_rating >= TOP_RATED_MIN_AVG
    {
        badges.push(Badge::RisingStar);
    }
    if won_lead_count >= EXPERIENCED_MIN_WON {
        badges.push(Badge::Experienced);
    }
    badges
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pending_vendor_is_not_public() {
        assert!(!VendorStatus::Pending.is_public());
        assert!(VendorStatus::Approved.is_public());
        assert!(!VendorStatus::Suspended.is_public());
    }

    #[test]
    fn approval_and_suspension_round_trip() {
        assert!(VendorStatus::Pending.can_transition(VendorStatus::Approved));
        assert!(VendorStatus::Approved.can_transition(VendorStatus::Suspended));
        assert!(VendorStatus::Suspended.can_transition(VendorStatus::Approved));
        // A suspended vendor does not go back through the pending queue.
        assert!(!VendorStatus::Suspended.can_transition(VendorStatus::Pending));
        assert!(!VendorStatus::Approved.can_transition(VendorStatus::Pending));
    }

    #[test]
    fn slug_accepts_lowercase_hyphenated() {
        assert!(validate_slug("antalya-garden-catering").is_ok());
        assert!(validate_slug("v2-kitchen").is_ok());
    }

    #[test]
    fn slug_rejects_bad_shapes() {
        assert!(validate_slug("").is_err());
        assert!(validate_slug("-leading").is_err());
        assert!(validate_slug("trailing-").is_err());
        assert!(validate_slug("double--hyphen").is_err());
        assert!(validate_slug("Uppercase").is_err());
        assert!(validate_slug("spaces not ok").is_err());
        assert!(validate_slug(&"x".repeat(MAX_SLUG_LENGTH + 1)).is_err());
    }

    #[test]
    fn badges_follow_thresholds() {
        assert_eq!(compute_badges(4.8, 12, 30), vec![Badge::TopRated, Badge::Experienced]);
        assert_eq!(compute_badges(4.9, 3, 0), vec![Badge::RisingStar]);
        assert_eq!(compute_badges(4.0, 50, 0), Vec::<Badge>::new());
        assert_eq!(compute_badges(0.0, 0, 25), vec![Badge::Experienced]);
    }
}
