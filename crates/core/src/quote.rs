//! Quote status state machine and price derivation.
//!
//! A quote moves through a fixed set of states driven by the customer after
//! the vendor sends it. Transitions not in the table are rejected; the
//! repository additionally guards each transition with a conditional
//! `UPDATE ... WHERE status = $expected` so concurrent writers cannot race
//! past the table.

use crate::error::CoreError;
use crate::types::{Money, Timestamp};

/// Lifecycle state of a quote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuoteStatus {
    /// Vendor sent the quote; awaiting the customer.
    Sent,
    /// Customer opened the quote.
    Viewed,
    /// Customer accepted. Terminal.
    Accepted,
    /// Customer rejected. Terminal.
    Rejected,
    /// Customer proposed a different price; awaiting vendor revision.
    Countered,
}

impl QuoteStatus {
    /// Stable string form stored in the `quotes.status` column.
    pub fn as_str(self) -> &'static str {
        match self {
            QuoteStatus::Sent => "sent",
            QuoteStatus::Viewed => "viewed",
            QuoteStatus::Accepted => "accepted",
            QuoteStatus::Rejected => "rejected",
            QuoteStatus::Countered => "countered",
        }
    }

    /// Parse the stored string form.
    pub fn parse(s: &str) -> Result<Self, CoreError> {
        match s {
            "sent" => Ok(QuoteStatus::Sent),
            "viewed" => Ok(QuoteStatus::Viewed),
            "accepted" => Ok(QuoteStatus::Accepted),
            "rejected" => Ok(QuoteStatus::Rejected),
            "countered" => Ok(QuoteStatus::Countered),
            other => Err(CoreError::Validation(format!(
                "Invalid quote status '{other}'"
            ))),
        }
    }

    /// Whether no further transitions are possible.
    pub fn is_terminal(self) -> bool {
        matches!(self, QuoteStatus::Accepted | QuoteStatus::Rejected)
    }

    /// The checked transition table.
    ///
    /// ```text
    /// sent      -> viewed | accepted | rejected | countered
    /// viewed    -> accepted | rejected | countered
    /// countered -> sent            (vendor revises and re-sends)
    /// ```
    pub fn can_transition(self, to: QuoteStatus) -> bool {
        use QuoteStatus::*;
        matches!(
            (self, to),
            (Sent, Viewed)
                | (Sent, Accepted)
                | (Sent, Rejected)
                | (Sent, Countered)
                | (Viewed, Accepted)
                | (Viewed, Rejected)
                | (Viewed, Countered)
                | (Countered, Sent)
        )
    }

    /// Validate a requested transition, producing a `Conflict` on refusal.
    pub fn ensure_transition(self, to: QuoteStatus) -> Result<(), CoreError> {
        if self.can_transition(to) {
            Ok(())
        } else {
            Err(CoreError::Conflict(format!(
                "Quote cannot move from '{}' to '{}'",
                self.as_str(),
                to.as_str()
            )))
        }
    }
}

/// Derive the per-person price from a quote total and the lead's guest count.
///
/// Integer division; the remainder is absorbed into the total. Returns an
/// error when the guest count is not positive.
pub fn derive_price_per_person(total_price: Money, guest_count: i32) -> Result<Money, CoreError> {
    if total_price <= 0 {
        return Err(CoreError::Validation(
            "Quote total must be positive".to_string(),
        ));
    }
    if guest_count <= 0 {
        return Err(CoreError::Validation(
            "Guest count must be positive to derive a per-person price".to_string(),
        ));
    }
    Ok(total_price / Money::from(guest_count))
}

/// Whether a quote's validity window has passed.
///
/// Expired quotes keep their stored status; they are flagged non-actionable
/// at transition time rather than auto-transitioned.
pub fn is_expired(valid_until: Timestamp, now: Timestamp) -> bool {
    valid_until < now
}

/// Reject customer actions on an expired quote.
pub fn ensure_actionable(valid_until: Timestamp, now: Timestamp) -> Result<(), CoreError> {
    if is_expired(valid_until, now) {
        Err(CoreError::Conflict(
            "Quote validity period has passed".to_string(),
        ))
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    #[test]
    fn happy_path_transitions_are_allowed() {
        assert!(QuoteStatus::Sent.can_transition(QuoteStatus::Viewed));
        assert!(QuoteStatus::Viewed.can_transition(QuoteStatus::Accepted));
        assert!(QuoteStatus::Viewed.can_transition(QuoteStatus::Rejected));
        assert!(QuoteStatus::Sent.can_transition(QuoteStatus::Countered));
        assert!(QuoteStatus::Countered.can_transition(QuoteStatus::Sent));
    }

    #[test]
    fn terminal_states_reject_all_transitions() {
        for to in [
            QuoteStatus::Sent,
            QuoteStatus::Viewed,
            QuoteStatus::Accepted,
            QuoteStatus::Rejected,
            QuoteStatus::Countered,
        ] {
            assert!(!QuoteStatus::Accepted.can_transition(to));
            assert!(!QuoteStatus::Rejected.can_transition(to));
        }
        assert!(QuoteStatus::Accepted.is_terminal());
        assert!(QuoteStatus::Rejected.is_terminal());
    }

    #[test]
    fn viewed_cannot_regress_to_sent() {
        assert!(!QuoteStatus::Viewed.can_transition(QuoteStatus::Sent));
    }

    #[test]
    fn ensure_transition_reports_conflict() {
        let err = QuoteStatus::Accepted
            .ensure_transition(QuoteStatus::Rejected)
            .unwrap_err();
        assert!(matches!(err, CoreError::Conflict(_)));
        assert!(err.to_string().contains("accepted"));
    }

    #[test]
    fn price_per_person_derives_from_total_and_guests() {
        assert_eq!(derive_price_per_person(5000, 50).unwrap(), 100);
        assert_eq!(derive_price_per_person(5001, 50).unwrap(), 100);
    }

    #[test]
    fn price_per_person_requires_positive_inputs() {
        assert!(derive_price_per_person(0, 50).is_err());
        assert!(derive_price_per_person(5000, 0).is_err());
        assert!(derive_price_per_person(-1, 10).is_err());
    }

    #[test]
    fn expired_quote_is_not_actionable() {
        let now = Utc::now();
        assert!(is_expired(now - Duration::hours(1), now));
        assert!(!is_expired(now + Duration::hours(1), now));
        assert!(ensure_actionable(now - Duration::seconds(1), now).is_err());
        assert!(ensure_actionable(now + Duration::days(7), now).is_ok());
    }

    #[test]
    fn status_round_trips_through_string_form() {
        for status in [
            QuoteStatus::Sent,
            QuoteStatus::Viewed,
            QuoteStatus::Accepted,
            QuoteStatus::Rejected,
            QuoteStatus::Countered,
        ] {
            assert_eq!(QuoteStatus::parse(status.as_str()).unwrap(), status);
        }
        assert!(QuoteStatus::parse("expired").is_err());
    }
}
