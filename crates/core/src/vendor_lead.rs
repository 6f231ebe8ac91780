//! Vendor-lead status state machine.
//!
//! A `vendor_lead` is the per-vendor instance of a lead. Its status tracks
//! how far the vendor has taken the request; quote acceptance and rejection
//! drive the terminal transitions.

use crate::error::CoreError;

/// Lifecycle state of a vendor lead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VendorLeadStatus {
    /// Lead delivered to the vendor.
    Sent,
    /// Vendor opened the lead.
    Seen,
    /// Vendor reached out without a formal quote yet.
    Contacted,
    /// Vendor sent a quote.
    Quoted,
    /// Customer accepted the quote. Terminal.
    Won,
    /// Customer rejected or the request fell through. Terminal.
    Lost,
}

impl VendorLeadStatus {
    /// Stable string form stored in the `vendor_leads.status` column.
    pub fn as_str(self) -> &'static str {
        match self {
            VendorLeadStatus::Sent => "sent",
            VendorLeadStatus::Seen => "seen",
            VendorLeadStatus::Contacted => "contacted",
            VendorLeadStatus::Quoted => "quoted",
            VendorLeadStatus::Won => "won",
            VendorLeadStatus::Lost => "lost",
        }
    }

    /// Parse the stored string form.
    pub fn parse(s: &str) -> Result<Self, CoreError> {
        match s {
            "sent" => Ok(VendorLeadStatus::Sent),
            "seen" => Ok(VendorLeadStatus::Seen),
            "contacted" => Ok(VendorLeadStatus::Contacted),
            "quoted" => Ok(VendorLeadStatus::Quoted),
            "won" => Ok(VendorLeadStatus::Won),
            "lost" => Ok(VendorLeadStatus::Lost),
            other => Err(CoreError::Validation(format!(
                "Invalid vendor lead status '{other}'"
            ))),
        }
    }

    /// Whether no further transitions are possible.
    pub fn is_terminal(self) -> bool {
        matches!(self, VendorLeadStatus::Won | VendorLeadStatus::Lost)
    }

    /// The checked transition table.
    ///
    /// ```text
    /// sent      -> seen | contacted | quoted | lost
    /// seen      -> contacted | quoted | lost
    /// contacted -> quoted | lost
    /// quoted    -> won | lost
    /// ```
    ///
    /// A vendor may quote straight from `sent` or `seen` (skipping
    /// `contacted`), but `won` is only reachable through `quoted`.
    pub fn can_transition(self, to: VendorLeadStatus) -> bool {
        use VendorLeadStatus::*;
        matches!(
            (self, to),
            (Sent, Seen)
                | (Sent, Contacted)
                | (Sent, Quoted)
                | (Sent, Lost)
                | (Seen, Contacted)
                | (Seen, Quoted)
                | (Seen, Lost)
                | (Contacted, Quoted)
                | (Contacted, Lost)
                | (Quoted, Won)
                | (Quoted, Lost)
        )
    }

    /// Validate a requested transition, producing a `Conflict` on refusal.
    pub fn ensure_transition(self, to: VendorLeadStatus) -> Result<(), CoreError> {
        if self.can_transition(to) {
            Ok(())
        } else {
            Err(CoreError::Conflict(format!(
                "Vendor lead cannot move from '{}' to '{}'",
                self.as_str(),
                to.as_str()
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quoting_is_reachable_without_contact() {
        assert!(VendorLeadStatus::Sent.can_transition(VendorLeadStatus::Quoted));
        assert!(VendorLeadStatus::Seen.can_transition(VendorLeadStatus::Quoted));
    }

    #[test]
    fn won_requires_a_quote_first() {
        assert!(!VendorLeadStatus::Sent.can_transition(VendorLeadStatus::Won));
        assert!(!VendorLeadStatus::Contacted.can_transition(VendorLeadStatus::Won));
        assert!(VendorLeadStatus::Quoted.can_transition(VendorLeadStatus::Won));
    }

    #[test]
    fn every_live_state_can_be_lost() {
        for from in [
            VendorLeadStatus::Sent,
            VendorLeadStatus::Seen,
            VendorLeadStatus::Contacted,
            VendorLeadStatus::Quoted,
        ] {
            assert!(from.can_transition(VendorLeadStatus::Lost));
        }
    }

    #[test]
    fn terminal_states_are_frozen() {
        for to in [
            VendorLeadStatus::Sent,
            VendorLeadStatus::Seen,
            VendorLeadStatus::Contacted,
            VendorLeadStatus::Quoted,
            VendorLeadStatus::Won,
            VendorLeadStatus::Lost,
        ] {
            assert!(!VendorLeadStatus::Won.can_transition(to));
            assert!(!VendorLeadStatus::Lost.can_transition(to));
        }
    }

    #[test]
    fn no_backward_transitions() {
        assert!(!VendorLeadStatus::Quoted.can_transition(VendorLeadStatus::Seen));
        assert!(!VendorLeadStatus::Contacted.can_transition(VendorLeadStatus::Sent));
    }

    #[test]
    fn status_round_trips_through_string_form() {
        for status in [
            VendorLeadStatus::Sent,
            VendorLeadStatus::Seen,
            VendorLeadStatus::Contacted,
            VendorLeadStatus::Quoted,
            VendorLeadStatus::Won,
            VendorLeadStatus::Lost,
        ] {
            assert_eq!(VendorLeadStatus::parse(status.as_str()).unwrap(), status);
        }
        assert!(VendorLeadStatus::parse("archived").is_err());
    }
}
