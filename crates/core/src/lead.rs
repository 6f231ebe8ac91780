//! Lead intake validation.
//!
//! Leads are validated in full before any row is written; a lead that
//! passes here is inserted as-is and never mutated outside the back office.

use chrono::NaiveDate;

use crate::error::CoreError;
use crate::types::Money;

/// Maximum length for the customer's display name.
pub const MAX_NAME_LENGTH: usize = 120;

/// Maximum length for free-text dietary notes.
pub const MAX_DIETARY_NOTES_LENGTH: usize = 2_000;

/// Upper bound on guest count; above this the form is assumed to be garbage.
pub const MAX_GUEST_COUNT: i32 = 10_000;

/// All valid service style values.
pub const VALID_SERVICE_STYLES: &[&str] = &[
    "buffet",
    "plated",
    "family_style",
    "cocktail",
    "drop_off",
];

/// Validate a service style string.
pub fn validate_service_style(style: &str) -> Result<(), CoreError> {
    if VALID_SERVICE_STYLES.contains(&style) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid service style '{style}'. Must be one of: {}",
            VALID_SERVICE_STYLES.join(", ")
        )))
    }
}

/// Validate the customer's display name.
pub fn validate_customer_name(name: &str) -> Result<(), CoreError> {
    let trimmed = name.trim();
    if trimmed.is_empty() || trimmed.len() > MAX_NAME_LENGTH {
        return Err(CoreError::Validation(format!(
            "Customer name must be 1-{MAX_NAME_LENGTH} characters"
        )));
    }
    Ok(())
}

/// Minimal structural check for an email address.
///
/// Deliverability is the mail provider's problem; this only rejects values
/// that cannot possibly be addresses.
pub fn validate_email(email: &str) -> Result<(), CoreError> {
    let Some((local, domain)) = email.split_once('@') else {
        return Err(CoreError::Validation("Invalid email address".to_string()));
    };
    if local.is_empty() || domain.is_empty() || !domain.contains('.') || email.contains(char::is_whitespace)
    {
        return Err(CoreError::Validation("Invalid email address".to_string()));
    }
    Ok(())
}

/// Validate the guest count.
pub fn validate_guest_count(guest_count: i32) -> Result<(), CoreError> {
    if guest_count <= 0 || guest_count > MAX_GUEST_COUNT {
        return Err(CoreError::Validation(format!(
            "Guest count must be between 1 and {MAX_GUEST_COUNT}"
        )));
    }
    Ok(())
}

/// Validate the budget range, when given. Either bound may be omitted.
pub fn validate_budget_range(min: Option<Money>, max: Option<Money>) -> Result<(), CoreError> {
    if let Some(min) = min {
        if min < 0 {
            return Err(CoreError::Validation(
                "Budget minimum must not be negative".to_string(),
            ));
        }
    }
    if let Some(max) = max {
        if max <= 0 {
            return Err(CoreError::Validation(
                "Budget maximum must be positive".to_string(),
            ));
        }
    }
    if let (Some(min), Some(max)) = (min, max) {
        if min > max {
            return Err(CoreError::Validation(
                "Budget minimum exceeds the maximum".to_string(),
            ));
        }
    }
    Ok(())
}

/// Validate that the event date is not in the past.
pub fn validate_event_date(event_date: NaiveDate, today: NaiveDate) -> Result<(), CoreError> {
    if event_date < today {
        return Err(CoreError::Validation(
            "Event date must not be in the past".to_string(),
        ));
    }
    Ok(())
}

/// Validate dietary notes length.
pub fn validate_dietary_notes(notes: &str) -> Result<(), CoreError> {
    if notes.len() > MAX_DIETARY_NOTES_LENGTH {
        return Err(CoreError::Validation(format!(
            "Dietary notes must not exceed {MAX_DIETARY_NOTES_LENGTH} characters"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn service_styles_are_closed_set() {
        assert!(validate_service_style("buffet").is_ok());
        assert!(validate_service_style("molecular").is_err());
    }

    #[test]
    fn email_shape_check() {
        assert!(validate_email("ayse@example.com").is_ok());
        assert!(validate_email("no-at-sign").is_err());
        assert!(validate_email("@example.com").is_err());
        assert!(validate_email("user@nodot").is_err());
        assert!(validate_email("spaced user@example.com").is_err());
    }

    #[test]
    fn guest_count_bounds() {
        assert!(validate_guest_count(50).is_ok());
        assert!(validate_guest_count(0).is_err());
        assert!(validate_guest_count(-5).is_err());
        assert!(validate_guest_count(MAX_GUEST_COUNT + 1).is_err());
    }

    #[test]
    fn budget_range_ordering() {
        assert!(validate_budget_range(Some(100), Some(500)).is_ok());
        assert!(validate_budget_range(None, Some(500)).is_ok());
        assert!(validate_budget_range(Some(100), None).is_ok());
        assert!(validate_budget_range(None, None).is_ok());
        assert!(validate_budget_range(Some(600), Some(500)).is_err());
        assert!(validate_budget_range(Some(-1), None).is_err());
    }

    #[test]
    fn event_date_must_not_be_past() {
        let today = NaiveDate::from_ymd_opt(2026, 8, 6).unwrap();
        assert!(validate_event_date(today, today).is_ok());
        assert!(validate_event_date(today.succ_opt().unwrap(), today).is_ok());
        assert!(validate_event_date(today.pred_opt().unwrap(), today).is_err());
    }

    #[test]
    fn name_is_trimmed_and_bounded() {
        assert!(validate_customer_name("Ayşe Yılmaz").is_ok());
        assert!(validate_customer_name("   ").is_err());
        assert!(validate_customer_name(&"x".repeat(MAX_NAME_LENGTH + 1)).is_err());
    }
}
