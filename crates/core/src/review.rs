//! Review rating and content validation.

use crate::error::CoreError;

/// Minimum star rating.
pub const MIN_RATING: i32 = 1;

/// Maximum star rating.
pub const MAX_RATING: i32 = 5;

/// Maximum length for a review comment.
pub const MAX_COMMENT_LENGTH: usize = 4_000;

/// Maximum length for a vendor's reply.
pub const MAX_REPLY_LENGTH: usize = 2_000;

/// Validate a star rating.
pub fn validate_rating(rating: i32) -> Result<(), CoreError> {
    if (MIN_RATING..=MAX_RATING).contains(&rating) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Rating must be between {MIN_RATING} and {MAX_RATING}"
        )))
    }
}

/// Validate a review comment. Comments are required and bounded.
pub fn validate_comment(comment: &str) -> Result<(), CoreError> {
    let trimmed = comment.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation(
            "Review comment must not be empty".to_string(),
        ));
    }
    if trimmed.len() > MAX_COMMENT_LENGTH {
        return Err(CoreError::Validation(format!(
            "Review comment must not exceed {MAX_COMMENT_LENGTH} characters"
        )));
    }
    Ok(())
}

/// Validate a vendor reply.
pub fn validate_reply(reply: &str) -> Result<(), CoreError> {
    let trimmed = reply.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation(
            "Reply must not be empty".to_string(),
        ));
    }
    if trimmed.len() > MAX_REPLY_LENGTH {
        return Err(CoreError::Validation(format!(
            "Reply must not exceed {MAX_REPLY_LENGTH} characters"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rating_bounds() {
        for rating in MIN_RATING..=MAX_RATING {
            assert!(validate_rating(rating).is_ok());
        }
        assert!(validate_rating(0).is_err());
        assert!(validate_rating(6).is_err());
    }

    #[test]
    fn comment_required_and_bounded() {
        assert!(validate_comment("Great food, on time.").is_ok());
        assert!(validate_comment("  ").is_err());
        assert!(validate_comment(&"x".repeat(MAX_COMMENT_LENGTH + 1)).is_err());
    }

    #[test]
    fn reply_required_and_bounded() {
        assert!(validate_reply("Thank you!").is_ok());
        assert!(validate_reply("").is_err());
        assert!(validate_reply(&"x".repeat(MAX_REPLY_LENGTH + 1)).is_err());
    }
}
