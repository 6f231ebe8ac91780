//! Conversation message validation.

use crate::error::CoreError;

/// Maximum length for a single message.
pub const MAX_MESSAGE_LENGTH: usize = 5_000;

/// Validate message content: required, bounded.
pub fn validate_message_content(content: &str) -> Result<(), CoreError> {
    let trimmed = content.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation(
            "Message content must not be empty".to_string(),
        ));
    }
    if trimmed.len() > MAX_MESSAGE_LENGTH {
        return Err(CoreError::Validation(format!(
            "Message content must not exceed {MAX_MESSAGE_LENGTH} characters"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_required_and_bounded() {
        assert!(validate_message_content("Is the date still open?").is_ok());
        assert!(validate_message_content("   ").is_err());
        assert!(validate_message_content(&"x".repeat(MAX_MESSAGE_LENGTH + 1)).is_err());
    }
}
