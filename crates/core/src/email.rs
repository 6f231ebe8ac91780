//! Transactional email categories.
//!
//! Every outbound email belongs to exactly one category. Recipients opt out
//! per category via `notification_preferences`; the special `all` category
//! in an unsubscribe token disables every category at once.

use crate::error::CoreError;

/// Category of a transactional email.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmailCategory {
    /// Vendor: a new lead arrived. Customer: lead confirmation.
    LeadReceived,
    /// Customer: a vendor sent a quote.
    QuoteReceived,
    /// Vendor: the customer accepted / rejected / countered a quote.
    QuoteStatus,
    /// Either side: a new message in a conversation thread.
    NewMessage,
    /// Customer: a vendor replied to their review.
    ReviewReply,
}

/// All concrete email categories (excludes the `all` unsubscribe wildcard).
pub const ALL_CATEGORIES: &[EmailCategory] = &[
    EmailCategory::LeadReceived,
    EmailCategory::QuoteReceived,
    EmailCategory::QuoteStatus,
    EmailCategory::NewMessage,
    EmailCategory::ReviewReply,
];

/// Wildcard category accepted in unsubscribe tokens only.
pub const CATEGORY_ALL: &str = "all";

impl EmailCategory {
    /// Stable string form stored in preferences, logs, and tokens.
    pub fn as_str(self) -> &'static str {
        match self {
            EmailCategory::LeadReceived => "lead_received",
            EmailCategory::QuoteReceived => "quote_received",
            EmailCategory::QuoteStatus => "quote_status",
            EmailCategory::NewMessage => "new_message",
            EmailCategory::ReviewReply => "review_reply",
        }
    }

    /// Parse the stored string form.
    pub fn parse(s: &str) -> Result<Self, CoreError> {
        match s {
            "lead_received" => Ok(EmailCategory::LeadReceived),
            "quote_received" => Ok(EmailCategory::QuoteReceived),
            "quote_status" => Ok(EmailCategory::QuoteStatus),
            "new_message" => Ok(EmailCategory::NewMessage),
            "review_reply" => Ok(EmailCategory::ReviewReply),
            other => Err(CoreError::Validation(format!(
                "Invalid email category '{other}'"
            ))),
        }
    }
}

/// An unsubscribe scope: one category, or everything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnsubscribeScope {
    /// Disable a single category.
    Category(EmailCategory),
    /// Disable every category.
    All,
}

impl UnsubscribeScope {
    /// Stable string form embedded in unsubscribe tokens.
    pub fn as_str(self) -> &'static str {
        match self {
            UnsubscribeScope::Category(c) => c.as_str(),
            UnsubscribeScope::All => CATEGORY_ALL,
        }
    }

    /// Parse the token string form.
    pub fn parse(s: &str) -> Result<Self, CoreError> {
        if s == CATEGORY_ALL {
            Ok(UnsubscribeScope::All)
        } else {
            EmailCategory::parse(s).map(UnsubscribeScope::Category)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_round_trips_through_string_form() {
        for category in ALL_CATEGORIES {
            assert_eq!(EmailCategory::parse(category.as_str()).unwrap(), *category);
        }
        assert!(EmailCategory::parse("newsletter").is_err());
    }

    #[test]
    fn scope_accepts_all_wildcard() {
        assert_eq!(UnsubscribeScope::parse("all").unwrap(), UnsubscribeScope::All);
        assert_eq!(
            UnsubscribeScope::parse("new_message").unwrap(),
            UnsubscribeScope::Category(EmailCategory::NewMessage)
        );
        assert!(UnsubscribeScope::parse("everything").is_err());
    }
}
