//! Plain-text email templates, one per category.

use sofra_core::email::EmailCategory;

/// A rendered email: subject line and plain-text body.
#[derive(Debug, Clone)]
pub struct EmailContent {
    pub subject: String,
    pub body: String,
}

/// Render the email for a category.
///
/// `detail` is a one-line, category-specific summary composed by the
/// triggering handler (e.g. the business name or quote amount).
/// `unsubscribe_url` is omitted for recipients without an account, since
/// the token encodes a profile id.
pub fn render(
    category: EmailCategory,
    recipient_name: &str,
    detail: &str,
    unsubscribe_url: Option<&str>,
) -> EmailContent {
    let (subject, lead_in) = match category {
        EmailCategory::LeadReceived => (
            "[Sofra] New catering request".to_string(),
            "You have a new catering request:",
        ),
        EmailCategory::QuoteReceived => (
            "[Sofra] You received a quote".to_string(),
            "A caterer sent you a quote:",
        ),
        EmailCategory::QuoteStatus => (
            "[Sofra] Quote update".to_string(),
            "There is an update on one of your quotes:",
        ),
        EmailCategory::NewMessage => (
            "[Sofra] New message".to_string(),
            "You have a new message:",
        ),
        EmailCategory::ReviewReply => (
            "[Sofra] Reply to your review".to_string(),
            "A caterer replied to your review:",
        ),
    };

    let mut body = format!("Hello {recipient_name},\n\n{lead_in}\n\n{detail}\n");
    if let Some(url) = unsubscribe_url {
        body.push_str(&format!(
            "\n--\nTo stop receiving these emails: {url}\n"
        ));
    }

    EmailContent { subject, body }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sofra_core::email::ALL_CATEGORIES;

    #[test]
    fn every_category_renders_with_detail() {
        for category in ALL_CATEGORIES {
            let content = render(*category, "Ayşe", "Garden Catering, 50 guests", None);
            assert!(content.subject.starts_with("[Sofra]"));
            assert!(content.body.contains("Ayşe"));
            assert!(content.body.contains("Garden Catering"));
        }
    }

    #[test]
    fn unsubscribe_link_is_included_when_given() {
        let url = "https://sofra.example/api/v1/unsubscribe?token=abc";
        let content = render(EmailCategory::NewMessage, "Mehmet", "hi", Some(url));
        assert!(content.body.contains(url));

        let without = render(EmailCategory::NewMessage, "Mehmet", "hi", None);
        assert!(!without.body.contains("unsubscribe"));
    }

    #[test]
    fn subjects_differ_by_category() {
        let a = render(EmailCategory::QuoteReceived, "x", "d", None).subject;
        let b = render(EmailCategory::NewMessage, "x", "d", None).subject;
        assert_ne!(a, b);
    }
}
