//! Preference-gated, rate-limited email dispatch.

use std::time::Duration;

use sofra_core::email::{EmailCategory, UnsubscribeScope};
use sofra_core::types::DbId;
use sofra_core::unsubscribe::sign_token;
use sofra_db::models::email_log::{
    OUTCOME_FAILED, OUTCOME_SENT, OUTCOME_SKIPPED_PREF, OUTCOME_SKIPPED_RATE,
};
use sofra_db::repositories::{EmailLogRepo, NotificationPreferenceRepo};
use sofra_db::DbPool;

use super::email::{EmailConfig, EmailSender};
use super::rate_limit::RateLimiter;
use super::templates;
use crate::config::ServerConfig;

/// The target of one email send.
#[derive(Debug, Clone, Copy)]
pub struct Recipient<'a> {
    /// `None` for unauthenticated lead submitters.
    pub profile_id: Option<DbId>,
    pub email: &'a str,
    pub name: &'a str,
}

/// Owns the outbound email pipeline.
///
/// Every send is best-effort: any failure is logged (tracing + `email_logs`)
/// and swallowed, so the triggering operation always reports its own result.
pub struct EmailDispatcher {
    sender: Option<EmailSender>,
    limiter: RateLimiter,
    public_base_url: String,
    unsubscribe_secret: Vec<u8>,
    unsubscribe_token_ttl_days: i64,
}

impl EmailDispatcher {
    /// Build the dispatcher from server config and the SMTP environment.
    ///
    /// With no `SMTP_HOST` configured the dispatcher still runs the
    /// preference and rate-limit stages (so logs stay meaningful in
    /// development) but skips the transport.
    pub fn from_env(config: &ServerConfig) -> Self {
        let sender = EmailConfig::from_env().map(EmailSender::new);
        if sender.is_none() {
            tracing::warn!("SMTP_HOST not set; email delivery is disabled");
        }
        Self {
            sender,
            limiter: RateLimiter::new(
                config.email_rate_limit_per_hour,
                Duration::from_secs(3600),
            ),
            public_base_url: config.public_base_url.clone(),
            unsubscribe_secret: config.unsubscribe_secret.as_bytes().to_vec(),
            unsubscribe_token_ttl_days: config.unsubscribe_token_ttl_days,
        }
    }

    /// Dispatch one transactional email.
    ///
    /// Pipeline: preference check (profiles only; missing row = allowed) ->
    /// rate limit -> render -> send -> outcome log. Never returns an error.
    pub async fn dispatch(
        &self,
        pool: &DbPool,
        recipient: Recipient<'_>,
        category: EmailCategory,
        detail: &str,
    ) {
        // 1. Preference gate. Anonymous recipients have no stored
        //    preferences and default to allowed.
        if let Some(profile_id) = recipient.profile_id {
            match NotificationPreferenceRepo::is_enabled(pool, profile_id, category.as_str()).await
            {
                Ok(true) => {}
                Ok(false) => {
                    self.log_outcome(pool, &recipient, category, OUTCOME_SKIPPED_PREF, None)
                        .await;
                    return;
                }
                Err(e) => {
                    tracing::error!(error = %e, "Preference lookup failed; skipping email");
                    return;
                }
            }
        }

        // 2. Rate limit, keyed by address.
        if !self.limiter.try_acquire(recipient.email).await {
            self.log_outcome(pool, &recipient, category, OUTCOME_SKIPPED_RATE, None)
                .await;
            return;
        }

        // 3. Render.
        let unsubscribe_url = recipient
            .profile_id
            .map(|id| self.unsubscribe_url(id, category));
        let content = templates::render(
            category,
            recipient.name,
            detail,
            unsubscribe_url.as_deref(),
        );

        // 4. Send, unless delivery is disabled.
        let Some(sender) = &self.sender else {
            tracing::debug!(
                category = category.as_str(),
                "Email delivery disabled; send skipped"
            );
            return;
        };

        match sender.send(recipient.email, &content.subject, &content.body).await {
            Ok(()) => {
                tracing::info!(category = category.as_str(), "Notification email sent");
                self.log_outcome(pool, &recipient, category, OUTCOME_SENT, None)
                    .await;
            }
            Err(e) => {
                tracing::error!(
                    category = category.as_str(),
                    error = %e,
                    "Notification email failed"
                );
                self.log_outcome(
                    pool,
                    &recipient,
                    category,
                    OUTCOME_FAILED,
                    Some(e.to_string()),
                )
                .await;
            }
        }
    }

    /// Build the signed unsubscribe link for a profile and category.
    fn unsubscribe_url(&self, profile_id: DbId, category: EmailCategory) -> String {
        let expires_at = chrono::Utc::now().timestamp()
            + self.unsubscribe_token_ttl_days * 24 * 3600;
        let token = sign_token(
            profile_id,
            UnsubscribeScope::Category(category),
            expires_at,
            &self.unsubscribe_secret,
        );
        format!("{}/api/v1/unsubscribe?token={token}", self.public_base_url)
    }

    /// Record the outcome without personal content; log failures and move on.
    async fn log_outcome(
        &self,
        pool: &DbPool,
        recipient: &Recipient<'_>,
        category: EmailCategory,
        outcome: &str,
        error: Option<String>,
    ) {
        if let Err(e) = EmailLogRepo::record(
            pool,
            recipient.profile_id,
            category.as_str(),
            outcome,
            error.as_deref(),
        )
        .await
        {
            tracing::error!(error = %e, outcome, "Failed to record email log");
        }
    }
}
