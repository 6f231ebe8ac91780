//! Signed unsubscribe tokens.
//!
//! A token encodes the recipient's profile id, the email category being
//! disabled, and an expiry timestamp, authenticated with HMAC-SHA256 under
//! a server-side secret. Tokens travel in unsubscribe links, so any byte of
//! tampering must invalidate them; verification uses the MAC's
//! constant-time comparison.
//!
//! Wire format: `v1.<profile_id>.<scope>.<expires_at>.<hex mac>`

use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::email::UnsubscribeScope;
use crate::types::DbId;

type HmacSha256 = Hmac<Sha256>;

/// Token format version prefix.
const TOKEN_VERSION: &str = "v1";

/// Verification failure reasons.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TokenError {
    /// The token does not have the expected five-part shape.
    #[error("Malformed unsubscribe token")]
    Malformed,

    /// The MAC does not verify against the payload.
    #[error("Invalid unsubscribe token signature")]
    BadSignature,

    /// The token's expiry timestamp has passed.
    #[error("Unsubscribe token has expired")]
    Expired,
}

/// A verified unsubscribe token payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnsubscribeToken {
    pub profile_id: DbId,
    pub scope: UnsubscribeScope,
    /// UTC Unix timestamp after which the token is rejected.
    pub expires_at: i64,
}

/// MAC input for a token payload. Signing and verification must agree on
/// this exact byte layout.
fn mac_payload(profile_id: DbId, scope: &str, expires_at: i64) -> String {
    format!("{TOKEN_VERSION}.{profile_id}.{scope}.{expires_at}")
}

/// Sign an unsubscribe token.
pub fn sign_token(
    profile_id: DbId,
    scope: UnsubscribeScope,
    expires_at: i64,
    secret: &[u8],
) -> String {
    let payload = mac_payload(profile_id, scope.as_str(), expires_at);
    let mut mac = HmacSha256::new_from_slice(secret).expect("HMAC accepts any key length");
    mac.update(payload.as_bytes());
    let tag = mac.finalize().into_bytes();
    let hex: String = tag.iter().map(|b| format!("{b:02x}")).collect();
    format!("{payload}.{hex}")
}

/// Verify a token string, returning its payload on success.
///
/// Checks shape, signature, and expiry, in that order. Signature comparison
/// is constant-time via [`Mac::verify_slice`].
pub fn verify_token(token: &str, now_ts: i64, secret: &[u8]) -> Result<UnsubscribeToken, TokenError> {
    let parts: Vec<&str> = token.split('.').collect();
    let &[version, id_part, scope_part, exp_part, mac_part] = parts.as_slice() else {
        return Err(TokenError::Malformed);
    };
    if version != TOKEN_VERSION {
        return Err(TokenError::Malformed);
    }

    let profile_id: DbId = id_part.parse().map_err(|_| TokenError::Malformed)?;
    let scope = UnsubscribeScope::parse(scope_part).map_err(|_| TokenError::Malformed)?;
    let expires_at: i64 = exp_part.parse().map_err(|_| TokenError::Malformed)?;

    let expected = decode_hex(mac_part).ok_or(TokenError::Malformed)?;

    let payload = mac_payload(profile_id, scope_part, expires_at);
    let mut mac = HmacSha256::new_from_slice(secret).expect("HMAC accepts any key length");
    mac.update(payload.as_bytes());
    mac.verify_slice(&expected)
        .map_err(|_| TokenError::BadSignature)?;

    if expires_at < now_ts {
        return Err(TokenError::Expired);
    }

    Ok(UnsubscribeToken {
        profile_id,
        scope,
        expires_at,
    })
}

/// Decode a lowercase/uppercase hex string into bytes.
fn decode_hex(s: &str) -> Option<Vec<u8>> {
    if s.len() % 2 != 0 {
        return None;
    }
    (0..s.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(&s[i..i + 2], 16).ok())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::email::EmailCategory;

    const SECRET: &[u8] = b"test-unsubscribe-secret";
    const NOW: i64 = 1_780_000_000;

    #[test]
    fn valid_token_round_trips() {
        let token = sign_token(
            42,
            UnsubscribeScope::Category(EmailCategory::NewMessage),
            NOW + 3600,
            SECRET,
        );
        let parsed = verify_token(&token, NOW, SECRET).unwrap();
        assert_eq!(parsed.profile_id, 42);
        assert_eq!(
            parsed.scope,
            UnsubscribeScope::Category(EmailCategory::NewMessage)
        );
        assert_eq!(parsed.expires_at, NOW + 3600);
    }

    #[test]
    fn all_scope_round_trips() {
        let token = sign_token(7, UnsubscribeScope::All, NOW + 60, SECRET);
        let parsed = verify_token(&token, NOW, SECRET).unwrap();
        assert_eq!(parsed.scope, UnsubscribeScope::All);
    }

    #[test]
    fn any_byte_of_tampering_invalidates() {
        let token = sign_token(
            42,
            UnsubscribeScope::Category(EmailCategory::QuoteReceived),
            NOW + 3600,
            SECRET,
        );
        // Flip one character at every position and require rejection.
        for i in 0..token.len() {
            let mut bytes = token.clone().into_bytes();
            bytes[i] = if bytes[i] == b'0' { b'1' } else { b'0' };
            let Ok(tampered) = String::from_utf8(bytes) else {
                continue;
            };
            if tampered == token {
                continue;
            }
            assert!(
                verify_token(&tampered, NOW, SECRET).is_err(),
                "tampering at byte {i} was accepted"
            );
        }
    }

    #[test]
    fn expired_token_is_rejected() {
        let token = sign_token(42, UnsubscribeScope::All, NOW - 1, SECRET);
        assert_eq!(verify_token(&token, NOW, SECRET), Err(TokenError::Expired));
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let token = sign_token(42, UnsubscribeScope::All, NOW + 3600, SECRET);
        assert_eq!(
            verify_token(&token, NOW, b"other-secret"),
            Err(TokenError::BadSignature)
        );
    }

    #[test]
    fn malformed_shapes_are_rejected() {
        assert_eq!(verify_token("", NOW, SECRET), Err(TokenError::Malformed));
        assert_eq!(
            verify_token("v1.42.all.123", NOW, SECRET),
            Err(TokenError::Malformed)
        );
        assert_eq!(
            verify_token("v2.42.all.123.deadbeef", NOW, SECRET),
            Err(TokenError::Malformed)
        );
        assert_eq!(
            verify_token("v1.notanumber.all.123.deadbeef", NOW, SECRET),
            Err(TokenError::Malformed)
        );
        assert_eq!(
            verify_token("v1.42.newsletter.123.deadbeef", NOW, SECRET),
            Err(TokenError::Malformed)
        );
    }
}
