//! Unsigned access-token inspection
//!
//! Decodes the payload segment of the dot-delimited access token to read its
//! `exp` claim. No signature verification happens here: this is a UX hint to
//! avoid sending obviously dead tokens, never a security boundary. The server
//! remains the sole authority on credential validity.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct Claims {
    #[serde(default)]
    exp: Option<i64>,
}

/// Seconds since the Unix epoch
pub(crate) fn now_ts() -> i64 {
    #[cfg(target_arch = "wasm32")]
    {
        (js_sys::Date::now() / 1000.0) as i64
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        use std::time::{SystemTime, UNIX_EPOCH};
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_secs() as i64)
            .unwrap_or(0)
    }
}

fn decode_claims(token: &str) -> Option<Claims> {
    let payload = token.split('.').nth(1)?;
    let bytes = URL_SAFE_NO_PAD.decode(payload.trim_end_matches('=')).ok()?;
    serde_json::from_slice(&bytes).ok()
}

/// Fail-closed expiry check: anything undecodable counts as expired
pub fn is_expired(token: &str, now: i64) -> bool {
    match decode_claims(token) {
        Some(Claims { exp: Some(exp) }) => exp < now,
        Some(Claims { exp: None }) => {
            tracing::debug!("access token carries no exp claim, treating as expired");
            true
        }
        None => {
            tracing::debug!("access token payload did not decode, treating as expired");
            true
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::Engine;
    use base64::engine::general_purpose::{URL_SAFE, URL_SAFE_NO_PAD};

    fn token_with_payload(payload: &str) -> String {
        let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
        let payload = URL_SAFE_NO_PAD.encode(payload.as_bytes());
        format!("{header}.{payload}.signature")
    }

    #[test]
    fn expired_when_token_has_no_segments() {
        assert!(is_expired("justonesegment", 1_000));
    }

    #[test]
    fn expired_when_payload_is_not_base64() {
        assert!(is_expired("header.!!!not-base64!!!.signature", 1_000));
    }

    #[test]
    fn expired_when_payload_is_not_json() {
        let payload = URL_SAFE_NO_PAD.encode(b"definitely not json");
        assert!(is_expired(&format!("h.{payload}.s"), 1_000));
    }

    #[test]
    fn expired_when_exp_claim_missing() {
        assert!(is_expired(&token_with_payload(r#"{"sub":"u1"}"#), 1_000));
    }

    #[test]
    fn expired_when_exp_in_past() {
        assert!(is_expired(&token_with_payload(r#"{"exp":500}"#), 1_000));
    }

    #[test]
    fn valid_when_exp_in_future() {
        assert!(!is_expired(&token_with_payload(r#"{"exp":2000}"#), 1_000));
    }

    #[test]
    fn tolerates_padded_base64_payload() {
        let payload = URL_SAFE.encode(r#"{"exp":12345}"#);
        assert!(payload.ends_with('='));
        assert!(!is_expired(&format!("h.{payload}.s"), 1_000));
    }
}
