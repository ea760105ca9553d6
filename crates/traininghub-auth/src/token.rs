//! Bearer Token Codec
//!
//! Compact HS256 tokens in the standard three-segment form:
//! `base64url(header) . base64url(claims) . base64url(hmac-sha256)`,
//! all segments unpadded. The header is fixed; claims carry the issuer,
//! issue/expiry timestamps and the subject's user id.
//!
//! Tokens are self-contained. There is no server-side session and no
//! revocation list; a token stays valid until its expiry no matter what
//! happens to the account in between. Refresh issues a fresh token anchored
//! at the current time for the same subject.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::{DateTime, Duration, Utc};
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use subtle::ConstantTimeEq;

use crate::config::TokenConfig;
use crate::error::{AuthError, AuthResult};

type HmacSha256 = Hmac<Sha256>;

/// Fixed token header. Field order is part of the wire format.
#[derive(Debug, Serialize, Deserialize)]
struct Header {
    typ: String,
    alg: String,
}

impl Header {
    fn hs256() -> Self {
        Self {
            typ: "JWT".to_string(),
            alg: "HS256".to_string(),
        }
    }
}

/// Token claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Issuer (the public site URL)
    pub iss: String,
    /// Issued-at, unix seconds
    pub iat: i64,
    /// Expiry, unix seconds
    pub exp: i64,
    /// Subject's user id
    pub user_id: i64,
}

/// Stateless HS256 token codec
#[derive(Clone)]
pub struct TokenCodec {
    config: TokenConfig,
}

impl TokenCodec {
    pub fn new(config: TokenConfig) -> Self {
        Self { config }
    }

    /// Issue a token for `user_id`, valid from `now` for the configured
    /// lifetime.
    pub fn issue(&self, user_id: i64, now: DateTime<Utc>) -> AuthResult<String> {
        let lifetime = Duration::from_std(self.config.token_lifetime)
            .map_err(|e| AuthError::Internal(e.to_string()))?;

        let claims = Claims {
            iss: self.config.issuer.clone(),
            iat: now.timestamp(),
            exp: (now + lifetime).timestamp(),
            user_id,
        };

        let header = serde_json::to_vec(&Header::hs256())
            .map_err(|e| AuthError::Internal(e.to_string()))?;
        let payload =
            serde_json::to_vec(&claims).map_err(|e| AuthError::Internal(e.to_string()))?;

        let signing_input = format!(
            "{}.{}",
            URL_SAFE_NO_PAD.encode(header),
            URL_SAFE_NO_PAD.encode(payload)
        );
        let signature = self.sign(signing_input.as_bytes())?;

        Ok(format!(
            "{}.{}",
            signing_input,
            URL_SAFE_NO_PAD.encode(signature)
        ))
    }

    /// Decode a token and return its claims.
    ///
    /// The signature is checked before the claims are parsed, in constant
    /// time. Expiry is checked against `now`; a token whose `exp` equals
    /// `now` is still valid.
    pub fn decode(&self, token: &str, now: DateTime<Utc>) -> AuthResult<Claims> {
        let mut segments = token.split('.');
        let (header_b64, payload_b64, signature_b64) =
            match (segments.next(), segments.next(), segments.next(), segments.next()) {
                (Some(h), Some(p), Some(s), None) => (h, p, s),
                _ => return Err(AuthError::InvalidToken),
            };

        let signing_input = format!("{}.{}", header_b64, payload_b64);
        let expected = self.sign(signing_input.as_bytes())?;
        let provided = URL_SAFE_NO_PAD
            .decode(signature_b64)
            .map_err(|_| AuthError::InvalidToken)?;

        if expected.ct_eq(&provided).unwrap_u8() != 1 {
            return Err(AuthError::InvalidToken);
        }

        let header_bytes = URL_SAFE_NO_PAD
            .decode(header_b64)
            .map_err(|_| AuthError::InvalidToken)?;
        let header: Header =
            serde_json::from_slice(&header_bytes).map_err(|_| AuthError::InvalidToken)?;
        if header.alg != "HS256" || header.typ != "JWT" {
            return Err(AuthError::InvalidToken);
        }

        let payload_bytes = URL_SAFE_NO_PAD
            .decode(payload_b64)
            .map_err(|_| AuthError::InvalidToken)?;
        let claims: Claims =
            serde_json::from_slice(&payload_bytes).map_err(|_| AuthError::InvalidToken)?;

        if claims.exp < now.timestamp() {
            return Err(AuthError::TokenExpired);
        }

        Ok(claims)
    }

    /// Issue a replacement token for the subject of a still-valid token.
    pub fn refresh(&self, token: &str, now: DateTime<Utc>) -> AuthResult<String> {
        let claims = self.decode(token, now)?;
        self.issue(claims.user_id, now)
    }

    fn sign(&self, input: &[u8]) -> AuthResult<Vec<u8>> {
        let mut mac = HmacSha256::new_from_slice(self.config.secret.as_bytes())
            .map_err(|e| AuthError::Internal(e.to_string()))?;
        mac.update(input);
        Ok(mac.finalize().into_bytes().to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_codec() -> TokenCodec {
        TokenCodec::new(TokenConfig {
            secret: "test-secret-key-for-tokens-min-32-bytes!".to_string(),
            issuer: "https://test.example".to_string(),
            token_lifetime: std::time::Duration::from_secs(30 * 24 * 60 * 60),
        })
    }

    #[test]
    fn test_issue_and_decode() {
        let codec = test_codec();
        let now = Utc::now();

        let token = codec.issue(42, now).unwrap();
        assert_eq!(token.split('.').count(), 3);

        let claims = codec.decode(&token, now).unwrap();
        assert_eq!(claims.user_id, 42);
        assert_eq!(claims.iss, "https://test.example");
        assert_eq!(claims.iat, now.timestamp());
        assert_eq!(claims.exp, now.timestamp() + 30 * 24 * 60 * 60);
    }

    #[test]
    fn test_header_wire_format() {
        let codec = test_codec();
        let token = codec.issue(1, Utc::now()).unwrap();

        let header_b64 = token.split('.').next().unwrap();
        let header = URL_SAFE_NO_PAD.decode(header_b64).unwrap();
        assert_eq!(header, br#"{"typ":"JWT","alg":"HS256"}"#);
    }

    #[test]
    fn test_expiry_boundary() {
        let codec = test_codec();
        let issued = Utc::now();
        let token = codec.issue(7, issued).unwrap();
        let exp = codec.decode(&token, issued).unwrap().exp;

        // Valid exactly at expiry
        let at_exp = DateTime::from_timestamp(exp, 0).unwrap();
        assert!(codec.decode(&token, at_exp).is_ok());

        // Expired one second later
        let past_exp = DateTime::from_timestamp(exp + 1, 0).unwrap();
        assert!(matches!(
            codec.decode(&token, past_exp),
            Err(AuthError::TokenExpired)
        ));
    }

    #[test]
    fn test_tampered_signature_rejected() {
        let codec = test_codec();
        let now = Utc::now();
        let token = codec.issue(42, now).unwrap();

        let mut chars: Vec<char> = token.chars().collect();
        let last = *chars.last().unwrap();
        *chars.last_mut().unwrap() = if last == 'A' { 'B' } else { 'A' };
        let tampered: String = chars.into_iter().collect();

        assert!(matches!(
            codec.decode(&tampered, now),
            Err(AuthError::InvalidToken)
        ));
    }

    #[test]
    fn test_tampered_payload_rejected() {
        let codec = test_codec();
        let now = Utc::now();
        let token = codec.issue(42, now).unwrap();

        let parts: Vec<&str> = token.split('.').collect();
        let forged_claims = Claims {
            iss: "https://test.example".to_string(),
            iat: now.timestamp(),
            exp: now.timestamp() + 3600,
            user_id: 1,
        };
        let forged_payload = URL_SAFE_NO_PAD.encode(serde_json::to_vec(&forged_claims).unwrap());
        let forged = format!("{}.{}.{}", parts[0], forged_payload, parts[2]);

        assert!(matches!(
            codec.decode(&forged, now),
            Err(AuthError::InvalidToken)
        ));
    }

    #[test]
    fn test_malformed_tokens_rejected() {
        let codec = test_codec();
        let now = Utc::now();

        for token in ["", "a.b", "a.b.c.d", "not-a-token", "!!.!!.!!"] {
            assert!(
                matches!(codec.decode(token, now), Err(AuthError::InvalidToken)),
                "token {:?} should be rejected",
                token
            );
        }
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let codec = test_codec();
        let other = TokenCodec::new(TokenConfig {
            secret: "a-completely-different-secret-32-bytes!!".to_string(),
            ..TokenConfig::default()
        });
        let now = Utc::now();

        let token = codec.issue(42, now).unwrap();
        assert!(matches!(
            other.decode(&token, now),
            Err(AuthError::InvalidToken)
        ));
    }

    #[test]
    fn test_refresh_reanchors_expiry() {
        let codec = test_codec();
        let issued = Utc::now();
        let token = codec.issue(42, issued).unwrap();

        let later = issued + Duration::days(10);
        let refreshed = codec.refresh(&token, later).unwrap();
        let claims = codec.decode(&refreshed, later).unwrap();

        assert_eq!(claims.user_id, 42);
        assert_eq!(claims.iat, later.timestamp());
        assert_eq!(claims.exp, later.timestamp() + 30 * 24 * 60 * 60);
    }

    #[test]
    fn test_refresh_rejects_expired_token() {
        let codec = test_codec();
        let issued = Utc::now();
        let token = codec.issue(42, issued).unwrap();

        let after_expiry = issued + Duration::days(31);
        assert!(matches!(
            codec.refresh(&token, after_expiry),
            Err(AuthError::TokenExpired)
        ));
    }
}
