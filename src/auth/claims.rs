//! Unverified decoding of the bearer token's payload.
//!
//! The storefront backend issues HMAC-signed JWTs. The client cannot verify
//! the signature (the key lives server-side), but the payload still carries
//! display data such as the email address and role. [`TokenClaims::decode`]
//! reads that payload without checking the signature or expiry; nothing in
//! the crate uses the result to make authentication decisions.

use chrono::{DateTime, Utc};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::Deserialize;

/// Claims carried by a storefront bearer token.
///
/// Every field is optional; a token that decodes but lacks a claim simply
/// leaves it `None`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenClaims {
    /// Subject, the user's email on tokens issued by the backend.
    pub sub: Option<String>,

    /// User email.
    pub email: Option<String>,

    /// User identifier.
    pub user_id: Option<String>,

    /// User role (`CUSTOMER`, `ADMIN`).
    pub role: Option<String>,

    /// Issued at (Unix timestamp).
    pub iat: Option<i64>,

    /// Expiration (Unix timestamp).
    pub exp: Option<i64>,
}

impl TokenClaims {
    /// Decodes the payload of `token` without verifying it.
    ///
    /// Returns `None` if the token is not a structurally valid JWT.
    ///
    /// # Example
    ///
    /// ```rust
    /// use eshop_client::auth::TokenClaims;
    ///
    /// assert!(TokenClaims::decode("opaque-token").is_none());
    /// ```
    #[must_use]
    pub fn decode(token: &str) -> Option<Self> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.insecure_disable_signature_validation();
        validation.algorithms = vec![Algorithm::HS256, Algorithm::HS384, Algorithm::HS512];
        validation.validate_exp = false;
        validation.validate_aud = false;
        validation.required_spec_claims.clear();

        let key = DecodingKey::from_secret(&[]);
        match decode::<Self>(token, &key, &validation) {
            Ok(data) => Some(data.claims),
            Err(error) => {
                tracing::debug!("Bearer token payload is not decodable: {}", error);
                None
            }
        }
    }

    /// Returns the expiration time, if the token carries one.
    #[must_use]
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.exp.and_then(|exp| DateTime::from_timestamp(exp, 0))
    }

    /// Returns the issue time, if the token carries one.
    #[must_use]
    pub fn issued_at(&self) -> Option<DateTime<Utc>> {
        self.iat.and_then(|iat| DateTime::from_timestamp(iat, 0))
    }

    /// Returns the best available display identity: `email`, then `sub`.
    #[must_use]
    pub fn display_email(&self) -> Option<&str> {
        self.email.as_deref().or(self.sub.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{encode, EncodingKey, Header};
    use serde_json::json;

    fn sign(claims: &serde_json::Value, algorithm: Algorithm) -> String {
        encode(
            &Header::new(algorithm),
            claims,
            &EncodingKey::from_secret(b"server-side-secret-the-client-never-sees"),
        )
        .unwrap()
    }

    #[test]
    fn test_decode_reads_backend_claims_without_key() {
        let token = sign(
            &json!({
                "sub": "a@b.com",
                "email": "a@b.com",
                "userId": "7f0c2a4e-9a57-4bd4-b0a5-2a4d8d9c1e11",
                "role": "CUSTOMER",
                "iat": 1_700_000_000,
                "exp": 1_700_086_400
            }),
            Algorithm::HS256,
        );

        let claims = TokenClaims::decode(&token).unwrap();
        assert_eq!(claims.email.as_deref(), Some("a@b.com"));
        assert_eq!(claims.role.as_deref(), Some("CUSTOMER"));
        assert_eq!(
            claims.user_id.as_deref(),
            Some("7f0c2a4e-9a57-4bd4-b0a5-2a4d8d9c1e11")
        );
        assert_eq!(claims.expires_at().unwrap().timestamp(), 1_700_086_400);
        assert_eq!(claims.issued_at().unwrap().timestamp(), 1_700_000_000);
    }

    #[test]
    fn test_decode_ignores_expiry() {
        let token = sign(&json!({"sub": "old@b.com", "exp": 1}), Algorithm::HS256);
        let claims = TokenClaims::decode(&token).unwrap();
        assert_eq!(claims.display_email(), Some("old@b.com"));
    }

    #[test]
    fn test_decode_accepts_hs512_tokens() {
        let token = sign(&json!({"sub": "x@y.com"}), Algorithm::HS512);
        assert!(TokenClaims::decode(&token).is_some());
    }

    #[test]
    fn test_decode_rejects_non_jwt() {
        assert!(TokenClaims::decode("").is_none());
        assert!(TokenClaims::decode("tok123").is_none());
        assert!(TokenClaims::decode("a.b.c").is_none());
    }

    #[test]
    fn test_display_email_prefers_email_claim() {
        let claims = TokenClaims {
            sub: Some("subject".to_string()),
            email: Some("mail@b.com".to_string()),
            user_id: None,
            role: None,
            iat: None,
            exp: None,
        };
        assert_eq!(claims.display_email(), Some("mail@b.com"));
    }
}
