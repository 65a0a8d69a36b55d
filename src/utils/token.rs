use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use uuid::Uuid;

use crate::config::JwtConfig;
use crate::types::error::AppError;
use crate::types::token::{Claims, TokenError};

pub fn new_id() -> Uuid {
    Uuid::new_v4()
}

/// Issues and checks HS256 bearer tokens with a process-wide secret.
///
/// Tokens are stateless: nothing is stored server side, so expiry is the only
/// lifetime bound.
#[derive(Clone)]
pub struct TokenIssuer {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl TokenIssuer {
    pub fn new(secret: &[u8], ttl: Duration) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            ttl,
        }
    }

    pub fn from_config(cfg: &JwtConfig) -> Self {
        Self::new(cfg.secret.as_bytes(), Duration::minutes(cfg.ttl_minutes))
    }

    /// Token for `subject` using the configured lifetime.
    pub fn issue_default(&self, subject: &str) -> Result<String, AppError> {
        self.issue(subject, self.ttl)
    }

    pub fn issue(&self, subject: &str, ttl: Duration) -> Result<String, AppError> {
        self.issue_at(subject, Utc::now(), ttl)
    }

    pub fn issue_at(
        &self,
        subject: &str,
        issued_at: DateTime<Utc>,
        ttl: Duration,
    ) -> Result<String, AppError> {
        let claims = Claims {
            sub: subject.to_string(),
            iat: issued_at.timestamp(),
            exp: (issued_at + ttl).timestamp(),
        };
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding).map_err(|e| {
            tracing::error!("JWT encoding error: {e}");
            AppError::Internal(format!("token issuance failed: {e}"))
        })
    }

    /// Signature first, then expiry. Anything shaped like a compact JWT that
    /// does not verify under our key counts as a bad signature.
    pub fn validate(&self, token: &str) -> Result<Claims, TokenError> {
        if !Self::is_compact(token) {
            return Err(TokenError::Malformed);
        }

        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.validate_nbf = false;
        validation.leeway = 0;

        let data = decode::<Claims>(token, &self.decoding, &validation).map_err(|e| match e.kind() {
            ErrorKind::ExpiredSignature => TokenError::Expired,
            ErrorKind::InvalidToken | ErrorKind::MissingRequiredClaim(_) => TokenError::Malformed,
            _ => TokenError::InvalidSignature,
        })?;

        if data.claims.sub.is_empty() {
            return Err(TokenError::Malformed);
        }
        Ok(data.claims)
    }

    fn is_compact(token: &str) -> bool {
        let parts: Vec<&str> = token.split('.').collect();
        parts.len() == 3 && parts.iter().all(|p| !p.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn issuer() -> TokenIssuer {
        TokenIssuer::new(b"unit-test-secret", Duration::minutes(30))
    }

    #[test]
    fn fresh_token_round_trips_subject() {
        let tokens = issuer();
        let token = tokens.issue("alice", Duration::minutes(5)).unwrap();
        let claims = tokens.validate(&token).unwrap();
        assert_eq!(claims.sub, "alice");
        assert_eq!(claims.exp - claims.iat, 300);
    }

    #[test]
    fn token_past_expiry_is_expired() {
        let tokens = issuer();
        let issued = Utc::now() - Duration::hours(2);
        let token = tokens.issue_at("alice", issued, Duration::hours(1)).unwrap();
        assert_eq!(tokens.validate(&token), Err(TokenError::Expired));
    }

    #[test]
    fn every_bit_flip_breaks_the_signature() {
        let tokens = issuer();
        let token = tokens.issue("alice", Duration::minutes(5)).unwrap();
        let bytes = token.as_bytes();
        for i in 0..bytes.len() {
            if bytes[i] == b'.' {
                continue;
            }
            let mut flipped = bytes.to_vec();
            flipped[i] ^= 0x01;
            let flipped = String::from_utf8(flipped).unwrap();
            assert_eq!(
                tokens.validate(&flipped),
                Err(TokenError::InvalidSignature),
                "position {i} accepted"
            );
        }
    }

    #[test]
    fn foreign_key_is_rejected() {
        let other = TokenIssuer::new(b"someone-else", Duration::minutes(30));
        let token = other.issue_default("alice").unwrap();
        assert_eq!(issuer().validate(&token), Err(TokenError::InvalidSignature));
    }

    #[test]
    fn signing_failure_is_an_internal_error() {
        // an Ed25519 key cannot sign an HS256 header
        let broken = TokenIssuer {
            encoding: EncodingKey::from_ed_der(&[0u8; 48]),
            decoding: DecodingKey::from_secret(b"unit-test-secret"),
            ttl: Duration::minutes(30),
        };
        assert!(matches!(broken.issue_default("alice"), Err(AppError::Internal(_))));
    }

    #[test]
    fn structurally_broken_tokens_are_malformed() {
        let tokens = issuer();
        for t in ["", "abc", "a.b", "a..c", "a.b.c.d"] {
            assert_eq!(tokens.validate(t), Err(TokenError::Malformed), "{t:?}");
        }
    }
}
