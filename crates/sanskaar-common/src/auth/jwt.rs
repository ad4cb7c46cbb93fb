//! JWT validation
//!
//! Sessions are issued by the platform's auth service; this service only
//! checks the HMAC signature and expiry and reads the user id from `sub`.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, errors::ErrorKind, DecodingKey, EncodingKey, Header, Validation};
use sanskaar_core::Snowflake;
use serde::{Deserialize, Serialize};

use crate::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenType {
    #[default]
    Access,
    Refresh,
}

/// JWT claims structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
    /// Absent on tokens minted before typed tokens existed
    #[serde(default)]
    pub token_type: TokenType,
}

impl Claims {
    /// # Errors
    /// Returns an error if the subject cannot be parsed as a Snowflake
    pub fn user_id(&self) -> Result<Snowflake, AppError> {
        Snowflake::parse(&self.sub).map_err(|_| AppError::InvalidToken)
    }
}

/// Validates bearer tokens against the shared secret
#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl JwtService {
    #[must_use]
    pub fn new(secret: &str) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
        }
    }

    /// Decode and verify signature and expiry
    ///
    /// # Errors
    /// `TokenExpired` past `exp`, `InvalidToken` for anything else
    pub fn decode_token(&self, token: &str) -> Result<Claims, AppError> {
        decode::<Claims>(token, &self.decoding_key, &Validation::default())
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => AppError::TokenExpired,
                _ => AppError::InvalidToken,
            })
    }

    /// Validate an access token and return the caller's user id
    ///
    /// # Errors
    /// Returns an error if the token is invalid, expired, or a refresh token
    pub fn authenticate(&self, token: &str) -> Result<Snowflake, AppError> {
        let claims = self.decode_token(token)?;
        if claims.token_type != TokenType::Access {
            return Err(AppError::InvalidToken);
        }
        claims.user_id()
    }

    /// Mint an access token, for local tooling and tests
    ///
    /// # Errors
    /// Returns an error if encoding fails
    pub fn issue_access_token(&self, user_id: Snowflake, ttl: Duration) -> Result<String, AppError> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id.to_string(),
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
            token_type: TokenType::Access,
        };
        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::internal(anyhow::anyhow!("failed to encode JWT: {e}")))
    }
}

impl std::fmt::Debug for JwtService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtService").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> JwtService {
        JwtService::new("test-secret-key-that-is-long-enough")
    }

    #[test]
    fn test_issue_and_authenticate() {
        let svc = service();
        let token = svc
            .issue_access_token(Snowflake::new(12345), Duration::minutes(15))
            .unwrap();
        assert_eq!(svc.authenticate(&token).unwrap(), Snowflake::new(12345));
    }

    #[test]
    fn test_expired_token() {
        let svc = service();
        // past the default 60s leeway
        let token = svc
            .issue_access_token(Snowflake::new(1), Duration::minutes(-5))
            .unwrap();
        assert!(matches!(svc.authenticate(&token), Err(AppError::TokenExpired)));
    }

    #[test]
    fn test_wrong_secret() {
        let token = service()
            .issue_access_token(Snowflake::new(1), Duration::minutes(5))
            .unwrap();
        let other = JwtService::new("another-secret-key-entirely");
        assert!(matches!(other.authenticate(&token), Err(AppError::InvalidToken)));
    }

    #[test]
    fn test_refresh_token_rejected() {
        let svc = service();
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: "7".into(),
            iat: now,
            exp: now + 600,
            token_type: TokenType::Refresh,
        };
        let token = encode(&Header::default(), &claims, &svc.encoding_key).unwrap();
        assert!(svc.decode_token(&token).is_ok());
        assert!(matches!(svc.authenticate(&token), Err(AppError::InvalidToken)));
    }

    #[test]
    fn test_untyped_claims_default_to_access() {
        let claims: Claims =
            serde_json::from_str(r#"{"sub":"42","iat":0,"exp":9999999999}"#).unwrap();
        assert_eq!(claims.token_type, TokenType::Access);
        assert_eq!(claims.user_id().unwrap(), Snowflake::new(42));
    }

    #[test]
    fn test_garbage_token() {
        assert!(matches!(
            service().authenticate("invalid.token.here"),
            Err(AppError::InvalidToken)
        ));
    }
}
