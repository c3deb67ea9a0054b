//! JWT access and refresh token handling
//!
//! Access tokens embed a snapshot of the caller's permission ids taken at
//! issue time. Revoking a permission from a role has no effect on tokens
//! already in the wild; they age out with the short access TTL.

use std::fmt;

use anyhow::{Result, anyhow};
use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::constants::{ACCESS_TOKEN_TTL_MINUTES, REFRESH_TOKEN_TTL_HOURS};

/// JWT validation error
#[derive(Debug)]
pub enum JwtError {
    /// Token has expired
    Expired,
    /// Token signature is invalid
    InvalidSignature,
    /// Other validation error
    Invalid(String),
}

impl fmt::Display for JwtError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Expired => write!(f, "Token has expired"),
            Self::InvalidSignature => write!(f, "Invalid token signature"),
            Self::Invalid(msg) => write!(f, "Invalid token: {}", msg),
        }
    }
}

impl std::error::Error for JwtError {}

/// JWT claims for access tokens
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessClaims {
    /// User id
    pub sub: i64,
    /// Permission id snapshot, fixed at issue time
    pub permissions: Vec<i64>,
    pub iat: i64,
    pub exp: i64,
}

impl AccessClaims {
    pub fn new(user_id: i64, permissions: Vec<i64>) -> Self {
        let now = Utc::now();
        let exp = now + Duration::minutes(ACCESS_TOKEN_TTL_MINUTES);

        Self {
            sub: user_id,
            permissions,
            iat: now.timestamp(),
            exp: exp.timestamp(),
        }
    }

    /// Get the user id from claims
    pub fn user_id(&self) -> i64 {
        self.sub
    }
}

/// JWT claims for refresh tokens
///
/// Carries no permission snapshot; refreshing recomputes it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshClaims {
    pub sub: i64,
    pub iat: i64,
    pub exp: i64,
    pub jti: String,
}

impl RefreshClaims {
    pub fn new(user_id: i64) -> Self {
        let now = Utc::now();
        let exp = now + Duration::hours(REFRESH_TOKEN_TTL_HOURS);

        Self {
            sub: user_id,
            iat: now.timestamp(),
            exp: exp.timestamp(),
            jti: Uuid::new_v4().to_string(),
        }
    }
}

/// Create a signed access token with a permission snapshot
pub fn create_access_token(
    signing_key: &[u8],
    user_id: i64,
    permissions: Vec<i64>,
) -> Result<String> {
    let claims = AccessClaims::new(user_id, permissions);
    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(signing_key),
    )
    .map_err(|e| anyhow!("Failed to create access token: {}", e))
}

/// Create a signed refresh token
pub fn create_refresh_token(signing_key: &[u8], user_id: i64) -> Result<String> {
    let claims = RefreshClaims::new(user_id);
    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(signing_key),
    )
    .map_err(|e| anyhow!("Failed to create refresh token: {}", e))
}

/// Validate and decode an access token
pub fn validate_access_token(token: &str, signing_key: &[u8]) -> Result<AccessClaims, JwtError> {
    decode_claims(token, signing_key)
}

/// Validate and decode a refresh token
pub fn validate_refresh_token(token: &str, signing_key: &[u8]) -> Result<RefreshClaims, JwtError> {
    decode_claims(token, signing_key)
}

fn decode_claims<T: serde::de::DeserializeOwned>(
    token: &str,
    signing_key: &[u8],
) -> Result<T, JwtError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = true;

    let token_data = decode::<T>(token, &DecodingKey::from_secret(signing_key), &validation)
        .map_err(|e| match e.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => JwtError::Expired,
            jsonwebtoken::errors::ErrorKind::InvalidSignature => JwtError::InvalidSignature,
            _ => JwtError::Invalid(e.to_string()),
        })?;

    Ok(token_data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_key() -> Vec<u8> {
        vec![0u8; 32]
    }

    #[test]
    fn test_access_token_roundtrip() {
        let key = test_key();
        let token = create_access_token(&key, 42, vec![5, 7]).unwrap();
        let claims = validate_access_token(&token, &key).unwrap();
        assert_eq!(claims.user_id(), 42);
        assert_eq!(claims.permissions, vec![5, 7]);
    }

    #[test]
    fn test_refresh_token_roundtrip() {
        let key = test_key();
        let token = create_refresh_token(&key, 42).unwrap();
        let claims = validate_refresh_token(&token, &key).unwrap();
        assert_eq!(claims.sub, 42);
        assert!(!claims.jti.is_empty());
    }

    #[test]
    fn test_invalid_signature() {
        let key1 = vec![0u8; 32];
        let key2 = vec![1u8; 32];
        let token = create_access_token(&key1, 1, vec![]).unwrap();
        assert!(matches!(
            validate_access_token(&token, &key2),
            Err(JwtError::InvalidSignature)
        ));
    }

    #[test]
    fn test_expired_token() {
        let key = test_key();
        let claims = AccessClaims {
            sub: 1,
            permissions: vec![],
            iat: 0,
            exp: 1,
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(&key),
        )
        .unwrap();
        assert!(matches!(
            validate_access_token(&token, &key),
            Err(JwtError::Expired)
        ));
    }

    #[test]
    fn test_refresh_token_rejected_as_access() {
        // A refresh token has no permissions claim, so it cannot pass
        // access validation
        let key = test_key();
        let token = create_refresh_token(&key, 42).unwrap();
        assert!(matches!(
            validate_access_token(&token, &key),
            Err(JwtError::Invalid(_))
        ));
    }

    #[test]
    fn test_access_token_rejected_as_refresh() {
        let key = test_key();
        let token = create_access_token(&key, 42, vec![1]).unwrap();
        assert!(matches!(
            validate_refresh_token(&token, &key),
            Err(JwtError::Invalid(_))
        ));
    }

    #[test]
    fn test_unique_jti() {
        let c1 = RefreshClaims::new(1);
        let c2 = RefreshClaims::new(1);
        assert_ne!(c1.jti, c2.jti);
    }
}
