//! Authentication manager

use anyhow::Result;

use super::jwt::{
    AccessClaims, JwtError, RefreshClaims, create_access_token, create_refresh_token,
    validate_access_token, validate_refresh_token,
};
use crate::core::config::AuthConfig;
use crate::utils::crypto;

/// Main authentication manager
///
/// Owns the HS256 signing key and issues/validates both token kinds.
pub struct AuthManager {
    signing_key: Vec<u8>,
}

impl AuthManager {
    /// Initialize the authentication manager
    ///
    /// Uses the configured signing key when present; otherwise generates
    /// an ephemeral one, which invalidates outstanding tokens on restart.
    pub fn init(config: &AuthConfig) -> Result<Self> {
        let signing_key = match &config.signing_key {
            Some(hex_key) => crypto::decode_signing_key(hex_key)?,
            None => {
                tracing::warn!(
                    "No JWT signing key configured, generating an ephemeral key; \
                     sessions will not survive a restart"
                );
                crypto::generate_signing_key()
            }
        };

        Ok(Self { signing_key })
    }

    /// Issue an access token carrying the user's permission snapshot
    pub fn issue_access_token(&self, user_id: i64, permissions: Vec<i64>) -> Result<String> {
        create_access_token(&self.signing_key, user_id, permissions)
    }

    /// Issue a refresh token
    pub fn issue_refresh_token(&self, user_id: i64) -> Result<String> {
        create_refresh_token(&self.signing_key, user_id)
    }

    /// Validate an access token
    pub fn validate_access(&self, token: &str) -> Result<AccessClaims, JwtError> {
        validate_access_token(token, &self.signing_key)
    }

    /// Validate a refresh token
    pub fn validate_refresh(&self, token: &str) -> Result<RefreshClaims, JwtError> {
        validate_refresh_token(token, &self.signing_key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_manager() -> AuthManager {
        AuthManager::init(&AuthConfig {
            signing_key: Some(hex::encode([7u8; 32])),
            admin_password: None,
        })
        .unwrap()
    }

    #[test]
    fn test_issue_and_validate() {
        let manager = test_manager();
        let token = manager.issue_access_token(3, vec![1, 2]).unwrap();
        let claims = manager.validate_access(&token).unwrap();
        assert_eq!(claims.sub, 3);
        assert_eq!(claims.permissions, vec![1, 2]);
    }

    #[test]
    fn test_generated_key_when_unset() {
        let manager = AuthManager::init(&AuthConfig {
            signing_key: None,
            admin_password: None,
        })
        .unwrap();
        let token = manager.issue_refresh_token(1).unwrap();
        assert!(manager.validate_refresh(&token).is_ok());
    }

    #[test]
    fn test_rejects_short_key() {
        let result = AuthManager::init(&AuthConfig {
            signing_key: Some("0011".to_string()),
            admin_password: None,
        });
        assert!(result.is_err());
    }
}
