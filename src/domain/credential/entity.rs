//! Credential entities

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::roster::Identity;

/// Errors raised while signing or verifying a credential
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CredentialError {
    #[error("Token has expired")]
    Expired,

    #[error("Token signature is invalid")]
    InvalidSignature,

    #[error("Malformed token: {0}")]
    Malformed(String),

    #[error("Failed to sign token: {0}")]
    Signing(String),
}

/// Claims carried by every judge credential
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialClaims {
    pub email: String,
    pub user_id: String,
    pub team_id: String,
    pub is_admin: bool,
    pub is_judge: bool,
    /// Expiration timestamp (Unix epoch seconds)
    #[serde(rename = "exp")]
    pub expires_at: i64,
}

impl CredentialClaims {
    /// Build judge claims for an identity, valid for `ttl` from `issued_at`
    pub fn judge(
        identity: &Identity,
        issued_at: DateTime<Utc>,
        ttl: Duration,
    ) -> Result<Self, CredentialError> {
        let expires_at = issued_at.checked_add_signed(ttl).ok_or_else(|| {
            CredentialError::Signing(format!("Expiry overflows {} + {}", issued_at, ttl))
        })?;

        Ok(Self {
            email: identity.email().to_string(),
            user_id: identity.user_id().to_string(),
            team_id: identity.team_id().to_string(),
            is_admin: false,
            is_judge: true,
            expires_at: expires_at.timestamp(),
        })
    }

    pub fn expires_at_utc(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.expires_at, 0)
    }
}

/// An encoded, signed credential
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SignedToken(String);

impl SignedToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SignedToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One line of the token output file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenRecord {
    pub name: String,
    pub email: String,
    pub token: SignedToken,
    pub login_url: String,
}

impl TokenRecord {
    pub fn new(identity: &Identity, token: SignedToken, login_url: impl Into<String>) -> Self {
        Self {
            name: identity.name_zh().to_string(),
            email: identity.email().to_string(),
            token,
            login_url: login_url.into(),
        }
    }
}
