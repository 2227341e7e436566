//! Judge credential issuance and verification (HS256 JWT)

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use std::fmt::Debug;
use tracing::warn;

use crate::config::AuthConfig;
use crate::domain::{CredentialClaims, CredentialError, DomainError, Identity, SignedToken};

/// Longest credential lifetime accepted from configuration
pub const MAX_CREDENTIAL_TTL_DAYS: i64 = 365;

/// Signs and verifies judge credentials with a shared secret
#[derive(Clone)]
pub struct CredentialIssuer {
    ttl: Duration,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl Debug for CredentialIssuer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialIssuer")
            .field("ttl", &self.ttl)
            .field("encoding_key", &"[hidden]")
            .field("decoding_key", &"[hidden]")
            .finish()
    }
}

impl CredentialIssuer {
    /// Create an issuer from the auth configuration.
    ///
    /// The TTL must be between 1 and [`MAX_CREDENTIAL_TTL_DAYS`] days.
    /// Falls back to the development secret when none is configured, which
    /// makes every issued token forgeable. A warning is logged in that case.
    pub fn new(config: &AuthConfig) -> Result<Self, DomainError> {
        let days = config.credential_ttl_days;
        if !(1..=MAX_CREDENTIAL_TTL_DAYS).contains(&days) {
            return Err(DomainError::configuration(format!(
                "credential_ttl_days must be between 1 and {}, got {}",
                MAX_CREDENTIAL_TTL_DAYS, days
            )));
        }

        if config.uses_insecure_default() {
            warn!("JWT_SECRET is not set; signing with the insecure development secret");
        }

        Ok(Self::with_secret(config.signing_secret(), Duration::days(days)))
    }

    pub fn with_secret(secret: &str, ttl: Duration) -> Self {
        Self {
            ttl,
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
        }
    }

    /// Issue a judge credential valid from now
    pub fn issue(&self, identity: &Identity) -> Result<SignedToken, CredentialError> {
        self.issue_at(identity, Utc::now())
    }

    /// Issue a judge credential as of `issued_at`
    pub fn issue_at(
        &self,
        identity: &Identity,
        issued_at: DateTime<Utc>,
    ) -> Result<SignedToken, CredentialError> {
        let claims = CredentialClaims::judge(identity, issued_at, self.ttl)?;

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map(SignedToken::new)
            .map_err(|e| CredentialError::Signing(e.to_string()))
    }

    /// Verify a token's signature and expiry and return its claims
    pub fn verify(&self, token: &str) -> Result<CredentialClaims, CredentialError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        decode::<CredentialClaims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => CredentialError::Expired,
                ErrorKind::InvalidSignature => CredentialError::InvalidSignature,
                _ => CredentialError::Malformed(e.to_string()),
            })
    }
}
