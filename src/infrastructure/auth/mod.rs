//! Authentication infrastructure module
//!
//! This module signs and verifies judge credentials.

mod jwt;

pub use jwt::{CredentialIssuer, MAX_CREDENTIAL_TTL_DAYS};
