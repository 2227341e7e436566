//! Credential domain - judge claims, signed tokens and token records

mod entity;

pub use entity::{CredentialClaims, CredentialError, SignedToken, TokenRecord};
