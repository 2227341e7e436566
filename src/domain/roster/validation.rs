//! Roster member validation utilities

use thiserror::Error;

/// Errors that can occur while turning a roster member into an identity
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RosterValidationError {
    #[error("Member is missing required field '{0}'")]
    MissingField(&'static str),

    #[error("Member field '{0}' cannot be blank")]
    BlankField(&'static str),

    #[error("Invalid email address: '{0}'")]
    InvalidEmail(String),
}

/// Validate that a required member field is present and not blank
pub fn require_field<'a>(
    value: Option<&'a str>,
    field: &'static str,
) -> Result<&'a str, RosterValidationError> {
    let value = value.ok_or(RosterValidationError::MissingField(field))?;

    if value.trim().is_empty() {
        return Err(RosterValidationError::BlankField(field));
    }

    Ok(value)
}

/// Validate an email address
///
/// Rules:
/// - Exactly one `@`
/// - Non-empty local part and domain
/// - No whitespace
pub fn validate_email(email: &str) -> Result<(), RosterValidationError> {
    let invalid = || RosterValidationError::InvalidEmail(email.to_string());

    if email.chars().any(char::is_whitespace) {
        return Err(invalid());
    }

    let (local, domain) = email.split_once('@').ok_or_else(invalid)?;

    if local.is_empty() || domain.is_empty() || domain.contains('@') {
        return Err(invalid());
    }

    Ok(())
}
