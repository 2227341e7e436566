use thiserror::Error;

use super::credential::CredentialError;
use super::message::TemplateError;
use super::roster::RosterValidationError;

/// Core domain errors
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Input error: {message}")]
    Input { message: String },

    #[error("Output error: {message}")]
    Output { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },

    #[error("Template error: {0}")]
    Template(#[from] TemplateError),

    #[error("Credential error: {0}")]
    Credential(#[from] CredentialError),

    #[error("Roster error: {0}")]
    Roster(#[from] RosterValidationError),
}

impl DomainError {
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn input(message: impl Into<String>) -> Self {
        Self::Input {
            message: message.into(),
        }
    }

    pub fn output(message: impl Into<String>) -> Self {
        Self::Output {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}
