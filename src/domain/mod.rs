//! Domain layer - Core business logic and entities

pub mod credential;
pub mod dispatch;
pub mod error;
pub mod message;
pub mod roster;

pub use credential::{CredentialClaims, CredentialError, SignedToken, TokenRecord};
pub use dispatch::{DispatchResult, EmailSender};
pub use error::DomainError;
pub use message::{EmailTemplate, RenderedMessage, TemplateError};
pub use roster::{Identity, Roster, RosterMember, RosterValidationError, Team};
