//! Roster domain - teams and the people who receive credentials

mod entity;
mod validation;

pub use entity::{Identity, Roster, RosterMember, Team};
pub use validation::{require_field, validate_email, RosterValidationError};
