//! Judge Invites
//!
//! Batch provisioning of judge credentials:
//! - Signed, seven-day HS256 credentials per roster member
//! - Personalized invitation emails with a one-click login link
//! - Delivery through the Brevo transactional email API
//! - Dry-run and token-file modes that never send

pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;
