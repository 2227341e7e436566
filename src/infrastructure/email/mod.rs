//! Email infrastructure - transactional email providers

mod brevo;

pub use brevo::BrevoEmailSender;
