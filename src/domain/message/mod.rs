//! Message domain - invitation templates and rendered emails

mod template;

pub use template::{EmailTemplate, TemplateError, LOGIN_BUTTON_PLACEHOLDER, MEMBER_NAME_PLACEHOLDER};

/// A personalized HTML invitation, ready for dispatch
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedMessage {
    pub login_url: String,
    pub html: String,
}

impl RenderedMessage {
    pub fn new(login_url: impl Into<String>, html: impl Into<String>) -> Self {
        Self {
            login_url: login_url.into(),
            html: html.into(),
        }
    }
}
