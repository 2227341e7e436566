//! Invitation email template parsing and rendering
//!
//! A template is an HTML document carrying two literal markers:
//! - `{{ memberName }}` - replaced by the recipient's display name
//! - `<!-- Login button will be inserted here by the script -->` - replaced by
//!   the login button
//!
//! Both markers are required. A template without them would ship a message
//! with no name or no way to log in, so parsing rejects it.

use thiserror::Error;

/// Marker replaced by the recipient's display name
pub const MEMBER_NAME_PLACEHOLDER: &str = "{{ memberName }}";

/// Marker replaced by the login button
pub const LOGIN_BUTTON_PLACEHOLDER: &str =
    "<!-- Login button will be inserted here by the script -->";

/// Template processing errors
#[derive(Debug, Clone, Error, PartialEq)]
pub enum TemplateError {
    #[error("Template is missing required placeholder: {placeholder}")]
    MissingPlaceholder { placeholder: &'static str },

    #[error("Template is empty")]
    Empty,
}

/// A validated invitation template
#[derive(Debug, Clone, PartialEq)]
pub struct EmailTemplate {
    content: String,
}

impl EmailTemplate {
    /// Parse a template and check that every required placeholder is present
    pub fn parse(content: impl Into<String>) -> Result<Self, TemplateError> {
        let content = content.into();

        if content.trim().is_empty() {
            return Err(TemplateError::Empty);
        }

        for placeholder in [MEMBER_NAME_PLACEHOLDER, LOGIN_BUTTON_PLACEHOLDER] {
            if !content.contains(placeholder) {
                return Err(TemplateError::MissingPlaceholder { placeholder });
            }
        }

        Ok(Self { content })
    }

    /// Substitute both placeholders. Values are inserted verbatim.
    pub fn render(&self, member_name: &str, login_button: &str) -> String {
        self.content
            .replace(MEMBER_NAME_PLACEHOLDER, member_name)
            .replace(LOGIN_BUTTON_PLACEHOLDER, login_button)
    }
}
