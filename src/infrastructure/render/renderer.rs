//! Invitation rendering: login links, template substitution and fallback

use reqwest::Url;
use tracing::debug;

use crate::config::LinksConfig;
use crate::domain::{DomainError, EmailTemplate, Identity, RenderedMessage, SignedToken};

/// Query parameter the login page reads the credential from
const AUTH_QUERY_PARAM: &str = "auth";

/// Builds login links and personalized invitation HTML
#[derive(Debug, Clone)]
pub struct MessageRenderer {
    base_url: Url,
}

impl MessageRenderer {
    /// Create a renderer for the configured base URL.
    ///
    /// The base URL may carry a path but no query or fragment: the login
    /// link owns the query string.
    pub fn new(config: &LinksConfig) -> Result<Self, DomainError> {
        let base_url = Url::parse(&config.base_url).map_err(|e| {
            DomainError::configuration(format!("Invalid BASE_URL '{}': {}", config.base_url, e))
        })?;

        if base_url.cannot_be_a_base() {
            return Err(DomainError::configuration(format!(
                "BASE_URL '{}' cannot be used as a base for login links",
                config.base_url
            )));
        }

        if base_url.query().is_some() || base_url.fragment().is_some() {
            return Err(DomainError::configuration(format!(
                "BASE_URL '{}' must not contain a query string or fragment",
                config.base_url
            )));
        }

        Ok(Self { base_url })
    }

    /// `{base_url}/login?auth={token}`
    pub fn login_url(&self, token: &SignedToken) -> String {
        let mut url = self.base_url.clone();

        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push("login");
        }
        url.query_pairs_mut()
            .clear()
            .append_pair(AUTH_QUERY_PARAM, token.as_str());

        url.into()
    }

    /// Render the invitation for one recipient.
    ///
    /// Uses `template` when given, otherwise a built-in fallback document.
    pub fn render(
        &self,
        identity: &Identity,
        token: &SignedToken,
        template: Option<&EmailTemplate>,
    ) -> RenderedMessage {
        let login_url = self.login_url(token);
        let member_name = escape_html(&identity.display_name());
        let href = escape_html(&login_url);

        let html = match template {
            Some(template) => template.render(&member_name, &login_button(&href)),
            None => {
                debug!(email = %identity.email(), "Rendering fallback invitation");
                fallback_document(&member_name, &href)
            }
        };

        RenderedMessage::new(login_url, html)
    }
}

fn login_button(href: &str) -> String {
    format!(
        r#"
        <div style="text-align: center; margin: 30px 0;">
            <a href="{href}" style="background-color: #2ecc71; color: white; text-decoration: none; padding: 15px 30px; border-radius: 8px; font-weight: bold; font-size: 16px;">點擊此處登錄HackScore系統</a>
        </div>
    "#
    )
}

fn fallback_document(member_name: &str, href: &str) -> String {
    format!(
        r#"<html>
<body>
    <h2>歡迎使用HackScore!</h2>
    <p>您好，{member_name},</p>
    <p>我們誠摯地邀請您擔任本次黑客松的評委。</p>
    <p>請使用以下鏈接登錄：</p>
    <p><a href="{href}">{href}</a></p>
    <p>此鏈接將在7天後過期。</p>
    <p>感謝您的參與！</p>
</body>
</html>
"#
    )
}

fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
