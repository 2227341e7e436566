use std::fmt::Debug;

use serde::Deserialize;

/// Signing secret used when `JWT_SECRET` is not configured. Development only.
pub const INSECURE_DEV_SECRET: &str = "your-secret-key-for-development";

/// Legacy environment variable names and the config keys they override
const LEGACY_ENV_OVERRIDES: [(&str, &str); 5] = [
    ("JWT_SECRET", "auth.secret"),
    ("BASE_URL", "links.base_url"),
    ("BREVO_API", "email.api_key"),
    ("EMAIL_FROM", "email.sender_email"),
    ("EMAIL_FROM_NAME", "email.sender_name"),
];

/// Application configuration
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub auth: AuthConfig,
    pub links: LinksConfig,
    pub email: EmailConfig,
    pub logging: LoggingConfig,
}

#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    pub secret: Option<String>,
    pub credential_ttl_days: i64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LinksConfig {
    pub base_url: String,
}

#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct EmailConfig {
    pub api_key: Option<String>,
    pub api_url: String,
    pub sender_email: String,
    pub sender_name: String,
    pub subject: String,
    pub template_path: String,
    /// Request timeout; `None` waits indefinitely
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            secret: None,
            credential_ttl_days: 7,
        }
    }
}

impl AuthConfig {
    /// The configured secret, or the development default when none is set
    pub fn signing_secret(&self) -> &str {
        match self.secret.as_deref() {
            Some(secret) if !secret.is_empty() => secret,
            _ => INSECURE_DEV_SECRET,
        }
    }

    pub fn uses_insecure_default(&self) -> bool {
        self.signing_secret() == INSECURE_DEV_SECRET
    }
}

impl Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("secret", &self.secret.as_ref().map(|_| "[hidden]"))
            .field("credential_ttl_days", &self.credential_ttl_days)
            .finish()
    }
}

impl Default for LinksConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000".to_string(),
        }
    }
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_url: "https://api.brevo.com/v3/smtp/email".to_string(),
            sender_email: "noreply@hackit.tw".to_string(),
            sender_name: "HackScore Team".to_string(),
            subject: "HackScore: 您的登錄鏈接".to_string(),
            template_path: "template/rating_email_invite.html".to_string(),
            timeout_secs: None,
        }
    }
}

impl EmailConfig {
    /// The provider API key, if one is configured and non-empty
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref().filter(|k| !k.is_empty())
    }
}

impl Debug for EmailConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EmailConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "[hidden]"))
            .field("api_url", &self.api_url)
            .field("sender_email", &self.sender_email)
            .field("sender_name", &self.sender_name)
            .field("subject", &self.subject)
            .field("template_path", &self.template_path)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
        }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_with(|name| std::env::var(name).ok())
    }

    /// Load configuration, resolving legacy variable names through `lookup`
    pub fn load_with<F>(lookup: F) -> Result<Self, config::ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut builder = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            );

        for (variable, key) in LEGACY_ENV_OVERRIDES {
            builder = builder.set_override_option(key, lookup(variable))?;
        }

        builder.build()?.try_deserialize()
    }
}
