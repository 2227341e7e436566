//! Brevo transactional email sender

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use std::time::Duration;
use tracing::{info, warn};

use crate::config::EmailConfig;
use crate::domain::{DispatchResult, DomainError, EmailSender, Identity, RenderedMessage};

/// Maximum number of characters of a provider error body kept in diagnostics
const MAX_DETAIL_CHARS: usize = 1000;

#[derive(Debug, Serialize)]
struct Contact<'a> {
    name: &'a str,
    email: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SendEmailRequest<'a> {
    sender: Contact<'a>,
    to: Vec<Contact<'a>>,
    subject: &'a str,
    html_content: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SendEmailResponse {
    message_id: Option<String>,
}

/// Sends invitations through the Brevo SMTP API
#[derive(Clone)]
pub struct BrevoEmailSender {
    http_client: Client,
    api_url: String,
    api_key: String,
    sender_email: String,
    sender_name: String,
    subject: String,
}

impl Debug for BrevoEmailSender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BrevoEmailSender")
            .field("api_url", &self.api_url)
            .field("api_key", &"[hidden]")
            .field("sender_email", &self.sender_email)
            .field("sender_name", &self.sender_name)
            .finish()
    }
}

impl BrevoEmailSender {
    /// Create a sender. Fails when no API key is configured.
    pub fn new(config: &EmailConfig) -> Result<Self, DomainError> {
        let api_key = config.api_key().ok_or_else(|| {
            DomainError::configuration(
                "Brevo API key not found. Please set BREVO_API environment variable.",
            )
        })?;

        let mut builder = Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let http_client = builder
            .build()
            .map_err(|e| DomainError::internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            api_url: config.api_url.clone(),
            api_key: api_key.to_string(),
            sender_email: config.sender_email.clone(),
            sender_name: config.sender_name.clone(),
            subject: config.subject.clone(),
        })
    }
}

#[async_trait]
impl EmailSender for BrevoEmailSender {
    async fn send(&self, recipient: &Identity, message: &RenderedMessage) -> DispatchResult {
        let recipient_name = recipient.display_name();
        let payload = SendEmailRequest {
            sender: Contact {
                name: &self.sender_name,
                email: &self.sender_email,
            },
            to: vec![Contact {
                name: &recipient_name,
                email: recipient.email(),
            }],
            subject: &self.subject,
            html_content: &message.html,
        };

        let request = self
            .http_client
            .post(&self.api_url)
            .header("accept", "application/json")
            .header("api-key", &self.api_key)
            .json(&payload);

        match request.send().await {
            Ok(response) if response.status() == StatusCode::CREATED => {
                let status = response.status().as_u16();
                let message_id = response
                    .json::<SendEmailResponse>()
                    .await
                    .ok()
                    .and_then(|r| r.message_id);

                info!(email = %recipient.email(), status = status, "Email sent successfully");
                DispatchResult::Delivered { status, message_id }
            }
            Ok(response) => {
                let status = response.status().as_u16();
                let body = response.text().await.unwrap_or_default();
                let detail: String = body.chars().take(MAX_DETAIL_CHARS).collect();

                warn!(
                    email = %recipient.email(),
                    status = status,
                    body = %detail,
                    "Failed to send email"
                );
                DispatchResult::Failed {
                    status: Some(status),
                    detail,
                }
            }
            Err(e) => {
                let detail = if e.is_timeout() {
                    "Request timed out".to_string()
                } else if e.is_connect() {
                    format!("Connection failed: {}", e)
                } else {
                    format!("Request failed: {}", e)
                };

                warn!(email = %recipient.email(), error = %detail, "Exception sending email");
                DispatchResult::Failed {
                    status: None,
                    detail,
                }
            }
        }
    }
}
