//! Dispatch domain - delivering rendered invitations to recipients

use async_trait::async_trait;

use crate::domain::message::RenderedMessage;
use crate::domain::roster::Identity;

#[cfg(test)]
use mockall::automock;

/// Outcome of a single delivery attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchResult {
    /// The provider accepted the message
    Delivered {
        status: u16,
        message_id: Option<String>,
    },
    /// The provider rejected the message or could not be reached
    Failed {
        status: Option<u16>,
        detail: String,
    },
}

impl DispatchResult {
    pub fn is_delivered(&self) -> bool {
        matches!(self, Self::Delivered { .. })
    }
}

impl std::fmt::Display for DispatchResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Delivered { status, .. } => write!(f, "delivered ({})", status),
            Self::Failed {
                status: Some(status),
                detail,
            } => write!(f, "failed ({} - {})", status, detail),
            Self::Failed { status: None, detail } => write!(f, "failed ({})", detail),
        }
    }
}

/// Sends one rendered invitation to one recipient.
///
/// Implementations make at most one attempt and never return an error:
/// every fault is folded into [`DispatchResult::Failed`].
#[cfg_attr(test, automock)]
#[async_trait]
pub trait EmailSender: Send + Sync {
    async fn send(&self, recipient: &Identity, message: &RenderedMessage) -> DispatchResult;
}
