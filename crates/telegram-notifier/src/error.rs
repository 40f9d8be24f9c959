//! Error types for telegram-notifier

use std::time::Duration;
use thiserror::Error;

/// Reasons a delivery attempt did not succeed.
///
/// These never propagate out of [`crate::TelegramSender::send`]; they are
/// carried inside [`crate::DeliveryResult`] as the diagnostic.
#[derive(Error, Debug)]
pub enum DeliveryError {
    /// Bot token blank
    #[error("Bot token is empty, cannot send message")]
    MissingToken,

    /// Chat id blank
    #[error("Chat id is empty, cannot send message")]
    MissingChatId,

    /// Nothing to send
    #[error("Message is empty, nothing to send")]
    EmptyMessage,

    /// The request could not be built or the client could not be created
    #[error("Failed to prepare request: {0}")]
    Request(String),

    /// The exchange exceeded the overall delivery ceiling
    #[error("Telegram request timed out after {0:?}")]
    Timeout(Duration),

    /// Connection, TLS or I/O failure
    #[error("HTTP error: {0}")]
    Http(String),

    /// The Bot API answered with a non-2xx status
    #[error("Telegram rejected message: status {status}, response: {body}")]
    Rejected { status: u16, body: String },

    /// Anything else, including a panic inside the HTTP stack
    #[error("Unexpected delivery failure: {0}")]
    Unexpected(String),
}

impl DeliveryError {
    /// Rejected locally before any network I/O.
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            DeliveryError::MissingToken | DeliveryError::MissingChatId | DeliveryError::EmptyMessage
        )
    }

    /// HTTP status returned by the Bot API, if one was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            DeliveryError::Rejected { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for DeliveryError {
    fn from(err: reqwest::Error) -> Self {
        // The request URL embeds the bot token.
        let err = err.without_url();
        if err.is_builder() {
            DeliveryError::Request(err.to_string())
        } else {
            DeliveryError::Http(err.to_string())
        }
    }
}
