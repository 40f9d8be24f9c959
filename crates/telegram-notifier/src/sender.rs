//! Telegram Bot API delivery.
//!
//! One `sendMessage` POST per call, form-encoded, bounded by the configured
//! timeouts. Every failure mode is folded into a [`DeliveryResult`]; nothing
//! is returned as an error and nothing panics out of [`TelegramSender::send`].

use crate::config::{TelegramApiConfig, PARSE_MODE};
use crate::error::DeliveryError;
use futures::FutureExt;
use reqwest::{Client, Request};
use serde::Deserialize;
use std::panic::AssertUnwindSafe;
use tracing::{debug, error, info, warn};

const USER_AGENT: &str = concat!("telegram-notifier/", env!("CARGO_PKG_VERSION"));

/// Outcome of one delivery attempt.
#[derive(Debug)]
pub enum DeliveryResult {
    /// The Bot API accepted the message
    Delivered { status: u16 },
    /// The message was not delivered
    Failed(DeliveryError),
}

impl DeliveryResult {
    pub fn is_success(&self) -> bool {
        matches!(self, DeliveryResult::Delivered { .. })
    }

    /// HTTP status, when the Bot API answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            DeliveryResult::Delivered { status } => Some(*status),
            DeliveryResult::Failed(err) => err.status(),
        }
    }

    pub fn error(&self) -> Option<&DeliveryError> {
        match self {
            DeliveryResult::Delivered { .. } => None,
            DeliveryResult::Failed(err) => Some(err),
        }
    }
}

impl std::fmt::Display for DeliveryResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DeliveryResult::Delivered { status } => write!(f, "delivered (status {})", status),
            DeliveryResult::Failed(err) => write!(f, "failed: {}", err),
        }
    }
}

/// Error payload of the Bot API (`{"ok": false, "description": ...}`).
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    description: Option<String>,
}

/// Stateless Bot API client.
///
/// Holds only immutable settings; every call builds its own HTTP client,
/// so concurrent calls with different credentials share nothing.
#[derive(Debug, Clone, Default)]
pub struct TelegramSender {
    config: TelegramApiConfig,
}

impl TelegramSender {
    pub fn new(config: TelegramApiConfig) -> Self {
        TelegramSender { config }
    }

    pub fn config(&self) -> &TelegramApiConfig {
        &self.config
    }

    /// Send `message` to `chat_id` as the bot identified by `token`.
    pub async fn send(&self, token: &str, chat_id: &str, message: &str) -> DeliveryResult {
        let attempt = AssertUnwindSafe(self.try_send(token, chat_id, message)).catch_unwind();
        let outcome = match attempt.await {
            Ok(outcome) => outcome,
            Err(panic) => Err(DeliveryError::Unexpected(panic_message(panic.as_ref()))),
        };

        match outcome {
            Ok(status) => {
                info!(status, "Message sent to Telegram");
                DeliveryResult::Delivered { status }
            }
            Err(err) => {
                log_failure(&err);
                DeliveryResult::Failed(err)
            }
        }
    }

    async fn try_send(&self, token: &str, chat_id: &str, message: &str) -> Result<u16, DeliveryError> {
        validate(token, chat_id, message)?;

        let client = self.build_client()?;
        let request = self.build_request(&client, token, chat_id, message)?;

        debug!(chars = message.chars().count(), "Sending message to Telegram API");

        let ceiling = self.config.total_timeout();
        let exchange = async {
            let response = client.execute(request).await?;
            let status = response.status();
            let body = match response.text().await {
                Ok(body) => body,
                Err(err) => format!("<unreadable body: {}>", err.without_url()),
            };
            Ok::<_, DeliveryError>((status, body))
        };
        let (status, body) = tokio::time::timeout(ceiling, exchange)
            .await
            .map_err(|_| DeliveryError::Timeout(ceiling))??;

        if status.is_success() {
            Ok(status.as_u16())
        } else {
            Err(DeliveryError::Rejected {
                status: status.as_u16(),
                body,
            })
        }
    }

    fn build_client(&self) -> Result<Client, DeliveryError> {
        Client::builder()
            .user_agent(USER_AGENT)
            .connect_timeout(self.config.connect_timeout())
            .timeout(self.config.request_timeout())
            .build()
            .map_err(DeliveryError::from)
    }

    /// The `sendMessage` request: form body with `chat_id`, `text` and `parse_mode`.
    pub(crate) fn build_request(
        &self,
        client: &Client,
        token: &str,
        chat_id: &str,
        message: &str,
    ) -> Result<Request, DeliveryError> {
        client
            .post(self.config.send_message_url(token))
            .form(&[
                ("chat_id", chat_id),
                ("text", message),
                ("parse_mode", PARSE_MODE),
            ])
            .build()
            .map_err(DeliveryError::from)
    }
}

fn validate(token: &str, chat_id: &str, message: &str) -> Result<(), DeliveryError> {
    if token.trim().is_empty() {
        return Err(DeliveryError::MissingToken);
    }
    if chat_id.trim().is_empty() {
        return Err(DeliveryError::MissingChatId);
    }
    if message.trim().is_empty() {
        return Err(DeliveryError::EmptyMessage);
    }
    Ok(())
}

fn log_failure(err: &DeliveryError) {
    match err {
        e if e.is_invalid_input() => warn!(error = %e, "Telegram message not sent"),
        DeliveryError::Rejected { status, body } => {
            let description = serde_json::from_str::<ApiErrorBody>(body)
                .ok()
                .and_then(|b| b.description)
                .unwrap_or_default();
            warn!(
                status = *status,
                body = %body,
                description = %description,
                "Failed to send message to Telegram"
            );
        }
        DeliveryError::Timeout(after) => {
            error!(timeout = ?after, "Telegram request timed out");
        }
        DeliveryError::Unexpected(_) => {
            error!(error = %err, "Unexpected error while sending message to Telegram");
        }
        _ => error!(error = %err, "I/O error while sending message to Telegram"),
    }
}

fn panic_message(panic: &(dyn std::any::Any + Send)) -> String {
    panic
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| panic.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "panic with non-string payload".to_string())
}
