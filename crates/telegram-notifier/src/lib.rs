//! Telegram Notifier: post-build step announcing results to a Telegram chat
//!
//! Wires the pure formatting logic of `notifier-core` to the Bot API:
//! - `TelegramNotifier`: per-build orchestration (trigger, credentials, send)
//! - `TelegramSender`: one stateless `sendMessage` call with bounded timeouts
//! - `CredentialResolver` / `BuildListener`: host collaborators
//! - `obs` / `telemetry`: structured `notify.*` events and subscriber setup
//!
//! A notification failure is logged and reported, never propagated: the
//! build being announced keeps its own result.

pub mod config;
pub mod credentials;
pub mod error;
pub mod fakes;
pub mod listener;
pub mod notifier;
pub mod obs;
pub mod sender;
pub mod telemetry;

pub use config::{
    NotifierConfig, TelegramApiConfig, DEFAULT_API_URL, PARSE_MODE, REQUEST_TIMEOUT_SECS,
    TOTAL_TIMEOUT_SECS,
};
pub use credentials::{CredentialResolver, CredentialScope, EnvCredentialResolver};
pub use error::DeliveryError;
pub use listener::{BuildListener, TracingListener};
pub use notifier::{CredentialKind, NotificationDisposition, TelegramNotifier};
pub use sender::{DeliveryResult, TelegramSender};
pub use telemetry::init_tracing;

pub use notifier_core::{BuildContext, MessageFormatter, Outcome, Trigger, TriggerSet};
