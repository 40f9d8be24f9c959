//! Bot API settings and per-job notifier configuration.

use anyhow::Context;
use notifier_core::{NotifyError, Trigger, TriggerSet};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default Bot API endpoint.
pub const DEFAULT_API_URL: &str = "https://api.telegram.org";

/// Markup dialect requested for every message.
pub const PARSE_MODE: &str = "Markdown";

/// Connect and per-request timeout, in seconds.
pub const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Ceiling on one whole delivery attempt, in seconds.
pub const TOTAL_TIMEOUT_SECS: u64 = 60;

/// How to reach the Bot API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TelegramApiConfig {
    /// Base URL; requests go to `{api_url}/bot{token}/sendMessage`
    pub api_url: String,
    /// TCP/TLS connect timeout
    pub connect_timeout_secs: u64,
    /// Timeout for the HTTP request once connected
    pub request_timeout_secs: u64,
    /// Upper bound for the whole exchange, body included
    pub total_timeout_secs: u64,
}

impl Default for TelegramApiConfig {
    fn default() -> Self {
        TelegramApiConfig {
            api_url: DEFAULT_API_URL.to_string(),
            connect_timeout_secs: REQUEST_TIMEOUT_SECS,
            request_timeout_secs: REQUEST_TIMEOUT_SECS,
            total_timeout_secs: TOTAL_TIMEOUT_SECS,
        }
    }
}

impl TelegramApiConfig {
    /// Read `TELEGRAM_API_URL` and `TELEGRAM_TIMEOUT_SECS`, falling back to
    /// defaults for whichever is unset.
    pub fn from_env() -> anyhow::Result<Self> {
        let mut config = Self::default();
        if let Ok(url) = std::env::var("TELEGRAM_API_URL") {
            config = config.with_api_url(url.trim());
        }
        if let Ok(secs) = std::env::var("TELEGRAM_TIMEOUT_SECS") {
            let secs: u64 = secs
                .trim()
                .parse()
                .context("TELEGRAM_TIMEOUT_SECS must be a whole number of seconds")?;
            config = config.with_timeout_secs(secs);
        }
        Ok(config)
    }

    /// Point at a different Bot API server (self-hosted or a test stub).
    pub fn with_api_url(mut self, api_url: &str) -> Self {
        self.api_url = api_url.trim_end_matches('/').to_string();
        self
    }

    /// Use `secs` for connect and request timeouts; the overall ceiling is
    /// raised if needed so it never undercuts them.
    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.connect_timeout_secs = secs;
        self.request_timeout_secs = secs;
        self.total_timeout_secs = self.total_timeout_secs.max(secs);
        self
    }

    pub fn with_total_timeout_secs(mut self, secs: u64) -> Self {
        self.total_timeout_secs = secs;
        self
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn total_timeout(&self) -> Duration {
        Duration::from_secs(self.total_timeout_secs)
    }

    /// `sendMessage` endpoint for `token`.
    pub fn send_message_url(&self, token: &str) -> String {
        format!("{}/bot{}/sendMessage", self.api_url, token)
    }
}

fn default_true() -> bool {
    true
}

/// Per-job notifier settings, as persisted by the host.
///
/// Credential ids name secrets held by the host's credential store; the
/// secret values themselves never appear here.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NotifierConfig {
    /// Credential id of the bot token
    pub token_credential_id: String,
    /// Credential id of the target chat id
    pub chat_id_credential_id: String,

    #[serde(default)]
    pub notify_on_success: bool,
    #[serde(default = "default_true")]
    pub notify_on_failure: bool,
    #[serde(default = "default_true")]
    pub notify_on_unstable: bool,
    #[serde(default)]
    pub notify_on_aborted: bool,
    #[serde(default)]
    pub notify_on_not_built: bool,

    /// Optional template appended below the fixed header
    #[serde(default)]
    pub custom_message: Option<String>,
}

impl NotifierConfig {
    /// Configuration with the default triggers (failure and unstable).
    pub fn new(token_credential_id: &str, chat_id_credential_id: &str) -> Self {
        NotifierConfig {
            token_credential_id: token_credential_id.to_string(),
            chat_id_credential_id: chat_id_credential_id.to_string(),
            notify_on_success: false,
            notify_on_failure: true,
            notify_on_unstable: true,
            notify_on_aborted: false,
            notify_on_not_built: false,
            custom_message: None,
        }
    }

    /// Enable or disable a single trigger.
    pub fn with_trigger(mut self, trigger: Trigger, enabled: bool) -> Self {
        match trigger {
            Trigger::Success => self.notify_on_success = enabled,
            Trigger::Failure => self.notify_on_failure = enabled,
            Trigger::Unstable => self.notify_on_unstable = enabled,
            Trigger::Aborted => self.notify_on_aborted = enabled,
            Trigger::NotBuilt => self.notify_on_not_built = enabled,
        }
        self
    }

    /// Enable exactly the triggers in `triggers`.
    pub fn with_triggers(self, triggers: &TriggerSet) -> Self {
        Trigger::ALL
            .into_iter()
            .fold(self, |config, t| config.with_trigger(t, triggers.contains(t)))
    }

    pub fn with_custom_message(mut self, template: &str) -> Self {
        self.custom_message = Some(template.to_string());
        self
    }

    /// The enabled triggers as a set.
    pub fn triggers(&self) -> TriggerSet {
        [
            (Trigger::Success, self.notify_on_success),
            (Trigger::Failure, self.notify_on_failure),
            (Trigger::Unstable, self.notify_on_unstable),
            (Trigger::Aborted, self.notify_on_aborted),
            (Trigger::NotBuilt, self.notify_on_not_built),
        ]
        .into_iter()
        .filter_map(|(trigger, enabled)| enabled.then_some(trigger))
        .collect()
    }

    /// Check that both credential ids were selected.
    pub fn validate(&self) -> notifier_core::Result<()> {
        if self.token_credential_id.trim().is_empty() {
            return Err(NotifyError::BlankCredentialId("the bot token"));
        }
        if self.chat_id_credential_id.trim().is_empty() {
            return Err(NotifyError::BlankCredentialId("the chat id"));
        }
        Ok(())
    }
}
