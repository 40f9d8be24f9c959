//! Per-build notification orchestration.
//!
//! Sequence for one completed build:
//! 1. Trigger check against the job's configured outcomes
//! 2. Bot token and chat id lookup through the host's credential store
//! 3. Message rendering
//! 4. A single delivery attempt
//!
//! Each step that stops early is a normal outcome recorded in the build log.
//! The build being reported on is never failed by anything in here.

use crate::config::NotifierConfig;
use crate::credentials::{CredentialResolver, CredentialScope};
use crate::listener::BuildListener;
use crate::obs;
use crate::sender::{DeliveryResult, TelegramSender};
use notifier_core::{BuildContext, MessageFormatter};
use tracing::Instrument;

const LOG_PREFIX: &str = "Telegram Notifier";

/// Which credential could not be resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialKind {
    BotToken,
    ChatId,
}

impl std::fmt::Display for CredentialKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CredentialKind::BotToken => write!(f, "Bot token"),
            CredentialKind::ChatId => write!(f, "Chat ID"),
        }
    }
}

/// What happened to the notification for one build.
///
/// No variant is an error. Every disposition leaves the build result
/// untouched; details go to the build log and the `notify.*` tracing events.
#[derive(Debug)]
pub enum NotificationDisposition {
    /// No configured trigger matched the outcome
    NotRequired,
    /// A credential was missing or blank; nothing was sent
    MissingCredential(CredentialKind),
    /// The message was attempted; see the delivery result
    Attempted(DeliveryResult),
}

impl NotificationDisposition {
    /// True only when the Bot API accepted the message.
    pub fn is_sent(&self) -> bool {
        matches!(self, NotificationDisposition::Attempted(r) if r.is_success())
    }

    pub fn delivery(&self) -> Option<&DeliveryResult> {
        match self {
            NotificationDisposition::Attempted(result) => Some(result),
            _ => None,
        }
    }
}

/// Announces build results for one job configuration.
#[derive(Debug, Clone)]
pub struct TelegramNotifier {
    config: NotifierConfig,
    formatter: MessageFormatter,
    sender: TelegramSender,
}

impl TelegramNotifier {
    pub fn new(config: NotifierConfig) -> Self {
        TelegramNotifier {
            config,
            formatter: MessageFormatter::default(),
            sender: TelegramSender::default(),
        }
    }

    pub fn with_sender(mut self, sender: TelegramSender) -> Self {
        self.sender = sender;
        self
    }

    pub fn with_formatter(mut self, formatter: MessageFormatter) -> Self {
        self.formatter = formatter;
        self
    }

    pub fn config(&self) -> &NotifierConfig {
        &self.config
    }

    /// Run the notification step for `build`.
    pub async fn perform(
        &self,
        build: &BuildContext,
        credentials: &dyn CredentialResolver,
        listener: &dyn BuildListener,
    ) -> NotificationDisposition {
        let span = tracing::info_span!(
            "telegram.notify",
            job = %build.job_name,
            build = build.number,
        );
        self.notify(build, credentials, listener)
            .instrument(span)
            .await
    }

    async fn notify(
        &self,
        build: &BuildContext,
        credentials: &dyn CredentialResolver,
        listener: &dyn BuildListener,
    ) -> NotificationDisposition {
        if !self.config.triggers().should_notify(build.outcome) {
            listener.info(&format!(
                "{}: No notification needed for build result: {}",
                LOG_PREFIX,
                build.status_name()
            ));
            obs::emit_notification_skipped(&build.job_name, build.number, build.status_name());
            return NotificationDisposition::NotRequired;
        }

        let scope = CredentialScope::for_build(build);

        let Some(token) = self
            .resolve(CredentialKind::BotToken, &scope, credentials, listener)
            .await
        else {
            return NotificationDisposition::MissingCredential(CredentialKind::BotToken);
        };
        let Some(chat_id) = self
            .resolve(CredentialKind::ChatId, &scope, credentials, listener)
            .await
        else {
            return NotificationDisposition::MissingCredential(CredentialKind::ChatId);
        };

        let message = self
            .formatter
            .format_message(Some(build), self.config.custom_message.as_deref());

        listener.info(&format!("{}: Sending notification...", LOG_PREFIX));
        let result = self.sender.send(&token, &chat_id, &message).await;

        match &result {
            DeliveryResult::Delivered { status } => {
                listener.info(&format!("{}: Notification sent successfully", LOG_PREFIX));
                obs::emit_delivered(&build.job_name, build.number, *status);
            }
            DeliveryResult::Failed(err) => {
                listener.error(&format!("{}: Failed to send notification", LOG_PREFIX));
                obs::emit_delivery_failed(&build.job_name, build.number, err);
            }
        }

        NotificationDisposition::Attempted(result)
    }

    /// Look up one credential; blank ids and blank values count as missing.
    async fn resolve(
        &self,
        kind: CredentialKind,
        scope: &CredentialScope,
        credentials: &dyn CredentialResolver,
        listener: &dyn BuildListener,
    ) -> Option<String> {
        let credential_id = match kind {
            CredentialKind::BotToken => &self.config.token_credential_id,
            CredentialKind::ChatId => &self.config.chat_id_credential_id,
        };

        let value = if credential_id.trim().is_empty() {
            None
        } else {
            credentials.lookup(credential_id, scope).await
        };

        match value {
            Some(v) if !v.trim().is_empty() => Some(v),
            _ => {
                listener.error(&format!(
                    "{}: {} credential not found or empty",
                    LOG_PREFIX, kind
                ));
                obs::emit_credential_missing(&kind.to_string(), credential_id);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TelegramApiConfig;
    use crate::fakes::{MemoryListener, StaticCredentialResolver};
    use notifier_core::{Outcome, Trigger, TriggerSet};
    use tracing_test::traced_test;

    fn build(outcome: Outcome) -> BuildContext {
        BuildContext::new("TestJob", 42, "http://ci.example.com/job/TestJob/42/")
            .with_outcome(outcome)
            .with_duration_ms(65_000)
    }

    fn unreachable_sender() -> TelegramSender {
        // Port 9 (discard) on loopback is closed in test environments.
        TelegramSender::new(
            TelegramApiConfig::default()
                .with_api_url("http://127.0.0.1:9")
                .with_timeout_secs(2),
        )
    }

    fn credentials() -> StaticCredentialResolver {
        StaticCredentialResolver::new()
            .with_secret("tg-token", "123456:ABC-DEF")
            .with_secret("tg-chat", "-1001234567890")
    }

    #[traced_test]
    #[tokio::test]
    async fn test_unmatched_outcome_skips() {
        let notifier = TelegramNotifier::new(
            NotifierConfig::new("tg-token", "tg-chat")
                .with_triggers(&TriggerSet::from([Trigger::Failure, Trigger::Unstable])),
        )
        .with_sender(unreachable_sender());
        let listener = MemoryListener::new();

        let disposition = notifier
            .perform(&build(Outcome::Success), &credentials(), &listener)
            .await;

        assert!(matches!(disposition, NotificationDisposition::NotRequired));
        assert!(listener.contains("No notification needed for build result: SUCCESS"));
        assert!(!listener.contains("Sending notification"));
        assert!(logs_contain("notify.skipped"));
    }

    #[tokio::test]
    async fn test_absent_outcome_skips() {
        let notifier = TelegramNotifier::new(
            NotifierConfig::new("tg-token", "tg-chat").with_triggers(&Trigger::ALL.into_iter().collect()),
        );
        let listener = MemoryListener::new();
        let build = BuildContext::new("job", 1, "http://ci/1/");

        let disposition = notifier.perform(&build, &credentials(), &listener).await;

        assert!(matches!(disposition, NotificationDisposition::NotRequired));
        assert!(listener.contains("build result: UNKNOWN"));
    }

    #[traced_test]
    #[tokio::test]
    async fn test_missing_token_stops_before_sending() {
        let notifier = TelegramNotifier::new(NotifierConfig::new("absent-token", "tg-chat"))
            .with_sender(unreachable_sender());
        let listener = MemoryListener::new();

        let disposition = notifier
            .perform(&build(Outcome::Failure), &credentials(), &listener)
            .await;

        assert!(matches!(
            disposition,
            NotificationDisposition::MissingCredential(CredentialKind::BotToken)
        ));
        assert!(listener.contains("Bot token credential not found or empty"));
        assert_eq!(listener.error_count(), 1);
        assert!(!listener.contains("Sending notification"));
        assert!(logs_contain("notify.credential_missing"));
        assert!(logs_contain("absent-token"));
    }

    #[tokio::test]
    async fn test_blank_chat_id_value_is_missing() {
        let notifier = TelegramNotifier::new(NotifierConfig::new("tg-token", "tg-chat"))
            .with_sender(unreachable_sender());
        let listener = MemoryListener::new();
        let creds = credentials().with_secret("tg-chat", "   ");

        let disposition = notifier
            .perform(&build(Outcome::Unstable), &creds, &listener)
            .await;

        assert!(matches!(
            disposition,
            NotificationDisposition::MissingCredential(CredentialKind::ChatId)
        ));
        assert!(listener.contains("Chat ID credential not found or empty"));
    }

    #[tokio::test]
    async fn test_blank_credential_id_is_missing() {
        let notifier = TelegramNotifier::new(NotifierConfig::new("", "tg-chat"));
        let listener = MemoryListener::new();

        let disposition = notifier
            .perform(&build(Outcome::Failure), &credentials(), &listener)
            .await;

        assert!(matches!(
            disposition,
            NotificationDisposition::MissingCredential(CredentialKind::BotToken)
        ));
    }

    #[traced_test]
    #[tokio::test]
    async fn test_unreachable_endpoint_is_attempted_and_reported() {
        let notifier = TelegramNotifier::new(NotifierConfig::new("tg-token", "tg-chat"))
            .with_sender(unreachable_sender());
        let listener = MemoryListener::new();

        let disposition = notifier
            .perform(&build(Outcome::Failure), &credentials(), &listener)
            .await;

        assert!(!disposition.is_sent());
        let delivery = disposition.delivery().expect("delivery attempted");
        assert!(!delivery.is_success());
        assert!(listener.contains("Sending notification..."));
        assert!(listener.contains("Failed to send notification"));
        assert!(logs_contain("notify.delivery_failed"));
        assert!(!logs_contain("123456:ABC-DEF"));
    }
}
