//! Structured observability events for the notification lifecycle.
//!
//! Every event carries an `event` field (`notify.*`) so log pipelines can
//! filter on it. Credential ids may be logged; credential values never are.

use tracing::{info, warn};

/// Emit event: the build outcome did not match any configured trigger.
pub fn emit_notification_skipped(job: &str, build: u64, status: &str) {
    info!(event = "notify.skipped", job = %job, build, status = %status);
}

/// Emit event: a required credential could not be resolved (warning level).
pub fn emit_credential_missing(kind: &str, credential_id: &str) {
    warn!(
        event = "notify.credential_missing",
        credential = %kind,
        credential_id = %credential_id,
    );
}

/// Emit event: the Bot API accepted the message.
pub fn emit_delivered(job: &str, build: u64, status_code: u16) {
    info!(event = "notify.delivered", job = %job, build, status_code);
}

/// Emit event: delivery failed; the build result is unaffected (warning level).
pub fn emit_delivery_failed(job: &str, build: u64, error: &dyn std::fmt::Display) {
    warn!(event = "notify.delivery_failed", job = %job, build, error = %error);
}
