//! Telegram message rendering for build results.
//!
//! A message is a fixed Markdown header (status, job, number, duration,
//! cause), an optional user template with `${...}` placeholders, and a
//! trailing link to the build. The result is always bounded by
//! [`crate::truncate::MAX_MESSAGE_LENGTH`].

use crate::context::BuildContext;
use crate::escape::EscapePolicy;
use crate::outcome::Outcome;
use crate::truncate::truncate;

/// Returned in place of a message when no build context is available.
pub const INVALID_BUILD_MESSAGE: &str = "Invalid build information";

pub const PLACEHOLDER_BUILD_STATUS: &str = "${BUILD_STATUS}";
pub const PLACEHOLDER_JOB_NAME: &str = "${JOB_NAME}";
pub const PLACEHOLDER_BUILD_NUMBER: &str = "${BUILD_NUMBER}";
pub const PLACEHOLDER_BUILD_DURATION: &str = "${BUILD_DURATION}";
pub const PLACEHOLDER_BUILD_URL: &str = "${BUILD_URL}";
pub const PLACEHOLDER_CAUSE: &str = "${CAUSE}";

const GLYPH_UNKNOWN: &str = "\u{2753}"; // ❓

/// Status glyph shown at the start of the message.
pub fn status_glyph(outcome: Option<Outcome>) -> &'static str {
    match outcome {
        Some(Outcome::Success) => "\u{2705}",         // ✅
        Some(Outcome::Failure) => "\u{274C}",         // ❌
        Some(Outcome::Unstable) => "\u{26A0}\u{FE0F}", // ⚠️
        Some(Outcome::Aborted) => "\u{1F6D1}",        // 🛑
        Some(Outcome::NotBuilt) => "\u{23F8}\u{FE0F}", // ⏸️
        None => GLYPH_UNKNOWN,
    }
}

/// Render a millisecond duration as `1h 2m 3s`, `2m 0s` or `5s`.
///
/// Negative durations are unknown and render as `N/A`.
pub fn format_duration(duration_ms: i64) -> String {
    if duration_ms < 0 {
        return "N/A".to_string();
    }

    let hours = duration_ms / 3_600_000;
    let minutes = (duration_ms / 60_000) % 60;
    let seconds = (duration_ms / 1_000) % 60;

    if hours > 0 {
        format!("{}h {}m {}s", hours, minutes, seconds)
    } else if minutes > 0 {
        format!("{}m {}s", minutes, seconds)
    } else {
        format!("{}s", seconds)
    }
}

/// Builds notification text. Stateless apart from its escape policy.
#[derive(Debug, Clone, Default)]
pub struct MessageFormatter {
    escape: EscapePolicy,
}

impl MessageFormatter {
    pub fn new(escape: EscapePolicy) -> Self {
        Self { escape }
    }

    pub fn escape_policy(&self) -> &EscapePolicy {
        &self.escape
    }

    /// Render the full message for `context`, including `template` when it
    /// is non-blank.
    pub fn format_message(&self, context: Option<&BuildContext>, template: Option<&str>) -> String {
        let Some(ctx) = context else {
            return INVALID_BUILD_MESSAGE.to_string();
        };

        let mut msg = format!(
            "{} Build *{}*\n\n",
            status_glyph(ctx.outcome),
            ctx.status_name()
        );

        msg.push_str(&format!("*Job:* {}\n", self.escape.escape(&ctx.job_name)));
        msg.push_str(&format!("*Build:* #{}\n", ctx.number));
        msg.push_str(&format!(
            "*Duration:* {}\n",
            format_duration(ctx.duration_ms)
        ));

        if let Some(cause) = ctx.cause() {
            msg.push_str(&format!("*Started by:* {}\n", self.escape.escape(cause)));
        }

        if let Some(template) = template.filter(|t| !t.trim().is_empty()) {
            msg.push('\n');
            msg.push_str(&render_template(template, ctx));
            msg.push('\n');
        }

        msg.push_str(&format!("\n[View build]({})", ctx.url));

        truncate(&msg)
    }
}

/// Render with the default escape policy.
pub fn format_message(context: Option<&BuildContext>, template: Option<&str>) -> String {
    MessageFormatter::default().format_message(context, template)
}

/// Replace recognised placeholders in `template` with values from `ctx`.
///
/// Values are inserted raw. The scan is a single left-to-right pass, so a
/// value that itself contains a placeholder is never expanded, and unknown
/// `${...}` sequences are left as written.
pub fn render_template(template: &str, ctx: &BuildContext) -> String {
    let number = ctx.number.to_string();
    let duration = format_duration(ctx.duration_ms);
    let vars: [(&str, &str); 6] = [
        (PLACEHOLDER_BUILD_STATUS, ctx.status_name()),
        (PLACEHOLDER_JOB_NAME, ctx.job_name.as_str()),
        (PLACEHOLDER_BUILD_NUMBER, number.as_str()),
        (PLACEHOLDER_BUILD_DURATION, duration.as_str()),
        (PLACEHOLDER_BUILD_URL, ctx.url.as_str()),
        (PLACEHOLDER_CAUSE, ctx.cause_or_unknown()),
    ];

    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(pos) = rest.find("${") {
        out.push_str(&rest[..pos]);
        let tail = &rest[pos..];
        match vars.iter().find(|(token, _)| tail.starts_with(token)) {
            Some((token, value)) => {
                out.push_str(value);
                rest = &tail[token.len()..];
            }
            None => {
                out.push_str("${");
                rest = &tail[2..];
            }
        }
    }
    out.push_str(rest);
    out
}
