//! Notifier Core: build outcome triggers and message formatting
//!
//! Pure domain logic for announcing build results:
//! - `Outcome` / `Trigger` / `TriggerSet`: the notify-or-skip decision
//! - `BuildContext`: the read-only snapshot a message is rendered from
//! - `MessageFormatter`: Markdown rendering, placeholder substitution,
//!   escaping and length bounding
//!
//! Nothing here performs I/O; delivery lives in `telegram-notifier`.

pub mod context;
pub mod error;
pub mod escape;
pub mod format;
pub mod outcome;
pub mod trigger;
pub mod truncate;

pub use context::{BuildContext, UNKNOWN_CAUSE};
pub use error::{NotifyError, Result};
pub use escape::EscapePolicy;
pub use format::{
    format_duration, format_message, render_template, status_glyph, MessageFormatter,
    INVALID_BUILD_MESSAGE,
};
pub use outcome::Outcome;
pub use trigger::{should_notify, Trigger, TriggerSet};
pub use truncate::{truncate, MAX_MESSAGE_LENGTH, TRUNCATION_SUFFIX};
