//! Tracing initialisation for hosts embedding the notifier.
//!
//! Filtering honours `TELEGRAM_NOTIFIER_LOG` first, then `RUST_LOG`, then
//! the supplied default level. The default keeps `reqwest` at `warn`, since
//! its debug output prints request URLs and those embed the bot token.
//! Only the first successful call installs a subscriber; later calls
//! return `false`.

use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Environment variable with notifier-specific filter directives.
pub const LOG_ENV: &str = "TELEGRAM_NOTIFIER_LOG";

fn env_filter(level: Level) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| {
            EnvFilter::new(format!("{},reqwest=warn", level.as_str().to_lowercase()))
        })
}

/// Install the global subscriber.
///
/// * `json` emits newline-delimited JSON, keeping the `event` field of
///   [`crate::obs`] events machine-readable.
/// * `level` is the default verbosity when neither filter variable is set.
///
/// Targets are kept in the output so `build_log` lines can be told apart
/// from notifier diagnostics.
pub fn init_tracing(json: bool, level: Level) -> bool {
    let registry = tracing_subscriber::registry().with(env_filter(level));

    if json {
        registry.with(fmt::layer().json()).try_init().is_ok()
    } else {
        registry.with(fmt::layer()).try_init().is_ok()
    }
}

