//! Build log sink.

use tracing::{error, info};

/// Receives the human-readable lines shown in the build's own log.
///
/// This is separate from the `tracing` diagnostics: hosts typically route it
/// to the console output of the build being reported on.
pub trait BuildListener: Send + Sync {
    fn info(&self, line: &str);
    fn error(&self, line: &str);
}

/// Forwards build log lines to `tracing` under the `build_log` target.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingListener;

impl BuildListener for TracingListener {
    fn info(&self, line: &str) {
        info!(target: "build_log", "{}", line);
    }

    fn error(&self, line: &str) {
        error!(target: "build_log", "{}", line);
    }
}
