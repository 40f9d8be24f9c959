//! Build snapshot consumed by the formatter.

use crate::outcome::Outcome;
use serde::{Deserialize, Serialize};

/// Sentinel rendered when no triggering cause was recorded.
pub const UNKNOWN_CAUSE: &str = "Unknown";

/// Immutable facts about one completed build.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BuildContext {
    /// Full display name of the job.
    pub job_name: String,

    /// Build number (positive).
    pub number: u64,

    /// Terminal status, if the build reported one.
    pub outcome: Option<Outcome>,

    /// Duration in milliseconds. Negative means the duration is unknown.
    pub duration_ms: i64,

    /// Absolute URL of the build page.
    pub url: String,

    /// Short description of the primary cause ("Started by user admin").
    pub cause: Option<String>,
}

impl BuildContext {
    pub fn new(job_name: impl Into<String>, number: u64, url: impl Into<String>) -> Self {
        Self {
            job_name: job_name.into(),
            number,
            outcome: None,
            duration_ms: -1,
            url: url.into(),
            cause: None,
        }
    }

    pub fn with_outcome(mut self, outcome: Outcome) -> Self {
        self.outcome = Some(outcome);
        self
    }

    pub fn with_duration_ms(mut self, duration_ms: i64) -> Self {
        self.duration_ms = duration_ms;
        self
    }

    pub fn with_cause(mut self, cause: impl Into<String>) -> Self {
        self.cause = Some(cause.into());
        self
    }

    /// Outcome tag, or `UNKNOWN` when the build reported none.
    pub fn status_name(&self) -> &'static str {
        self.outcome.map(|o| o.name()).unwrap_or("UNKNOWN")
    }

    /// The recorded cause, if any and non-empty.
    pub fn cause(&self) -> Option<&str> {
        self.cause.as_deref().filter(|c| !c.is_empty())
    }

    /// The recorded cause, or [`UNKNOWN_CAUSE`].
    pub fn cause_or_unknown(&self) -> &str {
        self.cause().unwrap_or(UNKNOWN_CAUSE)
    }
}
