//! Terminal build outcomes.

use crate::error::NotifyError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Terminal status of a completed build.
///
/// A build that reports no status is represented as `Option::<Outcome>::None`
/// by callers; there is no "unknown" variant.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Outcome {
    Success,
    Failure,
    Unstable,
    Aborted,
    NotBuilt,
}

impl Outcome {
    /// All outcomes, in severity-independent declaration order.
    pub const ALL: [Outcome; 5] = [
        Outcome::Success,
        Outcome::Failure,
        Outcome::Unstable,
        Outcome::Aborted,
        Outcome::NotBuilt,
    ];

    /// Upper-case tag name, as rendered in messages.
    pub fn name(&self) -> &'static str {
        match self {
            Outcome::Success => "SUCCESS",
            Outcome::Failure => "FAILURE",
            Outcome::Unstable => "UNSTABLE",
            Outcome::Aborted => "ABORTED",
            Outcome::NotBuilt => "NOT_BUILT",
        }
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Outcome {
    type Err = NotifyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Outcome::ALL
            .into_iter()
            .find(|o| o.name() == s)
            .ok_or_else(|| NotifyError::UnknownOutcome(s.to_string()))
    }
}
