//! Notification triggers and the notify/skip decision.

use crate::outcome::Outcome;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A configured rule selecting one build outcome that should be announced.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Trigger {
    Success,
    Failure,
    Unstable,
    Aborted,
    NotBuilt,
}

impl Trigger {
    pub const ALL: [Trigger; 5] = [
        Trigger::Success,
        Trigger::Failure,
        Trigger::Unstable,
        Trigger::Aborted,
        Trigger::NotBuilt,
    ];

    /// Human-readable name shown in job configuration.
    pub fn display_name(&self) -> &'static str {
        match self {
            Trigger::Success => "Success",
            Trigger::Failure => "Failure",
            Trigger::Unstable => "Unstable",
            Trigger::Aborted => "Aborted",
            Trigger::NotBuilt => "Not Built",
        }
    }

    /// The single outcome this trigger selects.
    pub fn outcome(&self) -> Outcome {
        match self {
            Trigger::Success => Outcome::Success,
            Trigger::Failure => Outcome::Failure,
            Trigger::Unstable => Outcome::Unstable,
            Trigger::Aborted => Outcome::Aborted,
            Trigger::NotBuilt => Outcome::NotBuilt,
        }
    }

    /// Whether this trigger fires for `outcome`. An absent outcome matches nothing.
    pub fn matches(&self, outcome: Option<Outcome>) -> bool {
        outcome == Some(self.outcome())
    }
}

impl From<Outcome> for Trigger {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Success => Trigger::Success,
            Outcome::Failure => Trigger::Failure,
            Outcome::Unstable => Trigger::Unstable,
            Outcome::Aborted => Trigger::Aborted,
            Outcome::NotBuilt => Trigger::NotBuilt,
        }
    }
}

impl std::fmt::Display for Trigger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// The set of triggers enabled for a job.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct TriggerSet(BTreeSet<Trigger>);

impl TriggerSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a trigger; returns false if it was already present.
    pub fn insert(&mut self, trigger: Trigger) -> bool {
        self.0.insert(trigger)
    }

    pub fn contains(&self, trigger: Trigger) -> bool {
        self.0.contains(&trigger)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = Trigger> + '_ {
        self.0.iter().copied()
    }

    /// Whether a build with `outcome` should produce a notification.
    pub fn should_notify(&self, outcome: Option<Outcome>) -> bool {
        should_notify(self, outcome)
    }
}

impl FromIterator<Trigger> for TriggerSet {
    fn from_iter<I: IntoIterator<Item = Trigger>>(iter: I) -> Self {
        TriggerSet(iter.into_iter().collect())
    }
}

impl<const N: usize> From<[Trigger; N]> for TriggerSet {
    fn from(triggers: [Trigger; N]) -> Self {
        triggers.into_iter().collect()
    }
}

/// Decide whether any configured trigger matches `outcome`.
///
/// Empty sets and absent outcomes never notify.
pub fn should_notify(triggers: &TriggerSet, outcome: Option<Outcome>) -> bool {
    if triggers.is_empty() || outcome.is_none() {
        return false;
    }
    triggers.iter().any(|t| t.matches(outcome))
}
