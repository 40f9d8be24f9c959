//! Error types for notifier-core

use thiserror::Error;

/// Errors raised while interpreting notifier inputs.
///
/// None of these ever reach the build being reported on; they surface
/// configuration mistakes to the host before a notification is attempted.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NotifyError {
    /// A host-supplied outcome string is not one of the known tags
    #[error("Unknown build outcome: {0:?}")]
    UnknownOutcome(String),

    /// A required credential id is empty or whitespace
    #[error("Credential id for {0} must be selected")]
    BlankCredentialId(&'static str),
}

/// Result type for notifier-core operations
pub type Result<T> = std::result::Result<T, NotifyError>;
