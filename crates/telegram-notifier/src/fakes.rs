//! In-memory collaborators (testing only)
//!
//! Provides `StaticCredentialResolver` and `MemoryListener`, which satisfy
//! the collaborator traits without a credential store or a build console.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::credentials::{CredentialResolver, CredentialScope};
use crate::listener::BuildListener;

// ---------------------------------------------------------------------------
// StaticCredentialResolver
// ---------------------------------------------------------------------------

/// Credential store backed by a fixed `HashMap<id, secret>`.
#[derive(Debug, Default, Clone)]
pub struct StaticCredentialResolver {
    secrets: HashMap<String, String>,
}

impl StaticCredentialResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_secret(mut self, credential_id: &str, value: &str) -> Self {
        self.secrets
            .insert(credential_id.to_string(), value.to_string());
        self
    }
}

#[async_trait]
impl CredentialResolver for StaticCredentialResolver {
    async fn lookup(&self, credential_id: &str, _scope: &CredentialScope) -> Option<String> {
        self.secrets.get(credential_id).cloned()
    }
}

// ---------------------------------------------------------------------------
// MemoryListener
// ---------------------------------------------------------------------------

/// Severity of a captured build log line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineLevel {
    Info,
    Error,
}

/// Build log that keeps every line in memory.
#[derive(Debug, Default)]
pub struct MemoryListener {
    lines: Mutex<Vec<(LineLevel, String)>>,
}

impl MemoryListener {
    pub fn new() -> Self {
        Self::default()
    }

    fn guard(&self) -> MutexGuard<'_, Vec<(LineLevel, String)>> {
        // A panicking test thread must not hide the lines captured so far.
        self.lines.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// All captured lines, in order.
    pub fn lines(&self) -> Vec<(LineLevel, String)> {
        self.guard().clone()
    }

    /// The log as one newline-joined string.
    pub fn text(&self) -> String {
        self.guard()
            .iter()
            .map(|(_, line)| line.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.guard().iter().any(|(_, line)| line.contains(needle))
    }

    pub fn error_count(&self) -> usize {
        self.guard()
            .iter()
            .filter(|(level, _)| *level == LineLevel::Error)
            .count()
    }
}

impl BuildListener for MemoryListener {
    fn info(&self, line: &str) {
        self.guard().push((LineLevel::Info, line.to_string()));
    }

    fn error(&self, line: &str) {
        self.guard().push((LineLevel::Error, line.to_string()));
    }
}
