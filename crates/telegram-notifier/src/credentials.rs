//! Secret lookup collaborator.
//!
//! The notifier never stores the bot token or chat id. It asks a
//! [`CredentialResolver`] for them by credential id at send time.

use async_trait::async_trait;
use notifier_core::BuildContext;

/// Where a lookup happens, so resolvers can scope credentials per job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialScope {
    pub job_name: String,
}

impl CredentialScope {
    pub fn for_build(build: &BuildContext) -> Self {
        CredentialScope {
            job_name: build.job_name.clone(),
        }
    }
}

/// Resolves a credential id to its secret value.
///
/// "Not found" is `None`, never an error.
#[async_trait]
pub trait CredentialResolver: Send + Sync {
    async fn lookup(&self, credential_id: &str, scope: &CredentialScope) -> Option<String>;
}

/// Reads secrets from environment variables.
///
/// A credential id maps to a variable name by upper-casing it, replacing
/// every non-alphanumeric character with `_`, and prepending the prefix:
/// `telegram-bot.token` with prefix `CI_SECRET_` reads `CI_SECRET_TELEGRAM_BOT_TOKEN`.
#[derive(Debug, Clone, Default)]
pub struct EnvCredentialResolver {
    prefix: String,
}

impl EnvCredentialResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_prefix(prefix: &str) -> Self {
        EnvCredentialResolver {
            prefix: prefix.to_string(),
        }
    }

    /// Environment variable consulted for `credential_id`.
    pub fn variable_name(&self, credential_id: &str) -> String {
        let id: String = credential_id
            .trim()
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() {
                    c.to_ascii_uppercase()
                } else {
                    '_'
                }
            })
            .collect();
        format!("{}{}", self.prefix, id)
    }
}

#[async_trait]
impl CredentialResolver for EnvCredentialResolver {
    async fn lookup(&self, credential_id: &str, _scope: &CredentialScope) -> Option<String> {
        std::env::var(self.variable_name(credential_id)).ok()
    }
}
