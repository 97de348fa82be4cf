//! Credential lookup for the text-generation provider
//!
//! The key is resolved on every call rather than captured at startup, so a
//! key added to the environment later is picked up without a restart.

pub const API_KEY_VAR: &str = "API_KEY";

pub trait CredentialSource: Send + Sync {
    /// Returns the credential, or `None` when it is absent or blank.
    fn resolve(&self) -> Option<String>;

    /// Human-readable name of where the credential is expected to come from.
    fn name(&self) -> &str;
}

/// Reads the credential from a named environment variable.
pub struct EnvCredentialSource {
    var: String,
}

impl EnvCredentialSource {
    pub fn new(var: impl Into<String>) -> Self {
        Self { var: var.into() }
    }
}

impl Default for EnvCredentialSource {
    fn default() -> Self {
        Self::new(API_KEY_VAR)
    }
}

impl CredentialSource for EnvCredentialSource {
    fn resolve(&self) -> Option<String> {
        non_blank(std::env::var(&self.var).ok())
    }

    fn name(&self) -> &str {
        &self.var
    }
}

/// Fixed credential, mainly for tests and embedding.
#[derive(Debug, Clone, Default)]
pub struct StaticCredentialSource {
    key: Option<String>,
}

impl StaticCredentialSource {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: Some(key.into()),
        }
    }

    pub fn missing() -> Self {
        Self { key: None }
    }
}

impl CredentialSource for StaticCredentialSource {
    fn resolve(&self) -> Option<String> {
        non_blank(self.key.clone())
    }

    fn name(&self) -> &str {
        API_KEY_VAR
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
