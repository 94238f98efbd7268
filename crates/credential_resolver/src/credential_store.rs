//! Host-keyed access to externally persisted credentials.
//!
//! CLI tooling in this ecosystem keeps logged-in sessions in a host-keyed
//! store (for example a `hosts.yml` written by an interactive login). This
//! crate consumes such stores through the [`CredentialStore`] trait and never
//! parses store files itself; applications that own a store format implement
//! the trait or load their data into [`InMemoryCredentialStore`].

use std::collections::HashMap;

// Reference the tests module in the separate file
#[cfg(test)]
#[path = "credential_store_tests.rs"]
mod tests;

/// A token retrieved from a credential store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredToken {
    /// The access token itself.
    pub token: String,
    /// Where the store says the token came from, for diagnostics.
    pub source: String,
}

/// Read access to stored sessions, keyed by API host.
pub trait CredentialStore: Send + Sync {
    /// The token stored for `host`, if any.
    fn token_for_host(&self, host: &str) -> Option<StoredToken>;

    /// The host the user designated as their default, if the store records one.
    fn default_host(&self) -> Option<String>;
}

/// A store with no credentials; the default when none is injected.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoCredentialStore;

impl CredentialStore for NoCredentialStore {
    fn token_for_host(&self, _host: &str) -> Option<StoredToken> {
        None
    }

    fn default_host(&self) -> Option<String> {
        None
    }
}

/// Map-backed store for tests and for applications that load credentials
/// themselves.
#[derive(Debug, Default, Clone)]
pub struct InMemoryCredentialStore {
    tokens: HashMap<String, String>,
    default_host: Option<String>,
}

impl InMemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `token` for `host`.
    pub fn with_token(mut self, host: impl Into<String>, token: impl Into<String>) -> Self {
        self.tokens.insert(host.into(), token.into());
        self
    }

    /// Marks `host` as the default host.
    pub fn with_default_host(mut self, host: impl Into<String>) -> Self {
        self.default_host = Some(host.into());
        self
    }
}

impl CredentialStore for InMemoryCredentialStore {
    fn token_for_host(&self, host: &str) -> Option<StoredToken> {
        self.tokens.get(host).map(|token| StoredToken {
            token: token.clone(),
            source: "memory".to_string(),
        })
    }

    fn default_host(&self) -> Option<String> {
        self.default_host.clone()
    }
}
