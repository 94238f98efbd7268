//! Ordered host and token resolution.

use std::fmt;
use std::sync::Arc;

use tracing::debug;

use crate::credential_store::{CredentialStore, NoCredentialStore};
use crate::endpoints::ApiEndpoints;
use crate::environment::{non_empty_var, Environment, ProcessEnvironment};
use crate::errors::Error;
use crate::repository::{self, OwnerRepo};

// Reference the tests module in the separate file
#[cfg(test)]
#[path = "resolver_tests.rs"]
mod tests;

/// Host assumed when neither the environment nor the credential store names
/// one.
pub const DEFAULT_HOST: &str = "github.com";

const GH_HOST: &str = "GH_HOST";
const GH_TOKEN: &str = "GH_TOKEN";
const GITHUB_TOKEN: &str = "GITHUB_TOKEN";
const GH_ENTERPRISE_TOKEN: &str = "GH_ENTERPRISE_TOKEN";
const GITHUB_ENTERPRISE_TOKEN: &str = "GITHUB_ENTERPRISE_TOKEN";

/// Which input supplied the resolved token. Diagnostic only; never drives
/// control flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenSource {
    GhEnterpriseToken,
    GithubEnterpriseToken,
    GhToken,
    GithubToken,
    CredentialStore,
    /// Nothing supplied a token; the resolved token is empty.
    None,
}

impl fmt::Display for TokenSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::GhEnterpriseToken => GH_ENTERPRISE_TOKEN,
            Self::GithubEnterpriseToken => GITHUB_ENTERPRISE_TOKEN,
            Self::GhToken => GH_TOKEN,
            Self::GithubToken => GITHUB_TOKEN,
            Self::CredentialStore => "credential store",
            Self::None => "none",
        };
        f.write_str(label)
    }
}

/// Which input supplied the resolved host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostSource {
    GhHost,
    CredentialStore,
    Default,
}

impl fmt::Display for HostSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::GhHost => GH_HOST,
            Self::CredentialStore => "credential store",
            Self::Default => "default",
        };
        f.write_str(label)
    }
}

/// Outcome of credential resolution.
///
/// A missing token is not an error at this layer: `token` is empty and
/// `token_source` is [`TokenSource::None`], and the caller decides whether
/// that is acceptable.
#[derive(Debug, Clone)]
pub struct ResolvedCredentials {
    pub token: String,
    pub token_source: TokenSource,
    pub host: String,
    pub host_source: HostSource,
}

/// Resolves hosts, tokens, endpoints, and repository coordinates from an
/// injected environment and credential store.
#[derive(Clone)]
pub struct CredentialResolver {
    env: Arc<dyn Environment>,
    store: Arc<dyn CredentialStore>,
}

impl Default for CredentialResolver {
    fn default() -> Self {
        Self::new(Arc::new(ProcessEnvironment), Arc::new(NoCredentialStore))
    }
}

impl CredentialResolver {
    pub fn new(env: Arc<dyn Environment>, store: Arc<dyn CredentialStore>) -> Self {
        Self { env, store }
    }

    /// Resolves the API host and an access token for it.
    ///
    /// The host comes from `GH_HOST`, then the credential store's default
    /// host, then `github.com`. For an Enterprise Server host the token
    /// comes from `GH_ENTERPRISE_TOKEN`, then `GITHUB_ENTERPRISE_TOKEN`,
    /// then the store's entry for that host; for github.com it comes from
    /// the store's entry, then `GH_TOKEN`. On both branches a CI-injected
    /// `GITHUB_TOKEN` is the last resort. Empty variables are skipped at
    /// every step.
    pub fn resolve(&self) -> ResolvedCredentials {
        let (host, host_source) = self.resolve_host();
        let (token, token_source) = self.resolve_token(&host);
        debug!(%host, %host_source, %token_source, "credentials resolved");
        ResolvedCredentials {
            token,
            token_source,
            host,
            host_source,
        }
    }

    /// Endpoints for the resolved host, honoring the platform override
    /// variables on github.com.
    pub fn endpoints(&self) -> ApiEndpoints {
        let (host, _) = self.resolve_host();
        ApiEndpoints::for_host(&host, self.env.as_ref())
    }

    /// Credentials and endpoints in one pass, resolving the host once.
    pub fn resolve_all(&self) -> (ResolvedCredentials, ApiEndpoints) {
        let resolved = self.resolve();
        let endpoints = ApiEndpoints::for_host(&resolved.host, self.env.as_ref());
        (resolved, endpoints)
    }

    /// Establishes repository coordinates from explicit values or the
    /// environment.
    pub fn detect_owner_repo(
        &self,
        owner: Option<&str>,
        repo: Option<&str>,
    ) -> Result<OwnerRepo, Error> {
        repository::detect(self.env.as_ref(), owner, repo)
    }

    fn resolve_host(&self) -> (String, HostSource) {
        if let Some(host) = non_empty_var(self.env.as_ref(), GH_HOST) {
            return (host, HostSource::GhHost);
        }
        if let Some(host) = self.store.default_host().filter(|host| !host.is_empty()) {
            return (host, HostSource::CredentialStore);
        }
        (DEFAULT_HOST.to_string(), HostSource::Default)
    }

    fn resolve_token(&self, host: &str) -> (String, TokenSource) {
        if host != DEFAULT_HOST {
            if let Some(token) = non_empty_var(self.env.as_ref(), GH_ENTERPRISE_TOKEN) {
                return (token, TokenSource::GhEnterpriseToken);
            }
            if let Some(token) = non_empty_var(self.env.as_ref(), GITHUB_ENTERPRISE_TOKEN) {
                return (token, TokenSource::GithubEnterpriseToken);
            }
            if let Some(stored) = self.stored_token(host) {
                return (stored, TokenSource::CredentialStore);
            }
        } else {
            if let Some(stored) = self.stored_token(host) {
                return (stored, TokenSource::CredentialStore);
            }
            if let Some(token) = non_empty_var(self.env.as_ref(), GH_TOKEN) {
                return (token, TokenSource::GhToken);
            }
        }
        if let Some(token) = non_empty_var(self.env.as_ref(), GITHUB_TOKEN) {
            return (token, TokenSource::GithubToken);
        }
        (String::new(), TokenSource::None)
    }

    fn stored_token(&self, host: &str) -> Option<String> {
        let stored = self.store.token_for_host(host)?;
        if stored.token.is_empty() {
            return None;
        }
        debug!(%host, source = %stored.source, "token found in credential store");
        Some(stored.token)
    }
}
