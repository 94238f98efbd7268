//! Client configuration and its ordered option set.
//!
//! Construction follows the functional-options shape: [`new_client`] takes a
//! list of [`ClientOption`] values and folds them, in order, over a default
//! [`Config`]. Every option constructor here ignores empty strings and zero
//! durations, so an option built from an unset setting is a harmless no-op
//! and a later non-empty option overrides an earlier one.
//!
//! [`new_client`]: crate::factory::new_client

use std::sync::Arc;
use std::time::Duration;

use octocrab::Octocrab;

use credential_resolver::{
    CredentialStore, Environment, NoCredentialStore, OwnerRepo, ProcessEnvironment,
};

use crate::errors::Error;

// Reference the tests module in the separate file
#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;

pub(crate) const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);
pub(crate) const DEFAULT_TLS_HANDSHAKE_TIMEOUT: Duration = Duration::from_secs(5);
pub(crate) const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Assembled configuration for one client build.
pub struct Config {
    pub(crate) token: Option<String>,
    pub(crate) endpoint: Option<String>,
    pub(crate) owner: Option<String>,
    pub(crate) repo: Option<String>,
    pub(crate) connect_timeout: Duration,
    pub(crate) tls_handshake_timeout: Duration,
    pub(crate) timeout: Duration,
    pub(crate) client: Option<Octocrab>,
    pub(crate) skip_auth: bool,
    pub(crate) env: Arc<dyn Environment>,
    pub(crate) store: Arc<dyn CredentialStore>,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // `env` and `store` are trait objects without a Debug bound.
        f.debug_struct("Config")
            .field("token", &self.token)
            .field("endpoint", &self.endpoint)
            .field("owner", &self.owner)
            .field("repo", &self.repo)
            .field("connect_timeout", &self.connect_timeout)
            .field("tls_handshake_timeout", &self.tls_handshake_timeout)
            .field("timeout", &self.timeout)
            .field("client", &self.client)
            .field("skip_auth", &self.skip_auth)
            .finish_non_exhaustive()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            token: None,
            endpoint: None,
            owner: None,
            repo: None,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            tls_handshake_timeout: DEFAULT_TLS_HANDSHAKE_TIMEOUT,
            timeout: DEFAULT_TIMEOUT,
            client: None,
            skip_auth: false,
            env: Arc::new(ProcessEnvironment),
            store: Arc::new(NoCredentialStore),
        }
    }
}

impl Config {
    /// Applies `options` in order over the defaults.
    pub fn from_options(options: impl IntoIterator<Item = ClientOption>) -> Result<Self, Error> {
        options
            .into_iter()
            .try_fold(Self::default(), |config, option| (option.apply)(config))
    }
}

/// One configuration step, applied in the order given to the factory.
pub struct ClientOption {
    apply: Box<dyn FnOnce(Config) -> Result<Config, Error> + Send>,
}

impl ClientOption {
    fn new(apply: impl FnOnce(Config) -> Result<Config, Error> + Send + 'static) -> Self {
        Self {
            apply: Box::new(apply),
        }
    }
}

/// Authenticates with `token` instead of resolving one.
pub fn token(token: impl Into<String>) -> ClientOption {
    let token = token.into();
    ClientOption::new(move |mut config| {
        if !token.is_empty() {
            config.token = Some(token);
        }
        Ok(config)
    })
}

/// Overrides the REST endpoint, bypassing host-based derivation.
pub fn endpoint(url: impl Into<String>) -> ClientOption {
    let url = url.into();
    ClientOption::new(move |mut config| {
        if !url.is_empty() {
            config.endpoint = Some(url);
        }
        Ok(config)
    })
}

/// Names the account the App installation flow should target.
pub fn owner(owner: impl Into<String>) -> ClientOption {
    let owner = owner.into();
    ClientOption::new(move |mut config| {
        if !owner.is_empty() {
            config.owner = Some(owner);
        }
        Ok(config)
    })
}

/// Names the repository the App installation flow should target.
pub fn repo(repo: impl Into<String>) -> ClientOption {
    let repo = repo.into();
    ClientOption::new(move |mut config| {
        if !repo.is_empty() {
            config.repo = Some(repo);
        }
        Ok(config)
    })
}

/// Sets owner and repository from a single `owner/repo` value, tolerating a
/// host prefix.
pub fn owner_repo(value: impl Into<String>) -> ClientOption {
    let value = value.into();
    ClientOption::new(move |mut config| {
        if value.is_empty() {
            return Ok(config);
        }
        let parsed = OwnerRepo::parse(&value)?;
        config.owner = Some(parsed.owner);
        config.repo = parsed.repo;
        Ok(config)
    })
}

/// Overrides the connection (dial) timeout. Zero is ignored.
pub fn connect_timeout(value: Duration) -> ClientOption {
    ClientOption::new(move |mut config| {
        if !value.is_zero() {
            config.connect_timeout = value;
        }
        Ok(config)
    })
}

/// Overrides the TLS handshake timeout. Zero is ignored.
pub fn tls_handshake_timeout(value: Duration) -> ClientOption {
    ClientOption::new(move |mut config| {
        if !value.is_zero() {
            config.tls_handshake_timeout = value;
        }
        Ok(config)
    })
}

/// Overrides the overall per-request timeout. Zero is ignored.
pub fn timeout(value: Duration) -> ClientOption {
    ClientOption::new(move |mut config| {
        if !value.is_zero() {
            config.timeout = value;
        }
        Ok(config)
    })
}

/// Uses a pre-built client verbatim instead of constructing an
/// authenticated one. The caller is responsible for its base URI and
/// authentication.
pub fn http_client(client: Octocrab) -> ClientOption {
    ClientOption::new(move |mut config| {
        config.client = Some(client);
        Ok(config)
    })
}

/// Disables authentication: the built client sends no Authorization header
/// and the App installation flow is never attempted.
pub fn skip_auth(skip: bool) -> ClientOption {
    ClientOption::new(move |mut config| {
        config.skip_auth = skip;
        Ok(config)
    })
}

/// Reads environment variables from `env` instead of the process
/// environment.
pub fn environment(env: Arc<dyn Environment>) -> ClientOption {
    ClientOption::new(move |mut config| {
        config.env = env;
        Ok(config)
    })
}

/// Consults `store` for stored sessions during credential resolution.
pub fn credential_store(store: Arc<dyn CredentialStore>) -> ClientOption {
    ClientOption::new(move |mut config| {
        config.store = store;
        Ok(config)
    })
}
