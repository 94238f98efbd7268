//! Ready-to-use GitHub API clients from environment-resolved credentials.
//!
//! [`new_client`] assembles an authenticated [`octocrab::Octocrab`] without
//! requiring any configuration: tokens, hosts, and endpoints are resolved
//! from the conventional environment variables and an optional credential
//! store, covering github.com and GitHub Enterprise Server alike. When no
//! token can be resolved at all, the factory falls back to authenticating
//! as a GitHub App installation, discovering the installation from the
//! surrounding repository context if its ID was not given.
//!
//! Everything is overridable through ordered options:
//!
//! ```rust
//! # async fn example() -> Result<(), client_factory::Error> {
//! let client = client_factory::new_client(vec![
//!     client_factory::token("ghp_example"),
//!     client_factory::endpoint("https://git.example.com/api/v3"),
//! ])
//! .await?;
//!
//! let _octocrab = client.octocrab();
//! # Ok(())
//! # }
//! ```
//!
//! Token-authenticated clients attach the legacy `Authorization: token ...`
//! header expected by Enterprise Server deployments; App-authenticated
//! clients exchange a signed JWT for installation access tokens and refresh
//! them transparently.

pub mod app_auth;
pub mod client;
pub mod config;
pub mod errors;
pub mod factory;

mod discovery;
mod transport;

pub use app_auth::AppAuth;
pub use client::GitHubClient;
pub use config::{
    connect_timeout, credential_store, endpoint, environment, http_client, owner, owner_repo,
    repo, skip_auth, timeout, tls_handshake_timeout, token, ClientOption, Config,
};
pub use errors::Error;
pub use factory::new_client;

pub use credential_resolver::{
    CredentialResolver, CredentialStore, Environment, InMemoryCredentialStore, MapEnvironment,
    NoCredentialStore, OwnerRepo, ProcessEnvironment,
};
