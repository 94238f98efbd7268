//! Credential, endpoint, and repository resolution for GitHub-style APIs.
//!
//! This crate answers three questions a client needs settled before it can
//! make its first request: which host to talk to, which token (if any) to
//! authenticate with, and which repository the surrounding automation is
//! acting on. All three are resolved from an ordered set of environment
//! variables and an optional externally managed credential store, covering
//! both github.com and GitHub Enterprise Server hosts.
//!
//! Resolution reads the environment through the [`Environment`] trait and
//! stored sessions through the [`CredentialStore`] trait, so embedders and
//! tests can substitute fixed inputs instead of mutating process state.
//! Absent credentials are not an error at this layer; [`CredentialResolver`]
//! reports an empty token and leaves the decision of what to do about it to
//! the caller.

pub mod credential_store;
pub mod endpoints;
pub mod environment;
pub mod errors;
pub mod key_repair;
pub mod repository;
pub mod resolver;

pub use credential_store::{CredentialStore, InMemoryCredentialStore, NoCredentialStore, StoredToken};
pub use endpoints::{
    ApiEndpoints, DEFAULT_GRAPHQL_ENDPOINT, DEFAULT_REST_ENDPOINT, DEFAULT_UPLOAD_ENDPOINT,
};
pub use environment::{Environment, MapEnvironment, ProcessEnvironment};
pub use errors::Error;
pub use key_repair::repair_private_key;
pub use repository::OwnerRepo;
pub use resolver::{
    CredentialResolver, HostSource, ResolvedCredentials, TokenSource, DEFAULT_HOST,
};
