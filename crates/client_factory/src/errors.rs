//! Error types for client construction.

use thiserror::Error;

/// Errors surfaced while building a client.
///
/// Every failure is reported synchronously to the caller; the factory never
/// retries and never logs an error in place of returning it.
#[derive(Debug, Error)]
pub enum Error {
    /// No token was configured or resolved, and the GitHub App installation
    /// flow could not produce one either. The wrapped error is the App-flow
    /// failure that exhausted the last option.
    #[error("no credentials found")]
    NoCredentials {
        #[source]
        source: Box<Error>,
    },

    /// App authentication was attempted without both an App ID and a
    /// private key.
    #[error(
        "not enough credentials for GitHub App authentication: \
         GITHUB_APP_ID and GITHUB_APP_PRIVATE_KEY are required"
    )]
    InsufficientAppCredentials,

    /// No installation of the authenticated App matched the detected owner.
    #[error("no App installation found for {account}")]
    InstallationNotFound {
        /// The owner login the App's installations were compared against.
        account: String,
    },

    /// A numeric environment variable did not parse.
    #[error("environment variable {variable} is not a valid integer: {value:?}")]
    InvalidInteger {
        variable: &'static str,
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },

    /// The App private key is not a usable RSA PEM, even after repair.
    #[error("invalid GitHub App private key")]
    InvalidPrivateKey(#[source] jsonwebtoken::errors::Error),

    /// An endpoint URL could not be parsed.
    #[error("invalid endpoint URL")]
    UrlParse(#[from] url::ParseError),

    /// Repository coordinates were malformed or undetectable.
    #[error(transparent)]
    Resolution(#[from] credential_resolver::Error),

    /// The underlying octocrab client could not be built, or an API call
    /// made during construction failed.
    #[error("GitHub API client error")]
    Api(#[from] octocrab::Error),
}
