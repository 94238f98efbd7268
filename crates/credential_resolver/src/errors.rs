//! Error types for repository detection.
//!
//! Token and host resolution never fail: missing credentials resolve to an
//! empty token and the decision of what that means belongs to the caller.
//! Only repository coordinates can be malformed or undetectable.

use thiserror::Error;

/// Errors surfaced while establishing repository coordinates.
#[derive(Debug, Error)]
pub enum Error {
    /// A repository value, explicit or from the environment, was not an
    /// `owner/repo` pair.
    #[error("invalid owner/repo format: {value:?}")]
    InvalidRepositoryFormat {
        /// The offending value.
        value: String,
    },

    /// No explicit coordinates were given and no repository variable was set.
    #[error("could not detect an owner or repository from the environment")]
    RepositoryNotDetected,
}
