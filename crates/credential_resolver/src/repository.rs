//! Owner and repository detection.
//!
//! Automation frequently runs inside a checkout or a CI job where the target
//! repository is implied rather than configured. Detection prefers explicit
//! configuration, then the CLI-style `GH_REPO` override, then the variables
//! CI platforms inject.

use tracing::debug;

use crate::environment::{non_empty_var, Environment};
use crate::errors::Error;

// Reference the tests module in the separate file
#[cfg(test)]
#[path = "repository_tests.rs"]
mod tests;

const GH_REPO: &str = "GH_REPO";
const GITHUB_REPOSITORY: &str = "GITHUB_REPOSITORY";
const GITHUB_REPOSITORY_OWNER: &str = "GITHUB_REPOSITORY_OWNER";

/// Repository coordinates. `repo` is absent when only an owning account
/// could be established.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnerRepo {
    pub owner: String,
    pub repo: Option<String>,
}

impl OwnerRepo {
    pub fn new(owner: impl Into<String>, repo: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            repo: Some(repo.into()),
        }
    }

    pub fn owner_only(owner: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            repo: None,
        }
    }

    /// Parses an `owner/repo` value.
    ///
    /// Values copied out of browser address bars or clone commands often
    /// carry a host prefix (`git.example.com/owner/repo`); the last two
    /// segments always win. Fewer than two segments is an error.
    pub fn parse(value: &str) -> Result<Self, Error> {
        let segments: Vec<&str> = value.split('/').collect();
        if segments.len() < 2 {
            return Err(Error::InvalidRepositoryFormat {
                value: value.to_string(),
            });
        }
        Ok(Self::new(
            segments[segments.len() - 2],
            segments[segments.len() - 1],
        ))
    }
}

/// Establishes repository coordinates from explicit values or the
/// environment.
///
/// An explicit non-empty `owner` wins outright, paired with `repo` when that
/// is also set. Otherwise `GH_REPO` is parsed as an (optionally
/// host-prefixed) `owner/repo` pair, then `GITHUB_REPOSITORY` as an exact
/// `owner/repo` pair, then `GITHUB_REPOSITORY_OWNER` as an owner alone.
pub fn detect(
    env: &dyn Environment,
    owner: Option<&str>,
    repo: Option<&str>,
) -> Result<OwnerRepo, Error> {
    if let Some(owner) = owner.filter(|value| !value.is_empty()) {
        return Ok(OwnerRepo {
            owner: owner.to_string(),
            repo: repo
                .filter(|value| !value.is_empty())
                .map(str::to_string),
        });
    }

    if let Some(value) = non_empty_var(env, GH_REPO) {
        debug!(variable = GH_REPO, "detecting repository from environment");
        return OwnerRepo::parse(&value);
    }

    if let Some(value) = non_empty_var(env, GITHUB_REPOSITORY) {
        debug!(
            variable = GITHUB_REPOSITORY,
            "detecting repository from environment"
        );
        let segments: Vec<&str> = value.split('/').collect();
        if segments.len() != 2 {
            return Err(Error::InvalidRepositoryFormat { value });
        }
        return Ok(OwnerRepo::new(segments[0], segments[1]));
    }

    if let Some(value) = non_empty_var(env, GITHUB_REPOSITORY_OWNER) {
        debug!(
            variable = GITHUB_REPOSITORY_OWNER,
            "detecting owner from environment"
        );
        return Ok(OwnerRepo::owner_only(value));
    }

    Err(Error::RepositoryNotDetected)
}
