//! The configured client handed back to callers.

use octocrab::Octocrab;
use url::Url;

/// A ready-to-use API client: the configured octocrab instance plus the
/// base URLs that were resolved for it.
///
/// The GraphQL endpoint is resolvable through
/// [`CredentialResolver::endpoints`](credential_resolver::CredentialResolver::endpoints)
/// but is not attached here; REST and upload are the two bases the wrapped
/// client acts on.
#[derive(Debug, Clone)]
pub struct GitHubClient {
    octocrab: Octocrab,
    base_url: Url,
    upload_url: Url,
}

impl GitHubClient {
    pub(crate) fn new(octocrab: Octocrab, base_url: Url, upload_url: Url) -> Self {
        Self {
            octocrab,
            base_url,
            upload_url,
        }
    }

    /// The underlying octocrab client.
    pub fn octocrab(&self) -> &Octocrab {
        &self.octocrab
    }

    /// REST base URL, normalized to end with exactly one `/`.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Upload base URL, normalized to end with exactly one `/`.
    pub fn upload_url(&self) -> &Url {
        &self.upload_url
    }

    /// Consumes the wrapper, returning the octocrab client.
    pub fn into_octocrab(self) -> Octocrab {
        self.octocrab
    }
}
