//! API endpoint derivation for github.com and GitHub Enterprise Server.

use url::Url;

use crate::environment::{non_empty_var, Environment};
use crate::resolver::DEFAULT_HOST;

// Reference the tests module in the separate file
#[cfg(test)]
#[path = "endpoints_tests.rs"]
mod tests;

/// REST base URL for github.com.
pub const DEFAULT_REST_ENDPOINT: &str = "https://api.github.com";
/// Asset upload base URL for github.com.
pub const DEFAULT_UPLOAD_ENDPOINT: &str = "https://uploads.github.com";
/// GraphQL endpoint URL for github.com.
pub const DEFAULT_GRAPHQL_ENDPOINT: &str = "https://api.github.com/graphql";

const GITHUB_API_URL: &str = "GITHUB_API_URL";
const GITHUB_GRAPHQL_URL: &str = "GITHUB_GRAPHQL_URL";

/// The three API bases a client may need. The stored strings carry no
/// trailing slash; consumers append one where their HTTP stack requires it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiEndpoints {
    /// REST (v3) base URL.
    pub rest: String,
    /// Release asset and artifact upload base URL.
    pub upload: String,
    /// GraphQL (v4) endpoint URL.
    pub graphql: String,
}

impl ApiEndpoints {
    /// Derives the endpoints for `host`.
    ///
    /// Enterprise Server hosts get the conventional `/api/v3`, `/api/uploads`
    /// and `/api/graphql` paths under `https://{host}` and ignore the
    /// platform override variables entirely.
    ///
    /// On github.com the public defaults apply, then `GITHUB_API_URL`
    /// replaces the REST base. When the override's host does not itself
    /// contain `github.com`, the upload base follows it to
    /// `https://{host}/api/uploads`, keeping the two bases pointed at the
    /// same instance. `GITHUB_GRAPHQL_URL` replaces only the GraphQL
    /// endpoint and is taken verbatim.
    pub fn for_host(host: &str, env: &dyn Environment) -> Self {
        if host != DEFAULT_HOST {
            return Self {
                rest: format!("https://{host}/api/v3"),
                upload: format!("https://{host}/api/uploads"),
                graphql: format!("https://{host}/api/graphql"),
            };
        }

        let mut endpoints = Self {
            rest: DEFAULT_REST_ENDPOINT.to_string(),
            upload: DEFAULT_UPLOAD_ENDPOINT.to_string(),
            graphql: DEFAULT_GRAPHQL_ENDPOINT.to_string(),
        };

        if let Some(api_url) = non_empty_var(env, GITHUB_API_URL) {
            if let Some(upload) = upload_base_for(&api_url) {
                endpoints.upload = upload;
            }
            endpoints.rest = api_url;
        }
        if let Some(graphql_url) = non_empty_var(env, GITHUB_GRAPHQL_URL) {
            endpoints.graphql = graphql_url;
        }

        endpoints
    }
}

/// Upload base matching the host of `api_url`, or `None` when the URL does
/// not parse, has no host, or points back at github.com.
fn upload_base_for(api_url: &str) -> Option<String> {
    let parsed = Url::parse(api_url).ok()?;
    let authority = authority_of(&parsed)?;
    if authority.contains(DEFAULT_HOST) {
        return None;
    }
    Some(format!("https://{authority}/api/uploads"))
}

/// Host plus port when one is present, matching how the URL was written.
fn authority_of(url: &Url) -> Option<String> {
    let host = url.host_str()?;
    Some(match url.port() {
        Some(port) => format!("{host}:{port}"),
        None => host.to_string(),
    })
}
