//! Client assembly: option folding, credential resolution, and the choice
//! of transport.

use octocrab::Octocrab;
use tracing::{debug, instrument};
use url::Url;

use credential_resolver::{ApiEndpoints, CredentialResolver, DEFAULT_HOST};

use crate::app_auth::AppAuth;
use crate::client::GitHubClient;
use crate::config::{ClientOption, Config};
use crate::errors::Error;
use crate::transport;

// Reference the tests module in the separate file
#[cfg(test)]
#[path = "factory_tests.rs"]
mod tests;

/// Builds a client from `options`, resolving anything not explicitly set
/// from the environment and credential store.
///
/// The decision order is fixed:
///
/// 1. Fold the options over the defaults.
/// 2. Resolve host, token, and endpoints; an explicit token or endpoint
///    option takes precedence over the resolved values.
/// 3. `skip_auth` forces the effective token empty.
/// 4. A pre-built client, when supplied, is used verbatim.
/// 5. Otherwise an empty token (with auth not skipped) triggers the App
///    installation flow; any failure there fails the build with
///    [`Error::NoCredentials`], carrying the underlying cause.
/// 6. Otherwise the token transport is built, authenticated when the token
///    is non-empty.
///
/// The returned wrapper carries the REST and upload base URLs normalized to
/// exactly one trailing `/`. An explicit endpoint pointing away from
/// github.com brings the upload base along to `https://{host}/api/uploads`;
/// otherwise the environment-derived upload endpoint applies.
#[instrument(skip(options))]
pub async fn new_client(options: Vec<ClientOption>) -> Result<GitHubClient, Error> {
    let config = Config::from_options(options)?;
    let resolver = CredentialResolver::new(config.env.clone(), config.store.clone());
    let (resolved, endpoints) = resolver.resolve_all();

    let mut token = match &config.token {
        Some(explicit) => explicit.clone(),
        None => resolved.token,
    };
    if config.skip_auth {
        token.clear();
    }
    let endpoint = config
        .endpoint
        .clone()
        .unwrap_or_else(|| endpoints.rest.clone());
    let base_url = normalized(&endpoint)?;
    let upload_url = normalized(&upload_endpoint(&config, &base_url, &endpoints))?;

    let octocrab = build_octocrab(&config, &endpoint, &token).await?;
    debug!(%base_url, %upload_url, token_source = %resolved.token_source, "client configured");

    Ok(GitHubClient::new(octocrab, base_url, upload_url))
}

async fn build_octocrab(config: &Config, endpoint: &str, token: &str) -> Result<Octocrab, Error> {
    if let Some(client) = &config.client {
        return Ok(client.clone());
    }
    if token.is_empty() && !config.skip_auth {
        return installation_flow(config, endpoint)
            .await
            .map_err(|source| Error::NoCredentials {
                source: Box::new(source),
            });
    }
    transport::token_client(config, endpoint, token)
}

async fn installation_flow(config: &Config, endpoint: &str) -> Result<Octocrab, Error> {
    let auth = AppAuth::from_env(config.env.as_ref())?;
    auth.installation_client(config, endpoint).await
}

/// The upload base paired with `base_url`: its own host's `/api/uploads`
/// when an explicit endpoint points away from github.com, the derived
/// upload endpoint otherwise.
fn upload_endpoint(config: &Config, base_url: &Url, derived: &ApiEndpoints) -> String {
    if config.endpoint.is_some() {
        if let Some(authority) = authority_of(base_url) {
            if !authority.contains(DEFAULT_HOST) {
                return format!("https://{authority}/api/uploads");
            }
        }
    }
    derived.upload.clone()
}

/// Host plus port when one is present, matching how the URL was written.
fn authority_of(url: &Url) -> Option<String> {
    let host = url.host_str()?;
    Some(match url.port() {
        Some(port) => format!("{host}:{port}"),
        None => host.to_string(),
    })
}

/// Parses `endpoint` and guarantees the path ends with exactly one `/`.
fn normalized(endpoint: &str) -> Result<Url, Error> {
    let mut url = Url::parse(endpoint)?;
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}
