//! Construction of token-authenticated octocrab transports.

use http::header::AUTHORIZATION;
use octocrab::Octocrab;

use crate::config::Config;
use crate::errors::Error;

// Reference the tests module in the separate file
#[cfg(test)]
#[path = "transport_tests.rs"]
mod tests;

/// Builds the REST client for `endpoint`.
///
/// A non-empty `token` is attached to every request as the legacy
/// `Authorization: token ...` header, which Enterprise Server deployments
/// accept universally. An empty token attaches nothing rather than an
/// empty header, so unauthenticated clients stay genuinely anonymous.
pub(crate) fn token_client(config: &Config, endpoint: &str, token: &str) -> Result<Octocrab, Error> {
    // The connect phase covers both the TCP dial and the TLS handshake.
    let mut builder = Octocrab::builder()
        .base_uri(endpoint)?
        .set_connect_timeout(Some(config.connect_timeout + config.tls_handshake_timeout))
        .set_read_timeout(Some(config.timeout))
        .set_write_timeout(Some(config.timeout));
    if !token.is_empty() {
        builder = builder.add_header(AUTHORIZATION, format!("token {token}"));
    }
    Ok(builder.build()?)
}
