//! GitHub App installation authentication.
//!
//! When no token is available anywhere, automation can still authenticate
//! as a GitHub App installation: a JWT signed with the App's private key is
//! exchanged for a short-lived installation access token. The exchange,
//! caching, and refresh of that token are handled inside the returned
//! octocrab client; callers see a client that always presents a currently
//! valid bearer token.

use jsonwebtoken::EncodingKey;
use octocrab::models::InstallationId;
use octocrab::Octocrab;
use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, instrument};

use credential_resolver::{repair_private_key, repository, Environment};

use crate::config::Config;
use crate::discovery;
use crate::errors::Error;

// Reference the tests module in the separate file
#[cfg(test)]
#[path = "app_auth_tests.rs"]
mod tests;

const GITHUB_APP_ID: &str = "GITHUB_APP_ID";
const GITHUB_APP_INSTALLATION_ID: &str = "GITHUB_APP_INSTALLATION_ID";
const GITHUB_APP_PRIVATE_KEY: &str = "GITHUB_APP_PRIVATE_KEY";

/// GitHub App credentials as provided through the environment.
#[derive(Debug)]
pub struct AppAuth {
    pub app_id: u64,
    /// Absent when the installation must be discovered from repository
    /// context.
    pub installation_id: Option<u64>,
    /// PEM private key, already repaired if its newlines were collapsed.
    pub private_key: SecretString,
}

impl AppAuth {
    /// Reads App credentials from `env`.
    ///
    /// Requires `GITHUB_APP_ID` and `GITHUB_APP_PRIVATE_KEY`; the
    /// installation ID is optional. Key material that lost its newlines in
    /// transit is repaired on ingestion.
    ///
    /// # Errors
    ///
    /// [`Error::InsufficientAppCredentials`] when the App ID or key is
    /// missing, [`Error::InvalidInteger`] when an ID variable does not
    /// parse.
    pub fn from_env(env: &dyn Environment) -> Result<Self, Error> {
        let app_id = env.var(GITHUB_APP_ID).unwrap_or_default();
        let private_key = env.var(GITHUB_APP_PRIVATE_KEY).unwrap_or_default();
        if app_id.is_empty() || private_key.is_empty() {
            return Err(Error::InsufficientAppCredentials);
        }

        let app_id = parse_integer(GITHUB_APP_ID, &app_id)?;
        let installation_id = match env.var(GITHUB_APP_INSTALLATION_ID) {
            Some(value) if !value.is_empty() => {
                Some(parse_integer(GITHUB_APP_INSTALLATION_ID, &value)?)
            }
            _ => None,
        };

        Ok(Self {
            app_id,
            installation_id,
            private_key: repair_private_key(&private_key).into(),
        })
    }

    /// Produces a client that authenticates with installation access
    /// tokens, discovering the installation from the configured or detected
    /// repository context when no ID was supplied.
    #[instrument(skip(self, config, endpoint), fields(app_id = self.app_id))]
    pub(crate) async fn installation_client(
        &self,
        config: &Config,
        endpoint: &str,
    ) -> Result<Octocrab, Error> {
        let app = self.app_client(config, endpoint)?;
        let installation_id = match self.installation_id {
            Some(id) => InstallationId::from(id),
            None => {
                let target = repository::detect(
                    config.env.as_ref(),
                    config.owner.as_deref(),
                    config.repo.as_deref(),
                )?;
                discovery::discover_installation_id(&app, &target).await?
            }
        };
        debug!(installation_id = ?installation_id, "installation selected");
        Ok(app.installation(installation_id)?)
    }

    /// A client authenticating as the App itself (signed JWT), suitable for
    /// installation discovery and token exchange.
    fn app_client(&self, config: &Config, endpoint: &str) -> Result<Octocrab, Error> {
        let key = EncodingKey::from_rsa_pem(self.private_key.expose_secret().as_bytes())
            .map_err(Error::InvalidPrivateKey)?;
        // The connect phase covers both the TCP dial and the TLS handshake.
        let client = Octocrab::builder()
            .base_uri(endpoint)?
            .set_connect_timeout(Some(config.connect_timeout + config.tls_handshake_timeout))
            .set_read_timeout(Some(config.timeout))
            .set_write_timeout(Some(config.timeout))
            .app(self.app_id.into(), key)
            .build()?;
        Ok(client)
    }
}

fn parse_integer(variable: &'static str, value: &str) -> Result<u64, Error> {
    value.parse().map_err(|source| Error::InvalidInteger {
        variable,
        value: value.to_string(),
        source,
    })
}
