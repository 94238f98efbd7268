//! Installation discovery for App-authenticated clients.

use octocrab::models::{Installation, InstallationId};
use octocrab::Octocrab;
use tracing::{debug, instrument};

use credential_resolver::OwnerRepo;

use crate::errors::Error;

// Reference the tests module in the separate file
#[cfg(test)]
#[path = "discovery_tests.rs"]
mod tests;

/// Page size for installation listings; the API maximum.
const INSTALLATIONS_PER_PAGE: u8 = 100;

/// Finds the installation of the authenticated App covering `target`.
///
/// With a repository the lookup is a single call. With only an owner the
/// App's installations are listed page by page, comparing each installation
/// account login to the owner exactly; the comparison is case-sensitive.
/// Pages are discarded as soon as they are scanned, and a match on the
/// final page is found like any other.
#[instrument(skip(app))]
pub(crate) async fn discover_installation_id(
    app: &Octocrab,
    target: &OwnerRepo,
) -> Result<InstallationId, Error> {
    if let Some(repo) = &target.repo {
        let installation = app
            .apps()
            .get_repository_installation(&target.owner, repo)
            .await?;
        debug!(installation_id = ?installation.id, "installation found via repository");
        return Ok(installation.id);
    }

    let mut page = app
        .apps()
        .installations()
        .per_page(INSTALLATIONS_PER_PAGE)
        .send()
        .await?;
    loop {
        if let Some(found) = page
            .items
            .iter()
            .find(|installation| installation.account.login == target.owner)
        {
            debug!(installation_id = ?found.id, "installation found via listing");
            return Ok(found.id);
        }
        page = match app.get_page::<Installation>(&page.next).await? {
            Some(next) => next,
            None => break,
        };
    }

    Err(Error::InstallationNotFound {
        account: target.owner.clone(),
    })
}
