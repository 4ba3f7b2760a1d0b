use crate::config::AuditConfig;
use crate::error::Result;
use crate::html;
use crate::links::LinkSet;
use crate::session::Page;

/// Collects the hrefs of every anchor on the target page and persists them.
///
/// A failed load of the target page aborts the run; so does a failed write of
/// the links file.
pub async fn harvest<P: Page>(page: &P, config: &AuditConfig) -> Result<LinkSet> {
    ::log::info!("Harvesting links from {}", config.target_url);

    page.goto(&config.target_url).await?;
    page.wait_until_ready(config.navigation_timeout()).await?;

    let source = page.source().await?;
    let hrefs = html::extract_hrefs(&source);
    let found = hrefs.len();
    let links = LinkSet::from_hrefs(hrefs);

    ::log::info!(
        "Found {} anchors, {} unique links in {}",
        found,
        links.len(),
        config.target_url
    );

    if let Err(e) = links.save(&config.links_path).await {
        ::log::error!("Failed to save links: {}", e);
        return Err(e);
    }

    Ok(links)
}
