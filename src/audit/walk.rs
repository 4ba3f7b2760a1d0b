use crate::config::AuditConfig;
use crate::error::{AuditError, Result};
use crate::filter::{LinkFilter, LinkKind, anchor_selector};
use crate::links::LinkSet;
use crate::session::{Element, Page};
use crate::utils::{ensure_dir, screenshot_path};
use std::path::PathBuf;

/// Outcome of a link walk
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WalkReport {
    /// Links that were clicked and captured
    pub visited: usize,
    /// Links with no matching anchor on the base page
    pub skipped_missing: usize,
    pub skipped_mail: usize,
    /// Links matching an exclude pattern
    pub skipped_excluded: usize,
    pub screenshots: Vec<PathBuf>,
}

/// Visits each harvested link from the base page and captures a screenshot.
///
/// Screenshots are named by the link's position in `links`, so skipped links
/// leave gaps in the sequence. A link expected to navigate that does not do so
/// within the navigation timeout aborts the walk.
pub async fn walk<P: Page>(page: &P, links: &LinkSet, config: &AuditConfig) -> Result<WalkReport> {
    let filter = LinkFilter::new(&config.exclude_patterns)?;
    let timeout = config.navigation_timeout();
    let mut report = WalkReport::default();

    ::log::info!(
        "Walking {} links from {} into {}",
        links.len(),
        config.target_url,
        config.screenshot_dir.display()
    );

    ensure_dir(&config.screenshot_dir).await?;
    page.goto(&config.target_url).await?;
    page.wait_until_ready(timeout).await?;

    for (index, href) in links.iter() {
        // Handles from the previous iteration died with the navigation back
        let Some(anchor) = page.find_all(&anchor_selector(href)).await?.into_iter().next() else {
            ::log::debug!("Link {} ({}) not found on page, skipping", index, href);
            report.skipped_missing += 1;
            continue;
        };

        let kind = LinkKind::classify(href);
        if kind == LinkKind::Mail {
            ::log::debug!("Skipping mail link {} ({})", index, href);
            report.skipped_mail += 1;
            continue;
        }
        if filter.is_excluded(href) {
            ::log::debug!("Link {} ({}) matches an exclude pattern, skipping", index, href);
            report.skipped_excluded += 1;
            continue;
        }

        anchor.open_in_current_context().await?;
        let mark = page.mark_navigation().await?;
        anchor.click().await?;

        if kind.expects_navigation() {
            page.wait_for_navigation(&mark, timeout).await?;
        }
        page.wait_until_ready(timeout).await?;

        let path = screenshot_path(&config.screenshot_dir, index);
        let png = page.screenshot().await?;
        tokio::fs::write(&path, png)
            .await
            .map_err(|e| AuditError::io(&path, e))?;
        ::log::info!("Captured link {} ({}) to {}", index, href, path.display());

        report.visited += 1;
        report.screenshots.push(path);

        page.goto(&config.target_url).await?;
        page.wait_until_ready(timeout).await?;
    }

    ::log::info!(
        "Walk complete - {} captured, {} missing, {} mail, {} excluded",
        report.visited,
        report.skipped_missing,
        report.skipped_mail,
        report.skipped_excluded
    );

    Ok(report)
}

/// Loads the links file and walks it
pub async fn walk_saved<P: Page>(page: &P, config: &AuditConfig) -> Result<WalkReport> {
    let links = LinkSet::load(&config.links_path).await?;
    walk(page, &links, config).await
}
