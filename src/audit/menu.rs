use crate::config::AuditConfig;
use crate::error::Result;
use crate::session::{Element, Page};

/// Outcome of a menu tour
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MenuReport {
    /// Menu items found on the target page
    pub discovered: usize,
    pub activated: usize,
    /// Times a menu-less page sent the tour back one step
    pub backtracks: usize,
}

/// Number of menu positions the tour activates out of `discovered`.
///
/// The last item is left out unless `visit_last_item` is set.
pub fn activation_bound(discovered: usize, visit_last_item: bool) -> usize {
    if visit_last_item {
        discovered
    } else {
        discovered.saturating_sub(1)
    }
}

/// Clicks through the top-level navigation menu by position.
///
/// Only a running position is tracked against the menu found on the target
/// page, so the tour assumes every page carries the same menu. Pages without a
/// menu are left with a step back in history.
pub async fn walk_menu<P: Page>(page: &P, config: &AuditConfig) -> Result<MenuReport> {
    let selector = &config.menu.selector;
    let timeout = config.navigation_timeout();

    page.goto(&config.target_url).await?;
    page.wait_until_ready(timeout).await?;

    let mut items = page.find_all(selector).await?;
    let mut report = MenuReport {
        discovered: items.len(),
        ..MenuReport::default()
    };
    let bound = activation_bound(report.discovered, config.menu.visit_last_item);

    ::log::info!(
        "Found {} menu items on {}, activating {}",
        report.discovered,
        config.target_url,
        bound
    );

    for position in 0..bound {
        let Some(item) = items.get(position) else {
            ::log::warn!(
                "Menu shrank to {} items before position {}, stopping",
                items.len(),
                position
            );
            break;
        };

        let mark = page.mark_navigation().await?;
        item.click().await?;
        report.activated += 1;

        match page.wait_for_navigation(&mark, timeout).await {
            Ok(()) => {}
            Err(e) if e.is_timeout() => {
                ::log::warn!("Menu item {} did not navigate: {}", position, e);
            }
            Err(e) => return Err(e),
        }
        page.wait_until_ready(timeout).await?;
        ::log::info!("Activated menu item {}, now at {}", position, page.current_url().await?);

        // The new document replaced every element the old list pointed at
        items = page.find_all(selector).await?;
        if items.is_empty() {
            ::log::debug!("No menu on this page, going back");
            page.back().await?;
            page.wait_until_ready(timeout).await?;
            report.backtracks += 1;
            items = page.find_all(selector).await?;
        }
    }

    ::log::info!(
        "Menu tour complete - {} of {} items activated, {} backtracks",
        report.activated,
        report.discovered,
        report.backtracks
    );

    Ok(report)
}
