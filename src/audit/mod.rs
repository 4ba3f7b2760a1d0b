pub mod form;
pub mod harvest;
pub mod menu;
pub mod walk;

pub use form::{FieldAction, FormReport, fill_form};
pub use harvest::harvest;
pub use menu::{MenuReport, walk_menu};
pub use walk::{WalkReport, walk, walk_saved};

use crate::config::AuditConfig;
use crate::error::Result;
use crate::links::LinkSet;
use crate::session::Page;

/// Harvest the target page's links, then walk them
pub async fn audit<P: Page>(page: &P, config: &AuditConfig) -> Result<(LinkSet, WalkReport)> {
    let links = harvest(page, config).await?;
    let report = walk(page, &links, config).await?;
    Ok((links, report))
}

/// Click through the navigation menu, then fill and submit the contact form
/// on whichever page the tour ended on
pub async fn tour<P: Page>(page: &P, config: &AuditConfig) -> Result<(MenuReport, FormReport)> {
    let menu = walk_menu(page, config).await?;
    let form = fill_form(page, config).await?;
    Ok((menu, form))
}
