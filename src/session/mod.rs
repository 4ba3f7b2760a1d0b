pub mod webdriver;

#[cfg(test)]
pub(crate) mod fake;

use crate::error::Result;
use async_trait::async_trait;
use std::time::Duration;

pub use webdriver::WebDriverSession;

/// State recorded just before an interaction that may navigate.
///
/// A navigation has happened once the page no longer carries the marker set
/// when this was taken (new document) or its URL differs (same-document jump).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationMark {
    pub url: String,
}

/// A browser page driven by one of the audit phases.
///
/// Element handles returned by [`Page::find_all`] are only valid until the next
/// navigation; callers re-query instead of holding them across a click or
/// [`Page::back`].
#[async_trait]
pub trait Page: Send + Sync {
    type Element: Element;

    /// Navigate to `url` and wait for the load to finish
    async fn goto(&self, url: &str) -> Result<()>;

    /// Serialized DOM of the current document
    async fn source(&self) -> Result<String>;

    async fn current_url(&self) -> Result<String>;

    /// All elements matching a CSS selector, in document order
    async fn find_all(&self, selector: &str) -> Result<Vec<Self::Element>>;

    /// Go back one step in history
    async fn back(&self) -> Result<()>;

    /// Record the current document so a later navigation can be detected
    async fn mark_navigation(&self) -> Result<NavigationMark>;

    /// Wait until a navigation away from `mark` has completed
    async fn wait_for_navigation(&self, mark: &NavigationMark, timeout: Duration) -> Result<()>;

    /// Wait until the current document has finished loading
    async fn wait_until_ready(&self, timeout: Duration) -> Result<()>;

    /// PNG image of the current viewport
    async fn screenshot(&self) -> Result<Vec<u8>>;
}

/// An element on the current document of a [`Page`]
#[async_trait]
pub trait Element: Send + Sync {
    async fn attr(&self, name: &str) -> Result<Option<String>>;

    async fn click(&self) -> Result<()>;

    async fn focus(&self) -> Result<()>;

    /// Type text into the element as key presses
    async fn type_text(&self, text: &str) -> Result<()>;

    /// Make a link open in the current browsing context instead of a new tab
    async fn open_in_current_context(&self) -> Result<()>;
}
