use crate::config::AuditConfig;
use crate::error::{AuditError, Result};
use crate::session::{Element, NavigationMark, Page};
use async_trait::async_trait;
use fantoccini::{Client, ClientBuilder, Locator};
use serde_json::{Map, Value, json};
use std::time::Duration;
use tokio::time::timeout;

const POLL_INTERVAL: Duration = Duration::from_millis(100);

const MARK_SCRIPT: &str = "window.__siteAuditMark = true; return window.location.href;";

const NAVIGATION_STATE_SCRIPT: &str =
    "return [window.__siteAuditMark === true, document.readyState, window.location.href];";

const READY_STATE_SCRIPT: &str = "return document.readyState;";

/// A browser session owned by one audit run.
///
/// Close it with [`WebDriverSession::finish`] or [`WebDriverSession::close`];
/// the WebDriver server keeps the browser open otherwise.
pub struct WebDriverSession {
    client: Client,
}

impl WebDriverSession {
    /// Start a new browser session on the configured WebDriver server
    pub async fn connect(config: &AuditConfig) -> Result<Self> {
        let client = connect_to_webdriver(&config.webdriver_url, config.headless).await?;
        Ok(Self { client })
    }

    /// End the session
    pub async fn close(self) -> Result<()> {
        self.client.close().await?;
        ::log::debug!("Closed WebDriver session");
        Ok(())
    }

    /// Close the session and hand back the run's result.
    ///
    /// The session is closed whether or not `result` is an error; a close
    /// failure is only reported when the run itself succeeded.
    pub async fn finish<T>(self, result: Result<T>) -> Result<T> {
        let closed = self.close().await;
        match (result, closed) {
            (Ok(value), Ok(())) => Ok(value),
            (Ok(_), Err(e)) => Err(e),
            (Err(e), closed) => {
                if let Err(close_err) = closed {
                    ::log::warn!("Failed to close WebDriver session: {}", close_err);
                }
                Err(e)
            }
        }
    }
}

/// Capabilities requesting a visible or headless window from either driver
fn capabilities(headless: bool) -> Map<String, Value> {
    let mut caps = Map::new();
    if headless {
        caps.insert(
            "goog:chromeOptions".to_string(),
            json!({ "args": ["--headless=new"] }),
        );
        caps.insert(
            "moz:firefoxOptions".to_string(),
            json!({ "args": ["-headless"] }),
        );
    }
    caps
}

/// Connects to the WebDriver instance, falling back to the usual driver ports
async fn connect_to_webdriver(webdriver_url: &str, headless: bool) -> Result<Client> {
    let mut builder = ClientBuilder::native();
    builder.capabilities(capabilities(headless));

    let first_error = match builder.connect(webdriver_url).await {
        Ok(client) => {
            ::log::info!("Connected to WebDriver at {}", webdriver_url);
            return Ok(client);
        }
        Err(e) => {
            ::log::error!("Failed to connect to WebDriver at {}: {}", webdriver_url, e);
            e
        }
    };

    let fallback_urls = [
        "http://localhost:9515", // ChromeDriver default
        "http://localhost:4723", // Appium default
        "http://localhost:9222", // Chrome debug port default
        "http://127.0.0.1:4444", // Try with IP instead of localhost
    ];

    for url in fallback_urls.iter() {
        if *url == webdriver_url {
            continue;
        }

        ::log::info!("Trying fallback WebDriver URL: {}", url);
        if let Ok(client) = builder.connect(url).await {
            ::log::info!("Connected to fallback WebDriver at {}", url);
            return Ok(client);
        }
    }

    ::log::error!(
        "Make sure a WebDriver server is running or set the WEBDRIVER_URL environment variable"
    );
    Err(AuditError::Connect(first_error))
}

#[async_trait]
impl Page for WebDriverSession {
    type Element = WebDriverElement;

    async fn goto(&self, url: &str) -> Result<()> {
        ::log::debug!("Navigating to {}", url);
        self.client.goto(url).await?;
        Ok(())
    }

    async fn source(&self) -> Result<String> {
        Ok(self.client.source().await?)
    }

    async fn current_url(&self) -> Result<String> {
        Ok(self.client.current_url().await?.to_string())
    }

    async fn find_all(&self, selector: &str) -> Result<Vec<Self::Element>> {
        let elements = self.client.find_all(Locator::Css(selector)).await?;
        Ok(elements
            .into_iter()
            .map(|inner| WebDriverElement {
                client: self.client.clone(),
                inner,
            })
            .collect())
    }

    async fn back(&self) -> Result<()> {
        self.client.back().await?;
        Ok(())
    }

    async fn mark_navigation(&self) -> Result<NavigationMark> {
        let url = self.client.execute(MARK_SCRIPT, vec![]).await?;
        Ok(NavigationMark {
            url: url.as_str().unwrap_or_default().to_string(),
        })
    }

    async fn wait_for_navigation(&self, mark: &NavigationMark, limit: Duration) -> Result<()> {
        let waited = timeout(limit, async {
            loop {
                // Scripts can fail while the old document unloads; keep polling
                match self.client.execute(NAVIGATION_STATE_SCRIPT, vec![]).await {
                    Ok(Value::Array(state)) => {
                        let still_marked = state.first().and_then(Value::as_bool).unwrap_or(true);
                        let ready = state.get(1).and_then(Value::as_str) == Some("complete");
                        let url = state.get(2).and_then(Value::as_str).unwrap_or_default();
                        if ready && (!still_marked || url != mark.url) {
                            return;
                        }
                    }
                    Ok(other) => ::log::trace!("Unexpected navigation state: {}", other),
                    Err(e) => ::log::trace!("Navigation state not available yet: {}", e),
                }
                tokio::time::sleep(POLL_INTERVAL).await;
            }
        })
        .await;

        waited.map_err(|_| AuditError::timeout(format!("navigation away from {}", mark.url), limit))
    }

    async fn wait_until_ready(&self, limit: Duration) -> Result<()> {
        let waited = timeout(limit, async {
            loop {
                match self.client.execute(READY_STATE_SCRIPT, vec![]).await {
                    Ok(state) if state.as_str() == Some("complete") => return,
                    Ok(_) => {}
                    Err(e) => ::log::trace!("Ready state not available yet: {}", e),
                }
                tokio::time::sleep(POLL_INTERVAL).await;
            }
        })
        .await;

        waited.map_err(|_| AuditError::timeout("document to finish loading", limit))
    }

    async fn screenshot(&self) -> Result<Vec<u8>> {
        Ok(self.client.screenshot().await?)
    }
}

/// Element handle bound to the session that found it
pub struct WebDriverElement {
    client: Client,
    inner: fantoccini::elements::Element,
}

impl WebDriverElement {
    /// Run a script with this element as `arguments[0]`
    async fn run_script(&self, script: &str) -> Result<()> {
        let arg = serde_json::to_value(&self.inner)?;
        self.client.execute(script, vec![arg]).await?;
        Ok(())
    }
}

#[async_trait]
impl Element for WebDriverElement {
    async fn attr(&self, name: &str) -> Result<Option<String>> {
        Ok(self.inner.attr(name).await?)
    }

    async fn click(&self) -> Result<()> {
        self.inner.click().await?;
        Ok(())
    }

    async fn focus(&self) -> Result<()> {
        self.run_script("arguments[0].focus();").await
    }

    async fn type_text(&self, text: &str) -> Result<()> {
        self.inner.send_keys(text).await?;
        Ok(())
    }

    async fn open_in_current_context(&self) -> Result<()> {
        self.run_script("arguments[0].target = '_self';").await
    }
}
