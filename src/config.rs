use crate::error::{AuditError, Result};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

/// Site audited when no configuration is given
pub const DEFAULT_TARGET_URL: &str = "https://apptest.ai/";

/// Configuration for an audit run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditConfig {
    /// Page the harvester reads and the walker returns to after every link
    pub target_url: String,

    /// URL for the WebDriver instance
    #[serde(default = "default_webdriver_url")]
    pub webdriver_url: String,

    /// Run the browser without a visible window
    #[serde(default)]
    pub headless: bool,

    /// Where the harvested link set is persisted
    #[serde(default = "default_links_path")]
    pub links_path: PathBuf,

    /// Directory the walker writes screenshots into
    #[serde(default = "default_screenshot_dir")]
    pub screenshot_dir: PathBuf,

    /// Upper bound for every navigation and readiness wait
    #[serde(default = "default_navigation_timeout_secs")]
    pub navigation_timeout_secs: u64,

    /// Regex patterns for links the walker should not visit
    #[serde(default)]
    pub exclude_patterns: Vec<String>,

    #[serde(default)]
    pub menu: MenuConfig,

    #[serde(default)]
    pub form: FormConfig,
}

/// Configuration for the navigation menu tour
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuConfig {
    /// Selector matching the top-level menu anchors
    #[serde(default = "default_menu_selector")]
    pub selector: String,

    /// Also activate the final menu item (by default the tour stops one short)
    #[serde(default)]
    pub visit_last_item: bool,
}

/// Configuration for the contact form filler
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormConfig {
    /// Selector of the form element whose fields get filled
    #[serde(default = "default_form_container")]
    pub container_selector: String,

    #[serde(default = "default_submit_marker")]
    pub submit_marker: String,

    #[serde(default = "default_email_marker")]
    pub email_marker: String,

    #[serde(default = "default_placeholder_email")]
    pub placeholder_email: String,

    #[serde(default = "default_placeholder_text")]
    pub placeholder_text: String,

    /// Pause after each text field so the page's own validation can redraw
    #[serde(default = "default_field_pause_ms")]
    pub field_pause_ms: u64,
}

fn default_webdriver_url() -> String {
    "http://localhost:4444".to_string()
}

fn default_links_path() -> PathBuf {
    PathBuf::from("./scrapingJson.json")
}

fn default_screenshot_dir() -> PathBuf {
    PathBuf::from("./screenshots")
}

fn default_navigation_timeout_secs() -> u64 {
    30
}

fn default_menu_selector() -> String {
    "#menu-standard > li > a".to_string()
}

fn default_form_container() -> String {
    "#wpcf7-f1216-p1183-o2 > form".to_string()
}

fn default_submit_marker() -> String {
    "submit".to_string()
}

fn default_email_marker() -> String {
    "email".to_string()
}

fn default_placeholder_email() -> String {
    "hello@naver.com".to_string()
}

fn default_placeholder_text() -> String {
    "hi".to_string()
}

fn default_field_pause_ms() -> u64 {
    1000
}

impl Default for MenuConfig {
    fn default() -> Self {
        Self {
            selector: default_menu_selector(),
            visit_last_item: false,
        }
    }
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            container_selector: default_form_container(),
            submit_marker: default_submit_marker(),
            email_marker: default_email_marker(),
            placeholder_email: default_placeholder_email(),
            placeholder_text: default_placeholder_text(),
            field_pause_ms: default_field_pause_ms(),
        }
    }
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self::new(DEFAULT_TARGET_URL)
    }
}

impl AuditConfig {
    /// Create a new configuration with default values
    pub fn new(target_url: &str) -> Self {
        Self {
            target_url: target_url.to_string(),
            webdriver_url: default_webdriver_url(),
            headless: false,
            links_path: default_links_path(),
            screenshot_dir: default_screenshot_dir(),
            navigation_timeout_secs: default_navigation_timeout_secs(),
            exclude_patterns: Vec::new(),
            menu: MenuConfig::default(),
            form: FormConfig::default(),
        }
    }

    /// Load configuration from a file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let mut file = File::open(path).map_err(|e| AuditError::io(path, e))?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)
            .map_err(|e| AuditError::io(path, e))?;

        Self::from_json(&contents)
    }

    /// Load configuration from a JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Override the WebDriver URL with the WEBDRIVER_URL environment variable if set
    pub fn apply_env(&mut self) {
        if let Ok(webdriver_url) = std::env::var("WEBDRIVER_URL") {
            if !webdriver_url.is_empty() {
                self.webdriver_url = webdriver_url;
            }
        }
    }

    /// Check values serde cannot check on its own
    pub fn validate(&self) -> Result<()> {
        Url::parse(&self.target_url).map_err(|e| {
            AuditError::Config(format!("target_url {:?} is not a URL: {}", self.target_url, e))
        })?;

        if self.navigation_timeout_secs == 0 {
            return Err(AuditError::Config(
                "navigation_timeout_secs must be greater than zero".to_string(),
            ));
        }

        if self.menu.selector.trim().is_empty() || self.form.container_selector.trim().is_empty() {
            return Err(AuditError::Config("selectors must not be empty".to_string()));
        }

        Ok(())
    }

    pub fn navigation_timeout(&self) -> Duration {
        Duration::from_secs(self.navigation_timeout_secs)
    }
}

impl FormConfig {
    /// Selector for the input-like descendants of the form container
    pub fn field_selector(&self) -> String {
        format!("{0} input, {0} textarea", self.container_selector.trim())
    }

    pub fn field_pause(&self) -> Duration {
        Duration::from_millis(self.field_pause_ms)
    }
}
