//! WebDriver connection and browser configuration.

use serde::Deserialize;

/// Browser driven through the WebDriver endpoint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Browser {
    #[default]
    Chrome,
    Firefox,
}

impl std::fmt::Display for Browser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Chrome => write!(f, "chrome"),
            Self::Firefox => write!(f, "firefox"),
        }
    }
}

/// Settings for the WebDriver renderer.
#[derive(Debug, Clone, Deserialize)]
pub struct WebDriverConfig {
    /// Base URL of the driver (`chromedriver`, `geckodriver`, Selenium).
    #[serde(default = "default_url")]
    pub url: String,
    #[serde(default)]
    pub browser: Browser,
    #[serde(default = "default_headless")]
    pub headless: bool,
    #[serde(default = "default_window_width")]
    pub window_width: u32,
    #[serde(default = "default_window_height")]
    pub window_height: u32,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Delay between element lookups while waiting for a selector.
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
    /// Upper bound for any single driver request.
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
}

fn default_url() -> String {
    "http://localhost:9515".into()
}

const fn default_headless() -> bool {
    true
}

const fn default_window_width() -> u32 {
    1920
}

const fn default_window_height() -> u32 {
    1080
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) Chrome/121.0.0.0 Safari/537.36".into()
}

const fn default_poll_interval_ms() -> u64 {
    250
}

const fn default_request_timeout_ms() -> u64 {
    30_000
}

impl Default for WebDriverConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            browser: Browser::default(),
            headless: default_headless(),
            window_width: default_window_width(),
            window_height: default_window_height(),
            user_agent: default_user_agent(),
            poll_interval_ms: default_poll_interval_ms(),
            request_timeout_ms: default_request_timeout_ms(),
        }
    }
}
