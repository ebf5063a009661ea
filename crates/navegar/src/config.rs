//! Suite configuration.
//!
//! The base URL is injected once at suite start (environment variable or
//! builder), so the suite can target staging or a local build without source
//! edits. Route paths stay relative in page objects and are resolved here.

use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variable consulted by [`SuiteConfig::from_env`]
pub const WEBSITE_URL_ENV: &str = "WEBSITE_URL";

/// Default deployment of the site under test
pub const DEFAULT_WEBSITE_URL: &str = "https://san-aoun.github.io/personal-site-monorepo";

/// Default bounded wait for element state (5 seconds)
pub const DEFAULT_TIMEOUT_MS: u64 = 5_000;

/// Default bounded wait for navigation (30 seconds)
pub const DEFAULT_NAVIGATION_TIMEOUT_MS: u64 = 30_000;

/// Configuration shared by every page object in a suite
#[derive(Debug, Clone)]
pub struct SuiteConfig {
    /// Base URL of the site under test (no trailing slash)
    pub base_url: String,
    /// Directory for named screenshots
    pub screenshot_dir: PathBuf,
    /// Directory for timestamped full-page captures
    pub artifact_dir: PathBuf,
    /// Default element wait bound
    pub default_timeout: Duration,
    /// Navigation wait bound
    pub navigation_timeout: Duration,
}

impl Default for SuiteConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_WEBSITE_URL.to_string(),
            screenshot_dir: PathBuf::from("screenshots"),
            artifact_dir: PathBuf::from("test-results/screenshots"),
            default_timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
            navigation_timeout: Duration::from_millis(DEFAULT_NAVIGATION_TIMEOUT_MS),
        }
    }
}

impl SuiteConfig {
    /// Create a config with defaults
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve the config from the environment.
    ///
    /// `WEBSITE_URL` overrides the base URL; everything else keeps defaults.
    #[must_use]
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(url) = std::env::var(WEBSITE_URL_ENV) {
            if !url.trim().is_empty() {
                config.base_url = url.trim().trim_end_matches('/').to_string();
            }
        }
        config
    }

    /// Set the base URL (trailing slash stripped)
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Set the named-screenshot directory
    #[must_use]
    pub fn with_screenshot_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.screenshot_dir = dir.into();
        self
    }

    /// Set the timestamped-artifact directory
    #[must_use]
    pub fn with_artifact_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.artifact_dir = dir.into();
        self
    }

    /// Set the default element wait bound
    #[must_use]
    pub const fn with_default_timeout(mut self, timeout: Duration) -> Self {
        self.default_timeout = timeout;
        self
    }

    /// Set the navigation wait bound
    #[must_use]
    pub const fn with_navigation_timeout(mut self, timeout: Duration) -> Self {
        self.navigation_timeout = timeout;
        self
    }

    /// Resolve a route against the base URL.
    ///
    /// Absolute URLs pass through; relative routes (including `/#/blog`-style
    /// hash routes) are joined without doubling slashes.
    #[must_use]
    pub fn url_for(&self, route: &str) -> String {
        if route.starts_with("http://") || route.starts_with("https://") {
            return route.to_string();
        }
        if route.is_empty() || route == "/" {
            return format!("{}/", self.base_url);
        }
        format!("{}/{}", self.base_url, route.trim_start_matches('/'))
    }

    /// Path for a named screenshot: `<screenshot_dir>/<name>.png`
    #[must_use]
    pub fn screenshot_path(&self, name: &str) -> PathBuf {
        self.screenshot_dir.join(format!("{name}.png"))
    }

    /// Path for a timestamped capture: `<artifact_dir>/<name>-<millis>.png`
    #[must_use]
    pub fn artifact_path(&self, name: &str, timestamp_millis: i64) -> PathBuf {
        self.artifact_dir
            .join(format!("{name}-{timestamp_millis}.png"))
    }

    /// The named-screenshot directory
    #[must_use]
    pub fn screenshot_dir(&self) -> &Path {
        &self.screenshot_dir
    }
}
