//! Page objects for the portfolio site under test.
//!
//! [`BasePage`] is the capability set every page object composes: navigation,
//! bounded waits, scrolling, and screenshot capture. Concrete page objects
//! declare a fixed set of named locators at construction time and expose
//! workflow methods; they are stateless beyond those declarations — state
//! lives entirely in the live DOM and is re-queried on every call.

mod admin;
mod blog;
mod contact;
mod cv;
mod home;

pub use admin::AdminPage;
pub use blog::BlogPage;
pub use contact::ContactPage;
pub use cv::CvPage;
pub use home::{HomePage, Section};

use crate::config::SuiteConfig;
use crate::driver::{ContextDriver, NetworkCondition, PageLoadMetrics};
use crate::locator::Locator;
use crate::result::{NavegarError, NavegarResult};
use crate::selector::Selector;
use crate::wait::{poll_until_settled, WaitOptions};
use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

/// Trait implemented by every concrete page object
#[async_trait]
pub trait PageObject: Send + Sync {
    /// Route of this page relative to the suite base URL
    fn route(&self) -> &'static str;

    /// Shared page capabilities
    fn base(&self) -> &BasePage;

    /// Page name for logging
    fn page_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    /// Navigate to this page's route and settle
    async fn open(&self) -> NavegarResult<()> {
        self.base().goto(self.route()).await?;
        self.base().wait_for_page_load().await
    }
}

/// Capability set shared by all page objects.
///
/// Holds a non-owning reference to the test invocation's browsing context;
/// the context's lifetime (and teardown) belongs to the runner.
#[derive(Clone)]
pub struct BasePage {
    driver: Arc<dyn ContextDriver>,
    config: SuiteConfig,
}

impl std::fmt::Debug for BasePage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BasePage")
            .field("base_url", &self.config.base_url)
            .finish_non_exhaustive()
    }
}

impl BasePage {
    /// Bind page capabilities to a browsing context
    #[must_use]
    pub fn new(driver: Arc<dyn ContextDriver>, config: SuiteConfig) -> Self {
        Self { driver, config }
    }

    /// Suite configuration
    #[must_use]
    pub const fn config(&self) -> &SuiteConfig {
        &self.config
    }

    /// The underlying browsing-context driver
    #[must_use]
    pub fn driver(&self) -> Arc<dyn ContextDriver> {
        Arc::clone(&self.driver)
    }

    /// Declare a locator bound to this page's context
    #[must_use]
    pub fn locator(&self, selector: Selector) -> Locator {
        Locator::new(Arc::clone(&self.driver), selector).with_timeout(self.config.default_timeout)
    }

    /// Navigate the context to a route (relative to the base URL) or an
    /// absolute URL.
    ///
    /// Fails with [`NavegarError::NavigationError`] on a non-2xx terminal
    /// response or network failure. Driver faults that are not navigation
    /// failures (a closed context, an expired bound) propagate unmodified.
    /// No retry: retry policy belongs to the runner.
    pub async fn goto(&self, route: &str) -> NavegarResult<()> {
        let url = self.config.url_for(route);
        tracing::debug!(url = %url, "navigating");
        let status = self.driver.navigate(&url).await.map_err(|e| match e {
            NavegarError::NavigationError { .. }
            | NavegarError::ContextClosed
            | NavegarError::Timeout { .. }
            | NavegarError::InvalidArgument { .. } => e,
            other => NavegarError::NavigationError {
                url: url.clone(),
                message: other.to_string(),
            },
        })?;
        if let Some(status) = status {
            if !(200..300).contains(&status) {
                return Err(NavegarError::NavigationError {
                    url,
                    message: format!("terminal response status {status}"),
                });
            }
        }
        Ok(())
    }

    /// Suspend until the network-idle heuristic holds or the bound elapses.
    ///
    /// A best-effort settle point, not a correctness gate: timing out is not
    /// an error.
    pub async fn wait_for_page_load(&self) -> NavegarResult<()> {
        let options = WaitOptions::new().with_timeout(self.config.default_timeout);
        let driver = &self.driver;
        let settled =
            poll_until_settled(options, move || async move { driver.is_network_idle().await })
                .await?;
        if !settled {
            tracing::debug!("network-idle settle window elapsed, continuing");
        }
        Ok(())
    }

    /// Scroll until the element intersects the viewport; no-op when it
    /// already does.
    pub async fn scroll_to_element(&self, locator: &Locator) -> NavegarResult<()> {
        locator.scroll_into_view_if_needed().await
    }

    /// Block until the element is attached and visible, or fail with
    /// [`NavegarError::Timeout`] after `timeout`.
    pub async fn wait_for_element(
        &self,
        locator: &Locator,
        timeout: Duration,
    ) -> NavegarResult<()> {
        locator.wait_for(timeout).await
    }

    /// Capture a viewport screenshot to `<screenshot_dir>/<name>.png`.
    ///
    /// Filesystem side effect only; never part of an assertion.
    pub async fn take_screenshot(&self, name: &str) -> NavegarResult<PathBuf> {
        let data = self.driver.screenshot(false).await?;
        let path = self.config.screenshot_path(name);
        self.write_capture(&path, &data).await?;
        Ok(path)
    }

    /// Capture a full-page screenshot to
    /// `<artifact_dir>/<name>-<timestamp>.png`.
    pub async fn take_full_page_screenshot(&self, name: &str) -> NavegarResult<PathBuf> {
        let data = self.driver.screenshot(true).await?;
        let path = self
            .config
            .artifact_path(name, chrono::Utc::now().timestamp_millis());
        self.write_capture(&path, &data).await?;
        Ok(path)
    }

    /// Console error messages observed since the last drain
    pub async fn console_errors(&self) -> NavegarResult<Vec<String>> {
        self.driver.drain_console_errors().await
    }

    /// Page load metrics for the current document
    pub async fn load_metrics(&self) -> NavegarResult<PageLoadMetrics> {
        self.driver.load_metrics().await
    }

    /// Emulate network conditions for this page's context
    pub async fn emulate_network(&self, condition: NetworkCondition) -> NavegarResult<()> {
        self.driver.emulate_network(condition).await
    }

    async fn write_capture(&self, path: &std::path::Path, data: &[u8]) -> NavegarResult<()> {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(path, data).await?;
        tracing::debug!(path = %path.display(), bytes = data.len(), "screenshot written");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::MockDriver;

    fn page_with(driver: Arc<MockDriver>, config: SuiteConfig) -> BasePage {
        BasePage::new(driver as Arc<dyn ContextDriver>, config)
    }

    fn fast_config() -> SuiteConfig {
        SuiteConfig::new()
            .with_base_url("https://example.com")
            .with_default_timeout(Duration::from_millis(100))
    }

    mod goto_tests {
        use super::*;

        #[tokio::test]
        async fn test_goto_resolves_route() {
            let driver = Arc::new(MockDriver::new());
            let page = page_with(Arc::clone(&driver), fast_config());
            page.goto("/#/blog").await.unwrap();
            assert_eq!(
                driver.current_url().await.unwrap(),
                "https://example.com/#/blog"
            );
        }

        #[tokio::test]
        async fn test_goto_fails_on_non_2xx() {
            let driver = Arc::new(MockDriver::new());
            driver.set_nav_status("https://example.com/#/admin", 404);
            let page = page_with(Arc::clone(&driver), fast_config());
            let result = page.goto("/#/admin").await;
            match result {
                Err(NavegarError::NavigationError { url, message }) => {
                    assert_eq!(url, "https://example.com/#/admin");
                    assert!(message.contains("404"));
                }
                other => panic!("expected navigation error, got {other:?}"),
            }
        }

        #[tokio::test]
        async fn test_goto_unknown_status_is_success() {
            let driver = Arc::new(MockDriver::new());
            let page = page_with(driver, fast_config());
            page.goto("/").await.unwrap();
        }

        #[tokio::test]
        async fn test_goto_on_closed_context_propagates_unwrapped() {
            let driver = Arc::new(MockDriver::new());
            driver.close();
            let page = page_with(driver, fast_config());
            let err = page.goto("/").await.unwrap_err();
            assert!(matches!(err, NavegarError::ContextClosed));
        }
    }

    mod settle_tests {
        use super::*;

        #[tokio::test]
        async fn test_wait_for_page_load_idle() {
            let driver = Arc::new(MockDriver::new());
            let page = page_with(driver, fast_config());
            page.wait_for_page_load().await.unwrap();
        }

        #[tokio::test]
        async fn test_wait_for_page_load_never_idle_still_ok() {
            let driver = Arc::new(MockDriver::new());
            driver.set_network_idle(false);
            let page = page_with(driver, fast_config());
            // Best-effort settle: expiry is not an error
            page.wait_for_page_load().await.unwrap();
        }
    }

    mod screenshot_tests {
        use super::*;

        #[tokio::test]
        async fn test_take_screenshot_writes_named_png() {
            let dir = tempfile::tempdir().unwrap();
            let config = fast_config().with_screenshot_dir(dir.path().join("screenshots"));
            let driver = Arc::new(MockDriver::new());
            let page = page_with(driver, config);

            let path = page.take_screenshot("homepage").await.unwrap();
            assert!(path.ends_with("screenshots/homepage.png"));
            let data = std::fs::read(&path).unwrap();
            assert!(data.starts_with(&[0x89, b'P', b'N', b'G']));
        }

        #[tokio::test]
        async fn test_full_page_screenshot_is_timestamped() {
            let dir = tempfile::tempdir().unwrap();
            let config = fast_config().with_artifact_dir(dir.path().join("artifacts"));
            let driver = Arc::new(MockDriver::new());
            let page = page_with(Arc::clone(&driver), config);

            let path = page.take_full_page_screenshot("blog").await.unwrap();
            let file_name = path.file_name().unwrap().to_string_lossy().into_owned();
            assert!(file_name.starts_with("blog-"));
            assert!(file_name.ends_with(".png"));
            assert!(driver.was_called("screenshot:full_page=true"));
        }
    }

    mod console_tests {
        use super::*;

        #[tokio::test]
        async fn test_console_errors_drained() {
            let driver = Arc::new(MockDriver::new());
            driver.push_console_error("TypeError: boom");
            let page = page_with(driver, fast_config());
            let errors = page.console_errors().await.unwrap();
            assert_eq!(errors, vec!["TypeError: boom".to_string()]);
        }
    }
}
