//! Chromium-backed browsing contexts over CDP.
//!
//! Only compiled with the `browser` feature. Each context wraps one CDP
//! page; element queries are generated from the locator's selector chain
//! and evaluated in the page, so nothing is cached between calls.

use crate::driver::{ContextDriver, NetworkCondition, PageLoadMetrics};
use crate::result::{NavegarError, NavegarResult};
use crate::selector::Selector;
use crate::wait::NETWORK_IDLE_THRESHOLD_MS;
use async_trait::async_trait;
use chromiumoxide::browser::{Browser as CdpBrowser, BrowserConfig as CdpConfig};
use chromiumoxide::cdp::browser_protocol::network::EmulateNetworkConditionsParams;
use chromiumoxide::cdp::js_protocol::runtime::EventExceptionThrown;
use chromiumoxide::page::{Page as CdpPage, ScreenshotParams};
use futures::StreamExt;
use std::sync::Arc;
use std::sync::Mutex as StdMutex;
use tokio::sync::Mutex;

/// Launch options for the Chromium instance
#[derive(Debug, Clone)]
pub struct BrowserOptions {
    /// Run without a visible window
    pub headless: bool,
    /// Viewport width in CSS pixels
    pub viewport_width: u32,
    /// Viewport height in CSS pixels
    pub viewport_height: u32,
    /// Explicit Chromium executable path
    pub chromium_path: Option<String>,
    /// Run with the Chromium sandbox enabled
    pub sandbox: bool,
}

impl Default for BrowserOptions {
    fn default() -> Self {
        Self {
            headless: true,
            viewport_width: 1280,
            viewport_height: 720,
            chromium_path: None,
            sandbox: true,
        }
    }
}

impl BrowserOptions {
    /// Default options
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the viewport dimensions
    #[must_use]
    pub const fn with_viewport(mut self, width: u32, height: u32) -> Self {
        self.viewport_width = width;
        self.viewport_height = height;
        self
    }

    /// Toggle headless mode
    #[must_use]
    pub const fn with_headless(mut self, headless: bool) -> Self {
        self.headless = headless;
        self
    }

    /// Use a specific Chromium executable
    #[must_use]
    pub fn with_chromium_path(mut self, path: impl Into<String>) -> Self {
        self.chromium_path = Some(path.into());
        self
    }

    /// Disable the Chromium sandbox (required in most containers)
    #[must_use]
    pub const fn with_no_sandbox(mut self) -> Self {
        self.sandbox = false;
        self
    }
}

/// A running Chromium instance
#[derive(Debug)]
pub struct Browser {
    options: BrowserOptions,
    inner: Arc<Mutex<CdpBrowser>>,
    #[allow(dead_code)]
    handle: tokio::task::JoinHandle<()>,
}

impl Browser {
    /// Launch Chromium with the given options.
    ///
    /// # Errors
    ///
    /// Returns `BrowserLaunchError` if the executable cannot be started.
    pub async fn launch(options: BrowserOptions) -> NavegarResult<Self> {
        let mut builder = CdpConfig::builder()
            .window_size(options.viewport_width, options.viewport_height);

        if !options.headless {
            builder = builder.with_head();
        }

        if !options.sandbox {
            builder = builder.no_sandbox();
        }

        if let Some(ref path) = options.chromium_path {
            builder = builder.chrome_executable(path);
        }

        let cdp_config = builder
            .build()
            .map_err(|e| NavegarError::BrowserLaunchError { message: e })?;

        let (browser, mut handler) = CdpBrowser::launch(cdp_config).await.map_err(|e| {
            NavegarError::BrowserLaunchError {
                message: e.to_string(),
            }
        })?;

        // Drive the CDP connection until it closes
        let handle = tokio::spawn(async move {
            while let Some(h) = handler.next().await {
                if h.is_err() {
                    break;
                }
            }
        });

        Ok(Self {
            options,
            inner: Arc::new(Mutex::new(browser)),
            handle,
        })
    }

    /// The options this instance was launched with
    #[must_use]
    pub const fn options(&self) -> &BrowserOptions {
        &self.options
    }

    /// Open a fresh, isolated browsing context.
    ///
    /// # Errors
    ///
    /// Returns `PageError` if the page cannot be created.
    pub async fn new_context(&self) -> NavegarResult<ChromiumContext> {
        let browser = self.inner.lock().await;
        let cdp_page = browser
            .new_page("about:blank")
            .await
            .map_err(|e| NavegarError::PageError {
                message: e.to_string(),
            })?;

        let console_errors = Arc::new(StdMutex::new(Vec::new()));

        // Collect page exceptions as console errors
        let sink = Arc::clone(&console_errors);
        if let Ok(mut events) = cdp_page.event_listener::<EventExceptionThrown>().await {
            let _collector = tokio::spawn(async move {
                while let Some(event) = events.next().await {
                    let text = event.exception_details.text.clone();
                    if let Ok(mut errors) = sink.lock() {
                        errors.push(text);
                    }
                }
            });
        }

        Ok(ChromiumContext {
            page: Arc::new(Mutex::new(cdp_page)),
            console_errors,
        })
    }

    /// Close the browser and all its contexts.
    ///
    /// # Errors
    ///
    /// Returns `BrowserLaunchError` if shutdown fails.
    pub async fn close(self) -> NavegarResult<()> {
        let mut browser = self.inner.lock().await;
        browser
            .close()
            .await
            .map_err(|e| NavegarError::BrowserLaunchError {
                message: e.to_string(),
            })?;
        Ok(())
    }
}

/// One isolated CDP-backed browsing context
pub struct ChromiumContext {
    page: Arc<Mutex<CdpPage>>,
    console_errors: Arc<StdMutex<Vec<String>>>,
}

impl std::fmt::Debug for ChromiumContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChromiumContext").finish_non_exhaustive()
    }
}

impl ChromiumContext {
    async fn eval_value(&self, script: &str) -> NavegarResult<serde_json::Value> {
        let page = self.page.lock().await;
        let result = page
            .evaluate(script)
            .await
            .map_err(|e| NavegarError::EvalError {
                message: e.to_string(),
            })?;
        Ok(result.value().cloned().unwrap_or(serde_json::Value::Null))
    }

    fn element_expr(selector: &Selector, nth: usize) -> String {
        format!("({})[{nth}]", selector.to_resolve_js())
    }
}

#[async_trait]
impl ContextDriver for ChromiumContext {
    async fn navigate(&self, url: &str) -> NavegarResult<Option<u16>> {
        {
            let page = self.page.lock().await;
            page.goto(url)
                .await
                .map_err(|e| NavegarError::NavigationError {
                    url: url.to_string(),
                    message: e.to_string(),
                })?;
        }
        // responseStatus is absent on older engines; treat that as success
        let status = self
            .eval_value(
                "performance.getEntriesByType('navigation')[0]?.responseStatus ?? null",
            )
            .await?;
        Ok(status.as_u64().and_then(|s| u16::try_from(s).ok()))
    }

    async fn current_url(&self) -> NavegarResult<String> {
        let page = self.page.lock().await;
        let url = page.url().await.map_err(|e| NavegarError::PageError {
            message: e.to_string(),
        })?;
        Ok(url.unwrap_or_else(|| "about:blank".to_string()))
    }

    async fn query_count(&self, selector: &Selector) -> NavegarResult<usize> {
        let value = self.eval_value(&selector.to_count_js()).await?;
        Ok(value.as_u64().unwrap_or(0) as usize)
    }

    async fn query_text(&self, selector: &Selector, nth: usize) -> NavegarResult<Option<String>> {
        let expr = Self::element_expr(selector, nth);
        let value = self
            .eval_value(&format!("{expr}?.textContent ?? null"))
            .await?;
        Ok(value.as_str().map(ToString::to_string))
    }

    async fn query_attribute(
        &self,
        selector: &Selector,
        nth: usize,
        name: &str,
    ) -> NavegarResult<Option<String>> {
        let expr = Self::element_expr(selector, nth);
        let attr = serde_json::to_string(name).map_err(NavegarError::Json)?;
        let value = self
            .eval_value(&format!("{expr}?.getAttribute({attr}) ?? null"))
            .await?;
        Ok(value.as_str().map(ToString::to_string))
    }

    async fn is_visible(&self, selector: &Selector, nth: usize) -> NavegarResult<bool> {
        let expr = Self::element_expr(selector, nth);
        let script = format!(
            "(() => {{ const el = {expr}; if (!el) return false; \
             const rect = el.getBoundingClientRect(); \
             const style = getComputedStyle(el); \
             return rect.width > 0 && rect.height > 0 && \
             style.visibility !== 'hidden' && style.display !== 'none'; }})()"
        );
        let value = self.eval_value(&script).await?;
        Ok(value.as_bool().unwrap_or(false))
    }

    async fn in_viewport(&self, selector: &Selector, nth: usize) -> NavegarResult<bool> {
        let expr = Self::element_expr(selector, nth);
        let script = format!(
            "(() => {{ const el = {expr}; if (!el) return false; \
             const rect = el.getBoundingClientRect(); \
             return rect.bottom > 0 && rect.right > 0 && \
             rect.top < window.innerHeight && rect.left < window.innerWidth; }})()"
        );
        let value = self.eval_value(&script).await?;
        Ok(value.as_bool().unwrap_or(false))
    }

    async fn click(&self, selector: &Selector, nth: usize) -> NavegarResult<()> {
        let expr = Self::element_expr(selector, nth);
        let script = format!(
            "(() => {{ const el = {expr}; if (!el) return false; el.click(); return true; }})()"
        );
        let value = self.eval_value(&script).await?;
        if value.as_bool() == Some(true) {
            Ok(())
        } else {
            Err(NavegarError::InputError {
                message: format!("no element for {}", selector.describe()),
            })
        }
    }

    async fn fill(&self, selector: &Selector, nth: usize, text: &str) -> NavegarResult<()> {
        let expr = Self::element_expr(selector, nth);
        let literal = serde_json::to_string(text).map_err(NavegarError::Json)?;
        let script = format!(
            "(() => {{ const el = {expr}; if (!el) return false; \
             el.value = {literal}; \
             el.dispatchEvent(new Event('input', {{ bubbles: true }})); \
             el.dispatchEvent(new Event('change', {{ bubbles: true }})); \
             return true; }})()"
        );
        let value = self.eval_value(&script).await?;
        if value.as_bool() == Some(true) {
            Ok(())
        } else {
            Err(NavegarError::InputError {
                message: format!("no element for {}", selector.describe()),
            })
        }
    }

    async fn scroll_into_view(&self, selector: &Selector, nth: usize) -> NavegarResult<()> {
        let expr = Self::element_expr(selector, nth);
        let script = format!(
            "(() => {{ const el = {expr}; if (!el) return false; \
             el.scrollIntoView({{ block: 'center' }}); return true; }})()"
        );
        let value = self.eval_value(&script).await?;
        if value.as_bool() == Some(true) {
            Ok(())
        } else {
            Err(NavegarError::InputError {
                message: format!("no element for {}", selector.describe()),
            })
        }
    }

    async fn eval(&self, script: &str) -> NavegarResult<serde_json::Value> {
        self.eval_value(script).await
    }

    async fn screenshot(&self, full_page: bool) -> NavegarResult<Vec<u8>> {
        let page = self.page.lock().await;
        let params = ScreenshotParams::builder().full_page(full_page).build();
        page.screenshot(params)
            .await
            .map_err(|e| NavegarError::ScreenshotError {
                message: e.to_string(),
            })
    }

    async fn is_network_idle(&self) -> NavegarResult<bool> {
        let script = format!(
            "(() => {{ if (document.readyState !== 'complete') return false; \
             const entries = performance.getEntriesByType('resource'); \
             const last = entries.reduce((max, e) => Math.max(max, e.responseEnd), 0); \
             return performance.now() - last > {NETWORK_IDLE_THRESHOLD_MS}; }})()"
        );
        let value = self.eval_value(&script).await?;
        Ok(value.as_bool().unwrap_or(false))
    }

    async fn drain_console_errors(&self) -> NavegarResult<Vec<String>> {
        let mut errors = self
            .console_errors
            .lock()
            .map_err(|_| NavegarError::PageError {
                message: "console error sink poisoned".to_string(),
            })?;
        Ok(std::mem::take(&mut *errors))
    }

    async fn emulate_network(&self, condition: NetworkCondition) -> NavegarResult<()> {
        let (download, upload, latency) = condition.params();
        let params = EmulateNetworkConditionsParams::builder()
            .offline(condition.is_offline())
            .latency(latency)
            .download_throughput(download)
            .upload_throughput(upload)
            .build()
            .map_err(|e| NavegarError::PageError { message: e })?;

        let page = self.page.lock().await;
        page.execute(params)
            .await
            .map_err(|e| NavegarError::PageError {
                message: e.to_string(),
            })?;
        Ok(())
    }

    async fn load_metrics(&self) -> NavegarResult<PageLoadMetrics> {
        let script = "(() => { \
             const nav = performance.getEntriesByType('navigation')[0]; \
             const paint = performance.getEntriesByType('paint'); \
             const by_name = (n) => paint.find(p => p.name === n)?.startTime ?? null; \
             return { \
                 dom_content_loaded_ms: nav ? nav.domContentLoadedEventEnd : null, \
                 load_complete_ms: nav ? nav.loadEventEnd : null, \
                 first_paint_ms: by_name('first-paint'), \
                 first_contentful_paint_ms: by_name('first-contentful-paint') \
             }; })()";
        let value = self.eval_value(script).await?;
        serde_json::from_value(value).map_err(NavegarError::Json)
    }
}
