//! Lazy, re-resolving element handles.
//!
//! A [`Locator`] pairs a shared browsing-context driver with a declared
//! [`Selector`] chain. It is pure description until acted upon: every action
//! and query re-resolves against the current DOM, so a handle never holds a
//! stale element reference across navigations.
//!
//! Actions auto-wait: the target must reach the required state (attached,
//! visible) within the bounded window or the call fails with
//! [`NavegarError::Timeout`]. `count()` is the one non-blocking query; it
//! reports 0 on no match and never fails with a not-found kind.

use crate::driver::ContextDriver;
use crate::result::{NavegarError, NavegarResult};
use crate::selector::Selector;
use crate::wait::{poll_until, WaitOptions};
use std::sync::Arc;
use std::time::Duration;

/// Options controlling locator auto-waiting
#[derive(Debug, Clone, Copy)]
pub struct LocatorOptions {
    /// Bounded wait for actionability
    pub timeout: Duration,
    /// Polling interval
    pub poll_interval: Duration,
    /// Whether actions require the element to be visible
    pub require_visible: bool,
}

impl Default for LocatorOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_millis(crate::config::DEFAULT_TIMEOUT_MS),
            poll_interval: Duration::from_millis(crate::wait::DEFAULT_POLL_INTERVAL_MS),
            require_visible: true,
        }
    }
}

/// A lazily-resolved handle to zero or more DOM elements.
///
/// Cheap to clone; clones share the same browsing context.
#[derive(Clone)]
pub struct Locator {
    driver: Arc<dyn ContextDriver>,
    selector: Selector,
    options: LocatorOptions,
    nth: usize,
}

impl std::fmt::Debug for Locator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Locator")
            .field("selector", &self.selector.describe())
            .field("nth", &self.nth)
            .finish_non_exhaustive()
    }
}

impl Locator {
    /// Create a handle bound to a browsing context
    #[must_use]
    pub fn new(driver: Arc<dyn ContextDriver>, selector: Selector) -> Self {
        Self {
            driver,
            selector,
            options: LocatorOptions::default(),
            nth: 0,
        }
    }

    /// Override the auto-wait bound
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.options.timeout = timeout;
        self
    }

    /// Relax the visibility requirement for actions
    #[must_use]
    pub const fn with_require_visible(mut self, require_visible: bool) -> Self {
        self.options.require_visible = require_visible;
        self
    }

    /// Narrow to the first match.
    ///
    /// Narrowing never resolves; an empty narrowing only fails once an
    /// action or blocking query is attempted.
    #[must_use]
    pub fn first(&self) -> Self {
        self.nth(0)
    }

    /// Narrow to the i-th match (0-based)
    #[must_use]
    pub fn nth(&self, i: usize) -> Self {
        let mut narrowed = self.clone();
        narrowed.nth = i;
        narrowed
    }

    /// The declared selector chain
    #[must_use]
    pub const fn selector(&self) -> &Selector {
        &self.selector
    }

    /// The match index this handle is narrowed to
    #[must_use]
    pub const fn index(&self) -> usize {
        self.nth
    }

    /// Current number of matches. Non-blocking; 0 means no match, never an
    /// error.
    pub async fn count(&self) -> NavegarResult<usize> {
        self.driver.query_count(&self.selector).await
    }

    /// Whether the narrowed element currently exists and is visible.
    /// Non-blocking; a missing element reports `false`.
    pub async fn is_visible(&self) -> NavegarResult<bool> {
        self.driver.is_visible(&self.selector, self.nth).await
    }

    /// Click the narrowed element, auto-waiting for actionability
    pub async fn click(&self) -> NavegarResult<()> {
        self.wait_for_actionable().await?;
        self.driver.click(&self.selector, self.nth).await
    }

    /// Fill the narrowed element, auto-waiting for actionability
    pub async fn fill(&self, text: &str) -> NavegarResult<()> {
        self.wait_for_actionable().await?;
        self.driver.fill(&self.selector, self.nth, text).await
    }

    /// Text content of the narrowed element, auto-waiting for attachment
    pub async fn text_content(&self) -> NavegarResult<String> {
        self.wait_for_attached().await?;
        self.driver
            .query_text(&self.selector, self.nth)
            .await?
            .ok_or_else(|| self.timeout_error())
    }

    /// Attribute value of the narrowed element, auto-waiting for attachment.
    /// `None` means the element exists but lacks the attribute.
    pub async fn get_attribute(&self, name: &str) -> NavegarResult<Option<String>> {
        self.wait_for_attached().await?;
        self.driver
            .query_attribute(&self.selector, self.nth, name)
            .await
    }

    /// Block until the narrowed element is attached and visible, or the
    /// given bound elapses.
    pub async fn wait_for(&self, timeout: Duration) -> NavegarResult<()> {
        let options = WaitOptions::new()
            .with_timeout(timeout)
            .with_poll_interval(self.options.poll_interval);
        let this = self;
        poll_until(options, move || async move {
            this.driver.is_visible(&this.selector, this.nth).await
        })
        .await
    }

    /// Scroll the narrowed element into the viewport. No-op when it already
    /// intersects the visible area.
    pub async fn scroll_into_view_if_needed(&self) -> NavegarResult<()> {
        self.wait_for_attached().await?;
        if self.driver.in_viewport(&self.selector, self.nth).await? {
            return Ok(());
        }
        self.driver.scroll_into_view(&self.selector, self.nth).await
    }

    /// All current matches as individually narrowed handles.
    ///
    /// The snapshot is of the match *count* only; each returned handle still
    /// re-resolves on use.
    pub async fn all(&self) -> NavegarResult<Vec<Self>> {
        let count = self.count().await?;
        Ok((0..count).map(|i| self.nth(i)).collect())
    }

    async fn wait_for_attached(&self) -> NavegarResult<()> {
        let options = WaitOptions::new()
            .with_timeout(self.options.timeout)
            .with_poll_interval(self.options.poll_interval);
        let this = self;
        poll_until(options, move || async move {
            Ok(this.driver.query_count(&this.selector).await? > this.nth)
        })
        .await
    }

    async fn wait_for_actionable(&self) -> NavegarResult<()> {
        let options = WaitOptions::new()
            .with_timeout(self.options.timeout)
            .with_poll_interval(self.options.poll_interval);
        let this = self;
        poll_until(options, move || async move {
            if this.driver.query_count(&this.selector).await? <= this.nth {
                return Ok(false);
            }
            if this.options.require_visible {
                return this.driver.is_visible(&this.selector, this.nth).await;
            }
            Ok(true)
        })
        .await
    }

    fn timeout_error(&self) -> NavegarError {
        NavegarError::Timeout {
            ms: self.options.timeout.as_millis() as u64,
        }
    }
}
