//! ContextDriver - abstract browsing-context handle.
//!
//! One `ContextDriver` is one isolated browsing context, owned by the test
//! runner for exactly one test invocation. The page-object layer holds a
//! shared reference and consumes the driver's query/action primitives; it
//! never manages the context's lifetime.
//!
//! # Implementations
//!
//! - `ChromiumContext` - real CDP control via chromiumoxide (`browser` feature)
//! - [`MockDriver`] - in-memory DOM model for unit testing

use crate::result::{NavegarError, NavegarResult};
use crate::selector::{Selector, SelectorStrategy};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Mutex;

/// Page load timing metrics, as reported by the Navigation Timing API
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PageLoadMetrics {
    /// DOMContentLoaded duration (ms)
    pub dom_content_loaded_ms: Option<f64>,
    /// load event duration (ms)
    pub load_complete_ms: Option<f64>,
    /// Time to first paint (ms)
    pub first_paint_ms: Option<f64>,
    /// Time to first contentful paint (ms)
    pub first_contentful_paint_ms: Option<f64>,
}

/// Emulated network conditions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NetworkCondition {
    /// ~50 kB/s, 2s latency
    Slow3g,
    /// ~150 kB/s, 562ms latency
    Fast3g,
    /// No connectivity
    Offline,
}

impl NetworkCondition {
    /// Throughput/latency tuple: (download B/s, upload B/s, latency ms)
    #[must_use]
    pub const fn params(&self) -> (f64, f64, f64) {
        match self {
            Self::Slow3g => (50_000.0, 50_000.0, 2_000.0),
            Self::Fast3g => (150_000.0, 150_000.0, 562.5),
            Self::Offline => (0.0, 0.0, 0.0),
        }
    }

    /// True if this condition blocks all traffic
    #[must_use]
    pub const fn is_offline(&self) -> bool {
        matches!(self, Self::Offline)
    }
}

/// Abstract driver for one isolated browsing context.
///
/// Every method is a suspension point: it blocks the calling test's control
/// flow until the underlying browser action completes or errors. Element
/// queries address the *current* DOM via `(selector, nth)`; nothing is cached
/// across calls.
#[async_trait]
pub trait ContextDriver: Send + Sync {
    /// Navigate the context. Returns the terminal HTTP status when the
    /// engine reports one; `None` means the status is unknown (treated as
    /// success by callers). Transport failures are an `Err`.
    async fn navigate(&self, url: &str) -> NavegarResult<Option<u16>>;

    /// Current URL of the context
    async fn current_url(&self) -> NavegarResult<String>;

    /// Number of elements in the winning match set (0 if none; never a
    /// not-found error)
    async fn query_count(&self, selector: &Selector) -> NavegarResult<usize>;

    /// Text content of the nth match, `None` if out of range
    async fn query_text(&self, selector: &Selector, nth: usize) -> NavegarResult<Option<String>>;

    /// Attribute of the nth match, `None` if the element or attribute is absent
    async fn query_attribute(
        &self,
        selector: &Selector,
        nth: usize,
        name: &str,
    ) -> NavegarResult<Option<String>>;

    /// Whether the nth match exists and is visible
    async fn is_visible(&self, selector: &Selector, nth: usize) -> NavegarResult<bool>;

    /// Whether the nth match currently intersects the viewport
    async fn in_viewport(&self, selector: &Selector, nth: usize) -> NavegarResult<bool>;

    /// Click the nth match
    async fn click(&self, selector: &Selector, nth: usize) -> NavegarResult<()>;

    /// Fill the nth match with text (replacing its current value)
    async fn fill(&self, selector: &Selector, nth: usize, text: &str) -> NavegarResult<()>;

    /// Scroll the nth match into the viewport
    async fn scroll_into_view(&self, selector: &Selector, nth: usize) -> NavegarResult<()>;

    /// Evaluate JavaScript in the page, returning its JSON value
    async fn eval(&self, script: &str) -> NavegarResult<serde_json::Value>;

    /// Capture a PNG screenshot of the viewport (or full page)
    async fn screenshot(&self, full_page: bool) -> NavegarResult<Vec<u8>>;

    /// Network-idle heuristic: no requests in flight for the idle threshold
    async fn is_network_idle(&self) -> NavegarResult<bool>;

    /// Drain console error messages observed since the last drain
    async fn drain_console_errors(&self) -> NavegarResult<Vec<String>>;

    /// Emulate network conditions for the context
    async fn emulate_network(&self, condition: NetworkCondition) -> NavegarResult<()>;

    /// Page load timing metrics for the current document
    async fn load_metrics(&self) -> NavegarResult<PageLoadMetrics>;
}

// ============================================================================
// Mock driver
// ============================================================================

/// One element in the mock DOM.
///
/// An element declares which selector strategies it answers to; the mock
/// resolver applies the same first-non-empty-wins chain semantics as the
/// real driver.
#[derive(Debug, Clone, Default)]
pub struct MockElement {
    /// CSS selector aliases this element matches
    pub css: Vec<String>,
    /// `data-testid` value
    pub test_id: Option<String>,
    /// ARIA role
    pub role: Option<String>,
    /// Text content
    pub text: String,
    /// Attributes (href, src, alt, ...)
    pub attributes: HashMap<String, String>,
    /// Visibility
    pub visible: bool,
    /// Whether the element currently intersects the viewport
    pub in_viewport: bool,
    /// Current input value (mutated by fill)
    pub value: String,
    /// Click count (mutated by click)
    pub clicks: usize,
}

impl MockElement {
    /// New visible element matching one CSS alias
    #[must_use]
    pub fn new(css: impl Into<String>) -> Self {
        Self {
            css: vec![css.into()],
            visible: true,
            ..Self::default()
        }
    }

    /// Add another CSS alias
    #[must_use]
    pub fn with_css(mut self, css: impl Into<String>) -> Self {
        self.css.push(css.into());
        self
    }

    /// Set the test id
    #[must_use]
    pub fn with_test_id(mut self, id: impl Into<String>) -> Self {
        self.test_id = Some(id.into());
        self
    }

    /// Set the ARIA role
    #[must_use]
    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = Some(role.into());
        self
    }

    /// Set the text content
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Set an attribute
    #[must_use]
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let _ = self.attributes.insert(name.into(), value.into());
        self
    }

    /// Set visibility
    #[must_use]
    pub const fn with_visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    /// Set the viewport-intersection flag
    #[must_use]
    pub const fn with_in_viewport(mut self, in_viewport: bool) -> Self {
        self.in_viewport = in_viewport;
        self
    }

    fn matches(&self, strategy: &SelectorStrategy) -> bool {
        match strategy {
            SelectorStrategy::ByCss(css) => self.css.iter().any(|c| c == css),
            SelectorStrategy::ByText(text) => self.text.contains(text.as_str()),
            SelectorStrategy::ByRole(role) => self.role.as_deref() == Some(role.as_str()),
            SelectorStrategy::ByTestId(id) => self.test_id.as_deref() == Some(id.as_str()),
        }
    }
}

#[derive(Debug, Default)]
struct MockState {
    current_url: String,
    elements: Vec<MockElement>,
    nav_status: HashMap<String, u16>,
    console_errors: Vec<String>,
    network_idle: bool,
    network_condition: Option<NetworkCondition>,
    metrics: PageLoadMetrics,
    screenshot_data: Vec<u8>,
    call_history: Vec<String>,
    closed: bool,
}

/// In-memory driver for unit testing page objects without a browser.
///
/// Holds a small DOM model plus a recorded call history for verification.
#[derive(Debug, Default)]
pub struct MockDriver {
    state: Mutex<MockState>,
}

impl MockDriver {
    /// New empty mock context (network idle, no elements)
    #[must_use]
    pub fn new() -> Self {
        let driver = Self::default();
        {
            let mut state = driver.state.lock().unwrap();
            state.network_idle = true;
            // PNG magic bytes so screenshot consumers see a plausible capture
            state.screenshot_data = vec![0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];
        }
        driver
    }

    /// Add an element to the mock DOM
    pub fn add_element(&self, element: MockElement) {
        self.state.lock().unwrap().elements.push(element);
    }

    /// Builder-style element registration
    #[must_use]
    pub fn with_element(self, element: MockElement) -> Self {
        self.add_element(element);
        self
    }

    /// Set the HTTP status reported for navigating to `url`
    pub fn set_nav_status(&self, url: impl Into<String>, status: u16) {
        let _ = self
            .state
            .lock()
            .unwrap()
            .nav_status
            .insert(url.into(), status);
    }

    /// Record a console error to be drained later
    pub fn push_console_error(&self, message: impl Into<String>) {
        self.state.lock().unwrap().console_errors.push(message.into());
    }

    /// Toggle the network-idle heuristic result
    pub fn set_network_idle(&self, idle: bool) {
        self.state.lock().unwrap().network_idle = idle;
    }

    /// Set the metrics returned by [`ContextDriver::load_metrics`]
    pub fn set_metrics(&self, metrics: PageLoadMetrics) {
        self.state.lock().unwrap().metrics = metrics;
    }

    /// Close the context; every subsequent call fails with `ContextClosed`
    pub fn close(&self) {
        self.state.lock().unwrap().closed = true;
    }

    /// Recorded call history
    #[must_use]
    pub fn history(&self) -> Vec<String> {
        self.state.lock().unwrap().call_history.clone()
    }

    /// Whether a primitive with the given prefix was invoked
    #[must_use]
    pub fn was_called(&self, prefix: &str) -> bool {
        self.state
            .lock()
            .unwrap()
            .call_history
            .iter()
            .any(|c| c.starts_with(prefix))
    }

    /// Click count of the first element matching a CSS alias
    #[must_use]
    pub fn clicks_of(&self, css: &str) -> usize {
        self.state
            .lock()
            .unwrap()
            .elements
            .iter()
            .find(|e| e.css.iter().any(|c| c == css))
            .map_or(0, |e| e.clicks)
    }

    /// Current input value of the first element matching a CSS alias
    #[must_use]
    pub fn value_of(&self, css: &str) -> Option<String> {
        self.state
            .lock()
            .unwrap()
            .elements
            .iter()
            .find(|e| e.css.iter().any(|c| c == css))
            .map(|e| e.value.clone())
    }

    /// Last emulated network condition
    #[must_use]
    pub fn network_condition(&self) -> Option<NetworkCondition> {
        self.state.lock().unwrap().network_condition
    }

    fn ensure_open(state: &MockState) -> NavegarResult<()> {
        if state.closed {
            return Err(NavegarError::ContextClosed);
        }
        Ok(())
    }

    /// Indices of the winning match set: first strategy with matches wins.
    fn resolve(state: &MockState, selector: &Selector) -> Vec<usize> {
        for strategy in selector.strategies() {
            let matched: Vec<usize> = state
                .elements
                .iter()
                .enumerate()
                .filter(|(_, e)| e.matches(strategy))
                .map(|(i, _)| i)
                .collect();
            if !matched.is_empty() {
                return matched;
            }
        }
        Vec::new()
    }

    fn nth_index(state: &MockState, selector: &Selector, nth: usize) -> Option<usize> {
        Self::resolve(state, selector).get(nth).copied()
    }
}

#[async_trait]
impl ContextDriver for MockDriver {
    async fn navigate(&self, url: &str) -> NavegarResult<Option<u16>> {
        let mut state = self.state.lock().unwrap();
        Self::ensure_open(&state)?;
        state.call_history.push(format!("navigate:{url}"));
        state.current_url = url.to_string();
        Ok(state.nav_status.get(url).copied())
    }

    async fn current_url(&self) -> NavegarResult<String> {
        let state = self.state.lock().unwrap();
        Self::ensure_open(&state)?;
        Ok(state.current_url.clone())
    }

    async fn query_count(&self, selector: &Selector) -> NavegarResult<usize> {
        let state = self.state.lock().unwrap();
        Self::ensure_open(&state)?;
        Ok(Self::resolve(&state, selector).len())
    }

    async fn query_text(&self, selector: &Selector, nth: usize) -> NavegarResult<Option<String>> {
        let state = self.state.lock().unwrap();
        Self::ensure_open(&state)?;
        Ok(Self::nth_index(&state, selector, nth).map(|i| state.elements[i].text.clone()))
    }

    async fn query_attribute(
        &self,
        selector: &Selector,
        nth: usize,
        name: &str,
    ) -> NavegarResult<Option<String>> {
        let state = self.state.lock().unwrap();
        Self::ensure_open(&state)?;
        Ok(Self::nth_index(&state, selector, nth)
            .and_then(|i| state.elements[i].attributes.get(name).cloned()))
    }

    async fn is_visible(&self, selector: &Selector, nth: usize) -> NavegarResult<bool> {
        let state = self.state.lock().unwrap();
        Self::ensure_open(&state)?;
        Ok(Self::nth_index(&state, selector, nth).is_some_and(|i| state.elements[i].visible))
    }

    async fn in_viewport(&self, selector: &Selector, nth: usize) -> NavegarResult<bool> {
        let state = self.state.lock().unwrap();
        Self::ensure_open(&state)?;
        Ok(Self::nth_index(&state, selector, nth).is_some_and(|i| state.elements[i].in_viewport))
    }

    async fn click(&self, selector: &Selector, nth: usize) -> NavegarResult<()> {
        let mut state = self.state.lock().unwrap();
        Self::ensure_open(&state)?;
        state.call_history.push(format!("click:{}", selector.describe()));
        match Self::nth_index(&state, selector, nth) {
            Some(i) => {
                state.elements[i].clicks += 1;
                Ok(())
            }
            None => Err(NavegarError::InputError {
                message: format!("no element for {}", selector.describe()),
            }),
        }
    }

    async fn fill(&self, selector: &Selector, nth: usize, text: &str) -> NavegarResult<()> {
        let mut state = self.state.lock().unwrap();
        Self::ensure_open(&state)?;
        state.call_history.push(format!("fill:{}", selector.describe()));
        match Self::nth_index(&state, selector, nth) {
            Some(i) => {
                state.elements[i].value = text.to_string();
                Ok(())
            }
            None => Err(NavegarError::InputError {
                message: format!("no element for {}", selector.describe()),
            }),
        }
    }

    async fn scroll_into_view(&self, selector: &Selector, nth: usize) -> NavegarResult<()> {
        let mut state = self.state.lock().unwrap();
        Self::ensure_open(&state)?;
        state
            .call_history
            .push(format!("scroll:{}", selector.describe()));
        match Self::nth_index(&state, selector, nth) {
            Some(i) => {
                state.elements[i].in_viewport = true;
                Ok(())
            }
            None => Err(NavegarError::InputError {
                message: format!("no element for {}", selector.describe()),
            }),
        }
    }

    async fn eval(&self, script: &str) -> NavegarResult<serde_json::Value> {
        let mut state = self.state.lock().unwrap();
        Self::ensure_open(&state)?;
        state.call_history.push(format!("eval:{script}"));
        Ok(serde_json::Value::Null)
    }

    async fn screenshot(&self, full_page: bool) -> NavegarResult<Vec<u8>> {
        let mut state = self.state.lock().unwrap();
        Self::ensure_open(&state)?;
        state
            .call_history
            .push(format!("screenshot:full_page={full_page}"));
        Ok(state.screenshot_data.clone())
    }

    async fn is_network_idle(&self) -> NavegarResult<bool> {
        let state = self.state.lock().unwrap();
        Self::ensure_open(&state)?;
        Ok(state.network_idle)
    }

    async fn drain_console_errors(&self) -> NavegarResult<Vec<String>> {
        let mut state = self.state.lock().unwrap();
        Self::ensure_open(&state)?;
        Ok(std::mem::take(&mut state.console_errors))
    }

    async fn emulate_network(&self, condition: NetworkCondition) -> NavegarResult<()> {
        let mut state = self.state.lock().unwrap();
        Self::ensure_open(&state)?;
        state
            .call_history
            .push(format!("emulate_network:{condition:?}"));
        state.network_condition = Some(condition);
        Ok(())
    }

    async fn load_metrics(&self) -> NavegarResult<PageLoadMetrics> {
        let state = self.state.lock().unwrap();
        Self::ensure_open(&state)?;
        Ok(state.metrics.clone())
    }
}
