//! Bounded-wait plumbing shared by locators and pages.
//!
//! Every wait in this layer is bounded: a condition either holds before the
//! window elapses or the wait fails with [`NavegarError::Timeout`]. Nothing
//! here retries a failed action; retry policy belongs to the runner.

use crate::result::{NavegarError, NavegarResult};
use std::future::Future;
use std::time::{Duration, Instant};

/// Default polling interval for bounded waits (50ms)
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 50;

/// Network idle threshold: no in-flight requests for this long (500ms)
pub const NETWORK_IDLE_THRESHOLD_MS: u64 = 500;

/// Page load states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LoadState {
    /// The `load` event has fired
    #[default]
    Load,
    /// The `DOMContentLoaded` event has fired
    DomContentLoaded,
    /// No network requests in flight for the idle threshold
    NetworkIdle,
}

impl LoadState {
    /// Event name as the browser reports it
    #[must_use]
    pub const fn event_name(&self) -> &'static str {
        match self {
            Self::Load => "load",
            Self::DomContentLoaded => "DOMContentLoaded",
            Self::NetworkIdle => "networkidle",
        }
    }
}

impl std::fmt::Display for LoadState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.event_name())
    }
}

/// Options for a bounded wait
#[derive(Debug, Clone, Copy)]
pub struct WaitOptions {
    /// Total wait bound
    pub timeout: Duration,
    /// Polling interval
    pub poll_interval: Duration,
}

impl Default for WaitOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_millis(crate::config::DEFAULT_TIMEOUT_MS),
            poll_interval: Duration::from_millis(DEFAULT_POLL_INTERVAL_MS),
        }
    }
}

impl WaitOptions {
    /// New options with defaults
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the wait bound
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the polling interval
    #[must_use]
    pub const fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }
}

/// Poll an async predicate until it holds or the bound elapses.
///
/// The predicate is checked once immediately, then at each poll interval.
/// Predicate errors propagate unmodified; expiry fails with
/// [`NavegarError::Timeout`].
pub async fn poll_until<F, Fut>(options: WaitOptions, mut check: F) -> NavegarResult<()>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = NavegarResult<bool>>,
{
    let started = Instant::now();
    loop {
        if check().await? {
            return Ok(());
        }
        if started.elapsed() >= options.timeout {
            return Err(NavegarError::Timeout {
                ms: options.timeout.as_millis() as u64,
            });
        }
        tokio::time::sleep(options.poll_interval).await;
    }
}

/// Like [`poll_until`], but expiry resolves `Ok(false)` instead of failing.
///
/// Used for best-effort settle points such as network idle, which is a
/// heuristic rather than a correctness gate.
pub async fn poll_until_settled<F, Fut>(options: WaitOptions, mut check: F) -> NavegarResult<bool>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = NavegarResult<bool>>,
{
    match poll_until(options, &mut check).await {
        Ok(()) => Ok(true),
        Err(NavegarError::Timeout { .. }) => Ok(false),
        Err(e) => Err(e),
    }
}
