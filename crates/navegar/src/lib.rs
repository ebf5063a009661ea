//! Navegar: page object fixtures for browser end-to-end suites.
//!
//! Navegar (Spanish: "to navigate") layers declarative page objects over an
//! abstract browsing-context driver. Tests address the site through named
//! locators and page workflows instead of raw selectors, and every locator
//! re-resolves against the live DOM on each use.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐   ┌───────────────┐   ┌──────────────────┐
//! │ Test         │   │ Page objects  │   │ ContextDriver    │
//! │ (assertions) │──►│ + locators    │──►│ (mock / CDP)     │
//! └──────────────┘   └───────────────┘   └──────────────────┘
//! ```

#![warn(missing_docs)]
// Lints are configured in workspace Cargo.toml [workspace.lints.clippy]
#![cfg_attr(test, allow(clippy::large_stack_arrays, clippy::large_stack_frames))]

pub mod config;
pub mod data;
pub mod driver;
pub mod fixture;
pub mod locator;
pub mod page;
pub mod result;
pub mod selector;
pub mod wait;

#[cfg(feature = "browser")]
pub mod chromium;

pub use config::SuiteConfig;
pub use driver::{ContextDriver, MockDriver, MockElement, NetworkCondition, PageLoadMetrics};
pub use fixture::{FixtureRegistry, Fixtures, PageFactory};
pub use locator::{Locator, LocatorOptions};
pub use page::{
    AdminPage, BasePage, BlogPage, ContactPage, CvPage, HomePage, PageObject, Section,
};
pub use result::{NavegarError, NavegarResult};
pub use selector::{Selector, SelectorStrategy};
pub use wait::{poll_until, poll_until_settled, LoadState, WaitOptions};

#[cfg(feature = "browser")]
pub use chromium::{Browser, BrowserOptions, ChromiumContext};

/// Commonly used types, for glob import in test files
pub mod prelude {
    pub use crate::config::SuiteConfig;
    pub use crate::driver::{ContextDriver, MockDriver, MockElement};
    pub use crate::fixture::{FixtureRegistry, Fixtures};
    pub use crate::locator::Locator;
    pub use crate::page::{
        AdminPage, BasePage, BlogPage, ContactPage, CvPage, HomePage, PageObject, Section,
    };
    pub use crate::result::{NavegarError, NavegarResult};
    pub use crate::selector::Selector;

    #[cfg(feature = "browser")]
    pub use crate::chromium::{Browser, BrowserOptions};
}

/// Initialize suite logging from `RUST_LOG`, defaulting to `info`.
///
/// Safe to call from multiple tests; only the first call installs the
/// subscriber.
#[cfg(not(target_arch = "wasm32"))]
pub fn init_test_logging() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_init_logging_is_idempotent() {
        super::init_test_logging();
        super::init_test_logging();
    }
}
