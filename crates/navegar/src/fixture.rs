//! Fixture provisioning for page objects.
//!
//! Page objects are constructed per test invocation against that
//! invocation's browsing context. Within one invocation the same instance
//! is reused; across invocations nothing is shared, so tests never observe
//! each other's navigation or element state.

use crate::config::SuiteConfig;
use crate::driver::ContextDriver;
use crate::page::{AdminPage, BasePage, BlogPage, ContactPage, CvPage, HomePage, PageObject};
use crate::result::{NavegarError, NavegarResult};
use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

/// Factory producing a page object bound to a browsing context
pub type PageFactory = Arc<dyn Fn(BasePage) -> Arc<dyn PageObject> + Send + Sync>;

/// Name-keyed registry of page object factories.
///
/// Registering under an existing name replaces the previous factory.
pub struct FixtureRegistry {
    factories: HashMap<String, PageFactory>,
}

impl std::fmt::Debug for FixtureRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FixtureRegistry")
            .field("factory_count", &self.factories.len())
            .finish()
    }
}

impl Default for FixtureRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl FixtureRegistry {
    /// Create an empty registry
    #[must_use]
    pub fn new() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }

    /// Create a registry pre-populated with the suite's page objects
    #[must_use]
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register("homePage", |base| Arc::new(HomePage::new(base)));
        registry.register("contactPage", |base| Arc::new(ContactPage::new(base)));
        registry.register("blogPage", |base| Arc::new(BlogPage::new(base)));
        registry.register("cvPage", |base| Arc::new(CvPage::new(base)));
        registry.register("adminPage", |base| Arc::new(AdminPage::new(base)));
        registry
    }

    /// Register a factory under `name`, replacing any existing one
    pub fn register<F>(&mut self, name: impl Into<String>, factory: F)
    where
        F: Fn(BasePage) -> Arc<dyn PageObject> + Send + Sync + 'static,
    {
        let _ = self.factories.insert(name.into(), Arc::new(factory));
    }

    /// Whether a factory is registered under `name`
    #[must_use]
    pub fn is_registered(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    /// Number of registered factories
    #[must_use]
    pub fn count(&self) -> usize {
        self.factories.len()
    }

    /// Registered fixture names, sorted
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.factories.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Build the page object registered under `name` against a context.
    ///
    /// # Errors
    ///
    /// Returns `FixtureError` for an unregistered name.
    pub fn resolve(&self, name: &str, base: BasePage) -> NavegarResult<Arc<dyn PageObject>> {
        let factory = self
            .factories
            .get(name)
            .ok_or_else(|| NavegarError::FixtureError {
                message: format!("fixture '{name}' not registered"),
            })?;
        Ok(factory(base))
    }
}

/// Per-invocation bundle of the suite's page objects.
///
/// Typed accessors construct lazily and memoize, so repeated access within
/// one invocation yields the same instance.
pub struct Fixtures {
    base: BasePage,
    home: OnceLock<Arc<HomePage>>,
    contact: OnceLock<Arc<ContactPage>>,
    blog: OnceLock<Arc<BlogPage>>,
    cv: OnceLock<Arc<CvPage>>,
    admin: OnceLock<Arc<AdminPage>>,
}

impl std::fmt::Debug for Fixtures {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Fixtures")
            .field("base", &self.base)
            .finish_non_exhaustive()
    }
}

impl Fixtures {
    /// Bundle page objects for one test invocation's context
    #[must_use]
    pub fn new(driver: Arc<dyn ContextDriver>, config: SuiteConfig) -> Self {
        Self {
            base: BasePage::new(driver, config),
            home: OnceLock::new(),
            contact: OnceLock::new(),
            blog: OnceLock::new(),
            cv: OnceLock::new(),
            admin: OnceLock::new(),
        }
    }

    /// The shared context capabilities behind this invocation
    #[must_use]
    pub fn base(&self) -> &BasePage {
        &self.base
    }

    /// Home page object, constructed on first access
    #[must_use]
    pub fn home_page(&self) -> Arc<HomePage> {
        Arc::clone(
            self.home
                .get_or_init(|| Arc::new(HomePage::new(self.base.clone()))),
        )
    }

    /// Contact page object, constructed on first access
    #[must_use]
    pub fn contact_page(&self) -> Arc<ContactPage> {
        Arc::clone(
            self.contact
                .get_or_init(|| Arc::new(ContactPage::new(self.base.clone()))),
        )
    }

    /// Blog page object, constructed on first access
    #[must_use]
    pub fn blog_page(&self) -> Arc<BlogPage> {
        Arc::clone(
            self.blog
                .get_or_init(|| Arc::new(BlogPage::new(self.base.clone()))),
        )
    }

    /// CV page object, constructed on first access
    #[must_use]
    pub fn cv_page(&self) -> Arc<CvPage> {
        Arc::clone(
            self.cv
                .get_or_init(|| Arc::new(CvPage::new(self.base.clone()))),
        )
    }

    /// Admin page object, constructed on first access
    #[must_use]
    pub fn admin_page(&self) -> Arc<AdminPage> {
        Arc::clone(
            self.admin
                .get_or_init(|| Arc::new(AdminPage::new(self.base.clone()))),
        )
    }
}
