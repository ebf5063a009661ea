//! Admin page object: panel heading, post creation, login form.

use super::{BasePage, PageObject};
use crate::locator::Locator;
use crate::result::NavegarResult;
use crate::selector::Selector;

/// Page object for the admin page (`/#/admin`)
#[derive(Debug)]
pub struct AdminPage {
    base: BasePage,
    /// Panel heading ("Admin Panel")
    pub heading: Locator,
    /// Create Post control
    pub create_post_control: Locator,
    /// Login form, when the panel requires authentication
    pub login_form: Locator,
    /// Username (or email) field of the login form
    pub username_field: Locator,
    /// Password field of the login form
    pub password_field: Locator,
    /// Login submit control
    pub login_button: Locator,
}

impl AdminPage {
    /// Declare the admin page's locators against a browsing context
    #[must_use]
    pub fn new(base: BasePage) -> Self {
        Self {
            heading: base.locator(Selector::css("h1").or_css("h2")),
            create_post_control: base
                .locator(Selector::text("Create Post").or_test_id("create-post")),
            login_form: base.locator(Selector::css("form").or_test_id("login-form")),
            username_field: base.locator(
                Selector::css("input[name='username']")
                    .or_css("input[name='email']")
                    .or_css("input[type='text']"),
            ),
            password_field: base.locator(
                Selector::css("input[type='password']").or_css("input[name='password']"),
            ),
            login_button: base.locator(
                Selector::css("button[type='submit']")
                    .or_text("Login")
                    .or_text("Sign In"),
            ),
            base,
        }
    }

    /// Whether the panel renders a login form at all
    pub async fn requires_login(&self) -> NavegarResult<bool> {
        Ok(self.login_form.count().await? > 0)
    }

    /// Fill the login form and submit it.
    ///
    /// Fails when the form is absent; callers check `requires_login` first.
    pub async fn login(&self, username: &str, password: &str) -> NavegarResult<()> {
        self.username_field.fill(username).await?;
        self.password_field.fill(password).await?;
        self.login_button.click().await
    }

    /// Click the Create Post control
    pub async fn create_post(&self) -> NavegarResult<()> {
        self.create_post_control.click().await
    }

    /// Whether the panel heading contains the expected panel title
    pub async fn verify_heading(&self, expected: &str) -> NavegarResult<bool> {
        let text = self.heading.text_content().await?;
        Ok(text.contains(expected))
    }
}

impl PageObject for AdminPage {
    fn route(&self) -> &'static str {
        "/#/admin"
    }

    fn base(&self) -> &BasePage {
        &self.base
    }
}
