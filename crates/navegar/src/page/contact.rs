//! Contact page object: form workflows and social links.

use super::{BasePage, PageObject};
use crate::locator::Locator;
use crate::result::NavegarResult;
use crate::selector::Selector;

/// Page object for the contact page (`/contact`)
#[derive(Debug)]
pub struct ContactPage {
    base: BasePage,
    /// The contact form
    pub contact_form: Locator,
    /// Name input
    pub name_input: Locator,
    /// Email input
    pub email_input: Locator,
    /// Message textarea
    pub message_textarea: Locator,
    /// Submit control
    pub submit_button: Locator,
    /// Success indicator shown after submission
    pub success_message: Locator,
    /// Error indicator shown on validation failure
    pub error_message: Locator,
    /// Social platform links
    pub social_links: Locator,
}

impl ContactPage {
    /// Declare the contact page's locators against a browsing context
    #[must_use]
    pub fn new(base: BasePage) -> Self {
        Self {
            contact_form: base.locator(
                Selector::css("form")
                    .or_css(".contact-form")
                    .or_test_id("contact-form"),
            ),
            name_input: base.locator(
                Selector::css("input[name='name']")
                    .or_css("input[id='name']")
                    .or_css("#name"),
            ),
            email_input: base.locator(
                Selector::css("input[name='email']")
                    .or_css("input[id='email']")
                    .or_css("#email"),
            ),
            message_textarea: base.locator(
                Selector::css("textarea[name='message']")
                    .or_css("textarea[id='message']")
                    .or_css("#message"),
            ),
            submit_button: base.locator(
                Selector::css("button[type='submit']")
                    .or_css("input[type='submit']")
                    .or_css(".submit-btn"),
            ),
            success_message: base.locator(
                Selector::css(".success")
                    .or_css(".success-message")
                    .or_test_id("success"),
            ),
            error_message: base.locator(
                Selector::css(".error")
                    .or_css(".error-message")
                    .or_test_id("error"),
            ),
            social_links: base.locator(Selector::css(".social-links a").or_css(".social a")),
            base,
        }
    }

    /// Fill the contact form fields in sequence without submitting.
    ///
    /// Fields absent from the DOM are skipped silently; fields that exist
    /// but never become interactable still time out.
    pub async fn fill_contact_form(
        &self,
        name: &str,
        email: &str,
        message: &str,
    ) -> NavegarResult<()> {
        for (field, value, label) in [
            (&self.name_input, name, "name"),
            (&self.email_input, email, "email"),
            (&self.message_textarea, message, "message"),
        ] {
            if field.count().await? == 0 {
                tracing::debug!(field = label, "form field absent, skipping");
                continue;
            }
            field.fill(value).await?;
        }
        Ok(())
    }

    /// Click the submit control
    pub async fn submit_form(&self) -> NavegarResult<()> {
        self.submit_button.click().await
    }

    /// Wait for the success indicator, then report its visibility.
    ///
    /// The caller asserts on the returned boolean; a visible-but-false
    /// outcome is a well-formed result, not an error.
    pub async fn verify_form_submission(&self) -> NavegarResult<bool> {
        self.base
            .wait_for_element(&self.success_message, self.base.config().default_timeout)
            .await?;
        self.success_message.is_visible().await
    }

    /// Wait for the error indicator, then report its visibility
    pub async fn verify_form_error(&self) -> NavegarResult<bool> {
        self.base
            .wait_for_element(&self.error_message, self.base.config().default_timeout)
            .await?;
        self.error_message.is_visible().await
    }

    /// All social platform links, as narrowed handles
    pub async fn social_link_handles(&self) -> NavegarResult<Vec<Locator>> {
        self.social_links.all().await
    }

    /// Click the first social link whose text contains the platform name
    pub async fn click_social_link(&self, platform: &str) -> NavegarResult<()> {
        for link in self.social_link_handles().await? {
            if let Ok(text) = link.text_content().await {
                if text.contains(platform) {
                    return link.click().await;
                }
            }
        }
        Err(crate::result::NavegarError::InvalidArgument {
            message: format!("no social link for platform '{platform}'"),
        })
    }
}

impl PageObject for ContactPage {
    fn route(&self) -> &'static str {
        "/contact"
    }

    fn base(&self) -> &BasePage {
        &self.base
    }
}
