//! Blog page object: post listing and management controls.

use super::{BasePage, PageObject};
use crate::locator::Locator;
use crate::result::{NavegarError, NavegarResult};
use crate::selector::Selector;

/// Page object for the blog page (`/#/blog`)
#[derive(Debug)]
pub struct BlogPage {
    base: BasePage,
    /// Page heading ("My Blog Posts")
    pub heading: Locator,
    /// Blog post cards
    pub posts: Locator,
    /// Add Blog control
    pub add_blog_control: Locator,
    /// Reset control
    pub reset_control: Locator,
    /// Per-post edit controls
    pub edit_controls: Locator,
    /// Per-post delete controls
    pub delete_controls: Locator,
    /// External article links hosted on Medium
    pub medium_links: Locator,
}

impl BlogPage {
    /// Declare the blog page's locators against a browsing context
    #[must_use]
    pub fn new(base: BasePage) -> Self {
        Self {
            heading: base.locator(Selector::css("h1").or_css("h2")),
            posts: base.locator(
                Selector::test_id("blog-post")
                    .or_css(".blog-post")
                    .or_css("article"),
            ),
            add_blog_control: base.locator(Selector::text("Add Blog").or_test_id("add-blog")),
            reset_control: base.locator(Selector::text("Reset").or_test_id("reset")),
            edit_controls: base.locator(Selector::text("Edit Title").or_test_id("edit")),
            delete_controls: base.locator(Selector::text("Delete").or_test_id("delete")),
            medium_links: base.locator(Selector::css("a[href*='medium.com']")),
            base,
        }
    }

    /// Number of post cards currently rendered
    pub async fn post_count(&self) -> NavegarResult<usize> {
        self.posts.count().await
    }

    /// Full text of the post card at `index`
    pub async fn post_text(&self, index: usize) -> NavegarResult<String> {
        self.posts.nth(index).text_content().await
    }

    /// The `href` of the first article link containing `token`.
    ///
    /// Returns `InvalidArgument` when no rendered link matches, without
    /// waiting out the attachment bound.
    pub async fn article_href(&self, token: &str) -> NavegarResult<String> {
        let link = self
            .base
            .locator(Selector::css(&format!("a[href*='{token}']")));
        if link.count().await? == 0 {
            return Err(NavegarError::InvalidArgument {
                message: format!("no article link matching '{token}'"),
            });
        }
        match link.get_attribute("href").await? {
            Some(href) => Ok(href),
            None => Err(NavegarError::InvalidArgument {
                message: format!("article link matching '{token}' has no href"),
            }),
        }
    }

    /// Click the Add Blog control
    pub async fn add_post(&self) -> NavegarResult<()> {
        self.add_blog_control.click().await
    }

    /// Click the Reset control, restoring the seeded post list
    pub async fn reset_posts(&self) -> NavegarResult<()> {
        self.reset_control.click().await
    }
}

impl PageObject for BlogPage {
    fn route(&self) -> &'static str {
        "/#/blog"
    }

    fn base(&self) -> &BasePage {
        &self.base
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SuiteConfig;
    use crate::data;
    use crate::driver::{ContextDriver, MockDriver, MockElement};
    use std::sync::Arc;
    use std::time::Duration;

    fn blog_with(driver: &Arc<MockDriver>) -> BlogPage {
        let config = SuiteConfig::new()
            .with_base_url("https://example.com")
            .with_default_timeout(Duration::from_millis(100));
        BlogPage::new(BasePage::new(
            Arc::clone(driver) as Arc<dyn ContextDriver>,
            config,
        ))
    }

    fn seed_posts(driver: &Arc<MockDriver>) {
        for post in data::EXPECTED_BLOG_POSTS {
            driver.add_element(MockElement::new(".blog-post").with_text(&format!(
                "{} \u{1f4c5} {} \u{1f441}\u{fe0f} {}",
                post.title, post.date, post.views
            )));
            driver.add_element(
                MockElement::new("a[href*='medium.com']")
                    .with_css(&format!("a[href*='{}']", post.slug))
                    .with_text("Read more")
                    .with_attribute("href", post.url),
            );
        }
    }

    #[tokio::test]
    async fn test_seeded_post_count_is_three() {
        let driver = Arc::new(MockDriver::new());
        seed_posts(&driver);
        let page = blog_with(&driver);
        assert_eq!(page.post_count().await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_first_post_content() {
        let driver = Arc::new(MockDriver::new());
        seed_posts(&driver);
        let page = blog_with(&driver);
        let text = page.post_text(0).await.unwrap();
        assert!(text.contains("Getting Started with React Automation Testing"));
        assert!(text.contains("2024-01-15"));
        assert!(text.contains("120 views"));
    }

    #[tokio::test]
    async fn test_article_href_by_token() {
        let driver = Arc::new(MockDriver::new());
        seed_posts(&driver);
        let page = blog_with(&driver);
        let href = page.article_href("react-automation-testing-guide").await.unwrap();
        assert_eq!(
            href,
            "https://piyathida-sanaoun01.medium.com/react-automation-testing-guide"
        );
    }

    #[tokio::test]
    async fn test_article_href_unknown_token_is_invalid_argument() {
        let driver = Arc::new(MockDriver::new());
        seed_posts(&driver);
        let page = blog_with(&driver);
        let started = std::time::Instant::now();
        let err = page.article_href("nonexistent-article").await.unwrap_err();
        assert!(matches!(err, NavegarError::InvalidArgument { .. }));
        assert!(err.to_string().contains("nonexistent-article"));
        // Rejected by the non-blocking count check, not the attachment wait
        assert!(started.elapsed() < Duration::from_millis(100));
    }

    #[tokio::test]
    async fn test_article_href_present_link_without_href_fails() {
        let driver = Arc::new(MockDriver::new());
        driver.add_element(
            MockElement::new("a[href*='orphan']").with_text("Read more"),
        );
        let page = blog_with(&driver);
        let err = page.article_href("orphan").await.unwrap_err();
        assert!(matches!(err, NavegarError::InvalidArgument { .. }));
        assert!(err.to_string().contains("has no href"));
    }

    #[tokio::test]
    async fn test_management_controls_click() {
        let driver = Arc::new(MockDriver::new());
        driver.add_element(MockElement::new("button.add").with_test_id("add-blog").with_text("Add Blog"));
        driver.add_element(MockElement::new("button.reset").with_test_id("reset").with_text("Reset"));
        let page = blog_with(&driver);
        page.add_post().await.unwrap();
        page.reset_posts().await.unwrap();
        assert_eq!(driver.clicks_of("button.add"), 1);
        assert_eq!(driver.clicks_of("button.reset"), 1);
    }
}
