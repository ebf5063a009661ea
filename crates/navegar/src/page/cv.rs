//! CV page object: PDF download link and rendered CV images.

use super::{BasePage, PageObject};
use crate::locator::Locator;
use crate::result::{NavegarError, NavegarResult};
use crate::selector::Selector;

/// Page object for the CV page (`/#/cv`)
#[derive(Debug)]
pub struct CvPage {
    base: BasePage,
    /// PDF download link
    pub download_link: Locator,
    /// First rendered CV page image
    pub cv_page_one: Locator,
    /// Second rendered CV page image
    pub cv_page_two: Locator,
    /// All rendered CV images
    pub cv_images: Locator,
}

impl CvPage {
    /// Declare the CV page's locators against a browsing context
    #[must_use]
    pub fn new(base: BasePage) -> Self {
        Self {
            download_link: base.locator(Selector::css("a[href*='.pdf']").or_text("Download PDF")),
            cv_page_one: base.locator(
                Selector::css("img[alt*='CV Page 1']").or_css("img[src*='cv1.png']"),
            ),
            cv_page_two: base.locator(
                Selector::css("img[alt*='CV Page 2']").or_css("img[src*='cv2.png']"),
            ),
            cv_images: base.locator(Selector::css("img[src*='cv']")),
            base,
        }
    }

    /// The `href` of the PDF download link.
    ///
    /// Fails with `InvalidArgument` when the link renders without an href.
    pub async fn download_href(&self) -> NavegarResult<String> {
        match self.download_link.get_attribute("href").await? {
            Some(href) => Ok(href),
            None => Err(NavegarError::InvalidArgument {
                message: "download link has no href".to_string(),
            }),
        }
    }

    /// Whether the image addressed by `locator` has finished loading
    /// with non-zero intrinsic width.
    pub async fn is_image_loaded(&self, locator: &Locator) -> NavegarResult<bool> {
        locator.wait_for(self.base.config().default_timeout).await?;
        let script = format!(
            "(() => {{ const img = {}[{}]; return img ? img.complete && img.naturalWidth > 0 : false; }})()",
            locator.selector().to_resolve_js(),
            locator.index()
        );
        let value = self.base.driver().eval(&script).await?;
        Ok(value.as_bool().unwrap_or(false))
    }

    /// Alt text of both CV images, for accessibility checks
    pub async fn image_alt_texts(&self) -> NavegarResult<Vec<Option<String>>> {
        let mut alts = Vec::new();
        for image in [&self.cv_page_one, &self.cv_page_two] {
            if image.count().await? > 0 {
                alts.push(image.get_attribute("alt").await?);
            }
        }
        Ok(alts)
    }
}

impl PageObject for CvPage {
    fn route(&self) -> &'static str {
        "/#/cv"
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
    use regex::Regex;
    use std::sync::Arc;
    use std::time::Duration;

    fn cv_with(driver: &Arc<MockDriver>) -> CvPage {
        let config = SuiteConfig::new()
            .with_base_url("https://example.com")
            .with_default_timeout(Duration::from_millis(100));
        CvPage::new(BasePage::new(
            Arc::clone(driver) as Arc<dyn ContextDriver>,
            config,
        ))
    }

    #[tokio::test]
    async fn test_download_href_matches_pdf_pattern() {
        let driver = Arc::new(MockDriver::new());
        driver.add_element(
            MockElement::new("a[href*='.pdf']")
                .with_text("Download PDF")
                .with_attribute("href", "/assets/Piyathida-San-aoun-CV.pdf"),
        );
        let page = cv_with(&driver);
        let href = page.download_href().await.unwrap();
        let pattern = Regex::new(data::CV_PDF_PATTERN).unwrap();
        assert!(pattern.is_match(&href), "href {href} should match pattern");
    }

    #[tokio::test]
    async fn test_download_href_without_attribute_fails() {
        let driver = Arc::new(MockDriver::new());
        driver.add_element(MockElement::new("a[href*='.pdf']").with_text("Download PDF"));
        let page = cv_with(&driver);
        let result = page.download_href().await;
        assert!(matches!(result, Err(NavegarError::InvalidArgument { .. })));
    }

    #[tokio::test]
    async fn test_image_alt_texts_present() {
        let driver = Arc::new(MockDriver::new());
        driver.add_element(
            MockElement::new("img[src*='cv1.png']")
                .with_css("img[src*='cv']")
                .with_attribute("alt", "CV Page 1"),
        );
        driver.add_element(
            MockElement::new("img[src*='cv2.png']")
                .with_css("img[src*='cv']")
                .with_attribute("alt", "CV Page 2"),
        );
        let page = cv_with(&driver);
        let alts = page.image_alt_texts().await.unwrap();
        assert_eq!(alts.len(), 2);
        assert!(alts.iter().all(|alt| alt.as_deref().is_some_and(|a| !a.is_empty())));
    }

    #[tokio::test]
    async fn test_cv_images_counted_together() {
        let driver = Arc::new(MockDriver::new());
        driver.add_element(MockElement::new("img[src*='cv']"));
        driver.add_element(MockElement::new("img[src*='cv']"));
        let page = cv_with(&driver);
        assert_eq!(page.cv_images.count().await.unwrap(), 2);
    }
}
