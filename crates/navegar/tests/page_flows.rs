//! End-to-end page object flows against the mock driver.
//!
//! Exercises the suite the way real tests consume it: fixtures per
//! invocation, navigation, form workflows, and artifact capture.

use navegar::data;
use navegar::prelude::*;
use navegar::PageLoadMetrics;
use std::sync::Arc;
use std::time::{Duration, Instant};

fn fixtures_with(driver: &Arc<MockDriver>) -> Fixtures {
    navegar::init_test_logging();
    let config = SuiteConfig::new()
        .with_base_url("https://san-aoun.github.io/personal-site-monorepo")
        .with_default_timeout(Duration::from_millis(200));
    Fixtures::new(Arc::clone(driver) as Arc<dyn ContextDriver>, config)
}

fn seed_blog(driver: &Arc<MockDriver>) {
    driver.add_element(MockElement::new("h1").with_text(data::BLOG_HEADING));
    for post in data::EXPECTED_BLOG_POSTS {
        driver.add_element(MockElement::new(".blog-post").with_text(&format!(
            "{} {} {} views",
            post.title,
            post.date,
            post.views.trim_end_matches(" views")
        )));
        driver.add_element(
            MockElement::new(&format!("a[href*='{}']", post.slug))
                .with_css("a[href*='medium.com']")
                .with_attribute("href", post.url),
        );
    }
}

#[tokio::test]
async fn test_blog_page_lists_seeded_posts() {
    let driver = Arc::new(MockDriver::new());
    seed_blog(&driver);
    let fixtures = fixtures_with(&driver);
    let blog = fixtures.blog_page();

    blog.open().await.unwrap();
    assert!(driver
        .history()
        .iter()
        .any(|call| call.contains("#/blog")));

    assert_eq!(blog.heading.text_content().await.unwrap(), data::BLOG_HEADING);
    assert_eq!(blog.post_count().await.unwrap(), 3);

    let first = blog.post_text(0).await.unwrap();
    assert!(first.contains("Getting Started with React Automation Testing"));
    assert!(first.contains("2024-01-15"));
    assert!(first.contains("120 views"));
}

#[tokio::test]
async fn test_blog_article_links_resolve() {
    let driver = Arc::new(MockDriver::new());
    seed_blog(&driver);
    let fixtures = fixtures_with(&driver);
    let blog = fixtures.blog_page();

    for post in data::EXPECTED_BLOG_POSTS {
        let href = blog.article_href(post.slug).await.unwrap();
        assert_eq!(href, post.url);
    }
}

#[tokio::test]
async fn test_contact_form_happy_path() {
    let driver = Arc::new(MockDriver::new());
    driver.add_element(MockElement::new("form"));
    driver.add_element(MockElement::new("input[name='name']"));
    driver.add_element(MockElement::new("input[name='email']"));
    driver.add_element(MockElement::new("textarea[name='message']"));
    driver.add_element(MockElement::new("button[type='submit']"));
    driver.add_element(MockElement::new(".success").with_text("Message sent"));

    let fixtures = fixtures_with(&driver);
    let contact = fixtures.contact_page();

    contact
        .fill_contact_form(data::VALID_NAME, data::VALID_EMAIL, data::TEST_MESSAGE)
        .await
        .unwrap();
    contact.submit_form().await.unwrap();

    assert_eq!(
        driver.value_of("input[name='name']").as_deref(),
        Some(data::VALID_NAME)
    );
    assert!(contact.verify_form_submission().await.unwrap());
}

#[tokio::test]
async fn test_contact_form_rejects_invalid_email() {
    let driver = Arc::new(MockDriver::new());
    driver.add_element(MockElement::new("input[name='name']"));
    driver.add_element(MockElement::new("input[name='email']"));
    driver.add_element(MockElement::new("textarea[name='message']"));
    driver.add_element(MockElement::new("button[type='submit']"));
    driver.add_element(MockElement::new(".error").with_text("Invalid email address"));

    let fixtures = fixtures_with(&driver);
    let contact = fixtures.contact_page();

    contact
        .fill_contact_form(data::VALID_NAME, data::INVALID_EMAIL, data::TEST_MESSAGE)
        .await
        .unwrap();
    contact.submit_form().await.unwrap();

    assert_eq!(
        driver.value_of("input[name='email']").as_deref(),
        Some(data::INVALID_EMAIL)
    );
    assert!(contact.verify_form_error().await.unwrap());
}

#[tokio::test]
async fn test_contact_form_skips_absent_message_field() {
    let driver = Arc::new(MockDriver::new());
    driver.add_element(MockElement::new("input[name='name']"));
    driver.add_element(MockElement::new("input[name='email']"));
    driver.add_element(MockElement::new("button[type='submit']"));

    let fixtures = fixtures_with(&driver);
    let contact = fixtures.contact_page();

    contact
        .fill_contact_form(data::VALID_NAME, data::VALID_EMAIL, data::TEST_MESSAGE)
        .await
        .unwrap();
    contact.submit_form().await.unwrap();

    assert_eq!(driver.clicks_of("button[type='submit']"), 1);
    assert_eq!(
        driver.value_of("input[name='email']").as_deref(),
        Some(data::VALID_EMAIL)
    );
}

#[tokio::test]
async fn test_cv_download_href_matches_expected_pdf() {
    let driver = Arc::new(MockDriver::new());
    driver.add_element(
        MockElement::new("a[href*='.pdf']")
            .with_text("Download PDF")
            .with_attribute("href", "/assets/Piyathida-San-aoun-CV.pdf"),
    );

    let fixtures = fixtures_with(&driver);
    let cv = fixtures.cv_page();

    let href = cv.download_href().await.unwrap();
    let pattern = regex::Regex::new(data::CV_PDF_PATTERN).unwrap();
    assert!(pattern.is_match(&href));
}

#[tokio::test]
async fn test_home_scroll_and_navigation() {
    let driver = Arc::new(MockDriver::new());
    driver.add_element(MockElement::new(".about").with_in_viewport(false));
    driver.add_element(MockElement::new(".contact").with_in_viewport(true));

    let fixtures = fixtures_with(&driver);
    let home = fixtures.home_page();

    home.scroll_to_section(Section::About).await.unwrap();
    assert!(driver.was_called("scroll:"));

    // Already in the viewport, no scroll should be issued
    let scrolls_before = driver
        .history()
        .iter()
        .filter(|call| call.starts_with("scroll:"))
        .count();
    home.scroll_to_section(Section::Contact).await.unwrap();
    let scrolls_after = driver
        .history()
        .iter()
        .filter(|call| call.starts_with("scroll:"))
        .count();
    assert_eq!(scrolls_before, scrolls_after);
}

#[tokio::test]
async fn test_screenshot_artifacts_follow_naming_convention() {
    let driver = Arc::new(MockDriver::new());
    let temp = tempfile::tempdir().unwrap();
    navegar::init_test_logging();
    let config = SuiteConfig::new()
        .with_base_url("https://example.com")
        .with_screenshot_dir(temp.path().join("screenshots"))
        .with_artifact_dir(temp.path().join("test-results/screenshots"));
    let fixtures = Fixtures::new(Arc::clone(&driver) as Arc<dyn ContextDriver>, config);

    let plain = fixtures.base().take_screenshot("blog-listing").await.unwrap();
    assert!(plain.ends_with("screenshots/blog-listing.png") || plain.ends_with("blog-listing.png"));
    assert!(plain.exists());

    let stamped = fixtures
        .base()
        .take_full_page_screenshot("blog-listing")
        .await
        .unwrap();
    let file_name = stamped.file_name().unwrap().to_string_lossy().into_owned();
    assert!(file_name.starts_with("blog-listing-"));
    assert!(file_name.ends_with(".png"));
    assert!(stamped.exists());
}

#[tokio::test]
async fn test_count_is_non_blocking_and_zero_for_missing() {
    let driver = Arc::new(MockDriver::new());
    let fixtures = fixtures_with(&driver);
    let home = fixtures.home_page();

    let started = Instant::now();
    assert_eq!(home.hero_section.count().await.unwrap(), 0);
    assert!(started.elapsed() < Duration::from_millis(100));
}

#[tokio::test]
async fn test_wait_for_missing_element_times_out_within_bound() {
    let driver = Arc::new(MockDriver::new());
    let fixtures = fixtures_with(&driver);
    let home = fixtures.home_page();

    let timeout = Duration::from_millis(150);
    let started = Instant::now();
    let result = home.hero_section.wait_for(timeout).await;
    let elapsed = started.elapsed();

    assert!(matches!(result, Err(NavegarError::Timeout { .. })));
    assert!(elapsed >= timeout);
    assert!(elapsed < timeout + Duration::from_millis(250));
}

#[tokio::test]
async fn test_invocations_are_fully_isolated() {
    let first_driver = Arc::new(MockDriver::new());
    let second_driver = Arc::new(MockDriver::new());
    let first = fixtures_with(&first_driver);
    let second = fixtures_with(&second_driver);

    seed_blog(&first_driver);
    first.blog_page().open().await.unwrap();

    assert_eq!(first.blog_page().post_count().await.unwrap(), 3);
    assert_eq!(second.blog_page().post_count().await.unwrap(), 0);
    assert!(!second_driver.was_called("navigate:"));
}

#[tokio::test]
async fn test_admin_flow_through_registry() {
    let driver = Arc::new(MockDriver::new());
    driver.add_element(MockElement::new("h1").with_text(data::ADMIN_HEADING));
    let fixtures = fixtures_with(&driver);

    let registry = FixtureRegistry::with_defaults();
    let page = registry.resolve("adminPage", fixtures.base().clone()).unwrap();
    page.open().await.unwrap();

    assert!(driver.history().iter().any(|call| call.contains("#/admin")));
    assert!(fixtures
        .admin_page()
        .verify_heading(data::ADMIN_HEADING)
        .await
        .unwrap());
}

#[tokio::test]
async fn test_navigation_menu_lists_expected_sections() {
    let driver = Arc::new(MockDriver::new());
    driver.add_element(MockElement::new("nav").with_text("menu"));
    for section in data::EXPECTED_NAV_SECTIONS {
        driver.add_element(
            MockElement::new("nav a")
                .with_text(section)
                .with_attribute("href", &format!("#{}", section.to_lowercase())),
        );
    }

    let fixtures = fixtures_with(&driver);
    let home = fixtures.home_page();

    assert!(home.verify_navigation_menu_visible().await.unwrap());
    let links = home.navigation_links().await.unwrap();
    assert_eq!(links.len(), data::EXPECTED_NAV_SECTIONS.len());
    for (link, section) in links.iter().zip(data::EXPECTED_NAV_SECTIONS) {
        assert_eq!(link.text_content().await.unwrap(), section);
    }
}

#[tokio::test]
async fn test_social_links_cover_expected_platforms() {
    let driver = Arc::new(MockDriver::new());
    for platform in data::SOCIAL_PLATFORMS {
        driver.add_element(
            MockElement::new(".social-links a")
                .with_text(platform)
                .with_attribute("href", &format!("https://example.com/{platform}")),
        );
    }

    let fixtures = fixtures_with(&driver);
    let contact = fixtures.contact_page();

    let handles = contact.social_link_handles().await.unwrap();
    assert_eq!(handles.len(), data::SOCIAL_PLATFORMS.len());
    for (handle, platform) in handles.iter().zip(data::SOCIAL_PLATFORMS) {
        assert!(handle.text_content().await.unwrap().contains(platform));
    }
}

#[tokio::test]
async fn test_skills_and_projects_render_expected_content() {
    let driver = Arc::new(MockDriver::new());
    driver.add_element(MockElement::new(".skills").with_text(&data::EXPECTED_SKILLS.join(", ")));
    for _ in 0..data::MIN_PROJECT_COUNT {
        driver.add_element(MockElement::new(".project-card"));
    }

    let fixtures = fixtures_with(&driver);
    let home = fixtures.home_page();

    let skills_text = home.skills_section.text_content().await.unwrap();
    for skill in data::EXPECTED_SKILLS {
        assert!(skills_text.contains(skill), "missing skill {skill}");
    }

    let cards = fixtures
        .base()
        .locator(Selector::css(".project-card"))
        .count()
        .await
        .unwrap();
    assert!(cards >= data::MIN_PROJECT_COUNT);
}

#[tokio::test]
async fn test_load_metrics_within_performance_budget() {
    let driver = Arc::new(MockDriver::new());
    driver.set_metrics(PageLoadMetrics {
        dom_content_loaded_ms: Some(650.0),
        load_complete_ms: Some(1_400.0),
        first_paint_ms: Some(700.0),
        first_contentful_paint_ms: Some(900.0),
    });

    let fixtures = fixtures_with(&driver);
    let metrics = fixtures.base().load_metrics().await.unwrap();

    let load = metrics.load_complete_ms.unwrap();
    assert!(load <= data::MAX_LOAD_TIME_MS, "load took {load}ms");
    let fcp = metrics.first_contentful_paint_ms.unwrap();
    assert!(
        fcp <= data::MAX_FIRST_CONTENTFUL_PAINT_MS,
        "first contentful paint took {fcp}ms"
    );
}
