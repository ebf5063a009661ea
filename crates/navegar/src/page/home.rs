//! Home page object: hero, profile, section navigation.

use super::{BasePage, PageObject};
use crate::locator::Locator;
use crate::result::{NavegarError, NavegarResult};
use crate::selector::Selector;

/// Scrollable sections of the home page.
///
/// A closed enum: `scroll_to_section` is exhaustive at compile time, and
/// string input goes through [`Section::from_name`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    /// Professional summary
    About,
    /// Skill list
    Skills,
    /// Project cards
    Projects,
    /// Contact form and social links
    Contact,
}

impl Section {
    /// All sections in page order
    pub const ALL: [Self; 4] = [Self::About, Self::Skills, Self::Projects, Self::Contact];

    /// Section name as it appears in the DOM
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::About => "about",
            Self::Skills => "skills",
            Self::Projects => "projects",
            Self::Contact => "contact",
        }
    }

    /// Parse a section name, failing with `InvalidArgument` outside the
    /// closed enum.
    pub fn from_name(name: &str) -> NavegarResult<Self> {
        match name {
            "about" => Ok(Self::About),
            "skills" => Ok(Self::Skills),
            "projects" => Ok(Self::Projects),
            "contact" => Ok(Self::Contact),
            other => Err(NavegarError::InvalidArgument {
                message: format!("unknown section '{other}'"),
            }),
        }
    }
}

impl std::fmt::Display for Section {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Page object for the portfolio home page (`/`)
#[derive(Debug)]
pub struct HomePage {
    base: BasePage,
    /// Main heading (owner name)
    pub heading: Locator,
    /// Job-title subheading
    pub subheading: Locator,
    /// Navigation menu
    pub navigation_menu: Locator,
    /// Hero banner
    pub hero_section: Locator,
    /// About / professional summary
    pub about_section: Locator,
    /// Skills list
    pub skills_section: Locator,
    /// Project cards
    pub projects_section: Locator,
    /// Contact block
    pub contact_section: Locator,
    /// Footer
    pub footer_section: Locator,
    /// Profile image
    pub profile_image: Locator,
    /// Social links (GitHub, LinkedIn, Medium)
    pub social_links: Locator,
}

impl HomePage {
    /// Declare the home page's locators against a browsing context
    #[must_use]
    pub fn new(base: BasePage) -> Self {
        Self {
            heading: base.locator(Selector::css("h1")),
            subheading: base.locator(Selector::css("h2")),
            navigation_menu: base.locator(
                Selector::css("nav")
                    .or_css(".navigation")
                    .or_css(".navbar")
                    .or_role("navigation"),
            ),
            hero_section: base.locator(
                Selector::css(".hero").or_css("#hero").or_test_id("hero"),
            ),
            about_section: base.locator(
                Selector::css(".about").or_css("#about").or_test_id("about"),
            ),
            skills_section: base.locator(
                Selector::css(".skills")
                    .or_css("#skills")
                    .or_test_id("skills"),
            ),
            projects_section: base.locator(
                Selector::css(".projects")
                    .or_css("#projects")
                    .or_test_id("projects"),
            ),
            contact_section: base.locator(
                Selector::css(".contact")
                    .or_css("#contact")
                    .or_test_id("contact"),
            ),
            footer_section: base.locator(Selector::css("footer").or_css(".footer")),
            profile_image: base.locator(
                Selector::css("img[alt*='Piyathida']").or_css("img[src*='profile']"),
            ),
            social_links: base.locator(Selector::css(".social-links a").or_css(".social a")),
            base,
        }
    }

    /// Verify that the document title contains the expected fragment
    pub async fn verify_title(&self, expected: &str) -> NavegarResult<bool> {
        let value = self.base.driver().eval("document.title").await?;
        Ok(value.as_str().is_some_and(|title| title.contains(expected)))
    }

    /// Wait for the navigation menu and report its visibility
    pub async fn verify_navigation_menu_visible(&self) -> NavegarResult<bool> {
        self.base
            .wait_for_element(&self.navigation_menu, self.base.config().default_timeout)
            .await?;
        self.navigation_menu.is_visible().await
    }

    /// Wait for the hero section and report its visibility
    pub async fn verify_hero_section_visible(&self) -> NavegarResult<bool> {
        self.base
            .wait_for_element(&self.hero_section, self.base.config().default_timeout)
            .await?;
        self.hero_section.is_visible().await
    }

    /// Scroll the named section into view. No-op if the section is already
    /// fully within the viewport.
    pub async fn scroll_to_section(&self, section: Section) -> NavegarResult<()> {
        let target = match section {
            Section::About => &self.about_section,
            Section::Skills => &self.skills_section,
            Section::Projects => &self.projects_section,
            Section::Contact => &self.contact_section,
        };
        self.base.scroll_to_element(target).await
    }

    /// All anchors inside the navigation menu, as narrowed handles
    pub async fn navigation_links(&self) -> NavegarResult<Vec<Locator>> {
        self.base
            .locator(Selector::css("nav a").or_css(".navigation a").or_css(".navbar a"))
            .all()
            .await
    }
}

impl PageObject for HomePage {
    fn route(&self) -> &'static str {
        "/"
    }

    fn base(&self) -> &BasePage {
        &self.base
    }
}
