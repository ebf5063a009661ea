//! Shared test data for the suite.
//!
//! Centralizes the literals the page flows assert against so expectation
//! changes land in one place.

/// A known-good contact form submission
pub const VALID_NAME: &str = "John Doe";
/// Well-formed email for the contact form
pub const VALID_EMAIL: &str = "john.doe@example.com";
/// Malformed email used to provoke validation errors
pub const INVALID_EMAIL: &str = "invalid-email";
/// Canonical contact form message body
pub const TEST_MESSAGE: &str = "This is a test message for the contact form.";

/// Navigation section labels expected in the site menu
pub const EXPECTED_NAV_SECTIONS: [&str; 5] = ["Home", "About", "Skills", "Projects", "Contact"];
/// Social platforms the footer links out to
pub const SOCIAL_PLATFORMS: [&str; 4] = ["LinkedIn", "GitHub", "Twitter", "Instagram"];

/// Skills listed on the home page
pub const EXPECTED_SKILLS: [&str; 10] = [
    "JavaScript",
    "TypeScript",
    "React",
    "Node.js",
    "Python",
    "HTML",
    "CSS",
    "Git",
    "Docker",
    "AWS",
];

/// Minimum number of project cards on the home page
pub const MIN_PROJECT_COUNT: usize = 3;

/// Page load budget in milliseconds
pub const MAX_LOAD_TIME_MS: f64 = 3_000.0;
/// First contentful paint budget in milliseconds
pub const MAX_FIRST_CONTENTFUL_PAINT_MS: f64 = 2_000.0;

/// Viewport dimensions for a responsive breakpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    /// Width in CSS pixels
    pub width: u32,
    /// Height in CSS pixels
    pub height: u32,
}

/// Mobile breakpoint (iPhone SE class)
pub const MOBILE_VIEWPORT: Viewport = Viewport {
    width: 375,
    height: 667,
};
/// Tablet breakpoint (iPad class)
pub const TABLET_VIEWPORT: Viewport = Viewport {
    width: 768,
    height: 1024,
};
/// Desktop breakpoint
pub const DESKTOP_VIEWPORT: Viewport = Viewport {
    width: 1920,
    height: 1080,
};

/// Expected content of one seeded blog post
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlogPostExpectation {
    /// Post title as rendered in the card
    pub title: &'static str,
    /// Publication date (ISO format)
    pub date: &'static str,
    /// View counter text
    pub views: &'static str,
    /// Slug fragment unique to the article link
    pub slug: &'static str,
    /// Full external article URL
    pub url: &'static str,
}

/// The three posts seeded on the blog page, in render order
pub const EXPECTED_BLOG_POSTS: [BlogPostExpectation; 3] = [
    BlogPostExpectation {
        title: "Getting Started with React Automation Testing",
        date: "2024-01-15",
        views: "120 views",
        slug: "react-automation-testing-guide",
        url: "https://piyathida-sanaoun01.medium.com/react-automation-testing-guide",
    },
    BlogPostExpectation {
        title: "CI/CD Pipeline Best Practices",
        date: "2024-01-10",
        views: "89 views",
        slug: "cicd-best-practices",
        url: "https://piyathida-sanaoun01.medium.com/cicd-best-practices",
    },
    BlogPostExpectation {
        title: "Quality Assurance in Agile Development",
        date: "2024-01-05",
        views: "156 views",
        slug: "qa-agile-development",
        url: "https://piyathida-sanaoun01.medium.com/qa-agile-development",
    },
];

/// Heading expected on the blog page
pub const BLOG_HEADING: &str = "My Blog Posts";
/// Heading expected on the admin page
pub const ADMIN_HEADING: &str = "Admin Panel";

/// Pattern the CV download link's href must match
pub const CV_PDF_PATTERN: &str = r".*Piyathida.*San-aoun.*\.pdf$";
