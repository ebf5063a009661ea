//! Selector strategies for element resolution.
//!
//! A [`Selector`] is an ordered fallback chain of [`SelectorStrategy`]
//! variants. Resolution tries each strategy in sequence against the current
//! DOM; the first strategy with a non-empty match set wins. This replaces
//! comma-joined multi-strategy selector strings with an explicit tagged
//! representation.

use serde::{Deserialize, Serialize};

/// A single way of finding elements in the live DOM
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SelectorStrategy {
    /// CSS selector (e.g. `nav a`, `input[name="email"]`)
    ByCss(String),
    /// Elements whose text content contains the given string
    ByText(String),
    /// ARIA role attribute (e.g. `navigation`, `banner`)
    ByRole(String),
    /// `data-testid` attribute value
    ByTestId(String),
}

impl SelectorStrategy {
    /// JavaScript expression evaluating to an array of matching elements.
    #[must_use]
    pub fn to_query_all(&self) -> String {
        match self {
            Self::ByCss(css) => {
                format!("Array.from(document.querySelectorAll({}))", js_string(css))
            }
            Self::ByText(text) => format!(
                "Array.from(document.querySelectorAll('*')).filter(el => el.children.length === 0 && el.textContent.includes({}))",
                js_string(text)
            ),
            Self::ByRole(role) => format!(
                "Array.from(document.querySelectorAll({}))",
                js_string(&format!("[role=\"{role}\"]"))
            ),
            Self::ByTestId(id) => format!(
                "Array.from(document.querySelectorAll({}))",
                js_string(&format!("[data-testid=\"{id}\"]"))
            ),
        }
    }

    /// Human-readable form for error messages
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Self::ByCss(css) => format!("css={css}"),
            Self::ByText(text) => format!("text={text}"),
            Self::ByRole(role) => format!("role={role}"),
            Self::ByTestId(id) => format!("testid={id}"),
        }
    }
}

/// Ordered fallback chain of selector strategies.
///
/// The chain is declared once at page-object construction time and re-resolved
/// on every use; it never holds element references.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selector {
    strategies: Vec<SelectorStrategy>,
}

impl Selector {
    /// Single-strategy CSS selector
    #[must_use]
    pub fn css(selector: impl Into<String>) -> Self {
        Self {
            strategies: vec![SelectorStrategy::ByCss(selector.into())],
        }
    }

    /// Single-strategy text selector
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            strategies: vec![SelectorStrategy::ByText(text.into())],
        }
    }

    /// Single-strategy ARIA-role selector
    #[must_use]
    pub fn role(role: impl Into<String>) -> Self {
        Self {
            strategies: vec![SelectorStrategy::ByRole(role.into())],
        }
    }

    /// Single-strategy test-id selector
    #[must_use]
    pub fn test_id(id: impl Into<String>) -> Self {
        Self {
            strategies: vec![SelectorStrategy::ByTestId(id.into())],
        }
    }

    /// Append a CSS fallback
    #[must_use]
    pub fn or_css(mut self, selector: impl Into<String>) -> Self {
        self.strategies.push(SelectorStrategy::ByCss(selector.into()));
        self
    }

    /// Append a text fallback
    #[must_use]
    pub fn or_text(mut self, text: impl Into<String>) -> Self {
        self.strategies.push(SelectorStrategy::ByText(text.into()));
        self
    }

    /// Append an ARIA-role fallback
    #[must_use]
    pub fn or_role(mut self, role: impl Into<String>) -> Self {
        self.strategies.push(SelectorStrategy::ByRole(role.into()));
        self
    }

    /// Append a test-id fallback
    #[must_use]
    pub fn or_test_id(mut self, id: impl Into<String>) -> Self {
        self.strategies.push(SelectorStrategy::ByTestId(id.into()));
        self
    }

    /// The ordered strategies in this chain
    #[must_use]
    pub fn strategies(&self) -> &[SelectorStrategy] {
        &self.strategies
    }

    /// JavaScript expression evaluating to the winning match set: the first
    /// strategy in the chain whose match set is non-empty, else `[]`.
    #[must_use]
    pub fn to_resolve_js(&self) -> String {
        let candidates: Vec<String> = self
            .strategies
            .iter()
            .map(SelectorStrategy::to_query_all)
            .collect();
        format!(
            "[{}].reduce((acc, cur) => acc.length > 0 ? acc : cur, [])",
            candidates.join(", ")
        )
    }

    /// JavaScript expression evaluating to the winning match count.
    #[must_use]
    pub fn to_count_js(&self) -> String {
        format!("({}).length", self.to_resolve_js())
    }

    /// Human-readable form for error messages
    #[must_use]
    pub fn describe(&self) -> String {
        self.strategies
            .iter()
            .map(SelectorStrategy::describe)
            .collect::<Vec<_>>()
            .join(" | ")
    }
}

/// Encode a Rust string as a JS string literal (serde_json escaping rules).
fn js_string(s: &str) -> String {
    serde_json::to_string(s).unwrap_or_else(|_| format!("{s:?}"))
}
