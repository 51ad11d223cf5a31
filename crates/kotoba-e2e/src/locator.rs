//! Locator abstraction for element selection and interaction.
//!
//! A [`Locator`] is a declarative, lazily-resolved reference to one or more
//! elements of the page under test. It never caches DOM handles: every
//! interaction renders a fresh JavaScript query that re-resolves the element
//! set against the live document, so stale-element failures are structurally
//! impossible while the selector itself stays valid.
//!
//! Selection mirrors what the application's markup actually offers: accessible
//! role + name, placeholder text, visible text content, CSS classes, and
//! `data-testid` where the application exposes one. Structural modifiers
//! ([`Locator::ancestor`], [`Locator::find`], [`Locator::with_text`]) cover
//! label-to-control hops for screens without stable attributes.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Selector for locating elements
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Selector {
    /// CSS selector (e.g. ".card")
    Css(String),
    /// Innermost elements whose text content contains the substring
    Text(String),
    /// Innermost elements whose text content matches the JS regex source
    TextPattern(String),
    /// Input or textarea with this exact placeholder
    Placeholder(String),
    /// Elements of an accessible role whose accessible name contains `name`.
    ///
    /// Name matching is substring-based: the suites under test address
    /// controls both by exact label ("Войти") and by label prefix
    /// ("Все" against "Все (12)"), and substring covers both.
    Role {
        /// Accessible role ("button", "heading", "textbox")
        role: String,
        /// Substring of the accessible name
        name: String,
    },
    /// `data-testid` attribute value
    TestId(String),
}

impl Selector {
    /// Create a CSS selector
    #[must_use]
    pub fn css(selector: impl Into<String>) -> Self {
        Self::Css(selector.into())
    }

    /// Create a text-content selector
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    /// Create a text selector from a JS regex source (e.g. `"a|b"`)
    #[must_use]
    pub fn text_pattern(pattern: impl Into<String>) -> Self {
        Self::TextPattern(pattern.into())
    }

    /// Create a placeholder selector
    #[must_use]
    pub fn placeholder(placeholder: impl Into<String>) -> Self {
        Self::Placeholder(placeholder.into())
    }

    /// Create a role selector with an accessible-name substring
    #[must_use]
    pub fn role(role: impl Into<String>, name: impl Into<String>) -> Self {
        Self::Role {
            role: role.into(),
            name: name.into(),
        }
    }

    /// Create a test-id selector
    #[must_use]
    pub fn test_id(id: impl Into<String>) -> Self {
        Self::TestId(id.into())
    }

    /// CSS element list queried for a given accessible role
    fn role_css(role: &str) -> String {
        match role {
            "button" => {
                r#"button,[role="button"],input[type="button"],input[type="submit"]"#.to_string()
            }
            "heading" => r#"h1,h2,h3,h4,h5,h6,[role="heading"]"#.to_string(),
            "textbox" => concat!(
                r#"input:not([type="checkbox"]):not([type="radio"])"#,
                r#":not([type="button"]):not([type="submit"]),"#,
                r#"textarea,[role="textbox"]"#
            )
            .to_string(),
            other => format!(r#"[role="{other}"]"#),
        }
    }

    /// JavaScript expression resolving this selector to an element array
    /// within `scope` (either `document` or an element variable).
    pub(crate) fn to_scoped_js(&self, scope: &str) -> String {
        match self {
            Self::Css(css) => format!("Array.from({scope}.querySelectorAll({css:?}))"),
            Self::Text(text) => Self::innermost_js(
                scope,
                &format!("(el.textContent || '').includes({text:?})"),
            ),
            Self::TextPattern(pattern) => Self::innermost_js(
                scope,
                &format!("new RegExp({pattern:?}).test(el.textContent || '')"),
            ),
            Self::Placeholder(placeholder) => format!(
                "Array.from({scope}.querySelectorAll('input,textarea'))\
                 .filter(el => el.placeholder === {placeholder:?})"
            ),
            Self::Role { role, name } => {
                let css = Self::role_css(role);
                format!(
                    "Array.from({scope}.querySelectorAll({css:?}))\
                     .filter(el => ((el.textContent || '') + ' ' + (el.value || '') + ' ' \
                     + (el.getAttribute('aria-label') || '')).includes({name:?}))"
                )
            }
            Self::TestId(id) => {
                let attr = format!("[data-testid=\"{id}\"]");
                format!("Array.from({scope}.querySelectorAll({attr:?}))")
            }
        }
    }

    /// Elements matching `predicate` that contain no other matching element.
    ///
    /// Text queries keep only the innermost match so "ascend two levels from
    /// the label" style locators land on the label, not the whole page.
    fn innermost_js(scope: &str, predicate: &str) -> String {
        format!(
            "(() => {{ const m = Array.from({scope}.querySelectorAll('*'))\
             .filter(el => {predicate}); \
             return m.filter(el => !m.some(o => o !== el && el.contains(o))); }})()"
        )
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Css(css) => write!(f, "css({css:?})"),
            Self::Text(text) => write!(f, "text({text:?})"),
            Self::TextPattern(pattern) => write!(f, "text(/{pattern}/)"),
            Self::Placeholder(placeholder) => write!(f, "placeholder({placeholder:?})"),
            Self::Role { role, name } => write!(f, "role({role}, {name:?})"),
            Self::TestId(id) => write!(f, "testid({id:?})"),
        }
    }
}

/// A declarative, re-resolvable reference to elements of the live page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Locator {
    selector: Selector,
    /// DOM levels to climb from each match
    ancestors: u32,
    /// Descendant selector applied after climbing
    within: Option<Box<Selector>>,
    /// Substring filter over the final element set's text content
    filter_text: Option<String>,
    /// Per-locator wait budget override
    timeout: Option<Duration>,
}

impl Locator {
    /// Create a locator from a selector
    #[must_use]
    pub fn new(selector: Selector) -> Self {
        Self {
            selector,
            ancestors: 0,
            within: None,
            filter_text: None,
            timeout: None,
        }
    }

    /// Shorthand for a CSS locator
    #[must_use]
    pub fn css(selector: impl Into<String>) -> Self {
        Self::new(Selector::css(selector))
    }

    /// Shorthand for a text locator
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self::new(Selector::text(text))
    }

    /// Shorthand for a role locator
    #[must_use]
    pub fn role(role: impl Into<String>, name: impl Into<String>) -> Self {
        Self::new(Selector::role(role, name))
    }

    /// Shorthand for a placeholder locator
    #[must_use]
    pub fn placeholder(placeholder: impl Into<String>) -> Self {
        Self::new(Selector::placeholder(placeholder))
    }

    /// Climb `levels` DOM levels from each matched element.
    ///
    /// This is the label-to-card hop the dashboard needs ("Канжи" label,
    /// two levels up to the stat card). Structural coupling to the current
    /// markup; prefer [`Selector::TestId`] once the application exposes one.
    #[must_use]
    pub const fn ancestor(mut self, levels: u32) -> Self {
        self.ancestors += levels;
        self
    }

    /// Query descendants of the (possibly climbed) matches
    #[must_use]
    pub fn find(mut self, selector: Selector) -> Self {
        self.within = Some(Box::new(selector));
        self
    }

    /// Keep only elements whose text content contains the substring
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.filter_text = Some(text.into());
        self
    }

    /// Override the wait budget for assertions against this locator
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Get the base selector
    #[must_use]
    pub const fn selector(&self) -> &Selector {
        &self.selector
    }

    /// Per-locator wait budget, if overridden
    #[must_use]
    pub const fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Statements resolving this locator into an `els` array
    fn js_pipeline(&self) -> String {
        let mut js = format!("let els = {};", self.selector.to_scoped_js("document"));
        for _ in 0..self.ancestors {
            js.push_str(" els = els.map(el => el.parentElement).filter(Boolean);");
        }
        if let Some(within) = &self.within {
            let scoped = within.to_scoped_js("el");
            js.push_str(&format!(" els = els.flatMap(el => {scoped});"));
        }
        if let Some(text) = &self.filter_text {
            js.push_str(&format!(
                " els = els.filter(el => (el.textContent || '').includes({text:?}));"
            ));
        }
        js
    }

    fn js_with(&self, body: &str) -> String {
        format!("(() => {{ {} {body} }})()", self.js_pipeline())
    }

    /// JS expression: number of matching elements
    #[must_use]
    pub fn js_count(&self) -> String {
        self.js_with("return els.length;")
    }

    /// JS expression: text content of the first match, or null
    #[must_use]
    pub fn js_text(&self) -> String {
        self.js_with("return els.length ? els[0].textContent : null;")
    }

    /// JS expression: whether the first match exists and renders boxes
    #[must_use]
    pub fn js_visible(&self) -> String {
        self.js_with("return els.length > 0 && els[0].getClientRects().length > 0;")
    }

    /// JS expression: input value of the first match, or null
    #[must_use]
    pub fn js_value(&self) -> String {
        self.js_with("return els.length && els[0].value !== undefined ? els[0].value : null;")
    }

    /// JS expression: checked state of the first match, or null
    #[must_use]
    pub fn js_checked(&self) -> String {
        self.js_with(
            "return els.length && typeof els[0].checked === 'boolean' ? els[0].checked : null;",
        )
    }

    /// JS expression: class attribute of the first match, or null
    #[must_use]
    pub fn js_class(&self) -> String {
        self.js_with("return els.length ? (els[0].className || '') : null;")
    }

    /// JS expression: click the first match; false if nothing matched
    #[must_use]
    pub fn js_click(&self) -> String {
        self.js_with("const el = els[0]; if (!el) return false; el.click(); return true;")
    }

    /// JS expression: fill the first match and fire input/change events.
    ///
    /// Sets the value through the prototype's native setter so framework-
    /// managed inputs (React/Svelte) observe the change.
    #[must_use]
    pub fn js_fill(&self, text: &str) -> String {
        self.js_with(&format!(
            "const el = els[0]; if (!el) return false; el.focus(); \
             const desc = Object.getOwnPropertyDescriptor(Object.getPrototypeOf(el), 'value'); \
             if (desc && desc.set) {{ desc.set.call(el, {text:?}); }} else {{ el.value = {text:?}; }} \
             el.dispatchEvent(new Event('input', {{ bubbles: true }})); \
             el.dispatchEvent(new Event('change', {{ bubbles: true }})); \
             return true;"
        ))
    }

    /// JS expression: dispatch a key press to the first match
    #[must_use]
    pub fn js_press(&self, key: &str) -> String {
        self.js_with(&format!(
            "const el = els[0]; if (!el) return false; el.focus(); \
             for (const type of ['keydown', 'keypress', 'keyup']) {{ \
             el.dispatchEvent(new KeyboardEvent(type, {{ key: {key:?}, bubbles: true }})); }} \
             return true;"
        ))
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.selector)?;
        if self.ancestors > 0 {
            write!(f, ".ancestor({})", self.ancestors)?;
        }
        if let Some(within) = &self.within {
            write!(f, ".find({within})")?;
        }
        if let Some(text) = &self.filter_text {
            write!(f, ".with_text({text:?})")?;
        }
        Ok(())
    }
}

impl From<Selector> for Locator {
    fn from(selector: Selector) -> Self {
        Self::new(selector)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod selector_js {
        use super::*;

        #[test]
        fn css_selector_queries_document() {
            let js = Selector::css(".card").to_scoped_js("document");
            assert!(js.contains("document.querySelectorAll(\".card\")"));
        }

        #[test]
        fn text_selector_keeps_innermost_match() {
            let js = Selector::text("Канжи").to_scoped_js("document");
            assert!(js.contains("includes(\"Канжи\")"));
            assert!(js.contains("el.contains(o)"));
        }

        #[test]
        fn text_pattern_builds_regexp() {
            let js =
                Selector::text_pattern("Ошибка:|Введите имя пользователя").to_scoped_js("document");
            assert!(js.contains("new RegExp"));
            assert!(js.contains("Ошибка:|Введите имя пользователя"));
        }

        #[test]
        fn placeholder_matches_exactly() {
            let js = Selector::placeholder("Поиск...").to_scoped_js("document");
            assert!(js.contains("el.placeholder === \"Поиск...\""));
        }

        #[test]
        fn button_role_covers_role_attribute() {
            let js = Selector::role("button", "Войти").to_scoped_js("document");
            assert!(js.contains("button"));
            assert!(js.contains(r#"[role=\"button\"]"#));
            assert!(js.contains("includes(\"Войти\")"));
        }

        #[test]
        fn heading_role_spans_levels() {
            let js = Selector::role("heading", "Слова").to_scoped_js("document");
            assert!(js.contains("h1"));
            assert!(js.contains("h6"));
        }

        #[test]
        fn unknown_role_falls_back_to_attribute() {
            let js = Selector::role("tab", "Все").to_scoped_js("document");
            assert!(js.contains(r#"[role=\"tab\"]"#));
        }

        #[test]
        fn test_id_targets_data_attribute() {
            let js = Selector::test_id("stat-kanji").to_scoped_js("document");
            assert!(js.contains("data-testid"));
            assert!(js.contains("stat-kanji"));
        }

        #[test]
        fn scoped_resolution_uses_scope_variable() {
            let js = Selector::role("textbox", "").to_scoped_js("el");
            assert!(js.starts_with("Array.from(el.querySelectorAll"));
        }
    }

    mod locator_pipeline {
        use super::*;

        #[test]
        fn ancestor_climbs_parent_elements() {
            let js = Locator::text("Канжи").ancestor(2).js_count();
            assert_eq!(js.matches("parentElement").count(), 2);
        }

        #[test]
        fn find_queries_descendants() {
            let js = Locator::text("Имя пользователя")
                .ancestor(1)
                .find(Selector::role("textbox", ""))
                .js_value();
            assert!(js.contains("flatMap"));
            assert!(js.contains("el.querySelectorAll"));
        }

        #[test]
        fn with_text_filters_final_set() {
            let js = Locator::css(".card").with_text("猫").js_visible();
            assert!(js.contains("includes(\"猫\")"));
        }

        #[test]
        fn fill_uses_native_setter_and_events() {
            let js = Locator::placeholder("Введите имя").js_fill("demo");
            assert!(js.contains("getOwnPropertyDescriptor"));
            assert!(js.contains("new Event('input'"));
            assert!(js.contains("\"demo\""));
        }

        #[test]
        fn press_dispatches_key_events() {
            let js = Locator::placeholder("Введите имя").js_press("Enter");
            assert!(js.contains("KeyboardEvent"));
            assert!(js.contains("\"Enter\""));
        }
    }

    mod display {
        use super::*;

        #[test]
        fn locator_display_is_compact() {
            let locator = Locator::text("Имя пользователя")
                .ancestor(1)
                .find(Selector::role("textbox", ""));
            assert_eq!(
                locator.to_string(),
                "text(\"Имя пользователя\").ancestor(1).find(role(textbox, \"\"))"
            );
        }

        #[test]
        fn filtered_card_display_names_filter() {
            let locator = Locator::css(".card").with_text("猫");
            assert_eq!(locator.to_string(), "css(\".card\").with_text(\"猫\")");
        }
    }

    mod options {
        use super::*;

        #[test]
        fn timeout_override_round_trips() {
            let locator = Locator::css(".card").with_timeout(Duration::from_secs(10));
            assert_eq!(locator.timeout(), Some(Duration::from_secs(10)));
        }

        #[test]
        fn default_has_no_override() {
            assert_eq!(Locator::css(".card").timeout(), None);
        }
    }
}
