//! Abstract browser-automation seam.
//!
//! The page layer is generic over [`Driver`], so the same page objects run
//! against a real Chromium session (`CdpDriver`, behind the `browser`
//! feature) and against [`MockDriver`] in browserless unit tests. All
//! interactions are awaited; a driver holds no point-in-time DOM state on
//! behalf of callers.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::locator::Locator;
use crate::result::E2eResult;

/// Browser-automation operations the page layer needs.
///
/// Action methods (`click`, `fill`, `press`) return `Ok(false)` when the
/// locator resolves to nothing, so the page layer can keep polling until the
/// element becomes actionable instead of failing on the first miss.
#[async_trait]
pub trait Driver: Send + Sync {
    /// Navigate to an absolute URL
    async fn goto(&self, url: &str) -> E2eResult<()>;

    /// Current page URL
    async fn current_url(&self) -> E2eResult<String>;

    /// Click the first match; `Ok(false)` if nothing matched
    async fn click(&self, locator: &Locator) -> E2eResult<bool>;

    /// Fill the first match; `Ok(false)` if nothing matched
    async fn fill(&self, locator: &Locator, text: &str) -> E2eResult<bool>;

    /// Dispatch a key press to the first match; `Ok(false)` if nothing matched
    async fn press(&self, locator: &Locator, key: &str) -> E2eResult<bool>;

    /// Text content of the first match, `None` if nothing matched
    async fn text_content(&self, locator: &Locator) -> E2eResult<Option<String>>;

    /// Input value of the first match, `None` if nothing matched or not an input
    async fn input_value(&self, locator: &Locator) -> E2eResult<Option<String>>;

    /// Whether the first match exists and is rendered
    async fn is_visible(&self, locator: &Locator) -> E2eResult<bool>;

    /// Checked state of the first match, `None` if nothing matched or not checkable
    async fn is_checked(&self, locator: &Locator) -> E2eResult<Option<bool>>;

    /// Class attribute of the first match, `None` if nothing matched
    async fn class_name(&self, locator: &Locator) -> E2eResult<Option<String>>;

    /// Number of matching elements
    async fn count(&self, locator: &Locator) -> E2eResult<usize>;
}

/// One simulated UI region in a [`MockDriver`].
///
/// Nodes are keyed by the locator's `Display` rendering; a node describes
/// what the driver reports for that locator. `texts` is a sequence: each
/// `text_content` call advances to the next entry until the last one sticks,
/// which lets tests script label transitions ("Сохранение..." then
/// "Сохранить изменения") without mutating state mid-scenario.
#[derive(Debug, Clone, Default)]
pub struct MockNode {
    /// Scripted text contents, consumed in order; last entry repeats
    pub texts: Vec<String>,
    /// Input value
    pub value: Option<String>,
    /// Checked state
    pub checked: Option<bool>,
    /// Class attribute
    pub class_name: Option<String>,
    /// Whether the region is rendered
    pub visible: bool,
    /// Match count reported for the locator
    pub count: usize,
}

impl MockNode {
    /// A visible region with one match and no text
    #[must_use]
    pub fn visible() -> Self {
        Self {
            visible: true,
            count: 1,
            ..Self::default()
        }
    }

    /// A visible region with fixed text content
    #[must_use]
    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            texts: vec![text.into()],
            ..Self::visible()
        }
    }

    /// A visible region whose text content advances through `texts`
    #[must_use]
    pub fn with_text_sequence<I, S>(texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            texts: texts.into_iter().map(Into::into).collect(),
            ..Self::visible()
        }
    }

    /// Set the input value
    #[must_use]
    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// Set the checked state
    #[must_use]
    pub fn checked(mut self, checked: bool) -> Self {
        self.checked = Some(checked);
        self
    }

    /// Set the class attribute
    #[must_use]
    pub fn class(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = Some(class_name.into());
        self
    }

    /// Set the match count
    #[must_use]
    pub fn count(mut self, count: usize) -> Self {
        self.count = count;
        self
    }
}

#[derive(Debug, Default)]
struct MockState {
    url: String,
    nodes: HashMap<String, MockNode>,
    text_cursors: HashMap<String, usize>,
    navigate_on_click: HashMap<String, String>,
    calls: Vec<String>,
}

/// In-memory driver for unit-testing page objects without a browser.
///
/// Records every interaction in a call history and serves scripted node
/// state keyed by locator description.
#[derive(Debug, Default)]
pub struct MockDriver {
    state: Mutex<MockState>,
}

impl MockDriver {
    /// Create a new mock driver
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Script the node a locator resolves to
    pub fn set_node(&self, locator: &Locator, node: MockNode) {
        let mut state = self.state.lock().unwrap();
        state.nodes.insert(locator.to_string(), node);
        state.text_cursors.remove(&locator.to_string());
    }

    /// Navigate to `url` when `locator` is clicked, simulating an
    /// application-side route transition
    pub fn navigate_on_click(&self, locator: &Locator, url: impl Into<String>) {
        let mut state = self.state.lock().unwrap();
        state
            .navigate_on_click
            .insert(locator.to_string(), url.into());
    }

    /// Recorded interactions, in order
    #[must_use]
    pub fn history(&self) -> Vec<String> {
        self.state.lock().unwrap().calls.clone()
    }

    /// Whether any recorded interaction starts with `prefix`
    #[must_use]
    pub fn was_called(&self, prefix: &str) -> bool {
        self.state
            .lock()
            .unwrap()
            .calls
            .iter()
            .any(|c| c.starts_with(prefix))
    }
}

#[async_trait]
impl Driver for MockDriver {
    async fn goto(&self, url: &str) -> E2eResult<()> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(format!("goto {url}"));
        state.url = url.to_string();
        Ok(())
    }

    async fn current_url(&self) -> E2eResult<String> {
        Ok(self.state.lock().unwrap().url.clone())
    }

    async fn click(&self, locator: &Locator) -> E2eResult<bool> {
        let key = locator.to_string();
        let mut state = self.state.lock().unwrap();
        state.calls.push(format!("click {key}"));
        if let Some(url) = state.navigate_on_click.get(&key).cloned() {
            state.url = url;
        }
        Ok(state.nodes.contains_key(&key))
    }

    async fn fill(&self, locator: &Locator, text: &str) -> E2eResult<bool> {
        let key = locator.to_string();
        let mut state = self.state.lock().unwrap();
        state.calls.push(format!("fill {key} = {text:?}"));
        match state.nodes.get_mut(&key) {
            Some(node) => {
                node.value = Some(text.to_string());
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn press(&self, locator: &Locator, key: &str) -> E2eResult<bool> {
        let node_key = locator.to_string();
        let mut state = self.state.lock().unwrap();
        state.calls.push(format!("press {node_key} {key}"));
        Ok(state.nodes.contains_key(&node_key))
    }

    async fn text_content(&self, locator: &Locator) -> E2eResult<Option<String>> {
        let key = locator.to_string();
        let mut state = self.state.lock().unwrap();
        let Some(node) = state.nodes.get(&key) else {
            return Ok(None);
        };
        if node.texts.is_empty() {
            return Ok(Some(String::new()));
        }
        let len = node.texts.len();
        let cursor = state.text_cursors.get(&key).copied().unwrap_or(0);
        let text = state.nodes[&key].texts[cursor.min(len - 1)].clone();
        state.text_cursors.insert(key, (cursor + 1).min(len - 1));
        Ok(Some(text))
    }

    async fn input_value(&self, locator: &Locator) -> E2eResult<Option<String>> {
        let state = self.state.lock().unwrap();
        Ok(state
            .nodes
            .get(&locator.to_string())
            .and_then(|n| n.value.clone()))
    }

    async fn is_visible(&self, locator: &Locator) -> E2eResult<bool> {
        let state = self.state.lock().unwrap();
        Ok(state
            .nodes
            .get(&locator.to_string())
            .is_some_and(|n| n.visible))
    }

    async fn is_checked(&self, locator: &Locator) -> E2eResult<Option<bool>> {
        let state = self.state.lock().unwrap();
        Ok(state
            .nodes
            .get(&locator.to_string())
            .and_then(|n| n.checked))
    }

    async fn class_name(&self, locator: &Locator) -> E2eResult<Option<String>> {
        let state = self.state.lock().unwrap();
        Ok(state
            .nodes
            .get(&locator.to_string())
            .and_then(|n| n.class_name.clone()))
    }

    async fn count(&self, locator: &Locator) -> E2eResult<usize> {
        let state = self.state.lock().unwrap();
        Ok(state
            .nodes
            .get(&locator.to_string())
            .map_or(0, |n| n.count))
    }
}
