//! Page handle: navigation, actions, and polling assertions.
//!
//! [`Page`] wraps a [`Driver`] together with the application's base URL and
//! the default wait budget. Actions auto-wait for the target element to
//! become actionable; `expect_*` assertions re-resolve their locator every
//! poll until the condition holds or the budget lapses. A lapsed budget fails
//! the scenario with the locator description and the last observed value.

use std::time::Duration;

use tracing::debug;

use crate::driver::Driver;
use crate::locator::Locator;
use crate::result::E2eResult;
use crate::wait::{poll_until, url_path, PollOutcome, WaitOptions};

/// Handle to one browser page of the application under test
#[derive(Debug)]
pub struct Page<D> {
    driver: D,
    base_url: String,
    wait: WaitOptions,
}

impl<D: Driver> Page<D> {
    /// Create a page over `driver`, rooted at `base_url`
    pub fn new(driver: D, base_url: impl Into<String>) -> Self {
        Self {
            driver,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            wait: WaitOptions::default(),
        }
    }

    /// Override the default wait options
    #[must_use]
    pub const fn with_wait(mut self, wait: WaitOptions) -> Self {
        self.wait = wait;
        self
    }

    /// The underlying driver
    pub const fn driver(&self) -> &D {
        &self.driver
    }

    /// Default wait options for this page
    pub const fn wait_options(&self) -> &WaitOptions {
        &self.wait
    }

    fn timeout_for(&self, locator: &Locator) -> Duration {
        locator.timeout().unwrap_or_else(|| self.wait.timeout())
    }

    /// Navigate to an application route (e.g. `/words`)
    pub async fn goto(&self, path: &str) -> E2eResult<()> {
        let url = format!("{}{path}", self.base_url);
        debug!(%url, "navigating");
        self.driver.goto(&url).await
    }

    /// Wait for the application to reach `path`
    pub async fn wait_for_path(&self, path: &str) -> E2eResult<()> {
        poll_until(
            self.wait.timeout(),
            self.wait.poll_interval(),
            &format!("route {path}"),
            || async {
                let url = self.driver.current_url().await?;
                if url_path(&url) == path {
                    Ok(PollOutcome::Ready(()))
                } else {
                    Ok(PollOutcome::Pending(format!("route {}", url_path(&url))))
                }
            },
        )
        .await
    }

    /// Assert the application is at `path`
    pub async fn expect_path(&self, path: &str) -> E2eResult<()> {
        self.wait_for_path(path).await
    }

    /// Click the first element the locator resolves to, waiting for it to
    /// become actionable
    pub async fn click(&self, locator: &Locator) -> E2eResult<()> {
        poll_until(
            self.timeout_for(locator),
            self.wait.poll_interval(),
            &format!("{locator} to be actionable"),
            || async {
                if self.driver.click(locator).await? {
                    Ok(PollOutcome::Ready(()))
                } else {
                    Ok(PollOutcome::Pending("no matching element".to_string()))
                }
            },
        )
        .await
    }

    /// Fill the first matching input, waiting for it to become actionable
    pub async fn fill(&self, locator: &Locator, text: &str) -> E2eResult<()> {
        poll_until(
            self.timeout_for(locator),
            self.wait.poll_interval(),
            &format!("{locator} to be actionable"),
            || async {
                if self.driver.fill(locator, text).await? {
                    Ok(PollOutcome::Ready(()))
                } else {
                    Ok(PollOutcome::Pending("no matching element".to_string()))
                }
            },
        )
        .await
    }

    /// Dispatch a key press to the first matching element
    pub async fn press(&self, locator: &Locator, key: &str) -> E2eResult<()> {
        poll_until(
            self.timeout_for(locator),
            self.wait.poll_interval(),
            &format!("{locator} to be actionable"),
            || async {
                if self.driver.press(locator, key).await? {
                    Ok(PollOutcome::Ready(()))
                } else {
                    Ok(PollOutcome::Pending("no matching element".to_string()))
                }
            },
        )
        .await
    }

    /// Assert the locator resolves to a visible element
    pub async fn expect_visible(&self, locator: &Locator) -> E2eResult<()> {
        poll_until(
            self.timeout_for(locator),
            self.wait.poll_interval(),
            &format!("{locator} to be visible"),
            || async {
                if self.driver.is_visible(locator).await? {
                    Ok(PollOutcome::Ready(()))
                } else {
                    Ok(PollOutcome::Pending("not visible".to_string()))
                }
            },
        )
        .await
    }

    /// Assert the locator resolves to nothing visible
    pub async fn expect_hidden(&self, locator: &Locator) -> E2eResult<()> {
        poll_until(
            self.timeout_for(locator),
            self.wait.poll_interval(),
            &format!("{locator} to be hidden"),
            || async {
                if self.driver.is_visible(locator).await? {
                    Ok(PollOutcome::Pending("still visible".to_string()))
                } else {
                    Ok(PollOutcome::Ready(()))
                }
            },
        )
        .await
    }

    /// Assert the element's text content equals `expected` exactly
    pub async fn expect_text(&self, locator: &Locator, expected: &str) -> E2eResult<()> {
        self.expect_text_within(locator, expected, self.timeout_for(locator))
            .await
    }

    /// [`Page::expect_text`] with an explicit wait budget
    pub async fn expect_text_within(
        &self,
        locator: &Locator,
        expected: &str,
        timeout: Duration,
    ) -> E2eResult<()> {
        poll_until(
            timeout,
            self.wait.poll_interval(),
            &format!("{locator} to have text {expected:?}"),
            || async {
                match self.driver.text_content(locator).await? {
                    Some(text) if text.trim() == expected => Ok(PollOutcome::Ready(())),
                    Some(text) => Ok(PollOutcome::Pending(format!("{text:?}"))),
                    None => Ok(PollOutcome::Pending("no matching element".to_string())),
                }
            },
        )
        .await
    }

    /// Assert the element's text content contains `needle`
    pub async fn expect_text_contains(&self, locator: &Locator, needle: &str) -> E2eResult<()> {
        poll_until(
            self.timeout_for(locator),
            self.wait.poll_interval(),
            &format!("{locator} to contain text {needle:?}"),
            || async {
                match self.driver.text_content(locator).await? {
                    Some(text) if text.contains(needle) => Ok(PollOutcome::Ready(())),
                    Some(text) => Ok(PollOutcome::Pending(format!("{text:?}"))),
                    None => Ok(PollOutcome::Pending("no matching element".to_string())),
                }
            },
        )
        .await
    }

    /// Assert the input's value equals `expected`
    pub async fn expect_value(&self, locator: &Locator, expected: &str) -> E2eResult<()> {
        poll_until(
            self.timeout_for(locator),
            self.wait.poll_interval(),
            &format!("{locator} to have value {expected:?}"),
            || async {
                match self.driver.input_value(locator).await? {
                    Some(value) if value == expected => Ok(PollOutcome::Ready(())),
                    Some(value) => Ok(PollOutcome::Pending(format!("{value:?}"))),
                    None => Ok(PollOutcome::Pending("no matching input".to_string())),
                }
            },
        )
        .await
    }

    /// Assert the element's checked state equals `expected` exactly
    pub async fn expect_checked(&self, locator: &Locator, expected: bool) -> E2eResult<()> {
        poll_until(
            self.timeout_for(locator),
            self.wait.poll_interval(),
            &format!("{locator} to be checked={expected}"),
            || async {
                match self.driver.is_checked(locator).await? {
                    Some(checked) if checked == expected => Ok(PollOutcome::Ready(())),
                    Some(checked) => Ok(PollOutcome::Pending(format!("checked={checked}"))),
                    None => Ok(PollOutcome::Pending("no checkable element".to_string())),
                }
            },
        )
        .await
    }

    /// Assert the element's class attribute contains the `class` token
    pub async fn expect_class_contains(&self, locator: &Locator, class: &str) -> E2eResult<()> {
        poll_until(
            self.timeout_for(locator),
            self.wait.poll_interval(),
            &format!("{locator} to carry class {class:?}"),
            || async {
                match self.driver.class_name(locator).await? {
                    Some(classes) if classes.split_whitespace().any(|c| c == class) => {
                        Ok(PollOutcome::Ready(()))
                    }
                    Some(classes) => Ok(PollOutcome::Pending(format!("classes {classes:?}"))),
                    None => Ok(PollOutcome::Pending("no matching element".to_string())),
                }
            },
        )
        .await
    }

    /// Assert the element's class attribute does not contain the `class` token
    pub async fn expect_class_missing(&self, locator: &Locator, class: &str) -> E2eResult<()> {
        poll_until(
            self.timeout_for(locator),
            self.wait.poll_interval(),
            &format!("{locator} to not carry class {class:?}"),
            || async {
                match self.driver.class_name(locator).await? {
                    Some(classes) if classes.split_whitespace().any(|c| c == class) => {
                        Ok(PollOutcome::Pending(format!("classes {classes:?}")))
                    }
                    _ => Ok(PollOutcome::Ready(())),
                }
            },
        )
        .await
    }

    /// Assert the locator resolves to at least `min` elements
    pub async fn expect_count_at_least(&self, locator: &Locator, min: usize) -> E2eResult<()> {
        poll_until(
            self.timeout_for(locator),
            self.wait.poll_interval(),
            &format!("{locator} to match at least {min} element(s)"),
            || async {
                let count = self.driver.count(locator).await?;
                if count >= min {
                    Ok(PollOutcome::Ready(()))
                } else {
                    Ok(PollOutcome::Pending(format!("{count} matches")))
                }
            },
        )
        .await
    }

    /// Single-shot text content query; `None` when nothing matches
    pub async fn text(&self, locator: &Locator) -> E2eResult<Option<String>> {
        self.driver.text_content(locator).await
    }

    /// Single-shot element count query
    pub async fn count(&self, locator: &Locator) -> E2eResult<usize> {
        self.driver.count(locator).await
    }
}
