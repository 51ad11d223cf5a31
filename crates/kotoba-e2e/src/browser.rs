//! Real browser control over the Chrome DevTools Protocol.
//!
//! Compiled only with the `browser` feature; the default build stays
//! browserless and unit-testable through [`crate::driver::MockDriver`].

use std::sync::Arc;

use chromiumoxide::browser::{Browser as CdpBrowser, BrowserConfig as CdpConfig};
use chromiumoxide::page::Page as CdpPage;
use futures::StreamExt;
use tokio::sync::Mutex;
use tracing::debug;

use crate::config::TestConfig;
use crate::driver::Driver;
use crate::locator::Locator;
use crate::result::{E2eError, E2eResult};

/// Browser launch configuration
#[derive(Debug, Clone)]
pub struct BrowserConfig {
    /// Run in headless mode
    pub headless: bool,
    /// Viewport width
    pub viewport_width: u32,
    /// Viewport height
    pub viewport_height: u32,
    /// Path to chromium binary (None = auto-detect)
    pub chromium_path: Option<String>,
    /// Sandbox mode (disable for containers)
    pub sandbox: bool,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            headless: true,
            viewport_width: 1280,
            viewport_height: 720,
            chromium_path: None,
            sandbox: true,
        }
    }
}

impl BrowserConfig {
    /// Derive a launch configuration from the environment-driven test config
    #[must_use]
    pub fn from_test_config(config: &TestConfig) -> Self {
        Self {
            headless: config.headless,
            chromium_path: config.chromium_path.clone(),
            ..Self::default()
        }
    }

    /// Set viewport dimensions
    #[must_use]
    pub const fn with_viewport(mut self, width: u32, height: u32) -> Self {
        self.viewport_width = width;
        self.viewport_height = height;
        self
    }

    /// Set headless mode
    #[must_use]
    pub const fn with_headless(mut self, headless: bool) -> Self {
        self.headless = headless;
        self
    }

    /// Set chromium path
    #[must_use]
    pub fn with_chromium_path(mut self, path: impl Into<String>) -> Self {
        self.chromium_path = Some(path.into());
        self
    }

    /// Disable sandbox (for containers/CI)
    #[must_use]
    pub const fn with_no_sandbox(mut self) -> Self {
        self.sandbox = false;
        self
    }
}

/// Configuration errors from a failed executable auto-detection get their
/// own variant so the scenario output names the remedy.
fn launch_error(message: String) -> E2eError {
    if message.contains("executable") || message.contains("binary") {
        E2eError::BrowserNotFound
    } else {
        E2eError::BrowserLaunch { message }
    }
}

/// A running browser instance
#[derive(Debug)]
pub struct Browser {
    inner: Arc<Mutex<CdpBrowser>>,
    #[allow(dead_code)]
    handle: tokio::task::JoinHandle<()>,
}

impl Browser {
    /// Launch a new browser instance
    pub async fn launch(config: BrowserConfig) -> E2eResult<Self> {
        let mut builder =
            CdpConfig::builder().window_size(config.viewport_width, config.viewport_height);

        if !config.headless {
            builder = builder.with_head();
        }

        if !config.sandbox {
            builder = builder.no_sandbox();
        }

        if let Some(ref path) = config.chromium_path {
            builder = builder.chrome_executable(path);
        }

        let cdp_config = builder.build().map_err(launch_error)?;

        let (browser, mut handler) = CdpBrowser::launch(cdp_config)
            .await
            .map_err(|e| launch_error(e.to_string()))?;

        // CDP event pump; the connection dies without it
        let handle = tokio::spawn(async move {
            while let Some(h) = handler.next().await {
                if h.is_err() {
                    break;
                }
            }
        });

        debug!("browser launched");
        Ok(Self {
            inner: Arc::new(Mutex::new(browser)),
            handle,
        })
    }

    /// Open a new page and return a driver bound to it
    pub async fn new_page(&self) -> E2eResult<CdpDriver> {
        let browser = self.inner.lock().await;
        let page = browser
            .new_page("about:blank")
            .await
            .map_err(|e| E2eError::Page {
                message: e.to_string(),
            })?;
        Ok(CdpDriver {
            page: Arc::new(Mutex::new(page)),
        })
    }

    /// Close the browser
    pub async fn close(self) -> E2eResult<()> {
        let mut browser = self.inner.lock().await;
        browser.close().await.map_err(|e| E2eError::BrowserLaunch {
            message: e.to_string(),
        })?;
        Ok(())
    }
}

/// [`Driver`] implementation evaluating locator-generated JavaScript over CDP
#[derive(Debug, Clone)]
pub struct CdpDriver {
    page: Arc<Mutex<CdpPage>>,
}

impl CdpDriver {
    async fn eval<T: serde::de::DeserializeOwned>(&self, expr: String) -> E2eResult<T> {
        let page = self.page.lock().await;
        let result = page.evaluate(expr).await.map_err(|e| E2eError::Eval {
            message: e.to_string(),
        })?;
        result.into_value().map_err(|e| E2eError::Eval {
            message: e.to_string(),
        })
    }
}

#[async_trait::async_trait]
impl Driver for CdpDriver {
    async fn goto(&self, url: &str) -> E2eResult<()> {
        let page = self.page.lock().await;
        page.goto(url).await.map_err(|e| E2eError::Navigation {
            url: url.to_string(),
            message: e.to_string(),
        })?;
        Ok(())
    }

    async fn current_url(&self) -> E2eResult<String> {
        let page = self.page.lock().await;
        let url = page.url().await.map_err(|e| E2eError::Page {
            message: e.to_string(),
        })?;
        Ok(url.unwrap_or_else(|| "about:blank".to_string()))
    }

    async fn click(&self, locator: &Locator) -> E2eResult<bool> {
        self.eval(locator.js_click()).await
    }

    async fn fill(&self, locator: &Locator, text: &str) -> E2eResult<bool> {
        self.eval(locator.js_fill(text)).await
    }

    async fn press(&self, locator: &Locator, key: &str) -> E2eResult<bool> {
        self.eval(locator.js_press(key)).await
    }

    async fn text_content(&self, locator: &Locator) -> E2eResult<Option<String>> {
        self.eval(locator.js_text()).await
    }

    async fn input_value(&self, locator: &Locator) -> E2eResult<Option<String>> {
        self.eval(locator.js_value()).await
    }

    async fn is_visible(&self, locator: &Locator) -> E2eResult<bool> {
        self.eval(locator.js_visible()).await
    }

    async fn is_checked(&self, locator: &Locator) -> E2eResult<Option<bool>> {
        self.eval(locator.js_checked()).await
    }

    async fn class_name(&self, locator: &Locator) -> E2eResult<Option<String>> {
        self.eval(locator.js_class()).await
    }

    async fn count(&self, locator: &Locator) -> E2eResult<usize> {
        let count: u64 = self.eval(locator.js_count()).await?;
        Ok(count as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_executable_maps_to_browser_not_found() {
        let err = launch_error("Could not auto detect a chrome executable".to_string());
        assert!(matches!(err, E2eError::BrowserNotFound));
    }

    #[test]
    fn other_config_failures_stay_launch_errors() {
        let err = launch_error("invalid window size".to_string());
        match err {
            E2eError::BrowserLaunch { message } => assert!(message.contains("window size")),
            other => panic!("expected launch error, got {other:?}"),
        }
    }
}
