//! Shared session setup for live scenarios.

#![cfg(feature = "browser")]

use kotoba_e2e::browser::{Browser, BrowserConfig, CdpDriver};
use kotoba_e2e::{init_tracing, E2eResult, LoginPage, Page, TestConfig};

/// One live browser session against the application under test
pub struct Session {
    browser: Browser,
    /// Page handle shared by the scenario's page objects
    pub page: Page<CdpDriver>,
}

impl Session {
    /// Launch a browser and open a page on the configured application
    pub async fn launch() -> E2eResult<Self> {
        init_tracing();
        let config = TestConfig::from_env();
        let browser = Browser::launch(BrowserConfig::from_test_config(&config)).await?;
        let driver = browser.new_page().await?;
        let page = Page::new(driver, &config.base_url);
        Ok(Self { browser, page })
    }

    /// Launch a session and log in as `username`
    pub async fn authenticated(username: &str) -> E2eResult<Self> {
        let session = Self::launch().await?;
        let login = LoginPage::new(&session.page);
        login.goto().await?;
        login.login_and_navigate(username).await?;
        Ok(session)
    }

    /// Shut the browser down
    pub async fn close(self) -> E2eResult<()> {
        self.browser.close().await
    }
}
