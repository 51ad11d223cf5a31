//! Kotoba E2E: browser scenario suite for the Kotoba vocabulary trainer.
//!
//! Drives the running web application through the Chrome DevTools Protocol
//! and asserts on what a user actually sees. The suite is built around three
//! layers:
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │  scenarios (tests/)      login, profile, vocabulary      │
//! ├──────────────────────────────────────────────────────────┤
//! │  page objects (pages::)  LoginPage, HomePage,            │
//! │                          ProfilePage, WordsPage          │
//! ├──────────────────────────────────────────────────────────┤
//! │  page + driver           Page<D>, Driver seam,           │
//! │                          Locator, polling waits          │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! The page layer is generic over the [`Driver`] seam: live scenarios run
//! against a Chromium session (the `browser` feature), page-object unit
//! tests run against [`MockDriver`] with a paused clock and no browser.
//!
//! # Example
//!
//! ```no_run
//! # #[cfg(feature = "browser")]
//! # async fn run() -> kotoba_e2e::E2eResult<()> {
//! use kotoba_e2e::{Browser, BrowserConfig, LoginPage, Page, TestConfig};
//!
//! let config = TestConfig::from_env();
//! let browser = Browser::launch(BrowserConfig::from_test_config(&config)).await?;
//! let page = Page::new(browser.new_page().await?, &config.base_url);
//! let login = LoginPage::new(&page);
//! login.goto().await?;
//! login.login_and_navigate("demo").await?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
// Lints are configured in workspace Cargo.toml [workspace.lints.clippy]

pub mod config;
pub mod driver;
pub mod locator;
pub mod page;
pub mod pages;
pub mod result;
pub mod text;
pub mod wait;

#[cfg(feature = "browser")]
pub mod browser;

pub use config::{init_tracing, TestConfig, DEFAULT_BASE_URL};
pub use driver::{Driver, MockDriver, MockNode};
pub use locator::{Locator, Selector};
pub use page::Page;
pub use pages::{HomePage, LoginPage, ProfilePage, SaveProbe, WordFilter, WordsPage};
pub use result::{E2eError, E2eResult};
pub use wait::{PollOutcome, WaitOptions};

#[cfg(feature = "browser")]
pub use browser::{Browser, BrowserConfig, CdpDriver};
