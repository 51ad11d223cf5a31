//! Page object for the authentication screen (`/`).

use crate::driver::Driver;
use crate::locator::{Locator, Selector};
use crate::page::Page;
use crate::result::E2eResult;

fn username_input() -> Locator {
    Locator::placeholder("Введите имя")
}

fn login_button() -> Locator {
    Locator::role("button", "Войти")
}

fn error_message() -> Locator {
    Locator::new(Selector::text_pattern("Ошибка:|Введите имя пользователя"))
}

/// The authentication screen
#[derive(Debug)]
pub struct LoginPage<'a, D> {
    page: &'a Page<D>,
    /// Username input
    pub username_input: Locator,
    /// Submit control
    pub login_button: Locator,
    /// Error-message region; the pattern covers both message shapes the
    /// application renders ("Ошибка:"-prefixed and the empty-username hint)
    pub error_message: Locator,
}

impl<'a, D: Driver> LoginPage<'a, D> {
    /// Bind the page object to a browser page
    #[must_use]
    pub fn new(page: &'a Page<D>) -> Self {
        Self {
            page,
            username_input: username_input(),
            login_button: login_button(),
            error_message: error_message(),
        }
    }

    /// Navigate to the root route
    pub async fn goto(&self) -> E2eResult<()> {
        self.page.goto("/").await
    }

    /// Assert the login form is rendered
    pub async fn expect_visible(&self) -> E2eResult<()> {
        self.page.expect_visible(&self.username_input).await?;
        self.page.expect_visible(&self.login_button).await
    }

    /// Fill the username (any string, including empty) and submit.
    ///
    /// Pure pass-through: no client-side validation happens here.
    pub async fn login(&self, username: &str) -> E2eResult<()> {
        self.page.fill(&self.username_input, username).await?;
        self.page.click(&self.login_button).await
    }

    /// [`LoginPage::login`], then wait for the application to reach `/home`.
    ///
    /// A lapsed wait signals an authentication or navigation defect in the
    /// application under test.
    pub async fn login_and_navigate(&self, username: &str) -> E2eResult<()> {
        self.login(username).await?;
        self.page.wait_for_path("/home").await
    }

    /// Fill the username and submit with the Enter key
    pub async fn submit_with_enter(&self, username: &str) -> E2eResult<()> {
        self.page.fill(&self.username_input, username).await?;
        self.page.press(&self.username_input, "Enter").await
    }

    /// Assert the error region contains `message`
    pub async fn expect_error_message(&self, message: &str) -> E2eResult<()> {
        self.page
            .expect_text_contains(&self.error_message, message)
            .await
    }

    /// Assert no error message is shown
    pub async fn expect_no_error(&self) -> E2eResult<()> {
        self.page.expect_hidden(&self.error_message).await
    }
}
