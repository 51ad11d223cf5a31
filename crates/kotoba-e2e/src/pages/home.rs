//! Page object for the authenticated dashboard (`/home`).

use crate::driver::Driver;
use crate::locator::Locator;
use crate::page::Page;
use crate::result::E2eResult;
use crate::text::{extract_count, extract_level};

// The stat cards carry no stable attribute, so each card is located by its
// label text ascended two DOM levels to the enclosing card container. This
// couples the locator to the current markup structure; switch to
// Selector::TestId once the application exposes data-testid on the cards.
fn kanji_card() -> Locator {
    Locator::text("Канжи").ancestor(2)
}

fn words_card() -> Locator {
    Locator::text("Слова").ancestor(2)
}

fn level_card() -> Locator {
    Locator::text("Уровень").ancestor(2)
}

fn today_section() -> Locator {
    Locator::text("Сегодня")
}

fn today_card() -> Locator {
    Locator::text("Начните изучение японского языка")
}

/// The authenticated landing dashboard
#[derive(Debug)]
pub struct HomePage<'a, D> {
    page: &'a Page<D>,
    /// Kanji stat card
    pub kanji_card: Locator,
    /// Words stat card
    pub words_card: Locator,
    /// JLPT level stat card
    pub level_card: Locator,
    /// "Today" section header
    pub today_section: Locator,
    /// "Today" onboarding card
    pub today_card: Locator,
}

impl<'a, D: Driver> HomePage<'a, D> {
    /// Bind the page object to a browser page
    #[must_use]
    pub fn new(page: &'a Page<D>) -> Self {
        Self {
            page,
            kanji_card: kanji_card(),
            words_card: words_card(),
            level_card: level_card(),
            today_section: today_section(),
            today_card: today_card(),
        }
    }

    /// Assert the three stat cards and both "today" regions are rendered
    pub async fn expect_visible(&self) -> E2eResult<()> {
        self.page.expect_visible(&self.kanji_card).await?;
        self.page.expect_visible(&self.words_card).await?;
        self.page.expect_visible(&self.level_card).await?;
        self.page.expect_visible(&self.today_section).await?;
        self.page.expect_visible(&self.today_card).await
    }

    /// Kanji count shown on the stat card; `None` when the card carries no
    /// numeric text
    pub async fn kanji_count(&self) -> E2eResult<Option<String>> {
        let text = self.page.text(&self.kanji_card).await?;
        Ok(text.as_deref().and_then(extract_count))
    }

    /// Words count shown on the stat card; `None` when absent
    pub async fn words_count(&self) -> E2eResult<Option<String>> {
        let text = self.page.text(&self.words_card).await?;
        Ok(text.as_deref().and_then(extract_count))
    }

    /// JLPT level token (e.g. `"N5"`); `None` when absent
    pub async fn level(&self) -> E2eResult<Option<String>> {
        let text = self.page.text(&self.level_card).await?;
        Ok(text.as_deref().and_then(extract_level))
    }
}
