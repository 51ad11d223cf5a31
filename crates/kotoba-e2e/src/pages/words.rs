//! Page object for the vocabulary list screen (`/words`).

use crate::driver::Driver;
use crate::locator::Locator;
use crate::page::Page;
use crate::result::E2eResult;
use crate::text::extract_filter_count;

/// Class carried by the active filter control
const ACTIVE_FILTER_CLASS: &str = "tag-filled";

/// The five vocabulary status filters, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WordFilter {
    /// Every word regardless of status
    All,
    /// Words not yet started
    New,
    /// Words the user struggles with
    Hard,
    /// Words currently being learned
    InProgress,
    /// Words marked as learned
    Learned,
}

impl WordFilter {
    /// All filters, in display order
    pub const ALL: [Self; 5] = [
        Self::All,
        Self::New,
        Self::Hard,
        Self::InProgress,
        Self::Learned,
    ];

    /// Visible label of the filter control.
    ///
    /// The rendered control also carries a count suffix, e.g. `"Все (25)"`,
    /// which the locator tolerates through substring name matching.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::All => "Все",
            Self::New => "Новые",
            Self::Hard => "Сложные",
            Self::InProgress => "В процессе",
            Self::Learned => "Изученные",
        }
    }

    /// Locator for the filter control
    #[must_use]
    pub fn locator(self) -> Locator {
        Locator::role("button", self.label())
    }
}

fn heading() -> Locator {
    Locator::role("heading", "Слова")
}

fn search_input() -> Locator {
    Locator::placeholder("Поиск...")
}

fn add_button() -> Locator {
    Locator::role("button", "+")
}

fn back_button() -> Locator {
    Locator::role("button", "Назад")
}

fn cards() -> Locator {
    Locator::css(".card")
}

fn empty_message() -> Locator {
    Locator::text("Слов не найдено")
}

/// The vocabulary list screen
#[derive(Debug)]
pub struct WordsPage<'a, D> {
    page: &'a Page<D>,
    /// Screen heading
    pub heading: Locator,
    /// Search field
    pub search_input: Locator,
    /// Add-word control
    pub add_button: Locator,
    /// Back-navigation control
    pub back_button: Locator,
    /// All word cards in the list
    pub cards: Locator,
    /// Empty-state message shown when no word matches
    pub empty_message: Locator,
}

impl<'a, D: Driver> WordsPage<'a, D> {
    /// Bind the page object to a browser page
    #[must_use]
    pub fn new(page: &'a Page<D>) -> Self {
        Self {
            page,
            heading: heading(),
            search_input: search_input(),
            add_button: add_button(),
            back_button: back_button(),
            cards: cards(),
            empty_message: empty_message(),
        }
    }

    /// Navigate to the vocabulary route
    pub async fn goto(&self) -> E2eResult<()> {
        self.page.goto("/words").await
    }

    /// Assert the screen chrome is rendered
    pub async fn expect_visible(&self) -> E2eResult<()> {
        self.page.expect_visible(&self.heading).await?;
        self.page.expect_visible(&self.search_input).await?;
        self.page.expect_visible(&self.add_button).await
    }

    /// Assert all five status filters are rendered
    pub async fn expect_filters_visible(&self) -> E2eResult<()> {
        for filter in WordFilter::ALL {
            self.page.expect_visible(&filter.locator()).await?;
        }
        Ok(())
    }

    /// Type a query into the search field
    pub async fn search(&self, query: &str) -> E2eResult<()> {
        self.page.fill(&self.search_input, query).await
    }

    /// Clear the search field
    pub async fn clear_search(&self) -> E2eResult<()> {
        self.page.fill(&self.search_input, "").await
    }

    /// Activate a status filter
    pub async fn click_filter(&self, filter: WordFilter) -> E2eResult<()> {
        self.page.click(&filter.locator()).await
    }

    /// Assert the filter is in its active (filled) state
    pub async fn expect_filter_active(&self, filter: WordFilter) -> E2eResult<()> {
        self.page
            .expect_class_contains(&filter.locator(), ACTIVE_FILTER_CLASS)
            .await
    }

    /// Assert the filter is in its inactive state
    pub async fn expect_filter_inactive(&self, filter: WordFilter) -> E2eResult<()> {
        self.page
            .expect_class_missing(&filter.locator(), ACTIVE_FILTER_CLASS)
            .await
    }

    /// Assert `active` is the only filter in its active state
    pub async fn expect_only_filter_active(&self, active: WordFilter) -> E2eResult<()> {
        for filter in WordFilter::ALL {
            if filter == active {
                self.expect_filter_active(filter).await?;
            } else {
                self.expect_filter_inactive(filter).await?;
            }
        }
        Ok(())
    }

    /// Number of word cards currently in the list
    pub async fn cards_count(&self) -> E2eResult<usize> {
        self.page.count(&self.cards).await
    }

    /// Whether at least one word card is in the list
    pub async fn has_cards(&self) -> E2eResult<bool> {
        Ok(self.cards_count().await? > 0)
    }

    /// Assert the empty-state message is shown
    pub async fn expect_empty_state(&self) -> E2eResult<()> {
        self.page.expect_visible(&self.empty_message).await
    }

    /// Assert at least one word card is in the list.
    ///
    /// Cardinality-based, not message-based: a list with zero cards fails
    /// this even when the empty-state message is also missing.
    pub async fn expect_not_empty(&self) -> E2eResult<()> {
        self.page.expect_count_at_least(&self.cards, 1).await
    }

    /// Locator for the card containing `text`
    #[must_use]
    pub fn card(&self, text: &str) -> Locator {
        self.cards.clone().with_text(text)
    }

    /// Assert a card containing `text` is shown
    pub async fn expect_card_visible(&self, text: &str) -> E2eResult<()> {
        self.page.expect_visible(&self.card(text)).await
    }

    /// Assert no card containing `text` is shown
    pub async fn expect_card_hidden(&self, text: &str) -> E2eResult<()> {
        self.page.expect_hidden(&self.card(text)).await
    }

    /// Count suffix of a filter control, e.g. 25 from `"Все (25)"`.
    ///
    /// `None` when the control is missing or carries no count suffix,
    /// distinct from a present `(0)`.
    pub async fn filter_count(&self, filter: WordFilter) -> E2eResult<Option<u32>> {
        let text = self.page.text(&filter.locator()).await?;
        Ok(text.as_deref().and_then(extract_filter_count))
    }

    /// Navigate back to the dashboard
    pub async fn go_back(&self) -> E2eResult<()> {
        self.page.click(&self.back_button).await?;
        self.page.wait_for_path("/home").await
    }

    /// Activate the add-word control
    pub async fn click_add(&self) -> E2eResult<()> {
        self.page.click(&self.add_button).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::{MockDriver, MockNode};
    use crate::wait::WaitOptions;

    fn fast_page(driver: MockDriver) -> Page<MockDriver> {
        Page::new(driver, "http://localhost:5173")
            .with_wait(WaitOptions::new().with_timeout(500).with_poll_interval(10))
    }

    fn seed_chrome(driver: &MockDriver) {
        driver.set_node(&heading(), MockNode::with_text("Слова"));
        driver.set_node(&search_input(), MockNode::visible());
        driver.set_node(&add_button(), MockNode::with_text("+"));
        for filter in WordFilter::ALL {
            driver.set_node(&filter.locator(), MockNode::with_text(filter.label()));
        }
    }

    #[tokio::test(start_paused = true)]
    async fn screen_and_filters_render() {
        let driver = MockDriver::new();
        seed_chrome(&driver);
        let page = fast_page(driver);
        let words = WordsPage::new(&page);

        words.expect_visible().await.unwrap();
        words.expect_filters_visible().await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn search_fills_and_clears_the_field() {
        let driver = MockDriver::new();
        seed_chrome(&driver);
        let page = fast_page(driver);
        let words = WordsPage::new(&page);

        words.search("猫").await.unwrap();
        assert!(page
            .driver()
            .was_called("fill placeholder(\"Поиск...\") = \"猫\""));
        words.clear_search().await.unwrap();
        assert!(page
            .driver()
            .was_called("fill placeholder(\"Поиск...\") = \"\""));
    }

    #[tokio::test(start_paused = true)]
    async fn only_one_filter_active_at_a_time() {
        let driver = MockDriver::new();
        seed_chrome(&driver);
        driver.set_node(
            &WordFilter::Hard.locator(),
            MockNode::with_text("Сложные (3)").class("tag tag-filled"),
        );
        let page = fast_page(driver);
        let words = WordsPage::new(&page);

        words.expect_only_filter_active(WordFilter::Hard).await.unwrap();
        assert!(words
            .expect_only_filter_active(WordFilter::All)
            .await
            .unwrap_err()
            .is_timeout());
    }

    #[tokio::test(start_paused = true)]
    async fn filter_count_distinguishes_zero_from_absent() {
        let driver = MockDriver::new();
        seed_chrome(&driver);
        driver.set_node(
            &WordFilter::New.locator(),
            MockNode::with_text("Новые (0)"),
        );
        let page = fast_page(driver);
        let words = WordsPage::new(&page);

        assert_eq!(words.filter_count(WordFilter::New).await.unwrap(), Some(0));
        assert_eq!(words.filter_count(WordFilter::All).await.unwrap(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn not_empty_requires_cards_not_just_a_missing_message() {
        let driver = MockDriver::new();
        seed_chrome(&driver);
        // no .card nodes and no empty-state message
        let page = fast_page(driver);
        let words = WordsPage::new(&page);

        assert!(words.expect_not_empty().await.unwrap_err().is_timeout());

        page.driver()
            .set_node(&cards(), MockNode::visible().count(12));
        words.expect_not_empty().await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn empty_state_and_cards_are_mutually_exclusive() {
        let driver = MockDriver::new();
        seed_chrome(&driver);
        driver.set_node(&empty_message(), MockNode::with_text("Слов не найдено"));
        let page = fast_page(driver);
        let words = WordsPage::new(&page);

        words.expect_empty_state().await.unwrap();
        assert_eq!(words.cards_count().await.unwrap(), 0);
        assert!(!words.has_cards().await.unwrap());
    }

    #[tokio::test(start_paused = true)]
    async fn card_lookup_scopes_by_text() {
        let driver = MockDriver::new();
        seed_chrome(&driver);
        let page = fast_page(driver);
        let words = WordsPage::new(&page);
        page.driver()
            .set_node(&words.card("猫"), MockNode::with_text("猫 Кошка"));

        words.expect_card_visible("猫").await.unwrap();
        words.expect_card_hidden("犬").await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn go_back_requires_dashboard_route() {
        let driver = MockDriver::new();
        seed_chrome(&driver);
        driver.set_node(&back_button(), MockNode::with_text("Назад"));
        driver.navigate_on_click(&back_button(), "http://localhost:5173/home");
        driver.goto("http://localhost:5173/words").await.unwrap();
        let page = fast_page(driver);
        let words = WordsPage::new(&page);

        words.go_back().await.unwrap();
        assert!(page.driver().was_called("click role(button, \"Назад\")"));
    }
}
