//! Page objects for the application's four screens.
//!
//! Each page object binds one screen's stable selectors and composite
//! actions into a reusable unit: a struct holding the screen's locators and
//! borrowing the shared [`crate::page::Page`]. Page objects are created per
//! scenario and hold no DOM state; every locator re-resolves on use.

mod home;
mod login;
mod profile;
mod words;

pub use home::HomePage;
pub use login::LoginPage;
pub use profile::{ProfilePage, SaveProbe};
pub use words::{WordFilter, WordsPage};
