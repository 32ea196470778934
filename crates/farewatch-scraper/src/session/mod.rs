//! The seam between the scraping engine and a live browser.
//!
//! Everything above this trait works on selectors and HTML strings, so
//! fetching logic can be exercised against static fixtures while
//! [`ChromeSession`] drives a real Chromium over CDP.

mod chrome;

pub use chrome::{ChromeSession, LaunchOptions};

use crate::error::SessionError;

/// Result of trying to click an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    Clicked,
    /// No element at the requested position.
    NotFound,
    /// The element exists but could not receive the click (hidden,
    /// zero-sized, detached).
    NotInteractable,
}

/// A single, exclusively owned browser tab.
///
/// Sessions are not reentrant; callers hold `&mut` for every operation.
#[allow(async_fn_in_trait)]
pub trait BrowserSession {
    /// Load `url` in the tab. Implementations bound the wait and report
    /// [`SessionError::Timeout`] when the page did not finish loading.
    async fn navigate(&mut self, url: &str) -> Result<(), SessionError>;

    /// Number of elements currently matching a CSS selector; zero when absent.
    async fn match_count(&mut self, selector: &str) -> Result<usize, SessionError>;

    /// Click the `nth` (zero-based) element matching a CSS selector.
    async fn click_nth(&mut self, selector: &str, nth: usize)
        -> Result<ClickOutcome, SessionError>;

    /// Serialized markup of the current DOM.
    async fn content(&mut self) -> Result<String, SessionError>;
}
