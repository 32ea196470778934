//! Browser stand-ins for integration tests: a [`FixtureSession`] that serves
//! static HTML and records clicks.

#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::path::PathBuf;

use farewatch_scraper::{BrowserSession, ClickOutcome, SessionError};
use scraper::{Html, Selector};

/// Reads `tests/fixtures/<name>`.
pub fn fixture(name: &str) -> String {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name);
    std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("failed to read fixture {}: {e}", path.display()))
}

/// What navigation does for URLs with no registered page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unknown {
    Fail,
    TimeOut,
}

/// Serves registered pages and answers selector queries against them.
///
/// Every click is logged in `attempts` as `(selector, nth)`; the ones that
/// land also go to `clicks`. Clicks never change the page.
pub struct FixtureSession {
    pages: HashMap<String, String>,
    current: String,
    unknown: Unknown,
    closed: bool,
    covered: HashSet<(String, usize)>,
    pub visited: Vec<String>,
    pub attempts: Vec<(String, usize)>,
    pub clicks: Vec<(String, usize)>,
}

impl FixtureSession {
    pub fn new() -> Self {
        Self {
            pages: HashMap::new(),
            current: String::from("<html><body></body></html>"),
            unknown: Unknown::Fail,
            closed: false,
            covered: HashSet::new(),
            visited: Vec::new(),
            attempts: Vec::new(),
            clicks: Vec::new(),
        }
    }

    pub fn with_page(mut self, url: &str, html: String) -> Self {
        self.pages.insert(url.to_owned(), html);
        self
    }

    pub fn on_unknown(mut self, unknown: Unknown) -> Self {
        self.unknown = unknown;
        self
    }

    /// Makes the `nth` match of `selector` report
    /// [`ClickOutcome::NotInteractable`], as an element hidden behind an
    /// overlay would.
    pub fn covered(mut self, selector: &str, nth: usize) -> Self {
        self.covered.insert((selector.to_owned(), nth));
        self
    }

    /// Simulates the browser process going away.
    pub fn close(&mut self) {
        self.closed = true;
    }

    fn check_open(&self) -> Result<(), SessionError> {
        if self.closed {
            Err(SessionError::Closed)
        } else {
            Ok(())
        }
    }

    fn count(&self, selector: &str) -> Result<usize, SessionError> {
        let selector =
            Selector::parse(selector).map_err(|e| SessionError::Protocol(e.to_string()))?;
        Ok(Html::parse_document(&self.current).select(&selector).count())
    }
}

impl BrowserSession for FixtureSession {
    async fn navigate(&mut self, url: &str) -> Result<(), SessionError> {
        self.check_open()?;
        self.visited.push(url.to_owned());
        if let Some(html) = self.pages.get(url) {
            self.current.clone_from(html);
            return Ok(());
        }
        match self.unknown {
            Unknown::Fail => Err(SessionError::Protocol(format!(
                "net::ERR_NAME_NOT_RESOLVED at {url}"
            ))),
            Unknown::TimeOut => {
                self.current = String::from("<html><body></body></html>");
                Err(SessionError::Timeout)
            }
        }
    }

    async fn match_count(&mut self, selector: &str) -> Result<usize, SessionError> {
        self.check_open()?;
        self.count(selector)
    }

    async fn click_nth(
        &mut self,
        selector: &str,
        nth: usize,
    ) -> Result<ClickOutcome, SessionError> {
        self.check_open()?;
        let target = (selector.to_owned(), nth);
        self.attempts.push(target.clone());
        if nth >= self.count(selector)? {
            Ok(ClickOutcome::NotFound)
        } else if self.covered.contains(&target) {
            Ok(ClickOutcome::NotInteractable)
        } else {
            self.clicks.push(target);
            Ok(ClickOutcome::Clicked)
        }
    }

    async fn content(&mut self) -> Result<String, SessionError> {
        self.check_open()?;
        Ok(self.current.clone())
    }
}
