//! [`BrowserSession`] backed by a local Chromium driven through `chromiumoxide`.

use std::future::Future;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use chromiumoxide::error::CdpError;
use chromiumoxide::{Browser, BrowserConfig, Handler, Page};
use futures::StreamExt;

use super::{BrowserSession, ClickOutcome};
use crate::error::{ScraperError, SessionError};

/// How to start the browser.
#[derive(Debug, Clone)]
pub struct LaunchOptions {
    pub headless: bool,
    /// Explicit Chrome/Chromium binary; auto-detected when `None`.
    pub executable: Option<PathBuf>,
    /// Upper bound on a single navigation.
    pub nav_timeout: Duration,
}

impl Default for LaunchOptions {
    fn default() -> Self {
        Self {
            headless: true,
            executable: None,
            nav_timeout: Duration::from_secs(60),
        }
    }
}

/// One Chromium process with one working tab.
///
/// Release it with [`ChromeSession::close`]; taking `self` by value means a
/// session cannot be closed twice.
pub struct ChromeSession {
    browser: Browser,
    page: Page,
    handler_task: tokio::task::JoinHandle<()>,
    closed: Arc<AtomicBool>,
    nav_timeout: Duration,
}

impl ChromeSession {
    /// Starts the browser and opens a blank tab.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Launch`] if the configuration is rejected, the
    /// binary cannot be started, or the first tab cannot be opened.
    pub async fn launch(options: &LaunchOptions) -> Result<Self, ScraperError> {
        let mut builder = BrowserConfig::builder().request_timeout(options.nav_timeout);
        if !options.headless {
            builder = builder.with_head();
        }
        if let Some(executable) = &options.executable {
            builder = builder.chrome_executable(executable);
        }
        let config = builder.build().map_err(ScraperError::Launch)?;

        let (browser, handler) = Browser::launch(config)
            .await
            .map_err(|e| ScraperError::Launch(e.to_string()))?;

        let closed = Arc::new(AtomicBool::new(false));
        let handler_task = spawn_handler_task(handler, Arc::clone(&closed));

        let page = match browser.new_page("about:blank").await {
            Ok(page) => page,
            Err(e) => {
                handler_task.abort();
                return Err(ScraperError::Launch(format!("could not open tab: {e}")));
            }
        };

        tracing::debug!(headless = options.headless, "browser session started");
        Ok(Self {
            browser,
            page,
            handler_task,
            closed,
            nav_timeout: options.nav_timeout,
        })
    }

    /// Shuts the browser down and waits for the process to exit.
    ///
    /// The wait is bounded by the navigation timeout; a process still alive
    /// after that is killed.
    pub async fn close(mut self) {
        if let Err(e) = self.browser.close().await {
            tracing::debug!(error = %e, "browser close request failed");
        }
        match wait_for_exit(self.nav_timeout, self.browser.wait()).await {
            Some(Ok(_)) => {}
            Some(Err(e)) => tracing::debug!(error = %e, "waiting for browser exit failed"),
            None => {
                tracing::debug!(
                    timeout_secs = self.nav_timeout.as_secs(),
                    "browser did not exit in time; killing it"
                );
                if let Some(Err(e)) = self.browser.kill().await {
                    tracing::debug!(error = %e, "killing browser process failed");
                }
            }
        }
        self.handler_task.abort();
        tracing::debug!("browser session closed");
    }

    fn map_err(&self, err: &CdpError) -> SessionError {
        classify(err, self.closed.load(Ordering::SeqCst))
    }
}

/// Awaits `exit` for at most `limit`; `None` means the process outlived it.
async fn wait_for_exit<F: Future>(limit: Duration, exit: F) -> Option<F::Output> {
    tokio::time::timeout(limit, exit).await.ok()
}

/// Maps a CDP failure onto the session seam. A finished handler task wins
/// over whatever the failed call reported.
fn classify(err: &CdpError, closed: bool) -> SessionError {
    if closed {
        return SessionError::Closed;
    }
    match err {
        CdpError::Timeout => SessionError::Timeout,
        other => SessionError::Protocol(other.to_string()),
    }
}

impl BrowserSession for ChromeSession {
    async fn navigate(&mut self, url: &str) -> Result<(), SessionError> {
        match tokio::time::timeout(self.nav_timeout, self.page.goto(url)).await {
            Ok(Ok(_)) => Ok(()),
            Ok(Err(e)) => Err(self.map_err(&e)),
            Err(_) => Err(SessionError::Timeout),
        }
    }

    async fn match_count(&mut self, selector: &str) -> Result<usize, SessionError> {
        match self.page.find_elements(selector).await {
            Ok(elements) => Ok(elements.len()),
            Err(e) => match self.map_err(&e) {
                SessionError::Closed => Err(SessionError::Closed),
                // CDP reports "no node found" as an error rather than an empty list.
                _ => Ok(0),
            },
        }
    }

    async fn click_nth(
        &mut self,
        selector: &str,
        nth: usize,
    ) -> Result<ClickOutcome, SessionError> {
        let elements = match self.page.find_elements(selector).await {
            Ok(elements) => elements,
            Err(e) => {
                return match self.map_err(&e) {
                    SessionError::Closed => Err(SessionError::Closed),
                    _ => Ok(ClickOutcome::NotFound),
                }
            }
        };
        let Some(element) = elements.get(nth) else {
            return Ok(ClickOutcome::NotFound);
        };
        match element.click().await {
            Ok(_) => Ok(ClickOutcome::Clicked),
            Err(e) => match self.map_err(&e) {
                SessionError::Closed => Err(SessionError::Closed),
                _ => Ok(ClickOutcome::NotInteractable),
            },
        }
    }

    async fn content(&mut self) -> Result<String, SessionError> {
        self.page.content().await.map_err(|e| self.map_err(&e))
    }
}

/// Drives the CDP event loop until the connection ends, then flags the
/// session as closed.
fn spawn_handler_task(
    mut handler: Handler,
    closed: Arc<AtomicBool>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(event) = handler.next().await {
            if let Err(e) = event {
                tracing::trace!(error = %e, "chromiumoxide handler event error");
            }
        }
        closed.store(true, Ordering::SeqCst);
    })
}
