//! Driving one results page to a stable, rendered snapshot.

use std::time::Duration;

use tokio::time::Instant;

use crate::error::{FetchError, SessionError};
use crate::profile::SiteProfile;
use crate::session::{BrowserSession, ClickOutcome};

/// A page's markup captured after loading, popup handling, and sorting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedDocument {
    pub url: String,
    pub html: String,
    /// Whether the profile's ready signal appeared before the wait expired.
    pub ready: bool,
}

/// Anything that can turn a URL into a [`RenderedDocument`] for a profile.
#[allow(async_fn_in_trait)]
pub trait PageFetcher {
    /// # Errors
    ///
    /// Returns [`FetchError`] when the page could not be loaded or captured.
    /// A slow page is not an error; its partial document is returned.
    async fn fetch(
        &mut self,
        url: &str,
        profile: &SiteProfile,
    ) -> Result<RenderedDocument, FetchError>;
}

/// Timing knobs for [`BrowserFetcher`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTimings {
    /// How long to wait for the ready selector before carrying on.
    pub wait_timeout: Duration,
    pub poll_interval: Duration,
    /// Pause after clicking the sort control so results can re-render.
    pub sort_settle: Duration,
}

impl Default for FetchTimings {
    fn default() -> Self {
        Self {
            wait_timeout: Duration::from_secs(50),
            poll_interval: Duration::from_millis(500),
            sort_settle: Duration::from_secs(2),
        }
    }
}

/// [`PageFetcher`] over an exclusively owned [`BrowserSession`].
pub struct BrowserFetcher<S> {
    session: S,
    timings: FetchTimings,
}

impl<S: BrowserSession> BrowserFetcher<S> {
    #[must_use]
    pub fn new(session: S, timings: FetchTimings) -> Self {
        Self { session, timings }
    }

    /// Gives the session back so the owner can release it.
    #[must_use]
    pub fn into_session(self) -> S {
        self.session
    }

    /// Polls for `selector` until it appears or the wait budget runs out.
    async fn wait_until_ready(&mut self, url: &str, selector: &str) -> Result<bool, FetchError> {
        let deadline = Instant::now() + self.timings.wait_timeout;
        loop {
            match self.session.match_count(selector).await {
                Ok(n) if n > 0 => return Ok(true),
                Ok(_) => {}
                Err(SessionError::Closed) => {
                    return Err(FetchError::Interaction {
                        url: url.to_owned(),
                        step: "wait for results",
                        source: SessionError::Closed,
                    })
                }
                Err(e) => tracing::trace!(url, error = %e, "ready probe failed"),
            }

            let now = Instant::now();
            if now >= deadline {
                tracing::warn!(
                    url,
                    timeout_secs = self.timings.wait_timeout.as_secs_f64(),
                    "timed out waiting for results; continuing with partial page"
                );
                return Ok(false);
            }
            tokio::time::sleep(self.timings.poll_interval.min(deadline - now)).await;
        }
    }

    async fn sort_cheapest(&mut self, url: &str, selector: &str) -> Result<(), FetchError> {
        match self.session.click_nth(selector, 0).await {
            Ok(ClickOutcome::Clicked) => {
                tracing::debug!(url, "sorted results by price");
                tokio::time::sleep(self.timings.sort_settle).await;
            }
            Ok(outcome) => tracing::trace!(url, ?outcome, "sort control not clicked"),
            Err(SessionError::Closed) => {
                return Err(FetchError::Interaction {
                    url: url.to_owned(),
                    step: "sort by price",
                    source: SessionError::Closed,
                })
            }
            Err(e) => tracing::debug!(url, error = %e, "sort control failed"),
        }
        Ok(())
    }
}

impl<S: BrowserSession> PageFetcher for BrowserFetcher<S> {
    async fn fetch(
        &mut self,
        url: &str,
        profile: &SiteProfile,
    ) -> Result<RenderedDocument, FetchError> {
        match self.session.navigate(url).await {
            Ok(()) => {}
            Err(SessionError::Timeout) => {
                tracing::warn!(
                    url,
                    "navigation did not settle in time; waiting for results anyway"
                );
            }
            Err(source) => {
                return Err(FetchError::Navigation {
                    url: url.to_owned(),
                    source,
                })
            }
        }

        let ready = self.wait_until_ready(url, profile.ready_selector).await?;

        match profile.popup.run(&mut self.session).await {
            Ok(true) => tracing::debug!(url, "dismissed popup"),
            Ok(false) => {}
            Err(SessionError::Closed) => {
                return Err(FetchError::Interaction {
                    url: url.to_owned(),
                    step: "dismiss popup",
                    source: SessionError::Closed,
                })
            }
            Err(e) => tracing::debug!(url, error = %e, "popup dismissal failed"),
        }

        if let Some(selector) = profile.sort_cheapest {
            self.sort_cheapest(url, selector).await?;
        }

        let html = self
            .session
            .content()
            .await
            .map_err(|source| FetchError::Snapshot {
                url: url.to_owned(),
                source,
            })?;

        Ok(RenderedDocument {
            url: url.to_owned(),
            html,
            ready,
        })
    }
}
