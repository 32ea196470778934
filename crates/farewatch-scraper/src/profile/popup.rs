//! Popup dismissal strategies.

use crate::error::SessionError;
use crate::session::{BrowserSession, ClickOutcome};

/// How a site's obstructive dialogs are cleared after the page loads.
///
/// Every strategy treats a missing dialog as the normal case and does
/// nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PopupDismissal {
    None,
    /// Click the first element matching `selector`, if any.
    CloseButton { selector: &'static str },
    /// Only when `trigger` is on the page, click a close button counted from
    /// the end of the `close` matches (1 = last). If the preferred button
    /// cannot be clicked, the fallback position is tried once.
    GuardedClose {
        trigger: &'static str,
        close: &'static str,
        preferred_from_end: usize,
        fallback_from_end: usize,
    },
}

impl PopupDismissal {
    /// Runs the strategy. Returns `true` when a dialog was clicked away.
    ///
    /// # Errors
    ///
    /// Only session-level failures are returned; absent or unclickable
    /// elements are reported as `Ok(false)`.
    pub async fn run<S: BrowserSession>(&self, session: &mut S) -> Result<bool, SessionError> {
        match *self {
            PopupDismissal::None => Ok(false),
            PopupDismissal::CloseButton { selector } => {
                Ok(session.click_nth(selector, 0).await? == ClickOutcome::Clicked)
            }
            PopupDismissal::GuardedClose {
                trigger,
                close,
                preferred_from_end,
                fallback_from_end,
            } => {
                if session.match_count(trigger).await? == 0 {
                    return Ok(false);
                }
                let buttons = session.match_count(close).await?;
                for from_end in [preferred_from_end, fallback_from_end] {
                    let Some(nth) = nth_from_end(buttons, from_end) else {
                        continue;
                    };
                    match session.click_nth(close, nth).await? {
                        ClickOutcome::Clicked => return Ok(true),
                        outcome => {
                            tracing::trace!(close, nth, ?outcome, "popup close button not clicked");
                        }
                    }
                }
                Ok(false)
            }
        }
    }
}

/// Zero-based index of the `from_end`-th element (1 = last) among `len`.
fn nth_from_end(len: usize, from_end: usize) -> Option<usize> {
    if from_end == 0 {
        return None;
    }
    len.checked_sub(from_end)
}
