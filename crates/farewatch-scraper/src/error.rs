use thiserror::Error;

/// Failure reported by a [`crate::session::BrowserSession`] operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// The browser or its protocol connection is gone; nothing further can
    /// be fetched with this session.
    #[error("browser session closed")]
    Closed,

    #[error("browser operation timed out")]
    Timeout,

    #[error("browser protocol error: {0}")]
    Protocol(String),
}

/// Failure while driving one page to a rendered snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("navigation to {url} failed: {source}")]
    Navigation {
        url: String,
        #[source]
        source: SessionError,
    },

    #[error("{step} on {url} failed: {source}")]
    Interaction {
        url: String,
        step: &'static str,
        #[source]
        source: SessionError,
    },

    #[error("could not capture rendered document for {url}: {source}")]
    Snapshot {
        url: String,
        #[source]
        source: SessionError,
    },
}

impl FetchError {
    /// `true` when the session is unusable and the run must stop.
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        let source = match self {
            Self::Navigation { source, .. }
            | Self::Interaction { source, .. }
            | Self::Snapshot { source, .. } => source,
        };
        matches!(source, SessionError::Closed)
    }
}

/// Failure parsing one rendered document. Always scoped to that document.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractError {
    #[error("invalid selector \"{selector}\": {reason}")]
    Selector { selector: String, reason: String },

    #[error("flight group {group} has no airline text")]
    MissingAirlines { group: usize },
}

#[derive(Debug, Error)]
pub enum ScraperError {
    #[error("failed to launch browser: {0}")]
    Launch(String),

    #[error(transparent)]
    Fetch(#[from] FetchError),
}
