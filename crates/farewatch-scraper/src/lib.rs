//! Browser-driven fare scraping for flight search sites.
//!
//! [`QueryPlanner`] expands each trip into search URLs for one
//! [`SiteProfile`], fetches every page through a [`PageFetcher`], and
//! extracts [`FareRecord`]s into a [`RunResultSet`].

pub mod error;
pub mod extract;
pub mod fetch;
pub mod pacing;
pub(crate) mod parse_helpers;
pub mod planner;
pub mod profile;
pub mod session;
pub mod types;

pub use error::{ExtractError, FetchError, ScraperError, SessionError};
pub use extract::{extract_fares, MAX_FLIGHT_GROUPS};
pub use fetch::{BrowserFetcher, FetchTimings, PageFetcher, RenderedDocument};
pub use pacing::Pacing;
pub use planner::{plan_urls, QueryPlanner};
pub use profile::{Site, SiteProfile, UnknownSite};
pub use session::{BrowserSession, ChromeSession, ClickOutcome, LaunchOptions};
pub use types::{AnnotatedFare, FareRecord, Leg, RunResultSet, RunStats};
