//! Per-site scraping profiles.
//!
//! A [`SiteProfile`] is the only site-specific input to the engine: how to
//! build a search URL, which element signals that results have loaded, how
//! to clear popups, and where each fare field lives in the markup. Adding a
//! site means adding one submodule with one `static` profile and a [`Site`]
//! variant; fetching, extraction, and planning stay untouched.

mod kayak;
mod popup;
mod skyscanner;

use std::fmt;
use std::str::FromStr;

use farewatch_core::DatePair;

pub use kayak::KAYAK;
pub use popup::PopupDismissal;
pub use skyscanner::SKYSCANNER;

/// Supported fare-search sites.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Site {
    Skyscanner,
    Kayak,
}

impl Site {
    pub const ALL: [Site; 2] = [Site::Skyscanner, Site::Kayak];

    #[must_use]
    pub fn profile(self) -> &'static SiteProfile {
        match self {
            Site::Skyscanner => &SKYSCANNER,
            Site::Kayak => &KAYAK,
        }
    }
}

impl fmt::Display for Site {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Site::Skyscanner => write!(f, "Skyscanner"),
            Site::Kayak => write!(f, "Kayak"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown site \"{0}\"; expected one of: skyscanner, kayak")]
pub struct UnknownSite(pub String);

impl FromStr for Site {
    type Err = UnknownSite;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "skyscanner" => Ok(Site::Skyscanner),
            "kayak" => Ok(Site::Kayak),
            _ => Err(UnknownSite(s.to_owned())),
        }
    }
}

/// Where a text value comes from: an element's text, or one of its attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextLocator {
    Text(&'static str),
    Attribute {
        selector: &'static str,
        attribute: &'static str,
    },
}

impl TextLocator {
    #[must_use]
    pub fn selector(&self) -> &'static str {
        match self {
            TextLocator::Text(selector) | TextLocator::Attribute { selector, .. } => selector,
        }
    }
}

/// Which entry of a flight group's airport list names the destination.
///
/// The first entry is always the source. Sites that print each leg's
/// endpoints in order (`PEN SIN SIN PEN`) put the destination at the
/// midpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AirportIndex {
    Midpoint,
    Last,
}

impl AirportIndex {
    /// Index into a list of `len` airports, or `None` when the list is empty.
    #[must_use]
    pub fn resolve(self, len: usize) -> Option<usize> {
        if len == 0 {
            return None;
        }
        Some(match self {
            AirportIndex::Midpoint => len / 2,
            AirportIndex::Last => len - 1,
        })
    }
}

/// CSS locators for the fields of a fare record.
///
/// All but `flight_group` and `price` are matched inside each flight group;
/// `price` is matched over the whole document and paired with groups by
/// position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtractLocators {
    pub flight_group: &'static str,
    pub airline: TextLocator,
    pub times: &'static str,
    pub duration: &'static str,
    pub airports: &'static str,
    pub destination_airport: AirportIndex,
    pub price: &'static str,
}

/// Immutable description of one site.
#[derive(Debug, Clone, Copy)]
pub struct SiteProfile {
    pub site: Site,
    pub build_url: fn(origin: &str, destination: &str, dates: DatePair) -> String,
    /// Present once the results area has finished loading.
    pub ready_selector: &'static str,
    /// Clicked, when present, to order results cheapest-first.
    pub sort_cheapest: Option<&'static str>,
    pub popup: PopupDismissal,
    pub locators: ExtractLocators,
}

impl SiteProfile {
    #[must_use]
    pub fn url(&self, origin: &str, destination: &str, dates: DatePair) -> String {
        (self.build_url)(origin, destination, dates)
    }
}
