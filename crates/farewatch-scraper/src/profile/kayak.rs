//! Kayak Malaysia.

use farewatch_core::DatePair;

use super::{AirportIndex, ExtractLocators, PopupDismissal, Site, SiteProfile, TextLocator};

const BASE_URL: &str = "https://www.kayak.com.my/flights";

pub static KAYAK: SiteProfile = SiteProfile {
    site: Site::Kayak,
    build_url,
    ready_selector: "div.Common-Results-ProgressBar.theme-dark.Hidden",
    // Sorting is requested in the URL itself.
    sort_cheapest: None,
    // The price-alert overlay shows an address input. Its close button is
    // the second to last `close` button, or the last one on some layouts.
    popup: PopupDismissal::GuardedClose {
        trigger: "input.Common-Widgets-Text-TextInput.driveByUserAddress",
        close: "button.Button-No-Standard-Style.close",
        preferred_from_end: 2,
        fallback_from_end: 1,
    },
    locators: ExtractLocators {
        flight_group: "div.mainInfo",
        airline: TextLocator::Text("div.section.times div.bottom"),
        times: "span.time-pair",
        duration: "div.section.duration div.top",
        airports: "div.section.duration div.bottom span:not(.sep)",
        destination_airport: AirportIndex::Midpoint,
        price: "div.multi-row.featured-provider span.price.option-text",
    },
};

/// Upper-case `ORIGIN-DEST` route segment, ISO dates, cheapest-first.
fn build_url(origin: &str, destination: &str, dates: DatePair) -> String {
    format!(
        "{BASE_URL}/{}-{}/{}/{}?sort=price_a",
        origin.to_ascii_uppercase(),
        destination.to_ascii_uppercase(),
        dates.departure().format("%Y-%m-%d"),
        dates.ret().format("%Y-%m-%d"),
    )
}
