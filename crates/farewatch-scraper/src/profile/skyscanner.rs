//! Skyscanner Malaysia.

use farewatch_core::DatePair;

use super::{AirportIndex, ExtractLocators, PopupDismissal, Site, SiteProfile, TextLocator};

const BASE_URL: &str = "https://www.skyscanner.com.my/transport/flights";

/// One adult, economy, return trip, indirect flights allowed.
const SEARCH_QUERY: &str = "?adults=1&children=0&adultsv2=1&childrenv2=&infants=0\
&cabinclass=economy&rtn=1&preferdirects=false&outboundaltsenabled=false\
&inboundaltsenabled=false&ref=home#results";

pub static SKYSCANNER: SiteProfile = SiteProfile {
    site: Site::Skyscanner,
    build_url,
    // The progress bar is hidden, not removed, once every provider answered.
    ready_selector: r#"div.day-list-progress[style="width: 100%; display: none;"]"#,
    sort_cheapest: Some(r#"td[class="tab"][data-tab="price"]"#),
    popup: PopupDismissal::CloseButton {
        selector: "button.bpk-modal__close-button-2a-Xb",
    },
    locators: ExtractLocators {
        flight_group: "div.ItineraryContent__container-1Sb_S",
        airline: TextLocator::Attribute {
            selector: "img.AirlineLogo__big-logo-image-3V2-Z",
            attribute: "title",
        },
        times: "span.LegInfo__times-Qn_ji",
        duration: "span.LegInfo__duration-2VgVw",
        airports: "span.LegInfo__tooltipTarget-njlsT",
        destination_airport: AirportIndex::Midpoint,
        price: "a.CTASection__price-2bc7h.price",
    },
};

/// Airport codes are lower-case path segments; dates are ISO.
fn build_url(origin: &str, destination: &str, dates: DatePair) -> String {
    format!(
        "{BASE_URL}/{}/{}/{}/{}/{SEARCH_QUERY}",
        origin.to_ascii_lowercase(),
        destination.to_ascii_lowercase(),
        dates.departure().format("%Y-%m-%d"),
        dates.ret().format("%Y-%m-%d"),
    )
}
