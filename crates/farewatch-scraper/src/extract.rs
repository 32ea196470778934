//! Fare extraction from a rendered results page.
//!
//! Extraction is pure: it sees only markup and the profile's locators, so
//! it runs the same against a live snapshot or a fixture file. Fields that
//! are missing from a flight group come back as `None`; only a group
//! without any airline text is treated as an unreadable document.

use scraper::{ElementRef, Html, Selector};

use crate::error::ExtractError;
use crate::parse_helpers::{clean_text, parse_price, strip_day_offset};
use crate::profile::{ExtractLocators, TextLocator};
use crate::types::{FareRecord, Leg};

/// Results beyond the first few are rarely the cheapest and are not scraped.
pub const MAX_FLIGHT_GROUPS: usize = 4;

/// Compiled form of [`ExtractLocators`].
struct Compiled {
    flight_group: Selector,
    airline: Selector,
    airline_attribute: Option<&'static str>,
    times: Selector,
    duration: Selector,
    airports: Selector,
    price: Selector,
}

impl Compiled {
    fn new(locators: &ExtractLocators) -> Result<Self, ExtractError> {
        let airline_attribute = match locators.airline {
            TextLocator::Text(_) => None,
            TextLocator::Attribute { attribute, .. } => Some(attribute),
        };
        Ok(Self {
            flight_group: compile(locators.flight_group)?,
            airline: compile(locators.airline.selector())?,
            airline_attribute,
            times: compile(locators.times)?,
            duration: compile(locators.duration)?,
            airports: compile(locators.airports)?,
            price: compile(locators.price)?,
        })
    }
}

fn compile(selector: &str) -> Result<Selector, ExtractError> {
    Selector::parse(selector).map_err(|e| ExtractError::Selector {
        selector: selector.to_owned(),
        reason: e.to_string(),
    })
}

fn element_text(el: ElementRef<'_>) -> String {
    el.text().collect()
}

/// Extracts up to [`MAX_FLIGHT_GROUPS`] fare records from `html`.
///
/// Prices are located over the whole document and paired with flight
/// groups by position; a group with no price at its position gets
/// `price: None`.
///
/// # Errors
///
/// Returns [`ExtractError::Selector`] if a locator is not valid CSS, or
/// [`ExtractError::MissingAirlines`] if a flight group carries no airline
/// text at all.
pub fn extract_fares(
    html: &str,
    locators: &ExtractLocators,
) -> Result<Vec<FareRecord>, ExtractError> {
    let compiled = Compiled::new(locators)?;
    let document = Html::parse_document(html);

    let mut records = document
        .select(&compiled.flight_group)
        .take(MAX_FLIGHT_GROUPS)
        .enumerate()
        .map(|(index, group)| extract_group(index, group, &compiled, locators))
        .collect::<Result<Vec<_>, _>>()?;

    let prices: Vec<_> = document
        .select(&compiled.price)
        .take(MAX_FLIGHT_GROUPS)
        .map(|el| parse_price(&element_text(el)))
        .collect();

    if prices.len() != records.len() {
        tracing::debug!(
            groups = records.len(),
            prices = prices.len(),
            "flight group and price counts differ; pairing by position"
        );
    }

    for (record, price) in records.iter_mut().zip(prices) {
        record.price = price;
    }

    Ok(records)
}

fn extract_group(
    index: usize,
    group: ElementRef<'_>,
    compiled: &Compiled,
    locators: &ExtractLocators,
) -> Result<FareRecord, ExtractError> {
    let airlines: Vec<String> = group
        .select(&compiled.airline)
        .filter_map(|el| match compiled.airline_attribute {
            Some(attribute) => el.value().attr(attribute).and_then(clean_text),
            None => clean_text(&element_text(el)),
        })
        .collect();
    if airlines.is_empty() {
        return Err(ExtractError::MissingAirlines { group: index });
    }
    let mut airlines = airlines.into_iter();

    let times: Vec<Option<String>> = group
        .select(&compiled.times)
        .map(|el| strip_day_offset(&element_text(el)))
        .collect();
    let durations: Vec<Option<String>> = group
        .select(&compiled.duration)
        .map(|el| clean_text(&element_text(el)))
        .collect();
    let airports: Vec<String> = group
        .select(&compiled.airports)
        .filter_map(|el| clean_text(&element_text(el)))
        .collect();

    let at = |values: &[Option<String>], i: usize| values.get(i).cloned().flatten();

    let destination_airport = locators
        .destination_airport
        .resolve(airports.len())
        .and_then(|i| airports.get(i).cloned());

    Ok(FareRecord {
        departing: Leg {
            airline: airlines.next(),
            takeoff: at(&times, 0),
            arrival: at(&times, 1),
            duration: at(&durations, 0),
        },
        returning: Leg {
            airline: airlines.next(),
            takeoff: at(&times, 2),
            arrival: at(&times, 3),
            duration: at(&durations, 1),
        },
        source_airport: airports.first().cloned(),
        destination_airport,
        price: None,
    })
}

#[cfg(test)]
#[path = "extract_test.rs"]
mod tests;
