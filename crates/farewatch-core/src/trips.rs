//! The trips file: who wants to fly where, when, and below what price.
//!
//! The file is a JSON object keyed by owner name, each holding an ordered
//! list of trip entries. Owner order is preserved as written.

use std::path::Path;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::dates::{expand_date_range, parse_day_first, DatePair};
use crate::{ConfigError, TripError};

/// One raw entry from the trips file, before validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripEntry {
    /// Map key the entry was listed under.
    #[serde(skip)]
    pub owner_name: String,
    #[serde(rename = "Origin")]
    pub origin: String,
    #[serde(rename = "Destination")]
    pub destination: String,
    #[serde(rename = "Dep_date")]
    pub dep_date: String,
    #[serde(rename = "Ret_date")]
    pub ret_date: String,
    #[serde(rename = "Target_price")]
    pub target_price: Decimal,
    #[serde(rename = "Email_address")]
    pub email_address: String,
}

/// A validated search request. Only obtainable through [`TripEntry::validate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TripRequest {
    owner_name: String,
    origin: String,
    destination: String,
    departure_date: NaiveDate,
    return_date: NaiveDate,
    target_price: Decimal,
    contact: String,
}

impl TripEntry {
    /// Checks the entry and converts it into a [`TripRequest`].
    ///
    /// Airport codes are upper-cased before validation, dates are read
    /// day-first.
    ///
    /// # Errors
    ///
    /// Returns the first [`TripError`] found: unparseable dates, a code that
    /// is not three ASCII letters, identical airports, a return date not after
    /// departure, a non-positive target price, or an empty contact.
    pub fn validate(&self) -> Result<TripRequest, TripError> {
        let origin = airport_code("Origin", &self.origin)?;
        let destination = airport_code("Destination", &self.destination)?;
        if origin == destination {
            return Err(TripError::SameAirport(origin));
        }

        let departure_date = parse_day_first(&self.dep_date).map_err(|source| TripError::Date {
            field: "Dep_date",
            source,
        })?;
        let return_date = parse_day_first(&self.ret_date).map_err(|source| TripError::Date {
            field: "Ret_date",
            source,
        })?;
        if departure_date >= return_date {
            return Err(TripError::DatesOutOfOrder {
                departure: departure_date.to_string(),
                ret: return_date.to_string(),
            });
        }

        if self.target_price <= Decimal::ZERO {
            return Err(TripError::NonPositivePrice(self.target_price.to_string()));
        }

        let contact = self.email_address.trim();
        if contact.is_empty() {
            return Err(TripError::MissingContact);
        }

        Ok(TripRequest {
            owner_name: self.owner_name.clone(),
            origin,
            destination,
            departure_date,
            return_date,
            target_price: self.target_price,
            contact: contact.to_owned(),
        })
    }
}

impl TripRequest {
    #[must_use]
    pub fn owner_name(&self) -> &str {
        &self.owner_name
    }

    #[must_use]
    pub fn origin(&self) -> &str {
        &self.origin
    }

    #[must_use]
    pub fn destination(&self) -> &str {
        &self.destination
    }

    #[must_use]
    pub fn departure_date(&self) -> NaiveDate {
        self.departure_date
    }

    #[must_use]
    pub fn return_date(&self) -> NaiveDate {
        self.return_date
    }

    #[must_use]
    pub fn target_price(&self) -> Decimal {
        self.target_price
    }

    /// Opaque alert-delivery identifier (an email address in practice).
    #[must_use]
    pub fn contact(&self) -> &str {
        &self.contact
    }

    /// The ±1 day search space around this request's nominal dates.
    #[must_use]
    pub fn date_pairs(&self) -> Vec<DatePair> {
        expand_date_range(self.departure_date, self.return_date)
    }
}

fn airport_code(field: &'static str, raw: &str) -> Result<String, TripError> {
    let code = raw.trim().to_ascii_uppercase();
    if code.len() == 3 && code.bytes().all(|b| b.is_ascii_uppercase()) {
        Ok(code)
    } else {
        Err(TripError::InvalidAirport {
            field,
            value: raw.to_owned(),
        })
    }
}

/// Parse trips JSON into a flat list of entries, in file order.
///
/// Entries come back unvalidated; see [`TripEntry::validate`].
///
/// # Errors
///
/// Returns [`ConfigError::TripsFileParse`] if the document is not an object
/// of entry lists or an entry is missing a field.
pub fn parse_trips(json: &str) -> Result<Vec<TripEntry>, ConfigError> {
    let owners: serde_json::Map<String, serde_json::Value> = serde_json::from_str(json)?;

    let mut entries = Vec::new();
    for (owner_name, value) in owners {
        let trips: Vec<TripEntry> = serde_json::from_value(value)?;
        entries.extend(trips.into_iter().map(|mut trip| {
            trip.owner_name.clone_from(&owner_name);
            trip
        }));
    }
    Ok(entries)
}

/// Load and parse the trips file at `path`.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read or parsed.
pub fn load_trips(path: &Path) -> Result<Vec<TripEntry>, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::TripsFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let entries = parse_trips(&content)?;
    tracing::debug!(path = %path.display(), entries = entries.len(), "loaded trips file");
    Ok(entries)
}

#[cfg(test)]
#[path = "trips_test.rs"]
mod tests;
