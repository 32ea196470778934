//! Fare records and the per-run result set.
//!
//! Every field scraped from a page is optional: markup drifts, and a value
//! that was not on the page is recorded as absent rather than guessed.

use farewatch_core::{DatePair, TripRequest};
use rust_decimal::Decimal;

use crate::profile::Site;

/// One leg (outbound or inbound) of a flight group as rendered by the site.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Leg {
    pub airline: Option<String>,
    pub takeoff: Option<String>,
    pub arrival: Option<String>,
    pub duration: Option<String>,
}

/// One extracted flight group.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FareRecord {
    pub departing: Leg,
    pub returning: Leg,
    /// Airport label as the site renders it; not necessarily an IATA code.
    pub source_airport: Option<String>,
    pub destination_airport: Option<String>,
    /// Currency-stripped price. `None` when no price lined up with this group.
    pub price: Option<Decimal>,
}

impl FareRecord {
    /// Output column names of the fields this record lacks.
    #[must_use]
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let checks: [(&'static str, bool); 11] = [
            ("Departing Airline", self.departing.airline.is_none()),
            ("Departing Time(Takeoff)", self.departing.takeoff.is_none()),
            ("Departing Time(Arrival)", self.departing.arrival.is_none()),
            ("Dep. Flight Duration", self.departing.duration.is_none()),
            ("Returning Airline", self.returning.airline.is_none()),
            ("Returning Time(Takeoff)", self.returning.takeoff.is_none()),
            ("Returning Time(Arrival)", self.returning.arrival.is_none()),
            ("Ret. Flight Duration", self.returning.duration.is_none()),
            ("Source Airport", self.source_airport.is_none()),
            ("Destination Airport", self.destination_airport.is_none()),
            ("Price(RM)", self.price.is_none()),
        ];
        checks
            .into_iter()
            .filter_map(|(name, missing)| missing.then_some(name))
            .collect()
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.missing_fields().is_empty()
    }
}

/// A [`FareRecord`] tagged with the request and date pair that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotatedFare {
    pub owner_name: String,
    pub origin: String,
    pub destination: String,
    pub dates: DatePair,
    pub fare: FareRecord,
    pub target_price: Decimal,
    pub contact: String,
}

impl AnnotatedFare {
    #[must_use]
    pub fn new(trip: &TripRequest, dates: DatePair, fare: FareRecord) -> Self {
        Self {
            owner_name: trip.owner_name().to_owned(),
            origin: trip.origin().to_owned(),
            destination: trip.destination().to_owned(),
            dates,
            fare,
            target_price: trip.target_price(),
            contact: trip.contact().to_owned(),
        }
    }

    /// `true` when the scraped price is known and at or under the target.
    #[must_use]
    pub fn meets_target(&self) -> bool {
        self.fare.price.is_some_and(|p| p <= self.target_price)
    }
}

/// Counters describing how a run went, beyond the records it produced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunStats {
    pub pages_attempted: usize,
    pub pages_failed: usize,
    pub trips_skipped: usize,
}

/// Everything one run collected for one site, in (trip, date pair, record)
/// order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunResultSet {
    pub site: Site,
    pub records: Vec<AnnotatedFare>,
    pub stats: RunStats,
}

impl RunResultSet {
    #[must_use]
    pub fn new(site: Site) -> Self {
        Self {
            site,
            records: Vec::new(),
            stats: RunStats::default(),
        }
    }

    /// Records priced at or below their trip's target.
    pub fn below_target(&self) -> impl Iterator<Item = &AnnotatedFare> {
        self.records.iter().filter(|r| r.meets_target())
    }
}
