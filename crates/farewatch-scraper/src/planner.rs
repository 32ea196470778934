//! Turns trip requests into page fetches and collects annotated fares.

use farewatch_core::{DatePair, TripEntry, TripRequest};

use crate::error::ScraperError;
use crate::extract::extract_fares;
use crate::fetch::PageFetcher;
use crate::pacing::Pacing;
use crate::profile::SiteProfile;
use crate::types::{AnnotatedFare, RunResultSet};

/// Search URLs for every expanded date pair of `trip`, in expansion order.
#[must_use]
pub fn plan_urls(profile: &SiteProfile, trip: &TripRequest) -> Vec<(DatePair, String)> {
    trip.date_pairs()
        .into_iter()
        .map(|pair| {
            let url = profile.url(trip.origin(), trip.destination(), pair);
            (pair, url)
        })
        .collect()
}

/// Runs every trip against one site, one page at a time.
#[derive(Debug, Clone, Copy)]
pub struct QueryPlanner<'p> {
    profile: &'p SiteProfile,
    pacing: Pacing,
}

impl<'p> QueryPlanner<'p> {
    #[must_use]
    pub fn new(profile: &'p SiteProfile, pacing: Pacing) -> Self {
        Self { profile, pacing }
    }

    /// Fetches and extracts every planned page for `trips`, in input order.
    ///
    /// Invalid trips, pages that fail to load, and pages that fail to parse
    /// are logged, counted in [`RunResultSet::stats`], and skipped.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Fetch`] as soon as a fetch reports that the
    /// browser session is gone; records collected so far are discarded.
    pub async fn run<F: PageFetcher>(
        &self,
        fetcher: &mut F,
        trips: &[TripEntry],
    ) -> Result<RunResultSet, ScraperError> {
        let site = self.profile.site;
        let mut results = RunResultSet::new(site);

        for (trip_index, entry) in trips.iter().enumerate() {
            let trip = match entry.validate() {
                Ok(trip) => trip,
                Err(e) => {
                    tracing::warn!(
                        %site,
                        trip_index,
                        owner = %entry.owner_name,
                        error = %e,
                        "skipping invalid trip"
                    );
                    results.stats.trips_skipped += 1;
                    continue;
                }
            };

            let pages = plan_urls(self.profile, &trip);
            tracing::info!(
                %site,
                trip_index,
                owner = trip.owner_name(),
                origin = trip.origin(),
                destination = trip.destination(),
                pages = pages.len(),
                "searching trip"
            );

            for (page_index, (dates, url)) in pages.into_iter().enumerate() {
                self.pacing.pause().await;
                results.stats.pages_attempted += 1;

                let document = match fetcher.fetch(&url, self.profile).await {
                    Ok(document) => document,
                    Err(e) if e.is_fatal() => {
                        tracing::error!(
                            %site,
                            trip_index,
                            page_index,
                            url = %url,
                            error = %e,
                            "browser session lost; aborting run"
                        );
                        return Err(e.into());
                    }
                    Err(e) => {
                        tracing::warn!(
                            %site,
                            trip_index,
                            page_index,
                            url = %url,
                            error = %e,
                            "page fetch failed; skipping"
                        );
                        results.stats.pages_failed += 1;
                        continue;
                    }
                };

                let fares = match extract_fares(&document.html, &self.profile.locators) {
                    Ok(fares) => fares,
                    Err(e) => {
                        tracing::warn!(
                            %site,
                            trip_index,
                            page_index,
                            url = %url,
                            error = %e,
                            "page extraction failed; skipping"
                        );
                        results.stats.pages_failed += 1;
                        continue;
                    }
                };

                tracing::debug!(
                    %site,
                    trip_index,
                    page_index,
                    url = %url,
                    ready = document.ready,
                    records = fares.len(),
                    "page scraped"
                );

                for (record_index, fare) in fares.into_iter().enumerate() {
                    let missing = fare.missing_fields();
                    if !missing.is_empty() {
                        tracing::debug!(
                            %site,
                            trip_index,
                            page_index,
                            record_index,
                            missing = ?missing,
                            "partial fare record"
                        );
                    }
                    results.records.push(AnnotatedFare::new(&trip, dates, fare));
                }
            }
        }

        Ok(results)
    }
}

#[cfg(test)]
#[path = "planner_test.rs"]
mod tests;
