//! The `plan` command: a dry run that prints search URLs.

use std::io::Write;
use std::path::Path;

use farewatch_core::TripEntry;
use farewatch_scraper::{plan_urls, Site};

/// Validate every trip in `trips_path` and print the URLs each site would
/// fetch, one per line.
///
/// # Errors
///
/// Returns an error if the trips file cannot be loaded or stdout cannot be
/// written. Invalid trips are reported and skipped.
pub(crate) fn run_plan(sites: &[Site], trips_path: &Path) -> anyhow::Result<()> {
    let trips = farewatch_core::load_trips(trips_path)?;
    let stdout = std::io::stdout();
    write_plan(&mut stdout.lock(), sites, &trips)
}

fn write_plan<W: Write>(
    out: &mut W,
    sites: &[Site],
    trips: &[TripEntry],
) -> anyhow::Result<()> {
    for (trip_index, entry) in trips.iter().enumerate() {
        let trip = match entry.validate() {
            Ok(trip) => trip,
            Err(e) => {
                tracing::warn!(
                    trip_index,
                    owner = %entry.owner_name,
                    error = %e,
                    "invalid trip"
                );
                writeln!(out, "# {} (trip {trip_index}): skipped: {e}", entry.owner_name)?;
                continue;
            }
        };

        writeln!(
            out,
            "# {} (trip {trip_index}): {} -> {}, target {}",
            trip.owner_name(),
            trip.origin(),
            trip.destination(),
            trip.target_price()
        )?;
        for &site in sites {
            for (dates, url) in plan_urls(site.profile(), &trip) {
                writeln!(out, "{site}\t{dates}\t{url}")?;
            }
        }
    }
    Ok(())
}
