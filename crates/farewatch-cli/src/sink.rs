//! CSV output for a site's run results.

use std::io::Write;
use std::path::{Path, PathBuf};

use farewatch_scraper::{AnnotatedFare, RunResultSet, Site};

pub(crate) const HEADER: [&str; 18] = [
    "Name",
    "Origin",
    "Destination",
    "Departing Date",
    "Departing Airline",
    "Departing Time(Takeoff)",
    "Departing Time(Arrival)",
    "Dep. Flight Duration",
    "Returning Date",
    "Returning Airline",
    "Returning Time(Takeoff)",
    "Returning Time(Arrival)",
    "Ret. Flight Duration",
    "Source Airport",
    "Destination Airport",
    "Price(RM)",
    "Target Price(RM)",
    "Email",
];

/// `{output_dir}/{Site}.csv`
pub(crate) fn csv_path(output_dir: &Path, site: Site) -> PathBuf {
    output_dir.join(format!("{site}.csv"))
}

fn opt(value: Option<&String>) -> String {
    value.cloned().unwrap_or_default()
}

fn row(record: &AnnotatedFare) -> [String; 18] {
    let fare = &record.fare;
    [
        record.owner_name.clone(),
        record.origin.clone(),
        record.destination.clone(),
        record.dates.departure().format("%Y-%m-%d").to_string(),
        opt(fare.departing.airline.as_ref()),
        opt(fare.departing.takeoff.as_ref()),
        opt(fare.departing.arrival.as_ref()),
        opt(fare.departing.duration.as_ref()),
        record.dates.ret().format("%Y-%m-%d").to_string(),
        opt(fare.returning.airline.as_ref()),
        opt(fare.returning.takeoff.as_ref()),
        opt(fare.returning.arrival.as_ref()),
        opt(fare.returning.duration.as_ref()),
        opt(fare.source_airport.as_ref()),
        opt(fare.destination_airport.as_ref()),
        fare.price.map(|p| p.to_string()).unwrap_or_default(),
        record.target_price.to_string(),
        record.contact.clone(),
    ]
}

/// Writes the header and one row per record to `writer`.
pub(crate) fn write_results<W: Write>(writer: W, results: &RunResultSet) -> anyhow::Result<()> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(HEADER)?;
    for record in &results.records {
        csv.write_record(row(record))?;
    }
    csv.flush()?;
    Ok(())
}

/// Writes `results` to `{output_dir}/{Site}.csv`, creating the directory if
/// needed, and returns the file path.
pub(crate) fn write_results_file(
    output_dir: &Path,
    results: &RunResultSet,
) -> anyhow::Result<PathBuf> {
    std::fs::create_dir_all(output_dir).map_err(|e| {
        anyhow::anyhow!("failed to create output dir {}: {e}", output_dir.display())
    })?;
    let path = csv_path(output_dir, results.site);
    let file = std::fs::File::create(&path)
        .map_err(|e| anyhow::anyhow!("failed to create {}: {e}", path.display()))?;
    write_results(file, results)?;
    tracing::debug!(path = %path.display(), rows = results.records.len(), "wrote results file");
    Ok(path)
}

#[cfg(test)]
#[path = "sink_test.rs"]
mod tests;
