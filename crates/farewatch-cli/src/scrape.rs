//! The `scrape` command: one browser session per site, one CSV per site.
//!
//! Sites run one after another. A site whose run fails (browser launch,
//! lost session) stops the command before any later site starts; files
//! already written for earlier sites are kept.

use std::path::Path;
use std::time::Duration;

use farewatch_core::{AppConfig, TripEntry};
use farewatch_scraper::{
    BrowserFetcher, ChromeSession, FetchTimings, LaunchOptions, Pacing, QueryPlanner,
    RunResultSet, Site,
};

use crate::sink;

fn launch_options(config: &AppConfig) -> LaunchOptions {
    LaunchOptions {
        headless: config.headless,
        executable: config.chrome_executable.clone(),
        nav_timeout: config.nav_timeout(),
    }
}

fn fetch_timings(config: &AppConfig) -> FetchTimings {
    FetchTimings {
        wait_timeout: config.wait_timeout(),
        sort_settle: config.sort_settle(),
        ..FetchTimings::default()
    }
}

fn pacing(config: &AppConfig) -> Pacing {
    Pacing::new(
        Duration::from_secs(config.pacing_min_secs),
        Duration::from_secs(config.pacing_max_secs),
    )
}

/// Scrape `trips_path` on each of `sites` and write `{output_dir}/{Site}.csv`.
///
/// # Errors
///
/// Returns an error if the trips file cannot be loaded, a browser cannot be
/// launched, a session is lost mid-run, or a results file cannot be written.
pub(crate) async fn run_scrape(
    config: &AppConfig,
    sites: &[Site],
    trips_path: &Path,
    output_dir: &Path,
) -> anyhow::Result<()> {
    let trips = farewatch_core::load_trips(trips_path)?;
    if trips.is_empty() {
        tracing::warn!(
            path = %trips_path.display(),
            "trips file has no entries; nothing to scrape"
        );
        return Ok(());
    }

    for &site in sites {
        tracing::info!(%site, trips = trips.len(), "starting site run");
        let results = scrape_site(config, site, &trips).await?;
        let path = sink::write_results_file(output_dir, &results)?;

        report_below_target(&results);
        tracing::info!(
            %site,
            records = results.records.len(),
            pages_attempted = results.stats.pages_attempted,
            pages_failed = results.stats.pages_failed,
            trips_skipped = results.stats.trips_skipped,
            path = %path.display(),
            "site run complete"
        );
    }

    Ok(())
}

/// Runs every trip for one site inside a fresh browser session.
///
/// The session is closed before the planner's outcome is inspected, so it
/// is released on both the success and the error path.
async fn scrape_site(
    config: &AppConfig,
    site: Site,
    trips: &[TripEntry],
) -> anyhow::Result<RunResultSet> {
    let session = ChromeSession::launch(&launch_options(config))
        .await
        .map_err(|e| anyhow::anyhow!("{site}: {e}"))?;
    let mut fetcher = BrowserFetcher::new(session, fetch_timings(config));

    let outcome = QueryPlanner::new(site.profile(), pacing(config))
        .run(&mut fetcher, trips)
        .await;

    fetcher.into_session().close().await;
    outcome.map_err(|e| anyhow::anyhow!("{site} run aborted: {e}"))
}

/// Hands fares at or under their target to the alert log.
fn report_below_target(results: &RunResultSet) {
    for fare in results.below_target() {
        tracing::info!(
            site = %results.site,
            owner = %fare.owner_name,
            contact = %fare.contact,
            origin = %fare.origin,
            destination = %fare.destination,
            dates = %fare.dates,
            price = ?fare.fare.price,
            target_price = %fare.target_price,
            "fare at or below target"
        );
    }
}
