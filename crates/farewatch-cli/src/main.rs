mod expand;
mod plan;
mod scrape;
mod sink;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use farewatch_scraper::{Site, UnknownSite};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "farewatch-cli")]
#[command(about = "Scrape flight fares for the trips in a trips file")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Search every trip on the chosen sites and write one CSV per site
    Scrape {
        /// `skyscanner`, `kayak`, or `all`
        #[arg(long, default_value = "all", value_parser = SiteArg::parse)]
        site: SiteArg,

        /// Trips file; defaults to FAREWATCH_TRIPS_PATH
        #[arg(long)]
        trips: Option<PathBuf>,

        /// Directory for the CSV output; defaults to FAREWATCH_OUTPUT_DIR
        #[arg(long)]
        output_dir: Option<PathBuf>,
    },
    /// Validate trips and print the search URLs without opening a browser
    Plan {
        #[arg(long, default_value = "all", value_parser = SiteArg::parse)]
        site: SiteArg,

        #[arg(long)]
        trips: Option<PathBuf>,
    },
    /// Print the date pairs searched around a departure and return date
    Expand {
        /// Departure date, day first (e.g. 10/10/2024)
        #[arg(long)]
        departure: String,

        /// Return date, day first
        #[arg(long = "return")]
        return_date: String,
    },
}

/// `--site` value: one site by name, or every supported site.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SiteArg {
    One(Site),
    All,
}

impl SiteArg {
    fn parse(s: &str) -> Result<Self, UnknownSite> {
        if s.trim().eq_ignore_ascii_case("all") {
            Ok(SiteArg::All)
        } else {
            s.parse().map(SiteArg::One)
        }
    }

    fn sites(self) -> Vec<Site> {
        match self {
            SiteArg::One(site) => vec![site],
            SiteArg::All => Site::ALL.to_vec(),
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Some(Commands::Scrape {
            site,
            trips,
            output_dir,
        }) => {
            let config = load_config()?;
            let trips = trips.unwrap_or_else(|| config.trips_path.clone());
            let output_dir = output_dir.unwrap_or_else(|| config.output_dir.clone());
            scrape::run_scrape(&config, &site.sites(), &trips, &output_dir).await?;
        }
        Some(Commands::Plan { site, trips }) => {
            let config = load_config()?;
            let trips = trips.unwrap_or_else(|| config.trips_path.clone());
            plan::run_plan(&site.sites(), &trips)?;
        }
        Some(Commands::Expand {
            departure,
            return_date,
        }) => expand::run_expand(&departure, &return_date)?,
        None => println!("farewatch-cli: try `farewatch-cli scrape --help`"),
    }

    Ok(())
}

/// Loads `.env` and `FAREWATCH_*` settings, then starts logging at the
/// configured level unless `RUST_LOG` is set.
fn load_config() -> anyhow::Result<farewatch_core::AppConfig> {
    let config = farewatch_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();
    Ok(config)
}
