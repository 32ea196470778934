use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub trips_path: PathBuf,
    pub output_dir: PathBuf,
    pub log_level: String,
    pub headless: bool,
    pub chrome_executable: Option<PathBuf>,
    pub nav_timeout_secs: u64,
    pub wait_timeout_secs: u64,
    pub sort_settle_ms: u64,
    pub pacing_min_secs: u64,
    pub pacing_max_secs: u64,
}

impl AppConfig {
    #[must_use]
    pub fn nav_timeout(&self) -> Duration {
        Duration::from_secs(self.nav_timeout_secs)
    }

    #[must_use]
    pub fn wait_timeout(&self) -> Duration {
        Duration::from_secs(self.wait_timeout_secs)
    }

    #[must_use]
    pub fn sort_settle(&self) -> Duration {
        Duration::from_millis(self.sort_settle_ms)
    }
}
