//! Shared domain types for farewatch: runtime configuration, the trips file,
//! and departure/return date handling.

pub mod app_config;
pub mod config;
pub mod dates;
pub mod error;
pub mod trips;

pub use app_config::AppConfig;
pub use config::{load_app_config, load_app_config_from_env};
pub use dates::{expand_date_range, parse_day_first, DatePair};
pub use error::{ConfigError, DateParseError, TripError};
pub use trips::{load_trips, parse_trips, TripEntry, TripRequest};
