use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read trips file {path}: {source}")]
    TripsFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse trips file: {0}")]
    TripsFileParse(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unrecognised date \"{input}\"; expected DD/MM/YYYY")]
pub struct DateParseError {
    pub input: String,
}

/// Reasons a trips-file entry cannot become a [`crate::TripRequest`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TripError {
    #[error("{field}: {source}")]
    Date {
        field: &'static str,
        #[source]
        source: DateParseError,
    },

    #[error("{field} \"{value}\" is not a 3-letter IATA code")]
    InvalidAirport { field: &'static str, value: String },

    #[error("origin and destination are both {0}")]
    SameAirport(String),

    #[error("departure {departure} is not before return {ret}")]
    DatesOutOfOrder { departure: String, ret: String },

    #[error("target price must be positive, got {0}")]
    NonPositivePrice(String),

    #[error("email address is empty")]
    MissingContact,
}
