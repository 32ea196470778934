use crate::app_config::AppConfig;
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Every variable has a default, so the only failure mode is a value that
/// does not parse.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.trim()
            .parse::<u64>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let trips_path = PathBuf::from(or_default("FAREWATCH_TRIPS_PATH", "./trips.json"));
    let output_dir = PathBuf::from(or_default("FAREWATCH_OUTPUT_DIR", "."));
    let log_level = or_default("FAREWATCH_LOG_LEVEL", "info");
    let headless = parse_bool("FAREWATCH_HEADLESS", &or_default("FAREWATCH_HEADLESS", "true"))?;
    let chrome_executable = lookup("FAREWATCH_CHROME_EXECUTABLE")
        .ok()
        .filter(|v| !v.trim().is_empty())
        .map(PathBuf::from);

    let nav_timeout_secs = parse_u64("FAREWATCH_NAV_TIMEOUT_SECS", "60")?;
    let wait_timeout_secs = parse_u64("FAREWATCH_WAIT_TIMEOUT_SECS", "50")?;
    let sort_settle_ms = parse_u64("FAREWATCH_SORT_SETTLE_MS", "2000")?;
    let pacing_min_secs = parse_u64("FAREWATCH_PACING_MIN_SECS", "1")?;
    let pacing_max_secs = parse_u64("FAREWATCH_PACING_MAX_SECS", "3")?;

    if pacing_max_secs < pacing_min_secs {
        return Err(ConfigError::InvalidEnvVar {
            var: "FAREWATCH_PACING_MAX_SECS".to_string(),
            reason: format!(
                "must be at least FAREWATCH_PACING_MIN_SECS ({pacing_min_secs}), got {pacing_max_secs}"
            ),
        });
    }

    Ok(AppConfig {
        trips_path,
        output_dir,
        log_level,
        headless,
        chrome_executable,
        nav_timeout_secs,
        wait_timeout_secs,
        sort_settle_ms,
        pacing_min_secs,
        pacing_max_secs,
    })
}

/// Parse a boolean flag. Accepts `true/false`, `1/0`, `yes/no` in any case.
fn parse_bool(var: &str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        other => Err(ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: format!("expected a boolean, got \"{other}\""),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
