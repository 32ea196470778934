use std::collections::HashMap;
use std::env::VarError;
use std::path::Path;

use super::*;

fn lookup_from_map<'a>(
    map: &'a HashMap<&'a str, &'a str>,
) -> impl Fn(&str) -> Result<String, VarError> + 'a {
    move |key| {
        map.get(key)
            .map(|v| (*v).to_string())
            .ok_or(VarError::NotPresent)
    }
}

#[test]
fn build_app_config_defaults_with_empty_env() {
    let map: HashMap<&str, &str> = HashMap::new();
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.trips_path, Path::new("./trips.json"));
    assert_eq!(cfg.output_dir, Path::new("."));
    assert_eq!(cfg.log_level, "info");
    assert!(cfg.headless);
    assert!(cfg.chrome_executable.is_none());
    assert_eq!(cfg.nav_timeout_secs, 60);
    assert_eq!(cfg.wait_timeout_secs, 50);
    assert_eq!(cfg.sort_settle_ms, 2000);
    assert_eq!(cfg.pacing_min_secs, 1);
    assert_eq!(cfg.pacing_max_secs, 3);
}

#[test]
fn build_app_config_reads_overrides() {
    let mut map = HashMap::new();
    map.insert("FAREWATCH_TRIPS_PATH", "/data/trips.json");
    map.insert("FAREWATCH_OUTPUT_DIR", "/data/out");
    map.insert("FAREWATCH_WAIT_TIMEOUT_SECS", "20");
    map.insert("FAREWATCH_SORT_SETTLE_MS", "500");
    map.insert("FAREWATCH_CHROME_EXECUTABLE", "/usr/bin/chromium");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.trips_path, Path::new("/data/trips.json"));
    assert_eq!(cfg.output_dir, Path::new("/data/out"));
    assert_eq!(cfg.wait_timeout().as_secs(), 20);
    assert_eq!(cfg.sort_settle().as_millis(), 500);
    assert_eq!(
        cfg.chrome_executable.as_deref(),
        Some(Path::new("/usr/bin/chromium"))
    );
}

#[test]
fn blank_chrome_executable_is_treated_as_unset() {
    let mut map = HashMap::new();
    map.insert("FAREWATCH_CHROME_EXECUTABLE", "  ");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert!(cfg.chrome_executable.is_none());
}

#[test]
fn headless_accepts_common_spellings() {
    for (raw, expected) in [("false", false), ("0", false), ("NO", false), ("Yes", true)] {
        let mut map = HashMap::new();
        map.insert("FAREWATCH_HEADLESS", raw);
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.headless, expected, "FAREWATCH_HEADLESS={raw}");
    }
}

#[test]
fn headless_rejects_unknown_value() {
    let mut map = HashMap::new();
    map.insert("FAREWATCH_HEADLESS", "sometimes");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "FAREWATCH_HEADLESS"),
        "expected InvalidEnvVar(FAREWATCH_HEADLESS), got: {result:?}"
    );
}

#[test]
fn wait_timeout_invalid() {
    let mut map = HashMap::new();
    map.insert("FAREWATCH_WAIT_TIMEOUT_SECS", "not-a-number");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "FAREWATCH_WAIT_TIMEOUT_SECS"),
        "expected InvalidEnvVar(FAREWATCH_WAIT_TIMEOUT_SECS), got: {result:?}"
    );
}

#[test]
fn nav_timeout_invalid() {
    let mut map = HashMap::new();
    map.insert("FAREWATCH_NAV_TIMEOUT_SECS", "-5");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "FAREWATCH_NAV_TIMEOUT_SECS"),
        "expected InvalidEnvVar(FAREWATCH_NAV_TIMEOUT_SECS), got: {result:?}"
    );
}

#[test]
fn pacing_max_below_min_is_rejected() {
    let mut map = HashMap::new();
    map.insert("FAREWATCH_PACING_MIN_SECS", "5");
    map.insert("FAREWATCH_PACING_MAX_SECS", "2");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "FAREWATCH_PACING_MAX_SECS"),
        "expected InvalidEnvVar(FAREWATCH_PACING_MAX_SECS), got: {result:?}"
    );
}

#[test]
fn pacing_equal_bounds_are_allowed() {
    let mut map = HashMap::new();
    map.insert("FAREWATCH_PACING_MIN_SECS", "0");
    map.insert("FAREWATCH_PACING_MAX_SECS", "0");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.pacing_min_secs, 0);
    assert_eq!(cfg.pacing_max_secs, 0);
}
