use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;

pub const DEFAULT_OVERPASS_URL: &str = "https://overpass-api.de/api/interpreter";

/// The highway types fetched and highlighted by default.
pub const DEFAULT_ROAD_TYPES: [&str; 8] = [
    "primary",
    "secondary",
    "tertiary",
    "residential",
    "trunk",
    "motorway",
    "unclassified",
    "service",
];

/// Knobs for fetching and filtering streets.
#[derive(Clone, Debug, PartialEq)]
pub struct RoadFilterConfig {
    /// Streets shorter than this many meters aren't highlighted.
    pub min_street_length: f64,
    /// Streets longer than this many meters aren't highlighted.
    pub max_street_length: f64,
    /// In degrees. A street is aligned if it or its reverse is at most this far from the azimuth.
    pub alignment_tolerance: f64,
    /// How long the viewport has to sit still before streets are filtered again.
    pub debounce_delay: Duration,
    /// OSM `highway` values to fetch and highlight.
    pub road_types: Vec<String>,
    pub overpass_url: String,
    /// How far around a city's center to fetch streets.
    pub search_radius_km: f64,
    /// Never draw more than this many streets at once.
    pub max_results: usize,
    /// Ways at most this many meters long are dropped while parsing Overpass results.
    pub min_way_length: f64,
    /// Cached streets older than this are fetched again.
    pub cache_ttl: Duration,
}

impl Default for RoadFilterConfig {
    fn default() -> RoadFilterConfig {
        RoadFilterConfig {
            min_street_length: 200.0,
            max_street_length: 10_000.0,
            alignment_tolerance: 0.5,
            debounce_delay: Duration::from_millis(300),
            road_types: DEFAULT_ROAD_TYPES.iter().map(|x| x.to_string()).collect(),
            overpass_url: DEFAULT_OVERPASS_URL.to_string(),
            search_radius_km: 25.0,
            max_results: 2000,
            min_way_length: 100.0,
            cache_ttl: Duration::from_secs(7 * 24 * 60 * 60),
        }
    }
}

/// What's written in a config file. Everything is optional.
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawRoadFilterConfig {
    min_street_length: Option<f64>,
    max_street_length: Option<f64>,
    alignment_tolerance: Option<f64>,
    debounce_delay_ms: Option<u64>,
    road_types: Option<Vec<String>>,
    overpass_url: Option<String>,
    search_radius_km: Option<f64>,
    max_results: Option<usize>,
    min_way_length: Option<f64>,
    cache_ttl_days: Option<u64>,
}

/// Reads a TOML config file. A missing file means the defaults; a file that exists but doesn't
/// parse is an error.
pub fn load_configuration<P: AsRef<Path>>(path: P) -> Result<RoadFilterConfig> {
    let path = path.as_ref();
    if !path.exists() {
        info!("No {}, using the default configuration", path.display());
        return Ok(RoadFilterConfig::default());
    }
    let text = fs_err::read_to_string(path)?;
    parse_configuration(&text).with_context(|| format!("parsing {}", path.display()))
}

pub fn parse_configuration(text: &str) -> Result<RoadFilterConfig> {
    let raw: RawRoadFilterConfig = toml::from_str(text)?;
    let config = fill_in_defaults(raw)?;
    if config.min_street_length > config.max_street_length {
        bail!(
            "min_street_length {} is more than max_street_length {}",
            config.min_street_length,
            config.max_street_length
        );
    }
    if config.alignment_tolerance < 0.0 {
        bail!("alignment_tolerance can't be negative");
    }
    Ok(config)
}

fn fill_in_defaults(raw: RawRoadFilterConfig) -> Result<RoadFilterConfig> {
    let mut result = RoadFilterConfig::default();

    if let Some(x) = raw.min_street_length {
        result.min_street_length = x;
    }
    if let Some(x) = raw.max_street_length {
        result.max_street_length = x;
    }
    if let Some(x) = raw.alignment_tolerance {
        result.alignment_tolerance = x;
    }
    if let Some(ms) = raw.debounce_delay_ms {
        result.debounce_delay = Duration::from_millis(ms);
    }
    if let Some(x) = raw.road_types {
        result.road_types = x;
    }
    if let Some(x) = raw.overpass_url {
        result.overpass_url = x;
    }
    if let Some(x) = raw.search_radius_km {
        result.search_radius_km = x;
    }
    if let Some(x) = raw.max_results {
        result.max_results = x;
    }
    if let Some(x) = raw.min_way_length {
        result.min_way_length = x;
    }
    if let Some(days) = raw.cache_ttl_days {
        let secs = match days.checked_mul(24 * 60 * 60) {
            Some(secs) => secs,
            None => bail!("cache_ttl_days {} is too long", days),
        };
        result.cache_ttl = Duration::from_secs(secs);
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = RoadFilterConfig::default();
        assert_eq!(config.min_street_length, 200.0);
        assert_eq!(config.max_street_length, 10_000.0);
        assert_eq!(config.alignment_tolerance, 0.5);
        assert_eq!(config.debounce_delay, Duration::from_millis(300));
        assert_eq!(config.road_types.len(), 8);
        assert_eq!(config.max_results, 2000);
        assert_eq!(config.cache_ttl.as_millis(), 604_800_000);
        assert_eq!(parse_configuration("").unwrap(), config);
    }

    #[test]
    fn partial_overrides() {
        let config = parse_configuration(
            r#"
            alignment_tolerance = 1.5
            debounce_delay_ms = 50
            road_types = ["primary", "secondary"]
            "#,
        )
        .unwrap();
        assert_eq!(config.alignment_tolerance, 1.5);
        assert_eq!(config.debounce_delay, Duration::from_millis(50));
        assert_eq!(config.road_types, vec!["primary", "secondary"]);
        assert_eq!(config.min_street_length, 200.0);
        assert_eq!(config.overpass_url, DEFAULT_OVERPASS_URL);
    }

    #[test]
    fn bad_configs() {
        assert!(parse_configuration("alignment_tolerance = \"wide\"").is_err());
        assert!(parse_configuration("no_such_knob = 3").is_err());
        assert!(parse_configuration("min_street_length = 500.0\nmax_street_length = 100.0").is_err());
        assert!(parse_configuration("alignment_tolerance = -1.0").is_err());
        assert!(parse_configuration("cache_ttl_days = 9223372036854775807").is_err());
        assert_eq!(
            parse_configuration("cache_ttl_days = 1").unwrap().cache_ttl,
            Duration::from_secs(86_400)
        );
    }

    #[test]
    fn missing_file_means_defaults() {
        let tmp = tempfile::tempdir().unwrap();
        let config = load_configuration(tmp.path().join("road_filter.toml")).unwrap();
        assert_eq!(config, RoadFilterConfig::default());

        let path = tmp.path().join("custom.toml");
        fs_err::write(&path, "max_results = 10").unwrap();
        assert_eq!(load_configuration(&path).unwrap().max_results, 10);
    }
}
