//! Fetching named roads from an [Overpass API](https://wiki.openstreetmap.org/wiki/Overpass_API)
//! server and normalizing them into `StreetRecord`s.

use std::collections::BTreeMap;

use anyhow::{Context, Result};
use serde::Deserialize;

use geom::{GPSBounds, LonLat};

use crate::StreetRecord;

/// The area to fetch streets for around a city's center.
pub fn search_bounds(center: LonLat, radius_km: f64) -> GPSBounds {
    GPSBounds::around(center, radius_km)
}

/// Builds an Overpass QL query for every way tagged with one of `road_types` that also has a
/// name, returned with full geometry. See
/// https://wiki.openstreetmap.org/wiki/Overpass_API/Overpass_QL
pub fn build_query<I: AsRef<str>>(bounds: &GPSBounds, road_types: &[I]) -> String {
    let types: Vec<&str> = road_types.iter().map(|x| x.as_ref()).collect();
    format!(
        "[out:json][timeout:60];\n(\n  way[\"highway\"~\"^({})$\"]\n  [\"name\"]\n  ({},{},{},{});\n);\nout geom;",
        types.join("|"),
        bounds.south(),
        bounds.west(),
        bounds.north(),
        bounds.east()
    )
}

#[derive(Deserialize)]
struct OverpassResponse {
    #[serde(default)]
    elements: Vec<OverpassElement>,
}

/// A way, as returned by `out geom`.
#[derive(Deserialize)]
pub struct OverpassElement {
    pub id: i64,
    #[serde(default)]
    pub tags: BTreeMap<String, String>,
    /// Overpass writes `null` for points it couldn't resolve
    #[serde(default)]
    pub geometry: Vec<Option<LonLat>>,
}

/// Parses an Overpass JSON response. Invalid JSON is an error, but a response without any
/// `elements` just has no streets.
pub fn parse_response(raw: &[u8], min_way_length: f64) -> Result<Vec<StreetRecord>> {
    let resp: OverpassResponse =
        serde_json::from_slice(raw).context("parsing Overpass response")?;
    let num_elements = resp.elements.len();
    let streets: Vec<StreetRecord> = resp
        .elements
        .into_iter()
        .filter_map(|way| normalize_way(way, min_way_length))
        .collect();
    info!(
        "Processed {} streets from {} Overpass elements",
        streets.len(),
        num_elements
    );
    Ok(streets)
}

/// Turns one way into a street. Ways with fewer than 2 points, or that are at most
/// `min_way_length` meters long, are dropped.
pub fn normalize_way(way: OverpassElement, min_way_length: f64) -> Option<StreetRecord> {
    let OverpassElement {
        id,
        mut tags,
        geometry,
    } = way;
    let geometry: Vec<LonLat> = geometry.into_iter().flatten().collect();
    let name = tags
        .remove("name")
        .unwrap_or_else(|| "Unnamed Street".to_string());
    let road_type = tags
        .remove("highway")
        .unwrap_or_else(|| "unknown".to_string());

    let street = StreetRecord::new(id, name, road_type, geometry)?;
    if street.length <= min_way_length {
        return None;
    }
    Some(street)
}

/// POSTs the query to an Overpass server as `data=<query>` and normalizes the result. Failures
/// aren't retried.
pub async fn fetch_streets(
    url: &str,
    query: &str,
    min_way_length: f64,
) -> Result<Vec<StreetRecord>> {
    info!("Fetching streets from {}", url);
    let raw = hengeio::post_form(url, &[("data", query)]).await?;
    parse_response(&raw, min_way_length)
}
