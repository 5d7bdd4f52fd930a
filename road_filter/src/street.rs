use serde::{Deserialize, Serialize};

use geom::{round_tenths, Angle, LonLat};

/// One named road from OpenStreetMap, reduced to what the alignment filter needs. Built once from
/// source data and never modified afterwards.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StreetRecord {
    /// `way_<osm id>`
    pub id: String,
    pub name: String,
    /// The OSM `highway` tag, like "residential"
    #[serde(rename = "type")]
    pub road_type: String,
    /// At least 2 points
    pub geometry: Vec<LonLat>,
    /// Degrees in [0, 360) from the first to the last point, rounded to 0.1
    pub bearing: f64,
    /// Meters along the whole polyline, rounded to 0.1
    pub length: f64,
    pub osm_id: i64,
}

impl StreetRecord {
    /// Returns `None` when the geometry has fewer than 2 points.
    pub fn new(
        osm_id: i64,
        name: String,
        road_type: String,
        geometry: Vec<LonLat>,
    ) -> Option<StreetRecord> {
        if geometry.len() < 2 {
            return None;
        }
        let first = geometry[0];
        let last = geometry[geometry.len() - 1];
        // Re-normalize after rounding, so 359.96 becomes 0.0 instead of 360.0
        let bearing = Angle::degrees(round_tenths(
            first.bearing_to(last).normalized_degrees(),
        ))
        .normalized_degrees();
        let length = round_tenths(LonLat::path_length(&geometry).inner_meters());

        Some(StreetRecord {
            id: format!("way_{}", osm_id),
            name,
            road_type,
            geometry,
            bearing,
            length,
            osm_id,
        })
    }

    pub fn bearing_angle(&self) -> Angle {
        Angle::degrees(self.bearing)
    }

    /// Traveling the street the other way.
    pub fn reverse_bearing(&self) -> f64 {
        self.bearing_angle().opposite().normalized_degrees()
    }

    /// How far this street is from lining up with `azimuth`, in either direction of travel.
    pub fn alignment_deviation(&self, azimuth: Angle) -> f64 {
        geom::alignment_deviation(self.bearing_angle(), azimuth)
    }
}
