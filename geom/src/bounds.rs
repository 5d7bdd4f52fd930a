use serde::{Deserialize, Serialize};

use crate::LonLat;

/// Roughly how many kilometers one degree of latitude spans.
const KM_PER_DEGREE: f64 = 111.0;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct GPSBounds {
    pub min_lon: f64,
    pub min_lat: f64,
    pub max_lon: f64,
    pub max_lat: f64,
}

impl GPSBounds {
    /// Builds bounds from the south-west and north-east corners, the order Overpass uses.
    pub fn from_corners(south: f64, west: f64, north: f64, east: f64) -> GPSBounds {
        GPSBounds {
            min_lon: west,
            min_lat: south,
            max_lon: east,
            max_lat: north,
        }
    }

    /// A box extending `radius_km` in every direction from `center`. Longitude degrees shrink
    /// towards the poles, so the east/west extent is scaled by the cosine of the latitude.
    pub fn around(center: LonLat, radius_km: f64) -> GPSBounds {
        let lat_delta = radius_km / KM_PER_DEGREE;
        let lon_delta = radius_km / (KM_PER_DEGREE * center.latitude.to_radians().cos());
        GPSBounds::from_corners(
            center.latitude - lat_delta,
            center.longitude - lon_delta,
            center.latitude + lat_delta,
            center.longitude + lon_delta,
        )
    }

    /// Edges count as inside.
    pub fn contains(&self, pt: LonLat) -> bool {
        pt.longitude >= self.min_lon
            && pt.longitude <= self.max_lon
            && pt.latitude >= self.min_lat
            && pt.latitude <= self.max_lat
    }

    pub fn north(&self) -> f64 {
        self.max_lat
    }

    pub fn south(&self) -> f64 {
        self.min_lat
    }

    pub fn east(&self) -> f64 {
        self.max_lon
    }

    pub fn west(&self) -> f64 {
        self.min_lon
    }
}
