use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{Angle, Distance};

pub const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

/// longitude is x, latitude is y. Serialized the way Overpass and Leaflet spell it, `{lat, lon}`.
#[derive(Copy, Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct LonLat {
    #[serde(rename = "lon")]
    pub longitude: f64,
    #[serde(rename = "lat")]
    pub latitude: f64,
}

impl LonLat {
    pub fn new(lon: f64, lat: f64) -> LonLat {
        LonLat {
            longitude: lon,
            latitude: lat,
        }
    }

    /// Haversine distance.
    pub fn gps_dist(self, other: LonLat) -> Distance {
        let lat1 = self.latitude.to_radians();
        let lat2 = other.latitude.to_radians();
        let delta_lat = (other.latitude - self.latitude).to_radians();
        let delta_lon = (other.longitude - self.longitude).to_radians();

        let a = (delta_lat / 2.0).sin().powi(2)
            + lat1.cos() * lat2.cos() * (delta_lon / 2.0).sin().powi(2);
        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
        Distance::meters(EARTH_RADIUS_METERS * c)
    }

    /// The initial great-circle bearing from this point towards `other`, in degrees clockwise
    /// from true north, within [0, 360). The bearing from a point to itself is 0.
    pub fn bearing_to(self, other: LonLat) -> Angle {
        let lat1 = self.latitude.to_radians();
        let lat2 = other.latitude.to_radians();
        let delta_lon = (other.longitude - self.longitude).to_radians();

        let y = delta_lon.sin() * lat2.cos();
        let x = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * delta_lon.cos();
        Angle::degrees(y.atan2(x).to_degrees())
    }

    /// Sum of the distances between consecutive points.
    pub fn path_length(pts: &[LonLat]) -> Distance {
        pts.windows(2)
            .fold(Distance::ZERO, |acc, pair| acc + pair[0].gps_dist(pair[1]))
    }
}

impl fmt::Display for LonLat {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "LonLat({0}, {1})", self.longitude, self.latitude)
    }
}

/// Great-circle initial bearing from point 1 to point 2, in degrees [0, 360). NaN inputs produce
/// NaN.
pub fn bearing(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    LonLat::new(lon1, lat1)
        .bearing_to(LonLat::new(lon2, lat2))
        .normalized_degrees()
}

/// Haversine distance between two points, in meters.
pub fn distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    LonLat::new(lon1, lat1)
        .gps_dist(LonLat::new(lon2, lat2))
        .inner_meters()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64, epsilon: f64) -> bool {
        (a - b).abs() < epsilon
    }

    #[test]
    fn cardinal_bearings() {
        assert!(approx_eq(bearing(0.0, 0.0, 1.0, 0.0), 0.0, 1e-9));
        assert!(approx_eq(bearing(0.0, 0.0, 0.0, 1.0), 90.0, 1e-9));
        assert!(approx_eq(bearing(0.0, 0.0, -1.0, 0.0), 180.0, 1e-9));
        assert!(approx_eq(bearing(0.0, 0.0, 0.0, -1.0), 270.0, 1e-9));
    }

    #[test]
    fn bearings_stay_in_range() {
        let pts = [
            (30.2672, -97.7431),
            (-33.8688, 151.2093),
            (51.5074, -0.1278),
            (0.0, 179.9),
            (0.0, -179.9),
            (89.0, 10.0),
            (-89.0, -10.0),
        ];
        for (lat1, lon1) in pts {
            for (lat2, lon2) in pts {
                let b = bearing(lat1, lon1, lat2, lon2);
                assert!((0.0..360.0).contains(&b), "bearing {} out of range", b);
                assert!(distance(lat1, lon1, lat2, lon2) >= 0.0);
            }
        }
    }

    #[test]
    fn same_point() {
        // atan2(0, 0) is 0, so a degenerate segment points north instead of producing NaN.
        assert_eq!(bearing(30.0, -97.0, 30.0, -97.0), 0.0);
        assert_eq!(distance(30.0, -97.0, 30.0, -97.0), 0.0);
    }

    #[test]
    fn nan_propagates() {
        assert!(bearing(f64::NAN, 0.0, 1.0, 1.0).is_nan());
        assert!(distance(0.0, f64::NAN, 1.0, 1.0).is_nan());
    }

    #[test]
    fn one_degree_of_latitude() {
        // 2 * pi * R / 360
        assert!(approx_eq(distance(0.0, 0.0, 1.0, 0.0), 111_194.93, 0.01));
    }

    #[test]
    fn path_length_sums_segments() {
        let pts = vec![
            LonLat::new(0.0, 0.0),
            LonLat::new(0.001, 0.0),
            LonLat::new(0.001, 0.001),
        ];
        let expected = pts[0].gps_dist(pts[1]) + pts[1].gps_dist(pts[2]);
        assert_eq!(LonLat::path_length(&pts), expected);
        assert_eq!(LonLat::path_length(&pts[0..1]), Distance::ZERO);
    }
}
