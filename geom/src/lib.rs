//! Small geometry primitives for working with GPS coordinates: points, bounding boxes, compass
//! angles, and distances. Everything here is spherical-earth math; nothing tries to be a
//! production-grade geodesy library.

pub use crate::angle::{alignment_deviation, Angle};
pub use crate::bounds::GPSBounds;
pub use crate::distance::Distance;
pub use crate::gps::{bearing, distance, LonLat, EARTH_RADIUS_METERS};

mod angle;
mod bounds;
mod distance;
mod gps;

/// Rounds to one decimal place, the precision street bearings and lengths are reported at.
pub fn round_tenths(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounding() {
        assert_eq!(round_tenths(89.96), 90.0);
        assert_eq!(round_tenths(150.04), 150.0);
        assert_eq!(round_tenths(-0.26), -0.3);
    }
}
