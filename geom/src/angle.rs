use std::fmt;

use serde::{Deserialize, Serialize};

/// A compass direction, stored in degrees clockwise from north and always normalized to
/// [0, 360).
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Angle(f64);

impl Angle {
    pub fn degrees(degs: f64) -> Angle {
        let normalized = degs.rem_euclid(360.0);
        // rem_euclid of a tiny negative number rounds up to exactly 360
        if normalized >= 360.0 {
            Angle(0.0)
        } else {
            Angle(normalized)
        }
    }

    pub fn normalized_degrees(self) -> f64 {
        self.0
    }

    pub fn opposite(self) -> Angle {
        Angle::degrees(self.0 + 180.0)
    }

    /// The shortest way around the circle between two angles, in [0, 180].
    pub fn circular_diff(self, other: Angle) -> f64 {
        let diff = (self.0 - other.0).abs();
        diff.min(360.0 - diff)
    }
}

impl fmt::Display for Angle {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Angle({} degrees)", self.0)
    }
}

/// How far a street with the given bearing is from pointing at `azimuth`. Streets run both ways,
/// so this is the smaller of the deviations of the bearing and its reverse, within [0, 90].
pub fn alignment_deviation(street_bearing: Angle, azimuth: Angle) -> f64 {
    street_bearing
        .circular_diff(azimuth)
        .min(street_bearing.opposite().circular_diff(azimuth))
}
