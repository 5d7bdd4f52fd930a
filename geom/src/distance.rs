use std::{fmt, ops};

use serde::{Deserialize, Serialize};

/// A distance, in meters. Can be negative, and NaN is passed through rather than rejected.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Distance(f64);

impl Distance {
    pub const ZERO: Distance = Distance(0.0);

    /// Creates a distance in meters.
    pub fn meters(value: f64) -> Distance {
        Distance(value)
    }

    /// Returns the distance in meters. Prefer to work with type-safe `Distance`s.
    pub fn inner_meters(self) -> f64 {
        self.0
    }

    /// Describes the distance rounded to the nearest meter, like "1234m".
    pub fn describe_rounded(self) -> String {
        format!("{}m", self.0.round())
    }
}

impl fmt::Display for Distance {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}m", self.0)
    }
}

impl ops::Add for Distance {
    type Output = Distance;

    fn add(self, other: Distance) -> Distance {
        Distance::meters(self.0 + other.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn describe() {
        assert_eq!(Distance::meters(1234.56).describe_rounded(), "1235m");
        assert_eq!(Distance::meters(2.5).to_string(), "2.5m");
        assert_eq!(
            Distance::meters(3.0) + Distance::meters(4.5),
            Distance::meters(7.5)
        );
    }
}
