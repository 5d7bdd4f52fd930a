use geom::Distance;
use hengeutil::prettyprint_usize;

use crate::StreetRecord;

/// How many streets are loaded, and how many of those are currently highlighted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FilterStats {
    pub total_streets: usize,
    pub aligned_streets: usize,
}

impl FilterStats {
    pub fn describe(&self) -> String {
        format!(
            "{} of {} streets aligned",
            prettyprint_usize(self.aligned_streets),
            prettyprint_usize(self.total_streets)
        )
    }
}

/// Whatever displays highlighted streets: a map widget on the web, a terminal in the CLI.
pub trait RenderAdapter {
    /// Remove every street drawn so far.
    fn clear(&mut self);
    /// Draw one polyline per street, on top of anything already drawn.
    fn draw(&mut self, streets: &[StreetRecord]);
    fn show_stats(&mut self, stats: &FilterStats);
    fn show_loading(&mut self) {}
    fn hide_loading(&mut self) {}
    fn show_error(&mut self, message: &str);
}

/// The text for a highlighted street's popup.
pub fn popup_text(street: &StreetRecord) -> String {
    format!(
        "{}\nType: {}\nLength: {}\nBearing: {}°",
        street.name,
        street.road_type,
        Distance::meters(street.length).describe_rounded(),
        street.bearing
    )
}

#[cfg(test)]
mod tests {
    use geom::LonLat;

    use super::*;

    #[test]
    fn popup() {
        let mut street = StreetRecord::new(
            5,
            "Zach Scott St".to_string(),
            "residential".to_string(),
            vec![LonLat::new(-97.7, 30.27), LonLat::new(-97.69, 30.27)],
        )
        .unwrap();
        street.length = 961.6;
        street.bearing = 89.8;
        assert_eq!(
            popup_text(&street),
            "Zach Scott St\nType: residential\nLength: 962m\nBearing: 89.8°"
        );
    }

    #[test]
    fn stats() {
        let stats = FilterStats {
            total_streets: 12345,
            aligned_streets: 17,
        };
        assert_eq!(stats.describe(), "17 of 12,345 streets aligned");
    }
}
