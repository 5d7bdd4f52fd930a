use std::collections::BTreeSet;

use geom::{Angle, GPSBounds};

use crate::{RoadFilterConfig, StreetRecord};

/// Everything deciding which streets get highlighted. Rebuilt whenever the azimuth or viewport
/// changes.
#[derive(Clone, Debug, PartialEq)]
pub struct FilterCriteria {
    /// Degrees clockwise from north
    pub target_azimuth: f64,
    /// Degrees
    pub tolerance: f64,
    /// Meters, inclusive
    pub min_length: f64,
    /// Meters, inclusive
    pub max_length: f64,
    pub allowed_types: BTreeSet<String>,
    /// When there's no map to look at yet, every street is in view.
    pub viewport: Option<GPSBounds>,
}

impl FilterCriteria {
    pub fn new(
        config: &RoadFilterConfig,
        target_azimuth: f64,
        viewport: Option<GPSBounds>,
    ) -> FilterCriteria {
        FilterCriteria {
            target_azimuth,
            tolerance: config.alignment_tolerance,
            min_length: config.min_street_length,
            max_length: config.max_street_length,
            allowed_types: config.road_types.iter().cloned().collect(),
            viewport,
        }
    }

    pub fn azimuth(&self) -> Angle {
        Angle::degrees(self.target_azimuth)
    }

    /// True if the street, traveled either way, points within `tolerance` of the azimuth.
    pub fn is_aligned(&self, street: &StreetRecord) -> bool {
        street.alignment_deviation(self.azimuth()) <= self.tolerance
    }

    pub fn has_allowed_length(&self, street: &StreetRecord) -> bool {
        street.length >= self.min_length && street.length <= self.max_length
    }

    pub fn has_allowed_type(&self, street: &StreetRecord) -> bool {
        self.allowed_types.contains(&street.road_type)
    }

    /// True if any point of the street is in the viewport. A street merely crossing the viewport
    /// without a vertex inside doesn't count.
    pub fn is_in_view(&self, street: &StreetRecord) -> bool {
        match self.viewport {
            Some(ref bounds) => street.geometry.iter().any(|pt| bounds.contains(*pt)),
            None => true,
        }
    }
}

/// Applies the alignment, length, type, and viewport filters, in that order. If more than
/// `max_results` streets survive, keeps the `max_results` best aligned ones, sorted by ascending
/// deviation. Otherwise the input order is preserved.
pub fn filter_streets(
    streets: &[StreetRecord],
    criteria: &FilterCriteria,
    max_results: usize,
) -> Vec<StreetRecord> {
    let aligned: Vec<&StreetRecord> = streets
        .iter()
        .filter(|s| criteria.is_aligned(s))
        .collect();
    let sized: Vec<&StreetRecord> = aligned
        .iter()
        .copied()
        .filter(|s| criteria.has_allowed_length(s))
        .collect();
    let typed: Vec<&StreetRecord> = sized
        .iter()
        .copied()
        .filter(|s| criteria.has_allowed_type(s))
        .collect();
    let mut visible: Vec<&StreetRecord> = typed
        .iter()
        .copied()
        .filter(|s| criteria.is_in_view(s))
        .collect();
    debug!(
        "Filtering {} streets for azimuth {}: {} aligned, {} right length, {} right type, {} in view",
        streets.len(),
        criteria.target_azimuth,
        aligned.len(),
        sized.len(),
        typed.len(),
        visible.len()
    );

    if visible.len() > max_results {
        info!(
            "Limiting to {} streets ({} total in view)",
            max_results,
            visible.len()
        );
        let azimuth = criteria.azimuth();
        // Stable, so ties keep their input order
        visible.sort_by(|a, b| {
            a.alignment_deviation(azimuth)
                .total_cmp(&b.alignment_deviation(azimuth))
        });
        visible.truncate(max_results);
    }

    visible.into_iter().cloned().collect()
}

#[cfg(test)]
mod tests {
    use geom::LonLat;

    use super::*;

    /// A street starting at (lon, lat) with the given bearing and roughly the given length.
    fn street(osm_id: i64, lon: f64, lat: f64, bearing: f64, length: f64) -> StreetRecord {
        let mut s = StreetRecord::new(
            osm_id,
            format!("Street {}", osm_id),
            "residential".to_string(),
            vec![LonLat::new(lon, lat), LonLat::new(lon + 0.001, lat)],
        )
        .unwrap();
        s.bearing = bearing;
        s.length = length;
        s
    }

    fn criteria(azimuth: f64) -> FilterCriteria {
        FilterCriteria::new(&RoadFilterConfig::default(), azimuth, None)
    }

    #[test]
    fn exact_and_reverse_alignment() {
        let s = street(1, 0.0, 0.0, 123.4, 500.0);
        assert!(criteria(123.4).is_aligned(&s));
        assert!(criteria(303.4).is_aligned(&s));
        assert!(!criteria(124.0).is_aligned(&s));

        let mut c = criteria(123.4);
        c.tolerance = 0.0;
        assert!(c.is_aligned(&s));
    }

    #[test]
    fn alignment_wraps_around_north() {
        let s = street(1, 0.0, 0.0, 359.8, 500.0);
        assert!(criteria(0.2).is_aligned(&s));
        assert!(criteria(180.2).is_aligned(&s));
        assert!(!criteria(0.4).is_aligned(&s));
    }

    #[test]
    fn sunset_down_an_east_west_street() {
        let s = street(1, 0.0, 0.0, 90.3, 500.0);
        assert!(criteria(270.0).is_aligned(&s));
        assert_eq!(filter_streets(&[s.clone()], &criteria(270.0), 2000), vec![s]);
    }

    #[test]
    fn length_bounds_are_inclusive() {
        let c = criteria(90.0);
        assert!(c.has_allowed_length(&street(1, 0.0, 0.0, 90.0, 200.0)));
        assert!(!c.has_allowed_length(&street(2, 0.0, 0.0, 90.0, 200.0 - 1e-9)));
        assert!(c.has_allowed_length(&street(3, 0.0, 0.0, 90.0, 10_000.0)));
        assert!(!c.has_allowed_length(&street(4, 0.0, 0.0, 90.0, 10_000.1)));
    }

    #[test]
    fn types_and_viewport() {
        let mut footway = street(1, 0.0, 0.0, 90.0, 500.0);
        footway.road_type = "footway".to_string();
        let inside = street(2, 0.5, 0.5, 90.0, 500.0);
        let outside = street(3, 5.0, 5.0, 90.0, 500.0);

        let mut c = criteria(90.0);
        c.viewport = Some(GPSBounds::from_corners(0.0, 0.0, 1.0, 1.0));
        assert!(!c.has_allowed_type(&footway));
        assert!(c.is_in_view(&inside));
        assert!(!c.is_in_view(&outside));

        let result = filter_streets(&[footway, inside.clone(), outside], &c, 2000);
        assert_eq!(result, vec![inside]);
    }

    #[test]
    fn one_vertex_in_view_is_enough() {
        let mut crossing = street(1, 0.5, 0.5, 90.0, 500.0);
        crossing.geometry = vec![LonLat::new(0.5, 0.5), LonLat::new(5.0, 0.5)];
        let mut c = criteria(90.0);
        c.viewport = Some(GPSBounds::from_corners(0.0, 0.0, 1.0, 1.0));
        assert!(c.is_in_view(&crossing));
        assert_eq!(filter_streets(&[crossing.clone()], &c, 2000), vec![crossing.clone()]);

        // Passing through without a vertex inside doesn't count
        crossing.geometry = vec![LonLat::new(-1.0, 0.5), LonLat::new(5.0, 0.5)];
        assert!(!c.is_in_view(&crossing));
    }

    #[test]
    fn order_preserved_without_cap() {
        let streets = vec![
            street(1, 0.0, 0.0, 90.4, 500.0),
            street(2, 0.0, 0.0, 90.0, 500.0),
            street(3, 0.0, 0.0, 270.2, 500.0),
        ];
        let ids: Vec<i64> = filter_streets(&streets, &criteria(90.0), 2000)
            .into_iter()
            .map(|s| s.osm_id)
            .collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn cap_keeps_best_aligned() {
        let streets = vec![
            street(1, 0.0, 0.0, 90.4, 500.0),
            street(2, 0.0, 0.0, 90.0, 500.0),
            street(3, 0.0, 0.0, 270.2, 500.0),
            street(4, 0.0, 0.0, 89.9, 500.0),
        ];
        let ids: Vec<i64> = filter_streets(&streets, &criteria(90.0), 2)
            .into_iter()
            .map(|s| s.osm_id)
            .collect();
        assert_eq!(ids, vec![2, 4]);
    }
}
