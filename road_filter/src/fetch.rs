use std::collections::BTreeSet;

use anyhow::Result;

use geom::GPSBounds;

use crate::overpass::fetch_streets;
use crate::StreetRecord;

/// Everything needed to fetch one city's streets from Overpass. `RoadFilter` hands these out
/// instead of doing network I/O itself; whoever runs the fetch gives the ticket back along with
/// the result.
#[derive(Clone, Debug, PartialEq)]
pub struct FetchTicket {
    pub city: String,
    pub cache_key: String,
    pub bounds: GPSBounds,
    pub url: String,
    pub query: String,
    pub min_way_length: f64,
}

impl FetchTicket {
    pub async fn fetch(&self) -> Result<Vec<StreetRecord>> {
        fetch_streets(&self.url, &self.query, self.min_way_length).await
    }
}

/// Which cities currently have a fetch outstanding, by cache key.
#[derive(Default, Debug)]
pub struct InFlight {
    keys: BTreeSet<String>,
}

impl InFlight {
    /// False if a fetch for this key is already running.
    pub fn try_start(&mut self, key: &str) -> bool {
        self.keys.insert(key.to_string())
    }

    pub fn finish(&mut self, key: &str) {
        self.keys.remove(key);
    }

    pub fn contains(&self, key: &str) -> bool {
        self.keys.contains(key)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_at_a_time() {
        let mut in_flight = InFlight::default();
        assert!(in_flight.try_start("henge_streets_Austin"));
        assert!(!in_flight.try_start("henge_streets_Austin"));
        assert!(in_flight.try_start("henge_streets_Boston"));
        assert_eq!(in_flight.len(), 2);

        in_flight.finish("henge_streets_Austin");
        assert!(!in_flight.contains("henge_streets_Austin"));
        assert!(in_flight.try_start("henge_streets_Austin"));
    }
}
