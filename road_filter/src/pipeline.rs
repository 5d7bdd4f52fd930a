use anyhow::Result;
use instant::Instant;

use geom::{GPSBounds, LonLat};
use hengeio::KeyValueStore;

use crate::cache::{cache_key, StreetCache};
use crate::debounce::Debouncer;
use crate::fetch::{FetchTicket, InFlight};
use crate::filter::{filter_streets, FilterCriteria};
use crate::overpass::{build_query, search_bounds};
use crate::render::{FilterStats, RenderAdapter};
use crate::{RoadFilterConfig, StreetRecord};

/// The city whose streets are wanted right now.
#[derive(Clone, Debug)]
struct CitySelection {
    name: String,
    cache_key: String,
    bounds: GPSBounds,
}

/// What happened to a finished fetch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The streets were cached and are now being filtered.
    Installed { num_streets: usize },
    /// The streets were cached, but a different city has been selected since the fetch started.
    Stale,
}

/// Keeps one city's streets and highlights the ones lining up with the sun, redrawing through a
/// `RenderAdapter` whenever the azimuth or viewport changes.
///
/// Nothing here blocks or spawns work. Selecting a city either answers from the cache or hands
/// back a `FetchTicket`; the caller runs it and reports back with `finish_fetch`. Viewport changes
/// are debounced, and the caller's event loop drives that by calling `tick`.
pub struct RoadFilter<S: KeyValueStore, R: RenderAdapter> {
    config: RoadFilterConfig,
    cache: StreetCache<S>,
    renderer: R,
    enabled: bool,

    city: Option<CitySelection>,
    in_flight: InFlight,
    // Kept when switching cities until the new city's streets arrive
    streets: Option<Vec<StreetRecord>>,

    azimuth: Option<f64>,
    viewport: Option<GPSBounds>,
    criteria: Option<FilterCriteria>,
    filtered: Vec<StreetRecord>,
    debounce: Debouncer,
}

impl<S: KeyValueStore, R: RenderAdapter> RoadFilter<S, R> {
    pub fn new(config: RoadFilterConfig, store: S, renderer: R) -> RoadFilter<S, R> {
        let cache = StreetCache::new(store, config.cache_ttl);
        let debounce = Debouncer::new(config.debounce_delay);
        RoadFilter {
            config,
            cache,
            renderer,
            enabled: true,

            city: None,
            in_flight: InFlight::default(),
            streets: None,

            azimuth: None,
            viewport: None,
            criteria: None,
            filtered: Vec::new(),
            debounce,
        }
    }

    /// Starts showing streets for a city. If they're cached, they're filtered right away and this
    /// returns `None`. Otherwise this returns a ticket to fetch them, unless a fetch for the same
    /// city is still running. Every ticket must come back through `finish_fetch` or
    /// `abandon_fetch`; until then, the city can't be fetched again.
    pub fn initialize_for_city(
        &mut self,
        city: &str,
        center: LonLat,
        now_ms: i64,
    ) -> Option<FetchTicket> {
        let bounds = search_bounds(center, self.config.search_radius_km);
        let key = cache_key(city);
        info!("Initializing road filter for {} around {}", city, center);
        self.city = Some(CitySelection {
            name: city.to_string(),
            cache_key: key.clone(),
            bounds: bounds.clone(),
        });
        self.renderer.show_loading();

        if let Some(streets) = self.cache.get(city, now_ms) {
            info!("Using {} cached streets for {}", streets.len(), city);
            self.install(streets);
            return None;
        }

        if !self.in_flight.try_start(&key) {
            info!("Already fetching streets for {}", city);
            return None;
        }
        info!("Fetching street data from Overpass for {}", city);
        Some(FetchTicket {
            city: city.to_string(),
            cache_key: key,
            query: build_query(&bounds, &self.config.road_types),
            bounds,
            url: self.config.overpass_url.clone(),
            min_way_length: self.config.min_way_length,
        })
    }

    /// Reports how the fetch for a ticket went. Fetched streets are always cached, but only
    /// replace the current streets if the ticket's city is still the selected one. On failure, the
    /// error is shown and returned, and whatever was displayed before stays.
    pub fn finish_fetch(
        &mut self,
        ticket: FetchTicket,
        result: Result<Vec<StreetRecord>>,
        now_ms: i64,
    ) -> Result<FetchOutcome> {
        self.in_flight.finish(&ticket.cache_key);
        let current = self
            .city
            .as_ref()
            .map(|c| c.cache_key == ticket.cache_key)
            .unwrap_or(false);

        let streets = match result {
            Ok(streets) => streets,
            Err(err) => {
                error!("Error fetching streets for {}: {:#}", ticket.city, err);
                if current {
                    self.renderer.hide_loading();
                    self.renderer
                        .show_error("Failed to load street data. Please try again.");
                }
                return Err(err.context(format!("fetching streets for {}", ticket.city)));
            }
        };

        self.cache.put(&ticket.city, &streets, now_ms);
        if !current {
            info!(
                "Ignoring {} streets for {}; another city was selected",
                streets.len(),
                ticket.city
            );
            return Ok(FetchOutcome::Stale);
        }
        let num_streets = streets.len();
        self.install(streets);
        Ok(FetchOutcome::Installed { num_streets })
    }

    /// Gives up on a ticket without a result, so the city can be fetched again later.
    pub fn abandon_fetch(&mut self, ticket: &FetchTicket) {
        info!("Abandoning the fetch for {}", ticket.city);
        self.in_flight.finish(&ticket.cache_key);
        let current = self
            .city
            .as_ref()
            .map(|c| c.cache_key == ticket.cache_key)
            .unwrap_or(false);
        if current {
            self.renderer.hide_loading();
        }
    }

    fn install(&mut self, streets: Vec<StreetRecord>) {
        self.streets = Some(streets);
        self.renderer.hide_loading();
        self.update_highlights();
    }

    /// Filters for a new azimuth and viewport, redraws, and returns the highlighted streets.
    /// Calling this again with the same arguments gives the same streets in the same order. While
    /// disabled, nothing is highlighted and this returns nothing.
    pub fn recompute(&mut self, azimuth: f64, viewport: Option<GPSBounds>) -> &[StreetRecord] {
        self.azimuth = Some(azimuth);
        self.viewport = viewport;
        // Anything pending is covered by this
        self.debounce.cancel();
        self.update_highlights();
        &self.filtered
    }

    /// The sun moved; filter again right away, keeping the current viewport.
    pub fn update_for_azimuth(&mut self, azimuth: f64) -> &[StreetRecord] {
        let viewport = self.viewport.clone();
        self.recompute(azimuth, viewport)
    }

    /// The map was panned or zoomed. Filtering waits until the viewport stops changing for the
    /// debounce delay; see `tick`.
    pub fn viewport_changed(&mut self, viewport: GPSBounds, now: Instant) {
        self.viewport = Some(viewport);
        self.debounce.schedule(now);
    }

    /// Runs a pending debounced update if its time has come. Returns true if it did.
    pub fn tick(&mut self, now: Instant) -> bool {
        if !self.debounce.poll(now) {
            return false;
        }
        debug!("Map view changed, updating street highlights");
        self.update_highlights();
        true
    }

    /// When the event loop should call `tick` next, if anything is pending.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.debounce.deadline()
    }

    fn update_highlights(&mut self) {
        if !self.enabled {
            debug!("Road filter disabled, not highlighting");
            return;
        }
        let streets = match self.streets {
            Some(ref streets) => streets,
            None => {
                debug!("No streets loaded yet, not highlighting");
                return;
            }
        };
        let azimuth = match self.azimuth {
            Some(azimuth) => azimuth,
            None => {
                // Nothing to line up with yet, but the total is still worth showing
                self.renderer.show_stats(&FilterStats {
                    total_streets: streets.len(),
                    aligned_streets: 0,
                });
                return;
            }
        };

        let criteria = FilterCriteria::new(&self.config, azimuth, self.viewport.clone());
        self.filtered = filter_streets(streets, &criteria, self.config.max_results);
        self.criteria = Some(criteria);
        debug!(
            "Highlighting {} of {} streets",
            self.filtered.len(),
            streets.len()
        );

        self.renderer.clear();
        self.renderer.draw(&self.filtered);
        let stats = self.stats();
        self.renderer.show_stats(&stats);
    }

    /// Turning highlighting off erases it; turning it back on redraws.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        if enabled {
            self.update_highlights();
        } else {
            self.debounce.cancel();
            self.filtered.clear();
            self.renderer.clear();
        }
    }

    /// Forgets the city and its streets, and erases everything drawn. Fetches already handed out
    /// will come back as stale.
    pub fn cleanup(&mut self) {
        self.renderer.clear();
        self.debounce.cancel();
        self.city = None;
        self.streets = None;
        self.filtered.clear();
        self.criteria = None;
    }

    pub fn stats(&self) -> FilterStats {
        FilterStats {
            total_streets: self.dataset_len(),
            aligned_streets: self.filtered.len(),
        }
    }

    pub fn filtered(&self) -> &[StreetRecord] {
        &self.filtered
    }

    pub fn dataset_len(&self) -> usize {
        self.streets.as_ref().map(|s| s.len()).unwrap_or(0)
    }

    pub fn criteria(&self) -> Option<&FilterCriteria> {
        self.criteria.as_ref()
    }

    pub fn current_city(&self) -> Option<&str> {
        self.city.as_ref().map(|c| c.name.as_str())
    }

    /// The area streets are fetched for around the current city.
    pub fn current_bounds(&self) -> Option<&GPSBounds> {
        self.city.as_ref().map(|c| &c.bounds)
    }

    pub fn is_fetching(&self, city: &str) -> bool {
        self.in_flight.contains(&cache_key(city))
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn config(&self) -> &RoadFilterConfig {
        &self.config
    }

    pub fn cache(&self) -> &StreetCache<S> {
        &self.cache
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }
}
