//! Finds streets that line up with the sun. Street geometry comes from OpenStreetMap through an
//! Overpass server and is cached per city; for a given sun azimuth and map viewport, the streets
//! pointing at the sun (either way along the street) are handed to a `RenderAdapter` to draw.
//!
//! The filtering and normalization logic is pure and lives in `filter` and `overpass`.
//! `RoadFilter` owns the state around it: the current city, its streets, pending fetches, and the
//! debounce timer for viewport changes.

#[macro_use]
extern crate anyhow;
#[macro_use]
extern crate log;

pub use crate::cache::{cache_key, now_ms, StreetCache};
pub use crate::config::{load_configuration, parse_configuration, RoadFilterConfig};
pub use crate::debounce::Debouncer;
pub use crate::fetch::{FetchTicket, InFlight};
pub use crate::filter::{filter_streets, FilterCriteria};
pub use crate::pipeline::{FetchOutcome, RoadFilter};
pub use crate::render::{popup_text, FilterStats, RenderAdapter};
pub use crate::street::StreetRecord;

pub mod cache;
mod config;
mod debounce;
mod fetch;
mod filter;
pub mod lookup;
pub mod overpass;
mod pipeline;
mod render;
mod street;
