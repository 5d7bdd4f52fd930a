//! Command-line tools for finding streets that line up with the sunset or sunrise. These are
//! bundled as a single `henge` executable.

#[macro_use]
extern crate anyhow;
#[macro_use]
extern crate log;

mod lookup;
mod streets;

use anyhow::Result;
use structopt::StructOpt;

use geom::{GPSBounds, LonLat};
use road_filter::overpass::{build_query, search_bounds};
use road_filter::RoadFilterConfig;

#[derive(StructOpt)]
#[structopt(name = "henge", about = "Find streets aligned with the sun")]
enum Command {
    /// Print the Overpass query used to fetch streets around a point
    Query {
        /// Latitude of the search center
        #[structopt(long, allow_hyphen_values = true)]
        lat: f64,
        /// Longitude of the search center
        #[structopt(long, allow_hyphen_values = true)]
        lon: f64,
        /// How far around the center to search. Defaults to the configured radius.
        #[structopt(long)]
        radius_km: Option<f64>,
        /// A TOML file overriding the default settings
        #[structopt(long)]
        config: Option<String>,
    },
    /// Load a city's streets, from the cache or Overpass, and print the ones aligned with an
    /// azimuth.
    Streets {
        /// The city's name. This is also what its streets are cached under.
        #[structopt(long)]
        city: String,
        /// Latitude of the city's center
        #[structopt(long, allow_hyphen_values = true)]
        lat: f64,
        /// Longitude of the city's center
        #[structopt(long, allow_hyphen_values = true)]
        lon: f64,
        /// The sun's azimuth, in degrees clockwise from north
        #[structopt(long)]
        azimuth: f64,
        /// Overrides the configured alignment tolerance, in degrees
        #[structopt(long)]
        tolerance: Option<f64>,
        /// Only print streets with a point inside `south,west,north,east`
        #[structopt(long, allow_hyphen_values = true, parse(try_from_str = parse_viewport))]
        viewport: Option<GPSBounds>,
        /// Where fetched streets are cached
        #[structopt(long, default_value = "data/henge_cache")]
        cache_dir: String,
        /// A TOML file overriding the default settings
        #[structopt(long)]
        config: Option<String>,
    },
    /// Ask the henge backend where the sun sets or rises over a city on some day
    Lookup {
        /// The base URL of the backend, like http://localhost:8080
        #[structopt(long)]
        backend: String,
        /// An address or city name
        #[structopt(long)]
        city: String,
        /// Defaults to the current year
        #[structopt(long)]
        year: Option<i32>,
        /// sunset or sunrise
        #[structopt(long, default_value = "sunset")]
        time_of_day: road_filter::lookup::TimeOfDay,
        /// Day of the year, counting from 1 for January 1. Defaults to today.
        #[structopt(long)]
        day: Option<usize>,
    },
    /// Geocode an address with the henge backend, and print the bearing of its road
    Address {
        /// The base URL of the backend, like http://localhost:8080
        #[structopt(long)]
        backend: String,
        #[structopt()]
        address: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cmd = Command::from_args();

    // Printing a query doesn't need logging
    if !matches!(cmd, Command::Query { .. }) {
        hengeutil::logger::setup();
    }

    match cmd {
        Command::Query {
            lat,
            lon,
            radius_km,
            config,
        } => {
            let config = load_config(config)?;
            let radius_km = radius_km.unwrap_or(config.search_radius_km);
            let bounds = search_bounds(LonLat::new(lon, lat), radius_km);
            println!("{}", build_query(&bounds, &config.road_types));
        }
        Command::Streets {
            city,
            lat,
            lon,
            azimuth,
            tolerance,
            viewport,
            cache_dir,
            config,
        } => {
            let mut config = load_config(config)?;
            if let Some(tolerance) = tolerance {
                config.alignment_tolerance = tolerance;
            }
            streets::run(
                config,
                city,
                LonLat::new(lon, lat),
                azimuth,
                viewport,
                cache_dir,
            )
            .await?
        }
        Command::Lookup {
            backend,
            city,
            year,
            time_of_day,
            day,
        } => lookup::sun_angle(backend, city, year, time_of_day, day).await?,
        Command::Address { backend, address } => lookup::address(backend, address).await?,
    }
    Ok(())
}

fn load_config(path: Option<String>) -> Result<RoadFilterConfig> {
    match path {
        Some(path) => road_filter::load_configuration(path),
        None => Ok(RoadFilterConfig::default()),
    }
}

/// Parses `south,west,north,east`, the order Overpass uses for bounding boxes.
fn parse_viewport(x: &str) -> Result<GPSBounds> {
    let parts = x
        .split(',')
        .map(|part| part.trim().parse::<f64>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|err| anyhow!("bad viewport {}: {}", x, err))?;
    if parts.len() != 4 {
        bail!("viewport should be south,west,north,east, not {}", x);
    }
    let (south, west, north, east) = (parts[0], parts[1], parts[2], parts[3]);
    if south > north || west > east {
        bail!("viewport {} has its corners swapped", x);
    }
    Ok(GPSBounds::from_corners(south, west, north, east))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn viewports() {
        let bounds = parse_viewport("30.2, -97.8, 30.3, -97.7").unwrap();
        assert_eq!(bounds, GPSBounds::from_corners(30.2, -97.8, 30.3, -97.7));
        assert!(bounds.contains(LonLat::new(-97.75, 30.25)));

        assert!(parse_viewport("30.2,-97.8,30.3").is_err());
        assert!(parse_viewport("north,west,south,east").is_err());
        assert!(parse_viewport("30.3,-97.8,30.2,-97.7").is_err());
    }
}
