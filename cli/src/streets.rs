use anyhow::Result;

use geom::{GPSBounds, LonLat};
use hengeio::FileStore;
use hengeutil::plain_list_names;
use road_filter::{
    now_ms, popup_text, FilterStats, RenderAdapter, RoadFilter, RoadFilterConfig, StreetRecord,
};

/// Prints highlighted streets to STDOUT, one popup per street.
#[derive(Default)]
struct TerminalRenderer {
    num_drawn: usize,
}

impl RenderAdapter for TerminalRenderer {
    fn clear(&mut self) {
        self.num_drawn = 0;
    }

    fn draw(&mut self, streets: &[StreetRecord]) {
        for street in streets {
            println!("{}\n", popup_text(street));
        }
        self.num_drawn += streets.len();
    }

    fn show_stats(&mut self, stats: &FilterStats) {
        println!("{}", stats.describe());
    }

    fn show_loading(&mut self) {
        info!("Loading street data...");
    }

    fn show_error(&mut self, message: &str) {
        eprintln!("{}", message);
    }
}

pub async fn run(
    config: RoadFilterConfig,
    city: String,
    center: LonLat,
    azimuth: f64,
    viewport: Option<GPSBounds>,
    cache_dir: String,
) -> Result<()> {
    info!(
        "Looking for {} streets between {}m and {}m long, within {} degrees of {}",
        plain_list_names(config.road_types.clone()),
        config.min_street_length,
        config.max_street_length,
        config.alignment_tolerance,
        azimuth
    );
    let mut filter = RoadFilter::new(
        config,
        FileStore::new(cache_dir),
        TerminalRenderer::default(),
    );
    // Nothing is loaded yet, so this only sets up what to filter for once streets arrive
    filter.recompute(azimuth, viewport);

    if let Some(ticket) = filter.initialize_for_city(&city, center, now_ms()) {
        let result = ticket.fetch().await;
        filter.finish_fetch(ticket, result, now_ms())?;
    }
    if filter.renderer().num_drawn == 0 {
        info!("Try a wider --tolerance or a different --azimuth");
    }
    Ok(())
}
