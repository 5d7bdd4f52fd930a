use anyhow::Result;
use chrono::Datelike;

use road_filter::lookup::{BackendClient, SunAnglesRequest, TimeOfDay};

pub async fn sun_angle(
    backend: String,
    city: String,
    year: Option<i32>,
    time_of_day: TimeOfDay,
    day: Option<usize>,
) -> Result<()> {
    let today = chrono::Local::now();
    let year = year.unwrap_or_else(|| today.year());
    let day = match day {
        Some(0) => bail!("--day counts from 1"),
        Some(day) => day - 1,
        None => today.ordinal0() as usize,
    };

    let client = BackendClient::new(backend);
    let resp = client
        .lookup_sun_angles(&SunAnglesRequest {
            address: city,
            year,
            time_of_day,
        })
        .await?;
    let azimuth = match resp.azimuth_for_day(day) {
        Some(azimuth) => azimuth,
        None => bail!(
            "the backend only returned {} days for {}, not day {}",
            resp.sun_angles.len(),
            year,
            day + 1
        ),
    };

    println!("{}", resp.address);
    println!("{}", resp.coordinates.to_lonlat());
    println!("Azimuth on day {} of {}: {}°", day + 1, year, azimuth);
    Ok(())
}

pub async fn address(backend: String, address: String) -> Result<()> {
    let resp = BackendClient::new(backend).lookup_address(&address).await?;
    println!("{}", resp.address);
    println!("{}", resp.coordinates.to_lonlat());
    match resp.road_bearing {
        Some(bearing) => println!("Road bearing: {}°", bearing),
        None => warn!("The backend doesn't know which road {} is on", resp.address),
    }
    Ok(())
}
