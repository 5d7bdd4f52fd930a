//! A client for the henge finder backend, which geocodes addresses and works out where the sun
//! sets or rises over the year. Only the fields used here are modeled; anything else in a
//! response is ignored.

use anyhow::Result;
use serde::{Deserialize, Serialize};

use geom::LonLat;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeOfDay {
    Sunrise,
    Sunset,
}

impl std::str::FromStr for TimeOfDay {
    type Err = anyhow::Error;

    fn from_str(x: &str) -> Result<TimeOfDay> {
        match x {
            "sunrise" => Ok(TimeOfDay::Sunrise),
            "sunset" => Ok(TimeOfDay::Sunset),
            _ => bail!("time of day must be sunrise or sunset, not {}", x),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinates {
    pub fn to_lonlat(self) -> LonLat {
        LonLat::new(self.lon, self.lat)
    }
}

#[derive(Serialize)]
pub struct SunAnglesRequest {
    pub address: String,
    pub year: i32,
    pub time_of_day: TimeOfDay,
}

#[derive(Clone, Debug, Deserialize)]
pub struct SunAngle {
    /// Degrees clockwise from north
    pub azimuth: f64,
    #[serde(default)]
    pub altitude: Option<f64>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct SunAnglesResponse {
    pub address: String,
    pub coordinates: Coordinates,
    /// One entry per day of the year, starting on January 1
    pub sun_angles: Vec<SunAngle>,
}

impl SunAnglesResponse {
    /// `day` counts from 0 for January 1.
    pub fn azimuth_for_day(&self, day: usize) -> Option<f64> {
        self.sun_angles.get(day).map(|a| a.azimuth)
    }
}

#[derive(Serialize)]
struct AddressRequest<'a> {
    address: &'a str,
}

#[derive(Clone, Debug, Deserialize)]
pub struct AddressResponse {
    /// The standardized address
    pub address: String,
    pub coordinates: Coordinates,
    #[serde(default)]
    pub road_bearing: Option<f64>,
}

pub struct BackendClient {
    base_url: String,
}

impl BackendClient {
    pub fn new<I: Into<String>>(base_url: I) -> BackendClient {
        BackendClient {
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}/{}", self.base_url, endpoint)
    }

    /// The sun's position at sunset or sunrise for every day of `year`, seen from `address`.
    pub async fn lookup_sun_angles(&self, req: &SunAnglesRequest) -> Result<SunAnglesResponse> {
        info!("Looking up sun angles for {}", req.address);
        hengeio::post_json(self.url("lookup_sun_angles"), req).await
    }

    /// Geocodes an address, along with the bearing of the road it's on.
    pub async fn lookup_address(&self, address: &str) -> Result<AddressResponse> {
        info!("Looking up {}", address);
        hengeio::post_json(self.url("lookup_address"), &AddressRequest { address }).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_sun_angles() {
        let resp: SunAnglesResponse = serde_json::from_str(
            r#"{
                "address": "Austin, TX, USA",
                "coordinates": {"lat": 30.2672, "lon": -97.7431},
                "sun_angles": [
                    {"azimuth": 242.1, "altitude": 0.5, "date": "2025-01-01"},
                    {"azimuth": 242.3}
                ],
                "timezone": "America/Chicago"
            }"#,
        )
        .unwrap();
        assert_eq!(resp.coordinates.to_lonlat(), LonLat::new(-97.7431, 30.2672));
        assert_eq!(resp.azimuth_for_day(1), Some(242.3));
        assert_eq!(resp.azimuth_for_day(365), None);
        assert_eq!(resp.sun_angles[0].altitude, Some(0.5));
    }

    #[test]
    fn requests() {
        let req = SunAnglesRequest {
            address: "Austin".to_string(),
            year: 2026,
            time_of_day: "sunset".parse().unwrap(),
        };
        assert_eq!(
            serde_json::to_string(&req).unwrap(),
            r#"{"address":"Austin","year":2026,"time_of_day":"sunset"}"#
        );
        assert!("noon".parse::<TimeOfDay>().is_err());

        let client = BackendClient::new("http://localhost:8080/");
        assert_eq!(
            client.url("lookup_address"),
            "http://localhost:8080/lookup_address"
        );
    }
}
