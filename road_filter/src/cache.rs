use std::time::Duration;

use serde::{Deserialize, Serialize};

use hengeio::KeyValueStore;

use crate::StreetRecord;

pub const CACHE_KEY_PREFIX: &str = "henge_streets_";

/// Where a city's streets live in the key-value store. Anything besides ASCII letters and digits
/// becomes an underscore, so "Austin, TX" is stored under `henge_streets_Austin__TX`.
pub fn cache_key(city: &str) -> String {
    let sanitized: String = city
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    format!("{}{}", CACHE_KEY_PREFIX, sanitized)
}

/// Milliseconds since the Unix epoch, the clock cache timestamps are written in.
pub fn now_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// One city's streets, as stored.
#[derive(Serialize, Deserialize)]
pub struct CachedStreets {
    pub streets: Vec<StreetRecord>,
    /// When the streets were fetched, in epoch milliseconds
    pub timestamp: i64,
}

#[derive(Serialize)]
struct CachedStreetsRef<'a> {
    streets: &'a [StreetRecord],
    timestamp: i64,
}

/// Remembers each city's streets in a key-value store, so revisiting a city doesn't hit Overpass
/// again. The cache is best-effort: any problem reading or writing is logged and otherwise
/// treated as a miss.
pub struct StreetCache<S: KeyValueStore> {
    store: S,
    ttl_ms: i64,
}

impl<S: KeyValueStore> StreetCache<S> {
    pub fn new(store: S, ttl: Duration) -> StreetCache<S> {
        StreetCache {
            store,
            ttl_ms: i64::try_from(ttl.as_millis()).unwrap_or(i64::MAX),
        }
    }

    /// The city's streets, unless they're missing, unreadable, or at least `ttl` old.
    pub fn get(&self, city: &str, now_ms: i64) -> Option<Vec<StreetRecord>> {
        let key = cache_key(city);
        let raw = match self.store.get_item(&key) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                return None;
            }
            Err(err) => {
                warn!("Error reading cached streets for {}: {:#}", city, err);
                return None;
            }
        };
        let cached: CachedStreets = match serde_json::from_str(&raw) {
            Ok(cached) => cached,
            Err(err) => {
                warn!("Error parsing cached streets for {}: {}", city, err);
                return None;
            }
        };

        let age = match now_ms.checked_sub(cached.timestamp) {
            Some(age) => age,
            None => {
                warn!(
                    "Cached streets for {} have a bogus timestamp {}",
                    city, cached.timestamp
                );
                return None;
            }
        };
        if age >= self.ttl_ms {
            debug!("Cached streets for {} are {}ms old, ignoring", city, age);
            return None;
        }
        Some(cached.streets)
    }

    /// Replaces whatever was stored for the city.
    pub fn put(&mut self, city: &str, streets: &[StreetRecord], now_ms: i64) {
        let key = cache_key(city);
        let value = match serde_json::to_string(&CachedStreetsRef {
            streets,
            timestamp: now_ms,
        }) {
            Ok(value) => value,
            Err(err) => {
                warn!("Error serializing streets for {}: {}", city, err);
                return;
            }
        };
        if let Err(err) = self.store.set_item(&key, &value) {
            warn!("Error caching streets for {}: {:#}", city, err);
        }
    }

    pub fn remove(&mut self, city: &str) {
        if let Err(err) = self.store.remove_item(&cache_key(city)) {
            warn!("Error removing cached streets for {}: {:#}", city, err);
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }
}
