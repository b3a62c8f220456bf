pub mod cache;
pub mod error;

pub use error::{NominatimError, Result};

use std::time::{Duration, Instant};

use serde::Deserialize;
use tokio::sync::Mutex;
use tracing::{debug, info};

use cache::{cache_key, throttle_delay, GeocodeCache};

/// A resolved place.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

/// Minimum spacing between upstream calls, process-wide. Nominatim's
/// usage policy caps anonymous clients at one request per second.
const MIN_CALL_INTERVAL: Duration = Duration::from_secs(1);

/// Cached results live for a day; places don't move.
const CACHE_TTL: Duration = Duration::from_secs(24 * 60 * 60);

#[derive(Debug, Deserialize)]
struct SearchRow {
    #[serde(default)]
    lat: String,
    #[serde(default)]
    lon: String,
}

/// Geocoding client for OSM Nominatim. Owns its throttle and cache as
/// instance state: concurrent requests serialize on one upstream budget,
/// and repeated lookups for the same place stay in memory for a day.
pub struct NominatimClient {
    client: reqwest::Client,
    base_url: String,
    user_agent: String,
    state: Mutex<State>,
}

struct State {
    last_call: Option<Instant>,
    cache: GeocodeCache,
}

impl NominatimClient {
    pub fn new(base_url: &str, user_agent: &str) -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(Duration::from_secs(15))
                .build()
                .expect("Failed to build HTTP client"),
            base_url: base_url.to_string(),
            user_agent: user_agent.to_string(),
            state: Mutex::new(State {
                last_call: None,
                cache: GeocodeCache::new(CACHE_TTL),
            }),
        }
    }

    /// Resolve a free-text place name. `Ok(None)` means Nominatim doesn't
    /// know it. Results (including misses) are cached for a day.
    pub async fn geocode(&self, place: &str) -> Result<Option<Coordinates>> {
        let key = cache_key(place);

        let mut state = self.state.lock().await;
        if let Some(cached) = state.cache.get(&key) {
            debug!(place, "Geocode cache hit");
            return Ok(cached);
        }

        let wait = throttle_delay(state.last_call, MIN_CALL_INTERVAL);
        if !wait.is_zero() {
            tokio::time::sleep(wait).await;
        }

        let result = self.fetch(place).await;
        state.last_call = Some(Instant::now());

        let coords = result?;
        state.cache.insert(key, coords);
        info!(place, found = coords.is_some(), "Geocoded place");
        Ok(coords)
    }

    async fn fetch(&self, place: &str) -> Result<Option<Coordinates>> {
        let url = format!("{}/search", self.base_url);
        let resp = self
            .client
            .get(&url)
            .header("User-Agent", &self.user_agent)
            .query(&[("q", place), ("format", "json"), ("limit", "1")])
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(NominatimError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let rows: Vec<SearchRow> = resp.json().await?;
        let Some(row) = rows.into_iter().next() else {
            return Ok(None);
        };

        let lat = row
            .lat
            .parse::<f64>()
            .map_err(|e| NominatimError::Parse(format!("bad lat {:?}: {e}", row.lat)))?;
        let lng = row
            .lon
            .parse::<f64>()
            .map_err(|e| NominatimError::Parse(format!("bad lon {:?}: {e}", row.lon)))?;

        Ok(Some(Coordinates { lat, lng }))
    }
}
