//! Expiring geocode cache and call throttle. Both are plain instance
//! state owned by the client, so concurrent requests share one budget and
//! tests can construct their own with short horizons.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use crate::Coordinates;

/// In-memory geocode results keyed by case-normalized place string.
/// Negative lookups ("not found") are cached the same as hits.
pub struct GeocodeCache {
    ttl: Duration,
    entries: HashMap<String, CacheEntry>,
}

struct CacheEntry {
    coords: Option<Coordinates>,
    stored_at: Instant,
}

/// Normalize a place string into its cache key.
pub fn cache_key(place: &str) -> String {
    place.trim().to_lowercase()
}

impl GeocodeCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: HashMap::new(),
        }
    }

    /// Outer `None` = miss or expired; inner value is the cached geocode
    /// result, which may itself be "not found".
    pub fn get(&self, key: &str) -> Option<Option<Coordinates>> {
        let entry = self.entries.get(key)?;
        if entry.stored_at.elapsed() >= self.ttl {
            return None;
        }
        Some(entry.coords)
    }

    pub fn insert(&mut self, key: String, coords: Option<Coordinates>) {
        self.entries.insert(
            key,
            CacheEntry {
                coords,
                stored_at: Instant::now(),
            },
        );
    }
}

/// How long a caller must wait before the next upstream call, given when
/// the previous one happened.
pub fn throttle_delay(last_call: Option<Instant>, interval: Duration) -> Duration {
    match last_call {
        Some(last) => interval.saturating_sub(last.elapsed()),
        None => Duration::ZERO,
    }
}
