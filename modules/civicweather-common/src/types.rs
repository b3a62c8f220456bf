use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lookback windows, in hours, over which observations are gathered.
/// Ordered shortest to longest: 1 day, 3 days, 7 days.
pub const WINDOW_HOURS: [u32; 3] = [24, 72, 168];

/// One public-signal mention: a news article or announcement matching the
/// topic query for a place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    /// Article or announcement title. Never empty.
    pub headline: String,
    /// Canonical link to the item. Never empty.
    pub locator: String,
    /// When the item was seen, UTC. Unparseable upstream timestamps fall
    /// back to fetch time.
    pub observed_at: DateTime<Utc>,
    /// Source country code when the provider knows it.
    pub origin_tag: Option<String>,
}

/// Observations grouped by lookback window. Windows are scored
/// independently; a missing window behaves as empty, and nesting is never
/// cross-validated (an inconsistent upstream fetch degrades, it doesn't
/// crash).
#[derive(Debug, Clone, Default)]
pub struct ObservationWindows {
    windows: BTreeMap<u32, Vec<Observation>>,
}

impl ObservationWindows {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, hours: u32, observations: Vec<Observation>) {
        self.windows.insert(hours, observations);
    }

    /// Observations in a window, empty slice if the window is absent.
    pub fn get(&self, hours: u32) -> &[Observation] {
        self.windows.get(&hours).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn count(&self, hours: u32) -> u64 {
        self.get(hours).len() as u64
    }

    /// Distinct non-empty origin tags in a window. Absent tags are
    /// "unknown" and never counted.
    pub fn distinct_origins(&self, hours: u32) -> u64 {
        let mut tags: Vec<&str> = self
            .get(hours)
            .iter()
            .filter_map(|o| o.origin_tag.as_deref())
            .filter(|t| !t.is_empty())
            .collect();
        tags.sort_unstable();
        tags.dedup();
        tags.len() as u64
    }
}

/// Normalized signal metrics. Every bounded field is clamped to [0, 1];
/// the raw per-window counts ride along for transparency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricSet {
    /// Saturating volume of recent mentions.
    pub precipitation: f64,
    /// Short-window spike relative to the 7-day baseline rate.
    pub wind: f64,
    /// Diversity of source origins over 7 days.
    pub pressure: f64,
    /// Fixed convex combination of the above.
    pub temperature: f64,
    /// How much observation volume backs the other metrics.
    pub confidence: f64,
    pub count_24h: u64,
    pub count_72h: u64,
    pub count_7d: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn obs(tag: Option<&str>) -> Observation {
        Observation {
            headline: "March announced downtown".to_string(),
            locator: "https://example.com/a".to_string(),
            observed_at: Utc::now(),
            origin_tag: tag.map(str::to_string),
        }
    }

    #[test]
    fn missing_window_is_empty() {
        let windows = ObservationWindows::new();
        assert_eq!(windows.count(24), 0);
        assert!(windows.get(168).is_empty());
    }

    #[test]
    fn distinct_origins_skips_unknown_and_empty() {
        let mut windows = ObservationWindows::new();
        windows.insert(
            168,
            vec![
                obs(Some("EE")),
                obs(Some("EE")),
                obs(Some("FI")),
                obs(Some("")),
                obs(None),
            ],
        );
        assert_eq!(windows.distinct_origins(168), 2);
    }
}
