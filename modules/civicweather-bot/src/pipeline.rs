use std::sync::Arc;

use civicweather_common::{Observation, ObservationWindows, WINDOW_HOURS};
use civicweather_forecast::{compute_metrics, synthesize, SynthesizerOptions};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{info, warn};

use crate::traits::{PlaceResolver, SignalSearch};

/// Longest place string accepted into a search query.
const PLACE_MAX_CHARS: usize = 80;

pub enum ForecastOutcome {
    Report(String),
    /// The resolver answered and doesn't know the place.
    UnknownPlace,
}

/// Per-request forecast flow: validate place, gather windows, score,
/// synthesize. Collaborators come in behind trait seams.
pub struct ForecastPipeline {
    search: Arc<dyn SignalSearch>,
    resolver: Option<Arc<dyn PlaceResolver>>,
    options: SynthesizerOptions,
}

impl ForecastPipeline {
    pub fn new(search: Arc<dyn SignalSearch>, resolver: Option<Arc<dyn PlaceResolver>>) -> Self {
        Self {
            search,
            resolver,
            options: SynthesizerOptions::default(),
        }
    }

    /// Produce a report for an already-sanitized, non-empty place.
    ///
    /// Collaborator failures degrade rather than propagate: a failed
    /// geocode skips validation, a failed window becomes an empty window.
    /// The worst case is a low-confidence but well-formed report.
    pub async fn forecast(&self, place: &str) -> ForecastOutcome {
        if let Some(resolver) = &self.resolver {
            match resolver.resolve(place).await {
                Ok(Some(_)) => {}
                Ok(None) => return ForecastOutcome::UnknownPlace,
                Err(e) => {
                    warn!(place, error = %e, "Place resolution failed, skipping validation");
                }
            }
        }

        let mut windows = ObservationWindows::new();
        for hours in WINDOW_HOURS {
            match self.search.observations(place, hours).await {
                Ok(observations) => windows.insert(hours, observations),
                Err(e) => {
                    warn!(place, hours, error = %e, "Signal search failed, window treated as empty");
                    windows.insert(hours, Vec::new());
                }
            }
        }

        let metrics = compute_metrics(&windows);
        info!(
            place,
            count_24h = metrics.count_24h,
            count_7d = metrics.count_7d,
            temperature = metrics.temperature,
            "Scored place"
        );

        // Most recent mid-window items back the report as evidence.
        let mut representative: Vec<Observation> = windows.get(WINDOW_HOURS[1]).to_vec();
        representative.sort_by(|a, b| b.observed_at.cmp(&a.observed_at));

        let mut rng = StdRng::from_os_rng();
        let report = synthesize(place, &metrics, &representative, &self.options, &mut rng);
        ForecastOutcome::Report(report)
    }
}

/// Collapse runs of whitespace and cap the length before the place string
/// goes anywhere near a query.
pub fn sanitize_place(raw: &str) -> String {
    raw.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .chars()
        .take(PLACE_MAX_CHARS)
        .collect()
}
