//! Degradation behavior of the forecast pipeline, exercised with
//! in-memory collaborator stubs: no network, no live APIs.

use std::sync::Arc;

use anyhow::{bail, Result};
use async_trait::async_trait;
use chrono::Utc;
use civicweather_bot::pipeline::{ForecastOutcome, ForecastPipeline};
use civicweather_bot::traits::{PlaceResolver, SignalSearch};
use civicweather_common::Observation;

struct StubSearch {
    fail_hours: Option<u32>,
    per_window: usize,
}

#[async_trait]
impl SignalSearch for StubSearch {
    async fn observations(&self, _place: &str, hours_back: u32) -> Result<Vec<Observation>> {
        if self.fail_hours == Some(hours_back) {
            bail!("search backend unreachable");
        }
        Ok((0..self.per_window)
            .map(|i| Observation {
                headline: format!("March planned near the station {i}"),
                locator: format!("https://example.org/{hours_back}/{i}"),
                observed_at: Utc::now(),
                origin_tag: Some("EE".to_string()),
            })
            .collect())
    }
}

struct StubResolver {
    known: bool,
    fail: bool,
}

#[async_trait]
impl PlaceResolver for StubResolver {
    async fn resolve(&self, _place: &str) -> Result<Option<(f64, f64)>> {
        if self.fail {
            bail!("geocoder down");
        }
        Ok(self.known.then_some((59.437, 24.7536)))
    }
}

#[tokio::test]
async fn one_failed_window_still_reports() {
    let pipeline = ForecastPipeline::new(
        Arc::new(StubSearch {
            fail_hours: Some(24),
            per_window: 4,
        }),
        None,
    );

    match pipeline.forecast("Tallinn").await {
        ForecastOutcome::Report(report) => {
            assert!(report.contains("Tallinn"));
            assert!(!report.trim().is_empty());
        }
        ForecastOutcome::UnknownPlace => panic!("no resolver was configured"),
    }
}

#[tokio::test]
async fn every_window_failing_still_reports() {
    // fail_hours can only name one window, so use a search that always errors.
    struct AlwaysDown;

    #[async_trait]
    impl SignalSearch for AlwaysDown {
        async fn observations(&self, _place: &str, _hours_back: u32) -> Result<Vec<Observation>> {
            bail!("search backend unreachable")
        }
    }

    let pipeline = ForecastPipeline::new(Arc::new(AlwaysDown), None);
    match pipeline.forecast("Narva").await {
        ForecastOutcome::Report(report) => assert!(report.contains("Narva")),
        ForecastOutcome::UnknownPlace => panic!("no resolver was configured"),
    }
}

#[tokio::test]
async fn unknown_place_short_circuits() {
    let pipeline = ForecastPipeline::new(
        Arc::new(StubSearch {
            fail_hours: None,
            per_window: 2,
        }),
        Some(Arc::new(StubResolver {
            known: false,
            fail: false,
        })),
    );

    assert!(matches!(
        pipeline.forecast("Atlantis").await,
        ForecastOutcome::UnknownPlace
    ));
}

#[tokio::test]
async fn resolver_failure_skips_validation_and_reports() {
    let pipeline = ForecastPipeline::new(
        Arc::new(StubSearch {
            fail_hours: None,
            per_window: 2,
        }),
        Some(Arc::new(StubResolver {
            known: false,
            fail: true,
        })),
    );

    match pipeline.forecast("Tartu").await {
        ForecastOutcome::Report(report) => assert!(report.contains("Tartu")),
        ForecastOutcome::UnknownPlace => panic!("resolver failure must not reject the place"),
    }
}
