//! Signal scoring: raw observation counts per window → normalized metrics.
//!
//! Multi-window model over [24h, 72h, 168h]. No randomness, no I/O.
//!
//! Formula:
//!   precipitation = 1 - e^(-(count_72h + 0.5·count_24h) / 6)
//!   wind          = 1 / (1 + e^(-2.2·(r - 1))),  r = (count_24h + 1) / (max(1, count_7d) + 1)
//!   pressure      = 1 - e^(-distinct_origins_7d / 4)
//!   temperature   = 0.55·precipitation + 0.30·wind + 0.15·pressure
//!   confidence    = 1 - e^(-count_7d / 8)

use civicweather_common::{MetricSet, ObservationWindows, WINDOW_HOURS};
use tracing::debug;

use crate::shaping::{clamp01, logistic, saturate};

/// Weight applied to the 24h count on top of the 72h count before the
/// precipitation saturation. Recent mentions count one-and-a-half times.
pub const PRECIP_RECENT_WEIGHT: f64 = 0.5;
/// Precipitation saturation scale.
pub const PRECIP_SCALE: f64 = 6.0;
/// Logistic steepness for the spike ratio, centered on ratio 1.0 so a
/// short window matching the weekly rate scores exactly 0.5.
pub const WIND_STEEPNESS: f64 = 2.2;
/// Diversity saturation scale. Smaller than PRECIP_SCALE: a handful of
/// distinct origins already says a lot.
pub const DIVERSITY_SCALE: f64 = 4.0;
/// Confidence saturation scale over the weekly count.
pub const CONFIDENCE_SCALE: f64 = 8.0;

/// Temperature composite weights. Must sum to 1.0.
pub const TEMP_WEIGHT_PRECIP: f64 = 0.55;
pub const TEMP_WEIGHT_WIND: f64 = 0.30;
pub const TEMP_WEIGHT_PRESSURE: f64 = 0.15;

/// Score an observation window set into normalized metrics.
pub fn compute_metrics(windows: &ObservationWindows) -> MetricSet {
    let [short, mid, long] = WINDOW_HOURS;
    let count_24h = windows.count(short);
    let count_72h = windows.count(mid);
    let count_7d = windows.count(long);

    let precip_raw = count_72h as f64 + PRECIP_RECENT_WEIGHT * count_24h as f64;
    let precipitation = saturate(precip_raw, PRECIP_SCALE);

    // Short-window spike relative to the weekly baseline. Baseline floored
    // at 1 so an empty week can't divide by zero.
    let baseline = count_7d.max(1);
    let ratio = (count_24h as f64 + 1.0) / (baseline as f64 + 1.0);
    let wind = clamp01(logistic(WIND_STEEPNESS * (ratio - 1.0)));

    let diversity = windows.distinct_origins(long);
    let pressure = saturate(diversity as f64, DIVERSITY_SCALE);

    // Convex combination of already-clamped inputs; clamp again anyway.
    let temperature = clamp01(
        TEMP_WEIGHT_PRECIP * precipitation
            + TEMP_WEIGHT_WIND * wind
            + TEMP_WEIGHT_PRESSURE * pressure,
    );

    let confidence = saturate(count_7d as f64, CONFIDENCE_SCALE);

    debug!(
        count_24h,
        count_72h,
        count_7d,
        diversity,
        precipitation,
        wind,
        pressure,
        temperature,
        confidence,
        "Scored observation windows"
    );

    MetricSet {
        precipitation,
        wind,
        pressure,
        temperature,
        confidence,
        count_24h,
        count_72h,
        count_7d,
    }
}
