//! Forecast output types shared across the workspace.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::metric::MetricName;

// ── Trend ───────────────────────────────────────────────────────────────

/// Direction of projected movement relative to the latest observation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    Increasing,
    Decreasing,
    Stable,
}

impl std::fmt::Display for Trend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Trend::Increasing => write!(f, "increasing"),
            Trend::Decreasing => write!(f, "decreasing"),
            Trend::Stable => write!(f, "stable"),
        }
    }
}

// ── Model Source ────────────────────────────────────────────────────────

/// Which path produced a forecast.
///
/// `Cached` marks a stale cache entry served after a recompute failed; a
/// fresh cache hit returns the stored result unchanged, keeping the source
/// that originally computed it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelSource {
    Primary,
    Fallback,
    Cached,
}

impl std::fmt::Display for ModelSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ModelSource::Primary => write!(f, "primary"),
            ModelSource::Fallback => write!(f, "fallback"),
            ModelSource::Cached => write!(f, "cached"),
        }
    }
}

// ── Forecast Result ─────────────────────────────────────────────────────

/// A single-horizon forecast for one metric.
///
/// Always satisfies `lower_bound <= point_estimate <= upper_bound` and
/// `0.0 <= confidence <= 1.0`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ForecastResult {
    /// Metric this forecast is for.
    pub metric: MetricName,
    /// How many days ahead the estimate targets.
    pub horizon_days: u32,
    /// Central estimate at the horizon.
    pub point_estimate: f64,
    /// Lower edge of the prediction interval.
    pub lower_bound: f64,
    /// Upper edge of the prediction interval.
    pub upper_bound: f64,
    /// Model self-assessed confidence in `0.0..=1.0`.
    pub confidence: f64,
    /// Direction of projected movement.
    pub trend: Trend,
    /// Which path produced this forecast.
    pub model_used: ModelSource,
    /// When the forecast was computed.
    pub computed_at: DateTime<Utc>,
}

impl ForecastResult {
    /// Width of the prediction interval.
    pub fn interval_width(&self) -> f64 {
        self.upper_bound - self.lower_bound
    }
}
