//! Per-metric forecasting configuration.
//!
//! A [`MetricProfile`] captures what the model should assume about a
//! metric: growth shape, weekly seasonality, the bounds of its domain, and
//! how much data and time training may consume. Profiles are static
//! configuration, not learned state.

use std::time::Duration;

use serde::{Deserialize, Serialize};

// ── Growth shape ────────────────────────────────────────────────────────

/// Long-run growth shape the trend component assumes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GrowthPattern {
    /// Value drifts along a fitted linear trend.
    Linear,
    /// Value reverts to a fitted level; the trend slope is pinned to zero.
    Flat,
}

// ── Profile ─────────────────────────────────────────────────────────────

/// Static per-metric configuration consumed by estimators and the model.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MetricProfile {
    /// Growth shape for the primary trend fit.
    pub growth: GrowthPattern,
    /// Whether to estimate additive day-of-week offsets.
    pub weekly_seasonality: bool,
    /// Minimum observations the primary estimator requires.
    pub min_observations: usize,
    /// Relative band within which a projected move counts as stable.
    pub trend_tolerance: f64,
    /// Wall-clock budget for fitting the primary estimator.
    pub training_budget: Duration,
    /// Smallest value the metric can take, if bounded below.
    pub floor: Option<f64>,
    /// Largest value the metric can take, if bounded above.
    pub ceiling: Option<f64>,
}

impl Default for MetricProfile {
    fn default() -> Self {
        Self {
            growth: GrowthPattern::Linear,
            weekly_seasonality: false,
            min_observations: crate::MIN_OBSERVATIONS,
            trend_tolerance: crate::DEFAULT_TREND_TOLERANCE,
            training_budget: Duration::from_secs(crate::DEFAULT_TRAINING_BUDGET_SECS),
            floor: None,
            ceiling: None,
        }
    }
}

impl MetricProfile {
    /// Profile for daily agent load: linear growth with a weekly shape,
    /// bounded below by zero.
    pub fn daily_agent_load() -> Self {
        Self {
            growth: GrowthPattern::Linear,
            weekly_seasonality: true,
            floor: Some(0.0),
            ..Self::default()
        }
    }

    /// Profile for probability-like metrics (escalation likelihood, delay
    /// risk): level-reverting and confined to `[0, 1]`.
    pub fn probability() -> Self {
        Self {
            growth: GrowthPattern::Flat,
            weekly_seasonality: false,
            floor: Some(0.0),
            ceiling: Some(1.0),
            ..Self::default()
        }
    }

    /// Clamp a value into the profile's domain.
    pub fn clamp(&self, value: f64) -> f64 {
        let mut v = value;
        if let Some(floor) = self.floor {
            v = v.max(floor);
        }
        if let Some(ceiling) = self.ceiling {
            v = v.min(ceiling);
        }
        v
    }
}
