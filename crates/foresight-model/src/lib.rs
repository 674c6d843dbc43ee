//! # foresight-model
//!
//! Per-metric forecasting: a seasonal-trend primary estimator, a
//! moving-average fallback with capped confidence, and the train/predict
//! orchestration that steps down from one to the other.
//!
//! ```text
//!   MetricSeries ──► TimeSeriesModel::train
//!                        │  primary: SeasonalTrendEstimator (deadline-bounded)
//!                        │      └─ on failure ──► fallback: MovingAverageEstimator
//!                        ▼
//!                    TimeSeriesModel::predict ──► ForecastResult
//! ```
//!
//! Estimators are pluggable through the [`Estimator`] trait; the model only
//! cares that something fitted can project a path and report how much it
//! trusts itself.

#![deny(unsafe_code)]

pub mod estimator;
pub mod model;
pub mod moving_average;
pub mod profile;
pub mod seasonal_trend;

mod fitting;

/// Fewest observations the primary estimator will fit.
pub const MIN_OBSERVATIONS: usize = 14;

/// Relative movement within which a projected change counts as stable.
pub const DEFAULT_TREND_TOLERANCE: f64 = 0.02;

/// Wall-clock training budget for the primary estimator, in seconds.
pub const DEFAULT_TRAINING_BUDGET_SECS: u64 = 5;

/// Trailing observations the fallback estimator works from.
pub const FALLBACK_WINDOW: usize = 7;

/// Ceiling on fallback confidence, applied after every other adjustment.
pub const FALLBACK_CONFIDENCE_CEILING: f64 = 0.70;

pub use estimator::{Estimator, FitDeadline, ForecastPath};
pub use model::TimeSeriesModel;
pub use moving_average::MovingAverageEstimator;
pub use profile::{GrowthPattern, MetricProfile};
pub use seasonal_trend::SeasonalTrendEstimator;
