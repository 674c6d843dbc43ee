//! # foresight-types
//!
//! Shared domain types for the foresight workspace: metric identity,
//! validated observation series, forecast outputs, and the error taxonomy
//! every other crate builds on.
//!
//! ## Invariants
//!
//! - A `MetricSeries` is never empty, holds only finite values, and its
//!   timestamps are strictly increasing. Violations are rejected at
//!   construction with `ForecastError::InvalidSeries`.
//! - Every `ForecastResult` satisfies
//!   `lower_bound <= point_estimate <= upper_bound` and
//!   `0.0 <= confidence <= 1.0`.

#![deny(unsafe_code)]

pub mod error;
pub mod forecast;
pub mod metric;

// ── Re-exports ──────────────────────────────────────────────────────────

pub use error::{ForecastError, ForesightResult};
pub use forecast::{ForecastResult, ModelSource, Trend};
pub use metric::{MetricName, MetricSeries, SeriesPoint};
