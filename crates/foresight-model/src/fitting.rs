//! Shared least-squares helpers used by both estimators.

use chrono::{DateTime, Utc};

pub(crate) const SECONDS_PER_DAY: f64 = 86_400.0;

/// Fractional days between `origin` and `t`.
pub(crate) fn day_offset(origin: DateTime<Utc>, t: DateTime<Utc>) -> f64 {
    t.signed_duration_since(origin).num_seconds() as f64 / SECONDS_PER_DAY
}

/// Arithmetic mean. Zero for an empty slice.
pub(crate) fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Ordinary least-squares line over `(x, y)` pairs, as `(intercept, slope)`.
///
/// Degenerate inputs (fewer than two points, no spread in x) fit a flat
/// line through the mean.
pub(crate) fn least_squares_line(points: &[(f64, f64)]) -> (f64, f64) {
    let n = points.len();
    if n < 2 {
        return (points.first().map(|(_, y)| *y).unwrap_or(0.0), 0.0);
    }
    let x_mean = points.iter().map(|(x, _)| x).sum::<f64>() / n as f64;
    let y_mean = points.iter().map(|(_, y)| y).sum::<f64>() / n as f64;
    let mut sxx = 0.0;
    let mut sxy = 0.0;
    for (x, y) in points {
        sxx += (x - x_mean) * (x - x_mean);
        sxy += (x - x_mean) * (y - y_mean);
    }
    if sxx <= f64::EPSILON {
        return (y_mean, 0.0);
    }
    let slope = sxy / sxx;
    (y_mean - slope * x_mean, slope)
}
