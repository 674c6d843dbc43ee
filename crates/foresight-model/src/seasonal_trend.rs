//! Primary estimator: least-squares trend plus an additive weekly shape.
//!
//! Fits an ordinary least-squares line over (days since first observation,
//! value), then, when the profile opts in and at least two full weeks of
//! data exist, estimates additive day-of-week offsets from the detrended
//! residuals. The spread of the fully detrended, deseasonalized residuals
//! feeds the prediction interval.

use chrono::{DateTime, Datelike, Utc};
use tracing::debug;

use foresight_types::{ForecastError, ForesightResult, MetricSeries};

use crate::estimator::{Estimator, FitDeadline, ForecastPath};
use crate::fitting::{day_offset, least_squares_line, mean};
use crate::profile::{GrowthPattern, MetricProfile};

/// Observations per seasonal period.
const DAYS_PER_WEEK: usize = 7;

/// Pseudo-count discounting confidence for small samples.
const SAMPLE_SIZE_PRIOR: f64 = 10.0;

#[derive(Clone, Debug)]
struct SeasonalTrendFit {
    intercept: f64,
    slope: f64,
    /// Additive offset per weekday, Monday-indexed. All zero when the
    /// profile opted out or fewer than two full weeks were available.
    weekday_offsets: [f64; DAYS_PER_WEEK],
    residual_std: f64,
    fit_quality: f64,
    observations: usize,
    /// Day offset of the last observation relative to the first.
    last_day: f64,
    /// Timestamp of the last observation; anchors future weekday lookups.
    last_timestamp: DateTime<Utc>,
}

/// Trend-plus-weekly-shape estimator. See the module docs for the fit
/// procedure.
#[derive(Clone, Debug, Default)]
pub struct SeasonalTrendEstimator {
    fit: Option<SeasonalTrendFit>,
}

impl SeasonalTrendEstimator {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Estimator for SeasonalTrendEstimator {
    fn fit(
        &mut self,
        series: &MetricSeries,
        profile: &MetricProfile,
        deadline: &FitDeadline,
    ) -> ForesightResult<()> {
        let n = series.len();
        if n < profile.min_observations {
            return Err(ForecastError::ModelTraining(format!(
                "{n} observations, need at least {}",
                profile.min_observations
            )));
        }
        deadline.checkpoint("trend fit")?;

        let first = series.first().timestamp;
        // (day offset, value, weekday) per observation.
        let obs: Vec<(f64, f64, usize)> = series
            .points()
            .iter()
            .map(|p| {
                let x = day_offset(first, p.timestamp);
                let weekday = p.timestamp.weekday().num_days_from_monday() as usize;
                (x, p.value, weekday)
            })
            .collect();

        let values = series.values();
        let (intercept, slope) = match profile.growth {
            GrowthPattern::Linear => {
                let xy: Vec<(f64, f64)> = obs.iter().map(|(x, y, _)| (*x, *y)).collect();
                least_squares_line(&xy)
            }
            GrowthPattern::Flat => (mean(&values), 0.0),
        };

        deadline.checkpoint("seasonal decomposition")?;

        // Weekday offsets from the detrended residuals, when opted in and at
        // least two full weeks are available.
        let mut weekday_offsets = [0.0; DAYS_PER_WEEK];
        if profile.weekly_seasonality && n >= 2 * DAYS_PER_WEEK {
            let mut sums = [0.0; DAYS_PER_WEEK];
            let mut counts = [0usize; DAYS_PER_WEEK];
            for &(x, y, weekday) in &obs {
                sums[weekday] += y - (intercept + slope * x);
                counts[weekday] += 1;
            }
            for weekday in 0..DAYS_PER_WEEK {
                if counts[weekday] > 0 {
                    weekday_offsets[weekday] = sums[weekday] / counts[weekday] as f64;
                }
            }
        }

        deadline.checkpoint("residual estimation")?;

        let mut sse = 0.0;
        for &(x, y, weekday) in &obs {
            let fitted = intercept + slope * x + weekday_offsets[weekday];
            sse += (y - fitted) * (y - fitted);
        }
        // Sample spread of the residuals.
        let residual_std = if n > 1 { (sse / (n - 1) as f64).sqrt() } else { 0.0 };

        let fit_quality = match profile.growth {
            GrowthPattern::Linear => {
                let y_mean = mean(&values);
                let sst: f64 = values.iter().map(|y| (y - y_mean) * (y - y_mean)).sum();
                // A constant series is a perfect fit, not an undefined one.
                if sst <= f64::EPSILON {
                    1.0
                } else {
                    (1.0 - sse / sst).clamp(0.0, 1.0)
                }
            }
            // R² against a level model is zero by construction, so judge a
            // flat fit by its dispersion relative to the metric's scale.
            GrowthPattern::Flat => {
                let scale = match (profile.floor, profile.ceiling) {
                    (Some(floor), Some(ceiling)) if ceiling > floor => ceiling - floor,
                    _ => intercept.abs().max(f64::EPSILON),
                };
                (1.0 - residual_std / scale).clamp(0.0, 1.0)
            }
        };

        let last = series.last();
        self.fit = Some(SeasonalTrendFit {
            intercept,
            slope,
            weekday_offsets,
            residual_std,
            fit_quality,
            observations: n,
            last_day: day_offset(first, last.timestamp),
            last_timestamp: last.timestamp,
        });
        debug!(slope, fit_quality, observations = n, "seasonal trend fit complete");
        Ok(())
    }

    fn forecast(&self, horizon_days: u32) -> ForesightResult<ForecastPath> {
        let fit = self.fit.as_ref().ok_or_else(|| {
            ForecastError::ModelRuntime("seasonal trend estimator has not been fitted".to_string())
        })?;
        let mut steps = Vec::with_capacity(horizon_days as usize);
        for day in 1..=i64::from(horizon_days) {
            let x = fit.last_day + day as f64;
            let weekday = (fit.last_timestamp + chrono::Duration::days(day))
                .weekday()
                .num_days_from_monday() as usize;
            steps.push(fit.intercept + fit.slope * x + fit.weekday_offsets[weekday]);
        }
        Ok(ForecastPath { steps, residual_std: fit.residual_std })
    }

    fn fit_confidence(&self) -> f64 {
        match &self.fit {
            Some(fit) => {
                let n = fit.observations as f64;
                (fit.fit_quality * n / (n + SAMPLE_SIZE_PRIOR)).clamp(0.0, 1.0)
            }
            None => 0.0,
        }
    }

    fn name(&self) -> &'static str {
        "seasonal_trend"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::TimeZone;
    use std::time::Duration;

    // 2026-01-05 is a Monday.
    fn daily_series(values: &[f64]) -> MetricSeries {
        let start = Utc.with_ymd_and_hms(2026, 1, 5, 0, 0, 0).unwrap();
        MetricSeries::from_daily_values(start, values).unwrap()
    }

    #[test]
    fn refuses_short_series() {
        let series = daily_series(&[1.0, 2.0, 3.0]);
        let mut estimator = SeasonalTrendEstimator::new();
        let err = estimator
            .fit(&series, &MetricProfile::default(), &FitDeadline::unlimited())
            .unwrap_err();
        assert!(matches!(err, ForecastError::ModelTraining(_)));
    }

    #[test]
    fn recovers_linear_ramp() {
        let values: Vec<f64> = (0..30).map(|d| 10.0 + 0.5 * d as f64).collect();
        let series = daily_series(&values);
        let mut estimator = SeasonalTrendEstimator::new();
        estimator
            .fit(&series, &MetricProfile::default(), &FitDeadline::unlimited())
            .unwrap();

        let path = estimator.forecast(7).unwrap();
        assert_eq!(path.steps.len(), 7);
        // Last observation is 24.5, so day 7 lands at 28.0.
        assert!((path.endpoint() - 28.0).abs() < 1e-6);
        assert!(path.residual_std < 1e-6);
        assert!(estimator.fit_confidence() > 0.7);
    }

    #[test]
    fn captures_weekend_shape() {
        // Four full weeks: weekdays at 10, weekends at 17.
        let values: Vec<f64> = (0..28)
            .map(|d| if d % 7 >= 5 { 17.0 } else { 10.0 })
            .collect();
        let series = daily_series(&values);
        let mut estimator = SeasonalTrendEstimator::new();
        estimator
            .fit(&series, &MetricProfile::daily_agent_load(), &FitDeadline::unlimited())
            .unwrap();

        // Last observation is a Sunday; step 1 is Monday, step 6 is
        // Saturday. The trend line tilts through the repeating pattern, but
        // the weekday offsets compensate: the projected weekend lift over
        // Monday is the full 7.0.
        let path = estimator.forecast(6).unwrap();
        assert!((path.steps[5] - path.steps[0] - 7.0).abs() < 1e-6);
        assert!(path.steps[4] < path.steps[5]);
    }

    #[test]
    fn seasonality_needs_two_weeks() {
        // One week only: offsets stay zero even with the flag set.
        let values: Vec<f64> = (0..14).map(|d| if d % 7 >= 5 { 17.0 } else { 10.0 }).collect();
        let short = daily_series(&values[..7]);
        let mut estimator = SeasonalTrendEstimator::new();
        let mut profile = MetricProfile::daily_agent_load();
        profile.min_observations = 7;
        estimator.fit(&short, &profile, &FitDeadline::unlimited()).unwrap();
        let path = estimator.forecast(7).unwrap();
        // Without offsets the projection is a plain line, so consecutive
        // steps move by a constant amount.
        let d1 = path.steps[1] - path.steps[0];
        let d2 = path.steps[2] - path.steps[1];
        assert!((d1 - d2).abs() < 1e-9);
    }

    #[test]
    fn flat_growth_pins_slope() {
        let values: Vec<f64> = (0..20).map(|d| 0.4 + 0.01 * d as f64).collect();
        let series = daily_series(&values);
        let mut estimator = SeasonalTrendEstimator::new();
        estimator
            .fit(&series, &MetricProfile::probability(), &FitDeadline::unlimited())
            .unwrap();
        let path = estimator.forecast(10).unwrap();
        // Level reversion: every step sits at the series mean.
        let expected = 0.4 + 0.01 * 9.5;
        for step in &path.steps {
            assert!((step - expected).abs() < 1e-9);
        }
    }

    #[test]
    fn flat_fit_confidence_tracks_dispersion() {
        // Mild wiggle around 0.55 on a unit-interval metric: the level
        // model explains the series well.
        let mild: Vec<f64> = (0..30)
            .map(|d| 0.55 + 0.03 * ((d % 5) as f64 - 2.0) / 2.0)
            .collect();
        let mut estimator = SeasonalTrendEstimator::new();
        estimator
            .fit(&daily_series(&mild), &MetricProfile::probability(), &FitDeadline::unlimited())
            .unwrap();
        assert!(estimator.fit_confidence() > 0.6);

        // Swings across the whole unit interval gut the confidence.
        let wild: Vec<f64> = (0..30).map(|d| if d % 2 == 0 { 0.05 } else { 0.95 }).collect();
        let mut estimator = SeasonalTrendEstimator::new();
        estimator
            .fit(&daily_series(&wild), &MetricProfile::probability(), &FitDeadline::unlimited())
            .unwrap();
        assert!(estimator.fit_confidence() < 0.5);
    }

    #[test]
    fn constant_series_is_perfect_fit() {
        let series = daily_series(&[12.0; 21]);
        let mut estimator = SeasonalTrendEstimator::new();
        estimator
            .fit(&series, &MetricProfile::default(), &FitDeadline::unlimited())
            .unwrap();
        // r² = 1, so confidence is the pure sample-size factor.
        assert!((estimator.fit_confidence() - 21.0 / 31.0).abs() < 1e-9);
    }

    #[test]
    fn exhausted_deadline_aborts_fit() {
        let values: Vec<f64> = (0..30).map(|d| d as f64).collect();
        let series = daily_series(&values);
        let mut estimator = SeasonalTrendEstimator::new();
        let err = estimator
            .fit(&series, &MetricProfile::default(), &FitDeadline::new(Duration::ZERO))
            .unwrap_err();
        assert!(matches!(err, ForecastError::ModelTraining(_)));
    }

    #[test]
    fn forecast_before_fit_is_runtime_error() {
        let estimator = SeasonalTrendEstimator::new();
        let err = estimator.forecast(7).unwrap_err();
        assert!(matches!(err, ForecastError::ModelRuntime(_)));
        assert_eq!(estimator.fit_confidence(), 0.0);
    }
}
