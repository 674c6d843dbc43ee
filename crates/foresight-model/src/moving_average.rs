//! Fallback estimator: trailing-window mean plus a local linear drift.
//!
//! Any validated series fits, however short. Confidence grows with how
//! full the window is and never exceeds
//! [`crate::FALLBACK_CONFIDENCE_CEILING`], which keeps degraded forecasts
//! distinguishable from healthy ones downstream.

use foresight_types::{ForecastError, ForesightResult, MetricSeries};

use crate::estimator::{Estimator, FitDeadline, ForecastPath};
use crate::fitting::{day_offset, least_squares_line};
use crate::profile::{GrowthPattern, MetricProfile};

/// Pseudo-count governing how quickly confidence grows with window fill.
const WINDOW_FILL_PRIOR: f64 = 3.0;

#[derive(Clone, Debug)]
struct MovingAverageFit {
    intercept: f64,
    slope: f64,
    residual_std: f64,
    window_len: usize,
    /// Day offset of the last observation relative to the window start.
    last_day: f64,
}

/// Trailing-window estimator. See the module docs.
#[derive(Clone, Debug)]
pub struct MovingAverageEstimator {
    window: usize,
    fit: Option<MovingAverageFit>,
}

impl MovingAverageEstimator {
    pub fn new(window: usize) -> Self {
        Self { window: window.max(1), fit: None }
    }
}

impl Default for MovingAverageEstimator {
    fn default() -> Self {
        Self::new(crate::FALLBACK_WINDOW)
    }
}

impl Estimator for MovingAverageEstimator {
    fn fit(
        &mut self,
        series: &MetricSeries,
        profile: &MetricProfile,
        deadline: &FitDeadline,
    ) -> ForesightResult<()> {
        deadline.checkpoint("window fit")?;

        let points = series.points();
        let start = points.len().saturating_sub(self.window);
        let window = &points[start..];
        let origin = window[0].timestamp;
        let obs: Vec<(f64, f64)> = window
            .iter()
            .map(|p| (day_offset(origin, p.timestamp), p.value))
            .collect();

        let window_mean = obs.iter().map(|(_, y)| y).sum::<f64>() / obs.len() as f64;
        let (intercept, slope) = match profile.growth {
            GrowthPattern::Linear => least_squares_line(&obs),
            GrowthPattern::Flat => (window_mean, 0.0),
        };

        let residual_std = match obs.len() {
            0 | 1 => 0.0,
            // Two points fit any line exactly; report the spread around the
            // window mean instead.
            2 => {
                let sum: f64 = obs
                    .iter()
                    .map(|(_, y)| (y - window_mean) * (y - window_mean))
                    .sum();
                sum.sqrt()
            }
            n => {
                let sse: f64 = obs
                    .iter()
                    .map(|(x, y)| {
                        let e = y - (intercept + slope * x);
                        e * e
                    })
                    .sum();
                (sse / (n - 2) as f64).sqrt()
            }
        };

        let last_day = obs.last().map(|(x, _)| *x).unwrap_or(0.0);
        self.fit = Some(MovingAverageFit {
            intercept,
            slope,
            residual_std,
            window_len: obs.len(),
            last_day,
        });
        Ok(())
    }

    fn forecast(&self, horizon_days: u32) -> ForesightResult<ForecastPath> {
        let fit = self.fit.as_ref().ok_or_else(|| {
            ForecastError::ModelRuntime("moving average estimator has not been fitted".to_string())
        })?;
        let steps = (1..=i64::from(horizon_days))
            .map(|day| fit.intercept + fit.slope * (fit.last_day + day as f64))
            .collect();
        Ok(ForecastPath { steps, residual_std: fit.residual_std })
    }

    fn fit_confidence(&self) -> f64 {
        match &self.fit {
            Some(fit) => {
                let n = fit.window_len as f64;
                (n / (n + WINDOW_FILL_PRIOR)).min(crate::FALLBACK_CONFIDENCE_CEILING)
            }
            None => 0.0,
        }
    }

    fn name(&self) -> &'static str {
        "moving_average"
    }
}
