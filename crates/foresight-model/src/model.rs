//! Train/predict orchestration for one metric.
//!
//! `train` walks the degradation ladder: the primary estimator under its
//! wall-clock budget first, the fallback without a deadline if the primary
//! refuses or times out. `predict` turns the fitted estimator's path into a
//! [`ForecastResult`] with a clamped 90% interval and a trend direction.

use chrono::Utc;
use tracing::{debug, warn};

use foresight_types::{
    ForecastError, ForecastResult, ForesightResult, MetricName, MetricSeries, ModelSource, Trend,
};

use crate::estimator::{Estimator, FitDeadline};
use crate::moving_average::MovingAverageEstimator;
use crate::profile::MetricProfile;
use crate::seasonal_trend::SeasonalTrendEstimator;

/// z-score of the 90% prediction interval.
const INTERVAL_Z: f64 = 1.645;

/// Baseline magnitude below which the trend comparison switches from
/// relative to absolute movement.
const TREND_BASELINE_EPSILON: f64 = 1e-9;

struct TrainedState {
    estimator: Box<dyn Estimator>,
    source: ModelSource,
    /// Final observation of the training series; the trend baseline.
    last_observed: f64,
}

/// Forecasting model for a single metric.
pub struct TimeSeriesModel {
    metric: MetricName,
    profile: MetricProfile,
    trained: Option<TrainedState>,
}

impl TimeSeriesModel {
    pub fn new(metric: MetricName, profile: MetricProfile) -> Self {
        Self { metric, profile, trained: None }
    }

    pub fn metric(&self) -> &MetricName {
        &self.metric
    }

    pub fn profile(&self) -> &MetricProfile {
        &self.profile
    }

    pub fn is_trained(&self) -> bool {
        self.trained.is_some()
    }

    /// Which estimator produced the current fit, if any.
    pub fn model_source(&self) -> Option<ModelSource> {
        self.trained.as_ref().map(|t| t.source)
    }

    /// Fit the model to a series, stepping down to the fallback estimator
    /// when the primary refuses the series or exhausts its budget.
    pub fn train(&mut self, series: &MetricSeries) -> ForesightResult<()> {
        let deadline = FitDeadline::new(self.profile.training_budget);
        let mut primary = SeasonalTrendEstimator::new();
        let primary_err = match primary.fit(series, &self.profile, &deadline) {
            Ok(()) => {
                debug!(metric = %self.metric, estimator = primary.name(), "primary estimator fitted");
                self.trained = Some(TrainedState {
                    estimator: Box::new(primary),
                    source: ModelSource::Primary,
                    last_observed: series.last().value,
                });
                return Ok(());
            }
            Err(err) => err,
        };

        warn!(metric = %self.metric, error = %primary_err, "primary estimator failed, fitting fallback");
        let mut fallback = MovingAverageEstimator::default();
        match fallback.fit(series, &self.profile, &FitDeadline::unlimited()) {
            Ok(()) => {
                self.trained = Some(TrainedState {
                    estimator: Box::new(fallback),
                    source: ModelSource::Fallback,
                    last_observed: series.last().value,
                });
                Ok(())
            }
            Err(fallback_err) => Err(ForecastError::unavailable(
                &self.metric,
                format!("primary failed ({primary_err}); fallback failed ({fallback_err})"),
            )),
        }
    }

    /// Forecast `horizon_days` past the end of the training series.
    pub fn predict(&self, horizon_days: u32) -> ForesightResult<ForecastResult> {
        if horizon_days == 0 {
            return Err(ForecastError::InvalidHorizon(0));
        }
        let trained = self.trained.as_ref().ok_or_else(|| {
            ForecastError::ModelRuntime(format!("model for {} has not been trained", self.metric))
        })?;

        let path = trained.estimator.forecast(horizon_days)?;
        let endpoint = path.endpoint();
        // Interval width widens with the square root of the horizon. The
        // clamp is monotone, so bound ordering survives it.
        let margin = INTERVAL_Z * path.residual_std * f64::from(horizon_days).sqrt();
        let point_estimate = self.profile.clamp(endpoint);
        let lower_bound = self.profile.clamp(endpoint - margin);
        let upper_bound = self.profile.clamp(endpoint + margin);

        Ok(ForecastResult {
            metric: self.metric.clone(),
            horizon_days,
            point_estimate,
            lower_bound,
            upper_bound,
            confidence: trained.estimator.fit_confidence().clamp(0.0, 1.0),
            trend: classify_trend(trained.last_observed, point_estimate, self.profile.trend_tolerance),
            model_used: trained.source,
            computed_at: Utc::now(),
        })
    }
}

/// Compare the projected endpoint with the last observation. Movement
/// within the tolerance (relative to the baseline, absolute when the
/// baseline is near zero) classifies as stable.
fn classify_trend(baseline: f64, projected: f64, tolerance: f64) -> Trend {
    let delta = projected - baseline;
    let movement = if baseline.abs() > TREND_BASELINE_EPSILON {
        delta / baseline.abs()
    } else {
        delta
    };
    if movement > tolerance {
        Trend::Increasing
    } else if movement < -tolerance {
        Trend::Decreasing
    } else {
        Trend::Stable
    }
}
