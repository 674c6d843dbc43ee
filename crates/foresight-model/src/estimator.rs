//! The estimator seam: a common fit/forecast contract plus the cooperative
//! training deadline estimators check between fitting stages.

use std::time::{Duration, Instant};

use foresight_types::{ForecastError, ForesightResult, MetricSeries};

use crate::profile::MetricProfile;

// ── Forecast path ───────────────────────────────────────────────────────

/// Raw output of an estimator: one projected value per future day plus the
/// spread of the in-sample residuals.
#[derive(Clone, Debug, PartialEq)]
pub struct ForecastPath {
    /// Projected values for days `1..=horizon`, nearest first.
    pub steps: Vec<f64>,
    /// Standard deviation of the in-sample residuals.
    pub residual_std: f64,
}

impl ForecastPath {
    /// Value at the end of the horizon.
    pub fn endpoint(&self) -> f64 {
        self.steps.last().copied().unwrap_or(0.0)
    }
}

// ── Fit deadline ────────────────────────────────────────────────────────

/// Cooperative wall-clock budget for a training run.
///
/// Estimators call [`FitDeadline::checkpoint`] between fitting stages; an
/// exhausted budget surfaces as `ModelTraining` so the caller can move on
/// to the fallback path.
#[derive(Clone, Copy, Debug)]
pub struct FitDeadline {
    deadline: Option<Instant>,
}

impl FitDeadline {
    /// Deadline `budget` from now.
    pub fn new(budget: Duration) -> Self {
        Self { deadline: Instant::now().checked_add(budget) }
    }

    /// A deadline that never expires. The fallback fit runs under this so
    /// an exhausted primary budget cannot starve it.
    pub fn unlimited() -> Self {
        Self { deadline: None }
    }

    /// Whether the budget is spent.
    pub fn expired(&self) -> bool {
        self.deadline.is_some_and(|d| Instant::now() >= d)
    }

    /// Fail the current training stage if the budget is spent.
    pub fn checkpoint(&self, stage: &str) -> ForesightResult<()> {
        if self.expired() {
            Err(ForecastError::ModelTraining(format!(
                "training budget exhausted during {stage}"
            )))
        } else {
            Ok(())
        }
    }
}

// ── Estimator contract ──────────────────────────────────────────────────

/// A pluggable forecasting algorithm.
///
/// `fit` consumes a validated series; `forecast` may only be called after a
/// successful fit and projects one value per future day.
pub trait Estimator: Send {
    /// Fit the estimator to a series under a training deadline.
    fn fit(
        &mut self,
        series: &MetricSeries,
        profile: &MetricProfile,
        deadline: &FitDeadline,
    ) -> ForesightResult<()>;

    /// Project `horizon_days` values past the end of the fitted series.
    fn forecast(&self, horizon_days: u32) -> ForesightResult<ForecastPath>;

    /// Self-assessed fit quality in `0.0..=1.0`.
    fn fit_confidence(&self) -> f64;

    /// Short name for logs and provenance.
    fn name(&self) -> &'static str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_budget_expires_immediately() {
        let deadline = FitDeadline::new(Duration::ZERO);
        assert!(deadline.expired());
        let err = deadline.checkpoint("trend fit").unwrap_err();
        assert!(matches!(err, ForecastError::ModelTraining(_)));
        assert!(err.to_string().contains("trend fit"));
    }

    #[test]
    fn generous_budget_passes_checkpoints() {
        let deadline = FitDeadline::new(Duration::from_secs(60));
        assert!(!deadline.expired());
        assert!(deadline.checkpoint("anything").is_ok());
    }

    #[test]
    fn unlimited_never_expires() {
        let deadline = FitDeadline::unlimited();
        assert!(!deadline.expired());
        assert!(deadline.checkpoint("window fit").is_ok());
    }

    #[test]
    fn endpoint_is_last_step() {
        let path = ForecastPath { steps: vec![1.0, 2.0, 3.5], residual_std: 0.1 };
        assert_eq!(path.endpoint(), 3.5);
    }
}
