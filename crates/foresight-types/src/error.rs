use thiserror::Error;

use crate::metric::MetricName;

/// Errors from the forecasting subsystem.
#[derive(Debug, Error)]
pub enum ForecastError {
    #[error("model training failed: {0}")]
    ModelTraining(String),

    #[error("model runtime failure: {0}")]
    ModelRuntime(String),

    #[error("forecast unavailable for metric {metric}: {reason}")]
    Unavailable { metric: String, reason: String },

    #[error("invalid series: {0}")]
    InvalidSeries(String),

    #[error("invalid horizon: {0} days")]
    InvalidHorizon(u32),

    #[error("internal fault: {0}")]
    Internal(String),
}

impl ForecastError {
    /// Build an [`ForecastError::Unavailable`] for a metric.
    pub fn unavailable(metric: &MetricName, reason: impl Into<String>) -> Self {
        ForecastError::Unavailable {
            metric: metric.to_string(),
            reason: reason.into(),
        }
    }
}

/// Convenience type alias for forecasting results.
pub type ForesightResult<T> = Result<T, ForecastError>;
