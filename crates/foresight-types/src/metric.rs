//! Metric identity and observation series.
//!
//! A `MetricSeries` is validated at construction: non-empty, finite values,
//! strictly increasing timestamps. Code downstream (estimators, the engine)
//! relies on those invariants and never re-checks them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{ForecastError, ForesightResult};

// ── Metric Identification ───────────────────────────────────────────────

/// Identifies a forecastable operational metric, e.g. `"daily_agent_load"`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MetricName(pub String);

impl MetricName {
    /// Create a metric name.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Incoming work volume per agent per day. Drives lead routing and
    /// task reassignment.
    pub fn daily_agent_load() -> Self {
        Self("daily_agent_load".to_string())
    }

    /// Probability that a customer interaction escalates. Drives campaign
    /// intensity scaling.
    pub fn escalation_likelihood() -> Self {
        Self("escalation_likelihood".to_string())
    }

    /// Probability of delivery slippage on open tasks.
    pub fn delay_risk() -> Self {
        Self("delay_risk".to_string())
    }
}

impl std::fmt::Display for MetricName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ── Series ──────────────────────────────────────────────────────────────

/// One observation of a metric at a point in time.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub timestamp: DateTime<Utc>,
    pub value: f64,
}

impl SeriesPoint {
    pub fn new(timestamp: DateTime<Utc>, value: f64) -> Self {
        Self { timestamp, value }
    }
}

/// A validated, time-ordered series of observations for one metric.
///
/// Invariants (enforced by every constructor, including deserialization):
/// at least one point, every value finite, timestamps strictly increasing.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(into = "Vec<SeriesPoint>", try_from = "Vec<SeriesPoint>")]
pub struct MetricSeries {
    points: Vec<SeriesPoint>,
}

impl MetricSeries {
    /// Validate and wrap a list of observations.
    pub fn new(points: Vec<SeriesPoint>) -> ForesightResult<Self> {
        if points.is_empty() {
            return Err(ForecastError::InvalidSeries(
                "series contains no observations".to_string(),
            ));
        }
        for (idx, point) in points.iter().enumerate() {
            if !point.value.is_finite() {
                return Err(ForecastError::InvalidSeries(format!(
                    "non-finite value at index {}: {}",
                    idx, point.value
                )));
            }
        }
        for pair in points.windows(2) {
            if pair[1].timestamp <= pair[0].timestamp {
                return Err(ForecastError::InvalidSeries(format!(
                    "timestamps must be strictly increasing: {} does not follow {}",
                    pair[1].timestamp, pair[0].timestamp
                )));
            }
        }
        Ok(Self { points })
    }

    /// Build a series of one observation per day starting at `start`.
    pub fn from_daily_values(start: DateTime<Utc>, values: &[f64]) -> ForesightResult<Self> {
        let points = values
            .iter()
            .enumerate()
            .map(|(day, &value)| SeriesPoint {
                timestamp: start + chrono::Duration::days(day as i64),
                value,
            })
            .collect();
        Self::new(points)
    }

    /// Append newer observations. The combined series must still satisfy
    /// every series invariant, otherwise the series is left untouched.
    pub fn extend(&mut self, newer: Vec<SeriesPoint>) -> ForesightResult<()> {
        let mut combined = self.points.clone();
        combined.extend(newer);
        *self = Self::new(combined)?;
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[SeriesPoint] {
        &self.points
    }

    /// Observation values in time order.
    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.value).collect()
    }

    /// Oldest observation. Total because the series is never empty.
    pub fn first(&self) -> &SeriesPoint {
        &self.points[0]
    }

    /// Newest observation. Total because the series is never empty.
    pub fn last(&self) -> &SeriesPoint {
        &self.points[self.points.len() - 1]
    }

    /// Time covered between the first and last observation.
    pub fn span(&self) -> chrono::Duration {
        self.last()
            .timestamp
            .signed_duration_since(self.first().timestamp)
    }
}

impl TryFrom<Vec<SeriesPoint>> for MetricSeries {
    type Error = ForecastError;

    fn try_from(points: Vec<SeriesPoint>) -> Result<Self, Self::Error> {
        Self::new(points)
    }
}

impl From<MetricSeries> for Vec<SeriesPoint> {
    fn from(series: MetricSeries) -> Self {
        series.points
    }
}
