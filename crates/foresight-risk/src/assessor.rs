//! The assessor: per-metric threshold lookup plus the low-confidence
//! downgrade rule.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use foresight_types::{ForecastResult, MetricName};

use crate::thresholds::{ActionPolicy, RecommendedAction, RiskLevel, ThresholdTable};

// ── Configuration ───────────────────────────────────────────────────────

/// Tunables for [`RiskAssessor`].
#[derive(Clone, Copy, Debug)]
pub struct AssessorConfig {
    /// Forecast confidence below which the recommended action is downgraded
    /// to [`RecommendedAction::ContinueMonitoring`]. The level itself is
    /// reported unchanged.
    pub min_confidence: f64,
}

impl Default for AssessorConfig {
    fn default() -> Self {
        Self { min_confidence: crate::DEFAULT_MIN_CONFIDENCE }
    }
}

// ── Classification ──────────────────────────────────────────────────────

/// Outcome of assessing one forecast.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RiskClassification {
    pub metric_name: MetricName,
    pub level: RiskLevel,
    pub recommended_action: RecommendedAction,
    /// True when low forecast confidence replaced the policy's action with
    /// plain monitoring.
    pub action_downgraded: bool,
}

// ── Assessor ────────────────────────────────────────────────────────────

/// Maps forecasts to risk classifications using per-metric threshold
/// tables.
///
/// Metrics without a dedicated table fall back to the probability table,
/// which suits the unit-interval metrics this system mostly deals in.
#[derive(Clone, Debug)]
pub struct RiskAssessor {
    tables: HashMap<MetricName, ThresholdTable>,
    default_table: ThresholdTable,
    policy: ActionPolicy,
    config: AssessorConfig,
}

impl Default for RiskAssessor {
    fn default() -> Self {
        Self::new(AssessorConfig::default())
    }
}

impl RiskAssessor {
    pub fn new(config: AssessorConfig) -> Self {
        let mut tables = HashMap::new();
        tables.insert(MetricName::daily_agent_load(), ThresholdTable::daily_agent_load());
        tables.insert(MetricName::escalation_likelihood(), ThresholdTable::probability());
        tables.insert(MetricName::delay_risk(), ThresholdTable::probability());
        Self {
            tables,
            default_table: ThresholdTable::probability(),
            policy: ActionPolicy::default(),
            config,
        }
    }

    /// Install or replace the threshold table for one metric.
    pub fn with_table(mut self, metric: MetricName, table: ThresholdTable) -> Self {
        self.tables.insert(metric, table);
        self
    }

    pub fn with_policy(mut self, policy: ActionPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Classify a forecast. Pure: identical inputs yield identical
    /// classifications.
    pub fn assess(&self, forecast: &ForecastResult) -> RiskClassification {
        let table = self.tables.get(&forecast.metric).unwrap_or(&self.default_table);
        let level = table.classify(forecast.point_estimate);
        let action_downgraded = forecast.confidence < self.config.min_confidence;
        let recommended_action = if action_downgraded {
            RecommendedAction::ContinueMonitoring
        } else {
            self.policy.action_for(level)
        };
        RiskClassification {
            metric_name: forecast.metric.clone(),
            level,
            recommended_action,
            action_downgraded,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::Utc;
    use foresight_types::{ModelSource, Trend};

    fn forecast(metric: MetricName, point: f64, confidence: f64) -> ForecastResult {
        ForecastResult {
            metric,
            horizon_days: 7,
            point_estimate: point,
            lower_bound: point - 1.0,
            upper_bound: point + 1.0,
            confidence,
            trend: Trend::Stable,
            model_used: ModelSource::Primary,
            computed_at: Utc::now(),
        }
    }

    #[test]
    fn high_load_triggers_intervention() {
        let assessor = RiskAssessor::default();
        let classification = assessor.assess(&forecast(MetricName::daily_agent_load(), 30.0, 0.9));
        assert_eq!(classification.level, RiskLevel::High);
        assert_eq!(classification.recommended_action, RecommendedAction::TriggerIntervention);
        assert!(!classification.action_downgraded);
    }

    #[test]
    fn medium_load_increases_oversight() {
        let assessor = RiskAssessor::default();
        let classification = assessor.assess(&forecast(MetricName::daily_agent_load(), 18.0, 0.8));
        assert_eq!(classification.level, RiskLevel::Medium);
        assert_eq!(classification.recommended_action, RecommendedAction::IncreaseOversight);
    }

    #[test]
    fn low_confidence_downgrades_action_but_keeps_level() {
        let assessor = RiskAssessor::default();
        let classification = assessor.assess(&forecast(MetricName::daily_agent_load(), 30.0, 0.4));
        assert_eq!(classification.level, RiskLevel::High);
        assert_eq!(classification.recommended_action, RecommendedAction::ContinueMonitoring);
        assert!(classification.action_downgraded);
    }

    #[test]
    fn confidence_on_the_boundary_is_not_downgraded() {
        let assessor = RiskAssessor::default();
        let classification = assessor.assess(&forecast(MetricName::daily_agent_load(), 30.0, 0.5));
        assert_eq!(classification.recommended_action, RecommendedAction::TriggerIntervention);
        assert!(!classification.action_downgraded);
    }

    #[test]
    fn unknown_metric_uses_default_table() {
        let assessor = RiskAssessor::default();
        let classification =
            assessor.assess(&forecast(MetricName::new("queue_backlog_ratio"), 0.8, 0.9));
        assert_eq!(classification.level, RiskLevel::High);
    }

    #[test]
    fn custom_table_overrides_builtin() {
        let assessor = RiskAssessor::default().with_table(
            MetricName::daily_agent_load(),
            ThresholdTable { high: 100.0, medium: 50.0, low: 0.0 },
        );
        let classification = assessor.assess(&forecast(MetricName::daily_agent_load(), 30.0, 0.9));
        assert_eq!(classification.level, RiskLevel::Low);
    }

    #[test]
    fn assessment_is_deterministic() {
        let assessor = RiskAssessor::default();
        let input = forecast(MetricName::escalation_likelihood(), 0.55, 0.72);
        assert_eq!(assessor.assess(&input), assessor.assess(&input));
    }
}
