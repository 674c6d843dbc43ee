//! Lead qualification with a load-adaptive acceptance threshold.

use std::sync::Arc;

use tracing::info;

use foresight_engine::ForecastEngine;
use foresight_risk::{RiskAssessor, RiskLevel};
use foresight_types::MetricName;

use crate::consult::consult_forecast;
use crate::decision::{AgentDecision, AgentKind, DecisionOutcome};
use crate::log::DecisionLog;

/// Default qualification threshold when no forecast shifts it.
pub const DEFAULT_BASE_THRESHOLD: f64 = 0.5;

/// Default shift a High or Low load outlook applies to the threshold.
pub const DEFAULT_THRESHOLD_DELTA: f64 = 0.1;

/// Default forecast horizon for lead evaluation, in days.
pub const DEFAULT_LEAD_HORIZON_DAYS: u32 = 7;

/// Tunables for [`SalesAgent`].
#[derive(Clone, Debug)]
pub struct SalesAgentConfig {
    /// Qualification threshold applied when no forecast is available.
    pub base_threshold: f64,
    /// How far projected load risk shifts the threshold in either
    /// direction.
    pub threshold_delta: f64,
    /// Forecast horizon consulted per lead.
    pub horizon_days: u32,
}

impl Default for SalesAgentConfig {
    fn default() -> Self {
        Self {
            base_threshold: DEFAULT_BASE_THRESHOLD,
            threshold_delta: DEFAULT_THRESHOLD_DELTA,
            horizon_days: DEFAULT_LEAD_HORIZON_DAYS,
        }
    }
}

/// Accepts or rejects inbound leads, qualifying harder when agent load is
/// forecast to run high and taking more chances when capacity is free.
pub struct SalesAgent {
    engine: Arc<ForecastEngine>,
    assessor: RiskAssessor,
    log: Arc<dyn DecisionLog>,
    config: SalesAgentConfig,
    metric: MetricName,
}

impl SalesAgent {
    pub fn new(
        engine: Arc<ForecastEngine>,
        assessor: RiskAssessor,
        log: Arc<dyn DecisionLog>,
        config: SalesAgentConfig,
    ) -> Self {
        Self { engine, assessor, log, config, metric: MetricName::daily_agent_load() }
    }

    pub fn config(&self) -> &SalesAgentConfig {
        &self.config
    }

    /// Decide whether to accept a lead with the given qualification score.
    /// Never fails; an unavailable forecast means the base threshold.
    pub fn evaluate_lead(&self, lead_id: impl Into<String>, score: f64) -> AgentDecision {
        let lead_id = lead_id.into();
        let classification = consult_forecast(
            &self.engine,
            &self.assessor,
            AgentKind::Sales,
            &self.metric,
            self.config.horizon_days,
        );

        let threshold = match classification.as_ref().map(|c| c.level) {
            // High projected load: qualify harder.
            Some(RiskLevel::High) => self.config.base_threshold + self.config.threshold_delta,
            // Spare capacity: take more chances.
            Some(RiskLevel::Low) => self.config.base_threshold - self.config.threshold_delta,
            Some(RiskLevel::Medium) | None => self.config.base_threshold,
        };

        let outcome = if score >= threshold {
            DecisionOutcome::LeadAccepted { lead_id: lead_id.clone(), score, threshold }
        } else {
            DecisionOutcome::LeadRejected { lead_id: lead_id.clone(), score, threshold }
        };
        let accepted = matches!(outcome, DecisionOutcome::LeadAccepted { .. });

        let decision =
            AgentDecision::new(AgentKind::Sales, self.metric.clone(), outcome, classification);
        info!(
            agent = %AgentKind::Sales,
            lead = %lead_id,
            score,
            threshold,
            accepted,
            forecast_influenced = decision.forecast_influenced,
            "lead evaluated"
        );
        self.log.record(&decision);
        decision
    }
}
