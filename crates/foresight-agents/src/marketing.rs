//! Campaign intensity scaling driven by escalation likelihood.

use std::sync::Arc;

use tracing::info;

use foresight_engine::ForecastEngine;
use foresight_risk::{RiskAssessor, RiskLevel};
use foresight_types::MetricName;

use crate::consult::consult_forecast;
use crate::decision::{AgentDecision, AgentKind, DecisionOutcome};
use crate::log::DecisionLog;

/// Multiplier applied when no forecast is available; leaves the campaign
/// unadjusted regardless of how the config's multipliers are tuned.
const NEUTRAL_MULTIPLIER: f64 = 1.0;

/// Default multiplier when escalation risk is low.
pub const DEFAULT_SCALE_UP: f64 = 1.2;

/// Default multiplier when escalation risk is medium.
pub const DEFAULT_SCALE_HOLD: f64 = 1.0;

/// Default multiplier when escalation risk is high.
pub const DEFAULT_SCALE_DOWN: f64 = 0.5;

/// Default forecast horizon for campaign planning, in days.
pub const DEFAULT_CAMPAIGN_HORIZON_DAYS: u32 = 7;

/// Tunables for [`MarketingAgent`].
#[derive(Clone, Debug)]
pub struct MarketingAgentConfig {
    /// Multiplier when escalation risk is low.
    pub scale_up: f64,
    /// Multiplier when escalation risk is medium.
    pub scale_hold: f64,
    /// Multiplier when escalation risk is high.
    pub scale_down: f64,
    /// Forecast horizon consulted per campaign.
    pub horizon_days: u32,
}

impl Default for MarketingAgentConfig {
    fn default() -> Self {
        Self {
            scale_up: DEFAULT_SCALE_UP,
            scale_hold: DEFAULT_SCALE_HOLD,
            scale_down: DEFAULT_SCALE_DOWN,
            horizon_days: DEFAULT_CAMPAIGN_HORIZON_DAYS,
        }
    }
}

/// Scales campaign intensity down when escalations are forecast to rise
/// and up when the outlook is calm.
pub struct MarketingAgent {
    engine: Arc<ForecastEngine>,
    assessor: RiskAssessor,
    log: Arc<dyn DecisionLog>,
    config: MarketingAgentConfig,
    metric: MetricName,
}

impl MarketingAgent {
    pub fn new(
        engine: Arc<ForecastEngine>,
        assessor: RiskAssessor,
        log: Arc<dyn DecisionLog>,
        config: MarketingAgentConfig,
    ) -> Self {
        Self { engine, assessor, log, config, metric: MetricName::escalation_likelihood() }
    }

    pub fn config(&self) -> &MarketingAgentConfig {
        &self.config
    }

    /// Plan a campaign at `base_intensity`, scaled by the escalation
    /// outlook. Never fails; an unavailable forecast means no adjustment.
    pub fn plan_campaign(&self, campaign_id: impl Into<String>, base_intensity: f64) -> AgentDecision {
        let campaign_id = campaign_id.into();
        let classification = consult_forecast(
            &self.engine,
            &self.assessor,
            AgentKind::Marketing,
            &self.metric,
            self.config.horizon_days,
        );

        let multiplier = match classification.as_ref().map(|c| c.level) {
            Some(RiskLevel::Low) => self.config.scale_up,
            Some(RiskLevel::Medium) => self.config.scale_hold,
            Some(RiskLevel::High) => self.config.scale_down,
            None => NEUTRAL_MULTIPLIER,
        };
        let scaled_intensity = base_intensity * multiplier;

        let outcome = DecisionOutcome::CampaignScaled {
            campaign_id: campaign_id.clone(),
            base_intensity,
            multiplier,
            scaled_intensity,
        };
        let decision =
            AgentDecision::new(AgentKind::Marketing, self.metric.clone(), outcome, classification);
        info!(
            agent = %AgentKind::Marketing,
            campaign = %campaign_id,
            base_intensity,
            multiplier,
            scaled_intensity,
            forecast_influenced = decision.forecast_influenced,
            "campaign planned"
        );
        self.log.record(&decision);
        decision
    }
}
