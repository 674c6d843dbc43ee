//! Shared forecast-consultation pipeline.
//!
//! Agents consult the engine through [`consult_forecast`], which absorbs
//! every forecast-layer failure. `None` tells the agent to proceed with its
//! baseline behavior.

use tracing::{debug, warn};

use foresight_engine::ForecastEngine;
use foresight_risk::{RiskAssessor, RiskClassification};
use foresight_types::MetricName;

use crate::decision::AgentKind;

pub(crate) fn consult_forecast(
    engine: &ForecastEngine,
    assessor: &RiskAssessor,
    agent: AgentKind,
    metric: &MetricName,
    horizon_days: u32,
) -> Option<RiskClassification> {
    match engine.get_forecast(metric, horizon_days) {
        Ok(forecast) => {
            let classification = assessor.assess(&forecast);
            debug!(
                agent = %agent,
                metric = %metric,
                level = %classification.level,
                action = %classification.recommended_action,
                point = forecast.point_estimate,
                confidence = forecast.confidence,
                model = %forecast.model_used,
                "forecast consulted"
            );
            Some(classification)
        }
        Err(err) => {
            warn!(
                agent = %agent,
                metric = %metric,
                error = %err,
                "forecast unavailable, proceeding with baseline behavior"
            );
            None
        }
    }
}
