//! Task reassignment ahead of projected load spikes.

use std::sync::Arc;

use tracing::info;

use foresight_engine::ForecastEngine;
use foresight_risk::{RiskAssessor, RiskLevel};
use foresight_types::MetricName;

use crate::consult::consult_forecast;
use crate::decision::{AgentDecision, AgentKind, DecisionOutcome};
use crate::log::DecisionLog;

/// Default destination for tasks moved off a pressured assignee.
pub const DEFAULT_OVERFLOW_ASSIGNEE: &str = "overflow-pool";

/// Default forecast horizon for task review, in days; shorter than the
/// other agents because reassignment reacts to the immediate future.
pub const DEFAULT_TASK_HORIZON_DAYS: u32 = 3;

/// Tunables for [`ReassignmentAgent`].
#[derive(Clone, Debug)]
pub struct ReassignmentAgentConfig {
    /// Where tasks go when load is forecast to run high.
    pub overflow_assignee: String,
    /// Forecast horizon consulted per task.
    pub horizon_days: u32,
}

impl Default for ReassignmentAgentConfig {
    fn default() -> Self {
        Self {
            overflow_assignee: DEFAULT_OVERFLOW_ASSIGNEE.to_string(),
            horizon_days: DEFAULT_TASK_HORIZON_DAYS,
        }
    }
}

/// Moves open tasks to the overflow pool when agent load is forecast to
/// run high; otherwise leaves assignments alone.
pub struct ReassignmentAgent {
    engine: Arc<ForecastEngine>,
    assessor: RiskAssessor,
    log: Arc<dyn DecisionLog>,
    config: ReassignmentAgentConfig,
    metric: MetricName,
}

impl ReassignmentAgent {
    pub fn new(
        engine: Arc<ForecastEngine>,
        assessor: RiskAssessor,
        log: Arc<dyn DecisionLog>,
        config: ReassignmentAgentConfig,
    ) -> Self {
        Self { engine, assessor, log, config, metric: MetricName::daily_agent_load() }
    }

    pub fn config(&self) -> &ReassignmentAgentConfig {
        &self.config
    }

    /// Review one task assignment. Never fails; an unavailable forecast
    /// means the task stays put.
    pub fn review_task(&self, task_id: impl Into<String>, assignee: impl Into<String>) -> AgentDecision {
        let task_id = task_id.into();
        let assignee = assignee.into();
        let classification = consult_forecast(
            &self.engine,
            &self.assessor,
            AgentKind::Reassignment,
            &self.metric,
            self.config.horizon_days,
        );

        let reassign = matches!(
            classification.as_ref().map(|c| c.level),
            Some(RiskLevel::High)
        );
        let outcome = if reassign {
            DecisionOutcome::TaskReassigned {
                task_id: task_id.clone(),
                from: assignee.clone(),
                to: self.config.overflow_assignee.clone(),
            }
        } else {
            DecisionOutcome::TaskKept { task_id: task_id.clone(), assignee: assignee.clone() }
        };

        let decision =
            AgentDecision::new(AgentKind::Reassignment, self.metric.clone(), outcome, classification);
        info!(
            agent = %AgentKind::Reassignment,
            task = %task_id,
            assignee = %assignee,
            reassigned = reassign,
            forecast_influenced = decision.forecast_influenced,
            "task reviewed"
        );
        self.log.record(&decision);
        decision
    }
}
