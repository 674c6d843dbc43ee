//! Decision records emitted by the agents.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use foresight_risk::RiskClassification;
use foresight_types::MetricName;

/// Which agent produced a decision.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentKind {
    Sales,
    Marketing,
    Reassignment,
}

impl std::fmt::Display for AgentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            AgentKind::Sales => "sales",
            AgentKind::Marketing => "marketing",
            AgentKind::Reassignment => "reassignment",
        };
        write!(f, "{s}")
    }
}

/// The business outcome of one agent invocation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum DecisionOutcome {
    LeadAccepted { lead_id: String, score: f64, threshold: f64 },
    LeadRejected { lead_id: String, score: f64, threshold: f64 },
    CampaignScaled {
        campaign_id: String,
        base_intensity: f64,
        multiplier: f64,
        scaled_intensity: f64,
    },
    TaskKept { task_id: String, assignee: String },
    TaskReassigned { task_id: String, from: String, to: String },
}

/// One audited agent decision.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AgentDecision {
    pub decision_id: Uuid,
    pub agent: AgentKind,
    /// Metric the agent consulted (or would have consulted).
    pub metric: MetricName,
    pub outcome: DecisionOutcome,
    /// Classification that informed the decision, when a forecast was
    /// available.
    pub classification: Option<RiskClassification>,
    /// False when the agent fell back to its baseline behavior because no
    /// forecast could be obtained.
    pub forecast_influenced: bool,
    pub decided_at: DateTime<Utc>,
}

impl AgentDecision {
    /// `forecast_influenced` is derived: a decision was influenced exactly
    /// when a classification reached the agent.
    pub(crate) fn new(
        agent: AgentKind,
        metric: MetricName,
        outcome: DecisionOutcome,
        classification: Option<RiskClassification>,
    ) -> Self {
        Self {
            decision_id: Uuid::new_v4(),
            agent,
            metric,
            outcome,
            forecast_influenced: classification.is_some(),
            classification,
            decided_at: Utc::now(),
        }
    }
}
