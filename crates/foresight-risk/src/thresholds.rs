//! Risk levels, recommended actions, and the threshold tables that map a
//! projected value onto them.

use serde::{Deserialize, Serialize};

// ── Levels and actions ──────────────────────────────────────────────────

/// Severity of a projected metric value. Ordered: `Low < Medium < High`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
        };
        write!(f, "{s}")
    }
}

/// What an agent consuming the classification should do about it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendedAction {
    ContinueMonitoring,
    IncreaseOversight,
    TriggerIntervention,
}

impl std::fmt::Display for RecommendedAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            RecommendedAction::ContinueMonitoring => "continue_monitoring",
            RecommendedAction::IncreaseOversight => "increase_oversight",
            RecommendedAction::TriggerIntervention => "trigger_intervention",
        };
        write!(f, "{s}")
    }
}

// ── Threshold table ─────────────────────────────────────────────────────

/// Lower-inclusive boundaries mapping a projected value to a level.
///
/// Classification checks `high`, then `medium`, then falls through to
/// `low`; a value on a boundary takes the higher level.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ThresholdTable {
    /// Values at or above this are high risk.
    pub high: f64,
    /// Values at or above this (and below `high`) are medium risk.
    pub medium: f64,
    /// Values at or above this (and below `medium`) are low risk.
    pub low: f64,
}

impl ThresholdTable {
    /// Boundaries for daily agent load: 25+ agents is high, 15+ medium.
    pub fn daily_agent_load() -> Self {
        Self { high: 25.0, medium: 15.0, low: 0.0 }
    }

    /// Boundaries for probability-like metrics: 0.7+ is high, 0.4+ medium.
    pub fn probability() -> Self {
        Self { high: 0.7, medium: 0.4, low: 0.0 }
    }

    /// Map a projected value to its level.
    pub fn classify(&self, value: f64) -> RiskLevel {
        if value >= self.high {
            RiskLevel::High
        } else if value >= self.medium {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        }
    }
}

// ── Action policy ───────────────────────────────────────────────────────

/// Which action each level recommends.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionPolicy {
    pub low: RecommendedAction,
    pub medium: RecommendedAction,
    pub high: RecommendedAction,
}

impl Default for ActionPolicy {
    fn default() -> Self {
        Self {
            low: RecommendedAction::ContinueMonitoring,
            medium: RecommendedAction::IncreaseOversight,
            high: RecommendedAction::TriggerIntervention,
        }
    }
}

impl ActionPolicy {
    pub fn action_for(&self, level: RiskLevel) -> RecommendedAction {
        match level {
            RiskLevel::Low => self.low,
            RiskLevel::Medium => self.medium,
            RiskLevel::High => self.high,
        }
    }
}
