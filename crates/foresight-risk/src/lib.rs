//! # foresight-risk
//!
//! Deterministic classification of forecast results into risk levels and
//! recommended actions. Assessment is a pure function of the forecast and
//! the assessor's configuration: no clock, no randomness, no I/O. Callers
//! that want audit trails log the returned classification themselves.

#![deny(unsafe_code)]

pub mod assessor;
pub mod thresholds;

/// Forecast confidence below which recommended actions are downgraded to
/// plain monitoring.
pub const DEFAULT_MIN_CONFIDENCE: f64 = 0.5;

pub use assessor::{AssessorConfig, RiskAssessor, RiskClassification};
pub use thresholds::{ActionPolicy, RecommendedAction, RiskLevel, ThresholdTable};
