//! # foresight-agents
//!
//! Operational agents that adapt their behavior to forecasts and keep
//! working when forecasting is unavailable.
//!
//! Every agent follows the same consultation pipeline: ask the engine for a
//! forecast, classify it through the risk assessor, adjust one business
//! parameter, record the decision. Any failure inside the pipeline is
//! absorbed; the agent then runs its unadjusted baseline behavior and the
//! decision is marked as not forecast-influenced. Agent entry points never
//! return errors.

#![deny(unsafe_code)]

pub mod decision;
pub mod log;
pub mod marketing;
pub mod reassignment;
pub mod sales;

mod consult;

/// Default capacity of the bounded in-memory decision log.
pub const DEFAULT_LOG_CAPACITY: usize = 1024;

pub use decision::{AgentDecision, AgentKind, DecisionOutcome};
pub use log::{DecisionLog, InMemoryDecisionLog};
pub use marketing::{MarketingAgent, MarketingAgentConfig};
pub use reassignment::{ReassignmentAgent, ReassignmentAgentConfig};
pub use sales::{SalesAgent, SalesAgentConfig};
