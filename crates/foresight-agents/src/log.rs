//! Decision log seam.
//!
//! Agents append every decision to a [`DecisionLog`]. The in-memory
//! implementation is bounded and suits tests and demos; production callers
//! hand agents whatever sink they need.

use std::sync::Mutex;

use tracing::warn;

use crate::decision::AgentDecision;

/// Sink for audited agent decisions. Implementations must not fail the
/// caller: a decision that cannot be recorded is dropped, not raised.
pub trait DecisionLog: Send + Sync {
    fn record(&self, decision: &AgentDecision);
}

/// Bounded in-memory log; oldest entries are evicted first.
pub struct InMemoryDecisionLog {
    capacity: usize,
    entries: Mutex<Vec<AgentDecision>>,
}

impl InMemoryDecisionLog {
    pub fn new(capacity: usize) -> Self {
        Self { capacity: capacity.max(1), entries: Mutex::new(Vec::new()) }
    }

    /// Snapshot of the recorded decisions, oldest first.
    pub fn decisions(&self) -> Vec<AgentDecision> {
        self.entries.lock().map(|entries| entries.clone()).unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().map(|entries| entries.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for InMemoryDecisionLog {
    fn default() -> Self {
        Self::new(crate::DEFAULT_LOG_CAPACITY)
    }
}

impl DecisionLog for InMemoryDecisionLog {
    fn record(&self, decision: &AgentDecision) {
        match self.entries.lock() {
            Ok(mut entries) => {
                entries.push(decision.clone());
                if entries.len() > self.capacity {
                    let excess = entries.len() - self.capacity;
                    entries.drain(0..excess);
                }
            }
            Err(_) => {
                warn!(decision_id = %decision.decision_id, "decision log lock poisoned, entry dropped");
            }
        }
    }
}
