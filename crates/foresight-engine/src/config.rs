//! Engine tunables.

use std::time::Duration;

/// Configuration for [`crate::ForecastEngine`].
#[derive(Clone, Debug)]
pub struct EngineConfig {
    /// Age below which a cached forecast is served without recomputing.
    pub freshness_window: Duration,
    /// Largest horizon, in days, the engine accepts.
    pub max_horizon_days: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            freshness_window: Duration::from_secs(crate::DEFAULT_FRESHNESS_WINDOW_SECS),
            max_horizon_days: crate::DEFAULT_MAX_HORIZON_DAYS,
        }
    }
}
