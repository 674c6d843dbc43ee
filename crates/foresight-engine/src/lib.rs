//! # foresight-engine
//!
//! Orchestration layer over `foresight-model`: a registry of metric series,
//! a per-(metric, horizon) cache of forecast results, and the degradation
//! ladder that keeps a stale cached result available when recomputing
//! fails outright.
//!
//! The engine is shared behind an `Arc` and every operation takes `&self`;
//! model training runs outside the state lock so a slow fit never blocks
//! readers of other metrics.

#![deny(unsafe_code)]

pub mod config;
pub mod engine;

/// How long a cached forecast is served before recomputing, in seconds.
pub const DEFAULT_FRESHNESS_WINDOW_SECS: u64 = 3_600;

/// Largest horizon the engine will forecast, in days.
pub const DEFAULT_MAX_HORIZON_DAYS: u32 = 90;

pub use config::EngineConfig;
pub use engine::{ForecastEngine, ForecastKey};
