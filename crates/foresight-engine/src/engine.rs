//! Metric registry, forecast cache, and the serving ladder.
//!
//! `get_forecast` walks four rungs: fresh cache hit, recompute (train plus
//! predict, outside the lock), stale-cache rescue when recomputing fails,
//! and finally the error itself. A rescued result is marked
//! `ModelSource::Cached` and keeps its own horizon and `computed_at`; it
//! describes the forecast that was actually served, not the one asked for.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use foresight_model::{MetricProfile, TimeSeriesModel};
use foresight_types::{
    ForecastError, ForecastResult, ForesightResult, MetricName, MetricSeries, ModelSource,
    SeriesPoint,
};

use crate::config::EngineConfig;

// ── Cache key ───────────────────────────────────────────────────────────

/// One cache entry per metric/horizon pair.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ForecastKey {
    pub metric: MetricName,
    pub horizon_days: u32,
}

// ── Internal state ──────────────────────────────────────────────────────

#[derive(Clone, Debug)]
struct RegisteredMetric {
    series: MetricSeries,
    profile: MetricProfile,
}

#[derive(Clone, Debug)]
struct CachedForecast {
    result: ForecastResult,
    computed_at: DateTime<Utc>,
}

#[derive(Default)]
struct EngineState {
    metrics: HashMap<MetricName, RegisteredMetric>,
    cache: HashMap<ForecastKey, CachedForecast>,
}

// ── Engine ──────────────────────────────────────────────────────────────

/// Owns the registered series and the forecast cache.
///
/// Concurrent misses for the same key may both recompute; the cache insert
/// is last-write-wins, which converges because results are deterministic
/// for a given series.
pub struct ForecastEngine {
    config: EngineConfig,
    state: Mutex<EngineState>,
}

impl ForecastEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self { config, state: Mutex::new(EngineState::default()) }
    }

    pub fn with_defaults() -> Self {
        Self::new(EngineConfig::default())
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    fn state(&self) -> ForesightResult<MutexGuard<'_, EngineState>> {
        self.state
            .lock()
            .map_err(|_| ForecastError::Internal("engine state lock poisoned".to_string()))
    }

    /// Register a metric, replacing any existing series and profile.
    /// Cached forecasts for the metric are dropped.
    pub fn register_metric(
        &self,
        name: MetricName,
        series: MetricSeries,
        profile: MetricProfile,
    ) -> ForesightResult<()> {
        let mut guard = self.state()?;
        let state = &mut *guard;
        let invalidated = invalidate(&mut state.cache, &name);
        let observations = series.len();
        state.metrics.insert(name.clone(), RegisteredMetric { series, profile });
        info!(metric = %name, observations, invalidated, "metric registered");
        Ok(())
    }

    /// Remove a metric's series and profile. Cached forecasts are kept on
    /// purpose: they remain the last-resort source for stale rescues until
    /// [`ForecastEngine::invalidate_metric`] drops them. Returns whether
    /// the metric was registered.
    pub fn unregister_metric(&self, name: &MetricName) -> ForesightResult<bool> {
        let mut guard = self.state()?;
        let removed = guard.metrics.remove(name).is_some();
        if removed {
            info!(metric = %name, "metric unregistered");
        }
        Ok(removed)
    }

    /// Append validated observations to a registered metric's series and
    /// drop its cached forecasts.
    pub fn append_observations(
        &self,
        name: &MetricName,
        points: Vec<SeriesPoint>,
    ) -> ForesightResult<()> {
        let mut guard = self.state()?;
        let state = &mut *guard;
        let registered = state
            .metrics
            .get_mut(name)
            .ok_or_else(|| ForecastError::unavailable(name, "metric not registered"))?;
        let appended = points.len();
        registered.series.extend(points)?;
        let invalidated = invalidate(&mut state.cache, name);
        debug!(metric = %name, appended, invalidated, "observations appended");
        Ok(())
    }

    /// Serve a forecast for `horizon_days` past the end of the metric's
    /// series, walking the ladder described in the module docs.
    pub fn get_forecast(
        &self,
        name: &MetricName,
        horizon_days: u32,
    ) -> ForesightResult<ForecastResult> {
        if horizon_days == 0 || horizon_days > self.config.max_horizon_days {
            return Err(ForecastError::InvalidHorizon(horizon_days));
        }
        let key = ForecastKey { metric: name.clone(), horizon_days };

        // Rung 1: fresh cache hit, returned unchanged.
        let registered = {
            let state = self.state()?;
            if let Some(cached) = state.cache.get(&key) {
                if self.is_fresh(cached) {
                    debug!(metric = %name, horizon_days, "forecast cache hit");
                    return Ok(cached.result.clone());
                }
            }
            state.metrics.get(name).cloned()
        };

        // Rung 2: recompute outside the lock.
        let computed = match registered {
            Some(RegisteredMetric { series, profile }) => {
                compute_forecast(name, &series, profile, horizon_days)
            }
            None => Err(ForecastError::unavailable(name, "metric not registered")),
        };

        match computed {
            Ok(result) => {
                let mut state = self.state()?;
                // Last write wins under concurrent recomputes of one key.
                state.cache.insert(
                    key,
                    CachedForecast { result: result.clone(), computed_at: Utc::now() },
                );
                debug!(
                    metric = %name,
                    horizon_days,
                    point = result.point_estimate,
                    model = %result.model_used,
                    "forecast computed"
                );
                Ok(result)
            }
            // Rung 3: stale rescue; rung 4: the error itself.
            Err(err) => {
                let state = self.state()?;
                match rescue_from_cache(&state.cache, name, horizon_days) {
                    Some(mut rescued) => {
                        warn!(
                            metric = %name,
                            horizon_days,
                            error = %err,
                            "forecast recompute failed, serving stale cached result"
                        );
                        rescued.model_used = ModelSource::Cached;
                        Ok(rescued)
                    }
                    None => {
                        warn!(metric = %name, horizon_days, error = %err, "forecast unavailable");
                        Err(err)
                    }
                }
            }
        }
    }

    /// Drop every cached forecast for a metric. Returns how many entries
    /// were removed.
    pub fn invalidate_metric(&self, name: &MetricName) -> ForesightResult<usize> {
        let mut guard = self.state()?;
        let dropped = invalidate(&mut guard.cache, name);
        debug!(metric = %name, dropped, "metric cache invalidated");
        Ok(dropped)
    }

    // ── Introspection ───────────────────────────────────────────────────
    // Read-only views; a poisoned lock degrades to empty answers rather
    // than an error.

    /// Names of all registered metrics, in no particular order.
    pub fn registered_metrics(&self) -> Vec<MetricName> {
        self.state
            .lock()
            .map(|state| state.metrics.keys().cloned().collect())
            .unwrap_or_default()
    }

    pub fn is_registered(&self, name: &MetricName) -> bool {
        self.state
            .lock()
            .map(|state| state.metrics.contains_key(name))
            .unwrap_or(false)
    }

    /// Number of cached forecast entries across all metrics.
    pub fn cache_len(&self) -> usize {
        self.state.lock().map(|state| state.cache.len()).unwrap_or(0)
    }

    fn is_fresh(&self, cached: &CachedForecast) -> bool {
        match Utc::now().signed_duration_since(cached.computed_at).to_std() {
            Ok(age) => age < self.config.freshness_window,
            // Entry timestamped ahead of the clock; treat as fresh.
            Err(_) => true,
        }
    }
}

/// Train a fresh model and predict. Runs outside the engine lock.
fn compute_forecast(
    name: &MetricName,
    series: &MetricSeries,
    profile: MetricProfile,
    horizon_days: u32,
) -> ForesightResult<ForecastResult> {
    let mut model = TimeSeriesModel::new(name.clone(), profile);
    model.train(series)?;
    model.predict(horizon_days)
}

/// Last-resort lookup: the exact horizon if cached, otherwise the most
/// recently computed entry for the metric.
fn rescue_from_cache(
    cache: &HashMap<ForecastKey, CachedForecast>,
    metric: &MetricName,
    horizon_days: u32,
) -> Option<ForecastResult> {
    let exact = ForecastKey { metric: metric.clone(), horizon_days };
    if let Some(cached) = cache.get(&exact) {
        return Some(cached.result.clone());
    }
    cache
        .iter()
        .filter(|(key, _)| &key.metric == metric)
        .max_by_key(|(_, cached)| cached.computed_at)
        .map(|(_, cached)| cached.result.clone())
}

fn invalidate(cache: &mut HashMap<ForecastKey, CachedForecast>, metric: &MetricName) -> usize {
    let before = cache.len();
    cache.retain(|key, _| &key.metric != metric);
    before - cache.len()
}
