//! End-to-end scenarios across the whole stack: series in, forecasts
//! through the engine, risk classification, agent decisions out.

use std::sync::Arc;
use std::time::Duration;

use chrono::{TimeZone, Utc};

use foresight_agents::{
    DecisionOutcome, InMemoryDecisionLog, MarketingAgent, MarketingAgentConfig, ReassignmentAgent,
    ReassignmentAgentConfig, SalesAgent, SalesAgentConfig,
};
use foresight_engine::{EngineConfig, ForecastEngine};
use foresight_model::MetricProfile;
use foresight_risk::{RecommendedAction, RiskAssessor, RiskLevel};
use foresight_types::{
    ForecastError, ForecastResult, MetricName, MetricSeries, ModelSource, SeriesPoint, Trend,
};

fn daily_series(values: &[f64]) -> MetricSeries {
    let start = Utc.with_ymd_and_hms(2026, 1, 5, 0, 0, 0).unwrap();
    MetricSeries::from_daily_values(start, values).unwrap()
}

fn register_load(engine: &ForecastEngine, values: &[f64]) {
    engine
        .register_metric(
            MetricName::daily_agent_load(),
            daily_series(values),
            MetricProfile::daily_agent_load(),
        )
        .unwrap();
}

/// 90 days of rising load, 10 to 25 agents per day.
fn rising_load() -> Vec<f64> {
    (0..90).map(|d| 10.0 + 15.0 * d as f64 / 89.0).collect()
}

#[test]
fn rising_load_drives_sales_selectivity() {
    let engine = Arc::new(ForecastEngine::with_defaults());
    register_load(&engine, &rising_load());

    let forecast = engine.get_forecast(&MetricName::daily_agent_load(), 7).unwrap();
    assert_eq!(forecast.model_used, ModelSource::Primary);
    assert_eq!(forecast.trend, Trend::Increasing);
    assert!(forecast.confidence > 0.5);
    assert!(forecast.point_estimate > 25.0);

    let assessor = RiskAssessor::default();
    let classification = assessor.assess(&forecast);
    assert_eq!(classification.level, RiskLevel::High);
    assert_eq!(classification.recommended_action, RecommendedAction::TriggerIntervention);

    let log = Arc::new(InMemoryDecisionLog::default());
    let config = SalesAgentConfig::default();
    let expected_threshold = config.base_threshold + config.threshold_delta;
    let sales = SalesAgent::new(engine, assessor, log.clone(), config);

    let decision = sales.evaluate_lead("lead-4821", 0.55);
    assert!(decision.forecast_influenced);
    match decision.outcome {
        DecisionOutcome::LeadRejected { threshold, .. } => {
            assert!((threshold - expected_threshold).abs() < 1e-12);
        }
        other => panic!("expected rejection under raised threshold, got {other:?}"),
    }
    assert_eq!(log.len(), 1);
}

#[test]
fn invalid_series_never_reaches_the_engine() {
    let empty = MetricSeries::new(Vec::new());
    assert!(matches!(empty.unwrap_err(), ForecastError::InvalidSeries(_)));

    // Nothing was registered, so the engine reports the metric unavailable
    // and agents fall back to baseline behavior.
    let engine = Arc::new(ForecastEngine::with_defaults());
    assert!(matches!(
        engine.get_forecast(&MetricName::daily_agent_load(), 7).unwrap_err(),
        ForecastError::Unavailable { .. }
    ));

    let log = Arc::new(InMemoryDecisionLog::default());
    let sales = SalesAgent::new(
        engine,
        RiskAssessor::default(),
        log.clone(),
        SalesAgentConfig::default(),
    );
    let decision = sales.evaluate_lead("lead-1", 0.7);
    assert!(!decision.forecast_influenced);
    assert!(matches!(decision.outcome, DecisionOutcome::LeadAccepted { .. }));
}

#[test]
fn short_series_degrades_and_downgrades() {
    let engine = Arc::new(ForecastEngine::with_defaults());
    // Two points: far below the primary's minimum, so the fallback serves,
    // and its confidence (0.4) sits below the downgrade cutoff.
    register_load(&engine, &[30.0, 31.0]);

    let forecast = engine.get_forecast(&MetricName::daily_agent_load(), 7).unwrap();
    assert_eq!(forecast.model_used, ModelSource::Fallback);
    assert!(forecast.confidence <= 0.70 + 1e-12);
    assert!(forecast.confidence < 0.5);

    let classification = RiskAssessor::default().assess(&forecast);
    // The two-point line projects well past the high boundary.
    assert_eq!(classification.level, RiskLevel::High);
    assert_eq!(classification.recommended_action, RecommendedAction::ContinueMonitoring);
    assert!(classification.action_downgraded);
}

#[test]
fn freshness_window_caches_and_reregistration_invalidates() {
    let engine = Arc::new(ForecastEngine::with_defaults());
    register_load(&engine, &[20.0; 30]);
    let name = MetricName::daily_agent_load();

    let first = engine.get_forecast(&name, 7).unwrap();
    let second = engine.get_forecast(&name, 7).unwrap();
    assert_eq!(first, second);

    register_load(&engine, &[40.0; 30]);
    let recomputed = engine.get_forecast(&name, 7).unwrap();
    assert!((recomputed.point_estimate - 40.0).abs() < 1e-6);
    assert!(recomputed.computed_at >= first.computed_at);
}

#[test]
fn degradation_drill_every_agent_acts_without_forecasts() {
    let engine = Arc::new(ForecastEngine::with_defaults());
    let assessor = RiskAssessor::default();
    let log = Arc::new(InMemoryDecisionLog::default());

    let sales = SalesAgent::new(
        engine.clone(),
        assessor.clone(),
        log.clone(),
        SalesAgentConfig::default(),
    );
    let marketing = MarketingAgent::new(
        engine.clone(),
        assessor.clone(),
        log.clone(),
        MarketingAgentConfig::default(),
    );
    let reassignment = ReassignmentAgent::new(
        engine,
        assessor,
        log.clone(),
        ReassignmentAgentConfig::default(),
    );

    let lead = sales.evaluate_lead("lead-1", 0.62);
    let campaign = marketing.plan_campaign("spring-launch", 40.0);
    let task = reassignment.review_task("task-1107", "agent-7");

    for decision in [&lead, &campaign, &task] {
        assert!(!decision.forecast_influenced);
        assert!(decision.classification.is_none());
    }
    assert!(matches!(lead.outcome, DecisionOutcome::LeadAccepted { .. }));
    assert!(matches!(
        campaign.outcome,
        DecisionOutcome::CampaignScaled { multiplier, .. } if multiplier == 1.0
    ));
    assert!(matches!(task.outcome, DecisionOutcome::TaskKept { .. }));
    assert_eq!(log.len(), 3);
}

#[test]
fn unregistered_metric_serves_stale_cached_forecasts() {
    let engine = ForecastEngine::new(EngineConfig {
        freshness_window: Duration::ZERO,
        max_horizon_days: 90,
    });
    register_load(&engine, &rising_load());
    let name = MetricName::daily_agent_load();

    let live = engine.get_forecast(&name, 7).unwrap();
    assert!(engine.unregister_metric(&name).unwrap());

    let rescued = engine.get_forecast(&name, 7).unwrap();
    assert_eq!(rescued.model_used, ModelSource::Cached);
    assert_eq!(rescued.point_estimate, live.point_estimate);

    // Clearing the cache removes the last-resort source.
    engine.invalidate_metric(&name).unwrap();
    assert!(matches!(
        engine.get_forecast(&name, 7).unwrap_err(),
        ForecastError::Unavailable { .. }
    ));
}

#[test]
fn appended_spike_feeds_through_to_reassignment() {
    let engine = Arc::new(ForecastEngine::with_defaults());
    // Comfortable load for four weeks.
    register_load(&engine, &[12.0; 28]);
    let name = MetricName::daily_agent_load();

    let log = Arc::new(InMemoryDecisionLog::default());
    let agent = ReassignmentAgent::new(
        engine.clone(),
        RiskAssessor::default(),
        log.clone(),
        ReassignmentAgentConfig::default(),
    );
    let calm = agent.review_task("task-1", "agent-3");
    assert!(matches!(calm.outcome, DecisionOutcome::TaskKept { .. }));

    // A week of sharply climbing load invalidates the cache and flips the
    // short-horizon outlook to high risk.
    let start = Utc.with_ymd_and_hms(2026, 2, 2, 0, 0, 0).unwrap();
    let spike: Vec<SeriesPoint> = (0..7)
        .map(|d| SeriesPoint::new(start + chrono::Duration::days(d), 30.0 + 5.0 * d as f64))
        .collect();
    engine.append_observations(&name, spike).unwrap();

    let pressured = agent.review_task("task-2", "agent-3");
    assert!(matches!(
        pressured.outcome,
        DecisionOutcome::TaskReassigned { ref to, .. } if to == "overflow-pool"
    ));
    assert_eq!(log.len(), 2);
}

#[test]
fn engine_forecast_serializes_to_json() {
    let engine = Arc::new(ForecastEngine::with_defaults());
    register_load(&engine, &rising_load());

    let forecast = engine.get_forecast(&MetricName::daily_agent_load(), 7).unwrap();
    let json = serde_json::to_string(&forecast).unwrap();

    assert!(json.contains("\"metric\":\"daily_agent_load\""));
    assert!(json.contains("\"model_used\":\"primary\""));
    assert!(json.contains("\"trend\":\"increasing\""));

    let restored: ForecastResult = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, forecast);
}
