//! Walks the full stack twice: a healthy pass with seeded series and live
//! forecasts, then a degraded pass against an empty engine, showing that
//! every agent keeps deciding when forecasting disappears.
//!
//! Run with `RUST_LOG=debug` to watch the engine's cache and fallback
//! decisions as they happen.

use std::sync::Arc;

use anyhow::Result;
use chrono::{TimeZone, Utc};
use colored::{ColoredString, Colorize};

use foresight_agents::{
    AgentDecision, DecisionOutcome, InMemoryDecisionLog, MarketingAgent, MarketingAgentConfig,
    ReassignmentAgent, ReassignmentAgentConfig, SalesAgent, SalesAgentConfig,
};
use foresight_engine::ForecastEngine;
use foresight_model::MetricProfile;
use foresight_risk::{RiskAssessor, RiskLevel};
use foresight_types::{MetricName, MetricSeries};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    banner("FORESIGHT · FORECAST-DRIVEN ADAPTATION");

    section("Healthy pass: seeded series, live forecasts");
    let engine = Arc::new(ForecastEngine::with_defaults());
    seed_metrics(&engine)?;
    show_forecast(&engine, &MetricName::daily_agent_load(), 7);
    show_forecast(&engine, &MetricName::escalation_likelihood(), 7);
    run_agents(&engine);

    section("Degraded pass: empty engine, baseline behavior");
    let cold = Arc::new(ForecastEngine::with_defaults());
    show_forecast(&cold, &MetricName::daily_agent_load(), 7);
    run_agents(&cold);

    banner("BOTH PASSES COMPLETE — NO AGENT FAILED");
    Ok(())
}

/// Ninety days of climbing load with a weekend bump, and a calm, slowly
/// easing escalation outlook.
fn seed_metrics(engine: &ForecastEngine) -> Result<()> {
    let start = Utc.with_ymd_and_hms(2026, 1, 5, 0, 0, 0).unwrap();

    let load: Vec<f64> = (0..90)
        .map(|d| 10.0 + 15.0 * d as f64 / 89.0 + if d % 7 >= 5 { 3.0 } else { 0.0 })
        .collect();
    engine.register_metric(
        MetricName::daily_agent_load(),
        MetricSeries::from_daily_values(start, &load)?,
        MetricProfile::daily_agent_load(),
    )?;

    let escalation: Vec<f64> = (0..45).map(|d| 0.30 - 0.15 * d as f64 / 44.0).collect();
    engine.register_metric(
        MetricName::escalation_likelihood(),
        MetricSeries::from_daily_values(start, &escalation)?,
        MetricProfile::probability(),
    )?;

    Ok(())
}

fn run_agents(engine: &Arc<ForecastEngine>) {
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
        engine.clone(),
        assessor,
        log.clone(),
        ReassignmentAgentConfig::default(),
    );

    print_decision(&sales.evaluate_lead("lead-4821", 0.55));
    print_decision(&sales.evaluate_lead("lead-4822", 0.71));
    print_decision(&marketing.plan_campaign("spring-launch", 40.0));
    print_decision(&reassignment.review_task("task-1107", "agent-7"));

    println!("\n  {} decisions recorded", log.len().to_string().bold());
}

fn show_forecast(engine: &ForecastEngine, metric: &MetricName, horizon_days: u32) {
    match engine.get_forecast(metric, horizon_days) {
        Ok(f) => println!(
            "  {:<24} {}d → {:>6.2}  [{:.2}, {:.2}]  trend {}  confidence {:.2}  via {}",
            metric.to_string().bold(),
            horizon_days,
            f.point_estimate,
            f.lower_bound,
            f.upper_bound,
            f.trend,
            f.confidence,
            f.model_used,
        ),
        Err(err) => println!(
            "  {:<24} {}d → {}",
            metric.to_string().bold(),
            horizon_days,
            err.to_string().red(),
        ),
    }
}

fn print_decision(decision: &AgentDecision) {
    let verdict = match &decision.outcome {
        DecisionOutcome::LeadAccepted { lead_id, score, threshold } => format!(
            "{} {lead_id} (score {score:.2} >= threshold {threshold:.2})",
            "ACCEPT".green().bold(),
        ),
        DecisionOutcome::LeadRejected { lead_id, score, threshold } => format!(
            "{} {lead_id} (score {score:.2} < threshold {threshold:.2})",
            "REJECT".red().bold(),
        ),
        DecisionOutcome::CampaignScaled { campaign_id, base_intensity, multiplier, scaled_intensity } => {
            format!(
                "{} {campaign_id} ({base_intensity:.0} × {multiplier:.1} → {scaled_intensity:.0})",
                "SCALE".cyan().bold(),
            )
        }
        DecisionOutcome::TaskKept { task_id, assignee } => {
            format!("{} {task_id} with {assignee}", "KEEP".blue().bold())
        }
        DecisionOutcome::TaskReassigned { task_id, from, to } => {
            format!("{} {task_id} {from} → {to}", "REASSIGN".magenta().bold())
        }
    };

    let context = match &decision.classification {
        Some(c) => format!("{} risk · {}", paint_level(c.level), c.recommended_action),
        None => "no forecast, baseline behavior".dimmed().to_string(),
    };

    println!("  [{:>12}] {verdict}  — {context}", decision.agent.to_string().bold());
}

fn paint_level(level: RiskLevel) -> ColoredString {
    match level {
        RiskLevel::Low => "low".green(),
        RiskLevel::Medium => "medium".yellow(),
        RiskLevel::High => "high".red(),
    }
}

fn banner(text: &str) {
    let line = "═".repeat(text.len() + 4);
    println!("\n{}", format!("╔{line}╗").cyan());
    println!("{}", format!("║  {text}  ║").cyan().bold());
    println!("{}", format!("╚{line}╝").cyan());
}

fn section(text: &str) {
    println!("\n{}\n", text.bold().underline());
}
