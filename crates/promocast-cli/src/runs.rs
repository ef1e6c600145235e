//! Command handlers for the one-shot runs.
//!
//! These are called from `main` (and from the cron jobs in `watch`) after
//! the database pool and config are established.

use promocast_core::AppConfig;
use promocast_engine::{PgDirectory, RunSummary, TimeTriggerRun, WeatherRun};
use promocast_scheduler::SchedulerClient;
use promocast_weather::WeatherClient;
use sqlx::PgPool;

/// Drives one weather-trigger pass over the full directory.
///
/// # Errors
///
/// Returns an error if a client cannot be constructed or the directory scan
/// fails; per-business failures are contained inside the run.
pub(crate) async fn run_weather(pool: &PgPool, config: &AppConfig) -> anyhow::Result<RunSummary> {
    let directory = PgDirectory::new(pool.clone());
    let weather = WeatherClient::new(config)
        .map_err(|e| anyhow::anyhow!("failed to build weather client: {e}"))?;
    let sink = SchedulerClient::new(
        &config.scheduler_base_url,
        config.http_timeout_secs,
        &config.http_user_agent,
    )
    .map_err(|e| anyhow::anyhow!("failed to build scheduler client: {e}"))?;

    let run = WeatherRun::new(&directory, &weather, &sink, config);
    let summary = run.execute(chrono::Utc::now()).await?;
    Ok(summary)
}

/// Drives one time-trigger (weekend/payday) pass over the full directory.
///
/// # Errors
///
/// Returns an error if the scheduler client cannot be constructed or the
/// directory scan fails.
pub(crate) async fn run_time(pool: &PgPool, config: &AppConfig) -> anyhow::Result<RunSummary> {
    let directory = PgDirectory::new(pool.clone());
    let sink = SchedulerClient::new(
        &config.scheduler_base_url,
        config.http_timeout_secs,
        &config.http_user_agent,
    )
    .map_err(|e| anyhow::anyhow!("failed to build scheduler client: {e}"))?;

    let run = TimeTriggerRun::new(&directory, &sink, config);
    let summary = run.execute(chrono::Utc::now()).await?;
    Ok(summary)
}

/// The status object printed after a one-shot run.
pub(crate) fn summary_json(summary: &RunSummary) -> String {
    serde_json::json!({
        "runID": summary.run_id,
        "processed": summary.processed,
        "skipped": summary.skipped,
        "triggersMatched": summary.triggers_matched,
        "schedulesCreated": summary.schedules_created,
    })
    .to_string()
}
