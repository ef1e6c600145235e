//! Resident mode: registers the recurring trigger passes.
//!
//! Initialises a [`JobScheduler`] and registers the hourly weather pass and
//! the daily time-trigger pass. The returned handle must be kept alive for
//! the lifetime of the process — dropping it shuts down all jobs.

use std::sync::Arc;

use promocast_core::AppConfig;
use sqlx::PgPool;
use tokio_cron_scheduler::{Job, JobScheduler, JobSchedulerError};

use crate::runs;

/// Builds and starts the background job scheduler.
///
/// # Errors
///
/// Returns [`JobSchedulerError`] if the scheduler cannot be initialised,
/// a job cannot be registered, or the scheduler fails to start.
pub(crate) async fn build_scheduler(
    pool: PgPool,
    config: Arc<AppConfig>,
) -> Result<JobScheduler, JobSchedulerError> {
    let scheduler = JobScheduler::new().await?;

    register_weather_job(&scheduler, pool.clone(), Arc::clone(&config)).await?;
    register_time_job(&scheduler, pool, config).await?;

    scheduler.start().await?;
    Ok(scheduler)
}

/// Register the hourly weather-trigger pass (top of every hour, UTC).
async fn register_weather_job(
    scheduler: &JobScheduler,
    pool: PgPool,
    config: Arc<AppConfig>,
) -> Result<(), JobSchedulerError> {
    let job = Job::new_async("0 0 * * * *", move |_uuid, _lock| {
        let pool = pool.clone();
        let config = Arc::clone(&config);

        Box::pin(async move {
            tracing::info!("scheduler: starting hourly weather pass");
            match runs::run_weather(&pool, &config).await {
                Ok(summary) => tracing::info!(
                    processed = summary.processed,
                    scheduled = summary.schedules_created,
                    "scheduler: weather pass complete"
                ),
                Err(e) => tracing::error!(error = %e, "scheduler: weather pass failed"),
            }
        })
    })?;

    scheduler.add(job).await?;
    Ok(())
}

/// Register the daily time-trigger pass (05:00 UTC).
async fn register_time_job(
    scheduler: &JobScheduler,
    pool: PgPool,
    config: Arc<AppConfig>,
) -> Result<(), JobSchedulerError> {
    let job = Job::new_async("0 0 5 * * *", move |_uuid, _lock| {
        let pool = pool.clone();
        let config = Arc::clone(&config);

        Box::pin(async move {
            tracing::info!("scheduler: starting daily time-trigger pass");
            match runs::run_time(&pool, &config).await {
                Ok(summary) => tracing::info!(
                    processed = summary.processed,
                    scheduled = summary.schedules_created,
                    "scheduler: time-trigger pass complete"
                ),
                Err(e) => tracing::error!(error = %e, "scheduler: time-trigger pass failed"),
            }
        })
    })?;

    scheduler.add(job).await?;
    Ok(())
}
