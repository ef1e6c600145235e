//! Turns a matched trigger into a one-off schedule plus bookkeeping.

use chrono::{DateTime, Utc};
use promocast_db::UpcomingPost;
use promocast_scheduler::{ScheduleRequest, ScheduleSink};

use crate::directory::Directory;
use crate::error::EngineError;

/// Result of one emission attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmitOutcome {
    /// The schedule was created (the bookkeeping append may still have
    /// failed; that is logged, not rolled back).
    Scheduled { schedule_name: String },
    /// Scheduler target/role is not configured; nothing was created.
    SkippedMissingConfig,
}

/// Creates uniquely named one-off schedules for matched triggers.
pub struct ScheduleEmitter {
    target_arn: Option<String>,
    role_arn: Option<String>,
}

impl ScheduleEmitter {
    #[must_use]
    pub fn from_config(config: &promocast_core::AppConfig) -> Self {
        Self {
            target_arn: config.scheduler_target_arn.clone(),
            role_arn: config.scheduler_role_arn.clone(),
        }
    }

    #[must_use]
    pub fn new(target_arn: Option<String>, role_arn: Option<String>) -> Self {
        Self {
            target_arn,
            role_arn,
        }
    }

    /// Creates the schedule and appends the `upcoming_posts` entry.
    ///
    /// Missing target/role configuration is fail-open: an error is logged
    /// and [`EmitOutcome::SkippedMissingConfig`] returned so the run
    /// continues. A failed bookkeeping append after a successful schedule
    /// creation is logged and accepted — the schedule exists either way.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Scheduler`] if schedule creation itself fails.
    pub async fn emit<S: ScheduleSink + Sync, D: Directory + Sync>(
        &self,
        sink: &S,
        directory: &D,
        business_id: &str,
        trigger_type: &str,
        schedule_name: String,
        fire_at: DateTime<Utc>,
        input: serde_json::Value,
    ) -> Result<EmitOutcome, EngineError> {
        let (Some(target_arn), Some(role_arn)) = (&self.target_arn, &self.role_arn) else {
            tracing::error!(
                business_id,
                trigger_type,
                "scheduler target/role not configured; skipping schedule creation"
            );
            return Ok(EmitOutcome::SkippedMissingConfig);
        };

        sink.create_schedule(&ScheduleRequest {
            name: schedule_name.clone(),
            fire_at,
            target_arn: target_arn.clone(),
            role_arn: role_arn.clone(),
            input,
        })
        .await?;

        tracing::info!(
            business_id,
            trigger_type,
            schedule_name = %schedule_name,
            fire_at = %fire_at,
            "created one-off schedule"
        );

        let post = UpcomingPost {
            trigger_type: trigger_type.to_string(),
            scheduled_time: fire_at,
            schedule_name: schedule_name.clone(),
            status: "scheduled".to_string(),
        };
        if let Err(e) = directory.append_upcoming_post(business_id, &post).await {
            // The schedule exists; losing the bookkeeping entry is accepted.
            tracing::error!(
                business_id,
                schedule_name = %schedule_name,
                error = %e,
                "failed to append upcoming post"
            );
        }

        Ok(EmitOutcome::Scheduled { schedule_name })
    }
}

/// Builds a schedule name unique across runs and concurrent emissions:
/// trigger type, an 8-character business-id prefix, the trigger's epoch
/// seconds, and a random hex suffix.
#[must_use]
pub fn schedule_name(trigger_type: &str, business_id: &str, trigger_epoch: i64) -> String {
    let prefix: String = business_id.chars().take(8).collect();
    let suffix: u16 = rand::random();
    format!("{trigger_type}-{prefix}-{trigger_epoch}-{suffix:04x}")
}
