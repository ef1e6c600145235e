use std::time::Duration;

use reqwest::{Client, Url};
use serde::Serialize;

use crate::{ScheduleRequest, ScheduleSink, SchedulerError};

/// HTTP client for the one-off scheduler service.
#[derive(Debug)]
pub struct SchedulerClient {
    client: Client,
    base_url: Url,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateScheduleBody<'a> {
    name: &'a str,
    group_name: &'static str,
    /// Absolute-time expression, e.g. `at(2026-07-04T15:00:00)`.
    schedule_expression: String,
    flexible_time_window: FlexibleTimeWindow,
    target: TargetBody<'a>,
}

#[derive(Debug, Serialize)]
struct FlexibleTimeWindow {
    mode: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct TargetBody<'a> {
    arn: &'a str,
    role_arn: &'a str,
    /// The downstream payload, serialized to a JSON string as the scheduler
    /// treats it as opaque text.
    input: String,
}

impl SchedulerClient {
    /// Creates a client for the scheduler service at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`SchedulerError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`SchedulerError::InvalidBaseUrl`] if
    /// `base_url` does not parse.
    pub fn new(base_url: &str, timeout_secs: u64, user_agent: &str) -> Result<Self, SchedulerError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url =
            Url::parse(&normalised).map_err(|e| SchedulerError::InvalidBaseUrl {
                url: normalised.clone(),
                reason: e.to_string(),
            })?;

        Ok(Self { client, base_url })
    }
}

impl ScheduleSink for SchedulerClient {
    /// Creates a named one-off schedule.
    ///
    /// # Errors
    ///
    /// Returns [`SchedulerError::Http`] on network failure or a non-2xx
    /// response from the scheduler service.
    async fn create_schedule(&self, request: &ScheduleRequest) -> Result<(), SchedulerError> {
        let body = CreateScheduleBody {
            name: &request.name,
            group_name: "default",
            schedule_expression: at_expression(request.fire_at),
            flexible_time_window: FlexibleTimeWindow { mode: "OFF" },
            target: TargetBody {
                arn: &request.target_arn,
                role_arn: &request.role_arn,
                input: request.input.to_string(),
            },
        };

        // join cannot fail: base_url ends in "/" and the path is relative.
        let url = self
            .base_url
            .join("v1/schedules")
            .unwrap_or_else(|_| self.base_url.clone());

        self.client
            .post(url)
            .json(&body)
            .send()
            .await?
            .error_for_status()?;

        tracing::debug!(name = %request.name, fire_at = %request.fire_at, "schedule created");
        Ok(())
    }
}

/// Formats the scheduler's absolute-time expression: second precision,
/// no zone suffix (the service interprets the time as UTC).
fn at_expression(fire_at: chrono::DateTime<chrono::Utc>) -> String {
    format!("at({})", fire_at.format("%Y-%m-%dT%H:%M:%S"))
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
