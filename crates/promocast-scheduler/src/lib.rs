//! Client for the one-off scheduler collaborator.
//!
//! The scheduler accepts a uniquely named schedule with an absolute fire
//! time and an opaque JSON input; at fire time it invokes the downstream
//! content-generation target once. The [`ScheduleSink`] trait is the seam
//! the engine is written against, so tests can swap in an in-memory fake.

mod client;

pub use client::SchedulerClient;

use chrono::{DateTime, Utc};
use thiserror::Error;

/// A one-off schedule to be created.
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduleRequest {
    /// Globally unique schedule name.
    pub name: String,
    /// Absolute UTC fire time.
    pub fire_at: DateTime<Utc>,
    /// Downstream target the scheduler invokes.
    pub target_arn: String,
    /// Role the scheduler assumes for the invocation.
    pub role_arn: String,
    /// Opaque payload delivered to the target at fire time.
    pub input: serde_json::Value,
}

/// Errors returned by the scheduler client.
#[derive(Debug, Error)]
pub enum SchedulerError {
    /// Network, TLS, or non-2xx status from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The configured base URL does not parse.
    #[error("invalid scheduler base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}

/// Anything that can accept a one-off schedule.
///
/// Production uses [`SchedulerClient`]; engine tests use in-memory fakes.
pub trait ScheduleSink {
    fn create_schedule(
        &self,
        request: &ScheduleRequest,
    ) -> impl std::future::Future<Output = Result<(), SchedulerError>> + Send;
}
