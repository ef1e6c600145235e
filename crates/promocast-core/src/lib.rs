//! Shared configuration and trigger vocabulary for the promocast workspace.
//!
//! Everything here is plain data: the env-driven [`AppConfig`], the
//! weather/time trigger vocabulary, and the detector tuning knobs. No I/O
//! lives in this crate.

mod app_config;
mod config;
mod triggers;

pub use app_config::{AppConfig, DetectorConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use triggers::{TimePrefs, TriggerKind, WeatherPrefs};

use thiserror::Error;

/// Errors raised while loading or validating application configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required env var: {0}")]
    MissingEnvVar(String),
    #[error("invalid value for env var {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
