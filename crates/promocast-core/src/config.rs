use crate::app_config::{AppConfig, DetectorConfig, Environment};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files — useful for testing
/// or when the caller manages env setup.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// This is the core parsing/validation logic, decoupled from the actual environment
/// so it can be tested with a pure `HashMap` lookup — no `set_var`/`remove_var` needed.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var).map_err(|_| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_i64 = |var: &str, default: &str| -> Result<i64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<i64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_f64 = |var: &str, default: &str| -> Result<f64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<f64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<usize>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let database_url = require("DATABASE_URL")?;
    let env = parse_environment(&or_default("PROMOCAST_ENV", "development"))?;
    let log_level = or_default("PROMOCAST_LOG_LEVEL", "info");

    let geocoding_base_url = or_default(
        "PROMOCAST_GEOCODING_BASE_URL",
        "https://geocoding-api.open-meteo.com",
    );
    let archive_base_url = or_default(
        "PROMOCAST_ARCHIVE_BASE_URL",
        "https://archive-api.open-meteo.com",
    );
    let forecast_base_url =
        or_default("PROMOCAST_FORECAST_BASE_URL", "https://api.open-meteo.com");
    let scheduler_base_url = or_default("PROMOCAST_SCHEDULER_BASE_URL", "http://127.0.0.1:8787");

    let scheduler_target_arn = lookup("PROMOCAST_SCHEDULER_TARGET_ARN").ok();
    let scheduler_role_arn = lookup("PROMOCAST_SCHEDULER_ROLE_ARN").ok();

    let http_timeout_secs = parse_u64("PROMOCAST_HTTP_TIMEOUT_SECS", "10")?;
    let http_user_agent = or_default(
        "PROMOCAST_HTTP_USER_AGENT",
        "promocast/0.1 (marketing-triggers)",
    );

    let db_max_connections = parse_u32("PROMOCAST_DB_MAX_CONNECTIONS", "10")?;
    let db_min_connections = parse_u32("PROMOCAST_DB_MIN_CONNECTIONS", "1")?;
    let db_acquire_timeout_secs = parse_u64("PROMOCAST_DB_ACQUIRE_TIMEOUT_SECS", "10")?;

    let scan_page_size = parse_i64("PROMOCAST_SCAN_PAGE_SIZE", "100")?;

    let detector = DetectorConfig {
        horizon_hours: parse_i64("PROMOCAST_FORECAST_HORIZON_HOURS", "3")?,
        threshold_multiplier: parse_f64("PROMOCAST_THRESHOLD_MULTIPLIER", "1.5")?,
        min_consecutive_hours: parse_usize("PROMOCAST_MIN_CONSECUTIVE_HOURS", "2")?,
        rain_threshold_mm: parse_f64("PROMOCAST_RAIN_THRESHOLD_MM", "0.2")?,
        baseline_days: parse_i64("PROMOCAST_BASELINE_DAYS", "30")?,
    };

    Ok(AppConfig {
        database_url,
        env,
        log_level,
        geocoding_base_url,
        archive_base_url,
        forecast_base_url,
        scheduler_base_url,
        scheduler_target_arn,
        scheduler_role_arn,
        http_timeout_secs,
        http_user_agent,
        db_max_connections,
        db_min_connections,
        db_acquire_timeout_secs,
        scan_page_size,
        detector,
    })
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "PROMOCAST_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
