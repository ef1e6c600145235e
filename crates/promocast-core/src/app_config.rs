#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Tuning knobs for the weather trigger detector.
///
/// The detection algorithm has been reworked several times (12-hour vs
/// 3-hour horizons, different threshold strategies), so every parameter is
/// configuration rather than a constant baked into the detector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DetectorConfig {
    /// Forecast evaluation horizon from "now", in hours.
    pub horizon_hours: i64,
    /// Threshold = `threshold_multiplier` × baseline std-dev.
    pub threshold_multiplier: f64,
    /// A condition must hold for this many consecutive hours to fire.
    pub min_consecutive_hours: usize,
    /// Hourly precipitation above this counts as rain, in millimetres.
    pub rain_threshold_mm: f64,
    /// Length of the trailing daily-mean window used for the baseline.
    pub baseline_days: i64,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            horizon_hours: 3,
            threshold_multiplier: 1.5,
            min_consecutive_hours: 2,
            rain_threshold_mm: 0.2,
            baseline_days: 30,
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub env: Environment,
    pub log_level: String,
    pub geocoding_base_url: String,
    pub archive_base_url: String,
    pub forecast_base_url: String,
    pub scheduler_base_url: String,
    /// Identifier of the downstream content-generation target. When unset,
    /// schedule creation is skipped with an error log rather than failing
    /// the run.
    pub scheduler_target_arn: Option<String>,
    /// Role the scheduler assumes to invoke the target. Same fail-open
    /// behaviour as `scheduler_target_arn`.
    pub scheduler_role_arn: Option<String>,
    pub http_timeout_secs: u64,
    pub http_user_agent: String,
    pub db_max_connections: u32,
    pub db_min_connections: u32,
    pub db_acquire_timeout_secs: u64,
    pub scan_page_size: i64,
    pub detector: DetectorConfig,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("log_level", &self.log_level)
            .field("database_url", &"[redacted]")
            .field("geocoding_base_url", &self.geocoding_base_url)
            .field("archive_base_url", &self.archive_base_url)
            .field("forecast_base_url", &self.forecast_base_url)
            .field("scheduler_base_url", &self.scheduler_base_url)
            .field(
                "scheduler_target_arn",
                &self.scheduler_target_arn.as_ref().map(|_| "[redacted]"),
            )
            .field(
                "scheduler_role_arn",
                &self.scheduler_role_arn.as_ref().map(|_| "[redacted]"),
            )
            .field("http_timeout_secs", &self.http_timeout_secs)
            .field("http_user_agent", &self.http_user_agent)
            .field("db_max_connections", &self.db_max_connections)
            .field("db_min_connections", &self.db_min_connections)
            .field("db_acquire_timeout_secs", &self.db_acquire_timeout_secs)
            .field("scan_page_size", &self.scan_page_size)
            .field("detector", &self.detector)
            .finish()
    }
}
