use thiserror::Error;

/// Errors raised while evaluating a single business.
///
/// All of these are contained at the per-business loop iteration in the run
/// orchestrators; only directory-scan failures abort a run.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The business has neither cached coordinates nor a location string.
    #[error("business has no location to geocode")]
    MissingLocation,

    /// The climate archive produced zero valid daily samples.
    #[error("no valid historical samples in the baseline window")]
    NoHistoricalSamples,

    #[error(transparent)]
    Weather(#[from] promocast_weather::WeatherError),

    #[error(transparent)]
    Scheduler(#[from] promocast_scheduler::SchedulerError),

    #[error(transparent)]
    Db(#[from] promocast_db::DbError),
}
