use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;

/// A resolved geographic position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// Daily mean temperatures for a date range, as returned by the climate
/// archive. Entries are `None` where the archive has no sample for that day.
#[derive(Debug, Clone)]
pub struct DailySeries {
    pub dates: Vec<NaiveDate>,
    pub mean_temperatures: Vec<Option<f64>>,
}

/// Hourly forecast samples as parallel arrays, chronological, UTC.
#[derive(Debug, Clone)]
pub struct HourlyForecast {
    pub times: Vec<DateTime<Utc>>,
    pub temperatures_c: Vec<f64>,
    pub precipitation_mm: Vec<f64>,
}

impl HourlyForecast {
    #[must_use]
    pub fn len(&self) -> usize {
        self.times.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Wire shapes
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub(crate) struct GeocodeResponse {
    #[serde(default)]
    pub results: Vec<GeocodeResult>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GeocodeResult {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ArchiveResponse {
    pub daily: ArchiveDaily,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ArchiveDaily {
    pub time: Vec<NaiveDate>,
    pub temperature_2m_mean: Vec<Option<f64>>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ForecastResponse {
    pub hourly: ForecastHourly,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ForecastHourly {
    pub time: Vec<String>,
    pub temperature_2m: Vec<f64>,
    pub precipitation: Vec<f64>,
}
