//! HTTP client for the geocoding, climate-archive, and forecast services.
//!
//! Wraps `reqwest` with per-endpoint URL construction and typed response
//! deserialization. Non-2xx statuses surface as [`WeatherError::Http`];
//! contract violations (missing results, ragged parallel arrays) surface
//! as their own variants so callers can log them distinctly.

use std::time::Duration;

use chrono::{NaiveDate, NaiveDateTime};
use reqwest::{Client, Url};

use crate::error::WeatherError;
use crate::types::{
    ArchiveResponse, Coordinates, DailySeries, ForecastResponse, GeocodeResponse, HourlyForecast,
};

/// Client for the three weather collaborators.
///
/// Use [`WeatherClient::new`] for production or
/// [`WeatherClient::with_base_urls`] to point at mock servers in tests.
pub struct WeatherClient {
    client: Client,
    geocoding_base: Url,
    archive_base: Url,
    forecast_base: Url,
}

impl WeatherClient {
    /// Creates a client from application configuration.
    ///
    /// # Errors
    ///
    /// Returns [`WeatherError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`WeatherError::MalformedResponse`] if a
    /// configured base URL does not parse.
    pub fn new(config: &promocast_core::AppConfig) -> Result<Self, WeatherError> {
        Self::with_base_urls(
            &config.geocoding_base_url,
            &config.archive_base_url,
            &config.forecast_base_url,
            config.http_timeout_secs,
            &config.http_user_agent,
        )
    }

    /// Creates a client with explicit base URLs (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`WeatherError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`WeatherError::MalformedResponse`] if a
    /// base URL does not parse.
    pub fn with_base_urls(
        geocoding_base: &str,
        archive_base: &str,
        forecast_base: &str,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, WeatherError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            client,
            geocoding_base: parse_base(geocoding_base)?,
            archive_base: parse_base(archive_base)?,
            forecast_base: parse_base(forecast_base)?,
        })
    }

    /// Resolves a free-text location to coordinates.
    ///
    /// Consumes the first result of the geocoding search.
    ///
    /// # Errors
    ///
    /// - [`WeatherError::NoResults`] if the search returns nothing.
    /// - [`WeatherError::Http`] on network failure or non-2xx status.
    /// - [`WeatherError::Deserialize`] on an unexpected body shape.
    pub async fn geocode(&self, location: &str) -> Result<Coordinates, WeatherError> {
        let url = build_url(
            &self.geocoding_base,
            "v1/search",
            &[("name", location), ("count", "1")],
        );
        let body: GeocodeResponse = self.request_json(url, "geocode").await?;

        body.results
            .first()
            .map(|r| Coordinates {
                latitude: r.latitude,
                longitude: r.longitude,
            })
            .ok_or_else(|| WeatherError::NoResults(location.to_owned()))
    }

    /// Fetches daily mean temperatures for `[start_date, end_date]` inclusive.
    ///
    /// Days the archive has no sample for come back as `None`; the caller
    /// filters them before computing statistics.
    ///
    /// # Errors
    ///
    /// - [`WeatherError::Http`] on network failure or non-2xx status.
    /// - [`WeatherError::Deserialize`] on an unexpected body shape.
    /// - [`WeatherError::MalformedResponse`] if the date and temperature
    ///   arrays disagree in length.
    pub async fn daily_mean_temperatures(
        &self,
        coords: Coordinates,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<DailySeries, WeatherError> {
        let latitude = coords.latitude.to_string();
        let longitude = coords.longitude.to_string();
        let start = start_date.to_string();
        let end = end_date.to_string();
        let url = build_url(
            &self.archive_base,
            "v1/archive",
            &[
                ("latitude", latitude.as_str()),
                ("longitude", longitude.as_str()),
                ("start_date", start.as_str()),
                ("end_date", end.as_str()),
                ("daily", "temperature_2m_mean"),
                ("timezone", "UTC"),
            ],
        );
        let body: ArchiveResponse = self.request_json(url, "archive").await?;

        if body.daily.time.len() != body.daily.temperature_2m_mean.len() {
            return Err(WeatherError::MalformedResponse {
                endpoint: "archive",
                reason: format!(
                    "{} dates but {} temperatures",
                    body.daily.time.len(),
                    body.daily.temperature_2m_mean.len()
                ),
            });
        }

        Ok(DailySeries {
            dates: body.daily.time,
            mean_temperatures: body.daily.temperature_2m_mean,
        })
    }

    /// Fetches the current day's hourly forecast (temperature and
    /// precipitation, UTC timestamps).
    ///
    /// # Errors
    ///
    /// - [`WeatherError::Http`] on network failure or non-2xx status.
    /// - [`WeatherError::Deserialize`] on an unexpected body shape.
    /// - [`WeatherError::MalformedResponse`] if the parallel hourly arrays
    ///   disagree in length or a timestamp does not parse.
    pub async fn hourly_forecast(
        &self,
        coords: Coordinates,
    ) -> Result<HourlyForecast, WeatherError> {
        let latitude = coords.latitude.to_string();
        let longitude = coords.longitude.to_string();
        let url = build_url(
            &self.forecast_base,
            "v1/forecast",
            &[
                ("latitude", latitude.as_str()),
                ("longitude", longitude.as_str()),
                ("hourly", "temperature_2m,precipitation"),
                ("forecast_days", "1"),
                ("timezone", "UTC"),
            ],
        );
        let body: ForecastResponse = self.request_json(url, "forecast").await?;

        let hourly = body.hourly;
        if hourly.time.len() != hourly.temperature_2m.len()
            || hourly.time.len() != hourly.precipitation.len()
        {
            return Err(WeatherError::MalformedResponse {
                endpoint: "forecast",
                reason: format!(
                    "ragged hourly arrays: {} times, {} temperatures, {} precipitation",
                    hourly.time.len(),
                    hourly.temperature_2m.len(),
                    hourly.precipitation.len()
                ),
            });
        }

        let mut times = Vec::with_capacity(hourly.time.len());
        for raw in &hourly.time {
            let parsed = parse_hour_utc(raw).ok_or_else(|| WeatherError::MalformedResponse {
                endpoint: "forecast",
                reason: format!("unparseable hourly timestamp '{raw}'"),
            })?;
            times.push(parsed);
        }

        Ok(HourlyForecast {
            times,
            temperatures_c: hourly.temperature_2m,
            precipitation_mm: hourly.precipitation,
        })
    }

    async fn request_json<T: serde::de::DeserializeOwned>(
        &self,
        url: Url,
        context: &'static str,
    ) -> Result<T, WeatherError> {
        let response = self.client.get(url).send().await?.error_for_status()?;
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| WeatherError::Deserialize {
            context: context.to_string(),
            source: e,
        })
    }
}

/// The API returns hour stamps without an offset when asked for UTC
/// (`2026-08-29T14:00`); full RFC 3339 stamps are accepted too.
fn parse_hour_utc(raw: &str) -> Option<chrono::DateTime<chrono::Utc>> {
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&chrono::Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M")
        .ok()
        .map(|naive| naive.and_utc())
}

fn parse_base(base_url: &str) -> Result<Url, WeatherError> {
    // Normalise: exactly one trailing slash so joins land on the root path.
    let normalised = format!("{}/", base_url.trim_end_matches('/'));
    Url::parse(&normalised).map_err(|e| WeatherError::MalformedResponse {
        endpoint: "config",
        reason: format!("invalid base URL '{base_url}': {e}"),
    })
}

fn build_url(base: &Url, path: &str, params: &[(&str, &str)]) -> Url {
    // `base` always ends in "/" (see parse_base), so join cannot fail for
    // a relative path.
    let mut url = base.join(path).unwrap_or_else(|_| base.clone());
    url.query_pairs_mut().extend_pairs(params);
    url
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
