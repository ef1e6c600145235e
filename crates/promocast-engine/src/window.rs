//! The evaluation window: hourly forecast samples within the horizon.

use chrono::{DateTime, Duration, Utc};
use promocast_weather::HourlyForecast;

/// One hourly forecast sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HourlySample {
    pub time: DateTime<Utc>,
    pub temperature_c: f64,
    pub precipitation_mm: f64,
}

/// Chronological hourly samples restricted to `[now, now + horizon]`.
///
/// The window length bounds how many sustained-window start positions the
/// detector can evaluate.
#[derive(Debug, Clone, Default)]
pub struct ForecastWindow {
    samples: Vec<HourlySample>,
}

impl ForecastWindow {
    /// Builds the window from a raw hourly forecast, keeping samples with
    /// `0 ≤ Δt ≤ horizon_hours` relative to `now`.
    #[must_use]
    pub fn from_forecast(
        forecast: &HourlyForecast,
        now: DateTime<Utc>,
        horizon_hours: i64,
    ) -> Self {
        let horizon = Duration::hours(horizon_hours);
        let samples = forecast
            .times
            .iter()
            .zip(&forecast.temperatures_c)
            .zip(&forecast.precipitation_mm)
            .filter(|((time, _), _)| {
                let delta = **time - now;
                delta >= Duration::zero() && delta <= horizon
            })
            .map(|((time, temp), precip)| HourlySample {
                time: *time,
                temperature_c: *temp,
                precipitation_mm: *precip,
            })
            .collect();
        Self { samples }
    }

    #[must_use]
    pub fn samples(&self) -> &[HourlySample] {
        &self.samples
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Temperatures of the window as a plain array, for the downstream payload.
    #[must_use]
    pub fn temperatures(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.temperature_c).collect()
    }

    /// Precipitation of the window as a plain array, for the downstream payload.
    #[must_use]
    pub fn precipitation(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.precipitation_mm).collect()
    }

    #[cfg(test)]
    pub(crate) fn from_samples(samples: Vec<HourlySample>) -> Self {
        Self { samples }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn forecast_at(hours: &[&str], temps: &[f64]) -> HourlyForecast {
        HourlyForecast {
            times: hours.iter().map(|h| h.parse().unwrap()).collect(),
            temperatures_c: temps.to_vec(),
            precipitation_mm: vec![0.0; temps.len()],
        }
    }

    #[test]
    fn keeps_now_through_horizon_inclusive() {
        let forecast = forecast_at(
            &[
                "2026-08-29T13:00:00Z",
                "2026-08-29T14:00:00Z",
                "2026-08-29T15:00:00Z",
                "2026-08-29T16:00:00Z",
                "2026-08-29T17:00:00Z",
                "2026-08-29T18:00:00Z",
            ],
            &[20.0, 21.0, 22.0, 23.0, 24.0, 25.0],
        );
        let now = "2026-08-29T14:00:00Z".parse().unwrap();
        let window = ForecastWindow::from_forecast(&forecast, now, 3);

        // 14:00 (Δ0) through 17:00 (Δ3h) inclusive; 13:00 and 18:00 dropped.
        assert_eq!(window.temperatures(), vec![21.0, 22.0, 23.0, 24.0]);
    }

    #[test]
    fn past_only_forecast_yields_empty_window() {
        let forecast = forecast_at(&["2026-08-29T10:00:00Z"], &[20.0]);
        let now = "2026-08-29T14:00:00Z".parse().unwrap();
        let window = ForecastWindow::from_forecast(&forecast, now, 3);
        assert!(window.is_empty());
    }

    #[test]
    fn window_preserves_chronological_order() {
        let forecast = forecast_at(
            &["2026-08-29T14:00:00Z", "2026-08-29T15:00:00Z"],
            &[21.0, 22.0],
        );
        let now = "2026-08-29T14:00:00Z".parse().unwrap();
        let window = ForecastWindow::from_forecast(&forecast, now, 3);
        assert!(window.samples()[0].time < window.samples()[1].time);
    }
}
