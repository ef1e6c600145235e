//! The hourly weather run: scan the directory, evaluate every opted-in
//! business, emit schedules for matched triggers.
//!
//! Per-business failures are logged and skipped rather than propagated so a
//! single bad business does not abort the full run. Only a failure of the
//! directory scan itself is fatal — nothing could be evaluated.

use chrono::{DateTime, SecondsFormat, Utc};
use promocast_core::{AppConfig, DetectorConfig, TriggerKind};
use promocast_db::BusinessRow;
use promocast_scheduler::ScheduleSink;
use promocast_weather::{Coordinates, WeatherClient};
use uuid::Uuid;

use crate::baseline::{baseline_range, compute_baseline};
use crate::detector::detect_trigger;
use crate::directory::Directory;
use crate::emitter::{schedule_name, EmitOutcome, ScheduleEmitter};
use crate::error::EngineError;
use crate::hours::BusinessHours;
use crate::window::ForecastWindow;

/// What one run did, for the invoker's status object and the logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub run_id: Uuid,
    /// Businesses seen by the scan.
    pub processed: usize,
    /// Businesses skipped: not opted in, or failed upstream.
    pub skipped: usize,
    /// Triggers that were detected and survived preference matching.
    pub triggers_matched: usize,
    /// One-off schedules actually created.
    pub schedules_created: usize,
}

impl RunSummary {
    pub(crate) fn empty() -> Self {
        Self {
            run_id: Uuid::new_v4(),
            processed: 0,
            skipped: 0,
            triggers_matched: 0,
            schedules_created: 0,
        }
    }
}

enum BusinessOutcome {
    NotOptedIn,
    Evaluated { matched: usize, scheduled: usize },
}

/// One full weather-trigger pass over the business directory.
pub struct WeatherRun<'a, D, S> {
    directory: &'a D,
    weather: &'a WeatherClient,
    sink: &'a S,
    emitter: ScheduleEmitter,
    detector: DetectorConfig,
    page_size: i64,
}

impl<'a, D, S> WeatherRun<'a, D, S>
where
    D: Directory + Sync,
    S: ScheduleSink + Sync,
{
    pub fn new(directory: &'a D, weather: &'a WeatherClient, sink: &'a S, config: &AppConfig) -> Self {
        Self {
            directory,
            weather,
            sink,
            emitter: ScheduleEmitter::from_config(config),
            detector: config.detector,
            page_size: config.scan_page_size,
        }
    }

    /// Drives the scan to exhaustion and evaluates each business.
    ///
    /// `now` is injected so the window arithmetic is deterministic in tests;
    /// production passes `Utc::now()`.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Db`] if the directory scan fails. Everything
    /// else is contained per business.
    pub async fn execute(&self, now: DateTime<Utc>) -> Result<RunSummary, EngineError> {
        let mut summary = RunSummary::empty();
        tracing::info!(run_id = %summary.run_id, %now, "weather run starting");

        let mut after_id: Option<i64> = None;
        loop {
            let page = self.directory.scan_page(after_id, self.page_size).await?;
            let Some(last) = page.last() else {
                break;
            };
            after_id = Some(last.id);
            let exhausted = i64::try_from(page.len()).unwrap_or(i64::MAX) < self.page_size;

            for business in &page {
                summary.processed += 1;
                match self.evaluate_business(business, now).await {
                    Ok(BusinessOutcome::NotOptedIn) => {
                        summary.skipped += 1;
                        tracing::debug!(
                            business_id = %business.business_id,
                            "no weather trigger enabled; skipping"
                        );
                    }
                    Ok(BusinessOutcome::Evaluated { matched, scheduled }) => {
                        summary.triggers_matched += matched;
                        summary.schedules_created += scheduled;
                    }
                    Err(e) => {
                        summary.skipped += 1;
                        tracing::warn!(
                            business_id = %business.business_id,
                            error = %e,
                            "skipping business for this run"
                        );
                    }
                }
            }

            if exhausted {
                break;
            }
        }

        tracing::info!(
            run_id = %summary.run_id,
            processed = summary.processed,
            skipped = summary.skipped,
            matched = summary.triggers_matched,
            scheduled = summary.schedules_created,
            "weather run complete"
        );
        Ok(summary)
    }

    async fn evaluate_business(
        &self,
        business: &BusinessRow,
        now: DateTime<Utc>,
    ) -> Result<BusinessOutcome, EngineError> {
        let prefs = business.weather_prefs.0;
        if !prefs.any_enabled() {
            return Ok(BusinessOutcome::NotOptedIn);
        }

        let coords = self.resolve_coordinates(business).await?;

        let (start, end) = baseline_range(now.date_naive(), self.detector.baseline_days);
        let series = self
            .weather
            .daily_mean_temperatures(coords, start, end)
            .await?;
        let baseline = compute_baseline(&series.mean_temperatures)?;

        let forecast = self.weather.hourly_forecast(coords).await?;
        let window = ForecastWindow::from_forecast(&forecast, now, self.detector.horizon_hours);

        let hours = BusinessHours::from_record(
            business.open_time_local.as_deref(),
            business.close_time_local.as_deref(),
            business.time_zone.as_deref(),
        );

        let mut matched = 0;
        let mut scheduled = 0;
        for kind in TriggerKind::ALL {
            let Some(candidate) = detect_trigger(kind, &window, baseline, &hours, &self.detector)
            else {
                continue;
            };
            if !prefs.allows(kind) {
                tracing::debug!(
                    business_id = %business.business_id,
                    trigger = %kind,
                    "trigger detected but not opted in; discarding"
                );
                continue;
            }
            matched += 1;

            let name = schedule_name(
                kind.as_str(),
                &business.business_id,
                candidate.trigger_time.timestamp(),
            );
            let input = weather_payload(business, kind, coords, &window, candidate.trigger_time, &name, now);

            match self
                .emitter
                .emit(
                    self.sink,
                    self.directory,
                    &business.business_id,
                    kind.as_str(),
                    name,
                    candidate.trigger_time,
                    input,
                )
                .await
            {
                Ok(EmitOutcome::Scheduled { .. }) => scheduled += 1,
                Ok(EmitOutcome::SkippedMissingConfig) => {}
                Err(e) => {
                    tracing::error!(
                        business_id = %business.business_id,
                        trigger = %kind,
                        error = %e,
                        "schedule creation failed"
                    );
                }
            }
        }

        Ok(BusinessOutcome::Evaluated { matched, scheduled })
    }

    /// Returns cached coordinates, or geocodes the free-text location and
    /// writes the result back. A failed cache write is logged and the
    /// freshly resolved coordinates used anyway.
    async fn resolve_coordinates(&self, business: &BusinessRow) -> Result<Coordinates, EngineError> {
        if let (Some(latitude), Some(longitude)) = (business.latitude, business.longitude) {
            return Ok(Coordinates {
                latitude,
                longitude,
            });
        }

        let location = business
            .location
            .as_deref()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .ok_or(EngineError::MissingLocation)?;

        let coords = self.weather.geocode(location).await?;
        if let Err(e) = self
            .directory
            .cache_coordinates(&business.business_id, coords.latitude, coords.longitude)
            .await
        {
            tracing::warn!(
                business_id = %business.business_id,
                error = %e,
                "failed to cache resolved coordinates"
            );
        }
        Ok(coords)
    }
}

/// The detail object delivered to the content-generation target.
fn weather_payload(
    business: &BusinessRow,
    kind: TriggerKind,
    coords: Coordinates,
    window: &ForecastWindow,
    trigger_time: DateTime<Utc>,
    schedule_name: &str,
    detected_at: DateTime<Utc>,
) -> serde_json::Value {
    serde_json::json!({
        "businessID": business.business_id,
        "triggerType": kind.as_str(),
        "triggerCategory": "weather",
        "city": business.location.as_deref().unwrap_or_default(),
        "latitude": coords.latitude,
        "longitude": coords.longitude,
        "temperature": window.temperatures(),
        "precipitation": window.precipitation(),
        "triggerTime": trigger_time.to_rfc3339_opts(SecondsFormat::Secs, true),
        "scheduleName": schedule_name,
        "timestamp": detected_at.to_rfc3339_opts(SecondsFormat::Secs, true),
    })
}

#[cfg(test)]
#[path = "run_test.rs"]
mod tests;
