//! Sustained-window trigger detection.
//!
//! A single anomalous forecast hour is as likely to be model noise as
//! weather; a condition only fires when it holds for a minimum number of
//! consecutive hours. Candidate start positions are scanned earliest-first,
//! and the business-hours gate is checked at the start position before the
//! statistical condition: the engine prefers the soonest actionable,
//! in-hours trigger over a marginally stronger later one.

use chrono::{DateTime, Utc};
use promocast_core::{DetectorConfig, TriggerKind};

use crate::baseline::ClimateBaseline;
use crate::hours::BusinessHours;
use crate::window::ForecastWindow;

/// A detected trigger for one business in one run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TriggerCandidate {
    pub kind: TriggerKind,
    /// Earliest qualifying hour offset into the window.
    pub start_index: usize,
    /// Timestamp of `start_index`.
    pub trigger_time: DateTime<Utc>,
}

/// Finds the earliest in-hours start index at which `kind`'s condition holds
/// for `config.min_consecutive_hours` consecutive hours, or `None`.
#[must_use]
pub fn detect_trigger(
    kind: TriggerKind,
    window: &ForecastWindow,
    baseline: ClimateBaseline,
    hours: &BusinessHours,
    config: &DetectorConfig,
) -> Option<TriggerCandidate> {
    let samples = window.samples();
    let min_hours = config.min_consecutive_hours.max(1);
    if samples.len() < min_hours {
        return None;
    }

    let threshold = config.threshold_multiplier * baseline.std_dev;

    for start in 0..=(samples.len() - min_hours) {
        // Gate first: an out-of-hours start is skipped without testing the
        // condition at all.
        if !hours.contains_utc(samples[start].time) {
            continue;
        }

        let sustained = samples[start..start + min_hours].iter().all(|sample| {
            match kind {
                TriggerKind::ColdWeather => baseline.mean - sample.temperature_c > threshold,
                TriggerKind::HotWeather => sample.temperature_c - baseline.mean > threshold,
                TriggerKind::Rain => sample.precipitation_mm > config.rain_threshold_mm,
            }
        });

        if sustained {
            return Some(TriggerCandidate {
                kind,
                start_index: start,
                trigger_time: samples[start].time,
            });
        }
    }

    None
}

#[cfg(test)]
#[path = "detector_test.rs"]
mod tests;
