use super::*;
use crate::window::HourlySample;

fn window_from(temps: &[f64], precip: &[f64]) -> ForecastWindow {
    assert_eq!(temps.len(), precip.len());
    let base: DateTime<Utc> = "2026-08-29T14:00:00Z".parse().unwrap();
    let samples = temps
        .iter()
        .zip(precip)
        .enumerate()
        .map(|(i, (t, p))| HourlySample {
            time: base + chrono::Duration::hours(i64::try_from(i).unwrap()),
            temperature_c: *t,
            precipitation_mm: *p,
        })
        .collect();
    ForecastWindow::from_samples(samples)
}

fn baseline(mean: f64, std_dev: f64) -> ClimateBaseline {
    ClimateBaseline { mean, std_dev }
}

fn config() -> DetectorConfig {
    DetectorConfig::default()
}

#[test]
fn hot_trigger_fires_on_sustained_exceedance() {
    // mean 20, σ 2 → threshold 3; both leading hours exceed 23.
    let window = window_from(&[24.5, 24.8, 24.2], &[0.0, 0.0, 0.0]);
    let found = detect_trigger(
        TriggerKind::HotWeather,
        &window,
        baseline(20.0, 2.0),
        &BusinessHours::always_open(),
        &config(),
    )
    .unwrap();
    assert_eq!(found.start_index, 0);
    assert_eq!(found.trigger_time.to_rfc3339(), "2026-08-29T14:00:00+00:00");
}

#[test]
fn cold_trigger_fires_on_sustained_drop() {
    let window = window_from(&[16.0, 16.4, 21.0], &[0.0, 0.0, 0.0]);
    let found = detect_trigger(
        TriggerKind::ColdWeather,
        &window,
        baseline(20.0, 2.0),
        &BusinessHours::always_open(),
        &config(),
    )
    .unwrap();
    assert_eq!(found.kind, TriggerKind::ColdWeather);
    assert_eq!(found.start_index, 0);
}

#[test]
fn isolated_spike_does_not_fire() {
    // Only hour 1 exceeds the threshold; min_consecutive_hours = 2.
    let window = window_from(&[21.0, 24.5, 21.0], &[0.0, 0.0, 0.0]);
    let found = detect_trigger(
        TriggerKind::HotWeather,
        &window,
        baseline(20.0, 2.0),
        &BusinessHours::always_open(),
        &config(),
    );
    assert!(found.is_none());
}

#[test]
fn boundary_exceedance_is_strict() {
    // Exactly mean + threshold does not qualify; the comparison is strict.
    let window = window_from(&[23.0, 23.0], &[0.0, 0.0]);
    let found = detect_trigger(
        TriggerKind::HotWeather,
        &window,
        baseline(20.0, 2.0),
        &BusinessHours::always_open(),
        &config(),
    );
    assert!(found.is_none());
}

#[test]
fn returns_earliest_qualifying_index() {
    // Both index 1 and index 2 start sustained runs; earliest wins.
    let window = window_from(&[21.0, 24.5, 24.8, 24.2], &[0.0; 4]);
    let found = detect_trigger(
        TriggerKind::HotWeather,
        &window,
        baseline(20.0, 2.0),
        &BusinessHours::always_open(),
        &config(),
    )
    .unwrap();
    assert_eq!(found.start_index, 1);
}

#[test]
fn rain_uses_absolute_precipitation_threshold() {
    let window = window_from(&[20.0, 20.0, 20.0], &[0.3, 0.5, 0.0]);
    let found = detect_trigger(
        TriggerKind::Rain,
        &window,
        baseline(20.0, 2.0),
        &BusinessHours::always_open(),
        &config(),
    )
    .unwrap();
    assert_eq!(found.start_index, 0);
}

#[test]
fn drizzle_at_threshold_does_not_count_as_rain() {
    let window = window_from(&[20.0, 20.0], &[0.2, 0.2]);
    let found = detect_trigger(
        TriggerKind::Rain,
        &window,
        baseline(20.0, 2.0),
        &BusinessHours::always_open(),
        &config(),
    );
    assert!(found.is_none());
}

#[test]
fn out_of_hours_start_is_skipped_in_favour_of_later_in_hours_start() {
    // Window starts 14:00Z. Hours 15:00–23:00 UTC: index 0 (14:00) is out of
    // hours even though the condition holds there; index 1 qualifies.
    let window = window_from(&[24.5, 24.8, 24.2], &[0.0; 3]);
    let hours = BusinessHours::from_record(Some("15:00"), Some("23:00"), Some("UTC"));
    let found = detect_trigger(
        TriggerKind::HotWeather,
        &window,
        baseline(20.0, 2.0),
        &hours,
        &config(),
    )
    .unwrap();
    assert_eq!(found.start_index, 1);
}

#[test]
fn fully_out_of_hours_window_finds_nothing() {
    let window = window_from(&[24.5, 24.8, 24.2], &[0.0; 3]);
    let hours = BusinessHours::from_record(Some("02:00"), Some("05:00"), Some("UTC"));
    let found = detect_trigger(
        TriggerKind::HotWeather,
        &window,
        baseline(20.0, 2.0),
        &hours,
        &config(),
    );
    assert!(found.is_none());
}

#[test]
fn window_shorter_than_min_hours_finds_nothing() {
    let window = window_from(&[24.5], &[0.0]);
    let found = detect_trigger(
        TriggerKind::HotWeather,
        &window,
        baseline(20.0, 2.0),
        &BusinessHours::always_open(),
        &config(),
    );
    assert!(found.is_none());
}

#[test]
fn min_hours_is_configurable() {
    let mut cfg = config();
    cfg.min_consecutive_hours = 3;
    // Sustained for only two hours: not enough at min_hours = 3.
    let window = window_from(&[24.5, 24.8, 21.0, 21.0], &[0.0; 4]);
    assert!(detect_trigger(
        TriggerKind::HotWeather,
        &window,
        baseline(20.0, 2.0),
        &BusinessHours::always_open(),
        &cfg,
    )
    .is_none());

    let window = window_from(&[24.5, 24.8, 24.2, 21.0], &[0.0; 4]);
    assert!(detect_trigger(
        TriggerKind::HotWeather,
        &window,
        baseline(20.0, 2.0),
        &BusinessHours::always_open(),
        &cfg,
    )
    .is_some());
}

#[test]
fn clamped_std_dev_keeps_thresholds_meaningful() {
    // Uniform climate: σ floored to 0.5 → threshold 0.75. A 1 °C bump fires.
    let window = window_from(&[21.0, 21.0], &[0.0, 0.0]);
    let found = detect_trigger(
        TriggerKind::HotWeather,
        &window,
        baseline(20.0, 0.5),
        &BusinessHours::always_open(),
        &config(),
    );
    assert!(found.is_some());
}
