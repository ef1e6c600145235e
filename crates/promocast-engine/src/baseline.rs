//! Climate baseline: trailing mean and population standard deviation of
//! daily mean temperature.

use chrono::{Duration, NaiveDate};

use crate::error::EngineError;

/// Minimum standard deviation, in °C. A degenerate series (one sample, or a
/// perfectly uniform climate) would otherwise make every threshold test
/// vacuous or impossible.
const STD_DEV_FLOOR_C: f64 = 0.5;

/// The reference statistics "hot" and "cold" are judged against.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClimateBaseline {
    pub mean: f64,
    pub std_dev: f64,
}

/// Returns the inclusive `[start, end]` date range for the baseline fetch:
/// the `days` days ending yesterday. Today is excluded because its archive
/// data may still be incomplete.
#[must_use]
pub fn baseline_range(today: NaiveDate, days: i64) -> (NaiveDate, NaiveDate) {
    (today - Duration::days(days), today - Duration::days(1))
}

/// Computes the baseline over the valid (non-missing) daily samples.
///
/// Uses the population standard deviation, clamped to a floor of 0.5 °C.
///
/// # Errors
///
/// Returns [`EngineError::NoHistoricalSamples`] if every sample is missing.
pub fn compute_baseline(samples: &[Option<f64>]) -> Result<ClimateBaseline, EngineError> {
    let valid: Vec<f64> = samples.iter().copied().flatten().collect();
    if valid.is_empty() {
        return Err(EngineError::NoHistoricalSamples);
    }

    #[allow(clippy::cast_precision_loss)]
    let n = valid.len() as f64;
    let mean = valid.iter().sum::<f64>() / n;
    let variance = valid.iter().map(|t| (t - mean).powi(2)).sum::<f64>() / n;
    let std_dev = variance.sqrt().max(STD_DEV_FLOOR_C);

    Ok(ClimateBaseline { mean, std_dev })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_ends_yesterday_never_today() {
        let today = NaiveDate::from_ymd_opt(2026, 8, 29).unwrap();
        let (start, end) = baseline_range(today, 30);
        assert_eq!(start, NaiveDate::from_ymd_opt(2026, 7, 30).unwrap());
        assert_eq!(end, NaiveDate::from_ymd_opt(2026, 8, 28).unwrap());
    }

    #[test]
    fn mean_and_population_std_dev() {
        // Population σ of [18, 20, 22] is sqrt(8/3) ≈ 1.633.
        let samples = vec![Some(18.0), Some(20.0), Some(22.0)];
        let baseline = compute_baseline(&samples).unwrap();
        assert!((baseline.mean - 20.0).abs() < 1e-9);
        assert!((baseline.std_dev - (8.0f64 / 3.0).sqrt()).abs() < 1e-9);
    }

    #[test]
    fn missing_samples_are_filtered() {
        let samples = vec![None, Some(10.0), None, Some(14.0)];
        let baseline = compute_baseline(&samples).unwrap();
        assert!((baseline.mean - 12.0).abs() < 1e-9);
    }

    #[test]
    fn uniform_series_clamps_std_dev_to_half_degree() {
        let samples = vec![Some(20.0); 30];
        let baseline = compute_baseline(&samples).unwrap();
        assert!((baseline.std_dev - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn single_sample_clamps_std_dev() {
        let baseline = compute_baseline(&[Some(7.5)]).unwrap();
        assert!((baseline.mean - 7.5).abs() < f64::EPSILON);
        assert!((baseline.std_dev - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn all_missing_is_an_error() {
        let result = compute_baseline(&[None, None]);
        assert!(matches!(result, Err(EngineError::NoHistoricalSamples)));
    }

    #[test]
    fn empty_series_is_an_error() {
        assert!(matches!(
            compute_baseline(&[]),
            Err(EngineError::NoHistoricalSamples)
        ));
    }
}
