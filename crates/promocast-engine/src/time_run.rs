//! The daily time-trigger run: weekend specials and payday sales.
//!
//! A much simpler sibling of the weather run — no external data, only
//! calendar arithmetic in the business's local timezone. Posts fire at
//! 10:00 local; if that moment has already passed when the run executes,
//! the schedule rolls to 10:00 the next day.

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveTime, TimeZone, Utc, Weekday};
use chrono_tz::Tz;
use promocast_core::AppConfig;
use promocast_db::BusinessRow;
use promocast_scheduler::ScheduleSink;

use crate::directory::Directory;
use crate::emitter::{schedule_name, EmitOutcome, ScheduleEmitter};
use crate::error::EngineError;
use crate::run::RunSummary;

/// Pay-day definition: the 1st and the 29th of each month.
const PAYDAY_DAYS: [u32; 2] = [1, 29];

const POST_HOUR_LOCAL: u32 = 10;

/// One full time-trigger pass over the business directory.
pub struct TimeTriggerRun<'a, D, S> {
    directory: &'a D,
    sink: &'a S,
    emitter: ScheduleEmitter,
    page_size: i64,
}

impl<'a, D, S> TimeTriggerRun<'a, D, S>
where
    D: Directory + Sync,
    S: ScheduleSink + Sync,
{
    pub fn new(directory: &'a D, sink: &'a S, config: &AppConfig) -> Self {
        Self {
            directory,
            sink,
            emitter: ScheduleEmitter::from_config(config),
            page_size: config.scan_page_size,
        }
    }

    /// Drives the scan to exhaustion and schedules any due time triggers.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Db`] if the directory scan fails. Everything
    /// else is contained per business.
    pub async fn execute(&self, now: DateTime<Utc>) -> Result<RunSummary, EngineError> {
        let mut summary = RunSummary::empty();
        tracing::info!(run_id = %summary.run_id, %now, "time-trigger run starting");

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
                    Ok((matched, scheduled)) => {
                        if matched == 0 {
                            summary.skipped += 1;
                        }
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
            matched = summary.triggers_matched,
            scheduled = summary.schedules_created,
            "time-trigger run complete"
        );
        Ok(summary)
    }

    async fn evaluate_business(
        &self,
        business: &BusinessRow,
        now: DateTime<Utc>,
    ) -> Result<(usize, usize), EngineError> {
        let prefs = business.time_prefs.0;
        if !prefs.any_enabled() {
            return Ok((0, 0));
        }

        // Unknown or missing timezone falls back to UTC; date-of-day logic
        // still works, it is just anchored to the wrong midnight.
        let tz: Tz = business
            .time_zone
            .as_deref()
            .and_then(|name| name.parse().ok())
            .unwrap_or(chrono_tz::UTC);
        let local_today = now.with_timezone(&tz).date_naive();

        let mut due: Vec<&'static str> = Vec::new();
        if prefs.weekend_specials && is_weekend(local_today) {
            due.push("weekend");
        }
        if prefs.payday_sales && is_payday(local_today) {
            due.push("payday");
        }

        let matched = due.len();
        let mut scheduled = 0;
        for trigger_type in due {
            let fire_at = next_post_time(local_today, tz, now);
            let name = schedule_name(trigger_type, &business.business_id, fire_at.timestamp());
            let input = serde_json::json!({
                "businessID": business.business_id,
                "triggerType": trigger_type,
                "triggerCategory": "timeBased",
                "scheduleName": name,
            });

            match self
                .emitter
                .emit(
                    self.sink,
                    self.directory,
                    &business.business_id,
                    trigger_type,
                    name,
                    fire_at,
                    input,
                )
                .await
            {
                Ok(EmitOutcome::Scheduled { .. }) => scheduled += 1,
                Ok(EmitOutcome::SkippedMissingConfig) => {}
                Err(e) => {
                    tracing::error!(
                        business_id = %business.business_id,
                        trigger = trigger_type,
                        error = %e,
                        "schedule creation failed"
                    );
                }
            }
        }

        Ok((matched, scheduled))
    }
}

fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

fn is_payday(date: NaiveDate) -> bool {
    PAYDAY_DAYS.contains(&date.day())
}

/// 10:00 local on `local_today` as UTC; rolled to the next day if that
/// moment is already past `now`.
fn next_post_time(local_today: NaiveDate, tz: Tz, now: DateTime<Utc>) -> DateTime<Utc> {
    let fire_at = local_ten_am_utc(local_today, tz);
    if fire_at > now {
        return fire_at;
    }
    local_ten_am_utc(local_today + Duration::days(1), tz)
}

fn local_ten_am_utc(date: NaiveDate, tz: Tz) -> DateTime<Utc> {
    let naive = date.and_time(NaiveTime::from_hms_opt(POST_HOUR_LOCAL, 0, 0).unwrap_or_default());
    // `earliest` resolves DST gaps/folds deterministically; 10:00 is never
    // inside a transition in practice.
    tz.from_local_datetime(&naive)
        .earliest()
        .map_or_else(|| naive.and_utc(), |local| local.with_timezone(&Utc))
}

#[cfg(test)]
mod tests {
    use super::*;
    use promocast_core::{TimePrefs, WeatherPrefs};
    use promocast_db::{DbError, UpcomingPost};
    use promocast_scheduler::{ScheduleRequest, SchedulerError};
    use sqlx::types::Json;
    use std::sync::Mutex;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn weekend_is_saturday_and_sunday() {
        assert!(is_weekend(date("2026-08-29"))); // Saturday
        assert!(is_weekend(date("2026-08-30"))); // Sunday
        assert!(!is_weekend(date("2026-08-31"))); // Monday
    }

    #[test]
    fn payday_is_first_and_twenty_ninth() {
        assert!(is_payday(date("2026-09-01")));
        assert!(is_payday(date("2026-08-29")));
        assert!(!is_payday(date("2026-08-15")));
    }

    #[test]
    fn post_time_is_ten_local_in_utc() {
        // 10:00 in New York during DST is 14:00Z.
        let tz: Tz = "America/New_York".parse().unwrap();
        let now = "2026-08-29T08:00:00Z".parse().unwrap();
        let fire_at = next_post_time(date("2026-08-29"), tz, now);
        assert_eq!(fire_at.to_rfc3339(), "2026-08-29T14:00:00+00:00");
    }

    #[test]
    fn past_post_time_rolls_to_next_day() {
        let tz = chrono_tz::UTC;
        let now = "2026-08-29T11:30:00Z".parse().unwrap();
        let fire_at = next_post_time(date("2026-08-29"), tz, now);
        assert_eq!(fire_at.to_rfc3339(), "2026-08-30T10:00:00+00:00");
    }

    #[test]
    fn exact_post_time_counts_as_past() {
        let tz = chrono_tz::UTC;
        let now = "2026-08-29T10:00:00Z".parse().unwrap();
        let fire_at = next_post_time(date("2026-08-29"), tz, now);
        assert_eq!(fire_at.to_rfc3339(), "2026-08-30T10:00:00+00:00");
    }

    // -- full run ----------------------------------------------------------

    #[derive(Default)]
    struct FakeDirectory {
        rows: Vec<BusinessRow>,
        posts: Mutex<Vec<(String, UpcomingPost)>>,
    }

    impl Directory for FakeDirectory {
        async fn scan_page(
            &self,
            after_id: Option<i64>,
            limit: i64,
        ) -> Result<Vec<BusinessRow>, DbError> {
            let after = after_id.unwrap_or(0);
            Ok(self
                .rows
                .iter()
                .filter(|r| r.id > after)
                .take(usize::try_from(limit).unwrap())
                .cloned()
                .collect())
        }

        async fn cache_coordinates(&self, _: &str, _: f64, _: f64) -> Result<(), DbError> {
            Ok(())
        }

        async fn append_upcoming_post(
            &self,
            business_id: &str,
            post: &UpcomingPost,
        ) -> Result<(), DbError> {
            self.posts
                .lock()
                .unwrap()
                .push((business_id.to_string(), post.clone()));
            Ok(())
        }
    }

    #[derive(Default)]
    struct RecordingSink {
        requests: Mutex<Vec<ScheduleRequest>>,
    }

    impl ScheduleSink for RecordingSink {
        async fn create_schedule(&self, request: &ScheduleRequest) -> Result<(), SchedulerError> {
            self.requests.lock().unwrap().push(request.clone());
            Ok(())
        }
    }

    fn config() -> AppConfig {
        AppConfig {
            database_url: "postgres://unused".to_string(),
            env: promocast_core::Environment::Test,
            log_level: "info".to_string(),
            geocoding_base_url: String::new(),
            archive_base_url: String::new(),
            forecast_base_url: String::new(),
            scheduler_base_url: String::new(),
            scheduler_target_arn: Some("arn:downstream:content-gen".to_string()),
            scheduler_role_arn: Some("arn:role:scheduler".to_string()),
            http_timeout_secs: 5,
            http_user_agent: "promocast-test".to_string(),
            db_max_connections: 1,
            db_min_connections: 1,
            db_acquire_timeout_secs: 1,
            scan_page_size: 100,
            detector: promocast_core::DetectorConfig::default(),
        }
    }

    fn business(id: i64, prefs: TimePrefs) -> BusinessRow {
        BusinessRow {
            id,
            business_id: format!("biz-{id}"),
            location: None,
            latitude: None,
            longitude: None,
            time_zone: Some("UTC".to_string()),
            open_time_local: None,
            close_time_local: None,
            weather_prefs: Json(WeatherPrefs::default()),
            time_prefs: Json(prefs),
        }
    }

    #[tokio::test]
    async fn saturday_the_29th_fires_both_time_triggers() {
        // 2026-08-29 is a Saturday and a payday.
        let prefs = TimePrefs {
            weekend_specials: true,
            payday_sales: true,
        };
        let directory = FakeDirectory {
            rows: vec![business(1, prefs)],
            ..FakeDirectory::default()
        };
        let sink = RecordingSink::default();
        let config = config();
        let now = "2026-08-29T08:00:00Z".parse().unwrap();

        let summary = TimeTriggerRun::new(&directory, &sink, &config)
            .execute(now)
            .await
            .unwrap();

        assert_eq!(summary.triggers_matched, 2);
        assert_eq!(summary.schedules_created, 2);

        let requests = sink.requests.lock().unwrap();
        let kinds: Vec<&str> = requests
            .iter()
            .map(|r| r.input["triggerType"].as_str().unwrap())
            .collect();
        assert_eq!(kinds, vec!["weekend", "payday"]);
        assert!(requests
            .iter()
            .all(|r| r.input["triggerCategory"] == "timeBased"));
        // Both fire at 10:00 UTC.
        assert!(requests
            .iter()
            .all(|r| r.fire_at.to_rfc3339() == "2026-08-29T10:00:00+00:00"));
    }

    #[tokio::test]
    async fn weekday_non_payday_matches_nothing() {
        let prefs = TimePrefs {
            weekend_specials: true,
            payday_sales: true,
        };
        let directory = FakeDirectory {
            rows: vec![business(1, prefs)],
            ..FakeDirectory::default()
        };
        let sink = RecordingSink::default();
        let config = config();
        // 2026-08-26 is a Wednesday.
        let now = "2026-08-26T08:00:00Z".parse().unwrap();

        let summary = TimeTriggerRun::new(&directory, &sink, &config)
            .execute(now)
            .await
            .unwrap();

        assert_eq!(summary.triggers_matched, 0);
        assert!(sink.requests.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn disabled_time_prefs_are_skipped() {
        let directory = FakeDirectory {
            rows: vec![business(1, TimePrefs::default())],
            ..FakeDirectory::default()
        };
        let sink = RecordingSink::default();
        let config = config();
        let now = "2026-08-29T08:00:00Z".parse().unwrap();

        let summary = TimeTriggerRun::new(&directory, &sink, &config)
            .execute(now)
            .await
            .unwrap();

        assert_eq!(summary.processed, 1);
        assert_eq!(summary.skipped, 1);
        assert!(sink.requests.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn unknown_timezone_falls_back_to_utc() {
        let prefs = TimePrefs {
            weekend_specials: true,
            payday_sales: false,
        };
        let mut row = business(1, prefs);
        row.time_zone = Some("Mars/Olympus".to_string());
        let directory = FakeDirectory {
            rows: vec![row],
            ..FakeDirectory::default()
        };
        let sink = RecordingSink::default();
        let config = config();
        let now = "2026-08-29T08:00:00Z".parse().unwrap();

        let summary = TimeTriggerRun::new(&directory, &sink, &config)
            .execute(now)
            .await
            .unwrap();

        assert_eq!(summary.schedules_created, 1);
    }
}
