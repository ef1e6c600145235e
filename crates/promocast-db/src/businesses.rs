//! Database operations for the `businesses` table.

use chrono::{DateTime, Utc};
use promocast_core::{TimePrefs, WeatherPrefs};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::PgPool;

use crate::DbError;

// ---------------------------------------------------------------------------
// Row types
// ---------------------------------------------------------------------------

/// The narrow projection of a `businesses` row the trigger runs read.
///
/// `upcoming_posts` is intentionally not part of the scan projection; the
/// emitter appends to it without reading it back.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct BusinessRow {
    pub id: i64,
    pub business_id: String,
    pub location: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub time_zone: Option<String>,
    pub open_time_local: Option<String>,
    pub close_time_local: Option<String>,
    pub weather_prefs: Json<WeatherPrefs>,
    pub time_prefs: Json<TimePrefs>,
}

/// One entry of the append-only `upcoming_posts` bookkeeping list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UpcomingPost {
    pub trigger_type: String,
    pub scheduled_time: DateTime<Utc>,
    pub schedule_name: String,
    pub status: String,
}

// ---------------------------------------------------------------------------
// Queries
// ---------------------------------------------------------------------------

/// Returns one page of the business directory, ordered by `id`.
///
/// Keyset pagination: pass `after_id = None` for the first page, then the
/// `id` of the last row of each page as the continuation token. A page
/// shorter than `limit` means the scan is exhausted.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn scan_businesses_page(
    pool: &PgPool,
    after_id: Option<i64>,
    limit: i64,
) -> Result<Vec<BusinessRow>, DbError> {
    let rows = sqlx::query_as::<_, BusinessRow>(
        "SELECT id, business_id, location, latitude, longitude, time_zone, \
                open_time_local, close_time_local, weather_prefs, time_prefs \
         FROM businesses \
         WHERE id > $1 \
         ORDER BY id \
         LIMIT $2",
    )
    .bind(after_id.unwrap_or(0))
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Writes resolved coordinates back onto the business record.
///
/// Plain set, so re-resolving the same location is idempotent.
///
/// # Errors
///
/// Returns [`DbError::NotFound`] if no row matches `business_id`, or
/// [`DbError::Sqlx`] if the query fails.
pub async fn cache_coordinates(
    pool: &PgPool,
    business_id: &str,
    latitude: f64,
    longitude: f64,
) -> Result<(), DbError> {
    let result = sqlx::query(
        "UPDATE businesses \
         SET latitude = $2, longitude = $3, updated_at = now() \
         WHERE business_id = $1",
    )
    .bind(business_id)
    .bind(latitude)
    .bind(longitude)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(DbError::NotFound);
    }
    Ok(())
}

/// Appends one entry to the business's `upcoming_posts` list.
///
/// A missing list is initialised to `[]` before the append, mirroring the
/// store's list-append-with-empty-default operation. Append-only: no
/// deduplication against entries already present.
///
/// # Errors
///
/// Returns [`DbError::NotFound`] if no row matches `business_id`, or
/// [`DbError::Sqlx`] if the query fails.
pub async fn append_upcoming_post(
    pool: &PgPool,
    business_id: &str,
    post: &UpcomingPost,
) -> Result<(), DbError> {
    let result = sqlx::query(
        "UPDATE businesses \
         SET upcoming_posts = COALESCE(upcoming_posts, '[]'::jsonb) || $2::jsonb, \
             updated_at = now() \
         WHERE business_id = $1",
    )
    .bind(business_id)
    .bind(Json(post))
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(DbError::NotFound);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upcoming_post_serializes_with_store_field_names() {
        let post = UpcomingPost {
            trigger_type: "hotWeather".to_string(),
            scheduled_time: "2026-07-04T15:00:00Z".parse().unwrap(),
            schedule_name: "hotWeather-biz12345-1751641200-a3f9".to_string(),
            status: "scheduled".to_string(),
        };
        let value = serde_json::to_value(&post).unwrap();
        assert_eq!(value["triggerType"], "hotWeather");
        assert_eq!(value["status"], "scheduled");
        assert!(value.get("scheduledTime").is_some());
        assert!(value.get("scheduleName").is_some());
    }
}
