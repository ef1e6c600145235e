//! Seam over the business directory store.
//!
//! The runs only need three operations; putting them behind a trait keeps
//! the orchestrators testable with an in-memory directory while production
//! delegates to the Postgres layer.

use std::future::Future;

use promocast_db::{BusinessRow, DbError, UpcomingPost};
use sqlx::PgPool;

/// The directory operations the trigger runs perform.
pub trait Directory {
    /// One page of the directory scan; see
    /// [`promocast_db::scan_businesses_page`] for the pagination contract.
    fn scan_page(
        &self,
        after_id: Option<i64>,
        limit: i64,
    ) -> impl Future<Output = Result<Vec<BusinessRow>, DbError>> + Send;

    fn cache_coordinates(
        &self,
        business_id: &str,
        latitude: f64,
        longitude: f64,
    ) -> impl Future<Output = Result<(), DbError>> + Send;

    fn append_upcoming_post(
        &self,
        business_id: &str,
        post: &UpcomingPost,
    ) -> impl Future<Output = Result<(), DbError>> + Send;
}

/// Production directory backed by the Postgres pool.
#[derive(Clone)]
pub struct PgDirectory {
    pool: PgPool,
}

impl PgDirectory {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl Directory for PgDirectory {
    async fn scan_page(
        &self,
        after_id: Option<i64>,
        limit: i64,
    ) -> Result<Vec<BusinessRow>, DbError> {
        promocast_db::scan_businesses_page(&self.pool, after_id, limit).await
    }

    async fn cache_coordinates(
        &self,
        business_id: &str,
        latitude: f64,
        longitude: f64,
    ) -> Result<(), DbError> {
        promocast_db::cache_coordinates(&self.pool, business_id, latitude, longitude).await
    }

    async fn append_upcoming_post(
        &self,
        business_id: &str,
        post: &UpcomingPost,
    ) -> Result<(), DbError> {
        promocast_db::append_upcoming_post(&self.pool, business_id, post).await
    }
}
