/// Repository layer for database operations
use crate::domain::PrayerTime;
use crate::errors::{ApiError, ApiResult};
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

/// Storage key for the latest prayer-time list.
const PRAYER_TIMES_KEY: &str = "prayerTimes";

/// Durable local cache with one last-write-wins slot per key. The prayer
/// slot lets the taraweeh estimate read the latest Isha time without a
/// re-fetch.
#[derive(Clone)]
pub struct PrayerCacheRepo {
    pool: SqlitePool,
}

impl PrayerCacheRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Overwrite the prayer-time slot with the latest five-entry list.
    pub async fn write_prayer_times(&self, times: &[PrayerTime]) -> ApiResult<()> {
        let payload =
            serde_json::to_string(times).map_err(|e| ApiError::Internal(e.to_string()))?;

        sqlx::query(
            "INSERT INTO local_cache(key, payload, stored_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE SET payload = excluded.payload,
                                            stored_at = excluded.stored_at",
        )
        .bind(PRAYER_TIMES_KEY)
        .bind(payload)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Read back the stored prayer-time list, if any.
    pub async fn read_prayer_times(&self) -> ApiResult<Option<Vec<PrayerTime>>> {
        let row = sqlx::query_as::<_, (String, DateTime<Utc>)>(
            "SELECT payload, stored_at FROM local_cache WHERE key = ?1",
        )
        .bind(PRAYER_TIMES_KEY)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.and_then(|(payload, _)| serde_json::from_str(&payload).ok()))
    }
}

/// Initialize database tables
pub async fn init_db(pool: &SqlitePool) -> ApiResult<()> {
    sqlx::query(
        "CREATE TABLE IF NOT EXISTS local_cache(
            key TEXT PRIMARY KEY,
            payload TEXT NOT NULL,
            stored_at TEXT NOT NULL
        )",
    )
    .execute(pool)
    .await?;

    Ok(())
}
