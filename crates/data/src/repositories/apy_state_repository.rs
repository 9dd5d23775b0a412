//! APY state repository, one row per session key.

use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use std::sync::Arc;
use uuid::Uuid;
use vault_analytics::ApyState;

/// Database record for persisted APY state.
#[derive(Debug, Clone)]
pub struct ApyStateRecord {
    /// Unique identifier.
    pub id: Uuid,
    /// Opaque session identifier the state is keyed by.
    pub session_key: String,
    /// TVL of the previous observation.
    pub last_tvl: Option<f64>,
    /// Timestamp of the previous observation, seconds since epoch.
    pub last_timestamp: Option<i64>,
    /// Most recently computed APY percentage.
    pub last_apy: Option<f64>,
    /// Record update timestamp.
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl ApyStateRecord {
    /// Creates an ApyStateRecord from a database row.
    fn from_row(row: &PgRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            session_key: row.try_get("session_key")?,
            last_tvl: row.try_get("last_tvl")?,
            last_timestamp: row.try_get("last_timestamp")?,
            last_apy: row.try_get("last_apy")?,
            updated_at: row.try_get("updated_at")?,
        })
    }

    /// The analytics-layer view of this record.
    #[must_use]
    pub fn to_state(&self) -> ApyState {
        ApyState {
            last_tvl: self.last_tvl,
            last_timestamp: self.last_timestamp,
            last_apy: self.last_apy,
        }
    }
}

/// Repository for APY state CRUD operations.
#[derive(Clone)]
pub struct ApyStateRepository {
    pool: Arc<PgPool>,
}

impl ApyStateRepository {
    /// Creates a new ApyStateRepository.
    #[must_use]
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }

    /// Inserts or overwrites the state for a session key.
    ///
    /// # Errors
    /// Returns an error if the query fails.
    pub async fn upsert(
        &self,
        session_key: &str,
        state: &ApyState,
    ) -> Result<ApyStateRecord, sqlx::Error> {
        let row = sqlx::query(
            r#"
            INSERT INTO apy_state (id, session_key, last_tvl, last_timestamp, last_apy)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (session_key) DO UPDATE SET
                last_tvl = EXCLUDED.last_tvl,
                last_timestamp = EXCLUDED.last_timestamp,
                last_apy = EXCLUDED.last_apy,
                updated_at = now()
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(session_key)
        .bind(state.last_tvl)
        .bind(state.last_timestamp)
        .bind(state.last_apy)
        .fetch_one(self.pool.as_ref())
        .await?;
        ApyStateRecord::from_row(&row)
    }

    /// Finds the state for a session key.
    ///
    /// # Errors
    /// Returns an error if the query fails.
    pub async fn find_by_key(
        &self,
        session_key: &str,
    ) -> Result<Option<ApyStateRecord>, sqlx::Error> {
        let row = sqlx::query("SELECT * FROM apy_state WHERE session_key = $1")
            .bind(session_key)
            .fetch_optional(self.pool.as_ref())
            .await?;
        row.as_ref().map(ApyStateRecord::from_row).transpose()
    }

    /// Deletes the state for a session key.
    ///
    /// # Errors
    /// Returns an error if the query fails.
    pub async fn delete_by_key(&self, session_key: &str) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM apy_state WHERE session_key = $1")
            .bind(session_key)
            .execute(self.pool.as_ref())
            .await?;
        Ok(result.rows_affected())
    }
}
