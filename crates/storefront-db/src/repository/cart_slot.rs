//! # Cart Slot Repository
//!
//! A tiny key → blob table. The cart adapter stores its serialized
//! `CartState` here under the `"cart"` key; this repository never looks
//! inside the blob.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;

/// Repository for persisted cart blobs.
#[derive(Debug, Clone)]
pub struct CartSlotRepository {
    pool: SqlitePool,
}

impl CartSlotRepository {
    /// Creates a new CartSlotRepository.
    pub fn new(pool: SqlitePool) -> Self {
        CartSlotRepository { pool }
    }

    /// Reads the blob stored under `key`.
    pub async fn get(&self, key: &str) -> DbResult<Option<Vec<u8>>> {
        let value: Option<Vec<u8>> =
            sqlx::query_scalar("SELECT value FROM cart_slots WHERE slot_key = ?1")
                .bind(key)
                .fetch_optional(&self.pool)
                .await?;

        Ok(value)
    }

    /// Writes `value` under `key`, replacing whatever was there.
    pub async fn set(&self, key: &str, value: &[u8]) -> DbResult<()> {
        debug!(key = %key, bytes = value.len(), "Writing cart slot");

        sqlx::query(
            r#"
            INSERT INTO cart_slots (slot_key, value, updated_at)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(slot_key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(key)
        .bind(value)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
