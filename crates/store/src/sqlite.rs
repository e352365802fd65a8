//! SQLite-backed pending-request store using sqlx.
//!
//! Schema: `pending_requests(slot, destination, metadata, created_at)` with
//! primary key `slot` — at most one outstanding record per slot, and an
//! `INSERT .. ON CONFLICT` upsert gives new switches overwrite semantics.
//!
//! The metadata document is sealed with [`MetadataCipher`] before it touches
//! disk; slot and destination are matching keys and stay queryable.

use crate::MetadataCipher;
use async_trait::async_trait;
use payswitch_types::{
    Destination, PendingRequestStore, Slot, SwitchError, SwitchRequest, traits::Result,
};
use sqlx::{
    SqlitePool,
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
};
use std::str::FromStr;

/// A crash-durable [`PendingRequestStore`] backed by `SQLite`.
pub struct SqlitePendingStore {
    /// Connection pool to the `SQLite` database.
    pool: SqlitePool,
    cipher: MetadataCipher,
}

impl SqlitePendingStore {
    /// Connects to a `SQLite` database (e.g. `"sqlite:./payswitch.db"` or
    /// `"sqlite::memory:"`) and seals metadata under `key`.
    ///
    /// Automatically creates the database file if it does not exist and
    /// runs migrations to create the schema.
    ///
    /// # Errors
    ///
    /// Returns a [`sqlx::Error`] if the connection or table creation fails.
    pub async fn new(database_url: &str, key: &[u8; 32]) -> std::result::Result<Self, sqlx::Error> {
        let opts = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(opts)
            .await?;
        Self::migrate(&pool).await?;
        Ok(Self {
            pool,
            cipher: MetadataCipher::new(key),
        })
    }

    /// Create the `pending_requests` table if it does not exist (idempotent).
    async fn migrate(pool: &SqlitePool) -> std::result::Result<(), sqlx::Error> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS pending_requests (
                slot        TEXT    NOT NULL PRIMARY KEY,
                destination TEXT    NOT NULL,
                metadata    BLOB    NOT NULL,
                created_at  INTEGER NOT NULL
            )",
        )
        .execute(pool)
        .await?;
        Ok(())
    }

    fn decode_row(
        &self,
        slot: &str,
        destination: &str,
        metadata: &[u8],
        created_at: i64,
    ) -> Result<SwitchRequest> {
        let slot = Slot::from_str(slot)?;
        let destination: Destination = serde_json::from_str(destination)?;
        let metadata = serde_json::from_slice(&self.cipher.open(metadata)?)?;
        Ok(SwitchRequest {
            slot,
            destination,
            metadata,
            created_at: u64::try_from(created_at)
                .map_err(|_| SwitchError::Persistence("negative created_at".into()))?,
        })
    }
}

#[async_trait]
impl PendingRequestStore for SqlitePendingStore {
    /// Persists (upserts) the pending record for the request's slot.
    async fn save(&self, request: &SwitchRequest) -> Result<()> {
        let destination = serde_json::to_string(&request.destination)?;
        let metadata = self.cipher.seal(&serde_json::to_vec(&request.metadata)?)?;
        let created_at = i64::try_from(request.created_at)
            .map_err(|_| SwitchError::Persistence("created_at out of range".into()))?;

        sqlx::query(
            "INSERT INTO pending_requests (slot, destination, metadata, created_at)
             VALUES (?, ?, ?, ?)
             ON CONFLICT(slot) DO UPDATE SET
                 destination = excluded.destination,
                 metadata = excluded.metadata,
                 created_at = excluded.created_at",
        )
        .bind(request.slot.to_string())
        .bind(&destination)
        .bind(&metadata)
        .bind(created_at)
        .execute(&self.pool)
        .await?;

        tracing::debug!(slot = %request.slot, "pending record persisted");
        Ok(())
    }

    /// Loads the pending record for the given slot from `SQLite`.
    async fn load(&self, slot: Slot) -> Result<Option<SwitchRequest>> {
        let row: Option<(String, Vec<u8>, i64)> = sqlx::query_as(
            "SELECT destination, metadata, created_at FROM pending_requests WHERE slot = ?",
        )
        .bind(slot.to_string())
        .fetch_optional(&self.pool)
        .await?;

        match row {
            None => Ok(None),
            Some((destination, metadata, created_at)) => Ok(Some(self.decode_row(
                &slot.to_string(),
                &destination,
                &metadata,
                created_at,
            )?)),
        }
    }

    /// Removes the pending record for the given slot.
    async fn clear(&self, slot: Slot) -> Result<()> {
        sqlx::query("DELETE FROM pending_requests WHERE slot = ?")
            .bind(slot.to_string())
            .execute(&self.pool)
            .await?;
        tracing::debug!(%slot, "pending record cleared");
        Ok(())
    }

    /// Loads every outstanding record, newest first.
    async fn load_all(&self) -> Result<Vec<SwitchRequest>> {
        let rows: Vec<(String, String, Vec<u8>, i64)> = sqlx::query_as(
            "SELECT slot, destination, metadata, created_at FROM pending_requests
             ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        let mut result = Vec::with_capacity(rows.len());
        for (slot, destination, metadata, created_at) in rows {
            result.push(self.decode_row(&slot, &destination, &metadata, created_at)?);
        }
        Ok(result)
    }
}
