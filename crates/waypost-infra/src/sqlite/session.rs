//! SQLite session store implementation.
//!
//! Implements `SessionStore` from `waypost-core` using sqlx with split
//! read/write pools. The blob is stored as-is in a BLOB column; the store
//! never inspects its content.

use chrono::Utc;
use sqlx::Row;
use waypost_core::session::store::SessionStore;
use waypost_types::error::SessionStoreError;

use super::pool::DatabasePool;

/// SQLite-backed implementation of `SessionStore`.
pub struct SqliteSessionStore {
    pool: DatabasePool,
}

impl SqliteSessionStore {
    /// Create a new session store backed by the given database pool.
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

fn map_err(err: sqlx::Error) -> SessionStoreError {
    match err {
        sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
            SessionStoreError::Connection
        }
        other => SessionStoreError::Backend(other.to_string()),
    }
}

impl SessionStore for SqliteSessionStore {
    async fn save(&self, id: &str, blob: &[u8]) -> Result<(), SessionStoreError> {
        let now = Utc::now().to_rfc3339();

        sqlx::query(
            r#"INSERT INTO sessions (session_id, session_data, created_at, updated_at)
               VALUES (?, ?, ?, ?)
               ON CONFLICT (session_id) DO UPDATE SET session_data = excluded.session_data, updated_at = excluded.updated_at"#,
        )
        .bind(id)
        .bind(blob)
        .bind(&now)
        .bind(&now)
        .execute(&self.pool.writer)
        .await
        .map_err(map_err)?;

        Ok(())
    }

    async fn extract(&self, id: &str) -> Result<Option<Vec<u8>>, SessionStoreError> {
        let row = sqlx::query("SELECT session_data FROM sessions WHERE session_id = ?")
            .bind(id)
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(map_err)?;

        match row {
            Some(row) => {
                let blob: Vec<u8> = row.try_get("session_data").map_err(map_err)?;
                Ok(Some(blob))
            }
            None => Ok(None),
        }
    }

    async fn delete(&self, id: &str) -> Result<(), SessionStoreError> {
        sqlx::query("DELETE FROM sessions WHERE session_id = ?")
            .bind(id)
            .execute(&self.pool.writer)
            .await
            .map_err(map_err)?;

        Ok(())
    }

    async fn exists(&self, id: &str) -> Result<bool, SessionStoreError> {
        // Point lookup on the primary key; the blob is never transferred.
        let row = sqlx::query("SELECT 1 FROM sessions WHERE session_id = ?")
            .bind(id)
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(map_err)?;

        Ok(row.is_some())
    }
}
