//! Key-value table operations

use anyhow::{Context, Result};
use sqlx::Row;

use super::DbEngine;

/// Operations on the `kv_store` table
pub struct KvTable;

impl KvTable {
    /// Get the raw value stored under `key`
    pub async fn get(engine: &DbEngine, key: &str) -> Result<Option<String>> {
        let row = sqlx::query("SELECT value FROM kv_store WHERE key = ?")
            .bind(key)
            .fetch_optional(engine.pool())
            .await
            .with_context(|| format!("Failed to read key {}", key))?;

        Ok(row.map(|r| r.get::<String, _>("value")))
    }

    /// Insert or replace a single value
    #[cfg(test)]
    pub async fn set(engine: &DbEngine, key: &str, value: &str) -> Result<()> {
        sqlx::query("INSERT OR REPLACE INTO kv_store (key, value) VALUES (?, ?)")
            .bind(key)
            .bind(value)
            .execute(engine.pool())
            .await
            .with_context(|| format!("Failed to write key {}", key))?;

        Ok(())
    }

    /// Write several keys at once; either all land or none do
    pub async fn set_many(engine: &DbEngine, entries: &[(&str, String)]) -> Result<()> {
        let mut tx = engine.pool().begin().await?;

        for (key, value) in entries {
            sqlx::query("INSERT OR REPLACE INTO kv_store (key, value) VALUES (?, ?)")
                .bind(*key)
                .bind(value)
                .execute(&mut *tx)
                .await
                .with_context(|| format!("Failed to write key {}", key))?;
        }

        tx.commit().await?;
        Ok(())
    }
}
