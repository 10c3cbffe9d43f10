//! Named preset store
//!
//! A convenience mapping from user-chosen name to serialized portfolio.
//! Saving under an existing name overwrites silently; loading a missing
//! name is the caller-visible "Pair not found" failure.

use chrono::{DateTime, Utc};
use dipplan_core::normalize::normalize_state;
use dipplan_core::{Error, Portfolio, Result};
use serde::Serialize;
use sqlx::SqlitePool;

/// Listing entry for a saved preset
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct PresetInfo {
    pub name: String,
    pub saved_at: Option<DateTime<Utc>>,
}

/// Save a preset, silently overwriting any existing one with the same name
pub async fn save_preset(pool: &SqlitePool, name: &str, portfolio: &Portfolio) -> Result<()> {
    let json = serde_json::to_string(portfolio)?;
    sqlx::query(
        "INSERT INTO presets (name, value, saved_at) VALUES (?1, ?2, CURRENT_TIMESTAMP)
         ON CONFLICT(name) DO UPDATE SET value = ?2, saved_at = CURRENT_TIMESTAMP",
    )
    .bind(name)
    .bind(&json)
    .execute(pool)
    .await
    .map_err(|e| Error::Storage(e.to_string()))?;

    Ok(())
}

/// Enumerate saved presets, most recently saved first
pub async fn list_presets(pool: &SqlitePool) -> Result<Vec<PresetInfo>> {
    sqlx::query_as(
        "SELECT name, saved_at FROM presets ORDER BY saved_at DESC, name ASC",
    )
    .fetch_all(pool)
    .await
    .map_err(|e| Error::Storage(e.to_string()))
}

/// Load a preset by exact name, running it through normalization
pub async fn load_preset(pool: &SqlitePool, name: &str) -> Result<Portfolio> {
    let json: Option<String> = sqlx::query_scalar("SELECT value FROM presets WHERE name = ?")
        .bind(name)
        .fetch_optional(pool)
        .await
        .map_err(|e| Error::Storage(e.to_string()))?;

    let json = json.ok_or_else(|| Error::PairNotFound(name.to_string()))?;
    let value: serde_json::Value = serde_json::from_str(&json)?;
    normalize_state(&value)
}

/// Delete a preset by exact name
pub async fn delete_preset(pool: &SqlitePool, name: &str) -> Result<()> {
    let result = sqlx::query("DELETE FROM presets WHERE name = ?")
        .bind(name)
        .execute(pool)
        .await
        .map_err(|e| Error::Storage(e.to_string()))?;

    if result.rows_affected() == 0 {
        return Err(Error::PairNotFound(name.to_string()));
    }
    Ok(())
}
