//! Autosaved working state
//!
//! The working portfolio is stored as a JSON blob under a fixed key and
//! re-saved after every edit. Loading runs the normalization step, which
//! also migrates the legacy bare single-plan shape.

use dipplan_core::normalize::normalize_state;
use dipplan_core::{Error, Portfolio, Result};
use sqlx::SqlitePool;
use tracing::{debug, warn};

/// Storage key for the autosaved working portfolio
pub const STATE_KEY: &str = "dip-buy-calculator";

pub async fn save_portfolio(pool: &SqlitePool, portfolio: &Portfolio) -> Result<()> {
    let json = serde_json::to_string(portfolio)?;
    sqlx::query(
        "INSERT INTO calculator_state (key, value) VALUES (?1, ?2)
         ON CONFLICT(key) DO UPDATE SET value = ?2",
    )
    .bind(STATE_KEY)
    .bind(&json)
    .execute(pool)
    .await
    .map_err(|e| Error::Storage(e.to_string()))?;

    Ok(())
}

/// Load the working portfolio. Returns None when nothing has been saved yet.
pub async fn load_portfolio(pool: &SqlitePool) -> Result<Option<Portfolio>> {
    let json: Option<String> =
        sqlx::query_scalar("SELECT value FROM calculator_state WHERE key = ?")
            .bind(STATE_KEY)
            .fetch_optional(pool)
            .await
            .map_err(|e| Error::Storage(e.to_string()))?;

    match json {
        Some(json) => {
            let value: serde_json::Value = serde_json::from_str(&json)?;
            Ok(Some(normalize_state(&value)?))
        }
        None => Ok(None),
    }
}

/// Best-effort save on the recalculation path. A storage failure is logged
/// as a non-fatal warning; the in-memory state stays valid either way.
pub async fn autosave(pool: &SqlitePool, portfolio: &Portfolio) {
    match save_portfolio(pool, portfolio).await {
        Ok(()) => debug!("calculator state saved"),
        Err(e) => warn!("unable to save calculator state: {}", e),
    }
}
