//! JSON file transport
//!
//! Pretty-printed export and normalized import for portfolios and single
//! plans. The string-level helpers carry the format contract; the file
//! functions are thin `tokio::fs` wrappers around them.

use std::path::Path;

use dipplan_core::normalize::{normalize_plan, normalize_portfolio};
use dipplan_core::{AssetPlan, Error, Portfolio, Result};

pub fn portfolio_to_json(portfolio: &Portfolio) -> Result<String> {
    Ok(serde_json::to_string_pretty(portfolio)?)
}

pub fn plan_to_json(plan: &AssetPlan) -> Result<String> {
    Ok(serde_json::to_string_pretty(plan)?)
}

/// Parse an imported portfolio document. A document lacking a
/// `plans`/`pairs` array is structurally invalid and rejected.
pub fn portfolio_from_json(json: &str) -> Result<Portfolio> {
    let value: serde_json::Value = serde_json::from_str(json)?;
    normalize_portfolio(&value)
}

/// Parse an imported single-plan document.
pub fn plan_from_json(json: &str) -> Result<AssetPlan> {
    let value: serde_json::Value = serde_json::from_str(json)?;
    normalize_plan(&value)
}

pub async fn export_portfolio(path: &Path, portfolio: &Portfolio) -> Result<()> {
    tokio::fs::write(path, portfolio_to_json(portfolio)?)
        .await
        .map_err(|e| Error::Storage(e.to_string()))
}

pub async fn import_portfolio(path: &Path) -> Result<Portfolio> {
    let json = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| Error::Storage(e.to_string()))?;
    portfolio_from_json(&json)
}

pub async fn export_plan(path: &Path, plan: &AssetPlan) -> Result<()> {
    tokio::fs::write(path, plan_to_json(plan)?)
        .await
        .map_err(|e| Error::Storage(e.to_string()))
}

pub async fn import_plan(path: &Path) -> Result<AssetPlan> {
    let json = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| Error::Storage(e.to_string()))?;
    plan_from_json(&json)
}
