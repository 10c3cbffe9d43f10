//! Ingress normalization for untrusted JSON
//!
//! One step applied uniformly at storage load, file import, and
//! legacy-format migration. Numeric fields are coerced leniently (a number,
//! a numeric string, or absent), missing fields fall back to the documented
//! defaults, and a malformed `levels` shape collapses to the default level
//! list. Only a structurally unusable document is an error.

use serde_json::Value;

use crate::errors::{Error, Result};
use crate::models::{AssetPlan, DipLevel, Portfolio};
use crate::sanitize::finite_or_zero;

/// Lenient numeric read. Absent keys get the fallback; a present but
/// non-numeric value degrades to 0 rather than keeping the default, since
/// the caller did supply *something* for the field.
fn lenient_f64(value: Option<&Value>, fallback: f64) -> f64 {
    match value {
        None => fallback,
        Some(Value::Number(n)) => finite_or_zero(n.as_f64().unwrap_or(0.0)),
        Some(Value::String(s)) => s.trim().parse::<f64>().map(finite_or_zero).unwrap_or(0.0),
        Some(_) => 0.0,
    }
}

fn normalize_level(value: &Value, index: usize) -> DipLevel {
    let id = value
        .get("id")
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| format!("lvl-{}", index + 1));
    DipLevel {
        id,
        dip_percent: lenient_f64(value.get("dipPercent"), 0.0),
        buy_percent: lenient_f64(value.get("buyPercent"), 0.0),
    }
}

fn normalize_levels(value: Option<&Value>) -> Vec<DipLevel> {
    match value.and_then(Value::as_array) {
        Some(levels) if !levels.is_empty() => levels
            .iter()
            .enumerate()
            .map(|(idx, lvl)| normalize_level(lvl, idx))
            .collect(),
        _ => AssetPlan::default_levels(),
    }
}

/// Normalize a single plan from untrusted JSON. Accepts the legacy
/// `pairName` key; anything that is not a JSON object is rejected.
pub fn normalize_plan(value: &Value) -> Result<AssetPlan> {
    if !value.is_object() {
        return Err(Error::InvalidFormat("expected a JSON object".to_string()));
    }
    let defaults = AssetPlan::default();
    let name = value
        .get("name")
        .or_else(|| value.get("pairName"))
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or(defaults.name);

    Ok(AssetPlan {
        name,
        anchor_price: lenient_f64(value.get("anchorPrice"), defaults.anchor_price),
        current_price: lenient_f64(value.get("currentPrice"), defaults.current_price),
        coins_held: lenient_f64(value.get("coinsHeld"), defaults.coins_held),
        cash_available: lenient_f64(value.get("cashAvailable"), defaults.cash_available),
        cash_deploy_percent: lenient_f64(
            value.get("cashDeployPercent"),
            defaults.cash_deploy_percent,
        ),
        levels: normalize_levels(value.get("levels")),
    })
}

/// Normalize a portfolio from untrusted JSON. The document must carry a
/// `plans` (or legacy `pairs`) array; individual malformed entries are
/// dropped, and an empty collection falls back to a single default plan.
pub fn normalize_portfolio(value: &Value) -> Result<Portfolio> {
    if !value.is_object() {
        return Err(Error::InvalidFormat("expected a JSON object".to_string()));
    }
    let plans_value = value
        .get("plans")
        .or_else(|| value.get("pairs"))
        .and_then(Value::as_array)
        .ok_or_else(|| Error::InvalidFormat("document has no plans array".to_string()))?;

    let mut plans: Vec<AssetPlan> = plans_value
        .iter()
        .filter_map(|plan| normalize_plan(plan).ok())
        .collect();
    if plans.is_empty() {
        plans.push(AssetPlan::default());
    }

    let index = lenient_f64(value.get("activePlanIndex"), 0.0);
    let active_plan_index = if index > 0.0 { index as usize } else { 0 };

    Ok(Portfolio {
        active_plan_index: active_plan_index.min(plans.len() - 1),
        plans,
    })
}

/// Normalize a loaded state blob that may be either a portfolio or the
/// legacy bare single-plan shape, migrating the latter.
pub fn normalize_state(value: &Value) -> Result<Portfolio> {
    let is_portfolio = value
        .as_object()
        .map(|obj| obj.contains_key("plans") || obj.contains_key("pairs"))
        .unwrap_or(false);
    if is_portfolio {
        normalize_portfolio(value)
    } else {
        Ok(Portfolio::from_plan(normalize_plan(value)?))
    }
}
