//! Allocation calculation engine
//!
//! The one piece of real business logic: a pure function from an asset plan
//! to per-level allocations, portfolio totals, and warning conditions. No
//! I/O, no shared state; every invocation allocates a fresh result, so it is
//! safe to call on every edit.

use serde::Serialize;
use thiserror::Error;

use dipplan_core::sanitize::{clamp_positive, clamp_range, finite_or_zero};
use dipplan_core::AssetPlan;

/// Derived figures for one dip level.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelAllocation {
    pub id: String,
    /// 1-based display order
    pub sequence: usize,
    /// Sanitized inputs, echoed back for rendering
    pub dip_percent: f64,
    pub buy_percent: f64,
    /// Anchor price reduced by the dip percentage, floored at 0
    pub trigger_price: f64,
    /// Cash allocated to this level out of the deployable pool
    pub allocated_cash: f64,
    /// Quantity bought if the level fills; 0 when the trigger price is 0
    pub acquired_quantity: f64,
    /// Whether the current price is already at or below the trigger
    pub reached: bool,
}

/// Portfolio-wide totals across all levels plus pre-existing holdings.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanTotals {
    pub total_spend: f64,
    /// May go negative when allocations exceed the available cash; left
    /// unclamped as an implicit warning signal
    pub remaining_cash: f64,
    pub total_acquired_quantity: f64,
    /// Pre-existing holdings plus everything acquired across the levels
    pub total_coins: f64,
    /// Blended entry price, treating pre-existing holdings as if acquired
    /// at the anchor price
    pub average_entry_price: f64,
}

/// Warning conditions owned by the engine's output. At most one applies;
/// over-allocation takes precedence.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AllocationWarning {
    #[error(
        "Heads up: total buy % is {total_buy_percent:.1}%. Consider capping at 100% or lowering individual levels."
    )]
    OverAllocated { total_buy_percent: f64 },

    #[error("Enter cash and deploy % to see allocations.")]
    NoDeployableCash,
}

/// Full result of one allocation pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationResult {
    pub levels: Vec<LevelAllocation>,
    pub totals: PlanTotals,
    /// Diagnostic sum of the buy percentages; may legitimately exceed 100
    pub total_buy_percent: f64,
    pub deployable_cash: f64,
    #[serde(skip)]
    pub warning: Option<AllocationWarning>,
}

/// Compute every level's trigger price, cash allocation, and acquired
/// quantity, plus the plan-wide totals.
///
/// Input sanitization is part of the contract: malformed numerics degrade
/// to 0 or a clamped bound and are never an error. Out-of-range level
/// percentages are tolerated (a dip above 100 simply floors the trigger
/// price at 0); range clamping belongs to the edit point, not here.
pub fn compute_allocation(plan: &AssetPlan) -> CalculationResult {
    let anchor_price = clamp_positive(plan.anchor_price);
    let coins_held = clamp_positive(plan.coins_held);
    let cash_available = clamp_positive(plan.cash_available);
    let deploy_percent = clamp_range(plan.cash_deploy_percent, 0.0, 100.0);
    let current_price = clamp_positive(plan.current_price);
    let deployable_cash = cash_available * (deploy_percent / 100.0);

    let mut total_buy_percent = 0.0;
    let mut total_spend = 0.0;
    let mut total_acquired_quantity = 0.0;

    let levels: Vec<LevelAllocation> = plan
        .levels
        .iter()
        .enumerate()
        .map(|(idx, level)| {
            let dip_percent = finite_or_zero(level.dip_percent);
            let buy_percent = finite_or_zero(level.buy_percent);
            total_buy_percent += buy_percent;

            let trigger_price = (anchor_price * (1.0 - dip_percent / 100.0)).max(0.0);
            let allocated_cash = deployable_cash * (buy_percent / 100.0);
            let acquired_quantity = if trigger_price > 0.0 {
                allocated_cash / trigger_price
            } else {
                0.0
            };

            total_spend += allocated_cash;
            total_acquired_quantity += acquired_quantity;

            LevelAllocation {
                id: level.id.clone(),
                sequence: idx + 1,
                dip_percent,
                buy_percent,
                trigger_price,
                allocated_cash,
                acquired_quantity,
                reached: current_price > 0.0
                    && trigger_price > 0.0
                    && current_price <= trigger_price,
            }
        })
        .collect();

    let total_coins = coins_held + total_acquired_quantity;
    // Existing holdings are treated as if acquired at the anchor price, a
    // deliberate simplification of true cost basis.
    let cost_basis_existing = coins_held * anchor_price;
    let average_entry_price = if total_coins > 0.0 {
        (cost_basis_existing + total_spend) / total_coins
    } else {
        0.0
    };
    let remaining_cash = cash_available - total_spend;

    let warning = if total_buy_percent > 100.0 {
        Some(AllocationWarning::OverAllocated { total_buy_percent })
    } else if deployable_cash == 0.0 {
        Some(AllocationWarning::NoDeployableCash)
    } else {
        None
    };

    CalculationResult {
        levels,
        totals: PlanTotals {
            total_spend,
            remaining_cash,
            total_acquired_quantity,
            total_coins,
            average_entry_price,
        },
        total_buy_percent,
        deployable_cash,
        warning,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dipplan_core::DipLevel;

    fn base_plan(levels: Vec<DipLevel>) -> AssetPlan {
        AssetPlan {
            name: "BTC/USDT".into(),
            anchor_price: 60_000.0,
            current_price: 58_000.0,
            coins_held: 0.5,
            cash_available: 5_000.0,
            cash_deploy_percent: 80.0,
            levels,
        }
    }

    #[test]
    fn scenario_a_single_level_not_yet_reached() {
        let plan = base_plan(vec![DipLevel::new("lvl-1", 5.0, 20.0)]);
        let result = compute_allocation(&plan);

        assert_eq!(result.deployable_cash, 4_000.0);
        let level = &result.levels[0];
        assert_eq!(level.trigger_price, 57_000.0);
        assert_eq!(level.allocated_cash, 800.0);
        assert!((level.acquired_quantity - 800.0 / 57_000.0).abs() < 1e-12);
        // current 58000 > trigger 57000, so the dip has not happened yet
        assert!(!level.reached);
    }

    #[test]
    fn scenario_b_level_reached_when_price_dips_through() {
        let mut plan = base_plan(vec![DipLevel::new("lvl-1", 5.0, 20.0)]);
        plan.current_price = 56_000.0;
        let result = compute_allocation(&plan);
        assert!(result.levels[0].reached);
    }

    #[test]
    fn scenario_c_full_deploy_sums_exactly() {
        let mut plan = base_plan(vec![
            DipLevel::new("lvl-1", 5.0, 20.0),
            DipLevel::new("lvl-2", 10.0, 30.0),
            DipLevel::new("lvl-3", 15.0, 50.0),
        ]);
        plan.cash_available = 1_000.0;
        plan.cash_deploy_percent = 100.0;
        let result = compute_allocation(&plan);

        assert_eq!(result.deployable_cash, 1_000.0);
        assert_eq!(result.totals.total_spend, 1_000.0);
        assert_eq!(result.totals.remaining_cash, 0.0);
        assert_eq!(result.total_buy_percent, 100.0);
        assert!(result.warning.is_none());
    }

    #[test]
    fn scenario_d_over_allocation_warns_with_one_decimal() {
        let plan = base_plan(vec![
            DipLevel::new("lvl-1", 5.0, 50.0),
            DipLevel::new("lvl-2", 10.0, 50.0),
            DipLevel::new("lvl-3", 15.0, 50.0),
        ]);
        let result = compute_allocation(&plan);

        assert_eq!(result.total_buy_percent, 150.0);
        let warning = result.warning.expect("expected over-allocation warning");
        assert!(warning.to_string().contains("150.0%"));
        assert!(matches!(
            warning,
            AllocationWarning::OverAllocated { total_buy_percent } if total_buy_percent == 150.0
        ));
    }

    #[test]
    fn scenario_e_no_cash_means_no_allocations() {
        let mut plan = base_plan(vec![DipLevel::new("lvl-1", 5.0, 20.0)]);
        plan.cash_available = 0.0;
        let result = compute_allocation(&plan);

        assert_eq!(result.deployable_cash, 0.0);
        assert_eq!(result.levels[0].allocated_cash, 0.0);
        assert_eq!(result.levels[0].acquired_quantity, 0.0);
        assert_eq!(result.warning, Some(AllocationWarning::NoDeployableCash));
    }

    #[test]
    fn zero_dip_triggers_at_the_anchor() {
        let plan = base_plan(vec![DipLevel::new("lvl-1", 0.0, 20.0)]);
        let result = compute_allocation(&plan);
        assert_eq!(result.levels[0].trigger_price, plan.anchor_price);
    }

    #[test]
    fn zero_trigger_yields_zero_quantity_silently() {
        // dip >= 100 floors the trigger at 0; allocated cash stays allocated
        let plan = base_plan(vec![DipLevel::new("lvl-1", 120.0, 50.0)]);
        let result = compute_allocation(&plan);
        let level = &result.levels[0];
        assert_eq!(level.trigger_price, 0.0);
        assert_eq!(level.allocated_cash, 2_000.0);
        assert_eq!(level.acquired_quantity, 0.0);
        assert!(!level.reached);
    }

    #[test]
    fn zero_anchor_never_reports_reached() {
        let mut plan = base_plan(AssetPlan::default_levels());
        plan.anchor_price = 0.0;
        let result = compute_allocation(&plan);
        assert!(result.levels.iter().all(|lvl| !lvl.reached));
        assert!(result.levels.iter().all(|lvl| lvl.trigger_price == 0.0));
    }

    #[test]
    fn malformed_numerics_degrade_to_zero() {
        let mut plan = base_plan(vec![
            DipLevel::new("lvl-1", f64::NAN, f64::INFINITY),
            DipLevel::new("lvl-2", 10.0, 30.0),
        ]);
        plan.anchor_price = -5.0;
        plan.coins_held = f64::NAN;
        plan.cash_deploy_percent = f64::INFINITY;
        let result = compute_allocation(&plan);

        // anchor clamps to 0, deploy percent to the lower bound
        assert_eq!(result.deployable_cash, 0.0);
        assert_eq!(result.levels[0].dip_percent, 0.0);
        assert_eq!(result.levels[0].buy_percent, 0.0);
        assert_eq!(result.totals.total_coins, 0.0);
        assert_eq!(result.totals.average_entry_price, 0.0);
    }

    #[test]
    fn remaining_cash_may_go_negative() {
        let mut plan = base_plan(vec![
            DipLevel::new("lvl-1", 5.0, 80.0),
            DipLevel::new("lvl-2", 10.0, 80.0),
        ]);
        plan.cash_deploy_percent = 100.0;
        let result = compute_allocation(&plan);

        assert_eq!(result.totals.total_spend, 8_000.0);
        assert_eq!(result.totals.remaining_cash, -3_000.0);
        assert!(matches!(
            result.warning,
            Some(AllocationWarning::OverAllocated { .. })
        ));
    }

    #[test]
    fn totals_are_exact_sums_of_the_rows() {
        let plan = AssetPlan::default();
        let result = compute_allocation(&plan);

        let spend: f64 = result.levels.iter().map(|lvl| lvl.allocated_cash).sum();
        let acquired: f64 = result.levels.iter().map(|lvl| lvl.acquired_quantity).sum();
        assert_eq!(result.totals.total_spend, spend);
        assert_eq!(result.totals.total_acquired_quantity, acquired);
        assert_eq!(
            result.totals.remaining_cash,
            plan.cash_available - result.totals.total_spend
        );
        assert_eq!(
            result.totals.total_coins,
            plan.coins_held + result.totals.total_acquired_quantity
        );
    }

    #[test]
    fn average_entry_blends_existing_holdings_at_anchor() {
        let plan = base_plan(vec![DipLevel::new("lvl-1", 5.0, 20.0)]);
        let result = compute_allocation(&plan);

        let cost_basis = plan.coins_held * plan.anchor_price;
        let expected = (cost_basis + result.totals.total_spend) / result.totals.total_coins;
        assert_eq!(result.totals.average_entry_price, expected);
    }

    #[test]
    fn recomputation_is_idempotent() {
        let plan = AssetPlan::default();
        assert_eq!(compute_allocation(&plan), compute_allocation(&plan));
    }
}
