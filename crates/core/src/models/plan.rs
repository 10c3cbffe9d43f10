//! Asset plan model and mutation operations

use serde::{Deserialize, Serialize};

use super::id::LevelIdAllocator;
use super::level::DipLevel;
use crate::sanitize::clamp_range;

pub const DEFAULT_PAIR_NAME: &str = "BTC/USDT";

/// A staged dip-buy plan for one tracked pair.
///
/// Numeric fields are stored as entered; sanitization happens at the edit
/// point (the `set_level_*` operations) and again inside the allocation
/// engine, never on the stored value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetPlan {
    /// Display label; no uniqueness constraint within a portfolio
    #[serde(alias = "pairName")]
    pub name: String,
    /// Reference price from which dips are measured
    pub anchor_price: f64,
    /// Used only to flag levels whose trigger has already been reached
    pub current_price: f64,
    /// Quantity owned before this plan executes
    pub coins_held: f64,
    /// Total cash earmarked for this plan
    pub cash_available: f64,
    /// Fraction of `cash_available` deployable across levels, 0-100
    pub cash_deploy_percent: f64,
    /// Staged buy levels, in display order; never empty in a normalized plan
    pub levels: Vec<DipLevel>,
}

impl Default for AssetPlan {
    fn default() -> Self {
        Self {
            name: DEFAULT_PAIR_NAME.to_string(),
            anchor_price: 60_000.0,
            current_price: 58_000.0,
            coins_held: 0.5,
            cash_available: 5_000.0,
            cash_deploy_percent: 80.0,
            levels: Self::default_levels(),
        }
    }
}

impl AssetPlan {
    pub fn default_levels() -> Vec<DipLevel> {
        vec![
            DipLevel::new("lvl-1", 5.0, 20.0),
            DipLevel::new("lvl-2", 10.0, 30.0),
            DipLevel::new("lvl-3", 15.0, 50.0),
        ]
    }

    /// Append a new level seeded from the last one (dip + 5, same buy %),
    /// returning the new level's id.
    pub fn add_level(&mut self, ids: &mut LevelIdAllocator) -> String {
        let (dip_percent, buy_percent) = match self.levels.last() {
            Some(last) => (last.dip_percent + 5.0, last.buy_percent),
            None => (5.0, 10.0),
        };
        let id = ids.next_id();
        self.levels
            .push(DipLevel::new(id.clone(), dip_percent, buy_percent));
        id
    }

    /// Remove a level by id. Removing the last remaining level resets the
    /// list to the single default first level instead of leaving it empty.
    pub fn remove_level(&mut self, level_id: &str) {
        if self.levels.len() <= 1 {
            self.levels = vec![DipLevel::new("lvl-1", 5.0, 20.0)];
        } else {
            self.levels.retain(|lvl| lvl.id != level_id);
        }
    }

    /// Set a level's dip percentage, clamped to [0, 99] at the edit point.
    /// Returns false when no level has the given id.
    pub fn set_level_dip(&mut self, level_id: &str, value: f64) -> bool {
        match self.levels.iter_mut().find(|lvl| lvl.id == level_id) {
            Some(lvl) => {
                lvl.dip_percent = clamp_range(value, 0.0, 99.0);
                true
            }
            None => false,
        }
    }

    /// Set a level's buy percentage, clamped to [0, 100] at the edit point.
    /// Returns false when no level has the given id.
    pub fn set_level_buy(&mut self, level_id: &str, value: f64) -> bool {
        match self.levels.iter_mut().find(|lvl| lvl.id == level_id) {
            Some(lvl) => {
                lvl.buy_percent = clamp_range(value, 0.0, 100.0);
                true
            }
            None => false,
        }
    }

    /// Restore the plan to its defaults.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
