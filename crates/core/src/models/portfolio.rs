//! Portfolio model: the collection of tracked pairs

use serde::{Deserialize, Serialize};

use super::plan::AssetPlan;
use crate::errors::{Error, Result};

/// Ordered collection of plans plus the currently displayed one.
///
/// `plans` is never empty: removing the last remaining plan is rejected,
/// and normalization substitutes a default plan for an empty collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Portfolio {
    /// Tracked pairs, in display order
    #[serde(alias = "pairs")]
    pub plans: Vec<AssetPlan>,
    /// Index of the currently displayed plan, kept within bounds on every
    /// mutation
    #[serde(default)]
    pub active_plan_index: usize,
}

impl Default for Portfolio {
    fn default() -> Self {
        Self {
            plans: vec![AssetPlan::default()],
            active_plan_index: 0,
        }
    }
}

impl Portfolio {
    /// Wrap a single plan (the legacy storage shape) as a portfolio.
    pub fn from_plan(plan: AssetPlan) -> Self {
        Self {
            plans: vec![plan],
            active_plan_index: 0,
        }
    }

    pub fn active_plan(&self) -> Option<&AssetPlan> {
        self.plans.get(self.active_plan_index)
    }

    pub fn active_plan_mut(&mut self) -> Option<&mut AssetPlan> {
        self.plans.get_mut(self.active_plan_index)
    }

    /// Append a plan and make it the active one, returning its index.
    pub fn add_plan(&mut self, plan: AssetPlan) -> usize {
        self.plans.push(plan);
        self.active_plan_index = self.plans.len() - 1;
        self.active_plan_index
    }

    /// Remove the plan at `index`. Removing the last remaining plan is
    /// rejected; the active index is clamped back into range afterwards.
    pub fn remove_plan(&mut self, index: usize) -> Result<AssetPlan> {
        if self.plans.len() <= 1 {
            return Err(Error::LastPair);
        }
        if index >= self.plans.len() {
            return Err(Error::PairNotFound(format!("#{}", index)));
        }
        let removed = self.plans.remove(index);
        if self.active_plan_index >= self.plans.len() {
            self.active_plan_index = self.plans.len() - 1;
        }
        Ok(removed)
    }

    /// Select the displayed plan. Returns false for an out-of-range index.
    pub fn set_active_plan(&mut self, index: usize) -> bool {
        if index < self.plans.len() {
            self.active_plan_index = index;
            true
        } else {
            false
        }
    }
}
