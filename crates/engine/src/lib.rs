//! Dipplan Engine - Pure allocation calculation

pub mod allocation;

pub use allocation::{
    compute_allocation, AllocationWarning, CalculationResult, LevelAllocation, PlanTotals,
};
