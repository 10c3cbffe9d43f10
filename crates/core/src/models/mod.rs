//! Plan and portfolio data models

mod id;
mod level;
mod plan;
mod portfolio;

pub use id::LevelIdAllocator;
pub use level::DipLevel;
pub use plan::{AssetPlan, DEFAULT_PAIR_NAME};
pub use portfolio::Portfolio;
