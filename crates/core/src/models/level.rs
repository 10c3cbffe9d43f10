//! Dip level model

use serde::{Deserialize, Serialize};

/// One staged buy: a percentage dip from the anchor price paired with the
/// percentage of deployable cash to allocate when it triggers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DipLevel {
    /// Stable identifier, unique within a plan's level list. Insertion
    /// order defines display order; the computation itself is
    /// order-independent.
    pub id: String,
    /// Percentage drop from the anchor price that triggers this level
    /// (conventionally 0-99)
    pub dip_percent: f64,
    /// Percentage of deployable cash allocated to this level
    /// (conventionally 0-100)
    pub buy_percent: f64,
}

impl DipLevel {
    pub fn new(id: impl Into<String>, dip_percent: f64, buy_percent: f64) -> Self {
        Self {
            id: id.into(),
            dip_percent,
            buy_percent,
        }
    }
}
