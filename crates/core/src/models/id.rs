//! Level id allocation

use super::level::DipLevel;

/// Monotonic allocator for `lvl-N` level ids, owned by the plan-mutation
/// layer.
///
/// Seeded from the numeric suffixes of existing ids so levels added to a
/// loaded plan never collide with persisted ones.
#[derive(Debug, Clone)]
pub struct LevelIdAllocator {
    next: u64,
}

impl LevelIdAllocator {
    pub fn new() -> Self {
        Self { next: 1 }
    }

    /// Seed from an existing level list: the counter starts past both the
    /// highest `lvl-N` suffix and the list length.
    pub fn seeded_from(levels: &[DipLevel]) -> Self {
        let max_suffix = levels
            .iter()
            .filter_map(|lvl| lvl.id.strip_prefix("lvl-")?.parse::<u64>().ok())
            .max()
            .unwrap_or(0);
        Self {
            next: max_suffix.max(levels.len() as u64) + 1,
        }
    }

    pub fn next_id(&mut self) -> String {
        let id = format!("lvl-{}", self.next);
        self.next += 1;
        id
    }
}

impl Default for LevelIdAllocator {
    fn default() -> Self {
        Self::new()
    }
}
