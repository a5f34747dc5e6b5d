use crate::position::{GridSize, Position};
use std::collections::BTreeSet;

/// Tracks which cells the most recent operation changed.
///
/// Every update replaces the previous set; nothing accumulates between
/// reads. A renderer that skips a read between two edits only sees the
/// second one, and should fall back to a full refresh if it needs more.
#[derive(Debug, Clone, Default)]
pub struct DirtyTracker {
    positions: BTreeSet<Position>,
}

impl DirtyTracker {
    /// Create a tracker with nothing dirty.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the dirty set with `positions`.
    pub fn replace(&mut self, positions: BTreeSet<Position>) {
        self.positions = positions;
    }

    /// Mark every cell of a grid of the given size as dirty.
    pub fn mark_all(&mut self, size: GridSize) {
        self.positions = size.positions().collect();
    }

    /// Returns `true` if the last operation changed anything.
    pub fn is_dirty(&self) -> bool {
        !self.positions.is_empty()
    }

    pub fn is_position_dirty(&self, pos: Position) -> bool {
        self.positions.contains(&pos)
    }

    pub fn positions(&self) -> &BTreeSet<Position> {
        &self.positions
    }
}
