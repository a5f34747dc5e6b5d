//! The editor-facing grid façade.
//!
//! [`GridModel`] wraps a [`Grid`], its undo [`History`] and a
//! [`DirtyTracker`]. Every edit runs the same three steps:
//!
//! 1. **Snapshot** the cells about to change.
//! 2. **Mutate** the grid.
//! 3. **Record** the snapshot in history and the positions as dirty.
//!
//! If step 2 fails nothing is recorded, so a rejected edit leaves the grid,
//! the history and the dirty set exactly as they were.

use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, warn};

use crate::dirty::DirtyTracker;
use crate::error::GridError;
use crate::grid::{Grid, GridSnapshot};
use crate::history::History;
use crate::level::{LevelMetadata, LevelStore};
use crate::mode::EditorMode;
use crate::object::ObjectType;
use crate::position::{GridSize, Position};

#[derive(Debug, Clone)]
pub struct GridModel {
    grid: Grid,
    history: History<GridSnapshot>,
    dirty: DirtyTracker,
}

impl GridModel {
    /// Create an empty level of `width` x `height` cells.
    pub fn new(mode: EditorMode, width: i32, height: i32) -> Result<Self, GridError> {
        let size = GridSize::try_new(width, height)?;
        Ok(Self::from_grid(Grid::new(size, mode)))
    }

    /// Rebuild a previously saved level. History starts empty, so undo
    /// cannot reach back past the load.
    pub fn from_metadata(metadata: &LevelMetadata) -> Result<Self, GridError> {
        let grid = Grid::from_metadata(metadata)?;
        debug!(
            level_id = %metadata.id,
            size = %grid.size(),
            mode = ?grid.mode(),
            "grid_model_loaded"
        );
        Ok(Self::from_grid(grid))
    }

    /// Wrap an existing grid.
    pub fn from_grid(grid: Grid) -> Self {
        Self {
            grid,
            history: History::new(),
            dirty: DirtyTracker::new(),
        }
    }

    /// Bound the undo history to `limit` entries, dropping the oldest.
    pub fn with_history_limit(mut self, limit: usize) -> Self {
        self.history = History::with_limit(limit);
        self
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn size(&self) -> GridSize {
        self.grid.size()
    }

    pub fn mode(&self) -> EditorMode {
        self.grid.mode()
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.grid.set_name(name);
    }

    // -- Edits --

    /// Push `object` onto every cell in `positions`.
    pub fn place_objects<I>(&mut self, positions: I, object: ObjectType) -> Result<(), GridError>
    where
        I: IntoIterator<Item = Position>,
    {
        let positions: BTreeSet<Position> = positions.into_iter().collect();
        let snapshot = self.grid.take_snapshot(&positions)?;
        if let Err(err) = self.grid.set_objects(&positions, object) {
            warn!(%object, cells = positions.len(), error = %err, "placement_rejected");
            return Err(err);
        }
        debug!(%object, cells = positions.len(), "objects_placed");
        self.record(snapshot, positions);
        Ok(())
    }

    /// Clear every cell in `positions`.
    pub fn remove_objects<I>(&mut self, positions: I) -> Result<(), GridError>
    where
        I: IntoIterator<Item = Position>,
    {
        let positions: BTreeSet<Position> = positions.into_iter().collect();
        let snapshot = self.grid.take_snapshot(&positions)?;
        if let Err(err) = self.grid.remove_objects(&positions) {
            warn!(cells = positions.len(), error = %err, "removal_rejected");
            return Err(err);
        }
        debug!(cells = positions.len(), "objects_removed");
        self.record(snapshot, positions);
        Ok(())
    }

    fn record(&mut self, snapshot: GridSnapshot, changed: BTreeSet<Position>) {
        self.dirty.replace(changed);
        self.history.save_snapshot(snapshot);
    }

    // -- Undo --

    /// Revert the most recent edit.
    ///
    /// # Panics
    ///
    /// Panics if there is nothing to undo. Callers must check
    /// [`can_undo`](Self::can_undo) first.
    pub fn undo(&mut self) {
        let Some(snapshot) = self.history.recover_snapshot() else {
            panic!("GridModel::undo called with an empty history; check can_undo() first");
        };
        let restored = self.grid.recover_saved_state(snapshot);
        debug!(cells = restored.len(), remaining = self.history.len(), "edit_undone");
        self.dirty.replace(restored);
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    /// Number of edits that can currently be undone.
    pub fn undo_depth(&self) -> usize {
        self.history.len()
    }

    // -- Change reporting --

    /// Current contents of every cell changed by the last operation.
    pub fn updated_grid(&self) -> BTreeMap<Position, Vec<ObjectType>> {
        self.dirty
            .positions()
            .iter()
            .map(|&pos| (pos, self.grid.stack_at(pos).to_vec()))
            .collect()
    }

    /// Mark every cell dirty and return the whole grid.
    pub fn full_map(&mut self) -> BTreeMap<Position, Vec<ObjectType>> {
        self.dirty.mark_all(self.grid.size());
        self.updated_grid()
    }

    /// Positions changed by the last operation.
    pub fn dirty_positions(&self) -> &BTreeSet<Position> {
        self.dirty.positions()
    }

    // -- Play and persistence --

    /// Gate before entering play mode.
    pub fn before_start_check(&self) -> Result<(), GridError> {
        self.grid.can_play()
    }

    /// Save the level under `id`. Returns `false` on any storage failure.
    pub fn save_state<S: LevelStore + ?Sized>(&self, store: &mut S, id: &str) -> bool {
        self.grid.save_state(store, id)
    }
}
