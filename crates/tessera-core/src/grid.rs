//! Cell storage for the editor grid.
//!
//! [`Grid`] is the only type that reads or writes cell contents. It knows
//! nothing about undo or dirty tracking: it hands out [`GridSnapshot`]s on
//! request and restores them when asked, and the
//! [`GridModel`](crate::model::GridModel) decides when to do either.

use std::collections::{BTreeMap, BTreeSet};
use tracing::{info, warn};

use crate::error::GridError;
use crate::level::{CellRecord, LevelMetadata, LevelStore};
use crate::mode::{EditorMode, ModeRules};
use crate::object::ObjectType;
use crate::position::{GridSize, Position};

// ---------------------------------------------------------------------------
// GridSnapshot
// ---------------------------------------------------------------------------

/// Prior contents of the cells touched by one operation.
///
/// Covers only the positions it was taken for, never the whole grid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GridSnapshot {
    cells: BTreeMap<Position, Vec<ObjectType>>,
}

impl GridSnapshot {
    /// Positions covered by this snapshot.
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        self.cells.keys().copied()
    }

    /// Recorded stack at `pos`, if the snapshot covers it.
    pub fn get(&self, pos: Position) -> Option<&[ObjectType]> {
        self.cells.get(&pos).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Grid
// ---------------------------------------------------------------------------

/// Largest cell count a stored level may declare.
pub const MAX_STORED_CELLS: usize = 1 << 24;

/// A fixed-size matrix of object stacks.
#[derive(Debug, Clone)]
pub struct Grid {
    size: GridSize,
    mode: EditorMode,
    rules: ModeRules,
    name: String,
    /// Row-major, `size.area()` entries.
    cells: Vec<Vec<ObjectType>>,
}

impl Grid {
    /// Create an empty grid using the rules of `mode`.
    pub fn new(size: GridSize, mode: EditorMode) -> Self {
        Self::with_rules(size, mode, mode.rules())
    }

    /// Create an empty grid with an explicit rule set.
    ///
    /// The mode is still recorded and persisted; the rules are not.
    pub fn with_rules(size: GridSize, mode: EditorMode, rules: ModeRules) -> Self {
        Self {
            size,
            mode,
            rules,
            name: String::new(),
            cells: vec![Vec::new(); size.area()],
        }
    }

    /// Rebuild a grid from persisted level metadata, cell for cell.
    pub fn from_metadata(metadata: &LevelMetadata) -> Result<Self, GridError> {
        let size = stored_size(metadata.width, metadata.height)?;
        let mut grid = Self::new(size, metadata.mode);
        grid.name = metadata.name.clone();

        let mut seen = BTreeSet::new();
        for record in &metadata.cells {
            let pos = record.position();
            let idx = size.index_of(pos).ok_or_else(|| GridError::InvalidMetadata {
                detail: format!("cell {pos} is outside the {size} grid"),
            })?;
            if !seen.insert(pos) {
                return Err(GridError::InvalidMetadata {
                    detail: format!("cell {pos} appears more than once"),
                });
            }
            grid.cells[idx] = record.objects.clone();
        }
        Ok(grid)
    }

    /// Serializable copy of the grid. Empty cells are omitted.
    pub fn to_metadata(&self, id: &str) -> LevelMetadata {
        LevelMetadata {
            id: id.to_string(),
            name: self.name.clone(),
            mode: self.mode,
            width: self.size.width,
            height: self.size.height,
            cells: self
                .cells()
                .filter(|(_, stack)| !stack.is_empty())
                .map(|(pos, stack)| CellRecord::new(pos, stack.to_vec()))
                .collect(),
        }
    }

    // -- Accessors --

    pub fn size(&self) -> GridSize {
        self.size
    }

    pub fn mode(&self) -> EditorMode {
        self.mode
    }

    pub fn rules(&self) -> &ModeRules {
        &self.rules
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// The ordered stack at `pos`, bottom first.
    pub fn objects(&self, pos: Position) -> Result<&[ObjectType], GridError> {
        let idx = self.size.checked_index(pos)?;
        Ok(&self.cells[idx])
    }

    /// The stack at `pos`, or an empty slice when `pos` is off the grid.
    pub fn stack_at(&self, pos: Position) -> &[ObjectType] {
        match self.size.index_of(pos) {
            Some(idx) => &self.cells[idx],
            None => &[],
        }
    }

    /// Iterate over every cell, row by row.
    pub fn cells(&self) -> impl Iterator<Item = (Position, &[ObjectType])> {
        self.size
            .positions()
            .zip(self.cells.iter().map(Vec::as_slice))
    }

    /// Number of cells whose stack contains `object`.
    pub fn count_cells_with(&self, object: ObjectType) -> usize {
        self.cells.iter().filter(|s| s.contains(&object)).count()
    }

    // -- Snapshots --

    /// Capture the current contents of exactly `positions`.
    pub fn take_snapshot(&self, positions: &BTreeSet<Position>) -> Result<GridSnapshot, GridError> {
        let mut cells = BTreeMap::new();
        for &pos in positions {
            let idx = self.size.checked_index(pos)?;
            cells.insert(pos, self.cells[idx].clone());
        }
        Ok(GridSnapshot { cells })
    }

    /// Write every recorded stack in `snapshot` back into the grid.
    ///
    /// Returns the positions that were restored. Cells the snapshot does not
    /// cover are left alone. The snapshot must come from a grid of the same
    /// size.
    pub fn recover_saved_state(&mut self, snapshot: GridSnapshot) -> BTreeSet<Position> {
        let mut restored = BTreeSet::new();
        for (pos, stack) in snapshot.cells {
            debug_assert!(
                self.size.contains(pos),
                "snapshot position {pos} is outside the {} grid",
                self.size
            );
            if let Some(idx) = self.size.index_of(pos) {
                self.cells[idx] = stack;
                restored.insert(pos);
            }
        }
        restored
    }

    // -- Mutation --

    /// Push `object` on top of every cell in `positions`.
    ///
    /// The whole batch is checked first; on error no cell is modified.
    pub fn set_objects(
        &mut self,
        positions: &BTreeSet<Position>,
        object: ObjectType,
    ) -> Result<(), GridError> {
        let indices = self.indices(positions)?;
        self.rules.check_placement(self, positions, object)?;
        for idx in indices {
            self.cells[idx].push(object);
        }
        Ok(())
    }

    /// Clear every cell in `positions`.
    ///
    /// The whole batch is checked first; on error no cell is modified.
    pub fn remove_objects(&mut self, positions: &BTreeSet<Position>) -> Result<(), GridError> {
        let indices = self.indices(positions)?;
        self.rules.check_removal(self, positions)?;
        for idx in indices {
            self.cells[idx].clear();
        }
        Ok(())
    }

    fn indices(&self, positions: &BTreeSet<Position>) -> Result<Vec<usize>, GridError> {
        positions
            .iter()
            .map(|&pos| self.size.checked_index(pos))
            .collect()
    }

    // -- Validation and persistence --

    /// Check that the grid can be launched under its mode's rules.
    pub fn can_play(&self) -> Result<(), GridError> {
        self.rules.check_playable(self)
    }

    /// Persist the grid under `id`. Failures are logged and reported as `false`.
    pub fn save_state<S: LevelStore + ?Sized>(&self, store: &mut S, id: &str) -> bool {
        let metadata = self.to_metadata(id);
        match store.save(id, &metadata) {
            Ok(()) => {
                info!(level_id = %id, cells = metadata.cells.len(), "level_saved");
                true
            }
            Err(err) => {
                warn!(level_id = %id, error = %err, "level_save_failed");
                false
            }
        }
    }
}

/// Validate dimensions read from storage before anything is allocated.
fn stored_size(width: u32, height: u32) -> Result<GridSize, GridError> {
    let limit = i32::MAX as u32;
    if width > limit || height > limit {
        return Err(GridError::InvalidMetadata {
            detail: format!("grid size {width}x{height} exceeds the coordinate range"),
        });
    }
    (width as usize)
        .checked_mul(height as usize)
        .filter(|&area| area <= MAX_STORED_CELLS)
        .ok_or_else(|| GridError::InvalidMetadata {
            detail: format!("grid size {width}x{height} exceeds {MAX_STORED_CELLS} cells"),
        })?;
    Ok(GridSize::new(width, height))
}
