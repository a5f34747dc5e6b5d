//! Tessera Core -- the grid state engine behind the level editor.
//!
//! A level is a fixed-size grid where each cell holds an ordered stack of
//! [`object::ObjectType`] tags. The editor mutates it in batches, undoes
//! edits one at a time, and asks after every step which cells need to be
//! redrawn.
//!
//! # Edit Pipeline
//!
//! Every call to [`model::GridModel::place_objects`] or
//! [`model::GridModel::remove_objects`] goes through three steps:
//!
//! 1. **Snapshot** -- copy the current stacks of the affected cells.
//! 2. **Mutate** -- validate the whole batch against the editor mode's
//!    rules, then apply it.
//! 3. **Record** -- push the snapshot onto the undo history and publish
//!    the affected positions as the dirty set.
//!
//! A failure in step 2 leaves the grid, history and dirty set untouched.
//!
//! ```rust,ignore
//! let mut model = GridModel::new(EditorMode::Normal, 16, 9)?;
//! model.place_objects([Position::new(0, 0)], ObjectType::Player)?;
//! let changed = model.updated_grid(); // just (0, 0)
//! model.undo();
//! ```
//!
//! # Key Types
//!
//! - [`model::GridModel`] -- Façade used by the editor.
//! - [`grid::Grid`] -- Cell storage, partial snapshots, playability check.
//! - [`history::History`] -- Generic LIFO of undo snapshots.
//! - [`dirty::DirtyTracker`] -- Positions changed by the last operation.
//! - [`mode::ModeRules`] -- Placement and playability policy per
//!   [`mode::EditorMode`].
//! - [`level::LevelStore`] -- Persistence interface for saved levels.

pub mod dirty;
pub mod error;
pub mod grid;
pub mod history;
pub mod level;
pub mod mode;
pub mod model;
pub mod object;
pub mod position;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use error::GridError;
pub use grid::{Grid, GridSnapshot};
pub use level::{CellRecord, LevelMetadata, LevelStore, MemoryLevelStore, StoreError};
pub use mode::{EditorMode, ModeRules};
pub use model::GridModel;
pub use object::{Layer, ObjectType};
pub use position::{GridSize, Position};
