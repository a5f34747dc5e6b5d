//! Editor modes and the placement/playability rules they select.
//!
//! Each [`EditorMode`] maps to a [`ModeRules`] value. The grid consults the
//! rules inside `set_objects`, `remove_objects` and `can_play`; nothing else
//! in the crate branches on the mode.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::error::GridError;
use crate::grid::Grid;
use crate::object::ObjectType;
use crate::position::Position;

/// Which rule set the editor runs under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EditorMode {
    /// Free-form editing; nothing is validated.
    Sandbox,
    /// Rule-checked editing for levels meant to be played.
    #[default]
    Normal,
}

impl EditorMode {
    pub fn rules(self) -> ModeRules {
        match self {
            EditorMode::Sandbox => ModeRules::SANDBOX,
            EditorMode::Normal => ModeRules::NORMAL,
        }
    }
}

/// A named policy for placement, removal and playability.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModeRules {
    /// Types that may occupy at most one cell of the whole grid.
    pub unique_types: &'static [ObjectType],
    /// Whether a cell may hold the same type more than once.
    pub allow_duplicate_in_cell: bool,
    /// Walls cannot carry overlays, and cannot be slid under existing ones.
    pub solid_blocks_overlay: bool,
    /// Cells holding any of these types cannot be cleared.
    pub locked_types: &'static [ObjectType],
    /// Exactly one [`ObjectType::Player`] must be present to play.
    pub require_start: bool,
    /// At least one [`ObjectType::Goal`] must be present to play.
    pub require_goal: bool,
}

impl ModeRules {
    pub const SANDBOX: ModeRules = ModeRules {
        unique_types: &[],
        allow_duplicate_in_cell: true,
        solid_blocks_overlay: false,
        locked_types: &[],
        require_start: false,
        require_goal: false,
    };

    pub const NORMAL: ModeRules = ModeRules {
        unique_types: &[ObjectType::Player],
        allow_duplicate_in_cell: false,
        solid_blocks_overlay: true,
        locked_types: &[],
        require_start: true,
        require_goal: true,
    };

    /// Validate placing `object` on every position in `positions`.
    ///
    /// Positions must already be bounds-checked. The grid is not modified.
    pub fn check_placement(
        &self,
        grid: &Grid,
        positions: &BTreeSet<Position>,
        object: ObjectType,
    ) -> Result<(), GridError> {
        let illegal = |position: Position, reason: String| GridError::IllegalPlacement {
            position,
            object,
            reason,
        };

        if self.unique_types.contains(&object) {
            let elsewhere = grid
                .cells()
                .filter(|(pos, stack)| stack.contains(&object) && !positions.contains(pos))
                .count();
            if elsewhere + positions.len() > 1
                && let Some(&first) = positions.iter().next()
            {
                return Err(illegal(
                    first,
                    format!("only one {object} is allowed per level"),
                ));
            }
        }

        for &pos in positions {
            let stack = grid.stack_at(pos);
            if !self.allow_duplicate_in_cell && stack.contains(&object) {
                return Err(illegal(pos, format!("cell already contains a {object}")));
            }
            if self.solid_blocks_overlay {
                if object.is_overlay() && stack.contains(&ObjectType::Wall) {
                    return Err(illegal(pos, "cell is blocked by a wall".to_string()));
                }
                if object == ObjectType::Wall && stack.iter().any(|t| t.is_overlay()) {
                    return Err(illegal(
                        pos,
                        "a wall cannot be placed under other objects".to_string(),
                    ));
                }
            }
        }
        Ok(())
    }

    /// Validate clearing every position in `positions`.
    pub fn check_removal(
        &self,
        grid: &Grid,
        positions: &BTreeSet<Position>,
    ) -> Result<(), GridError> {
        for &pos in positions {
            let stack = grid.stack_at(pos);
            if self.removable(stack) {
                continue;
            }
            let locked: Vec<&str> = stack
                .iter()
                .filter(|t| self.locked_types.contains(t))
                .map(|t| t.name())
                .collect();
            return Err(GridError::IllegalRemoval {
                position: pos,
                reason: format!("{} is required by the level layout", locked.join(", ")),
            });
        }
        Ok(())
    }

    /// Whether a cell with this stack may be cleared.
    pub fn removable(&self, stack: &[ObjectType]) -> bool {
        !stack.iter().any(|t| self.locked_types.contains(t))
    }

    /// Validate that the grid is complete enough to be played.
    pub fn check_playable(&self, grid: &Grid) -> Result<(), GridError> {
        if self.require_start {
            match grid.count_cells_with(ObjectType::Player) {
                0 => {
                    return Err(GridError::NotPlayable {
                        reason: "the level has no player start".to_string(),
                    });
                }
                1 => {}
                n => {
                    return Err(GridError::NotPlayable {
                        reason: format!("the level has {n} player starts, expected one"),
                    });
                }
            }
        }
        if self.require_goal && grid.count_cells_with(ObjectType::Goal) == 0 {
            return Err(GridError::NotPlayable {
                reason: "the level has no goal".to_string(),
            });
        }
        Ok(())
    }
}
