use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::GridError;

// ---------------------------------------------------------------------------
// Position
// ---------------------------------------------------------------------------

/// A cell coordinate on the editor grid.
///
/// Positions are plain values: they are compared, hashed and ordered by
/// `(x, y)` and carry no reference to the grid they are used with. Bounds
/// are checked by the grid at the point of use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl From<(i32, i32)> for Position {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

// ---------------------------------------------------------------------------
// GridSize
// ---------------------------------------------------------------------------

/// Width and height of a grid. Fixed for the lifetime of the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridSize {
    pub width: u32,
    pub height: u32,
}

impl GridSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Build a size from signed dimensions, rejecting negative values.
    /// Zero is accepted and yields a degenerate grid with no cells.
    pub fn try_new(width: i32, height: i32) -> Result<Self, GridError> {
        if width < 0 || height < 0 {
            return Err(GridError::NegativeDimension { width, height });
        }
        Ok(Self::new(width as u32, height as u32))
    }

    /// Number of cells.
    pub fn area(&self) -> usize {
        self.width as usize * self.height as usize
    }

    pub fn contains(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as u32) < self.width && (pos.y as u32) < self.height
    }

    /// Row-major storage index of `pos`, or `None` when it lies outside.
    pub fn index_of(&self, pos: Position) -> Option<usize> {
        self.contains(pos)
            .then(|| pos.y as usize * self.width as usize + pos.x as usize)
    }

    /// Like [`index_of`](Self::index_of), but reports the miss as an error.
    pub fn checked_index(&self, pos: Position) -> Result<usize, GridError> {
        self.index_of(pos).ok_or(GridError::OutOfBounds {
            position: pos,
            size: *self,
        })
    }

    /// Every position in the grid, row by row.
    pub fn positions(&self) -> impl Iterator<Item = Position> {
        let w = self.width as i32;
        let h = self.height as i32;
        (0..h).flat_map(move |y| (0..w).map(move |x| Position::new(x, y)))
    }
}

impl fmt::Display for GridSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}
