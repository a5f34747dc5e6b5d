//! Shared test helpers for integration tests and benchmarks.
//!
//! Gated behind `#[cfg(any(test, feature = "test-utils"))]` so these helpers
//! are available in unit tests, integration tests, and benchmarks (via the
//! `test-utils` feature).

use std::collections::BTreeMap;

use crate::mode::EditorMode;
use crate::model::GridModel;
use crate::object::ObjectType;
use crate::position::Position;

// ===========================================================================
// Positions
// ===========================================================================

pub fn pos(x: i32, y: i32) -> Position {
    Position::new(x, y)
}

/// Positions from `(x, y)` pairs.
pub fn positions(points: &[(i32, i32)]) -> Vec<Position> {
    points.iter().map(|&p| Position::from(p)).collect()
}

/// Every position in the axis-aligned rectangle `[x0, x1) x [y0, y1)`.
pub fn rect(x0: i32, y0: i32, x1: i32, y1: i32) -> Vec<Position> {
    (y0..y1)
        .flat_map(|y| (x0..x1).map(move |x| Position::new(x, y)))
        .collect()
}

// ===========================================================================
// Models
// ===========================================================================

pub fn sandbox_model(width: i32, height: i32) -> GridModel {
    GridModel::new(EditorMode::Sandbox, width, height).expect("valid dimensions")
}

pub fn normal_model(width: i32, height: i32) -> GridModel {
    GridModel::new(EditorMode::Normal, width, height).expect("valid dimensions")
}

/// A normal-mode level with a floor everywhere, a player at the top-left
/// corner and a goal at the bottom-right corner.
pub fn playable_level(width: i32, height: i32) -> GridModel {
    let mut model = normal_model(width, height);
    model
        .place_objects(rect(0, 0, width, height), ObjectType::Floor)
        .expect("floor is always placeable");
    model
        .place_objects([pos(0, 0)], ObjectType::Player)
        .expect("first player");
    model
        .place_objects([pos(width - 1, height - 1)], ObjectType::Goal)
        .expect("goal on floor");
    model
}

/// The whole grid as a position -> stack map, without touching the dirty set.
pub fn contents(model: &GridModel) -> BTreeMap<Position, Vec<ObjectType>> {
    model
        .grid()
        .cells()
        .map(|(p, stack)| (p, stack.to_vec()))
        .collect()
}
