use serde::{Deserialize, Serialize};
use std::fmt;

/// The kind of game object that can occupy a cell.
///
/// A cell holds an ordered stack of these tags, so a background tile and an
/// overlay such as a coin can share one position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObjectType {
    Floor,
    Wall,
    /// Start cell. A playable level has exactly one.
    Player,
    /// End cell. A playable level has at least one.
    Goal,
    Coin,
    Spike,
    MovingXObstacle,
    MovingYObstacle,
}

/// Rendering/stacking layer an object belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Layer {
    Background,
    Entity,
    Collectable,
    Obstacle,
}

impl ObjectType {
    /// All object types, in declaration order.
    pub fn all() -> [ObjectType; 8] {
        [
            ObjectType::Floor,
            ObjectType::Wall,
            ObjectType::Player,
            ObjectType::Goal,
            ObjectType::Coin,
            ObjectType::Spike,
            ObjectType::MovingXObstacle,
            ObjectType::MovingYObstacle,
        ]
    }

    pub fn layer(self) -> Layer {
        match self {
            ObjectType::Floor | ObjectType::Wall => Layer::Background,
            ObjectType::Player | ObjectType::Goal => Layer::Entity,
            ObjectType::Coin => Layer::Collectable,
            ObjectType::Spike | ObjectType::MovingXObstacle | ObjectType::MovingYObstacle => {
                Layer::Obstacle
            }
        }
    }

    /// Whether this object is drawn on top of a background tile.
    pub fn is_overlay(self) -> bool {
        self.layer() != Layer::Background
    }

    /// Stable snake_case name, matching the serialized form.
    pub fn name(self) -> &'static str {
        match self {
            ObjectType::Floor => "floor",
            ObjectType::Wall => "wall",
            ObjectType::Player => "player",
            ObjectType::Goal => "goal",
            ObjectType::Coin => "coin",
            ObjectType::Spike => "spike",
            ObjectType::MovingXObstacle => "moving_x_obstacle",
            ObjectType::MovingYObstacle => "moving_y_obstacle",
        }
    }
}

impl fmt::Display for ObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
