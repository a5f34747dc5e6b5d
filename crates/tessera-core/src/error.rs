use crate::object::ObjectType;
use crate::position::{GridSize, Position};

/// Errors raised by grid and grid-model operations.
///
/// Variants fall into two groups. Invalid-argument errors are caller bugs
/// (bad dimensions, positions off the grid, malformed level data). Domain
/// violations are edits the active editor mode does not allow, or a level
/// that is not ready to be played; they carry a reason meant for the user.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GridError {
    #[error("grid dimensions cannot be negative (got {width}x{height})")]
    NegativeDimension { width: i32, height: i32 },

    #[error("position {position} is outside the {size} grid")]
    OutOfBounds { position: Position, size: GridSize },

    #[error("invalid level metadata: {detail}")]
    InvalidMetadata { detail: String },

    #[error("cannot place {object} at {position}: {reason}")]
    IllegalPlacement {
        position: Position,
        object: ObjectType,
        reason: String,
    },

    #[error("cannot clear cell {position}: {reason}")]
    IllegalRemoval { position: Position, reason: String },

    #[error("level is not playable: {reason}")]
    NotPlayable { reason: String },
}

impl GridError {
    /// `true` for errors caused by malformed input rather than editor rules.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(
            self,
            GridError::NegativeDimension { .. }
                | GridError::OutOfBounds { .. }
                | GridError::InvalidMetadata { .. }
        )
    }

    /// `true` for placement, removal and playability violations.
    pub fn is_domain_violation(&self) -> bool {
        !self.is_invalid_argument()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_are_readable() {
        let err = GridError::IllegalPlacement {
            position: Position::new(1, 2),
            object: ObjectType::Coin,
            reason: "cell is blocked by a wall".into(),
        };
        assert_eq!(
            err.to_string(),
            "cannot place coin at (1, 2): cell is blocked by a wall"
        );

        let err = GridError::OutOfBounds {
            position: Position::new(5, 0),
            size: GridSize::new(5, 5),
        };
        assert_eq!(err.to_string(), "position (5, 0) is outside the 5x5 grid");
    }

    #[test]
    fn classification() {
        assert!(GridError::NegativeDimension { width: -1, height: 0 }.is_invalid_argument());
        assert!(
            GridError::NotPlayable {
                reason: String::new()
            }
            .is_domain_violation()
        );
    }
}
