//! Persisted level data and the storage interface the grid saves through.
//!
//! The core never touches the filesystem. A [`LevelStore`] is handed in by
//! the caller; `tessera-data` provides a file-backed one and
//! [`MemoryLevelStore`] covers tests and embedding.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::mode::EditorMode;
use crate::object::ObjectType;
use crate::position::Position;

/// Contents of one non-empty cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellRecord {
    pub x: i32,
    pub y: i32,
    pub objects: Vec<ObjectType>,
}

impl CellRecord {
    pub fn new(position: Position, objects: Vec<ObjectType>) -> Self {
        Self {
            x: position.x,
            y: position.y,
            objects,
        }
    }

    pub fn position(&self) -> Position {
        Position::new(self.x, self.y)
    }
}

/// Everything needed to rebuild a grid exactly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelMetadata {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub mode: EditorMode,
    pub width: u32,
    pub height: u32,
    #[serde(default)]
    pub cells: Vec<CellRecord>,
}

/// Errors from a [`LevelStore`].
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("invalid level identifier '{0}'")]
    InvalidIdentifier(String),

    #[error("level '{0}' not found")]
    NotFound(String),

    #[error("malformed level file {file}: {detail}")]
    Malformed { file: PathBuf, detail: String },

    #[error("could not encode level: {detail}")]
    Encode { detail: String },

    #[error("could not remove stale level file {file}: {source}")]
    StaleCopy {
        file: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Reject identifiers that are blank or could escape a storage directory.
pub fn validate_identifier(id: &str) -> Result<(), StoreError> {
    let bad = id.trim().is_empty()
        || id.contains(['/', '\\'])
        || id == "."
        || id == ".."
        || id.chars().any(char::is_control);
    if bad {
        return Err(StoreError::InvalidIdentifier(id.to_string()));
    }
    Ok(())
}

/// Somewhere levels can be loaded from and saved to.
pub trait LevelStore {
    fn load(&self, id: &str) -> Result<LevelMetadata, StoreError>;

    fn save(&mut self, id: &str, level: &LevelMetadata) -> Result<(), StoreError>;
}

/// A [`LevelStore`] that keeps levels in memory.
#[derive(Debug, Default, Clone)]
pub struct MemoryLevelStore {
    levels: BTreeMap<String, LevelMetadata>,
}

impl MemoryLevelStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: &str) -> Option<&LevelMetadata> {
        self.levels.get(id)
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }
}

impl LevelStore for MemoryLevelStore {
    fn load(&self, id: &str) -> Result<LevelMetadata, StoreError> {
        validate_identifier(id)?;
        self.levels
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    fn save(&mut self, id: &str, level: &LevelMetadata) -> Result<(), StoreError> {
        validate_identifier(id)?;
        self.levels.insert(id.to_string(), level.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn level(id: &str) -> LevelMetadata {
        LevelMetadata {
            id: id.to_string(),
            name: "test".to_string(),
            mode: EditorMode::Sandbox,
            width: 2,
            height: 2,
            cells: vec![CellRecord::new(Position::new(0, 1), vec![ObjectType::Wall])],
        }
    }

    #[test]
    fn identifiers() {
        assert!(validate_identifier("level_01").is_ok());
        assert!(validate_identifier("my level").is_ok());
        for bad in ["", "   ", "a/b", "a\\b", "..", ".", "tab\tid"] {
            assert!(
                matches!(validate_identifier(bad), Err(StoreError::InvalidIdentifier(_))),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn memory_store_round_trip() {
        let mut store = MemoryLevelStore::new();
        assert!(store.is_empty());
        store.save("one", &level("one")).unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(store.load("one").unwrap(), level("one"));
    }

    #[test]
    fn memory_store_missing_level() {
        let store = MemoryLevelStore::new();
        assert!(matches!(store.load("nope"), Err(StoreError::NotFound(_))));
    }

    #[test]
    fn memory_store_overwrites() {
        let mut store = MemoryLevelStore::new();
        store.save("one", &level("one")).unwrap();
        let mut changed = level("one");
        changed.cells.clear();
        store.save("one", &changed).unwrap();
        assert!(store.load("one").unwrap().cells.is_empty());
    }

    #[test]
    fn cell_record_position() {
        let record = CellRecord::new(Position::new(4, 9), vec![]);
        assert_eq!(record.position(), Position::new(4, 9));
    }
}
