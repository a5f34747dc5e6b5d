//! File-backed level storage.
//!
//! Each level is one file named after its identifier, `{root}/{id}.{ext}`.
//! Loading accepts any supported format; saving writes the configured one
//! and removes copies of the same level in other formats, so a level never
//! exists twice. A copy that cannot be removed fails the save.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use tessera_core::level::validate_identifier;
use tessera_core::{GridError, GridModel, LevelMetadata, LevelStore, StoreError};

use crate::config::EditorConfig;
use crate::loader::{DataLoadError, Format, deserialize_file, find_data_file, write_file_atomic};

impl From<DataLoadError> for StoreError {
    fn from(err: DataLoadError) -> Self {
        match err {
            DataLoadError::Io(e) => StoreError::Io(e),
            DataLoadError::Parse { file, detail } => StoreError::Malformed { file, detail },
            DataLoadError::UnsupportedFormat { file } => StoreError::Malformed {
                detail: "unsupported file extension".to_string(),
                file,
            },
            DataLoadError::ConflictingFormats { a, b } => StoreError::Malformed {
                detail: format!("also saved as {}", b.display()),
                file: a,
            },
            DataLoadError::Encode { format, detail } => StoreError::Encode {
                detail: format!("{format:?}: {detail}"),
            },
        }
    }
}

/// Stores levels as files under a root directory.
#[derive(Debug, Clone)]
pub struct FileLevelStore {
    root: PathBuf,
    format: Format,
}

impl FileLevelStore {
    pub fn new(root: impl Into<PathBuf>, format: Format) -> Self {
        Self {
            root: root.into(),
            format,
        }
    }

    pub fn from_config(config: &EditorConfig) -> Self {
        Self::new(config.store_dir.clone(), config.format)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn format(&self) -> Format {
        self.format
    }

    /// Path a level with this identifier is saved to.
    pub fn path_for(&self, id: &str) -> PathBuf {
        self.root.join(format!("{id}.{}", self.format.extension()))
    }

    /// Identifiers of every level in the store, sorted.
    pub fn list(&self) -> Result<Vec<String>, StoreError> {
        let entries = match fs::read_dir(&self.root) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };
        let mut ids = Vec::new();
        for entry in entries {
            let path = entry?.path();
            let is_level = path
                .extension()
                .and_then(|e| e.to_str())
                .is_some_and(|ext| Format::all().iter().any(|f| f.extension() == ext));
            if is_level && let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                ids.push(stem.to_string());
            }
        }
        ids.sort();
        ids.dedup();
        Ok(ids)
    }
}

impl LevelStore for FileLevelStore {
    fn load(&self, id: &str) -> Result<LevelMetadata, StoreError> {
        validate_identifier(id)?;
        let path = find_data_file(&self.root, id)?
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        let level: LevelMetadata = deserialize_file(&path)?;
        info!(level_id = %id, path = %path.display(), "level_file_loaded");
        Ok(level)
    }

    fn save(&mut self, id: &str, level: &LevelMetadata) -> Result<(), StoreError> {
        validate_identifier(id)?;
        let path = self.path_for(id);
        write_file_atomic(&path, self.format, level)?;

        for other in Format::all().into_iter().filter(|f| *f != self.format) {
            let stale = self.root.join(format!("{id}.{}", other.extension()));
            match fs::remove_file(&stale) {
                Ok(()) => info!(path = %stale.display(), "stale_level_file_removed"),
                Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                Err(e) => {
                    warn!(path = %stale.display(), error = %e, "stale_level_file_kept");
                    return Err(StoreError::StaleCopy {
                        file: stale,
                        source: e,
                    });
                }
            }
        }

        info!(level_id = %id, path = %path.display(), "level_file_written");
        Ok(())
    }
}

// ===========================================================================
// Opening levels
// ===========================================================================

/// Error from [`open_level`].
#[derive(Debug, thiserror::Error)]
pub enum LevelOpenError {
    #[error("could not load level: {0}")]
    Store(#[from] StoreError),
    #[error("level data is inconsistent: {0}")]
    Grid(#[from] GridError),
}

/// Load level `id` from `store` into a fresh [`GridModel`], applying the
/// configured history limit.
pub fn open_level<S: LevelStore + ?Sized>(
    store: &S,
    id: &str,
    config: &EditorConfig,
) -> Result<GridModel, LevelOpenError> {
    let metadata = store.load(id)?;
    let model = GridModel::from_metadata(&metadata)?;
    Ok(match config.history_limit {
        Some(limit) => model.with_history_limit(limit),
        None => model,
    })
}
