//! Editor configuration.
//!
//! Read from a RON, JSON or TOML file; every field has a default so a
//! partial (or empty) file is valid.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::loader::{DataLoadError, Format, deserialize_file};

/// Settings for the level store and the editing session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Directory that saved levels live in.
    pub store_dir: PathBuf,
    /// Format new levels are written in.
    pub format: Format,
    /// Maximum undo depth. `None` keeps every edit.
    pub history_limit: Option<usize>,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            store_dir: PathBuf::from("levels"),
            format: Format::Json,
            history_limit: None,
        }
    }
}

/// Load an [`EditorConfig`] from `path`.
pub fn load_config(path: &Path) -> Result<EditorConfig, DataLoadError> {
    let config: EditorConfig = deserialize_file(path)?;
    debug!(
        path = %path.display(),
        store_dir = %config.store_dir.display(),
        format = ?config.format,
        history_limit = ?config.history_limit,
        "editor_config_loaded"
    );
    Ok(config)
}
