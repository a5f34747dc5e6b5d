pub mod config;
pub mod loader;
pub mod store;

pub use config::{EditorConfig, load_config};
pub use loader::{DataLoadError, Format};
pub use store::{FileLevelStore, LevelOpenError, open_level};
