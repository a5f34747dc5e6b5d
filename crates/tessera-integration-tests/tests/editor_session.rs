//! End-to-end editing sessions across the core and data crates.
//!
//! Each test starts from an on-disk configuration, opens or creates a level
//! through a [`FileLevelStore`], edits it through the [`GridModel`] and
//! checks what lands back on disk.

use std::fs;
use std::path::Path;

use tempfile::TempDir;
use tessera_core::test_utils::*;
use tessera_core::*;
use tessera_data::{EditorConfig, FileLevelStore, Format, LevelOpenError, load_config, open_level};

// ============================================================================
// Shared helpers
// ============================================================================

fn write_config(dir: &Path, body: &str) -> EditorConfig {
    let path = dir.join("editor.toml");
    fs::write(&path, body).unwrap();
    load_config(&path).unwrap()
}

fn session(dir: &TempDir, format: &str, limit: Option<usize>) -> (EditorConfig, FileLevelStore) {
    let store_dir = dir.path().join("levels");
    let mut body = format!(
        "store_dir = {:?}\nformat = \"{format}\"\n",
        store_dir.to_str().unwrap()
    );
    if let Some(limit) = limit {
        body.push_str(&format!("history_limit = {limit}\n"));
    }
    let config = write_config(dir.path(), &body);
    let store = FileLevelStore::from_config(&config);
    (config, store)
}

// ============================================================================
// Authoring a level from scratch
// ============================================================================

#[test]
fn build_save_and_reopen_playable_level() {
    let dir = TempDir::new().unwrap();
    let (config, mut store) = session(&dir, "json", None);

    let mut model = normal_model(6, 4);
    model.set_name("first steps");
    model
        .place_objects(rect(0, 0, 6, 4), ObjectType::Floor)
        .unwrap();
    model
        .place_objects(positions(&[(2, 0), (2, 1), (2, 2)]), ObjectType::Wall)
        .unwrap();
    model.place_objects([pos(0, 3)], ObjectType::Player).unwrap();
    model.place_objects([pos(5, 0)], ObjectType::Goal).unwrap();
    model
        .place_objects(positions(&[(4, 1), (4, 2)]), ObjectType::Coin)
        .unwrap();
    model.before_start_check().unwrap();

    assert!(model.save_state(&mut store, "first_steps"));
    assert!(dir.path().join("levels/first_steps.json").exists());
    assert_eq!(store.list().unwrap(), vec!["first_steps".to_string()]);

    let mut reopened = open_level(&store, "first_steps", &config).unwrap();
    assert_eq!(reopened.mode(), EditorMode::Normal);
    assert_eq!(reopened.grid().name(), "first steps");
    assert!(!reopened.can_undo());
    assert!(reopened.before_start_check().is_ok());
    assert_eq!(reopened.full_map(), contents(&model));
}

#[test]
fn unplayable_level_still_saves() {
    let dir = TempDir::new().unwrap();
    let (config, mut store) = session(&dir, "ron", None);

    let mut model = normal_model(3, 3);
    model.place_objects([pos(1, 1)], ObjectType::Goal).unwrap();
    assert!(matches!(
        model.before_start_check(),
        Err(GridError::NotPlayable { .. })
    ));
    assert!(model.save_state(&mut store, "draft"));

    let reopened = open_level(&store, "draft", &config).unwrap();
    assert!(reopened.before_start_check().is_err());
}

// ============================================================================
// Undo across a session
// ============================================================================

#[test]
fn undo_walks_back_to_the_loaded_state() {
    let dir = TempDir::new().unwrap();
    let (config, mut store) = session(&dir, "toml", None);

    let original = playable_level(5, 5);
    assert!(original.save_state(&mut store, "arena"));

    let mut model = open_level(&store, "arena", &config).unwrap();
    let loaded = contents(&model);

    model
        .place_objects(positions(&[(1, 1), (1, 2)]), ObjectType::Spike)
        .unwrap();
    model.remove_objects([pos(4, 4)]).unwrap();
    model
        .place_objects([pos(3, 0)], ObjectType::MovingXObstacle)
        .unwrap();
    assert_eq!(model.undo_depth(), 3);

    model.undo();
    assert_eq!(
        model.dirty_positions().iter().copied().collect::<Vec<_>>(),
        vec![pos(3, 0)]
    );
    model.undo();
    assert_eq!(model.updated_grid()[&pos(4, 4)], vec![ObjectType::Floor, ObjectType::Goal]);
    model.undo();
    assert!(!model.can_undo());
    assert_eq!(contents(&model), loaded);
}

#[test]
fn configured_history_limit_caps_undo() {
    let dir = TempDir::new().unwrap();
    let (config, mut store) = session(&dir, "json", Some(2));
    assert!(sandbox_model(4, 1).save_state(&mut store, "strip"));

    let mut model = open_level(&store, "strip", &config).unwrap();
    for x in 0..4 {
        model.place_objects([pos(x, 0)], ObjectType::Coin).unwrap();
    }
    model.undo();
    model.undo();
    assert!(!model.can_undo());
    assert_eq!(model.grid().stack_at(pos(0, 0)), &[ObjectType::Coin]);
    assert_eq!(model.grid().stack_at(pos(1, 0)), &[ObjectType::Coin]);
    assert!(model.grid().stack_at(pos(2, 0)).is_empty());
}

// ============================================================================
// Mode rules through the full stack
// ============================================================================

#[test]
fn normal_mode_rejections_do_not_reach_disk() {
    let dir = TempDir::new().unwrap();
    let (config, mut store) = session(&dir, "json", None);

    let mut model = playable_level(4, 4);
    assert!(model.save_state(&mut store, "rules"));

    let second_player = model.place_objects([pos(2, 2)], ObjectType::Player);
    assert!(matches!(second_player, Err(GridError::IllegalPlacement { .. })));
    model.place_objects([pos(1, 1)], ObjectType::Coin).unwrap();
    let wall_under_coin = model.place_objects([pos(1, 1)], ObjectType::Wall);
    assert!(wall_under_coin.unwrap_err().is_domain_violation());

    assert!(model.save_state(&mut store, "rules"));
    let reopened = open_level(&store, "rules", &config).unwrap();
    assert_eq!(reopened.grid().count_cells_with(ObjectType::Player), 1);
    assert_eq!(reopened.grid().count_cells_with(ObjectType::Wall), 0);
    assert_eq!(
        reopened.grid().stack_at(pos(1, 1)),
        &[ObjectType::Floor, ObjectType::Coin]
    );
}

#[test]
fn sandbox_levels_keep_their_mode() {
    let dir = TempDir::new().unwrap();
    let (config, mut store) = session(&dir, "ron", None);

    let mut model = sandbox_model(2, 2);
    model
        .place_objects(positions(&[(0, 0), (1, 1)]), ObjectType::Player)
        .unwrap();
    model.place_objects([pos(0, 0)], ObjectType::Player).unwrap();
    assert!(model.before_start_check().is_ok());
    assert!(model.save_state(&mut store, "playground"));

    let reopened = open_level(&store, "playground", &config).unwrap();
    assert_eq!(reopened.mode(), EditorMode::Sandbox);
    assert_eq!(
        reopened.grid().stack_at(pos(0, 0)),
        &[ObjectType::Player, ObjectType::Player]
    );
}

// ============================================================================
// Storage failures
// ============================================================================

#[test]
fn bad_identifier_reports_false() {
    let dir = TempDir::new().unwrap();
    let (_, mut store) = session(&dir, "json", None);
    let model = sandbox_model(1, 1);
    assert!(!model.save_state(&mut store, "../outside"));
    assert!(!model.save_state(&mut store, "  "));
    assert!(store.list().unwrap().is_empty());
}

#[test]
fn opening_missing_level_fails() {
    let dir = TempDir::new().unwrap();
    let (config, store) = session(&dir, "json", None);
    let err = open_level(&store, "nowhere", &config).unwrap_err();
    assert!(matches!(err, LevelOpenError::Store(StoreError::NotFound(_))));
}

#[test]
fn switching_format_migrates_level_file() {
    let dir = TempDir::new().unwrap();
    let (_, mut ron_store) = session(&dir, "ron", None);
    let model = playable_level(3, 3);
    assert!(model.save_state(&mut ron_store, "moving"));

    let mut json_store = FileLevelStore::new(ron_store.root(), Format::Json);
    let mut loaded = GridModel::from_metadata(&json_store.load("moving").unwrap()).unwrap();
    assert!(loaded.save_state(&mut json_store, "moving"));

    assert!(!dir.path().join("levels/moving.ron").exists());
    assert!(dir.path().join("levels/moving.json").exists());
    assert_eq!(loaded.full_map().len(), 9);
}

#[test]
fn save_reports_false_when_old_copy_is_stuck() {
    let dir = TempDir::new().unwrap();
    let (config, mut store) = session(&dir, "json", None);
    fs::create_dir_all(dir.path().join("levels/stuck.toml")).unwrap();

    let model = playable_level(3, 3);
    assert!(!model.save_state(&mut store, "stuck"));

    let err = open_level(&store, "stuck", &config).unwrap_err();
    assert!(matches!(err, LevelOpenError::Store(StoreError::Malformed { .. })));
}

#[test]
fn oversized_level_file_is_rejected() {
    let dir = TempDir::new().unwrap();
    let (config, store) = session(&dir, "json", None);
    fs::create_dir_all(store.root()).unwrap();
    fs::write(
        store.path_for("huge"),
        r#"{ "id": "huge", "width": 4294967295, "height": 4294967295 }"#,
    )
    .unwrap();

    let err = open_level(&store, "huge", &config).unwrap_err();
    assert!(matches!(
        err,
        LevelOpenError::Grid(GridError::InvalidMetadata { .. })
    ));
}
