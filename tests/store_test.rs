use std::fs;

use tempfile::tempdir;

use blockfall::core::{spawn_shape, GameState, Piece};
use blockfall::engine::{NullAudio, Session};
use blockfall::store::{HighScoreStore, JsonFileStore};
use blockfall::types::{GameAction, PieceKind};

#[test]
fn missing_file_reads_zero() {
    let dir = tempdir().unwrap();
    let store = JsonFileStore::new(dir.path().join("highscore.json"));
    assert_eq!(store.load().unwrap(), 0);
}

#[test]
fn save_creates_directories_and_round_trips() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nested").join("highscore.json");
    let store = JsonFileStore::new(&path);

    store.save(1500).unwrap();
    assert_eq!(store.load().unwrap(), 1500);

    let raw: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(raw["highScore"], 1500);

    store.save(900).unwrap();
    assert_eq!(store.load().unwrap(), 900);
}

#[test]
fn corrupt_file_is_an_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("highscore.json");
    fs::write(&path, "not json").unwrap();

    let err = JsonFileStore::new(&path).load().unwrap_err();
    assert!(format!("{:#}", err).contains("parsing"));

    // A session treats it as an empty store and keeps going.
    let session = Session::new(GameState::new(1), NullAudio, JsonFileStore::new(&path));
    assert_eq!(session.high_score(), 0);
}

#[test]
fn session_persists_new_best_to_disk() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("highscore.json");
    fs::write(&path, r#"{"highScore": 40}"#).unwrap();

    let mut session = Session::new(GameState::new(3), NullAudio, JsonFileStore::new(&path));
    assert_eq!(session.high_score(), 40);

    session.game_mut().board_mut().fill_row_except(19, PieceKind::S, &[0]);
    session.game_mut().set_active(Piece {
        kind: PieceKind::I,
        shape: spawn_shape(PieceKind::I).rotated_cw(),
        x: 0,
        y: 0,
    });
    session.push(GameAction::HardDrop);
    session.advance(0);

    assert_eq!(JsonFileStore::new(&path).load().unwrap(), 100);
}
