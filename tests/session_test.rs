//! Session controller tests: command ordering, sound fan-out, high score persistence.

use blockfall::core::{spawn_shape, GameState, Piece};
use blockfall::engine::{MemoryStore, NullAudio, RecordingAudio, Session, COMMAND_CAPACITY};
use blockfall::types::{GameAction, GameEvent, PieceKind, SoundCue};

fn upright_i() -> Piece {
    Piece {
        kind: PieceKind::I,
        shape: spawn_shape(PieceKind::I).rotated_cw(),
        x: 0,
        y: 0,
    }
}

#[test]
fn queued_commands_apply_in_order_within_one_advance() {
    let mut s = Session::new(GameState::new(1), NullAudio, MemoryStore::default());
    s.game_mut().set_active(Piece::spawn(PieceKind::T, 10));

    // Right, right, left: net +1. Rotate last so the kick path never matters.
    s.push(GameAction::MoveRight);
    s.push(GameAction::MoveRight);
    s.push(GameAction::MoveLeft);
    s.push(GameAction::Rotate);
    s.advance(0);

    let active = s.game().active().unwrap();
    assert_eq!(active.x, 5);
    assert_eq!(active.shape, spawn_shape(PieceKind::T).rotated_cw());
    assert_eq!(s.last_events(), &[GameEvent::Rotated]);
}

#[test]
fn pause_in_queue_gates_later_commands() {
    let mut s = Session::new(GameState::new(1), NullAudio, MemoryStore::default());
    let x0 = s.game().active().unwrap().x;

    s.push(GameAction::Pause);
    s.push(GameAction::MoveLeft);
    s.advance(16);
    assert!(s.game().paused());
    assert_eq!(s.game().active().unwrap().x, x0);

    s.push(GameAction::Pause);
    s.push(GameAction::MoveLeft);
    s.advance(16);
    assert_eq!(s.game().active().unwrap().x, x0 - 1);
}

#[test]
fn events_map_to_sound_cues() {
    let mut s = Session::new(
        GameState::new(1),
        RecordingAudio::default(),
        MemoryStore::default(),
    );
    s.game_mut().board_mut().fill_row_except(19, PieceKind::O, &[0]);
    s.game_mut().set_active(upright_i());

    s.push(GameAction::HardDrop);
    s.push(GameAction::Hold);
    s.advance(0);

    assert_eq!(s.audio().played, vec![SoundCue::LineClear, SoundCue::Hold]);
}

#[test]
fn high_score_is_saved_when_exceeded() {
    let store = MemoryStore::new(50);
    let mut s = Session::new(GameState::new(1), NullAudio, &store);
    assert_eq!(s.high_score(), 50);

    s.game_mut().board_mut().fill_row_except(19, PieceKind::O, &[0]);
    s.game_mut().set_active(upright_i());
    s.push(GameAction::HardDrop);
    s.advance(0);

    assert_eq!(s.high_score(), 100);
    assert_eq!(store.value(), 100);
    assert_eq!(store.saves(), 1);

    // Nothing new to save on a quiet frame.
    s.advance(16);
    assert_eq!(store.saves(), 1);
}

#[test]
fn lower_score_never_overwrites_best() {
    let store = MemoryStore::new(10_000);
    let mut s = Session::new(GameState::new(1), NullAudio, &store);
    s.game_mut().board_mut().fill_row_except(19, PieceKind::O, &[0]);
    s.game_mut().set_active(upright_i());
    s.push(GameAction::HardDrop);
    s.advance(0);

    assert_eq!(s.game().score(), 100);
    assert_eq!(s.high_score(), 10_000);
    assert_eq!(store.saves(), 0);
}

#[test]
fn restart_keeps_high_score() {
    let mut s = Session::new(GameState::new(1), NullAudio, MemoryStore::new(0));
    s.game_mut().board_mut().fill_row_except(19, PieceKind::O, &[0]);
    s.game_mut().set_active(upright_i());
    s.push(GameAction::HardDrop);
    s.advance(0);

    s.push(GameAction::Restart);
    s.advance(0);
    assert_eq!(s.game().score(), 0);
    assert_eq!(s.high_score(), 100);
    assert_eq!(s.store().value(), 100);
}

#[test]
fn overflowing_queue_drops_newest() {
    let mut s = Session::new(GameState::new(1), NullAudio, MemoryStore::default());
    for _ in 0..COMMAND_CAPACITY {
        assert!(s.push(GameAction::Pause));
    }
    assert!(!s.push(GameAction::Pause));
    assert_eq!(s.dropped_commands(), 1);

    // An even number of toggles leaves the game running.
    s.advance(0);
    assert!(!s.game().paused());
    assert_eq!(s.pending_commands(), 0);
}

#[test]
fn long_command_burst_keeps_every_event() {
    let mut s = Session::new(
        GameState::new(1),
        RecordingAudio::default(),
        MemoryStore::default(),
    );
    s.game_mut().set_active(Piece::spawn(PieceKind::T, 10));

    for _ in 0..20 {
        s.push(GameAction::Rotate);
    }
    s.push(GameAction::HardDrop);
    s.advance(0);

    let played = &s.audio().played;
    assert_eq!(played.len(), 21);
    assert!(played[..20].iter().all(|c| *c == SoundCue::Rotate));
    assert_eq!(played[20], SoundCue::Lock);
    assert_eq!(s.last_events().len(), 21);
}

#[test]
fn game_over_cue_survives_a_busy_frame() {
    let mut s = Session::new(
        GameState::new(1),
        RecordingAudio::default(),
        MemoryStore::default(),
    );
    s.game_mut().board_mut().fill_row_except(0, PieceKind::Z, &[9]);
    s.game_mut().board_mut().fill_row_except(1, PieceKind::Z, &[9]);
    s.game_mut().set_active(Piece {
        kind: PieceKind::I,
        shape: spawn_shape(PieceKind::I).rotated_cw(),
        x: 9,
        y: 16,
    });

    // Sixteen pause toggles fill a whole event buffer on their own.
    for _ in 0..16 {
        s.push(GameAction::Pause);
    }
    s.push(GameAction::HardDrop);
    s.advance(0);

    assert!(s.game().game_over());
    assert_eq!(s.audio().played, vec![SoundCue::Lock, SoundCue::GameOver]);
    assert!(matches!(
        s.last_events().last(),
        Some(GameEvent::GameOver { .. })
    ));
}
