//! Single-owner game session.
//!
//! The session is the only thing that mutates a [`GameState`]. Input is queued
//! with [`Session::push`] and takes effect inside [`Session::advance`], which
//! runs once per frame:
//!
//! 1. apply queued commands in arrival order,
//! 2. run one frame tick,
//! 3. fan out the recorded events to the audio sink and the high score store.

use log::{debug, info, warn};

use crate::collab::{AudioSink, HighScoreStore};
use crate::command::CommandQueue;
use crate::core::game_state::EVENT_CAPACITY;
use crate::core::{GameSnapshot, GameState};
use crate::types::{GameAction, GameEvent};

pub struct Session<A: AudioSink, S: HighScoreStore> {
    game: GameState,
    commands: CommandQueue,
    audio: A,
    store: S,
    high_score: u32,
    sound_enabled: bool,
    /// Events of the last frame; the allocation is reused.
    last_events: Vec<GameEvent>,
}

impl<A: AudioSink, S: HighScoreStore> Session<A, S> {
    /// Wrap `game`, load the stored high score and start play.
    ///
    /// A store that fails to load counts as an empty one.
    pub fn new(mut game: GameState, audio: A, store: S) -> Self {
        let high_score = match store.load() {
            Ok(score) => score,
            Err(err) => {
                warn!("failed to load high score: {:#}", err);
                0
            }
        };

        game.start();
        info!(
            "session started: {}x{} board, high score {}",
            game.board().width(),
            game.board().height(),
            high_score
        );

        Self {
            game,
            commands: CommandQueue::new(),
            audio,
            store,
            high_score,
            sound_enabled: true,
            last_events: Vec::with_capacity(EVENT_CAPACITY),
        }
    }

    /// Queue a command for the next `advance`.
    pub fn push(&mut self, action: GameAction) -> bool {
        let accepted = self.commands.push(action);
        if !accepted {
            debug!("command queue full, dropped {:?}", action);
        }
        accepted
    }

    /// Run one frame: commands, then gravity, then events.
    ///
    /// Events are collected after every command, so a long queue cannot
    /// overflow the game's event buffer.
    pub fn advance(&mut self, elapsed_ms: u32) {
        self.last_events.clear();

        for action in self.commands.drain() {
            if action == GameAction::ToggleSound {
                self.sound_enabled = !self.sound_enabled;
                info!("sound {}", if self.sound_enabled { "on" } else { "off" });
                continue;
            }
            self.game.apply_action(action);
            self.last_events.extend(self.game.take_events());
        }

        self.game.tick(elapsed_ms);
        self.last_events.extend(self.game.take_events());

        for event in &self.last_events {
            if self.sound_enabled {
                if let Some(cue) = event.sound_cue() {
                    self.audio.play(cue);
                }
            }
            if let GameEvent::GameOver { score } = event {
                info!("final score {} (best {})", score, self.high_score.max(*score));
            }
        }

        self.record_high_score();
    }

    fn record_high_score(&mut self) {
        let score = self.game.score();
        if score <= self.high_score {
            return;
        }

        self.high_score = score;
        if let Err(err) = self.store.save(score) {
            warn!("failed to save high score {}: {:#}", score, err);
        }
    }

    pub fn game(&self) -> &GameState {
        &self.game
    }

    /// Direct game access for setting up positions outside the command path.
    pub fn game_mut(&mut self) -> &mut GameState {
        &mut self.game
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.game.snapshot_into(out);
    }

    pub fn snapshot(&self) -> GameSnapshot {
        self.game.snapshot()
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    pub fn sound_enabled(&self) -> bool {
        self.sound_enabled
    }

    pub fn set_sound_enabled(&mut self, on: bool) {
        self.sound_enabled = on;
    }

    /// Events produced by the most recent `advance`.
    pub fn last_events(&self) -> &[GameEvent] {
        &self.last_events
    }

    pub fn pending_commands(&self) -> usize {
        self.commands.len()
    }

    pub fn dropped_commands(&self) -> u64 {
        self.commands.dropped()
    }

    pub fn audio(&self) -> &A {
        &self.audio
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}
