//! Soft drop hold tracking for terminal environments.
//!
//! Soft drop lasts while the down key is held. Terminals with the keyboard
//! enhancement protocol report releases; the rest only send presses and
//! auto-repeats, so a hold is considered over once no press arrived for a
//! short timeout.

use arrayvec::ArrayVec;
use crossterm::event::{KeyEvent, KeyEventKind};

use crate::map::{handle_key_event, is_soft_drop_key};
use crate::types::{GameAction, SOFT_DROP_RELEASE_MS};

/// Turns key events into game actions, including soft drop start/stop.
#[derive(Debug, Clone)]
pub struct InputHandler {
    down_held: bool,
    /// Time since the last down press or repeat.
    idle_ms: u32,
    /// Set after the first release event; disables the timeout.
    releases_seen: bool,
    key_release_timeout_ms: u32,
}

impl InputHandler {
    pub fn new() -> Self {
        Self {
            down_held: false,
            idle_ms: 0,
            releases_seen: false,
            key_release_timeout_ms: SOFT_DROP_RELEASE_MS,
        }
    }

    pub fn with_key_release_timeout_ms(mut self, timeout_ms: u32) -> Self {
        self.key_release_timeout_ms = timeout_ms;
        self
    }

    pub fn key_release_timeout_ms(&self) -> u32 {
        self.key_release_timeout_ms
    }

    pub fn soft_drop_held(&self) -> bool {
        self.down_held
    }

    /// Dispatch on press/repeat/release.
    ///
    /// Auto-repeat only keeps sideways movement and soft drop going; holding
    /// any other key acts once.
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<GameAction> {
        match key.kind {
            KeyEventKind::Release => self.handle_key_release(key),
            KeyEventKind::Press => self.handle_key_press(key),
            KeyEventKind::Repeat => self
                .handle_key_press(key)
                .filter(|a| matches!(a, GameAction::MoveLeft | GameAction::MoveRight)),
        }
    }

    pub fn handle_key_press(&mut self, key: KeyEvent) -> Option<GameAction> {
        if is_soft_drop_key(key.code) {
            self.idle_ms = 0;
            if self.down_held {
                return None;
            }
            self.down_held = true;
            return Some(GameAction::SoftDropStart);
        }

        handle_key_event(key)
    }

    pub fn handle_key_release(&mut self, key: KeyEvent) -> Option<GameAction> {
        self.releases_seen = true;
        if is_soft_drop_key(key.code) && self.down_held {
            self.down_held = false;
            self.idle_ms = 0;
            return Some(GameAction::SoftDropStop);
        }
        None
    }

    /// Advance the release timeout; returns the actions it produced.
    pub fn update(&mut self, elapsed_ms: u32) -> ArrayVec<GameAction, 1> {
        let mut actions = ArrayVec::new();
        if !self.down_held || self.releases_seen {
            return actions;
        }

        self.idle_ms = self.idle_ms.saturating_add(elapsed_ms);
        if self.idle_ms > self.key_release_timeout_ms {
            self.down_held = false;
            self.idle_ms = 0;
            actions.push(GameAction::SoftDropStop);
        }
        actions
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}
