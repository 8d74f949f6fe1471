//! Game state module - manages the complete game state
//!
//! This module ties together all core components: board, pieces, generator, and scoring.
//! It handles frame timing, piece movement, rotation, line clears, hold, and game lifecycle.
//!
//! Every operation is all-or-nothing with respect to the board: a move or rotation that
//! would collide is reverted and reported as `false`, never as an error.

use arrayvec::ArrayVec;
use log::{debug, info, warn};

use crate::config::GameConfig;
use crate::pieces::{try_rotate, Piece};
use crate::rng::PieceGenerator;
use crate::snapshot::{ActiveSnapshot, GameSnapshot};
use crate::types::{GameAction, GameEvent, PieceKind};
use crate::Board;

/// Events buffered between two drains by the owner.
///
/// One action records at most three events (lock, level up, game over).
pub const EVENT_CAPACITY: usize = 16;

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    config: GameConfig,
    board: Board,
    active: Option<Piece>,
    next: Option<PieceKind>,
    hold: Option<PieceKind>,
    generator: PieceGenerator,
    /// Monotonic episode id (increments on restart).
    episode_id: u32,
    /// Monotonic id for spawned pieces (increments only on successful spawn).
    piece_id: u32,
    /// Events not yet taken by the owner (oldest first).
    events: ArrayVec<GameEvent, EVENT_CAPACITY>,
    score: u32,
    level: u32,
    lines: u32,
    drop_interval_ms: u32,
    drop_counter_ms: u32,
    soft_dropping: bool,
    paused: bool,
    game_over: bool,
    started: bool,
    can_hold: bool,
}

impl GameState {
    /// Create a new game with classic rules and the given RNG seed
    pub fn new(seed: u64) -> Self {
        Self::with_config(GameConfig::classic(), seed)
    }

    /// Create a new game with explicit rules
    pub fn with_config(config: GameConfig, seed: u64) -> Self {
        let config = config.validated();
        Self {
            board: Board::with_size(config.board_width, config.board_height),
            active: None,
            next: None,
            hold: None,
            generator: PieceGenerator::new(seed),
            episode_id: 0,
            piece_id: 0,
            events: ArrayVec::new(),
            score: 0,
            level: 1,
            lines: 0,
            drop_interval_ms: config.base_drop_ms,
            drop_counter_ms: 0,
            soft_dropping: false,
            paused: false,
            game_over: false,
            started: false,
            can_hold: true,
            config,
        }
    }

    /// Start the game and spawn the first piece
    pub fn start(&mut self) {
        if self.started {
            return;
        }
        self.started = true;
        self.spawn_piece();
    }

    /// Throw away the board, pieces and score and start a fresh episode.
    ///
    /// The piece generator keeps running, so the next episode sees new pieces.
    pub fn restart(&mut self) {
        self.board.clear();
        self.active = None;
        self.next = None;
        self.hold = None;
        self.score = 0;
        self.level = 1;
        self.lines = 0;
        self.drop_interval_ms = self.config.base_drop_ms;
        self.drop_counter_ms = 0;
        self.soft_dropping = false;
        self.paused = false;
        self.game_over = false;
        self.can_hold = true;
        self.episode_id = self.episode_id.wrapping_add(1);
        self.started = true;

        info!("restart: episode {}", self.episode_id);
        self.push_event(GameEvent::Restarted);
        self.spawn_piece();
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn started(&self) -> bool {
        self.started
    }

    pub fn paused(&self) -> bool {
        self.paused
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    pub fn can_hold(&self) -> bool {
        self.can_hold
    }

    pub fn soft_dropping(&self) -> bool {
        self.soft_dropping
    }

    pub fn episode_id(&self) -> u32 {
        self.episode_id
    }

    pub fn piece_id(&self) -> u32 {
        self.piece_id
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn hold_piece(&self) -> Option<PieceKind> {
        self.hold
    }

    pub fn next_piece(&self) -> Option<PieceKind> {
        self.next
    }

    pub fn active(&self) -> Option<Piece> {
        self.active
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Mutable board access for setting up positions (tests, puzzles, replays).
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    /// Replace the active piece. Collisions are not checked.
    pub fn set_active(&mut self, piece: Piece) {
        self.active = Some(piece);
    }

    /// Replace the queued next piece.
    pub fn set_next(&mut self, kind: PieceKind) {
        self.next = Some(kind);
    }

    /// Gravity interval in effect for the next tick.
    pub fn drop_interval_ms(&self) -> u32 {
        if self.soft_dropping {
            self.config.soft_drop_ms
        } else {
            self.drop_interval_ms
        }
    }

    /// Gravity interval of the current level (ignores soft drop).
    pub fn level_interval_ms(&self) -> u32 {
        self.drop_interval_ms
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.board_width = self.board.width();
        out.board_height = self.board.height();
        self.board.write_color_indices(&mut out.board);

        out.active = self.active.map(ActiveSnapshot::from);
        out.ghost_y = self.ghost_y();
        out.next = self.next;
        out.hold = self.hold;
        out.can_hold = self.can_hold;
        out.started = self.started;
        out.paused = self.paused;
        out.game_over = self.game_over;
        out.soft_dropping = self.soft_dropping;
        out.episode_id = self.episode_id;
        out.seed = self.generator.seed();
        out.piece_id = self.piece_id;
        out.score = self.score;
        out.level = self.level;
        out.lines = self.lines;
        out.drop_interval_ms = self.drop_interval_ms();
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    /// Take every event recorded since the last call.
    pub fn take_events(&mut self) -> ArrayVec<GameEvent, EVENT_CAPACITY> {
        std::mem::take(&mut self.events)
    }

    fn push_event(&mut self, event: GameEvent) {
        if self.events.try_push(event).is_err() {
            warn!("event buffer full, dropped {:?}", event);
        }
    }

    /// Whether `piece` overlaps a wall, the floor or a locked cell.
    ///
    /// Cells above the top row never collide.
    pub fn is_collision(&self, piece: &Piece) -> bool {
        piece.cells().any(|(x, y)| self.board.blocks(x, y))
    }

    /// Promote the queued piece and draw a new one for the queue.
    ///
    /// Returns `false` (and ends the game) when the new piece collides at spawn.
    pub fn spawn_piece(&mut self) -> bool {
        let kind = match self.next.take() {
            Some(kind) => kind,
            None => self.generator.draw(),
        };
        self.next = Some(self.generator.draw());
        self.can_hold = true;
        self.place_at_spawn(kind)
    }

    fn place_at_spawn(&mut self, kind: PieceKind) -> bool {
        let piece = Piece::spawn(kind, self.board.width());
        self.active = Some(piece);

        if self.is_collision(&piece) {
            self.game_over = true;
            self.soft_dropping = false;
            info!(
                "game over: {:?} blocked at spawn, score {} level {} lines {}",
                kind, self.score, self.level, self.lines
            );
            self.push_event(GameEvent::GameOver { score: self.score });
            return false;
        }

        self.piece_id = self.piece_id.wrapping_add(1);
        true
    }

    /// Shift the active piece by `dir` columns. Blocked moves change nothing.
    pub fn move_piece(&mut self, dir: i8) -> bool {
        let Some(active) = self.active else {
            return false;
        };

        let moved = active.shifted(dir, 0);
        if self.is_collision(&moved) {
            return false;
        }
        self.active = Some(moved);
        true
    }

    /// Rotate the active piece clockwise with offset wall kicks.
    ///
    /// If no kick fits, shape and column stay exactly as they were.
    pub fn rotate(&mut self) -> bool {
        let Some(active) = self.active else {
            return false;
        };

        match try_rotate(&active, |p| self.is_collision(p)) {
            Some(rotated) => {
                self.active = Some(rotated);
                self.push_event(GameEvent::Rotated);
                true
            }
            None => false,
        }
    }

    /// One gravity step: move down a row, or lock if the row below is taken.
    ///
    /// Returns `true` if the piece moved, `false` if it locked (or there was none).
    pub fn step_down(&mut self) -> bool {
        self.drop_counter_ms = 0;

        let Some(active) = self.active else {
            return false;
        };

        let moved = active.shifted(0, 1);
        if self.is_collision(&moved) {
            self.lock_piece();
            return false;
        }
        self.active = Some(moved);
        true
    }

    /// Drop the active piece as far as it goes and lock it.
    ///
    /// Returns the number of rows travelled.
    pub fn hard_drop(&mut self) -> u32 {
        let Some(active) = self.active else {
            return 0;
        };

        let mut landed = active;
        let mut distance = 0;
        loop {
            let below = landed.shifted(0, 1);
            if self.is_collision(&below) {
                break;
            }
            landed = below;
            distance += 1;
        }

        self.active = Some(landed);
        self.drop_counter_ms = 0;
        self.lock_piece();
        distance
    }

    /// Start or stop the fast gravity interval.
    ///
    /// Starting primes the drop counter so the piece falls on the next frame.
    pub fn set_soft_drop(&mut self, on: bool) {
        if on && !self.soft_dropping {
            self.soft_dropping = true;
            self.drop_counter_ms = self.config.soft_drop_ms;
        } else if !on {
            self.soft_dropping = false;
        }
    }

    /// Store the active piece, or swap it with the stored one. Once per piece.
    pub fn hold(&mut self) -> bool {
        if !self.can_hold {
            return false;
        }

        let Some(active) = self.active else {
            return false;
        };

        debug!("hold {:?} (held: {:?})", active.kind, self.hold);
        self.push_event(GameEvent::Held);

        match self.hold.replace(active.kind) {
            Some(held) => {
                self.place_at_spawn(held);
            }
            None => {
                self.spawn_piece();
            }
        }

        self.can_hold = false;
        true
    }

    /// Flip between running and paused. Refused after game over.
    pub fn toggle_pause(&mut self) -> bool {
        if self.game_over || !self.started {
            return false;
        }

        self.paused = !self.paused;
        let event = if self.paused {
            GameEvent::Paused
        } else {
            GameEvent::Resumed
        };
        self.push_event(event);
        true
    }

    /// Merge the active piece into the board, sweep, score, then spawn the next piece.
    pub fn lock_piece(&mut self) {
        let Some(active) = self.active.take() else {
            return;
        };

        self.board
            .merge_cells(active.shape.minos(), active.x, active.y, active.kind);

        let cleared = self.board.sweep_full_rows();
        let points = self.config.score_table.points(cleared);
        self.score = self.score.saturating_add(points);
        self.lines = self.lines.saturating_add(cleared);

        debug!(
            "lock {:?} at ({}, {}): {} lines, +{} points",
            active.kind, active.x, active.y, cleared, points
        );
        self.push_event(GameEvent::Locked {
            lines_cleared: cleared,
            points,
        });

        if let Some(progression) = self.config.progression {
            if progression.apply(self.score, &mut self.level, &mut self.drop_interval_ms) > 0 {
                info!(
                    "level up: level {}, drop interval {}ms",
                    self.level, self.drop_interval_ms
                );
                self.push_event(GameEvent::LevelUp {
                    level: self.level,
                    drop_interval_ms: self.drop_interval_ms,
                });
            }
        }

        self.spawn_piece();
    }

    /// Row the active piece would land on (ghost piece).
    pub fn ghost_y(&self) -> Option<i8> {
        let mut landed = self.active?;
        loop {
            let below = landed.shifted(0, 1);
            if self.is_collision(&below) {
                return Some(landed.y);
            }
            landed = below;
        }
    }

    /// Frame tick - accumulate time and apply at most one gravity step.
    ///
    /// A long gap between frames still yields a single step; there is no catch-up.
    /// Returns `true` when a gravity step ran.
    pub fn tick(&mut self, elapsed_ms: u32) -> bool {
        if self.paused || self.game_over || !self.started {
            return false;
        }

        self.drop_counter_ms = self.drop_counter_ms.saturating_add(elapsed_ms);
        if self.drop_counter_ms > self.drop_interval_ms() {
            self.step_down();
            return true;
        }

        false
    }

    /// Apply a decoded input command.
    ///
    /// Piece commands are no-ops while paused, after game over, or before start.
    /// Returns whether the command changed anything.
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        if action == GameAction::Restart {
            self.restart();
            return true;
        }
        if !self.started {
            return false;
        }
        if action.is_gated() && (self.paused || self.game_over) {
            return false;
        }

        match action {
            GameAction::MoveLeft => self.move_piece(-1),
            GameAction::MoveRight => self.move_piece(1),
            GameAction::Rotate => self.rotate(),
            GameAction::SoftDrop => {
                self.step_down();
                true
            }
            GameAction::SoftDropStart => {
                self.set_soft_drop(true);
                true
            }
            GameAction::SoftDropStop => {
                let was = self.soft_dropping;
                self.set_soft_drop(false);
                was
            }
            GameAction::HardDrop => {
                self.hard_drop();
                true
            }
            GameAction::Hold => self.hold(),
            GameAction::Pause => self.toggle_pause(),
            // Handled above / by the session owner.
            GameAction::Restart | GameAction::ToggleSound => false,
        }
    }
}
