//! Core game logic - pure, deterministic, and testable
//!
//! This crate holds the board, the pieces and every rule that moves them.
//! It has no dependencies on the terminal, audio or storage, so the same
//! game can run in a TUI, a headless test or a benchmark.
//!
//! # Module Structure
//!
//! - [`board`]: resizable grid with collision checks and line sweeping
//! - [`config`]: board size, score table and speedup presets
//! - [`game_state`]: active piece, hold, score, level and frame timing
//! - [`pieces`]: shape matrices, clockwise rotation and offset wall kicks
//! - [`rng`]: seeded uniform piece generator
//! - [`scoring`]: line clear tables and level progression
//! - [`snapshot`]: read-only copies of the game for renderers
//!
//! # Example
//!
//! ```
//! use blockfall_core::GameState;
//! use blockfall_types::GameAction;
//!
//! let mut game = GameState::new(12345);
//! game.start();
//!
//! game.apply_action(GameAction::MoveRight);
//! game.apply_action(GameAction::Rotate);
//! game.apply_action(GameAction::HardDrop);
//!
//! // A piece locked and the next one spawned.
//! assert_eq!(game.piece_id(), 2);
//! ```
//!
//! # Timing
//!
//! Call [`GameState::tick`](game_state::GameState::tick) every frame with the
//! elapsed milliseconds. Gravity fires once the accumulated time exceeds the
//! current interval (1000ms at level 1, 50ms while soft dropping).

pub mod board;
pub mod config;
pub mod game_state;
pub mod pieces;
pub mod rng;
pub mod scoring;
pub mod snapshot;

pub use blockfall_types as types;

// Re-export commonly used types for convenience
pub use board::Board;
pub use config::GameConfig;
pub use game_state::GameState;
pub use pieces::{kick_offsets, spawn_shape, try_rotate, Piece, ShapeMatrix};
pub use rng::PieceGenerator;
pub use scoring::{LevelProgression, ScoreTable};
pub use snapshot::{ActiveSnapshot, GameSnapshot};
