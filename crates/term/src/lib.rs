//! Terminal "game renderer" module.
//!
//! This is a small, game-oriented rendering layer for terminal gameplay.
//! It avoids widget/layout libraries and instead renders into a simple
//! framebuffer that is diff-flushed to the terminal.
//!
//! Goals:
//! - Keep `core` deterministic and testable
//! - Precise control over aspect ratio (2 chars wide per cell)
//! - Hit-testable on-screen controls for mouse play

pub mod bell;
pub mod fb;
pub mod game_view;
pub mod renderer;

pub use blockfall_core as core;
pub use blockfall_engine as engine;
pub use blockfall_types as types;

pub use bell::TerminalBell;
pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{control_enabled, palette_color, GameView, HudInfo, Viewport, CONTROLS, PALETTE};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
