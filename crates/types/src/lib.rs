//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (simulation, terminal rendering, persistence).
//!
//! # Board Dimensions
//!
//! Default playfield dimensions (configurable per game):
//!
//! - **Width**: 10 columns (indexed 0-9), 12 is also common
//! - **Height**: 20 rows (indexed 0-19)
//! - **Spawn column**: `floor(width / 2) - floor(piece_width / 2)`, row 0
//!
//! # Game Timing Constants
//!
//! Timing values are in milliseconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Fixed frame interval (~60 FPS) |
//! | `BASE_DROP_MS` | 1000 | Gravity interval at level 1 |
//! | `SOFT_DROP_INTERVAL_MS` | 50 | Gravity interval while soft drop is held |
//! | `SOFT_DROP_RELEASE_MS` | 150 | Soft drop auto-release for terminals without key release |
//!
//! # Level Progression
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `LEVEL_UP_SCORE` | 1000 | Score step per level |
//! | `DROP_INTERVAL_STEP_MS` | 50 | Interval decrease per level |
//! | `MIN_DROP_INTERVAL_MS` | 100 | Interval floor |
//!
//! # Examples
//!
//! ```
//! use blockfall_types::{GameAction, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! // Color indices start at 1; 0 is the empty cell
//! assert_eq!(PieceKind::I.color_index(), 1);
//! assert_eq!(PieceKind::from_color_index(7), Some(PieceKind::L));
//!
//! assert!(GameAction::HardDrop.is_gated());
//! assert!(!GameAction::Restart.is_gated());
//!
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 20);
//! ```

/// Default board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Default board height in cells (20 rows)
pub const BOARD_HEIGHT: u8 = 20;

/// Smallest accepted board dimension.
pub const MIN_BOARD_DIM: u8 = 4;

/// Largest accepted board dimension.
pub const MAX_BOARD_DIM: u8 = 40;

/// Fixed frame interval in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Gravity interval at level 1 (1000ms = 1 second per row)
pub const BASE_DROP_MS: u32 = 1000;

/// Gravity interval while soft drop is held.
pub const SOFT_DROP_INTERVAL_MS: u32 = 50;

/// Soft drop state timeout for terminals that never report key releases.
pub const SOFT_DROP_RELEASE_MS: u32 = 150;

/// Score step per level.
pub const LEVEL_UP_SCORE: u32 = 1000;

/// Gravity interval decrease applied on each level up.
pub const DROP_INTERVAL_STEP_MS: u32 = 50;

/// Gravity interval floor.
pub const MIN_DROP_INTERVAL_MS: u32 = 100;

/// Tiered line clear table, indexed by rows cleared in one sweep.
///
/// - 0 lines: 0 points
/// - 1 line: 100 points
/// - 2 lines: 300 points
/// - 3 lines: 500 points
/// - 4 lines: 800 points
pub const LINE_SCORES: [u32; 5] = [0, 100, 300, 500, 800];

/// Points per cleared line for the flat table.
pub const FLAT_LINE_SCORE: u32 = 10;

/// Number of piece kinds.
pub const PIECE_KIND_COUNT: usize = 7;

/// The seven tetromino piece kinds
///
/// The declaration order is also the color index order (I = 1 .. L = 7).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl PieceKind {
    /// All kinds in color index order.
    pub const ALL: [PieceKind; PIECE_KIND_COUNT] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];

    /// Value written into board cells when this kind locks (1..=7).
    pub fn color_index(&self) -> u8 {
        match self {
            PieceKind::I => 1,
            PieceKind::O => 2,
            PieceKind::T => 3,
            PieceKind::S => 4,
            PieceKind::Z => 5,
            PieceKind::J => 6,
            PieceKind::L => 7,
        }
    }

    /// Inverse of [`PieceKind::color_index`]. Returns `None` for 0 and unknown values.
    pub fn from_color_index(v: u8) -> Option<Self> {
        match v {
            1..=7 => Some(Self::ALL[(v - 1) as usize]),
            _ => None,
        }
    }
}

/// Commands that can be applied to a game session
///
/// Keyboard keys and clicks on on-screen controls decode into the same set;
/// nothing downstream knows which source produced a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameAction {
    /// Move piece one column left
    MoveLeft,
    /// Move piece one column right
    MoveRight,
    /// Rotate piece 90° clockwise (with offset wall kicks)
    Rotate,
    /// One immediate gravity step
    SoftDrop,
    /// Use the fast gravity interval until stopped
    SoftDropStart,
    /// Return to the normal gravity interval
    SoftDropStop,
    /// Drop to the lowest free row and lock
    HardDrop,
    /// Store or swap the current piece (once per piece)
    Hold,
    /// Toggle pause state
    Pause,
    /// Reinitialize the whole session
    Restart,
    /// Mute or unmute sound cues
    ToggleSound,
}

impl GameAction {
    /// Whether this action is ignored while paused or after game over.
    pub fn is_gated(&self) -> bool {
        !matches!(
            self,
            GameAction::Pause
                | GameAction::Restart
                | GameAction::ToggleSound
                | GameAction::SoftDropStop
        )
    }
}

/// Short sound cues played by the audio collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundCue {
    Rotate,
    Lock,
    LineClear,
    Hold,
    GameOver,
}

impl SoundCue {
    /// Stable cue name (matches the asset names of the web build).
    pub fn as_str(&self) -> &'static str {
        match self {
            SoundCue::Rotate => "rotate",
            SoundCue::Lock => "drop",
            SoundCue::LineClear => "line",
            SoundCue::Hold => "save",
            SoundCue::GameOver => "gameover",
        }
    }
}

/// Simulation event recorded by the game state and drained by its owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// A rotation (possibly kicked) was applied.
    Rotated,
    /// A piece was merged into the board.
    Locked {
        lines_cleared: u32,
        points: u32,
    },
    /// The current piece went to (or was swapped with) the hold slot.
    Held,
    LevelUp {
        level: u32,
        drop_interval_ms: u32,
    },
    Paused,
    Resumed,
    /// A freshly spawned piece collided with the board.
    GameOver {
        score: u32,
    },
    Restarted,
}

impl GameEvent {
    /// Sound cue for this event, if any.
    pub fn sound_cue(&self) -> Option<SoundCue> {
        match self {
            GameEvent::Rotated => Some(SoundCue::Rotate),
            GameEvent::Locked { lines_cleared, .. } if *lines_cleared > 0 => {
                Some(SoundCue::LineClear)
            }
            GameEvent::Locked { .. } => Some(SoundCue::Lock),
            GameEvent::Held => Some(SoundCue::Hold),
            GameEvent::GameOver { .. } => Some(SoundCue::GameOver),
            GameEvent::LevelUp { .. }
            | GameEvent::Paused
            | GameEvent::Resumed
            | GameEvent::Restarted => None,
        }
    }
}

/// A cell on the game board
///
/// - `None`: Empty cell
/// - `Some(PieceKind)`: Cell filled with the specified piece kind
pub type Cell = Option<PieceKind>;

/// A clickable on-screen control, in terminal coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlRegion {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub action: GameAction,
}

impl ControlRegion {
    pub fn contains(&self, column: u16, row: u16) -> bool {
        row == self.y && column >= self.x && column < self.x.saturating_add(self.width)
    }
}
