use crate::pieces::{Piece, ShapeMatrix};
use crate::types::PieceKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActiveSnapshot {
    pub kind: PieceKind,
    pub shape: ShapeMatrix,
    pub x: i8,
    pub y: i8,
}

impl From<Piece> for ActiveSnapshot {
    fn from(value: Piece) -> Self {
        Self {
            kind: value.kind,
            shape: value.shape,
            x: value.x,
            y: value.y,
        }
    }
}

/// Read-only view of a game for renderers and observers.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GameSnapshot {
    pub board_width: u8,
    pub board_height: u8,
    /// Row-major color indices, 0 = empty.
    pub board: Vec<u8>,
    pub active: Option<ActiveSnapshot>,
    pub ghost_y: Option<i8>,
    pub next: Option<PieceKind>,
    pub hold: Option<PieceKind>,
    pub can_hold: bool,
    pub started: bool,
    pub paused: bool,
    pub game_over: bool,
    pub soft_dropping: bool,
    pub episode_id: u32,
    pub seed: u64,
    pub piece_id: u32,
    pub score: u32,
    pub level: u32,
    pub lines: u32,
    pub drop_interval_ms: u32,
}

impl GameSnapshot {
    pub fn clear(&mut self) {
        self.board_width = 0;
        self.board_height = 0;
        self.board.clear();
        self.active = None;
        self.ghost_y = None;
        self.next = None;
        self.hold = None;
        self.can_hold = true;
        self.started = false;
        self.paused = false;
        self.game_over = false;
        self.soft_dropping = false;
        self.episode_id = 0;
        self.seed = 0;
        self.piece_id = 0;
        self.score = 0;
        self.level = 0;
        self.lines = 0;
        self.drop_interval_ms = 0;
    }

    /// Color index at (x, y); 0 when empty or out of range.
    pub fn cell(&self, x: usize, y: usize) -> u8 {
        if x >= self.board_width as usize || y >= self.board_height as usize {
            return 0;
        }
        self.board
            .get(y * self.board_width as usize + x)
            .copied()
            .unwrap_or(0)
    }

    pub fn playable(&self) -> bool {
        self.started && !self.game_over && !self.paused
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            board_width: 0,
            board_height: 0,
            board: Vec::new(),
            active: None,
            ghost_y: None,
            next: None,
            hold: None,
            can_hold: true,
            started: false,
            paused: false,
            game_over: false,
            soft_dropping: false,
            episode_id: 0,
            seed: 0,
            piece_id: 0,
            score: 0,
            level: 0,
            lines: 0,
            drop_interval_ms: 0,
        }
    }
}
