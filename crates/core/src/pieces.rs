//! Pieces module - tetromino shape matrices, rotation and offset wall kicks
//!
//! A shape is a small rectangular matrix (at most 4x4) of 0/nonzero cells.
//! Rotation is a transpose followed by a row reversal (90° clockwise).
//! There are no rotation tables: a rotated piece that collides is nudged
//! sideways by alternating offsets until it fits, or the rotation is undone.

use crate::types::PieceKind;

/// Largest side of any shape matrix.
pub const MAX_SHAPE_DIM: usize = 4;

/// Rectangular shape matrix. Cells outside `width x height` are always zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShapeMatrix {
    width: u8,
    height: u8,
    cells: [[u8; MAX_SHAPE_DIM]; MAX_SHAPE_DIM],
}

impl ShapeMatrix {
    /// Build a matrix from rows. Panics on ragged or oversized input, which
    /// only the static shape table and tests construct.
    pub fn from_rows(rows: &[&[u8]]) -> Self {
        assert!(!rows.is_empty() && rows.len() <= MAX_SHAPE_DIM);
        let width = rows[0].len();
        assert!(width > 0 && width <= MAX_SHAPE_DIM);

        let mut cells = [[0u8; MAX_SHAPE_DIM]; MAX_SHAPE_DIM];
        for (y, row) in rows.iter().enumerate() {
            assert_eq!(row.len(), width, "ragged shape row {}", y);
            cells[y][..width].copy_from_slice(row);
        }

        Self {
            width: width as u8,
            height: rows.len() as u8,
            cells,
        }
    }

    pub fn width(&self) -> u8 {
        self.width
    }

    pub fn height(&self) -> u8 {
        self.height
    }

    /// Cell value at (x, y), 0 when outside the matrix.
    pub fn get(&self, x: usize, y: usize) -> u8 {
        if x >= self.width as usize || y >= self.height as usize {
            return 0;
        }
        self.cells[y][x]
    }

    /// Offsets of the nonzero cells, row by row.
    pub fn minos(&self) -> impl Iterator<Item = (i8, i8)> + '_ {
        (0..self.height as usize).flat_map(move |y| {
            (0..self.width as usize)
                .filter(move |&x| self.cells[y][x] != 0)
                .map(move |x| (x as i8, y as i8))
        })
    }

    pub fn mino_count(&self) -> usize {
        self.minos().count()
    }

    /// Rotate 90° clockwise: transpose, then reverse the rows.
    ///
    /// `new[r][c] = old[h - 1 - c][r]`; width and height swap.
    pub fn rotated_cw(&self) -> Self {
        let w = self.width as usize;
        let h = self.height as usize;
        let mut cells = [[0u8; MAX_SHAPE_DIM]; MAX_SHAPE_DIM];
        for (r, row) in cells.iter_mut().enumerate().take(w) {
            for (c, cell) in row.iter_mut().enumerate().take(h) {
                *cell = self.cells[h - 1 - c][r];
            }
        }
        Self {
            width: self.height,
            height: self.width,
            cells,
        }
    }
}

/// Canonical spawn shape of each kind, filled with the kind's color index.
pub fn spawn_shape(kind: PieceKind) -> ShapeMatrix {
    let v = kind.color_index();
    match kind {
        PieceKind::I => ShapeMatrix::from_rows(&[&[v, v, v, v]]),
        PieceKind::O => ShapeMatrix::from_rows(&[&[v, v], &[v, v]]),
        PieceKind::T => ShapeMatrix::from_rows(&[&[0, v, 0], &[v, v, v]]),
        PieceKind::S => ShapeMatrix::from_rows(&[&[0, v, v], &[v, v, 0]]),
        PieceKind::Z => ShapeMatrix::from_rows(&[&[v, v, 0], &[0, v, v]]),
        PieceKind::J => ShapeMatrix::from_rows(&[&[v, 0, 0], &[v, v, v]]),
        PieceKind::L => ShapeMatrix::from_rows(&[&[0, 0, v], &[v, v, v]]),
    }
}

/// Spawn column: `floor(cols / 2) - floor(width / 2)`.
pub fn spawn_x(board_width: u8, shape_width: u8) -> i8 {
    (board_width / 2) as i8 - (shape_width / 2) as i8
}

/// Falling piece: shape matrix plus the board position of its top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    pub shape: ShapeMatrix,
    pub x: i8,
    pub y: i8,
}

impl Piece {
    /// Canonical shape of `kind`, horizontally centered on row 0.
    pub fn spawn(kind: PieceKind, board_width: u8) -> Self {
        let shape = spawn_shape(kind);
        Self {
            kind,
            shape,
            x: spawn_x(board_width, shape.width()),
            y: 0,
        }
    }

    /// Absolute board coordinates of the occupied cells.
    pub fn cells(&self) -> impl Iterator<Item = (i8, i8)> + '_ {
        self.shape
            .minos()
            .map(move |(dx, dy)| (self.x + dx, self.y + dy))
    }

    pub fn shifted(&self, dx: i8, dy: i8) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }
}

/// Kick offsets tried after a colliding rotation: 1, -2, 3, -4, ...
///
/// Offsets are cumulative, so the tested columns are x+1, x-1, x+2, x-2, ...
/// Offsets with a magnitude above `shape_width` are not produced.
pub fn kick_offsets(shape_width: u8) -> impl Iterator<Item = i8> {
    (1..=shape_width as i8).map(|k| if k % 2 == 1 { k } else { -k })
}

/// Rotate `piece` clockwise, kicking sideways if needed.
///
/// Returns the rotated piece at the first non-colliding position, or `None`
/// when every kick collides (the caller keeps the original piece untouched).
pub fn try_rotate(piece: &Piece, collides: impl Fn(&Piece) -> bool) -> Option<Piece> {
    let mut candidate = Piece {
        shape: piece.shape.rotated_cw(),
        ..*piece
    };

    if !collides(&candidate) {
        return Some(candidate);
    }

    for offset in kick_offsets(candidate.shape.width()) {
        candidate.x += offset;
        if !collides(&candidate) {
            return Some(candidate);
        }
    }

    None
}
