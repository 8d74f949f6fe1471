//! Board module - manages the game grid
//!
//! The board is a `width x height` grid where each cell can be empty or filled with a piece kind.
//! Uses a flat row-major vector; the dimensions are fixed at construction.
//! Coordinates: (x, y) where x grows left to right and y grows top to bottom.

use crate::types::{Cell, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

/// The game board using flat storage
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    width: u8,
    height: u8,
    /// Flat array of cells, row-major order (y * width + x)
    cells: Vec<Cell>,
}

impl Board {
    /// Create a new empty board with the default 10x20 dimensions
    pub fn new() -> Self {
        Self::with_size(BOARD_WIDTH, BOARD_HEIGHT)
    }

    /// Create a new empty board with the given dimensions
    pub fn with_size(width: u8, height: u8) -> Self {
        Self {
            width,
            height,
            cells: vec![None; width as usize * height as usize],
        }
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(&self, x: i8, y: i8) -> Option<usize> {
        if x < 0 || x as i16 >= self.width as i16 || y < 0 || y as i16 >= self.height as i16 {
            return None;
        }
        Some((y as usize) * (self.width as usize) + (x as usize))
    }

    pub fn width(&self) -> u8 {
        self.width
    }

    pub fn height(&self) -> u8 {
        self.height
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        self.index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        match self.index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Check if position is occupied (within bounds and filled)
    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(Some(_)))
    }

    /// Check whether a single piece cell at (x, y) would collide.
    ///
    /// Columns outside `[0, width)` and rows at or below `height` block.
    /// Rows above the board (`y < 0`) never block.
    pub fn blocks(&self, x: i8, y: i8) -> bool {
        if x < 0 || x as i16 >= self.width as i16 || y as i16 >= self.height as i16 {
            return true;
        }
        if y < 0 {
            return false;
        }
        self.is_occupied(x, y)
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        if y >= self.height as usize {
            return false;
        }
        let width = self.width as usize;
        let start = y * width;
        self.cells[start..start + width].iter().all(|cell| cell.is_some())
    }

    /// Remove row `y`, shift every row above it down by one and empty the top row.
    pub fn clear_row(&mut self, y: usize) {
        if y >= self.height as usize {
            return;
        }
        let width = self.width as usize;

        // copy_within handles overlapping ranges safely
        self.cells.copy_within(0..y * width, width);
        self.cells[..width].fill(None);
    }

    /// Sweep full rows bottom to top and return how many were removed.
    ///
    /// After a removal the same row index is examined again, since the row
    /// above has slid into it.
    pub fn sweep_full_rows(&mut self) -> u32 {
        let mut cleared = 0;
        let mut y = self.height as usize;
        while y > 0 {
            if self.is_row_full(y - 1) {
                self.clear_row(y - 1);
                cleared += 1;
            } else {
                y -= 1;
            }
        }
        cleared
    }

    /// Write the cells of `minos` (offsets relative to (x, y)) with `kind`.
    ///
    /// Cells that fall outside the board are skipped; the merge never fails.
    /// Returns the number of cells written.
    pub fn merge_cells(
        &mut self,
        minos: impl IntoIterator<Item = (i8, i8)>,
        x: i8,
        y: i8,
        kind: PieceKind,
    ) -> usize {
        let mut written = 0;
        for (dx, dy) in minos {
            if self.set(x + dx, y + dy, Some(kind)) {
                written += 1;
            }
        }
        written
    }

    /// Number of filled cells
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Export the board as color indices (0 = empty), row-major.
    pub fn write_color_indices(&self, out: &mut Vec<u8>) {
        out.clear();
        out.extend(
            self.cells
                .iter()
                .map(|c| c.map(|k| k.color_index()).unwrap_or(0)),
        );
    }

    /// Fill a whole row with `kind`, leaving the listed columns empty.
    pub fn fill_row_except(&mut self, y: i8, kind: PieceKind, holes: &[i8]) {
        for x in 0..self.width as i8 {
            let cell = if holes.contains(&x) { None } else { Some(kind) };
            self.set(x, y, cell);
        }
    }

    /// Clear the entire board
    pub fn clear(&mut self) {
        self.cells.fill(None);
    }

    /// Convert to 2D vector for testing/display
    #[cfg(test)]
    pub fn to_rows(&self) -> Vec<Vec<Cell>> {
        self.cells
            .chunks(self.width as usize)
            .map(|row| row.to_vec())
            .collect()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_board_index_calculation() {
        let board = Board::new();
        assert_eq!(board.index(0, 0), Some(0));
        assert_eq!(board.index(9, 0), Some(9));
        assert_eq!(board.index(0, 1), Some(10));
        assert_eq!(board.index(9, 19), Some(199));
        assert_eq!(board.index(-1, 0), None);
        assert_eq!(board.index(10, 0), None);
        assert_eq!(board.index(0, 20), None);
    }

    #[test]
    fn test_wide_board_index() {
        let board = Board::with_size(12, 20);
        assert_eq!(board.index(11, 0), Some(11));
        assert_eq!(board.index(0, 1), Some(12));
        assert_eq!(board.index(12, 0), None);
    }

    #[test]
    fn test_clear_row_shifts_rows_above() {
        let mut board = Board::new();
        board.set(2, 17, Some(PieceKind::T));
        board.fill_row_except(18, PieceKind::I, &[]);
        board.set(5, 19, Some(PieceKind::O));

        board.clear_row(18);

        let rows = board.to_rows();
        assert_eq!(rows[18][2], Some(PieceKind::T));
        assert_eq!(rows[19][5], Some(PieceKind::O));
        assert!(rows[0].iter().all(|c| c.is_none()));
        assert_eq!(board.occupied_count(), 2);
    }

    #[test]
    fn test_sweep_rechecks_same_index() {
        let mut board = Board::new();
        // Two adjacent full rows: after removing 19, row 18 slides into 19 and
        // must be removed as well.
        board.fill_row_except(18, PieceKind::J, &[]);
        board.fill_row_except(19, PieceKind::L, &[]);
        board.set(4, 17, Some(PieceKind::S));

        assert_eq!(board.sweep_full_rows(), 2);
        assert_eq!(board.get(4, 19), Some(Some(PieceKind::S)));
        assert_eq!(board.occupied_count(), 1);
    }

    #[test]
    fn test_blocks_treats_rows_above_board_as_free() {
        let board = Board::new();
        assert!(!board.blocks(3, -2));
        assert!(board.blocks(-1, -2));
        assert!(board.blocks(3, 20));
    }
}
