//! The 3×3 board owned by a session.
//!
//! Cells are indexed `0..=8` row-major:
//!
//! ```text
//!  0 | 1 | 2
//! ---+---+---
//!  3 | 4 | 5
//! ---+---+---
//!  6 | 7 | 8
//! ```
//!
//! Cells are set-once: [`Board::place`] refuses to overwrite an occupied
//! cell, and there is no API to clear one.

use crate::symbol::Symbol;

/// Number of cells on the board.
pub const BOARD_CELLS: usize = 9;

/// A single cell: `None` when empty.
pub type Cell = Option<Symbol>;

/// Fixed-size board snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Board {
    cells: [Cell; BOARD_CELLS],
}

impl Board {
    /// An empty board.
    pub fn new() -> Self {
        Board::default()
    }

    /// Build a board from raw cells (tests, decoding).
    pub fn from_cells(cells: [Cell; BOARD_CELLS]) -> Self {
        Board { cells }
    }

    /// Contents of `index`, or `None` if the index is out of range.
    pub fn get(&self, index: usize) -> Option<Cell> {
        self.cells.get(index).copied()
    }

    /// `true` if `index` is on the board and still empty.
    pub fn is_open(&self, index: usize) -> bool {
        matches!(self.get(index), Some(None))
    }

    /// Write `symbol` into an open cell.
    ///
    /// Returns `false` (and leaves the board untouched) if the index is out
    /// of range or the cell is already taken.
    pub fn place(&mut self, index: usize, symbol: Symbol) -> bool {
        if !self.is_open(index) {
            return false;
        }
        self.cells[index] = Some(symbol);
        true
    }

    /// All cells, in index order.
    pub fn cells(&self) -> &[Cell; BOARD_CELLS] {
        &self.cells
    }

    /// `true` once no cell is empty.
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(Option::is_some)
    }

    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }
}
