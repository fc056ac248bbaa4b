//! Outcome evaluation over a board snapshot.
//!
//! These functions are pure; they look only at the 9 cells they are given.

use crate::board::Board;
use crate::symbol::Symbol;

/// The 8 winning lines: 3 rows, 3 columns, 2 diagonals.
pub const LINES: [[usize; 3]; 8] = [
    // Rows
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    // Columns
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    // Diagonals
    [0, 4, 8],
    [2, 4, 6],
];

/// Terminal result of a session.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Outcome {
    Win(Symbol),
    Tie,
}

/// Symbol of the first uniform, non-empty line, if any.
pub fn check_win(board: &Board) -> Option<Symbol> {
    let cells = board.cells();
    LINES.iter().find_map(|&[a, b, c]| match cells[a] {
        Some(symbol) if cells[b] == Some(symbol) && cells[c] == Some(symbol) => Some(symbol),
        _ => None,
    })
}

/// `true` iff every cell is occupied.
///
/// Does not look at lines: a full board can also be a winning board, so
/// callers check [`check_win`] first.
pub fn is_tie(board: &Board) -> bool {
    board.is_full()
}

/// Win takes precedence over a full board.
pub fn evaluate(board: &Board) -> Option<Outcome> {
    if let Some(winner) = check_win(board) {
        Some(Outcome::Win(winner))
    } else if is_tie(board) {
        Some(Outcome::Tie)
    } else {
        None
    }
}
