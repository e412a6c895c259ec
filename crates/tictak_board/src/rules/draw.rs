//! Draw detection logic for tic-tac-toe.

use super::win::winner;
use crate::{Board, Cell};
use tracing::instrument;

/// Checks if the board is full (all cells occupied).
#[instrument]
pub fn is_full(board: &Board) -> bool {
    board.cells().iter().all(|c| *c != Cell::Empty)
}

/// A full board with no winner is a draw.
///
/// The win check runs first: a full board containing a line is a win.
#[instrument]
pub fn is_draw(board: &Board) -> bool {
    winner(board).is_none() && is_full(board)
}
