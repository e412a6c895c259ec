//! Win detection logic for tic-tac-toe.

use crate::{Board, Cell, Player, Position};
use tracing::instrument;

/// The eight winning lines, in the order they are checked.
pub const LINES: [[Position; 3]; 8] = [
    // Rows
    [Position::TopLeft, Position::TopCenter, Position::TopRight],
    [
        Position::MiddleLeft,
        Position::Center,
        Position::MiddleRight,
    ],
    [
        Position::BottomLeft,
        Position::BottomCenter,
        Position::BottomRight,
    ],
    // Columns
    [
        Position::TopLeft,
        Position::MiddleLeft,
        Position::BottomLeft,
    ],
    [
        Position::TopCenter,
        Position::Center,
        Position::BottomCenter,
    ],
    [
        Position::TopRight,
        Position::MiddleRight,
        Position::BottomRight,
    ],
    // Diagonals
    [Position::TopLeft, Position::Center, Position::BottomRight],
    [Position::TopRight, Position::Center, Position::BottomLeft],
];

/// Returns the player owning all three cells of `line`, if any.
fn line_owner(board: &Board, [a, b, c]: [Position; 3]) -> Option<Player> {
    let cell = board.get(a);
    if cell != Cell::Empty && cell == board.get(b) && cell == board.get(c) {
        cell.player()
    } else {
        None
    }
}

/// Checks if there is a winner on the board.
///
/// Returns `Some(player)` for the first line in [`LINES`] that one
/// player fully occupies, `None` otherwise.
#[instrument]
pub fn winner(board: &Board) -> Option<Player> {
    LINES.into_iter().find_map(|line| line_owner(board, line))
}

/// Checks only the lines passing through `last`.
///
/// When a win check follows every single move, any new line can only
/// pass through the cell just played, so this agrees with [`winner`].
#[instrument]
pub fn winner_through(board: &Board, last: Position) -> Option<Player> {
    LINES
        .into_iter()
        .filter(|line| line.contains(&last))
        .find_map(|line| line_owner(board, line))
}
