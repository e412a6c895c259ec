//! Move application.

use crate::{Board, Cell, Player, Position};
use tracing::{debug, instrument};

/// Error that can occur when applying a move to a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum MoveError {
    /// The cell at the position is already occupied.
    #[display("Cell {} is already occupied", _0)]
    CellOccupied(Position),
}

impl std::error::Error for MoveError {}

/// Places `player`'s mark at `position`, returning the new board.
///
/// The input board is never modified; on error the caller still holds
/// the unchanged original.
#[instrument]
pub fn apply_move(board: &Board, position: Position, player: Player) -> Result<Board, MoveError> {
    if !board.is_empty(position) {
        debug!(%position, "Rejecting move onto occupied cell");
        return Err(MoveError::CellOccupied(position));
    }

    let mut next = *board;
    next.set(position, Cell::Occupied(player));
    Ok(next)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_move_marks_cell() {
        let board = Board::new();
        let next = apply_move(&board, Position::Center, Player::X).expect("empty cell");
        assert_eq!(next.get(Position::Center), Cell::Occupied(Player::X));
        assert_eq!(board, Board::new());
    }

    #[test]
    fn test_occupied_cell_rejected_without_change() {
        let board = apply_move(&Board::new(), Position::TopLeft, Player::X).expect("empty cell");
        let before = board;
        let result = apply_move(&board, Position::TopLeft, Player::O);
        assert_eq!(result, Err(MoveError::CellOccupied(Position::TopLeft)));
        assert_eq!(board, before);
    }

    #[test]
    fn test_error_message_names_cell() {
        let err = MoveError::CellOccupied(Position::Center);
        assert_eq!(err.to_string(), "Cell Center is already occupied");
    }
}
