//! Turns board snapshots into a button grid and a status line.

use crate::session::{BoardView, MoveOutcome};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use tictak_board::{Board, Cell, Player};

/// Header shown above the board while a game runs.
pub const TITLE: &str = "Tic Tac Toe";

/// One pressable cell. `data` is the 0-based cell index sent back on press.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters, derive_new::new)]
pub struct Button {
    /// Text on the button.
    label: String,
    /// Callback payload.
    data: String,
}

/// Three rows of three buttons.
pub type Keyboard = Vec<Vec<Button>>;

/// A board ready to be sent to a chat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct RenderedBoard {
    /// Status text shown with the grid.
    status: String,
    /// Button grid.
    keyboard: Keyboard,
}

impl RenderedBoard {
    /// Plain-text form: status followed by the grid rows.
    pub fn to_text(&self) -> String {
        let rows: Vec<String> = self
            .keyboard
            .iter()
            .map(|row| {
                row.iter()
                    .map(|b| format!("[{}]", b.label))
                    .collect::<String>()
            })
            .collect();
        format!("{}\n{}", self.status, rows.join("\n"))
    }
}

/// Occupied cells show their mark, empty cells their 1-based number.
pub fn keyboard(board: &Board) -> Keyboard {
    board
        .cells()
        .chunks(3)
        .enumerate()
        .map(|(row, cells)| {
            cells
                .iter()
                .enumerate()
                .map(|(col, cell)| {
                    let index = row * 3 + col;
                    let label = match cell {
                        Cell::Empty => (index + 1).to_string(),
                        Cell::Occupied(player) => player.to_string(),
                    };
                    Button::new(label, index.to_string())
                })
                .collect()
        })
        .collect()
}

/// Status while a game is running.
pub fn turn_status(player: Player) -> String {
    format!("{TITLE}\nCurrent Player: {player}")
}

/// Announcement of a win.
pub fn win_status(player: Player) -> String {
    format!("Player {player} wins!")
}

/// Announcement of a draw.
pub const TIE_STATUS: &str = "It's a tie!";

/// Renders a freshly started or fetched game.
pub fn render_view(view: &BoardView) -> RenderedBoard {
    RenderedBoard {
        status: turn_status(*view.current_player()),
        keyboard: keyboard(view.board()),
    }
}

/// Renders the board after a move.
pub fn render_outcome(outcome: &MoveOutcome) -> RenderedBoard {
    let status = match outcome {
        MoveOutcome::Continue { next_player, .. } => turn_status(*next_player),
        MoveOutcome::Win { player, .. } => win_status(*player),
        MoveOutcome::Draw { .. } => TIE_STATUS.to_string(),
    };
    RenderedBoard {
        status,
        keyboard: keyboard(outcome.board()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tictak_board::{Position, apply_move};

    #[test]
    fn test_empty_board_labels() {
        let view = BoardView::new(Board::new(), Player::X);
        let rendered = render_view(&view);
        assert_eq!(rendered.status(), "Tic Tac Toe\nCurrent Player: X");
        let labels: Vec<&str> = rendered
            .keyboard()
            .iter()
            .flatten()
            .map(|b| b.label().as_str())
            .collect();
        assert_eq!(labels, ["1", "2", "3", "4", "5", "6", "7", "8", "9"]);
    }

    #[test]
    fn test_marks_and_callback_data() {
        let board = apply_move(&Board::new(), Position::MiddleRight, Player::O).expect("empty");
        let keys = keyboard(&board);
        assert_eq!(keys.len(), 3);
        assert_eq!(keys[1][2], Button::new("O".to_string(), "5".to_string()));
        assert_eq!(keys[2][0], Button::new("7".to_string(), "6".to_string()));
    }

    #[test]
    fn test_terminal_statuses() {
        let board = Board::new();
        let win = render_outcome(&MoveOutcome::Win {
            board,
            player: Player::O,
        });
        assert_eq!(win.status(), "Player O wins!");
        let draw = render_outcome(&MoveOutcome::Draw { board });
        assert_eq!(draw.status(), "It's a tie!");
    }

    #[test]
    fn test_to_text() {
        let rendered = render_view(&BoardView::new(Board::new(), Player::O));
        assert_eq!(
            rendered.to_text(),
            "Tic Tac Toe\nCurrent Player: O\n[1][2][3]\n[4][5][6]\n[7][8][9]"
        );
    }
}
