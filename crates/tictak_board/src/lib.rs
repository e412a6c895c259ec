//! Tic-tac-toe board engine.
//!
//! Pure, deterministic operations over an explicit [`Board`] value:
//! placing a mark, detecting a winning line and detecting a draw.
//! Nothing in this crate holds state between calls.
//!
//! # Example
//!
//! ```
//! use tictak_board::{apply_move, is_draw, winner, Board, Player, Position};
//!
//! let board = apply_move(&Board::new(), Position::Center, Player::X)?;
//! assert_eq!(winner(&board), None);
//! assert!(!is_draw(&board));
//! # Ok::<(), tictak_board::MoveError>(())
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod moves;
mod position;
pub mod rules;
mod types;

pub use moves::{MoveError, apply_move};
pub use position::Position;
pub use rules::{LINES, is_draw, is_full, winner, winner_through};
pub use types::{Board, Cell, Player};
