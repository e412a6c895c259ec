//! Per-conversation game state and the values handed to transports.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use tictak_board::{Board, MoveError, Player, Position, apply_move, is_draw, winner_through};
use tracing::{debug, instrument};

/// Opaque identifier of the conversation a session belongs to.
pub type SessionId = String;

/// One conversation's in-progress game.
///
/// Only the registry creates and mutates sessions. A session never
/// outlives its game: once a move ends it, the registry drops it.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct Session {
    /// Conversation identifier.
    id: SessionId,
    /// Current board.
    board: Board,
    /// Player expected to move next.
    current_player: Player,
}

impl Session {
    /// Fresh game: empty board, X to move.
    pub(crate) fn new(id: SessionId) -> Self {
        Self {
            id,
            board: Board::new(),
            current_player: Player::X,
        }
    }

    /// Snapshot for rendering.
    pub fn view(&self) -> BoardView {
        BoardView::new(self.board, self.current_player)
    }

    /// Plays `position` for the current player.
    ///
    /// All-or-nothing: on error the session is untouched. A terminal
    /// outcome leaves the session in its final state; discarding it is
    /// the caller's job.
    #[instrument(skip(self), fields(session_id = %self.id, player = %self.current_player))]
    pub(crate) fn play(&mut self, position: Position) -> Result<MoveOutcome, MoveError> {
        let player = self.current_player;
        let board = apply_move(&self.board, position, player)?;
        self.board = board;

        if let Some(winner) = winner_through(&board, position) {
            return Ok(MoveOutcome::Win {
                board,
                player: winner,
            });
        }

        if is_draw(&board) {
            return Ok(MoveOutcome::Draw { board });
        }

        self.current_player = player.opponent();
        debug!(next_player = %self.current_player, "Turn passed");
        Ok(MoveOutcome::Continue {
            board,
            next_player: self.current_player,
        })
    }
}

/// Board plus the player to move, as shown to users.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Getters, derive_new::new,
)]
pub struct BoardView {
    /// Board snapshot.
    board: Board,
    /// Player to move.
    current_player: Player,
}

/// Result of a legal move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum MoveOutcome {
    /// Game goes on with `next_player` to move.
    Continue {
        /// Board after the move.
        board: Board,
        /// Player to move next.
        next_player: Player,
    },
    /// `player` completed a line. The session is gone.
    Win {
        /// Final board.
        board: Board,
        /// Winning player.
        player: Player,
    },
    /// Board filled without a line. The session is gone.
    Draw {
        /// Final board.
        board: Board,
    },
}

impl MoveOutcome {
    /// Board after the move.
    pub fn board(&self) -> &Board {
        match self {
            MoveOutcome::Continue { board, .. }
            | MoveOutcome::Win { board, .. }
            | MoveOutcome::Draw { board } => board,
        }
    }

    /// True for `Win` and `Draw`.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, MoveOutcome::Continue { .. })
    }
}

/// What a user asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    /// Begin a new game.
    StartGame,
    /// Mark the cell at this index (0-8).
    Move(usize),
}

/// Inbound event from a transport.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters, derive_new::new)]
pub struct Event {
    /// Conversation the event belongs to.
    session_id: SessionId,
    /// Requested action.
    action: Action,
}

/// Result of handling an [`Event`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum EventOutcome {
    /// A new game started.
    Started(BoardView),
    /// A move was applied.
    Moved(MoveOutcome),
}
