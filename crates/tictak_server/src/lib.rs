//! tictak server library - chat-driven tic-tac-toe sessions
//!
//! Each conversation owns at most one game. Events from a transport
//! (start a game, press a cell) go through the [`SessionRegistry`],
//! which serializes work per conversation and deletes a session in the
//! same step that reports its win or draw.
//!
//! # Architecture
//!
//! - **Registry**: per-conversation sessions with per-conversation locking
//! - **Render**: button grid and status line for a board
//! - **Dispatch**: chat commands and button presses to registry events
//! - **Transports**: HTTP (axum) and an interactive console
//!
//! # Example
//!
//! ```
//! use tictak_server::{MoveOutcome, SessionRegistry};
//!
//! let registry = SessionRegistry::new();
//! registry.start_game("chat-1")?;
//! let outcome = registry.apply_move("chat-1", 4)?;
//! assert!(matches!(outcome, MoveOutcome::Continue { .. }));
//! # Ok::<(), tictak_server::SessionError>(())
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod config;
pub mod console;
mod dispatch;
mod error;
pub mod http;
mod registry;
pub mod render;
mod session;

// Crate-level exports - Configuration
pub use config::{Config, HOST_VAR, LOG_VAR, PORT_VAR};

// Crate-level exports - Errors
pub use error::{ConfigError, SessionError};

// Crate-level exports - Session management
pub use registry::SessionRegistry;
pub use session::{Action, BoardView, Event, EventOutcome, MoveOutcome, Session, SessionId};

// Crate-level exports - Chat dispatch
pub use dispatch::{
    ALREADY_IN_PROGRESS_TEXT, CELL_TAKEN_NOTICE, Command, Dispatcher, HELP_TEXT,
    INVALID_MOVE_NOTICE, NO_GAME_NOTICE, Reply, WELCOME_TEXT, parse_callback,
};

// Crate-level exports - Board types
pub use tictak_board::{Board, Cell, Player, Position};
