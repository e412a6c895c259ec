//! Chat command and button dispatch.
//!
//! Translates what a chat user sends (`/newgame`, a pressed cell) into
//! registry events, and registry results into chat replies.

use crate::error::SessionError;
use crate::registry::SessionRegistry;
use crate::render::{RenderedBoard, render_outcome, render_view};
use crate::session::{Action, Event, EventOutcome};
use serde::Serialize;
use tracing::{debug, instrument};

/// Greeting for `/start`.
pub const WELCOME_TEXT: &str = "Welcome to Tic Tac Toe Bot!\n\n\
    Use /newgame to start a new game.\n\
    Commands:\n\
    /newgame - Start a new game\n\
    /help - Show help message";

/// Reply to `/help`.
pub const HELP_TEXT: &str = "Tic Tac Toe Bot Commands:\n\n\
    /newgame - Start a new game\n\
    /help - Show this help message";

/// Reply when `/newgame` arrives during a game.
pub const ALREADY_IN_PROGRESS_TEXT: &str =
    "A game is already in progress! Finish it before starting a new one.";

/// Notice for a press with no game running.
pub const NO_GAME_NOTICE: &str = "No game in progress. Start a new game with /newgame.";

/// Notice for a press on a taken cell.
pub const CELL_TAKEN_NOTICE: &str = "This cell is already taken!";

/// Notice for a press that names no cell.
pub const INVALID_MOVE_NOTICE: &str = "Invalid move.";

/// Bot commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// `/start`
    Start,
    /// `/help`
    Help,
    /// `/newgame`
    NewGame,
}

impl Command {
    /// Parses a message such as `/newgame` or `/newgame@bot_name extra`.
    ///
    /// Returns `None` for plain text, unknown commands and commands
    /// addressed to a different bot.
    pub fn parse(text: &str, bot_name: &str) -> Option<Self> {
        let word = text.split_whitespace().next()?;
        let word = word.strip_prefix('/')?;
        let name = match word.split_once('@') {
            Some((name, target)) if target.eq_ignore_ascii_case(bot_name) => name,
            Some(_) => return None,
            None => word,
        };
        match name {
            "start" => Some(Command::Start),
            "help" => Some(Command::Help),
            "newgame" => Some(Command::NewGame),
            _ => None,
        }
    }
}

/// Parses button callback data. Only all-digit payloads are moves.
///
/// Digit strings too large for `usize` map to `usize::MAX`, which the
/// registry rejects as an invalid index.
pub fn parse_callback(data: &str) -> Option<usize> {
    if data.is_empty() || !data.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some(data.parse().unwrap_or(usize::MAX))
}

/// What to send back to the chat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Reply {
    /// A plain message.
    Text {
        /// Message body.
        text: String,
    },
    /// A board message with its button grid.
    Board(RenderedBoard),
    /// A short acknowledgement of a button press.
    Notice {
        /// Notice body.
        text: String,
    },
    /// Nothing to send.
    Ignored,
}

impl Reply {
    fn text(text: impl Into<String>) -> Self {
        Reply::Text { text: text.into() }
    }

    fn notice(text: impl Into<String>) -> Self {
        Reply::Notice { text: text.into() }
    }
}

/// Routes chat input to the registry.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    registry: SessionRegistry,
    bot_name: String,
}

impl Dispatcher {
    /// Creates a dispatcher answering to `bot_name`.
    pub fn new(registry: SessionRegistry, bot_name: impl Into<String>) -> Self {
        Self {
            registry,
            bot_name: bot_name.into(),
        }
    }

    /// The registry behind this dispatcher.
    pub fn registry(&self) -> &SessionRegistry {
        &self.registry
    }

    /// Handles a text message in `chat_id`.
    #[instrument(skip(self))]
    pub fn handle_message(&self, chat_id: &str, text: &str) -> Reply {
        match Command::parse(text, &self.bot_name) {
            Some(Command::Start) => Reply::text(WELCOME_TEXT),
            Some(Command::Help) => Reply::text(HELP_TEXT),
            Some(Command::NewGame) => {
                self.dispatch(Event::new(chat_id.to_string(), Action::StartGame))
            }
            None => {
                debug!("Ignoring message");
                Reply::Ignored
            }
        }
    }

    /// Handles a button press in `chat_id`.
    #[instrument(skip(self))]
    pub fn handle_callback(&self, chat_id: &str, data: &str) -> Reply {
        match parse_callback(data) {
            Some(index) => self.dispatch(Event::new(chat_id.to_string(), Action::Move(index))),
            None => {
                debug!("Ignoring callback");
                Reply::Ignored
            }
        }
    }

    fn dispatch(&self, event: Event) -> Reply {
        match self.registry.handle(&event) {
            Ok(EventOutcome::Started(view)) => Reply::Board(render_view(&view)),
            Ok(EventOutcome::Moved(outcome)) => Reply::Board(render_outcome(&outcome)),
            Err(SessionError::AlreadyInProgress(_)) => Reply::text(ALREADY_IN_PROGRESS_TEXT),
            Err(SessionError::NoActiveGame(_)) => Reply::notice(NO_GAME_NOTICE),
            Err(SessionError::CellOccupied(_)) => Reply::notice(CELL_TAKEN_NOTICE),
            Err(SessionError::InvalidIndex(_)) => Reply::notice(INVALID_MOVE_NOTICE),
        }
    }
}
