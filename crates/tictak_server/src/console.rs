//! Console transport: play one chat from a terminal.
//!
//! Lines starting with `/` are commands. A bare number presses the
//! button with that label, so `5` plays the center cell.

use crate::dispatch::{Dispatcher, Reply};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, info, instrument};

/// Hint printed for input that is neither a command nor a cell number.
pub const USAGE_HINT: &str = "Type /newgame, /help, or a cell number 1-9.";

/// One line of console input, translated for the dispatcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleInput {
    /// A chat message.
    Message(String),
    /// A button press with this callback payload.
    Press(String),
    /// Nothing usable.
    Unrecognized,
}

impl ConsoleInput {
    /// Classifies a trimmed input line.
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        if line.starts_with('/') {
            return ConsoleInput::Message(line.to_string());
        }
        match line.parse::<usize>() {
            Ok(label) if label >= 1 => ConsoleInput::Press((label - 1).to_string()),
            _ => ConsoleInput::Unrecognized,
        }
    }
}

/// Formats a reply for the terminal. `None` when there is nothing to show.
pub fn format_reply(reply: &Reply) -> Option<String> {
    match reply {
        Reply::Text { text } => Some(text.clone()),
        Reply::Board(rendered) => Some(rendered.to_text()),
        Reply::Notice { text } => Some(format!("! {}", text)),
        Reply::Ignored => None,
    }
}

/// Reads `input` line by line until EOF, answering on `output`.
#[instrument(skip(dispatcher, input, output))]
pub async fn run<R, W>(
    dispatcher: &Dispatcher,
    chat_id: &str,
    input: R,
    mut output: W,
) -> anyhow::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    info!("Console session started");
    let mut lines = input.lines();

    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }

        let reply = match ConsoleInput::parse(&line) {
            ConsoleInput::Message(text) => dispatcher.handle_message(chat_id, &text),
            ConsoleInput::Press(data) => dispatcher.handle_callback(chat_id, &data),
            ConsoleInput::Unrecognized => {
                debug!(%line, "Unrecognized console input");
                Reply::Notice {
                    text: USAGE_HINT.to_string(),
                }
            }
        };

        if let Some(text) = format_reply(&reply) {
            output.write_all(text.as_bytes()).await?;
            output.write_all(b"\n\n").await?;
            output.flush().await?;
        }
    }

    info!("Console input closed");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::SessionRegistry;

    #[test]
    fn test_parse_input() {
        assert_eq!(
            ConsoleInput::parse(" /newgame "),
            ConsoleInput::Message("/newgame".to_string())
        );
        assert_eq!(ConsoleInput::parse("5"), ConsoleInput::Press("4".to_string()));
        assert_eq!(ConsoleInput::parse("12"), ConsoleInput::Press("11".to_string()));
        assert_eq!(ConsoleInput::parse("0"), ConsoleInput::Unrecognized);
        assert_eq!(ConsoleInput::parse("x"), ConsoleInput::Unrecognized);
    }

    #[tokio::test]
    async fn test_console_game() {
        let dispatcher = Dispatcher::new(SessionRegistry::new(), "tictak_bot");
        let input: &[u8] = b"/newgame\n1\n1\n\n4\n2\n5\n3\nhello\n";
        let mut output = Vec::new();

        run(&dispatcher, "local", input, &mut output)
            .await
            .expect("console run");

        let text = String::from_utf8(output).expect("utf8");
        assert!(text.starts_with("Tic Tac Toe\nCurrent Player: X\n[1][2][3]"));
        assert!(text.contains("! This cell is already taken!"));
        assert!(text.contains("Player X wins!\n[X][X][X]\n[O][O][6]\n[7][8][9]"));
        assert!(text.ends_with(&format!("! {}\n\n", USAGE_HINT)));
        assert!(!dispatcher.registry().is_active("local"));
    }
}
