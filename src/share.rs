//! Shareable score grid and the clipboard it is written to.

use crate::engine::{Game, Outcome};
use crate::info_log;
use crossterm::{clipboard::CopyToClipboard, execute};
use std::fmt;
use std::io;

/// First line of every shared score.
pub const SHARE_TITLE: &str = "Wordle ";

/// Destination for the shared score.
pub trait Clipboard {
    fn write(&mut self, text: &str) -> io::Result<()>;
}

/// Copies through the terminal using an OSC 52 escape sequence.
#[derive(Debug, Default)]
pub struct TerminalClipboard;

impl Clipboard for TerminalClipboard {
    fn write(&mut self, text: &str) -> io::Result<()> {
        let mut stdout = io::stdout();
        execute!(stdout, CopyToClipboard::to_clipboard_from(text))
    }
}

/// Keeps every write in memory.
#[derive(Debug, Default)]
pub struct MemoryClipboard {
    writes: Vec<String>,
}

impl MemoryClipboard {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn last(&self) -> Option<&str> {
        self.writes.last().map(String::as_str)
    }

    #[must_use]
    pub fn writes(&self) -> &[String] {
        &self.writes
    }
}

impl Clipboard for MemoryClipboard {
    fn write(&mut self, text: &str) -> io::Result<()> {
        self.writes.push(text.to_string());
        Ok(())
    }
}

/// Build the emoji grid for the current board.
///
/// One line per submitted row, title line first. Rows with no feedback
/// produce empty lines and are dropped.
#[must_use]
pub fn share_text(game: &Game) -> String {
    let grid = (0..game.grid().row_count())
        .map(|row| {
            game.row_feedback(row)
                .into_iter()
                .map(|fb| fb.emoji())
                .collect::<String>()
        })
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n");
    format!("{SHARE_TITLE}\n{grid}")
}

/// Why a score could not be shared.
#[derive(Debug)]
pub enum ShareError {
    NotWon,
    /// The clipboard rejected the write. Carries the text so the front end
    /// can still show it.
    Clipboard { text: String, source: io::Error },
}

impl fmt::Display for ShareError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShareError::NotWon => write!(f, "only a won game can be shared"),
            ShareError::Clipboard { source, .. } => {
                write!(f, "could not copy to the clipboard: {source}")
            }
        }
    }
}

impl std::error::Error for ShareError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ShareError::NotWon => None,
            ShareError::Clipboard { source, .. } => Some(source),
        }
    }
}

/// Copy the score of a won game to the clipboard.
///
/// Returns the shared text once it is on the clipboard. The write is not
/// retried.
pub fn share_score(game: &Game, clipboard: &mut dyn Clipboard) -> Result<String, ShareError> {
    if game.outcome() != Outcome::Won {
        return Err(ShareError::NotWon);
    }
    let text = share_text(game);
    match clipboard.write(&text) {
        Ok(()) => {
            info_log!("Score copied to clipboard ({} rows)", game.submitted_rows());
            Ok(text)
        }
        Err(source) => {
            log::warn!("Failed to copy score to clipboard: {source}");
            Err(ShareError::Clipboard { text, source })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{GameConfig, Key, Puzzle};

    struct FailingClipboard;

    impl Clipboard for FailingClipboard {
        fn write(&mut self, _text: &str) -> io::Result<()> {
            Err(io::Error::other("no clipboard"))
        }
    }

    fn play(word: &str, guesses: &[&str]) -> Game {
        let mut game = Game::new(GameConfig::new(Puzzle::new(word)));
        for guess in guesses {
            for c in guess.chars() {
                game.apply(Key::Letter(c));
            }
            game.apply(Key::Enter);
        }
        game
    }

    #[test]
    fn test_share_text_layout() {
        let game = play("rust", &["rude", "rust"]);
        assert_eq!(share_text(&game), "Wordle \n🟩🟩⬛⬛\n🟩🟩🟩🟩");
    }

    #[test]
    fn test_share_text_present_cells() {
        let game = play("crane", &["react", "crane"]);
        assert_eq!(share_text(&game), "Wordle \n🟨🟨🟩🟨⬛\n🟩🟩🟩🟩🟩");
    }

    #[test]
    fn test_share_text_skips_active_row() {
        let mut game = play("crane", &["slate"]);
        game.apply(Key::Letter('c'));
        assert_eq!(share_text(&game), "Wordle \n⬛⬛🟩⬛🟩");
    }

    #[test]
    fn test_share_text_is_idempotent() {
        let game = play("crane", &["slate", "crane"]);
        assert_eq!(share_text(&game), share_text(&game));
    }

    #[test]
    fn test_share_score_writes_clipboard() {
        let game = play("crane", &["crane"]);
        let mut clipboard = MemoryClipboard::new();
        let text = share_score(&game, &mut clipboard).unwrap();
        assert_eq!(text, "Wordle \n🟩🟩🟩🟩🟩");
        assert_eq!(clipboard.last(), Some(text.as_str()));
        assert_eq!(clipboard.writes().len(), 1);
    }

    #[test]
    fn test_share_score_requires_win() {
        let game = play("crane", &["slate"]);
        let mut clipboard = MemoryClipboard::new();
        assert!(matches!(
            share_score(&game, &mut clipboard),
            Err(ShareError::NotWon)
        ));
        assert!(clipboard.writes().is_empty());
    }

    #[test]
    fn test_share_score_reports_clipboard_failure() {
        let game = play("crane", &["crane"]);
        match share_score(&game, &mut FailingClipboard) {
            Err(ShareError::Clipboard { text, source }) => {
                assert_eq!(text, "Wordle \n🟩🟩🟩🟩🟩");
                assert_eq!(source.to_string(), "no clipboard");
            }
            other => panic!("expected a clipboard error, got {other:?}"),
        }
    }
}
