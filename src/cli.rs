use crate::engine::{Game, Key};
use crate::feedback::LetterStatus;
use crate::game_state::{GameInterface, UserAction};
use crate::wordbank::OverflowPolicy;
use crate::{debug_log, info_log};
use chrono::NaiveDate;
use clap::Parser;
use std::collections::{BTreeSet, VecDeque};
use std::fmt;
use std::io::{self, BufRead, Write};

/// Daily word-guessing puzzle
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Play the puzzle of another day (YYYY-MM-DD) instead of today's
    #[arg(short = 'd', long = "date")]
    pub date: Option<NaiveDate>,

    /// Use the plain line-based interface instead of the terminal UI
    #[arg(short = 'p', long = "plain")]
    pub plain: bool,

    /// How to pick a word when the day of the year runs past the word list
    #[arg(long = "overflow", value_enum, default_value_t = OverflowPolicy::Wrap)]
    pub overflow: OverflowPolicy,
}

#[must_use]
pub fn parse_cli() -> Cli {
    Cli::parse()
}

/// Marker that erases the previous letter in plain mode.
const CLEAR_MARKER: char = '<';

/// One line of plain-mode input.
#[derive(Debug, PartialEq, Eq)]
pub enum LineInput {
    Keys(Vec<Key>),
    Exit,
}

/// Turn a typed line into key presses.
///
/// Letters map to letter keys and `<` to CLEAR; every line ends with ENTER.
/// Other characters are dropped.
pub fn parse_line(line: &str) -> LineInput {
    let line = line.trim();
    if line.eq_ignore_ascii_case("exit") {
        return LineInput::Exit;
    }

    let mut keys: Vec<Key> = line
        .chars()
        .filter_map(|c| match c {
            CLEAR_MARKER => Some(Key::Clear),
            c if c.is_ascii_alphabetic() => Some(Key::Letter(c.to_ascii_lowercase())),
            _ => {
                debug_log!("parse_line() - Dropping '{}'", c);
                None
            }
        })
        .collect();
    keys.push(Key::Enter);
    LineInput::Keys(keys)
}

fn row_letters(game: &Game, row: usize) -> String {
    (0..game.word_length())
        .map(|col| {
            game.grid()
                .cell(row, col)
                .map_or('_', |c| c.to_ascii_uppercase())
        })
        .collect()
}

fn format_row(game: &Game, row: usize) -> String {
    let letters = row_letters(game, row);
    let marks: String = game
        .row_feedback(row)
        .into_iter()
        .map(|fb| fb.to_char())
        .collect();
    format!("{letters}  {marks}")
}

fn format_letters(letters: &BTreeSet<char>) -> String {
    letters.iter().map(char::to_ascii_uppercase).collect()
}

fn format_status(status: &LetterStatus) -> String {
    format!(
        "Correct: {} | Present: {} | Absent: {}",
        format_letters(&status.correct),
        format_letters(&status.present),
        format_letters(&status.absent)
    )
}

/// The partly typed active row, e.g. `CRA__  (2 more letters needed)`.
fn format_active_row(game: &Game) -> Option<String> {
    let cursor = game.cursor();
    if game.outcome().is_terminal() || cursor.col == 0 {
        return None;
    }
    let letters = row_letters(game, cursor.row);
    let hint = match game.word_length().saturating_sub(cursor.col) {
        0 => "(press ENTER on an empty line to submit)".to_string(),
        1 => "(1 more letter needed)".to_string(),
        missing => format!("({missing} more letters needed)"),
    };
    Some(format!("{letters}  {hint}"))
}

/// A typed line that cannot be applied to the active row.
#[derive(Debug, PartialEq, Eq)]
pub enum LineError {
    /// The row would need more cells than a guess has.
    TooManyLetters { word_length: usize },
}

impl fmt::Display for LineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LineError::TooManyLetters { word_length } => write!(
                f,
                "Too many letters, a guess has {word_length}. Nothing was entered; use '{CLEAR_MARKER}' to erase."
            ),
        }
    }
}

/// How many cells of the active row are filled after `keys`, starting from
/// `filled`.
pub fn filled_after(keys: &[Key], filled: usize, word_length: usize) -> Result<usize, LineError> {
    keys.iter().try_fold(filled, |filled, key| match key {
        Key::Letter(_) if filled == word_length => Err(LineError::TooManyLetters { word_length }),
        Key::Letter(_) => Ok(filled + 1),
        Key::Clear => Ok(filled.saturating_sub(1)),
        Key::Enter => Ok(filled),
    })
}

/// Line-based front end over any `BufRead`, printing to any `Write`.
///
/// Typing a word presses its letters and then ENTER. Before each line is
/// read the board is printed if a row was submitted since, followed by the
/// partly typed row and a prompt.
pub struct CliInterface<R: BufRead, W: Write = io::Stdout> {
    reader: R,
    output: W,
    pending: VecDeque<Key>,
    latest: Option<Game>,
    shown_rows: Option<usize>,
    prompted: bool,
}

impl<R: BufRead> CliInterface<R> {
    pub fn new(reader: R) -> Self {
        Self::with_output(reader, io::stdout())
    }
}

impl<R: BufRead, W: Write> CliInterface<R, W> {
    pub fn with_output(reader: R, output: W) -> Self {
        Self {
            reader,
            output,
            pending: VecDeque::new(),
            latest: None,
            shown_rows: None,
            prompted: false,
        }
    }

    pub fn output(&self) -> &W {
        &self.output
    }

    fn say(&mut self, args: fmt::Arguments<'_>) {
        if let Err(e) = writeln!(self.output, "{args}") {
            log::warn!("Failed to write output: {e}");
        }
    }

    /// Read one trimmed line, `None` at end of input or on a read error.
    fn read_line(&mut self) -> Option<String> {
        if let Err(e) = self.output.flush() {
            log::warn!("Failed to flush output: {e}");
        }
        let mut input = String::new();
        match self.reader.read_line(&mut input) {
            Ok(0) => None,
            Ok(_) => Some(input.trim().to_string()),
            Err(e) => {
                log::warn!("Failed to read input: {e}");
                None
            }
        }
    }

    /// Print the submitted rows if they changed since the last call.
    fn show_rows(&mut self) {
        let Some(game) = self.latest.take() else {
            return;
        };
        if self.shown_rows != Some(game.submitted_rows()) {
            self.shown_rows = Some(game.submitted_rows());
            self.prompted = false;
            self.say(format_args!(""));
            for row in 0..game.submitted_rows() {
                self.say(format_args!("{}", format_row(&game, row)));
            }
            let status = game.letter_status();
            if !status.is_empty() {
                self.say(format_args!("{}", format_status(&status)));
            }
        }
        self.latest = Some(game);
    }

    /// Print the board and what the player is expected to type next.
    fn prompt(&mut self) {
        self.show_rows();
        if self.prompted {
            return;
        }
        let Some(game) = self.latest.take() else {
            return;
        };
        self.prompted = true;
        if game.outcome().is_terminal() {
            self.say(format_args!("Game over. Type 'exit' to quit."));
        } else {
            if let Some(active) = format_active_row(&game) {
                self.say(format_args!("{active}"));
            }
            self.say(format_args!(
                "Guess {}/{} ({} letters, '{}' to erase, 'exit' to quit):",
                game.submitted_rows() + 1,
                game.max_attempts(),
                game.word_length(),
                CLEAR_MARKER
            ));
        }
        self.latest = Some(game);
    }

    /// Queue the keys of a line, unless it would overflow the active row.
    fn queue_line(&mut self, keys: Vec<Key>) {
        let Some((filled, word_length, finished)) = self
            .latest
            .as_ref()
            .map(|game| (game.cursor().col, game.word_length(), game.outcome().is_terminal()))
        else {
            self.pending.extend(keys);
            return;
        };
        if finished {
            debug_log!("queue_line() - Game over, dropping {} key(s)", keys.len());
            return;
        }
        match filled_after(&keys, filled, word_length) {
            Ok(_) => self.pending.extend(keys),
            Err(e) => self.say(format_args!("{e}")),
        }
    }
}

impl<R: BufRead, W: Write> GameInterface for CliInterface<R, W> {
    fn render(&mut self, game: &Game) {
        // Printing waits for the next prompt so one typed line shows up once
        self.latest = Some(game.clone());
    }

    fn read_action(&mut self) -> UserAction {
        loop {
            if let Some(key) = self.pending.pop_front() {
                return UserAction::Key(key);
            }
            self.prompt();
            let Some(line) = self.read_line() else {
                return UserAction::Exit;
            };
            self.prompted = false;
            match parse_line(&line) {
                LineInput::Exit => return UserAction::Exit,
                LineInput::Keys(keys) => {
                    info_log!("CliInterface::read_action() - {} key(s) from '{}'", keys.len(), line);
                    self.queue_line(keys);
                }
            }
        }
    }

    fn notify_won(&mut self, _game: &Game) -> bool {
        self.pending.clear();
        self.show_rows();
        self.say(format_args!(
            "You won! 🎉 Congratulations! Share your score with your friends! 🤩"
        ));
        self.say(format_args!("Share your score? [y/N]"));
        self.read_line()
            .is_some_and(|answer| answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("yes"))
    }

    fn notify_lost(&mut self, game: &Game) {
        self.pending.clear();
        self.show_rows();
        self.say(format_args!(
            "You lost! 😭 The word was: {}. Try again tomorrow 🤪",
            game.puzzle().to_string().to_uppercase()
        ));
    }

    fn notify_copied(&mut self, share: &str) {
        self.say(format_args!("Copied to clipboard 📋 You can now share it 🤩"));
        self.say(format_args!("{share}"));
    }

    fn notify_copy_failed(&mut self, share: &str, error: &io::Error) {
        self.say(format_args!("Could not copy to clipboard ({error}). Copy your score by hand:"));
        self.say(format_args!("{share}"));
    }

    fn display_exit_message(&mut self) {
        self.say(format_args!("Exiting."));
    }
}
