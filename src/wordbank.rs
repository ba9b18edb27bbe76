use crate::debug_log;
use crate::engine::Puzzle;
use chrono::{Datelike, NaiveDate};
use std::fmt;

pub const EMBEDDED_WORDBANK: &str = include_str!("resources/words.txt");

/// What to do when the day of the year points past the end of the word list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OverflowPolicy {
    /// Index modulo the list length.
    #[default]
    Wrap,
    /// Use the last word of the list.
    Clamp,
    /// Refuse to pick a word.
    Fail,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WordbankError {
    EmptyWordbank,
    DayOutOfRange { day: usize, len: usize },
}

impl fmt::Display for WordbankError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyWordbank => write!(f, "word list is empty"),
            Self::DayOutOfRange { day, len } => {
                write!(f, "day {day} is past the end of the word list ({len} words)")
            }
        }
    }
}

impl std::error::Error for WordbankError {}

/// Parse a newline-delimited word list, keeping alphabetic words of `word_length`.
pub fn load_wordbank_from_str(data: &str, word_length: usize) -> Vec<String> {
    data.lines()
        .map(|line| line.trim().to_lowercase())
        .filter(|word| {
            word.chars().count() == word_length && word.chars().all(|c| c.is_ascii_alphabetic())
        })
        .collect()
}

/// 1-based ordinal day within the year: January 1st is day 1.
#[must_use]
pub fn day_of_year(date: NaiveDate) -> usize {
    date.ordinal() as usize
}

/// Map a day number onto a list index according to `policy`.
pub fn puzzle_index(day: usize, len: usize, policy: OverflowPolicy) -> Result<usize, WordbankError> {
    if len == 0 {
        return Err(WordbankError::EmptyWordbank);
    }
    if day < len {
        return Ok(day);
    }
    match policy {
        OverflowPolicy::Wrap => Ok(day % len),
        OverflowPolicy::Clamp => Ok(len - 1),
        OverflowPolicy::Fail => Err(WordbankError::DayOutOfRange { day, len }),
    }
}

/// Pick the puzzle for `date`. The day of the year indexes the list directly.
pub fn select_puzzle(
    words: &[String],
    date: NaiveDate,
    policy: OverflowPolicy,
) -> Result<Puzzle, WordbankError> {
    let day = day_of_year(date);
    let index = puzzle_index(day, words.len(), policy)?;
    debug_log!("select_puzzle() - Day {} of {} selects word #{}", day, date.year(), index);
    Ok(Puzzle::new(&words[index]))
}
