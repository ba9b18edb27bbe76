//! Game engine: puzzle, grid, cursor and outcome.
//!
//! The engine is a turn-based state machine driven by [`Key`] events. Every
//! call to [`Game::apply`] fully processes one key and reports what happened
//! through a [`Transition`], which callers use to decide whether to notify the
//! player. Feedback colors are never stored; they are derived on demand from
//! the grid, the cursor and the puzzle.
//!
//! # State Machine
//! - `Playing` → `Won` when a submitted row matches the puzzle exactly
//! - `Playing` → `Lost` when the last attempt is submitted without a match
//! - `Won` and `Lost` are terminal: further keys are ignored

use crate::debug_log;
use crate::feedback::{Feedback, LetterStatus, classify};
use std::fmt;

/// Number of guesses the player gets.
pub const MAX_ATTEMPTS: usize = 6;
/// Length of the words in the embedded word list.
pub const WORD_LENGTH: usize = 5;

/// A single event from the input surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Letter(char),
    Enter,
    Clear,
}

/// The target word, stored as lower-case characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Puzzle {
    letters: Vec<char>,
}

impl Puzzle {
    #[must_use]
    pub fn new(word: &str) -> Self {
        Self {
            letters: word.trim().to_lowercase().chars().collect(),
        }
    }

    #[must_use]
    pub fn letters(&self) -> &[char] {
        &self.letters
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.letters.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.letters.is_empty()
    }

    /// Letter at `col`, if the column exists.
    #[must_use]
    pub fn letter_at(&self, col: usize) -> Option<char> {
        self.letters.get(col).copied()
    }

    /// Whether `letter` occurs anywhere in the word.
    #[must_use]
    pub fn contains(&self, letter: char) -> bool {
        self.letters.contains(&letter)
    }
}

impl fmt::Display for Puzzle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for ch in &self.letters {
            write!(f, "{ch}")?;
        }
        Ok(())
    }
}

/// Everything a game needs at construction time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    pub puzzle: Puzzle,
    pub max_attempts: usize,
}

impl GameConfig {
    /// Configuration with the default number of attempts.
    #[must_use]
    pub fn new(puzzle: Puzzle) -> Self {
        Self {
            puzzle,
            max_attempts: MAX_ATTEMPTS,
        }
    }

    /// Override the number of attempts. At least one attempt is always kept.
    #[must_use]
    pub fn with_max_attempts(mut self, max_attempts: usize) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    #[must_use]
    pub fn word_length(&self) -> usize {
        self.puzzle.len()
    }
}

/// Fixed-size matrix of guessed letters. `None` marks an empty cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    rows: Vec<Vec<Option<char>>>,
}

impl Grid {
    fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows: vec![vec![None; cols]; rows],
        }
    }

    #[must_use]
    pub fn cell(&self, row: usize, col: usize) -> Option<char> {
        self.rows.get(row).and_then(|r| r.get(col)).copied().flatten()
    }

    #[must_use]
    pub fn row(&self, row: usize) -> Option<&[Option<char>]> {
        self.rows.get(row).map(Vec::as_slice)
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Option<char>]> {
        self.rows.iter().map(Vec::as_slice)
    }

    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// The letters of a row as a string, skipping empty cells.
    #[must_use]
    pub fn row_word(&self, row: usize) -> String {
        self.row(row)
            .map(|cells| cells.iter().flatten().collect())
            .unwrap_or_default()
    }

    fn set(&mut self, row: usize, col: usize, value: Option<char>) {
        if let Some(cell) = self.rows.get_mut(row).and_then(|r| r.get_mut(col)) {
            *cell = value;
        }
    }
}

/// Position of the next letter to be entered.
///
/// `col == word_length` means the active row is full and awaits ENTER.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cursor {
    pub row: usize,
    pub col: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Outcome {
    #[default]
    Playing,
    Won,
    Lost,
}

impl Outcome {
    #[must_use]
    pub fn is_terminal(self) -> bool {
        !matches!(self, Self::Playing)
    }
}

/// What a single key press did to the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// The key had no effect (terminal outcome, empty row, full row, ...).
    Ignored,
    /// A cell of the active row was written or cleared.
    Edited,
    /// A row was submitted and the game goes on.
    Continued,
    /// The submitted row matched the puzzle. Fires once per game.
    Won,
    /// The last attempt was submitted without a match. Fires once per game.
    Lost,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Game {
    config: GameConfig,
    grid: Grid,
    cursor: Cursor,
    outcome: Outcome,
}

impl Game {
    #[must_use]
    pub fn new(config: GameConfig) -> Self {
        let grid = Grid::new(config.max_attempts, config.word_length());
        Self {
            config,
            grid,
            cursor: Cursor::default(),
            outcome: Outcome::Playing,
        }
    }

    #[must_use]
    pub fn puzzle(&self) -> &Puzzle {
        &self.config.puzzle
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[must_use]
    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    #[must_use]
    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    #[must_use]
    pub fn word_length(&self) -> usize {
        self.config.word_length()
    }

    #[must_use]
    pub fn max_attempts(&self) -> usize {
        self.config.max_attempts
    }

    /// Number of rows submitted so far.
    #[must_use]
    pub fn submitted_rows(&self) -> usize {
        self.cursor.row
    }

    /// Process one key press.
    pub fn apply(&mut self, key: Key) -> Transition {
        if self.outcome.is_terminal() {
            debug_log!("apply() - Ignoring {:?}, game is over ({:?})", key, self.outcome);
            return Transition::Ignored;
        }

        match key {
            Key::Clear => self.clear_letter(),
            Key::Enter => self.submit_row(),
            Key::Letter(c) => self.push_letter(c),
        }
    }

    fn clear_letter(&mut self) -> Transition {
        if self.cursor.col == 0 {
            return Transition::Ignored;
        }
        self.cursor.col -= 1;
        self.grid.set(self.cursor.row, self.cursor.col, None);
        Transition::Edited
    }

    fn push_letter(&mut self, c: char) -> Transition {
        if !c.is_alphabetic() || self.cursor.col >= self.word_length() {
            return Transition::Ignored;
        }
        let letter = c.to_lowercase().next().unwrap_or(c);
        self.grid.set(self.cursor.row, self.cursor.col, Some(letter));
        self.cursor.col += 1;
        Transition::Edited
    }

    fn submit_row(&mut self) -> Transition {
        if self.cursor.col != self.word_length() {
            return Transition::Ignored;
        }
        debug_log!(
            "submit_row() - Row {} submitted: '{}'",
            self.cursor.row,
            self.grid.row_word(self.cursor.row)
        );
        self.cursor.row += 1;
        self.cursor.col = 0;
        self.evaluate_outcome()
    }

    /// Compare the most recently submitted row against the puzzle.
    ///
    /// Won is checked first so a correct final attempt never counts as a loss.
    fn evaluate_outcome(&mut self) -> Transition {
        let Some(last) = self.cursor.row.checked_sub(1) else {
            return Transition::Continued;
        };
        let won = self.row_matches(last);

        if won && self.outcome != Outcome::Won {
            self.outcome = Outcome::Won;
            crate::info_log!("Game won after {} attempt(s)", self.cursor.row);
            return Transition::Won;
        }
        if !won && self.cursor.row >= self.config.max_attempts && self.outcome != Outcome::Lost {
            self.outcome = Outcome::Lost;
            crate::info_log!("Game lost, the word was '{}'", self.config.puzzle);
            return Transition::Lost;
        }
        Transition::Continued
    }

    fn row_matches(&self, row: usize) -> bool {
        self.grid.row(row).is_some_and(|cells| {
            cells
                .iter()
                .enumerate()
                .all(|(col, cell)| *cell == self.config.puzzle.letter_at(col))
        })
    }

    /// Feedback color of a single cell.
    ///
    /// Rows that have not been submitted are always `Unset`.
    #[must_use]
    pub fn color_of(&self, row: usize, col: usize) -> Feedback {
        if row >= self.cursor.row {
            return Feedback::Unset;
        }
        match self.grid.cell(row, col) {
            Some(letter) => classify(letter, col, &self.config.puzzle),
            None => Feedback::Unset,
        }
    }

    /// Feedback colors for every column of a row.
    #[must_use]
    pub fn row_feedback(&self, row: usize) -> Vec<Feedback> {
        (0..self.word_length())
            .map(|col| self.color_of(row, col))
            .collect()
    }

    /// Letters of every submitted cell, grouped by their feedback color.
    #[must_use]
    pub fn letter_status(&self) -> LetterStatus {
        let mut status = LetterStatus::default();
        for row in 0..self.cursor.row.min(self.grid.row_count()) {
            for col in 0..self.word_length() {
                if let Some(letter) = self.grid.cell(row, col) {
                    status.insert(letter, self.color_of(row, col));
                }
            }
        }
        status
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn game(word: &str) -> Game {
        Game::new(GameConfig::new(Puzzle::new(word)))
    }

    fn type_word(game: &mut Game, word: &str) -> Transition {
        for c in word.chars() {
            game.apply(Key::Letter(c));
        }
        game.apply(Key::Enter)
    }

    #[test]
    fn test_new_game_is_empty() {
        let g = game("crane");
        assert_eq!(g.cursor(), Cursor { row: 0, col: 0 });
        assert_eq!(g.outcome(), Outcome::Playing);
        assert_eq!(g.grid().row_count(), MAX_ATTEMPTS);
        assert!(g.grid().rows().all(|row| row.iter().all(Option::is_none)));
    }

    #[test]
    fn test_puzzle_is_lowercased() {
        let puzzle = Puzzle::new("  CrAnE ");
        assert_eq!(puzzle.to_string(), "crane");
        assert_eq!(puzzle.len(), 5);
        assert!(puzzle.contains('a'));
        assert!(!puzzle.contains('A'));
    }

    #[test]
    fn test_letter_advances_cursor() {
        let mut g = game("crane");
        assert_eq!(g.apply(Key::Letter('c')), Transition::Edited);
        assert_eq!(g.cursor(), Cursor { row: 0, col: 1 });
        assert_eq!(g.grid().cell(0, 0), Some('c'));
    }

    #[test]
    fn test_uppercase_letter_stored_lowercase() {
        let mut g = game("crane");
        g.apply(Key::Letter('C'));
        assert_eq!(g.grid().cell(0, 0), Some('c'));
    }

    #[test]
    fn test_non_alphabetic_ignored() {
        let mut g = game("crane");
        assert_eq!(g.apply(Key::Letter('3')), Transition::Ignored);
        assert_eq!(g.cursor().col, 0);
    }

    #[test]
    fn test_letter_on_full_row_ignored() {
        let mut g = game("crane");
        for c in "slate".chars() {
            g.apply(Key::Letter(c));
        }
        let before = g.clone();
        assert_eq!(g.apply(Key::Letter('x')), Transition::Ignored);
        assert_eq!(g, before);
    }

    #[test]
    fn test_clear_at_column_zero_is_noop() {
        let mut g = game("crane");
        let before = g.clone();
        assert_eq!(g.apply(Key::Clear), Transition::Ignored);
        assert_eq!(g, before);
    }

    #[test]
    fn test_clear_removes_last_letter() {
        let mut g = game("crane");
        g.apply(Key::Letter('a'));
        g.apply(Key::Letter('b'));
        assert_eq!(g.apply(Key::Clear), Transition::Edited);
        assert_eq!(g.cursor(), Cursor { row: 0, col: 1 });
        assert_eq!(g.grid().cell(0, 1), None);
        assert_eq!(g.grid().cell(0, 0), Some('a'));
    }

    #[test]
    fn test_enter_on_incomplete_row_ignored() {
        let mut g = game("crane");
        g.apply(Key::Letter('c'));
        g.apply(Key::Letter('r'));
        let before = g.clone();
        assert_eq!(g.apply(Key::Enter), Transition::Ignored);
        assert_eq!(g, before);
    }

    #[test]
    fn test_enter_on_full_row_submits() {
        let mut g = game("crane");
        assert_eq!(type_word(&mut g, "slate"), Transition::Continued);
        assert_eq!(g.cursor(), Cursor { row: 1, col: 0 });
        assert_eq!(g.grid().row_word(0), "slate");
        assert_eq!(g.outcome(), Outcome::Playing);
    }

    #[test]
    fn test_any_word_accepted_without_dictionary() {
        let mut g = game("crane");
        assert_eq!(type_word(&mut g, "zzzzz"), Transition::Continued);
        assert_eq!(g.submitted_rows(), 1);
    }

    #[test]
    fn test_correct_first_guess_wins() {
        let mut g = game("crane");
        assert_eq!(type_word(&mut g, "crane"), Transition::Won);
        assert_eq!(g.outcome(), Outcome::Won);
    }

    #[test]
    fn test_correct_last_guess_wins_not_loses() {
        let mut g = game("crane");
        for _ in 0..MAX_ATTEMPTS - 1 {
            assert_eq!(type_word(&mut g, "slate"), Transition::Continued);
        }
        assert_eq!(type_word(&mut g, "crane"), Transition::Won);
        assert_eq!(g.outcome(), Outcome::Won);
        assert_eq!(g.cursor().row, MAX_ATTEMPTS);
    }

    #[test]
    fn test_single_attempt_correct_wins() {
        let mut g = Game::new(GameConfig::new(Puzzle::new("rust")).with_max_attempts(1));
        assert_eq!(type_word(&mut g, "rust"), Transition::Won);
    }

    #[test]
    fn test_lost_exactly_on_last_attempt() {
        let mut g = game("crane");
        let guesses = ["slate", "moist", "pudgy", "whelk", "fjord", "bumpy"];
        for (i, guess) in guesses.iter().enumerate() {
            let transition = type_word(&mut g, guess);
            if i + 1 < MAX_ATTEMPTS {
                assert_eq!(transition, Transition::Continued);
                assert_eq!(g.outcome(), Outcome::Playing);
            } else {
                assert_eq!(transition, Transition::Lost);
                assert_eq!(g.outcome(), Outcome::Lost);
            }
        }
    }

    #[test]
    fn test_input_ignored_after_loss() {
        let mut g = Game::new(GameConfig::new(Puzzle::new("rust")).with_max_attempts(1));
        assert_eq!(type_word(&mut g, "rude"), Transition::Lost);
        let before = g.clone();
        for key in [Key::Letter('a'), Key::Clear, Key::Enter] {
            assert_eq!(g.apply(key), Transition::Ignored);
        }
        assert_eq!(g, before);
    }

    #[test]
    fn test_input_ignored_after_win() {
        let mut g = game("crane");
        type_word(&mut g, "crane");
        let before = g.clone();
        assert_eq!(g.apply(Key::Letter('a')), Transition::Ignored);
        assert_eq!(g, before);
    }

    #[test]
    fn test_max_attempts_never_zero() {
        let config = GameConfig::new(Puzzle::new("rust")).with_max_attempts(0);
        assert_eq!(config.max_attempts, 1);
    }

    #[test]
    fn test_rust_example_feedback() {
        let mut g = game("rust");
        assert_eq!(type_word(&mut g, "rude"), Transition::Continued);
        assert_eq!(
            g.row_feedback(0),
            vec![
                Feedback::Correct,
                Feedback::Correct,
                Feedback::Absent,
                Feedback::Absent
            ]
        );
        assert_eq!(g.outcome(), Outcome::Playing);
        assert_eq!(type_word(&mut g, "rust"), Transition::Won);
        assert!(g.row_feedback(1).iter().all(|f| *f == Feedback::Correct));
    }

    #[test]
    fn test_unsubmitted_rows_unset() {
        let mut g = game("crane");
        g.apply(Key::Letter('c'));
        assert_eq!(g.color_of(0, 0), Feedback::Unset);
        type_word(&mut g, "rane");
        assert_eq!(g.color_of(0, 0), Feedback::Correct);
        assert!(g.row_feedback(1).iter().all(|f| *f == Feedback::Unset));
    }

    #[test]
    fn test_duplicate_letters_not_demoted() {
        // "eerie" against "crane": both leading e's are marked present
        let mut g = game("crane");
        type_word(&mut g, "eerie");
        assert_eq!(
            g.row_feedback(0),
            vec![
                Feedback::Present,
                Feedback::Present,
                Feedback::Present,
                Feedback::Absent,
                Feedback::Correct
            ]
        );
    }

    #[test]
    fn test_letter_status_collects_submitted_cells() {
        let mut g = game("crane");
        type_word(&mut g, "react");
        g.apply(Key::Letter('z'));
        let status = g.letter_status();
        assert_eq!(status.correct.iter().copied().collect::<String>(), "a");
        assert!(status.present.contains(&'r'));
        assert!(status.present.contains(&'e'));
        assert!(status.present.contains(&'c'));
        assert!(status.absent.contains(&'t'));
        assert!(!status.absent.contains(&'z'));
    }
}
