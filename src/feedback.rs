use crate::engine::Puzzle;
use std::collections::BTreeSet;

/// Per-cell feedback color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Feedback {
    Unset,
    Correct, // Green
    Present, // Yellow
    Absent,  // Gray
}

impl Feedback {
    /// Glyph used in the shareable score grid. Unset cells render as nothing.
    #[must_use]
    pub fn emoji(self) -> &'static str {
        match self {
            Self::Unset => "",
            Self::Correct => "🟩",
            Self::Present => "🟨",
            Self::Absent => "⬛",
        }
    }

    /// Single-letter code, G/Y/X, with `.` for unset cells.
    #[must_use]
    pub fn to_char(self) -> char {
        match self {
            Self::Unset => '.',
            Self::Correct => 'G',
            Self::Present => 'Y',
            Self::Absent => 'X',
        }
    }
}

/// Classify a submitted letter against the puzzle.
///
/// Single pass against the raw word: a repeated guess letter is marked present
/// every time it occurs in the puzzle, with no frequency bookkeeping.
#[must_use]
pub fn classify(letter: char, col: usize, puzzle: &Puzzle) -> Feedback {
    if puzzle.letter_at(col) == Some(letter) {
        Feedback::Correct
    } else if puzzle.contains(letter) {
        Feedback::Present
    } else {
        Feedback::Absent
    }
}

/// Letters grouped by the feedback color they received.
///
/// A letter can sit in several sets at once; consumers only test membership.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LetterStatus {
    pub correct: BTreeSet<char>,
    pub present: BTreeSet<char>,
    pub absent: BTreeSet<char>,
}

impl LetterStatus {
    pub fn insert(&mut self, letter: char, feedback: Feedback) {
        match feedback {
            Feedback::Correct => {
                self.correct.insert(letter);
            }
            Feedback::Present => {
                self.present.insert(letter);
            }
            Feedback::Absent => {
                self.absent.insert(letter);
            }
            Feedback::Unset => {}
        }
    }

    /// The strongest color a key should show: correct, then present, then absent.
    #[must_use]
    pub fn best(&self, letter: char) -> Feedback {
        let letter = letter.to_ascii_lowercase();
        if self.correct.contains(&letter) {
            Feedback::Correct
        } else if self.present.contains(&letter) {
            Feedback::Present
        } else if self.absent.contains(&letter) {
            Feedback::Absent
        } else {
            Feedback::Unset
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.correct.is_empty() && self.present.is_empty() && self.absent.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_correct() {
        let puzzle = Puzzle::new("rust");
        assert_eq!(classify('r', 0, &puzzle), Feedback::Correct);
        assert_eq!(classify('t', 3, &puzzle), Feedback::Correct);
    }

    #[test]
    fn test_classify_present() {
        let puzzle = Puzzle::new("rust");
        assert_eq!(classify('s', 0, &puzzle), Feedback::Present);
        assert_eq!(classify('r', 3, &puzzle), Feedback::Present);
    }

    #[test]
    fn test_classify_absent() {
        let puzzle = Puzzle::new("rust");
        assert_eq!(classify('d', 2, &puzzle), Feedback::Absent);
        assert_eq!(classify('e', 3, &puzzle), Feedback::Absent);
    }

    #[test]
    fn test_classify_column_past_end() {
        let puzzle = Puzzle::new("rust");
        assert_eq!(classify('r', 9, &puzzle), Feedback::Present);
        assert_eq!(classify('q', 9, &puzzle), Feedback::Absent);
    }

    #[test]
    fn test_emoji_mapping() {
        assert_eq!(Feedback::Correct.emoji(), "🟩");
        assert_eq!(Feedback::Present.emoji(), "🟨");
        assert_eq!(Feedback::Absent.emoji(), "⬛");
        assert_eq!(Feedback::Unset.emoji(), "");
    }

    #[test]
    fn test_char_codes() {
        assert_eq!(Feedback::Correct.to_char(), 'G');
        assert_eq!(Feedback::Present.to_char(), 'Y');
        assert_eq!(Feedback::Absent.to_char(), 'X');
        assert_eq!(Feedback::Unset.to_char(), '.');
    }

    #[test]
    fn test_letter_status_best_prefers_correct() {
        let mut status = LetterStatus::default();
        status.insert('e', Feedback::Absent);
        status.insert('e', Feedback::Present);
        status.insert('e', Feedback::Correct);
        status.insert('q', Feedback::Absent);
        status.insert('z', Feedback::Unset);

        assert_eq!(status.best('e'), Feedback::Correct);
        assert_eq!(status.best('E'), Feedback::Correct);
        assert_eq!(status.best('q'), Feedback::Absent);
        assert_eq!(status.best('z'), Feedback::Unset);
        assert!(status.present.contains(&'e'));
        assert!(!status.is_empty());
    }
}
