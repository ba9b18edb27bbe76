// Library interface for daily-wordle
// This allows integration tests to access internal modules

pub mod cli;
pub mod engine;
pub mod feedback;
pub mod game_state;
pub mod logging;
pub mod share;
pub mod tui;
pub mod wordbank;

// Re-export commonly used items for easier testing
pub use engine::{Game, GameConfig, Key, Outcome, Puzzle, Transition};
pub use feedback::{Feedback, LetterStatus};
pub use game_state::{GameInterface, UserAction, game_loop};
pub use share::{Clipboard, MemoryClipboard, ShareError, share_score, share_text};
pub use wordbank::{OverflowPolicy, WordbankError, load_wordbank_from_str, select_puzzle};
