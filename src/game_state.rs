use crate::engine::{Game, Key, Outcome, Transition};
use crate::share::{Clipboard, ShareError, share_score};
use crate::{debug_log, info_log};
use std::io;

/// Something the player asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserAction {
    Key(Key),
    Exit,
}

/// Front end driving a game: the input surface plus the notification and
/// display collaborators.
///
/// Implemented by the plain line-based CLI and by the terminal UI.
pub trait GameInterface {
    /// Show the current board and keyboard colors.
    fn render(&mut self, game: &Game);
    /// Block until the player does something.
    fn read_action(&mut self) -> UserAction;
    /// The game was just won. Returns `true` when the player wants to share.
    fn notify_won(&mut self, game: &Game) -> bool;
    /// The game was just lost; reveal the puzzle.
    fn notify_lost(&mut self, game: &Game);
    /// The shared score was placed on the clipboard.
    fn notify_copied(&mut self, share: &str);
    /// The clipboard refused the shared score. `share` is what would have
    /// been copied.
    fn notify_copy_failed(&mut self, share: &str, error: &io::Error);
    fn display_exit_message(&mut self);
}

/// Run one game until the player exits.
///
/// Keys keep flowing into the engine after the game ends; the engine ignores
/// them. Win and loss notifications fire exactly once, when the transition
/// reports them. Returns the final outcome.
pub fn game_loop<I: GameInterface + ?Sized>(
    game: &mut Game,
    interface: &mut I,
    clipboard: &mut dyn Clipboard,
) -> Outcome {
    info_log!(
        "game_loop() - Starting: {} attempts, {} letters",
        game.max_attempts(),
        game.word_length()
    );
    interface.render(game);

    loop {
        let key = match interface.read_action() {
            UserAction::Exit => {
                interface.display_exit_message();
                break;
            }
            UserAction::Key(key) => key,
        };

        let transition = game.apply(key);
        debug_log!("game_loop() - {:?} -> {:?}", key, transition);
        if transition == Transition::Ignored {
            continue;
        }
        interface.render(game);

        match transition {
            Transition::Won => {
                if interface.notify_won(game) {
                    match share_score(game, clipboard) {
                        Ok(text) => interface.notify_copied(&text),
                        Err(ShareError::Clipboard { text, source }) => {
                            interface.notify_copy_failed(&text, &source);
                        }
                        Err(ShareError::NotWon) => {
                            debug_log!("game_loop() - Share skipped, game not won");
                        }
                    }
                }
            }
            Transition::Lost => interface.notify_lost(game),
            Transition::Ignored | Transition::Edited | Transition::Continued => {}
        }
    }

    game.outcome()
}
