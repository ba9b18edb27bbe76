use daily_wordle::cli::{CliInterface, parse_cli};
use daily_wordle::engine::{Game, GameConfig, WORD_LENGTH};
use daily_wordle::game_state::game_loop;
use daily_wordle::logging;
use daily_wordle::share::TerminalClipboard;
use daily_wordle::tui::TuiInterface;
use daily_wordle::wordbank::{EMBEDDED_WORDBANK, load_wordbank_from_str, select_puzzle};
use std::io;
use std::process::ExitCode;

fn main() -> ExitCode {
    logging::init();
    let cli = parse_cli();

    let date = cli.date.unwrap_or_else(|| chrono::Local::now().date_naive());
    let words = load_wordbank_from_str(EMBEDDED_WORDBANK, WORD_LENGTH);
    let puzzle = match select_puzzle(&words, date, cli.overflow) {
        Ok(puzzle) => puzzle,
        Err(e) => {
            eprintln!("Failed to pick the puzzle for {date}: {e}");
            return ExitCode::FAILURE;
        }
    };
    log::info!("Puzzle for {date} selected ({} words loaded)", words.len());

    let mut game = Game::new(GameConfig::new(puzzle));
    let mut clipboard = TerminalClipboard;

    if cli.plain {
        let mut interface = CliInterface::new(io::stdin().lock());
        game_loop(&mut game, &mut interface, &mut clipboard);
        return ExitCode::SUCCESS;
    }

    let mut interface = match TuiInterface::new() {
        Ok(interface) => interface,
        Err(e) => {
            eprintln!("Failed to start the terminal UI: {e}");
            return ExitCode::FAILURE;
        }
    };
    game_loop(&mut game, &mut interface, &mut clipboard);
    if let Err(e) = interface.cleanup() {
        eprintln!("Failed to restore the terminal: {e}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
