//! TUI (Terminal User Interface) module for the daily puzzle
//!
//! This module provides an interactive terminal interface using Ratatui.
//!
//! # Layout
//! - Title, guess grid, on-screen keyboard, status line, instructions
//!
//! # State Machine
//! The UI follows these state transitions:
//! - `Playing` → `ConfirmingShare` (game won) → `GameOver`
//! - `Playing` → `GameOver` (game lost)

use crate::engine::{Cursor, Game, Key};
use crate::feedback::{Feedback, LetterStatus};
use crate::game_state::{GameInterface, UserAction};
use crate::{debug_log, info_log};
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use std::io;

const EVENT_POLL_TIMEOUT_MS: u64 = 100;
const ROW_SPACING: u16 = 2;
const KEYBOARD_ROWS: [&str; 3] = ["QWERTYUIOP", "ASDFGHJKL", "ZXCVBNM"];

// Style constants for consistent UI
const HEADER_STYLE: Style = Style::new().fg(Color::Cyan).add_modifier(Modifier::BOLD);
const SUCCESS_STYLE: Style = Style::new().fg(Color::Green).add_modifier(Modifier::BOLD);
const ERROR_STYLE: Style = Style::new().fg(Color::Red).add_modifier(Modifier::BOLD);
const MESSAGE_STYLE: Style = Style::new().fg(Color::Cyan);

fn feedback_colors(feedback: Feedback) -> (Color, Color) {
    match feedback {
        Feedback::Unset => (Color::DarkGray, Color::White),
        Feedback::Correct => (Color::Green, Color::Black),
        Feedback::Present => (Color::Yellow, Color::Black),
        Feedback::Absent => (Color::Gray, Color::White),
    }
}

/// Owned copy of everything the renderer needs from a `Game`.
#[derive(Debug, Default)]
struct BoardView {
    cells: Vec<Vec<(char, Feedback)>>,
    cursor: Cursor,
    playing: bool,
    letters: LetterStatus,
}

impl BoardView {
    fn from_game(game: &Game) -> Self {
        let cells = (0..game.max_attempts())
            .map(|row| {
                (0..game.word_length())
                    .map(|col| {
                        let letter = game.grid().cell(row, col).unwrap_or(' ');
                        (letter.to_ascii_uppercase(), game.color_of(row, col))
                    })
                    .collect()
            })
            .collect();
        Self {
            cells,
            cursor: game.cursor(),
            playing: !game.outcome().is_terminal(),
            letters: game.letter_status(),
        }
    }

    fn is_cell_active(&self, row: usize, col: usize) -> bool {
        self.playing && row == self.cursor.row && col == self.cursor.col
    }
}

#[derive(Debug, PartialEq)]
enum TuiState {
    Playing,
    /// Game won, waiting for the player to accept or decline sharing
    ConfirmingShare,
    GameOver,
}

/// Remembers whether the terminal was already handed back, so an explicit
/// `cleanup` followed by `Drop` restores it once.
#[derive(Debug, Default)]
struct TerminalRestore {
    cleaned_up: bool,
}

impl TerminalRestore {
    fn run<F>(&mut self, restore: F) -> Result<(), io::Error>
    where
        F: FnOnce() -> Result<(), io::Error>,
    {
        if self.cleaned_up {
            debug_log!("TerminalRestore::run() - Terminal already restored");
            return Ok(());
        }
        restore()?;
        self.cleaned_up = true;
        Ok(())
    }
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>, io::Error> {
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, cursor::Hide)?;
    let backend = CrosstermBackend::new(stdout);
    Terminal::new(backend)
}

/// Main TUI interface component.
///
/// Manages terminal rendering, input handling, and game state display.
pub struct TuiInterface {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
    board: BoardView,
    state: TuiState,
    message: String,
    error_message: String,
    status: String,
    restore: TerminalRestore,
}

impl TuiInterface {
    pub fn new() -> Result<Self, io::Error> {
        info_log!("TuiInterface::new() - Initializing TUI");
        enable_raw_mode()?;
        let terminal = match setup_terminal() {
            Ok(terminal) => terminal,
            Err(e) => {
                // No value exists yet for Drop to clean up after
                log::warn!("Terminal setup failed, restoring: {e}");
                let mut stdout = io::stdout();
                let _ = execute!(stdout, LeaveAlternateScreen, cursor::Show);
                let _ = disable_raw_mode();
                return Err(e);
            }
        };
        info_log!("Terminal setup complete: raw mode, alternate screen, cursor hidden");

        Ok(Self {
            terminal,
            board: BoardView::default(),
            state: TuiState::Playing,
            message: String::new(),
            error_message: String::new(),
            status: "Type your first guess".to_string(),
            restore: TerminalRestore::default(),
        })
    }

    /// Leave raw mode and the alternate screen. Later calls do nothing.
    pub fn cleanup(&mut self) -> Result<(), io::Error> {
        let backend = self.terminal.backend_mut();
        self.restore.run(|| {
            disable_raw_mode()?;
            execute!(backend, LeaveAlternateScreen, cursor::Show)
        })
    }

    fn draw(&mut self) -> Result<(), io::Error> {
        let board = &self.board;
        let state = &self.state;
        let message = &self.message;
        let error_message = &self.error_message;
        let status = &self.status;

        self.terminal.draw(|f| {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Length(3),  // Title
                    Constraint::Length(14), // Grid
                    Constraint::Length(5),  // Keyboard
                    Constraint::Min(3),     // Messages
                    Constraint::Length(3),  // Status line
                    Constraint::Length(3),  // Instructions
                ])
                .split(f.area());

            render_title(f, chunks[0]);
            render_board(f, chunks[1], board);
            render_keyboard(f, chunks[2], &board.letters);
            render_messages(f, chunks[3], message, error_message);
            render_status(f, chunks[4], status);
            render_instructions(f, chunks[5], state);
        })?;
        Ok(())
    }

    /// Log and handle draw errors appropriately
    fn draw_or_log(&mut self) {
        if let Err(e) = self.draw() {
            debug_log!("Draw error: {}", e);
        }
    }

    /// Wait for the next key press, redrawing while idle.
    ///
    /// Non-key events and key releases are skipped.
    fn next_key(&mut self) -> Result<KeyEvent, io::Error> {
        loop {
            if !event::poll(std::time::Duration::from_millis(EVENT_POLL_TIMEOUT_MS))? {
                continue;
            }
            match event::read()? {
                Event::Key(key) if key.kind == event::KeyEventKind::Press => return Ok(key),
                Event::Resize(_, _) => self.draw()?,
                other => {
                    debug_log!("next_key() - Ignoring event: {:?}", other);
                }
            }
        }
    }

    fn has_modifier_keys(key: &KeyEvent) -> bool {
        key.modifiers.contains(event::KeyModifiers::ALT)
            || key.modifiers.contains(event::KeyModifiers::CONTROL)
    }

    fn map_key(&mut self, key: KeyEvent) -> Option<UserAction> {
        self.error_message.clear();
        match key.code {
            KeyCode::Esc => Some(UserAction::Exit),
            KeyCode::Char('c') if key.modifiers.contains(event::KeyModifiers::CONTROL) => {
                Some(UserAction::Exit)
            }
            _ if Self::has_modifier_keys(&key) => {
                debug_log!("map_key() - Ignoring key with modifier: {:?}", key.modifiers);
                None
            }
            KeyCode::Enter => Some(UserAction::Key(Key::Enter)),
            KeyCode::Backspace | KeyCode::Delete => Some(UserAction::Key(Key::Clear)),
            KeyCode::Char(c) if c.is_ascii_alphabetic() => {
                Some(UserAction::Key(Key::Letter(c.to_ascii_lowercase())))
            }
            KeyCode::Char(c) => {
                self.error_message = format!("Only letters are allowed! ('{c}' is not a letter)");
                None
            }
            _ => None,
        }
    }
}

fn render_title(f: &mut Frame, area: Rect) {
    let title = Paragraph::new("WORDLE")
        .style(HEADER_STYLE)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, area);
}

#[allow(clippy::cast_possible_truncation)]
fn render_board(f: &mut Frame, area: Rect, board: &BoardView) {
    let block = Block::default().title("Guesses").borders(Borders::ALL);
    let inner = block.inner(area);
    f.render_widget(block, area);

    for (row_index, row) in board.cells.iter().enumerate() {
        let y = inner.y + (row_index as u16 * ROW_SPACING);
        if y >= inner.y + inner.height {
            return;
        }

        let mut spans = Vec::new();
        for (col, (letter, feedback)) in row.iter().enumerate() {
            let (bg_color, fg_color) = feedback_colors(*feedback);
            let mut style = Style::default().fg(fg_color).bg(bg_color);
            if board.is_cell_active(row_index, col) {
                style = style.add_modifier(Modifier::REVERSED);
            }
            spans.push(Span::styled(format!(" {letter} "), style));
            spans.push(Span::raw(" "));
        }

        let paragraph = Paragraph::new(Line::from(spans)).alignment(Alignment::Center);
        f.render_widget(
            paragraph,
            Rect {
                x: inner.x,
                y,
                width: inner.width,
                height: 1,
            },
        );
    }
}

fn render_keyboard(f: &mut Frame, area: Rect, letters: &LetterStatus) {
    let lines: Vec<Line> = KEYBOARD_ROWS
        .iter()
        .map(|row| {
            let spans: Vec<Span> = row
                .chars()
                .flat_map(|key| {
                    let (bg_color, fg_color) = feedback_colors(letters.best(key));
                    [
                        Span::styled(
                            format!(" {key} "),
                            Style::default().fg(fg_color).bg(bg_color),
                        ),
                        Span::raw(" "),
                    ]
                })
                .collect();
            Line::from(spans)
        })
        .collect();

    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::default().title("Keyboard").borders(Borders::ALL));
    f.render_widget(paragraph, area);
}

fn render_messages(f: &mut Frame, area: Rect, message: &str, error_message: &str) {
    let mut lines = Vec::new();
    if !message.is_empty() {
        lines.extend(
            message
                .lines()
                .map(|line| Line::from(Span::styled(line.to_string(), MESSAGE_STYLE))),
        );
    }
    if !error_message.is_empty() {
        lines.push(Line::from(Span::styled(error_message.to_string(), ERROR_STYLE)));
    }
    let paragraph = Paragraph::new(lines)
        .block(Block::default().title("Information").borders(Borders::ALL));
    f.render_widget(paragraph, area);
}

fn render_status(f: &mut Frame, area: Rect, status: &str) {
    let status_text = if status.is_empty() { "Ready" } else { status };
    let paragraph = Paragraph::new(status_text)
        .style(SUCCESS_STYLE)
        .block(Block::default().borders(Borders::ALL).title("Status"));
    f.render_widget(paragraph, area);
}

fn render_instructions(f: &mut Frame, area: Rect, state: &TuiState) {
    let text = match state {
        TuiState::Playing => "Type letters | ENTER: Submit | BACKSPACE: Clear | ESC: Quit",
        TuiState::ConfirmingShare => "S / ENTER: Share score | any other key: Skip",
        TuiState::GameOver => "ESC: Quit",
    };
    let paragraph = Paragraph::new(text)
        .style(Style::default().fg(Color::Gray))
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(paragraph, area);
}

impl GameInterface for TuiInterface {
    fn render(&mut self, game: &Game) {
        self.board = BoardView::from_game(game);
        if self.state == TuiState::Playing {
            self.status = format!(
                "Guess {} of {}",
                (game.submitted_rows() + 1).min(game.max_attempts()),
                game.max_attempts()
            );
        }
        self.draw_or_log();
    }

    fn read_action(&mut self) -> UserAction {
        loop {
            self.draw_or_log();
            let key = match self.next_key() {
                Ok(key) => key,
                Err(e) => {
                    log::warn!("Failed to read terminal input: {e}");
                    return UserAction::Exit;
                }
            };
            debug_log!("read_action() - Key: code={:?}, modifiers={:?}", key.code, key.modifiers);
            if let Some(action) = self.map_key(key) {
                return action;
            }
        }
    }

    fn notify_won(&mut self, game: &Game) -> bool {
        self.state = TuiState::ConfirmingShare;
        self.message = "You won! 🎉 Congratulations! Share your score with your friends! 🤩".to_string();
        self.status = format!("Solved in {}/{}", game.submitted_rows(), game.max_attempts());
        self.draw_or_log();

        let share = match self.next_key() {
            Ok(key) => matches!(key.code, KeyCode::Char('s' | 'S') | KeyCode::Enter),
            Err(e) => {
                log::warn!("Failed to read terminal input: {e}");
                false
            }
        };
        info_log!("notify_won() - Share accepted: {}", share);

        self.state = TuiState::GameOver;
        if !share {
            self.message = "Come back tomorrow for a new word!".to_string();
        }
        self.draw_or_log();
        share
    }

    fn notify_lost(&mut self, game: &Game) {
        self.state = TuiState::GameOver;
        self.message = format!(
            "You lost! 😭 The word was: {}. Try again tomorrow 🤪",
            game.puzzle().to_string().to_uppercase()
        );
        self.status = "Game Over".to_string();
        self.draw_or_log();
    }

    fn notify_copied(&mut self, share: &str) {
        self.message = format!("Copied to clipboard 📋 You can now share it 🤩\n{share}");
        self.draw_or_log();
    }

    fn notify_copy_failed(&mut self, share: &str, error: &io::Error) {
        self.error_message = format!("Could not copy to clipboard: {error}");
        self.message = format!("Copy your score by hand:\n{share}");
        self.draw_or_log();
    }

    fn display_exit_message(&mut self) {
        self.status = "Exiting...".to_string();
        self.draw_or_log();
    }
}

impl Drop for TuiInterface {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}
