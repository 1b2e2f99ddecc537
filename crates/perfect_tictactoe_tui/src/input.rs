//! Keyboard handling: cursor movement and key-to-action mapping.

use crossterm::event::KeyCode;
use perfect_tictactoe::Position;

/// What a key press asks the game to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Move the cursor.
    Cursor(Position),
    /// Play a square.
    Play(Position),
    /// Show the previous step.
    StepBack,
    /// Show the next step.
    StepForward,
    /// Show the empty board.
    FirstStep,
    /// Show the latest step.
    LastStep,
    /// Switch between single and two player.
    SwitchMode,
    /// Start over.
    Restart,
    /// Flip light/dark.
    ToggleTheme,
    /// Leave.
    Quit,
}

/// Moves the cursor one square with the arrow keys, stopping at the edges.
pub fn move_cursor(cursor: Position, key: KeyCode) -> Position {
    let (row, col) = (cursor.row(), cursor.col());
    let (row, col) = match key {
        KeyCode::Up => (row.saturating_sub(1), col),
        KeyCode::Down => ((row + 1).min(2), col),
        KeyCode::Left => (row, col.saturating_sub(1)),
        KeyCode::Right => (row, (col + 1).min(2)),
        _ => (row, col),
    };
    Position::from_index(row * 3 + col).unwrap_or(cursor)
}

/// Maps a key to an action, given where the cursor is.
pub fn action_for(cursor: Position, key: KeyCode) -> Option<Action> {
    match key {
        KeyCode::Up | KeyCode::Down | KeyCode::Left | KeyCode::Right => {
            Some(Action::Cursor(move_cursor(cursor, key)))
        }
        KeyCode::Enter | KeyCode::Char(' ') => Some(Action::Play(cursor)),
        // Squares are numbered 1-9 on screen.
        KeyCode::Char(c @ '1'..='9') => c
            .to_digit(10)
            .and_then(|d| Position::from_index(d as usize - 1))
            .map(Action::Play),
        KeyCode::Char('[') => Some(Action::StepBack),
        KeyCode::Char(']') => Some(Action::StepForward),
        KeyCode::Home => Some(Action::FirstStep),
        KeyCode::End => Some(Action::LastStep),
        KeyCode::Char('m') => Some(Action::SwitchMode),
        KeyCode::Char('r') => Some(Action::Restart),
        KeyCode::Char('t') => Some(Action::ToggleTheme),
        KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
        _ => None,
    }
}
