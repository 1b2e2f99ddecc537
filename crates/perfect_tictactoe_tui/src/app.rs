//! Application state and key handling.

use crate::input::{action_for, Action};
use crossterm::event::KeyCode;
use perfect_tictactoe::{GameController, GameEvent, Position};
use tracing::debug;

/// UI state kept between frames. The game itself lives in the controller.
#[derive(Debug)]
pub struct App {
    cursor: Position,
    message: Option<String>,
    should_quit: bool,
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl App {
    /// Creates a new application with the cursor in the centre.
    pub fn new() -> Self {
        Self {
            cursor: Position::Center,
            message: None,
            should_quit: false,
        }
    }

    /// The highlighted square.
    pub fn cursor(&self) -> Position {
        self.cursor
    }

    /// The latest notice (last move, rejection, thinking), if any.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// True once the user asked to leave.
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Handles a game event from the controller.
    pub fn handle_event(&mut self, event: &GameEvent) {
        debug!(?event, "Handling game event");

        self.message = match event {
            GameEvent::StateChanged => None,
            GameEvent::AiThinking => Some("Computer is thinking...".to_string()),
            GameEvent::MoveMade(mv) => Some(format!("{} played {}", mv.mark, mv.position.label())),
            GameEvent::GameOver(outcome) => Some(format!(
                "{}. Press 'r' to restart or 'q' to quit.",
                outcome
            )),
        };
    }

    /// Applies a key press to the game.
    pub fn handle_key(&mut self, key: KeyCode, controller: &GameController) {
        let Some(action) = action_for(self.cursor, key) else {
            return;
        };
        debug!(?action, "Key action");

        let session = controller.snapshot();
        let step = session.current_step();
        let transition = match action {
            Action::Cursor(pos) => {
                self.cursor = pos;
                None
            }
            Action::Play(pos) => {
                self.cursor = pos;
                Some(controller.play(pos.to_index()))
            }
            Action::StepBack => step.checked_sub(1).map(|s| controller.jump_to(s)),
            Action::StepForward => Some(controller.jump_to(step + 1)),
            Action::FirstStep => Some(controller.jump_to(0)),
            Action::LastStep => Some(controller.jump_to(session.history().len() - 1)),
            Action::SwitchMode => {
                controller.switch_mode(session.mode().toggle());
                None
            }
            Action::Restart => {
                controller.restart();
                None
            }
            Action::ToggleTheme => {
                controller.toggle_theme();
                None
            }
            Action::Quit => {
                self.should_quit = true;
                None
            }
        };

        if let Some(reason) = transition.and_then(|t| t.rejection()) {
            self.message = Some(reason.to_string());
        }
    }
}
