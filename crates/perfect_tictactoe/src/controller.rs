//! Drives a [`GameSession`] for an interactive front-end.
//!
//! Every user action is one transition under the session lock. When a
//! transition leaves the computer to move, a Tokio task is spawned that
//! waits for the configured delay and then plays the move. Resets and jumps
//! move the session to a new generation, which turns any task still in
//! flight into a no-op; the task is aborted as well.
//!
//! Action methods spawn onto the current Tokio runtime and must be called
//! from within one.

use crate::config::PlayConfig;
use crate::rules::Outcome;
use crate::search::SearchKind;
use crate::session::{GameMode, GameSession, Move, Theme, Transition};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument};

/// Messages sent from the controller to the UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    /// Something other than a move changed (jump, reset, theme).
    StateChanged,
    /// The computer's move is scheduled.
    AiThinking,
    /// A mark was placed.
    MoveMade(Move),
    /// The displayed board is decided.
    GameOver(Outcome),
}

/// Owns a session and schedules computer moves for it.
#[derive(Debug)]
pub struct GameController {
    session: Arc<Mutex<GameSession>>,
    search: SearchKind,
    delay: Duration,
    events: mpsc::UnboundedSender<GameEvent>,
    pending: Mutex<Option<JoinHandle<()>>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

fn publish_move(session: &GameSession, events: &mpsc::UnboundedSender<GameEvent>) {
    if let Some(mv) = session.move_at(session.current_step()) {
        let _ = events.send(GameEvent::MoveMade(mv));
    }
    let outcome = session.outcome();
    if outcome.is_terminal() {
        info!(%outcome, "Game over");
        let _ = events.send(GameEvent::GameOver(outcome));
    }
}

impl GameController {
    /// Creates a controller for a fresh game and the receiving end of its
    /// event channel.
    #[instrument(skip(config), fields(mode = %config.mode(), search = %config.search()))]
    pub fn new(config: &PlayConfig) -> (Self, mpsc::UnboundedReceiver<GameEvent>) {
        let (events, rx) = mpsc::unbounded_channel();
        let session = GameSession::new(*config.mode()).with_theme(*config.theme());
        let controller = Self {
            session: Arc::new(Mutex::new(session)),
            search: *config.search(),
            delay: config.ai_delay(),
            events,
            pending: Mutex::new(None),
        };
        (controller, rx)
    }

    /// A copy of the current session.
    pub fn snapshot(&self) -> GameSession {
        lock(&self.session).clone()
    }

    /// Plays a human move.
    #[instrument(skip(self))]
    pub fn play(&self, cell_index: usize) -> Transition {
        let mut session = lock(&self.session);
        let transition = session.play_move(cell_index, false);
        if transition.is_applied() {
            publish_move(&session, &self.events);
            self.schedule_ai(&mut session);
        }
        transition
    }

    /// Displays an earlier (or later) step of the history.
    #[instrument(skip(self))]
    pub fn jump_to(&self, step: usize) -> Transition {
        let mut session = lock(&self.session);
        let transition = session.jump_to(step);
        if transition.is_applied() {
            self.cancel_pending();
            let _ = self.events.send(GameEvent::StateChanged);
            self.schedule_ai(&mut session);
        }
        transition
    }

    /// Switches mode, which always starts a new game.
    #[instrument(skip(self))]
    pub fn switch_mode(&self, mode: GameMode) {
        let mut session = lock(&self.session);
        session.switch_mode(mode);
        self.cancel_pending();
        let _ = self.events.send(GameEvent::StateChanged);
        self.schedule_ai(&mut session);
    }

    /// Starts a new game in the current mode.
    #[instrument(skip(self))]
    pub fn restart(&self) {
        let mut session = lock(&self.session);
        session.restart();
        self.cancel_pending();
        let _ = self.events.send(GameEvent::StateChanged);
        self.schedule_ai(&mut session);
    }

    /// Flips the theme.
    pub fn toggle_theme(&self) -> Theme {
        let theme = lock(&self.session).toggle_theme();
        let _ = self.events.send(GameEvent::StateChanged);
        theme
    }

    /// Waits until no computer move is outstanding.
    pub async fn settle(&self) {
        loop {
            let Some(handle) = lock(&self.pending).take() else {
                return;
            };
            if let Err(e) = handle.await {
                debug!(error = %e, "Computer move task ended early");
            }
        }
    }

    fn cancel_pending(&self) {
        if let Some(handle) = lock(&self.pending).take() {
            debug!("Aborting scheduled computer move");
            handle.abort();
        }
    }

    fn schedule_ai(&self, session: &mut GameSession) {
        let Some(ticket) = session.begin_ai_turn() else {
            return;
        };
        let _ = self.events.send(GameEvent::AiThinking);

        let shared = Arc::clone(&self.session);
        let events = self.events.clone();
        let search = self.search;
        let delay = self.delay;
        let handle = tokio::spawn(async move {
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
            let mut session = lock(&shared);
            let transition = session.complete_ai_turn(ticket, &search);
            match transition {
                Transition::Applied => publish_move(&session, &events),
                Transition::Rejected(reason) => {
                    debug!(%reason, generation = ticket.generation(), "Computer move dropped");
                }
            }
        });

        if let Some(previous) = lock(&self.pending).replace(handle) {
            previous.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn instant(mode: GameMode) -> PlayConfig {
        PlayConfig::default().with_mode(mode).with_ai_delay_ms(0)
    }

    #[tokio::test]
    async fn test_computer_replies_to_human() {
        let (controller, mut rx) = GameController::new(&instant(GameMode::SinglePlayer));
        assert!(controller.play(0).is_applied());
        assert_eq!(controller.snapshot().history().len(), 2);

        controller.settle().await;
        let session = controller.snapshot();
        assert_eq!(session.history().len(), 3);
        assert_eq!(session.current_step(), 2);
        assert!(!session.is_ai_pending());

        assert!(matches!(rx.recv().await, Some(GameEvent::MoveMade(_))));
        assert_eq!(rx.recv().await, Some(GameEvent::AiThinking));
        assert!(matches!(rx.recv().await, Some(GameEvent::MoveMade(mv)) if mv.mark == crate::Mark::O));
    }

    #[tokio::test]
    async fn test_two_player_never_schedules() {
        let (controller, _rx) = GameController::new(&instant(GameMode::TwoPlayer));
        assert!(controller.play(4).is_applied());
        assert!(controller.play(0).is_applied());
        controller.settle().await;
        assert_eq!(controller.snapshot().history().len(), 3);
    }
}
