//! Properties every session must satisfy between operations.
//!
//! Checked after each applied transition in debug builds, and testable one
//! at a time.

use super::GameSession;
use crate::{Mark, Position, Square};

/// A logical property that must hold for a given state.
pub trait Invariant<S> {
    /// Checks if the invariant holds for the given state.
    fn holds(state: &S) -> bool;

    /// Human-readable description of the invariant.
    fn description() -> &'static str;
}

/// Violation of an invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub description: String,
}

impl InvariantViolation {
    /// Creates a new invariant violation.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

/// A set of invariants that can be checked together.
pub trait InvariantSet<S> {
    /// Checks all invariants in the set, collecting every violation.
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>>;
}

fn check<S, I: Invariant<S>>(state: &S, violations: &mut Vec<InvariantViolation>) {
    if !I::holds(state) {
        violations.push(InvariantViolation::new(I::description()));
    }
}

fn finish(violations: Vec<InvariantViolation>) -> Result<(), Vec<InvariantViolation>> {
    if violations.is_empty() {
        Ok(())
    } else {
        Err(violations)
    }
}

impl<S, I1, I2, I3> InvariantSet<S> for (I1, I2, I3)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
    I3: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let mut violations = Vec::new();
        check::<S, I1>(state, &mut violations);
        check::<S, I2>(state, &mut violations);
        check::<S, I3>(state, &mut violations);
        finish(violations)
    }
}

impl<S, I1, I2> InvariantSet<S> for (I1, I2)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let mut violations = Vec::new();
        check::<S, I1>(state, &mut violations);
        check::<S, I2>(state, &mut violations);
        finish(violations)
    }
}

/// History is never empty and the displayed step exists.
pub struct StepInBounds;

impl Invariant<GameSession> for StepInBounds {
    fn holds(session: &GameSession) -> bool {
        !session.history.is_empty() && session.current_step < session.history.len()
    }

    fn description() -> &'static str {
        "Displayed step lies inside a non-empty history"
    }
}

/// Each step keeps every earlier mark and adds exactly one.
pub struct GrowingHistory;

impl Invariant<GameSession> for GrowingHistory {
    fn holds(session: &GameSession) -> bool {
        let starts_empty = session
            .history
            .first()
            .is_some_and(|entry| entry.board.occupied() == 0);

        starts_empty
            && session.history.windows(2).all(|pair| {
                let (before, after) = (&pair[0].board, &pair[1].board);
                let kept = Position::ALL.iter().all(|pos| {
                    before.get(*pos) == Square::Empty || before.get(*pos) == after.get(*pos)
                });
                kept && after.occupied() == before.occupied() + 1
            })
    }

    fn description() -> &'static str {
        "Every step adds exactly one mark to the step before"
    }
}

/// X moves on even steps, O on odd ones, and each step's mark is the one
/// the previous step said was next.
pub struct AlternatingTurns;

impl Invariant<GameSession> for AlternatingTurns {
    fn holds(session: &GameSession) -> bool {
        let parity = session.history.iter().enumerate().all(|(step, entry)| {
            let expected = if step % 2 == 0 { Mark::X } else { Mark::O };
            entry.next == expected
        });

        parity
            && session.history.windows(2).all(|pair| {
                let (before, after) = (&pair[0], &pair[1]);
                Position::ALL
                    .iter()
                    .find(|pos| before.board.get(**pos) != after.board.get(**pos))
                    .is_some_and(|pos| after.board.get(*pos) == Square::Occupied(before.next))
            })
    }

    fn description() -> &'static str {
        "Players alternate, starting with X"
    }
}

/// All session invariants as a composable set.
pub type SessionInvariants = (StepInBounds, GrowingHistory, AlternatingTurns);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{GameMode, HistoryEntry};

    fn played(moves: &[usize]) -> GameSession {
        let mut session = GameSession::new(GameMode::TwoPlayer);
        for &cell in moves {
            session.play_move(cell, false);
        }
        session
    }

    #[test]
    fn test_invariant_set_holds_for_new_game() {
        assert!(SessionInvariants::check_all(&GameSession::default()).is_ok());
    }

    #[test]
    fn test_invariant_set_holds_after_moves_and_jumps() {
        let mut session = played(&[0, 4, 8, 2]);
        session.jump_to(2);
        session.play_move(6, false);
        assert!(SessionInvariants::check_all(&session).is_ok());
    }

    #[test]
    fn test_step_out_of_bounds_detected() {
        let mut session = played(&[0]);
        session.current_step = 5;
        assert!(!StepInBounds::holds(&session));
    }

    #[test]
    fn test_overwritten_mark_detected() {
        let mut session = played(&[0, 4]);
        let last = session.history.len() - 1;
        session.history[last].board.set(Position::TopLeft, Square::Occupied(Mark::O));
        assert!(!GrowingHistory::holds(&session));
    }

    #[test]
    fn test_double_move_detected() {
        let mut session = played(&[0]);
        let board = session.history[1]
            .board
            .with_mark(Position::Center, Mark::X)
            .with_mark(Position::BottomRight, Mark::O);
        session.history.push(HistoryEntry { board, next: Mark::X });

        let violations = SessionInvariants::check_all(&session).unwrap_err();
        assert_eq!(violations.len(), 2);
    }

    #[test]
    fn test_wrong_mark_detected() {
        let mut session = played(&[0]);
        let board = session.history[1].board.with_mark(Position::Center, Mark::X);
        session.history.push(HistoryEntry { board, next: Mark::X });

        type TwoInvariants = (GrowingHistory, AlternatingTurns);
        assert!(GrowingHistory::holds(&session));
        assert!(!AlternatingTurns::holds(&session));
        assert!(TwoInvariants::check_all(&session).is_err());
    }
}
