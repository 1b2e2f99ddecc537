//! Tests for the game session state machine.

use perfect_tictactoe::{
    GameMode, GameSession, InvariantSet, Mark, Outcome, Position, Rejection, SearchKind,
    SessionInvariants, Transition, Turn,
};

fn play_all(session: &mut GameSession, cells: &[usize]) {
    for &cell in cells {
        assert_eq!(session.play_move(cell, false), Transition::Applied, "cell {cell}");
    }
}

#[test]
fn test_single_player_scenario() {
    let mut session = GameSession::new(GameMode::SinglePlayer);
    play_all(&mut session, &[0]);
    assert_eq!(session.history().len(), 2);
    assert_eq!(session.turn(), Turn::AwaitingAi);

    let ticket = session.begin_ai_turn().expect("computer to move");
    assert!(session.complete_ai_turn(ticket, &SearchKind::AlphaBeta).is_applied());

    assert_eq!(session.history().len(), 3);
    assert_eq!(session.current_step(), session.history().len() - 1);
    assert_eq!(session.outcome(), Outcome::Ongoing);
    assert_eq!(session.turn(), Turn::Human(Mark::X));
}

#[test]
fn test_branching_discards_superseded_future() {
    let mut session = GameSession::new(GameMode::TwoPlayer);
    play_all(&mut session, &[0, 4, 8]);
    assert_eq!(session.history().len(), 4);

    session.jump_to(1);
    play_all(&mut session, &[5]);

    assert_eq!(session.history().len(), 3);
    assert_eq!(session.current_step(), 2);
    let step_one = session.history()[1].board;
    assert_eq!(session.board(), &step_one.with_mark(Position::MiddleRight, Mark::O));
    assert!(session.board().is_empty(Position::BottomRight));
    assert!(SessionInvariants::check_all(&session).is_ok());
}

#[test]
fn test_jump_back_without_moving_keeps_future() {
    let mut session = GameSession::new(GameMode::TwoPlayer);
    play_all(&mut session, &[0, 4, 8]);
    session.jump_to(0);
    assert_eq!(session.history().len(), 4);
    assert_eq!(session.board().occupied(), 0);
    session.jump_to(3);
    assert_eq!(session.board().occupied(), 3);
}

#[test]
fn test_rejections_leave_session_unchanged() {
    let mut session = GameSession::new(GameMode::TwoPlayer);
    // X wins the left column.
    play_all(&mut session, &[0, 1, 3, 2, 6]);
    assert_eq!(session.outcome().winner(), Some(Mark::X));

    let before = session.clone();
    assert_eq!(session.play_move(8, false).rejection(), Some(Rejection::GameOver));
    assert_eq!(session, before);

    session.jump_to(2);
    let before = session.clone();
    assert_eq!(
        session.play_move(0, false).rejection(),
        Some(Rejection::SquareOccupied(Position::TopLeft))
    );
    assert_eq!(session, before);
}

#[test]
fn test_draw_reported() {
    let mut session = GameSession::new(GameMode::TwoPlayer);
    // X O X / X O O / O X X
    play_all(&mut session, &[0, 1, 2, 4, 3, 5, 7, 6, 8]);
    assert_eq!(session.outcome(), Outcome::Draw);
    assert_eq!(session.status_line(), "Draw");
    assert_eq!(session.turn(), Turn::Finished(Outcome::Draw));
}

#[test]
fn test_jump_cancels_pending_computer_move() {
    let mut session = GameSession::new(GameMode::SinglePlayer);
    play_all(&mut session, &[4]);
    let ticket = session.begin_ai_turn().expect("computer to move");

    session.jump_to(0);
    assert!(!session.is_ai_pending());
    assert_eq!(
        session.complete_ai_turn(ticket, &SearchKind::Exhaustive).rejection(),
        Some(Rejection::StaleAiMove)
    );
    assert_eq!(session.current_step(), 0);
    assert_eq!(session.history().len(), 2);
}

#[test]
fn test_jump_to_computer_turn_needs_new_ticket() {
    let mut session = GameSession::new(GameMode::SinglePlayer);
    play_all(&mut session, &[4]);
    let stale = session.begin_ai_turn().expect("computer to move");
    session.jump_to(1);

    assert!(session.needs_ai_move());
    let fresh = session.begin_ai_turn().expect("computer to move again");
    assert_ne!(stale.generation(), fresh.generation());
    assert!(!session.complete_ai_turn(stale, &SearchKind::AlphaBeta).is_applied());
    assert!(session.complete_ai_turn(fresh, &SearchKind::AlphaBeta).is_applied());
}

#[test]
fn test_switch_mode_during_ai_turn() {
    let mut session = GameSession::new(GameMode::SinglePlayer);
    play_all(&mut session, &[0]);
    let ticket = session.begin_ai_turn().expect("computer to move");

    session.switch_mode(GameMode::TwoPlayer);
    assert_eq!(
        session.complete_ai_turn(ticket, &SearchKind::AlphaBeta).rejection(),
        Some(Rejection::StaleAiMove)
    );
    assert_eq!(session.history().len(), 1);
    assert_eq!(session.mode(), GameMode::TwoPlayer);
    assert!(!session.needs_ai_move());
}
