//! Tests for scheduled computer moves.

use perfect_tictactoe::{GameController, GameEvent, GameMode, PlayConfig, Rejection, Turn};
use std::time::Duration;

fn config(mode: GameMode, delay_ms: u64) -> PlayConfig {
    PlayConfig::default().with_mode(mode).with_ai_delay_ms(delay_ms)
}

#[tokio::test]
async fn test_human_blocked_while_computer_thinks() {
    let (controller, _rx) = GameController::new(&config(GameMode::SinglePlayer, 20));
    assert!(controller.play(4).is_applied());
    assert_eq!(controller.snapshot().turn(), Turn::AiThinking);
    assert_eq!(controller.play(0).rejection(), Some(Rejection::AiThinking));

    controller.settle().await;
    let session = controller.snapshot();
    assert_eq!(session.history().len(), 3);
    assert!(matches!(session.turn(), Turn::Human(_)));
}

#[tokio::test]
async fn test_restart_discards_scheduled_move() {
    let (controller, mut rx) = GameController::new(&config(GameMode::SinglePlayer, 30));
    assert!(controller.play(0).is_applied());
    controller.restart();

    tokio::time::sleep(Duration::from_millis(80)).await;
    controller.settle().await;

    let session = controller.snapshot();
    assert_eq!(session.history().len(), 1);
    assert!(!session.is_ai_pending());

    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    assert_eq!(events.last(), Some(&GameEvent::StateChanged));
    assert_eq!(
        events.iter().filter(|e| matches!(e, GameEvent::MoveMade(_))).count(),
        1
    );
}

#[tokio::test]
async fn test_mode_switch_discards_scheduled_move() {
    let (controller, _rx) = GameController::new(&config(GameMode::SinglePlayer, 30));
    assert!(controller.play(0).is_applied());
    controller.switch_mode(GameMode::TwoPlayer);

    tokio::time::sleep(Duration::from_millis(80)).await;
    let session = controller.snapshot();
    assert_eq!(session.mode(), GameMode::TwoPlayer);
    assert_eq!(session.history().len(), 1);
}

#[tokio::test]
async fn test_jump_back_reschedules_from_new_position() {
    let (controller, _rx) = GameController::new(&config(GameMode::SinglePlayer, 0));
    assert!(controller.play(0).is_applied());
    controller.settle().await;
    assert!(controller.play(8).is_applied());
    controller.settle().await;
    assert_eq!(controller.snapshot().history().len(), 5);

    // Step 1 is O to move: the computer plays again and the old future goes.
    assert!(controller.jump_to(1).is_applied());
    controller.settle().await;

    let session = controller.snapshot();
    assert_eq!(session.history().len(), 3);
    assert_eq!(session.current_step(), 2);
}

#[tokio::test]
async fn test_game_over_event() {
    let (controller, mut rx) = GameController::new(&config(GameMode::TwoPlayer, 0));
    for cell in [0, 3, 1, 4, 2] {
        assert!(controller.play(cell).is_applied());
    }
    let mut last = None;
    while let Ok(event) = rx.try_recv() {
        last = Some(event);
    }
    assert!(matches!(last, Some(GameEvent::GameOver(outcome)) if outcome.winner().is_some()));
}

#[tokio::test]
async fn test_theme_toggle_does_not_touch_game() {
    let (controller, _rx) = GameController::new(&config(GameMode::TwoPlayer, 0));
    assert!(controller.play(4).is_applied());
    let before = controller.snapshot();
    controller.toggle_theme();
    let after = controller.snapshot();
    assert_ne!(before.theme(), after.theme());
    assert_eq!(before.history(), after.history());
}
