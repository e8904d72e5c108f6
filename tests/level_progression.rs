use std::time::{Duration, Instant};

use neon_snake::audio::SilentAudio;
use neon_snake::food::Food;
use neon_snake::game::{GameState, GameStatus, TickOutcome};
use neon_snake::grid::Grid;
use neon_snake::score::{Leaderboard, ScoreStore};
use neon_snake::session::{Session, SessionConfig};

/// Puts food directly in front of the head so the next tick eats it.
fn force_food(state: &mut GameState) {
    let step = state.grid().cell_size();
    let ahead = state.snake.head().step(state.snake.next_direction(), step);
    state.food = Food::at(ahead);
}

fn eat(state: &mut GameState) -> TickOutcome {
    force_food(state);
    state.tick()
}

#[test]
fn five_meals_reach_level_two() {
    let mut state = GameState::new_with_seed(Grid::default(), 5);
    state.start();

    for expected in [10, 20, 30, 40] {
        assert_eq!(eat(&mut state), TickOutcome::AteFood { score: expected });
        assert_eq!(state.status(), GameStatus::Running);
    }
    assert_eq!(eat(&mut state), TickOutcome::LevelUp(2));

    assert_eq!(state.score, 50);
    assert_eq!(state.status(), GameStatus::LevelTransition(2));
    assert_eq!(state.snake.len(), 8);

    let base = Duration::from_millis(200);
    let before = state.tick_interval(base);
    assert!(state.acknowledge());
    assert_eq!(state.level, 2);
    assert_eq!(state.speed_multiplier(), 2);
    assert_eq!(state.tick_interval(base), before / 2);
}

#[test]
fn full_run_levels_up_twice_then_wins() {
    let mut state = GameState::new_with_seed(Grid::default(), 6);
    state.start();
    let mut outcomes = Vec::new();

    while !state.status().is_terminal() {
        let outcome = eat(&mut state);
        outcomes.push(outcome);
        if let TickOutcome::LevelUp(_) = outcome {
            assert!(state.acknowledge());
        }
        assert!(outcomes.len() <= 15, "run should end after fifteen meals");
    }

    assert_eq!(outcomes[4], TickOutcome::LevelUp(2));
    assert_eq!(outcomes[9], TickOutcome::LevelUp(3));
    assert_eq!(outcomes[14], TickOutcome::Won);
    assert_eq!(state.score, 150);
    assert_eq!(state.level, 3);
    assert_eq!(state.snake.len(), 18);
}

#[test]
fn score_only_changes_when_food_is_eaten() {
    let mut state = GameState::new_with_seed(Grid::default(), 8);
    state.start();
    state.food = Food::at(state.grid().cell_at(19, 0));

    for _ in 0..5 {
        assert_eq!(state.tick(), TickOutcome::Moved);
        assert_eq!(state.score, 0);
    }

    assert_eq!(eat(&mut state), TickOutcome::AteFood { score: 10 });
}

#[test]
fn session_restarts_driver_at_new_level_speed() {
    let t0 = Instant::now();
    let mut session = Session::new(
        SessionConfig {
            seed: Some(3),
            ..SessionConfig::default()
        },
        SilentAudio::new(),
        Leaderboard::new(),
    );
    session.start(t0);
    assert_eq!(session.tick_interval(), Duration::from_millis(200));

    for _ in 0..5 {
        force_food(session.state_mut());
        session.tick(t0);
    }
    assert_eq!(session.state().status(), GameStatus::LevelTransition(2));
    assert!(!session.is_ticking());
    assert_eq!(session.update(t0 + Duration::from_secs(1)), None);

    let resumed = t0 + Duration::from_secs(2);
    session.acknowledge(resumed);
    assert_eq!(session.tick_interval(), Duration::from_millis(100));
    assert_eq!(session.update(resumed + Duration::from_millis(99)), None);
    assert!(session.update(resumed + Duration::from_millis(100)).is_some());
}

#[test]
fn win_is_recorded_under_player_name() {
    let t0 = Instant::now();
    let mut session = Session::new(
        SessionConfig {
            seed: Some(4),
            player_name: "ada".to_owned(),
            ..SessionConfig::default()
        },
        SilentAudio::new(),
        Leaderboard::new(),
    );
    session.start(t0);

    while !session.state().status().is_terminal() {
        force_food(session.state_mut());
        if let TickOutcome::LevelUp(_) = session.tick(t0) {
            session.acknowledge(t0);
        }
    }

    assert_eq!(session.state().status(), GameStatus::Won);
    let entries = session.scores().entries();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].name, "ada");
    assert_eq!(entries[0].score, 150);
}
