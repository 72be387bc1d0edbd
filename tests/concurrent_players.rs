//! Concurrency tests for independent and shared competitors
//!
//! Different competitors share nothing and can be updated in parallel; a
//! competitor shared between threads is serialized by the caller.

mod fixtures;

use glicko_period::competitor::{Competitor, Player};
use glicko_period::rating::Rating;
use std::sync::Mutex;
use std::thread;

use fixtures::{assert_close, create_test_player, init_tracing, weekly_config, week_time};

fn opponents() -> Vec<Rating> {
    (0..8)
        .map(|i| Rating::new(1300.0 + 50.0 * i as f64, 60.0 + 20.0 * i as f64, 0.06))
        .collect()
}

fn season(player: &mut Player, opponents: &[Rating]) {
    let config = weekly_config();
    for week in 0..4 {
        player
            .prepare(week_time(week, 1), config.rating_period(), config.tau)
            .unwrap();
        for (i, opponent) in opponents.iter().enumerate() {
            let score = if (i as i64 + week) % 2 == 0 { 1.0 } else { 0.0 };
            player.apply_match(opponent, score).unwrap();
        }
    }
}

#[test]
fn test_independent_players_in_parallel() {
    init_tracing();
    let opponents = opponents();

    let mut parallel: Vec<Player> = (0..8)
        .map(|i| create_test_player(&format!("player{}", i), 1400.0 + 25.0 * i as f64, 150.0))
        .collect();
    let mut sequential = parallel.clone();

    thread::scope(|scope| {
        for player in parallel.iter_mut() {
            let opponents = &opponents;
            scope.spawn(move || season(player, opponents));
        }
    });
    for player in sequential.iter_mut() {
        season(player, &opponents);
    }

    assert_eq!(parallel, sequential);
}

#[test]
fn test_shared_player_behind_mutex() {
    init_tracing();
    let opponents = opponents();
    let shared = Mutex::new(create_test_player("shared", 1500.0, 200.0));

    thread::scope(|scope| {
        for opponent in &opponents {
            let shared = &shared;
            scope.spawn(move || {
                let mut player = shared.lock().unwrap();
                player.apply_match(opponent, 1.0).unwrap();
            });
        }
    });

    let mut expected = create_test_player("expected", 1500.0, 200.0);
    for opponent in &opponents {
        expected.apply_match(opponent, 1.0).unwrap();
    }

    let player = shared.into_inner().unwrap();
    assert_eq!(player.games().wins, opponents.len() as u64);
    assert_close(
        player.estimation().accuracy(),
        expected.estimation().accuracy(),
        1e-12,
    );
    assert_close(
        player.estimation().improvement(),
        expected.estimation().improvement(),
        1e-12,
    );
}
