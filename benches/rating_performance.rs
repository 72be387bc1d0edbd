//! Performance benchmarks for rating calculations

use chrono::{Duration, TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use glicko_period::competitor::{Competitor, Player, Team};
use glicko_period::matchup::Match;
use glicko_period::rating::{EstimationState, Rating};

fn bench_batch_update(c: &mut Criterion) {
    let rating = Rating::new(1500.0, 200.0, 0.06);
    let opponents = vec![
        Rating::new(1400.0, 30.0, 0.06),
        Rating::new(1550.0, 100.0, 0.06),
        Rating::new(1700.0, 300.0, 0.06),
    ];
    let scores = vec![1.0, 0.0, 0.0];

    c.bench_function("batch_update_3_opponents", |b| {
        b.iter(|| {
            black_box(
                rating
                    .update(black_box(&opponents), black_box(&scores), 0.5)
                    .unwrap(),
            )
        })
    });
}

fn bench_period_close(c: &mut Criterion) {
    let opponents: Vec<Rating> = (0..15)
        .map(|i| Rating::new(1350.0 + 20.0 * i as f64, 80.0 + 10.0 * i as f64, 0.06))
        .collect();

    c.bench_function("fix_after_15_matches", |b| {
        b.iter(|| {
            let mut state = EstimationState::new(Rating::new(1500.0, 120.0, 0.06));
            for (i, opponent) in opponents.iter().enumerate() {
                let score = if i % 3 == 0 { 0.0 } else { 1.0 };
                state.apply_match(opponent, score).unwrap();
            }
            state.fix(0.5).unwrap();
            black_box(state.rating())
        })
    });

    c.bench_function("idle_period_decay", |b| {
        b.iter(|| {
            let mut state = EstimationState::new(Rating::new(1500.0, 50.0, 0.06));
            state.fix(black_box(0.5)).unwrap();
            black_box(state.rating())
        })
    });
}

fn bench_team_match(c: &mut Criterion) {
    let start = Utc.with_ymd_and_hms(2019, 5, 1, 0, 0, 0).unwrap();
    let roster = |prefix: &str, base: f64| -> Vec<Player> {
        (0..4)
            .map(|i| {
                Player::new(
                    format!("{}{}", prefix, i),
                    Rating::new(base + 25.0 * i as f64, 150.0, 0.06),
                    start,
                )
            })
            .collect()
    };

    c.bench_function("team_match_4v4_plus_solo", |b| {
        b.iter(|| {
            let mut home = Team::new("home", roster("h", 1500.0)).unwrap();
            let mut away = Team::new("away", roster("a", 1450.0)).unwrap();
            let mut solo = Player::new("solo", Rating::new(1600.0, 90.0, 0.06), start);

            Match::new(start + Duration::weeks(2))
                .join(&mut home, 2.0)
                .join(&mut away, 1.0)
                .join(&mut solo, 0.0)
                .apply(Duration::weeks(1), 0.5)
                .unwrap();

            black_box(home.rating())
        })
    });
}

criterion_group!(
    benches,
    bench_batch_update,
    bench_period_close,
    bench_team_match
);
criterion_main!(benches);
