use chrono::{Duration, Utc};
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use fantasy_hoops::{
    bracket::{BestOf, BracketEngine, GameScore, TeamRef, TournamentConfig, snapshot},
    lineup::{Player, PlayerId, PlayerSource, Position, PositionQuota, validate_lineup},
};
use std::collections::HashSet;
use std::hint::black_box;

fn entrants(n: usize) -> Vec<TeamRef> {
    (0..n).map(|i| TeamRef::new(format!("team{}", i))).collect()
}

fn config(capacity: usize, best_of: u8) -> TournamentConfig {
    let cutoff = Utc::now() + Duration::days(1);
    TournamentConfig::new(
        "Bench Cup",
        capacity,
        BestOf::new(best_of).unwrap(),
        cutoff,
        cutoff,
    )
}

/// Helper to play every playable series in a round, team 1 sweeping
fn sweep_round(engine: &mut BracketEngine, round: usize) {
    let series: Vec<_> = engine.tournament().rounds[round]
        .series
        .iter()
        .filter(|s| s.is_playable() && !s.status.is_terminal())
        .map(|s| (s.id, s.team_1.team().unwrap().clone(), s.best_of.wins_required()))
        .collect();

    for (series_id, winner, wins) in series {
        for _ in 0..wins {
            let game = engine.schedule_game(series_id).unwrap();
            engine
                .record_game_result(series_id, game.id, winner.clone(), GameScore::new(110, 100))
                .unwrap();
        }
    }
}

/// Benchmark seeding brackets of increasing size, half filled with byes
fn bench_initialize_bracket(c: &mut Criterion) {
    let mut group = c.benchmark_group("initialize_bracket");

    for capacity in [8, 64, 256] {
        let teams = entrants(capacity / 2 + 1);
        group.bench_with_input(BenchmarkId::from_parameter(capacity), &capacity, |b, &cap| {
            b.iter(|| BracketEngine::initialize_bracket(config(cap, 3), black_box(teams.clone())));
        });
    }

    group.finish();
}

/// Benchmark playing a 64-team tournament through to the champion
fn bench_full_tournament(c: &mut Criterion) {
    let teams = entrants(64);

    c.bench_function("full_tournament_64", |b| {
        b.iter(|| {
            let mut engine = BracketEngine::initialize_bracket(config(64, 3), teams.clone()).unwrap();
            let rounds = engine.tournament().round_count();
            for round in 0..rounds {
                sweep_round(&mut engine, round);
                if round + 1 < rounds {
                    engine.advance_round(round).unwrap();
                }
            }
            black_box(engine.champion().cloned())
        });
    });
}

/// Benchmark encoding and decoding a mid-tournament snapshot
fn bench_snapshot(c: &mut Criterion) {
    let mut engine = BracketEngine::initialize_bracket(config(64, 3), entrants(64)).unwrap();
    sweep_round(&mut engine, 0);
    let bytes = snapshot::encode(engine.tournament()).unwrap();

    c.bench_function("snapshot_encode", |b| {
        b.iter(|| snapshot::encode(black_box(engine.tournament())));
    });

    c.bench_function("snapshot_decode", |b| {
        b.iter(|| snapshot::decode(black_box(&bytes)));
    });
}

/// Benchmark validating accepted and rejected lineups
fn bench_validate_lineup(c: &mut Criterion) {
    let quota = PositionQuota::default();
    let positions = [
        Position::Center,
        Position::Forward,
        Position::Guard,
        Position::Forward,
        Position::Guard,
    ];
    let valid: Vec<Player> = positions
        .iter()
        .enumerate()
        .map(|(i, &p)| Player::new(i as PlayerId + 1, format!("player{}", i), p, PlayerSource::MyRoster))
        .collect();
    let eligible: HashSet<PlayerId> = valid.iter().map(|p| p.id).collect();

    let mut invalid = valid.clone();
    invalid[0] = invalid[1].clone();
    invalid.push(Player::new(99, "free agent", Position::Guard, PlayerSource::FreeAgent));

    c.bench_function("validate_lineup_valid", |b| {
        b.iter(|| validate_lineup(black_box(&valid), &quota, 5, &eligible));
    });

    c.bench_function("validate_lineup_rejected", |b| {
        b.iter(|| validate_lineup(black_box(&invalid), &quota, 5, &eligible));
    });
}

criterion_group!(
    bracket_operations,
    bench_initialize_bracket,
    bench_full_tournament,
    bench_snapshot,
);

criterion_group!(lineup_validation, bench_validate_lineup);

criterion_main!(bracket_operations, lineup_validation);
