use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

use league_stats_terminal::aggregate::{aggregate, position_shares};
use league_stats_terminal::model::{parse_leaderboard_json, parse_teams_json};

const TEAMS_JSON: &str = include_str!("../tests/fixtures/data/serie-a-data.json");
const LEADERBOARD_JSON: &str = include_str!("../tests/fixtures/data/serie-a-leaderboard.json");

fn twenty_team_distribution() -> Vec<u64> {
    (0..20u64).map(|idx| 10_000 / (idx + 1)).collect()
}

fn bench_aggregate(c: &mut Criterion) {
    let positions = twenty_team_distribution();
    c.bench_function("aggregate_20_positions", |b| {
        b.iter(|| {
            let probs = aggregate(black_box(&positions));
            black_box(probs.total);
        })
    });
    c.bench_function("position_shares_20_positions", |b| {
        b.iter(|| {
            let shares = position_shares(black_box(&positions));
            black_box(shares.len());
        })
    });
}

fn bench_parse(c: &mut Criterion) {
    c.bench_function("teams_parse", |b| {
        b.iter(|| {
            let teams = parse_teams_json(black_box(TEAMS_JSON)).unwrap();
            black_box(teams.len());
        })
    });
    c.bench_function("leaderboard_parse", |b| {
        b.iter(|| {
            let rows = parse_leaderboard_json(black_box(LEADERBOARD_JSON)).unwrap();
            black_box(rows.len());
        })
    });
}

criterion_group!(benches, bench_aggregate, bench_parse);
criterion_main!(benches);
