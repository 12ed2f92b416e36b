use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;
use torus_snake::{Direction, GameConfig, GameSession};

fn bench_tick_default_board() {
    let config = GameConfig::default();
    let mut session = GameSession::with_seed(&config, 42).unwrap();
    for step in 0..200 {
        if step % 5 == 0 {
            session.set_input(if step % 10 == 0 { Direction::Down } else { Direction::Right });
        }
        let _ = black_box(session.tick());
    }
}

fn bench_tick_large_board() {
    let config = GameConfig {
        columns: 100,
        rows: 100,
        item_spawn_chance: 1.0,
        ..GameConfig::default()
    };
    let mut session = GameSession::with_seed(&config, 7).unwrap();
    for _ in 0..200 {
        let _ = black_box(session.tick());
    }
}

fn criterion_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("session");
    group.bench_function("tick_200_default_board", |b| b.iter(bench_tick_default_board));
    group.bench_function("tick_200_large_board", |b| b.iter(bench_tick_large_board));
    group.finish();
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
