use criterion::{criterion_group, criterion_main, Criterion};

use varredura_core::{GameConfig, GameSession, TileState};

fn bench_expert_generation(c: &mut Criterion) {
    let config = GameConfig::new(30, 16, 0.20625).unwrap();

    c.bench_function("generate expert board", |b| {
        b.iter(|| {
            let mut game = GameSession::with_seed(config, 0xC0FFEE).unwrap();
            game.report((8, 15), TileState::Revealed).unwrap()
        })
    });
}

fn bench_large_flood(c: &mut Criterion) {
    let config = GameConfig::new(64, 64, 0.01).unwrap();

    c.bench_function("flood fill 64x64 sparse board", |b| {
        b.iter(|| {
            let mut game = GameSession::with_seed(config, 7).unwrap();
            game.report((32, 32), TileState::Revealed).unwrap()
        })
    });
}

criterion_group!(benches, bench_expert_generation, bench_large_flood);
criterion_main!(benches);
