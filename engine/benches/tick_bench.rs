use std::time::Duration;

use criterion::{Criterion, SamplingMode, criterion_group, criterion_main};

use snake_engine::game::{
    Difficulty, GameLogic, GameSettings, SessionRng, TickStatus, WallCollisionMode,
};
use snake_engine::profiles::MemoryProfileStore;

fn new_game(seed: u64) -> GameLogic {
    let mut settings = GameSettings::for_difficulty(Difficulty::Hard);
    settings.wall_collision_mode = WallCollisionMode::WrapAround;
    GameLogic::new(settings, Box::new(MemoryProfileStore::new()), SessionRng::new(seed))
        .expect("preset settings are valid")
}

fn bench_thousand_ticks() {
    let mut game = new_game(42);
    let mut now = 0u64;
    for _ in 0..1_000 {
        now += 50;
        game.update_at(now);
        if game.handle_move_at(now).status != TickStatus::Ok {
            game.reset().expect("preset settings are valid");
        }
    }
}

fn bench_snapshot() {
    let game = new_game(42);
    let snapshot = game.snapshot();
    assert!(!snapshot.game_over);
}

fn tick_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("engine");

    group
        .sampling_mode(SamplingMode::Flat)
        .sample_size(20)
        .measurement_time(Duration::from_secs(20));

    group.bench_function("thousand_ticks", |b| b.iter(bench_thousand_ticks));

    group.bench_function("snapshot", |b| b.iter(bench_snapshot));

    group.finish();
}

criterion_group!(benches, tick_bench);
criterion_main!(benches);
