use criterion::{black_box, criterion_group, criterion_main, Criterion};
use world_explorer::{
    utils, ExplorationSession, GenerationConfig, Generator, InputState, ProfileManager,
    RecordingAudio, RecordingRenderer, RoomGenerator, SessionConfig,
};

fn room_generation(c: &mut Criterion) {
    let config = GenerationConfig::new(42);

    c.bench_function("plain room", |b| {
        let mut rng = utils::create_rng(&config);
        b.iter(|| RoomGenerator::new(false).generate(black_box(&config), &mut rng))
    });

    c.bench_function("beacon room", |b| {
        let mut rng = utils::create_rng(&config);
        b.iter(|| RoomGenerator::new(true).generate(black_box(&config), &mut rng))
    });
}

fn session_startup(c: &mut Criterion) {
    c.bench_function("session first tick", |b| {
        b.iter(|| {
            let mut profile = ProfileManager::in_memory();
            let mut session = ExplorationSession::new(
                SessionConfig::new(black_box(7)),
                &mut profile,
                RecordingRenderer::new(),
                RecordingAudio::new(),
            );
            session.tick(&mut InputState::new())
        })
    });
}

criterion_group!(benches, room_generation, session_startup);
criterion_main!(benches);
