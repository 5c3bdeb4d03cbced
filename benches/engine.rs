//! Engine throughput benchmarks.
//!
//! Run with `cargo bench`. Playouts are seeded so runs are comparable.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use morris_engine::{new_game, Action, Game, PlayerKind, Position};
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

const MAX_ACTIONS: usize = 400;

/// Play random legal actions until the game ends or the cap is reached.
fn random_playout(seed: u64) -> Game {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut game = new_game("A", "B", PlayerKind::Ai).expect("default config is valid");

    for _ in 0..MAX_ACTIONS {
        let legal = game.legal_actions();
        let Some(&action) = legal.choose(&mut rng) else {
            break;
        };
        game.submit_action(action).expect("legal action accepted");
    }

    game
}

fn midgame() -> Game {
    let mut game = new_game("A", "B", PlayerKind::Ai).expect("default config is valid");
    for i in [4, 18, 2, 8, 3, 15, 14, 22, 12, 16, 19, 1, 7, 0, 6, 9, 10, 5] {
        let position = Position::new(i).expect("valid index");
        game.submit_action(Action::place(position))
            .expect("quiet placement");
    }
    game
}

fn bench_legal_actions(c: &mut Criterion) {
    let opening = new_game("A", "B", PlayerKind::Ai).expect("default config is valid");
    let moving = midgame();

    c.bench_function("legal_actions_placing", |b| {
        b.iter(|| black_box(&opening).legal_actions())
    });
    c.bench_function("legal_actions_moving", |b| {
        b.iter(|| black_box(&moving).legal_actions())
    });
}

fn bench_game_clone(c: &mut Criterion) {
    let game = random_playout(7);

    c.bench_function("game_clone", |b| b.iter(|| black_box(&game).clone()));
}

fn bench_random_playout(c: &mut Criterion) {
    let mut seed = 0;
    c.bench_function("random_playout", |b| {
        b.iter(|| {
            seed += 1;
            random_playout(black_box(seed))
        })
    });
}

criterion_group!(
    benches,
    bench_legal_actions,
    bench_game_clone,
    bench_random_playout
);
criterion_main!(benches);
