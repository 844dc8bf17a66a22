use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use rand::{rngs::StdRng, SeedableRng};
use std::hint::black_box;
use tile_merge::engine::{self, Board, Move};
use tile_merge::session::GameSession;
use tile_merge::config::SessionConfig;

fn corpus() -> Vec<Board> {
    let mut rng = StdRng::seed_from_u64(42);
    let mut boards = Vec::new();
    // Empty and two-tile starts
    boards.push(Board::EMPTY);
    let mut b = Board::EMPTY.with_random_tile(&mut rng).with_random_tile(&mut rng);
    boards.push(b);
    // Derive a variety of densities deterministically
    let seq = [Move::Left, Move::Up, Move::Right, Move::Down];
    for i in 0..20 {
        let dir = seq[i % seq.len()];
        let nb = b.shift(dir);
        if nb != b { b = nb.with_random_tile(&mut rng); }
        boards.push(b);
    }
    boards
}

fn bench_shift(c: &mut Criterion) {
    for dir in Move::ALL {
        c.bench_function(&format!("shift/{dir}"), |bch| {
            let boards = corpus();
            bch.iter(|| {
                let mut acc = 0u64;
                for &bd in &boards { acc = acc.wrapping_add(engine::apply_direction(bd, dir).score); }
                black_box(acc)
            })
        });
    }
    c.bench_function("line/slide_and_merge", |bch| {
        bch.iter(|| black_box(engine::slide_and_merge_line(black_box([2, 2, 4, 4]))))
    });
}

fn bench_spawn_and_terminal(c: &mut Criterion) {
    c.bench_function("board/with_random_tile", |bch| {
        bch.iter_batched(
            || (Board::EMPTY, StdRng::seed_from_u64(7)),
            |(mut bd, mut rng)| {
                for _ in 0..16 { bd = bd.with_random_tile(&mut rng); }
                black_box(bd)
            },
            BatchSize::SmallInput,
        )
    });
    c.bench_function("query/is_terminal", |bch| {
        let boards = corpus();
        bch.iter(|| {
            let mut acc = 0usize;
            for &bd in &boards { acc += engine::is_terminal(bd) as usize; }
            black_box(acc)
        })
    });
}

fn bench_session(c: &mut Criterion) {
    c.bench_function("session/apply_move_cycle", |bch| {
        bch.iter_batched(
            || GameSession::with_config(SessionConfig::default().with_seed(9)),
            |mut session| {
                for i in 0..64 {
                    if session.apply_move(Move::ALL[i % 4]).game_over { break; }
                }
                black_box(session.score())
            },
            BatchSize::SmallInput,
        )
    });
}

criterion_group!(engine_ops, bench_shift, bench_spawn_and_terminal, bench_session);
criterion_main!(engine_ops);
