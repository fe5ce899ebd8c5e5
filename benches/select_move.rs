use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use gomoku::eval::evaluate;
use gomoku::{AIEngine, Board, Difficulty, Stone};

/// A quiet middle-game position with no immediate five for either side
fn midgame() -> Board {
    Board::from_rows(&[
        "...............",
        "...............",
        "...............",
        "...............",
        ".....O.........",
        "......XO.......",
        ".....XXO.......",
        "......OX.X.....",
        ".......XO......",
        "......O........",
        "...............",
        "...............",
        "...............",
        "...............",
        "...............",
    ])
}

fn bench_select_move(c: &mut Criterion) {
    let board = midgame();
    let mut g = c.benchmark_group("select_move");
    for difficulty in Difficulty::ALL {
        let mut engine = AIEngine::new(15, difficulty);
        g.bench_with_input(BenchmarkId::new("tier", difficulty), &board, |b, board| {
            b.iter(|| black_box(engine.select_move(black_box(board), Stone::Black)))
        });
    }
    g.finish();
}

fn bench_evaluate(c: &mut Criterion) {
    let board = midgame();
    c.bench_function("evaluate_midgame", |b| {
        b.iter(|| black_box(evaluate(black_box(&board), Stone::White)))
    });
}

criterion_group!(benches, bench_select_move, bench_evaluate);
criterion_main!(benches);
