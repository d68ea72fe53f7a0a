use criterion::{black_box, criterion_group, criterion_main, Criterion};
use block_blast::core::{draw_random_pieces, piece_by_name, Board, GameState, SimpleRng};
use block_blast::engine::{apply_place, has_available_move, hover_preview};

fn bench_can_place(c: &mut Criterion) {
    let board = Board::new();
    let cross = piece_by_name("cross").unwrap().shape;

    c.bench_function("can_place_cross", |b| {
        b.iter(|| board.can_place(black_box(&cross), black_box(4), black_box(4)))
    });
}

fn bench_line_clear(c: &mut Criterion) {
    let square = piece_by_name("square").unwrap().shape;
    let mut board = Board::new();
    // Fill the top 2 rows and the left 2 columns
    for col in (0..10).step_by(2) {
        board = board.place(&square, 0, col, 1);
    }
    for row in (2..10).step_by(2) {
        board = board.place(&square, row, 0, 1);
    }

    c.bench_function("clear_rows_and_cols", |b| {
        b.iter(|| black_box(&board).clear_full_lines())
    });
}

fn bench_apply_place(c: &mut Criterion) {
    let state = GameState::new(12345);

    c.bench_function("apply_place", |b| {
        b.iter(|| apply_place(black_box(&state), 0, 3, 3))
    });
}

fn bench_draw(c: &mut Criterion) {
    let mut rng = SimpleRng::new(12345);

    c.bench_function("draw_three_pieces", |b| {
        b.iter(|| draw_random_pieces(black_box(3), &mut rng))
    });
}

fn bench_move_scan(c: &mut Criterion) {
    let state = GameState::new(12345);

    c.bench_function("has_available_move", |b| {
        b.iter(|| has_available_move(black_box(&state)))
    });
    c.bench_function("hover_preview", |b| {
        b.iter(|| hover_preview(black_box(&state), 1, 4, 4))
    });
}

criterion_group!(
    benches,
    bench_can_place,
    bench_line_clear,
    bench_apply_place,
    bench_draw,
    bench_move_scan
);
criterion_main!(benches);
