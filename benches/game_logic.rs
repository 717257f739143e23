use criterion::{black_box, criterion_group, criterion_main, Criterion};
use stacktris::core::{get_shape, Board, GameSettings, GameSnapshot, GameState, SimpleRng};
use stacktris::term::{FrameBuffer, GameView, Viewport};
use stacktris::types::{Cell, Command, PieceKind, BOARD_WIDTH};

fn started() -> GameState {
    let mut state = GameState::new(SimpleRng::new(12345), GameSettings::default());
    let _ = state.start();
    state
}

fn bench_tick(c: &mut Criterion) {
    let mut state = started();

    c.bench_function("game_tick", |b| {
        b.iter(|| {
            if state.status() == stacktris::types::Status::GameOver {
                let _ = state.start();
            }
            black_box(state.tick().ok());
        })
    });
}

fn bench_line_clear(c: &mut Criterion) {
    c.bench_function("collapse_4_rows", |b| {
        b.iter(|| {
            let mut board = Board::new();
            for row in 14..18 {
                for col in 0..BOARD_WIDTH as i8 {
                    board.set(row, col, Cell::Block(PieceKind::I));
                }
            }
            let rows = board.full_rows();
            black_box(board.collapse(&rows).is_ok());
        })
    });
}

fn bench_collision(c: &mut Criterion) {
    let board = Board::new();
    let shape = get_shape(PieceKind::T);

    c.bench_function("is_collision", |b| {
        b.iter(|| black_box(board.is_collision(black_box(&shape), black_box(8), black_box(3))))
    });
}

fn bench_move_and_rotate(c: &mut Criterion) {
    let mut state = started();

    c.bench_function("move_and_rotate", |b| {
        b.iter(|| {
            let _ = state.apply(Command::MoveLeft);
            let _ = state.apply(Command::RotateCcw);
            let _ = state.apply(Command::MoveRight);
            let _ = state.apply(Command::RotateCw);
        })
    });
}

fn bench_render(c: &mut Criterion) {
    let state = started();
    let view = GameView::default();
    let mut snap = GameSnapshot::default();
    let mut fb = FrameBuffer::new(80, 24);

    c.bench_function("snapshot_and_render", |b| {
        b.iter(|| {
            state.snapshot_into(&mut snap);
            view.render_into(&snap, Viewport::new(80, 24), &mut fb);
            black_box(&fb);
        })
    });
}

criterion_group!(
    benches,
    bench_tick,
    bench_line_clear,
    bench_collision,
    bench_move_and_rotate,
    bench_render
);
criterion_main!(benches);
