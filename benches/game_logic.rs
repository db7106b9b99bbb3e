use criterion::{black_box, criterion_group, criterion_main, Criterion};
use stc_tetris::core::{try_rotate, Board, Game, GameConfig, HeadlessPlatform, Tetromino};
use stc_tetris::types::{Color, GameEvent, TetrominoType, TICK_MS};

fn new_game() -> Game<HeadlessPlatform> {
    let mut game = Game::new(HeadlessPlatform::new(12345), GameConfig::default());
    game.initialize().expect("headless init");
    game
}

fn bench_tick(c: &mut Criterion) {
    let mut game = new_game();

    c.bench_function("game_tick_16ms", |b| {
        b.iter(|| {
            game.platform_mut().advance(black_box(TICK_MS));
            game.update();
            if game.is_over() {
                game.restart();
            }
        })
    });
}

fn bench_line_clear(c: &mut Criterion) {
    c.bench_function("clear_4_lines", |b| {
        b.iter(|| {
            let mut board = Board::new();
            // Fill bottom 4 rows
            for y in 18..22 {
                for x in 0..10 {
                    board.set(x, y, Some(Color::Cyan));
                }
            }
            black_box(board.clear_full_rows());
        })
    });
}

fn bench_hard_drop(c: &mut Criterion) {
    let mut game = new_game();

    c.bench_function("hard_drop", |b| {
        b.iter(|| {
            game.platform_mut().tap(GameEvent::Drop);
            game.update();
            if game.is_over() {
                game.restart();
            }
        })
    });
}

fn bench_collides(c: &mut Criterion) {
    let board = Board::new();
    let piece = Tetromino::new(TetrominoType::T);

    c.bench_function("collides", |b| {
        b.iter(|| black_box(board.collides(black_box(&piece), 1, 0)))
    });
}

fn bench_try_rotate(c: &mut Criterion) {
    let board = Board::new();
    let mut piece = Tetromino::new(TetrominoType::J);

    c.bench_function("try_rotate", |b| {
        b.iter(|| {
            if let Some(rotated) = try_rotate(&piece, &board, true, true) {
                piece = rotated;
            }
        })
    });
}

criterion_group!(
    benches,
    bench_tick,
    bench_line_clear,
    bench_hard_drop,
    bench_collides,
    bench_try_rotate
);
criterion_main!(benches);
