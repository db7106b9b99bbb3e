use stc_tetris::core::{GameSnapshot, GameState};
use stc_tetris::term::{FrameBuffer, GameView, Viewport};
use stc_tetris::types::Color;

// With cell_w=2 and cell_h=1 the board is 20x22 pixels, 22x24 with the border.
const FRAME: Viewport = Viewport {
    width: 22,
    height: 24,
};

fn blocks_from(fb: &FrameBuffer, x0: u16) -> usize {
    let mut count = 0;
    for y in 0..fb.height() {
        for x in x0..fb.width() {
            if fb.get(x, y).map(|g| g.ch) == Some('█') {
                count += 1;
            }
        }
    }
    count
}

#[test]
fn term_view_renders_border_corners() {
    let snap = GameSnapshot::default();
    let fb = GameView::default().render(&snap, FRAME);

    assert_eq!(fb.get(0, 0).unwrap().ch, '┌');
    assert_eq!(fb.get(21, 0).unwrap().ch, '┐');
    assert_eq!(fb.get(0, 23).unwrap().ch, '└');
    assert_eq!(fb.get(21, 23).unwrap().ch, '┘');
}

#[test]
fn term_view_renders_locked_cell_as_two_chars_wide() {
    let mut snap = GameSnapshot::default();
    snap.board[21][0] = Some(Color::Cyan);

    let fb = GameView::default().render(&snap, FRAME);

    // Inside border: (1,1) origin. Each cell is 2 chars wide.
    let y0 = 1 + 21;
    assert_eq!(fb.get(1, y0).unwrap().ch, '█');
    assert_eq!(fb.get(2, y0).unwrap().ch, '█');
    assert_eq!(fb.get(3, y0).unwrap().ch, '·');
    // Board cell (0, 0) is empty.
    assert_eq!(fb.get(1, 1).unwrap().ch, '·');
}

#[test]
fn term_view_draws_ghost_on_landing_row() {
    let mut snap = GameSnapshot::default();
    // Spawned I: lower box row 1, columns 3..=6; lands on row 21.
    snap.shadow_gap = 20;

    let fb = GameView::default().render(&snap, FRAME);

    for x in 7..15 {
        assert_eq!(fb.get(x, 22).unwrap().ch, '░', "column {}", x);
        assert_eq!(fb.get(x, 2).unwrap().ch, '█', "column {}", x);
    }

    snap.show_shadow = false;
    let fb = GameView::default().render(&snap, FRAME);
    assert_eq!(fb.get(7, 22).unwrap().ch, '·');
}

#[test]
fn term_view_draws_side_panel_when_wide_enough() {
    let mut snap = GameSnapshot::default();
    snap.stats.score = 1234;
    snap.stats.level = 2;
    snap.stats.lines = 20;

    let fb = GameView::default().render(&snap, Viewport::new(60, 24));

    assert!(fb.contains_text("SCORE"));
    assert!(fb.contains_text("1234"));
    assert!(fb.contains_text("NEXT"));
    assert!(fb.contains_text("PIECES"));

    let narrow = GameView::default().render(&snap, FRAME);
    assert!(!narrow.contains_text("SCORE"));
}

#[test]
fn term_view_hides_preview_when_toggled_off() {
    let mut snap = GameSnapshot::default();
    let viewport = Viewport::new(60, 24);
    // start_x = (60 - 36) / 2 = 12, the panel starts two columns past the frame.
    let panel_x = 12 + 22 + 2;

    let shown = GameView::default().render(&snap, viewport);
    assert_eq!(blocks_from(&shown, panel_x), 8);

    snap.show_preview = false;
    let hidden = GameView::default().render(&snap, viewport);
    assert_eq!(blocks_from(&hidden, panel_x), 0);
    assert!(hidden.contains_text("NEXT"));
}

#[test]
fn term_view_shows_state_overlays() {
    let mut snap = GameSnapshot::default();

    let fb = GameView::default().render(&snap, FRAME);
    assert!(!fb.contains_text("PAUSED"));
    assert!(!fb.contains_text("GAME OVER"));

    snap.state = GameState::Paused;
    let fb = GameView::default().render(&snap, FRAME);
    assert!(fb.contains_text("PAUSED"));

    snap.state = GameState::GameOver;
    let fb = GameView::default().render(&snap, FRAME);
    assert!(fb.contains_text("GAME OVER"));
}

#[test]
fn term_view_centers_board_on_tall_viewports() {
    let snap = GameSnapshot::default();

    // start_y = (30 - 24) / 2 = 3 => top-left corner at (0,3).
    let fb = GameView::default().render(&snap, Viewport::new(36, 30));
    assert_eq!(fb.get(0, 3).unwrap().ch, '┌');
    assert_eq!(fb.get(0, 26).unwrap().ch, '└');
}

#[test]
fn term_view_reuses_framebuffer() {
    let view = GameView::default();
    let mut fb = FrameBuffer::new(1, 1);
    let mut snap = GameSnapshot::default();

    view.render_into(&snap, FRAME, &mut fb);
    assert_eq!((fb.width(), fb.height()), (22, 24));

    snap.state = GameState::Paused;
    view.render_into_with_note(&snap, Some("LINE CLEAR"), Viewport::new(60, 24), &mut fb);
    assert_eq!(fb.width(), 60);
    assert!(fb.contains_text("LINE CLEAR"));
    assert!(fb.contains_text("PAUSED"));
}
