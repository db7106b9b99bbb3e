//! GameView: maps a `core::GameSnapshot` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::{GameSnapshot, Tetromino};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{Color, TetrominoType, BOARD_HEIGHT, BOARD_WIDTH, TETROMINO_SIZE};

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

const PLAYFIELD_BG: Rgb = Rgb::new(30, 30, 40);
const PANEL_BG: Rgb = Rgb::new(0, 0, 0);

/// A lightweight terminal renderer for the game.
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
        Self {
            cell_w: 2,
            cell_h: 1,
        }
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
        }
    }

    /// Render a frame into an existing framebuffer.
    ///
    /// Callers can reuse the framebuffer across frames; it is only resized when
    /// the viewport changes.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        self.render_into_with_note(snap, None, viewport, fb);
    }

    /// Same as [`GameView::render_into`], with a short message under the side panel.
    pub fn render_into_with_note(
        &self,
        snap: &GameSnapshot,
        note: Option<&str>,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().glyph(' '));

        let board_px_w = (BOARD_WIDTH as u16) * self.cell_w;
        let board_px_h = (BOARD_HEIGHT as u16) * self.cell_h;
        let frame_w = board_px_w + 2;
        let frame_h = board_px_h + 2;

        let start_x = viewport.width.saturating_sub(frame_w + PANEL_WIDTH) / 2;
        let start_y = viewport.height.saturating_sub(frame_h) / 2;

        let border = CellStyle::plain(Rgb::new(200, 200, 200), PANEL_BG);
        fb.fill_rect(
            start_x + 1,
            start_y + 1,
            board_px_w,
            board_px_h,
            ' ',
            CellStyle::plain(Rgb::new(80, 80, 90), PLAYFIELD_BG),
        );
        draw_border(fb, start_x, start_y, frame_w, frame_h, border);

        let origin = (start_x + 1, start_y + 1);

        // Locked cells.
        for (y, row) in snap.board.iter().enumerate() {
            for (x, cell) in row.iter().enumerate() {
                match cell {
                    Some(color) => self.draw_block(fb, origin, x as i8, y as i8, *color),
                    None => self.draw_empty(fb, origin, x as i8, y as i8),
                }
            }
        }

        // Ghost piece, then the falling piece over it.
        if let Some(ghost_y) = snap.ghost_y() {
            let ghost = CellStyle::plain(Rgb::new(140, 140, 140), PLAYFIELD_BG).dim();
            for (i, j, _) in snap.falling.occupied() {
                self.fill_board_cell(fb, origin, snap.falling.x + i, ghost_y + j, '░', ghost);
            }
        }
        for (i, j, color) in snap.falling.occupied() {
            self.draw_block(fb, origin, snap.falling.x + i, snap.falling.y + j, color);
        }

        self.draw_side_panel(fb, snap, note, viewport, start_x + frame_w + 2, start_y);

        if snap.paused() {
            draw_overlay_text(fb, start_x, start_y, frame_w, frame_h, "PAUSED");
        } else if snap.game_over() {
            draw_overlay_text(fb, start_x, start_y, frame_w, frame_h, "GAME OVER");
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn draw_block(&self, fb: &mut FrameBuffer, origin: (u16, u16), x: i8, y: i8, color: Color) {
        let style = CellStyle::plain(Rgb::from_palette(color), PLAYFIELD_BG).bold();
        self.fill_board_cell(fb, origin, x, y, '█', style);
    }

    fn draw_empty(&self, fb: &mut FrameBuffer, origin: (u16, u16), x: i8, y: i8) {
        let style = CellStyle::plain(Rgb::new(90, 90, 100), PLAYFIELD_BG).dim();
        self.fill_board_cell(fb, origin, x, y, '·', style);
    }

    /// Fill board cell (x, y); cells outside the board are skipped.
    fn fill_board_cell(
        &self,
        fb: &mut FrameBuffer,
        origin: (u16, u16),
        x: i8,
        y: i8,
        ch: char,
        style: CellStyle,
    ) {
        if x < 0 || x >= BOARD_WIDTH as i8 || y < 0 || y >= BOARD_HEIGHT as i8 {
            return;
        }
        let px = origin.0 + (x as u16) * self.cell_w;
        let py = origin.1 + (y as u16) * self.cell_h;
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        note: Option<&str>,
        viewport: Viewport,
        panel_x: u16,
        start_y: u16,
    ) {
        if panel_x >= viewport.width || viewport.width - panel_x < 12 {
            return;
        }

        let label = CellStyle::plain(Rgb::new(220, 220, 220), PANEL_BG).bold();
        let value = CellStyle::plain(Rgb::new(200, 200, 200), PANEL_BG);

        let mut y = start_y;
        for (name, number) in [
            ("SCORE", snap.stats.score),
            ("LEVEL", snap.stats.level as u64),
            ("LINES", snap.stats.lines as u64),
        ] {
            fb.put_str(panel_x, y, name, label);
            fb.put_u64(panel_x, y + 1, number, value);
            y += 3;
        }

        fb.put_str(panel_x, y, "NEXT", label);
        y += 1;
        if snap.show_preview {
            self.draw_preview(fb, &snap.next, panel_x, y);
        }
        y += TETROMINO_SIZE as u16 / 2 + 2;

        fb.put_str(panel_x, y, "PIECES", label);
        fb.put_u64(panel_x + 7, y, snap.stats.total_pieces as u64, value);
        y += 1;
        for kind in TetrominoType::ALL {
            let style = CellStyle::plain(Rgb::from_palette(kind.color()), PANEL_BG);
            fb.put_str(panel_x, y, kind.as_str(), style);
            fb.put_u64(panel_x + 2, y, snap.stats.pieces_of(kind) as u64, value);
            y += 1;
        }

        if let Some(note) = note {
            y += 1;
            fb.put_str(panel_x, y, note, label);
        }
    }

    /// Preview of the next piece; only the top two rows of its box are ever used.
    fn draw_preview(&self, fb: &mut FrameBuffer, next: &Tetromino, x: u16, y: u16) {
        for (i, j, color) in next.occupied() {
            let style = CellStyle::plain(Rgb::from_palette(color), PANEL_BG).bold();
            fb.fill_rect(x + (i as u16) * 2, y + j as u16, 2, 1, '█', style);
        }
    }
}

/// Columns reserved to the right of the board for the side panel.
const PANEL_WIDTH: u16 = 14;

fn draw_border(fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16, style: CellStyle) {
    if w < 2 || h < 2 {
        return;
    }

    fb.put_char(x, y, '┌', style);
    fb.put_char(x + w - 1, y, '┐', style);
    fb.put_char(x, y + h - 1, '└', style);
    fb.put_char(x + w - 1, y + h - 1, '┘', style);

    for dx in 1..w - 1 {
        fb.put_char(x + dx, y, '─', style);
        fb.put_char(x + dx, y + h - 1, '─', style);
    }
    for dy in 1..h - 1 {
        fb.put_char(x, y + dy, '│', style);
        fb.put_char(x + w - 1, y + dy, '│', style);
    }
}

fn draw_overlay_text(
    fb: &mut FrameBuffer,
    start_x: u16,
    start_y: u16,
    frame_w: u16,
    frame_h: u16,
    text: &str,
) {
    let mid_y = start_y.saturating_add(frame_h / 2);
    let text_w = text.chars().count() as u16;
    let x = start_x.saturating_add(frame_w.saturating_sub(text_w) / 2);
    let style = CellStyle::plain(Rgb::new(255, 255, 255), PANEL_BG).bold();
    fb.put_str(x, mid_y, text, style);
}
