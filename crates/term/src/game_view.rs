//! GameView: maps a [`GameSnapshot`] into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::GameSnapshot;
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{Cell, PieceKind, Status, BOARD_HEIGHT, BOARD_WIDTH, MAX_SHAPE_SIZE};

const WELL_BG: Rgb = Rgb::new(20, 28, 44);
const BORDER_FG: Rgb = Rgb::new(71, 115, 181);
const FLASH_FG: Rgb = Rgb::new(255, 255, 255);

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

/// Where the playfield frame lands inside the viewport
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    pub frame_x: u16,
    pub frame_y: u16,
    pub frame_w: u16,
    pub frame_h: u16,
    pub panel_x: u16,
}

/// Draws the well, the side panel and the status overlays.
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 compensates for the usual terminal glyph aspect ratio.
        Self { cell_w: 2 }
    }
}

impl GameView {
    pub fn new(cell_w: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
        }
    }

    /// Frame centered in the viewport with the panel to its right
    pub fn layout(&self, viewport: Viewport) -> Layout {
        let frame_w = BOARD_WIDTH as u16 * self.cell_w + 2;
        let frame_h = BOARD_HEIGHT as u16 + 2;
        let panel_w = 14;
        let total_w = frame_w + 2 + panel_w;
        let frame_x = viewport.width.saturating_sub(total_w) / 2;
        let frame_y = viewport.height.saturating_sub(frame_h) / 2;
        Layout {
            frame_x,
            frame_y,
            frame_w,
            frame_h,
            panel_x: frame_x + frame_w + 2,
        }
    }

    /// Render into an existing framebuffer.
    ///
    /// Callers reuse one framebuffer across frames; it is only reallocated when
    /// the viewport changes size.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().with_char(' '));

        let layout = self.layout(viewport);
        self.draw_border(fb, &layout);

        for row in 0..BOARD_HEIGHT as usize {
            for col in 0..BOARD_WIDTH as usize {
                let (ch, style) = cell_glyph(snap.cell_with_active(row, col));
                let x = layout.frame_x + 1 + col as u16 * self.cell_w;
                let y = layout.frame_y + 1 + row as u16;
                fb.fill_rect(x, y, self.cell_w, 1, ch, style);
            }
        }

        self.draw_side_panel(fb, snap, &layout);

        match snap.status {
            Status::GameOver => self.draw_overlay(fb, &layout, "PRESS ENTER"),
            Status::Paused => self.draw_overlay(fb, &layout, "PAUSED"),
            _ => {}
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn draw_border(&self, fb: &mut FrameBuffer, layout: &Layout) {
        let style = CellStyle::new(BORDER_FG, Rgb::new(0, 0, 0));
        let (x, y, w, h) = (layout.frame_x, layout.frame_y, layout.frame_w, layout.frame_h);

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

    fn draw_side_panel(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, layout: &Layout) {
        let label = CellStyle::default().bold();
        let value = CellStyle::new(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0));
        let x = layout.panel_x;
        let mut y = layout.frame_y;

        for (name, n) in [
            ("SCORE", snap.score),
            ("LEVEL", snap.level),
            ("LINES", snap.lines),
        ] {
            fb.put_str(x, y, name, label);
            fb.put_u32(x, y + 1, n, value);
            y += 3;
        }

        fb.put_str(x, y, "NEXT", label);
        y += 1;
        let shape = snap.next.shape;
        let (ch, style) = cell_glyph(Cell::Block(snap.next.kind));
        for r in 0..MAX_SHAPE_SIZE {
            for c in 0..MAX_SHAPE_SIZE {
                if shape.is_set(r, c) {
                    let px = x + c as u16 * self.cell_w;
                    fb.fill_rect(px, y + r as u16, self.cell_w, 1, ch, style);
                }
            }
        }
    }

    fn draw_overlay(&self, fb: &mut FrameBuffer, layout: &Layout, text: &str) {
        let mid_y = layout.frame_y + layout.frame_h / 2;
        let text_w = text.chars().count() as u16;
        let x = layout.frame_x + layout.frame_w.saturating_sub(text_w) / 2;
        let style = CellStyle::new(FLASH_FG, Rgb::new(0, 0, 0)).bold();
        fb.put_str(x, mid_y, text, style);
    }
}

/// Block color for a piece kind
pub fn piece_color(kind: PieceKind) -> Rgb {
    match kind {
        PieceKind::I => Rgb::new(240, 217, 48),
        PieceKind::L => Rgb::new(45, 74, 237),
        PieceKind::J => Rgb::new(232, 56, 46),
        PieceKind::S => Rgb::new(84, 235, 73),
        PieceKind::Z => Rgb::new(191, 83, 237),
        PieceKind::T => Rgb::new(83, 225, 230),
        PieceKind::O => Rgb::new(245, 151, 29),
    }
}

fn cell_glyph(cell: Cell) -> (char, CellStyle) {
    match cell {
        Cell::Block(kind) => ('█', CellStyle::new(piece_color(kind), WELL_BG)),
        Cell::Flash => ('█', CellStyle::new(FLASH_FG, WELL_BG)),
        Cell::Wall => ('▓', CellStyle::new(BORDER_FG, WELL_BG)),
        Cell::Empty => ('·', CellStyle::new(Rgb::new(60, 70, 90), WELL_BG)),
    }
}
