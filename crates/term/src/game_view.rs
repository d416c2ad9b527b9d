//! GameView: maps a `core::GameSnapshot` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::{get_shape, GameSnapshot};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::PieceKind;

const PLAYFIELD_BG: Rgb = Rgb::new(30, 30, 40);

const BORDER: CellStyle = CellStyle {
    fg: Rgb::new(200, 200, 200),
    bg: Rgb::BLACK,
    bold: false,
    dim: false,
};
const GRID_DOT: CellStyle = CellStyle {
    fg: Rgb::new(90, 90, 100),
    bg: PLAYFIELD_BG,
    bold: false,
    dim: true,
};
const LABEL: CellStyle = CellStyle {
    fg: Rgb::new(220, 220, 220),
    bg: Rgb::BLACK,
    bold: true,
    dim: false,
};
const VALUE: CellStyle = CellStyle {
    fg: Rgb::new(200, 200, 200),
    bg: Rgb::BLACK,
    bold: false,
    dim: false,
};
const BANNER: CellStyle = CellStyle {
    fg: Rgb::new(255, 255, 255),
    bg: Rgb::BLACK,
    bold: true,
    dim: false,
};

const SIDE_PANEL_GAP: u16 = 2;
const SIDE_PANEL_W: u16 = 10;

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

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

/// Screen-space placement of the bordered playfield.
#[derive(Debug, Clone, Copy)]
struct Frame {
    x: u16,
    y: u16,
    w: u16,
    h: u16,
}

/// Renders the playfield, side panel and overlays.
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
    anchor_y: AnchorY,
}

impl Default for GameView {
    fn default() -> Self {
        Self {
            cell_w: 2,
            cell_h: 1,
            anchor_y: AnchorY::Center,
        }
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
            anchor_y: AnchorY::Center,
        }
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    /// Render a snapshot into an existing framebuffer.
    ///
    /// Callers can reuse a framebuffer across frames; it is only resized when the
    /// viewport changes.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().into_cell(' '));

        let frame = self.frame_for(snap, viewport);
        self.draw_border(fb, frame, BORDER);

        for y in 0..snap.height as u16 {
            for x in 0..snap.width as u16 {
                match snap.cell(x as usize, y as usize) {
                    Some(color) => self.draw_block(fb, frame, x, y, color),
                    None => self.draw_empty_cell(fb, frame, x, y),
                }
            }
        }

        if let Some(active) = snap.active {
            for (x, y) in active.filled_cells() {
                // Rows above the top edge exist for collision only.
                if x >= 0 && y >= 0 && x < snap.width as i16 && y < snap.height as i16 {
                    self.draw_block(fb, frame, x as u16, y as u16, active.color);
                }
            }
        }

        self.draw_side_panel(fb, snap, viewport, frame);

        if snap.game_over {
            self.draw_overlay_text(fb, frame, "GAME OVER");
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    /// Screen position of the top-left board cell, useful for tests and hit-testing.
    pub fn board_origin(&self, snap: &GameSnapshot, viewport: Viewport) -> (u16, u16) {
        let frame = self.frame_for(snap, viewport);
        (frame.x + 1, frame.y + 1)
    }

    fn frame_for(&self, snap: &GameSnapshot, viewport: Viewport) -> Frame {
        let w = (snap.width as u16) * self.cell_w + 2;
        let h = (snap.height as u16) * self.cell_h + 2;
        // Leave room for the side panel when the terminal is wide enough.
        let total_w = w + SIDE_PANEL_GAP + SIDE_PANEL_W;
        let x = if viewport.width >= total_w {
            (viewport.width - total_w) / 2
        } else {
            viewport.width.saturating_sub(w) / 2
        };
        let y = match self.anchor_y {
            AnchorY::Center => viewport.height.saturating_sub(h) / 2,
            AnchorY::Top => 0,
        };
        Frame { x, y, w, h }
    }

    fn draw_border(&self, fb: &mut FrameBuffer, frame: Frame, style: CellStyle) {
        let Frame { x, y, w, h } = frame;
        if w < 2 || h < 2 {
            return;
        }
        let (right, bottom) = (x + w - 1, y + h - 1);

        fb.fill_rect(x + 1, y, w - 2, 1, '─', style);
        fb.fill_rect(x + 1, bottom, w - 2, 1, '─', style);
        fb.fill_rect(x, y + 1, 1, h - 2, '│', style);
        fb.fill_rect(right, y + 1, 1, h - 2, '│', style);
        let corners = [
            (x, y, '┌'),
            (right, y, '┐'),
            (x, bottom, '└'),
            (right, bottom, '┘'),
        ];
        for (cx, cy, ch) in corners {
            fb.put_char(cx, cy, ch, style);
        }
    }

    fn draw_empty_cell(&self, fb: &mut FrameBuffer, frame: Frame, x: u16, y: u16) {
        self.fill_cell_rect(fb, frame, x, y, '·', GRID_DOT);
    }

    fn draw_block(&self, fb: &mut FrameBuffer, frame: Frame, x: u16, y: u16, color: Rgb) {
        let style = CellStyle {
            fg: color,
            bg: PLAYFIELD_BG,
            bold: true,
            dim: false,
        };
        self.fill_cell_rect(fb, frame, x, y, '█', style);
    }

    fn fill_cell_rect(
        &self,
        fb: &mut FrameBuffer,
        frame: Frame,
        cell_x: u16,
        cell_y: u16,
        ch: char,
        style: CellStyle,
    ) {
        let px = frame.x + 1 + cell_x * self.cell_w;
        let py = frame.y + 1 + cell_y * self.cell_h;
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        viewport: Viewport,
        frame: Frame,
    ) {
        let panel_x = frame.x.saturating_add(frame.w).saturating_add(SIDE_PANEL_GAP);
        if panel_x >= viewport.width || viewport.width - panel_x < SIDE_PANEL_W {
            return;
        }

        let y = frame.y;
        fb.put_str(panel_x, y, "SCORE", LABEL);
        fb.put_u32(panel_x, y + 1, snap.score, VALUE);

        fb.put_str(panel_x, y + 3, "NEXT", LABEL);
        fb.put_str(panel_x, y + 4, snap.next.as_str(), VALUE);
        self.draw_preview(fb, panel_x, y + 5, snap.next);
    }

    /// Draw the spawn orientation of `kind` with its top-left at (x, y).
    fn draw_preview(&self, fb: &mut FrameBuffer, x: u16, y: u16, kind: PieceKind) {
        let shape = get_shape(kind);
        let style = CellStyle {
            fg: shape.color,
            bg: Rgb::BLACK,
            bold: true,
            dim: false,
        };
        for (r, c) in shape.occupancy.filled() {
            let px = x + (c as u16) * self.cell_w;
            let py = y + (r as u16) * self.cell_h;
            fb.fill_rect(px, py, self.cell_w, self.cell_h, '█', style);
        }
    }

    fn draw_overlay_text(&self, fb: &mut FrameBuffer, frame: Frame, text: &str) {
        let mid_y = frame.y.saturating_add(frame.h / 2);
        let text_w = text.chars().count() as u16;
        let x = frame.x.saturating_add(frame.w.saturating_sub(text_w) / 2);
        fb.put_str(x, mid_y, text, BANNER);
    }
}
