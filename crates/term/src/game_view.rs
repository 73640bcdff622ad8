//! GameView: maps a [`GameSnapshot`] into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::{occupied_cells, GameSnapshot, PieceSnapshot};
use crate::fb::{CellStyle, FrameBuffer};
use crate::types::{ColorId, GameConfig, Rgb, BACKGROUND, DEFAULT_PALETTE, MAX_CELL_SIZE};

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

const GAME_OVER_TEXT: &str = "GAME OVER";
const RESTART_HINT: &str = "y/r: again  n/q: quit";
const FILLED: char = '█';
const EMPTY: char = '·';

const TEXT: Rgb = Rgb::new(220, 220, 220);
const BORDER: Rgb = Rgb::new(200, 200, 200);
const SCREEN_BG: Rgb = Rgb::new(0, 0, 0);
const GRID_DOT: Rgb = Rgb::new(90, 90, 100);

/// Draws the board, a side panel and the game-over overlay.
#[derive(Debug, Clone)]
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
    palette: Vec<Rgb>,
    anchor_y: AnchorY,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
        Self::new(2, 1)
    }
}

impl GameView {
    /// Cell dimensions are clamped to `1..=MAX_CELL_SIZE`.
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.clamp(1, MAX_CELL_SIZE),
            cell_h: cell_h.clamp(1, MAX_CELL_SIZE),
            palette: DEFAULT_PALETTE.to_vec(),
            anchor_y: AnchorY::Center,
        }
    }

    /// Cell width and palette come from the game configuration.
    pub fn from_config(config: &GameConfig) -> Self {
        let mut view = Self::new(config.cell_size, 1);
        view.palette = config.palette.clone();
        view
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    /// Terminal size of the bordered board.
    pub fn frame_size(&self, snap: &GameSnapshot) -> (u16, u16) {
        (
            u16::from(snap.cols).saturating_mul(self.cell_w).saturating_add(2),
            u16::from(snap.rows).saturating_mul(self.cell_h).saturating_add(2),
        )
    }

    fn color(&self, id: ColorId) -> Rgb {
        self.palette
            .get(usize::from(id))
            .or_else(|| self.palette.first())
            .copied()
            .unwrap_or(SCREEN_BG)
    }

    /// Render into an existing framebuffer, resizing it to the viewport.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().cell(' '));

        let (frame_w, frame_h) = self.frame_size(snap);
        let start_x = viewport.width.saturating_sub(frame_w) / 2;
        let start_y = match self.anchor_y {
            AnchorY::Center => viewport.height.saturating_sub(frame_h) / 2,
            AnchorY::Top => 0,
        };

        self.draw_border(fb, start_x, start_y, frame_w, frame_h);

        let board_bg = self.color(BACKGROUND);
        for row in 0..u16::from(snap.rows) {
            for col in 0..u16::from(snap.cols) {
                let id = snap.cell(col, row);
                let (ch, style) = if id == BACKGROUND {
                    (EMPTY, CellStyle::plain(GRID_DOT, board_bg).dim())
                } else {
                    (FILLED, CellStyle::plain(self.color(id), board_bg).bold())
                };
                let px = start_x.saturating_add(1 + col * self.cell_w);
                let py = start_y.saturating_add(1 + row * self.cell_h);
                fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
            }
        }

        let panel_x = start_x.saturating_add(frame_w).saturating_add(2);
        self.draw_side_panel(fb, snap, viewport, panel_x, start_y);

        if snap.terminal {
            self.draw_game_over(fb, start_x, start_y, frame_w, frame_h);
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn draw_border(&self, fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16) {
        if w < 2 || h < 2 {
            return;
        }
        let style = CellStyle::plain(BORDER, SCREEN_BG);
        let (right, bottom) = (x + w - 1, y + h - 1);

        fb.put_char(x, y, '┌', style);
        fb.put_char(right, y, '┐', style);
        fb.put_char(x, bottom, '└', style);
        fb.put_char(right, bottom, '┘', style);
        for dx in 1..w - 1 {
            fb.put_char(x + dx, y, '─', style);
            fb.put_char(x + dx, bottom, '─', style);
        }
        for dy in 1..h - 1 {
            fb.put_char(x, y + dy, '│', style);
            fb.put_char(right, y + dy, '│', style);
        }
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        viewport: Viewport,
        panel_x: u16,
        start_y: u16,
    ) {
        if panel_x.saturating_add(10) > viewport.width {
            return;
        }
        let label = CellStyle::plain(TEXT, SCREEN_BG).bold();
        let value = CellStyle::plain(TEXT, SCREEN_BG);

        let mut y = start_y;
        fb.put_str(panel_x, y, "SCORE", label);
        y = y.saturating_add(1);
        fb.put_u32(panel_x, y, snap.score, value);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "NEXT", label);
        y = y.saturating_add(1);
        if let Some(next) = snap.next {
            self.draw_preview(fb, next, panel_x, y);
        }
        y = y.saturating_add(6);

        fb.put_str(panel_x, y, "PIECES", label);
        y = y.saturating_add(1);
        fb.put_u32(panel_x, y, snap.pieces_spawned, value);
    }

    /// The next piece drawn in its own 5x5 frame.
    fn draw_preview(&self, fb: &mut FrameBuffer, next: PieceSnapshot, x: u16, y: u16) {
        let style = CellStyle::plain(self.color(next.color), SCREEN_BG).bold();
        for cell in occupied_cells(next.shape, next.rotation) {
            let px = x.saturating_add(cell.col as u16 * self.cell_w);
            let py = y.saturating_add(cell.row as u16);
            fb.fill_rect(px, py, self.cell_w, 1, FILLED, style);
        }
    }

    fn draw_game_over(&self, fb: &mut FrameBuffer, x: u16, y: u16, frame_w: u16, frame_h: u16) {
        let banner = CellStyle::plain(Rgb::new(255, 255, 255), SCREEN_BG).bold();
        let hint = CellStyle::plain(TEXT, SCREEN_BG);
        let mid_y = y.saturating_add(frame_h / 2);
        put_centered(fb, x, frame_w, mid_y, GAME_OVER_TEXT, banner);
        put_centered(fb, x, frame_w, mid_y.saturating_add(1), RESTART_HINT, hint);
    }
}

fn put_centered(fb: &mut FrameBuffer, x: u16, w: u16, y: u16, text: &str, style: CellStyle) {
    let text_w = text.chars().count() as u16;
    fb.put_str(x.saturating_add(w.saturating_sub(text_w) / 2), y, text, style);
}
