//! BoardView: maps a [`GameSnapshot`] into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::{GameSnapshot, TileMotion};
use crate::fb::{FrameBuffer, Rgb, Style};
use crate::types::{CellIndex, TileId};

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

/// Cursor and selection owned by the input layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Marks {
    pub cursor: Option<CellIndex>,
    pub selected: Option<CellIndex>,
}

const BOARD_BG: Rgb = Rgb::new(25, 25, 35);
const PANEL_MIN_W: u16 = 12;

/// One colour per tile type, up to sixteen.
const PALETTE: [Rgb; 16] = [
    Rgb::new(230, 70, 70),
    Rgb::new(80, 200, 100),
    Rgb::new(80, 130, 240),
    Rgb::new(240, 210, 70),
    Rgb::new(200, 110, 230),
    Rgb::new(80, 220, 220),
    Rgb::new(255, 150, 40),
    Rgb::new(240, 240, 240),
    Rgb::new(150, 90, 60),
    Rgb::new(255, 120, 180),
    Rgb::new(150, 230, 60),
    Rgb::new(60, 90, 160),
    Rgb::new(180, 180, 100),
    Rgb::new(120, 120, 120),
    Rgb::new(0, 160, 140),
    Rgb::new(170, 40, 90),
];

/// Letters keep tile types apart on terminals without colour.
const SYMBOLS: &[u8; 16] = b"ABCDEFGHIJKLMNOP";

pub struct BoardView {
    /// Terminal columns per board cell (3 leaves room for cursor brackets).
    cell_w: u16,
}

impl Default for BoardView {
    fn default() -> Self {
        Self { cell_w: 3 }
    }
}

impl BoardView {
    pub fn new(cell_w: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
        }
    }

    /// Render into an existing framebuffer, resizing it to the viewport.
    pub fn render_into(
        &self,
        snap: &GameSnapshot,
        marks: Marks,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(Style::default().glyph(' '));

        let frame_w = snap.width as u16 * self.cell_w + 2;
        let frame_h = snap.height as u16 + 2;
        let start_x = viewport.width.saturating_sub(frame_w + PANEL_MIN_W + 2) / 2;
        let start_y = viewport.height.saturating_sub(frame_h) / 2;

        let border = Style::new(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0));
        draw_border(fb, start_x, start_y, frame_w, frame_h, border);
        fb.fill(
            start_x + 1,
            start_y + 1,
            frame_w - 2,
            frame_h - 2,
            ' ',
            Style::new(BOARD_BG, BOARD_BG),
        );

        for y in 0..snap.height {
            // Row 0 is the bottom of the board.
            let sy = start_y + 1 + (snap.height - 1 - y) as u16;
            for x in 0..snap.width {
                let cell = CellIndex::new(x, y);
                let sx = start_x + 1 + x as u16 * self.cell_w;
                self.draw_tile(fb, sx, sy, snap, marks, cell);
            }
        }

        self.draw_panel(fb, snap, viewport, start_x + frame_w + 2, start_y);

        if snap.game_over {
            let mid = start_y + frame_h / 2;
            draw_centered(fb, start_x, frame_w, mid, "GAME OVER");
            draw_centered(fb, start_x, frame_w, mid + 1, "r: restart");
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, marks: Marks, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, marks, viewport, &mut fb);
        fb
    }

    fn draw_tile(
        &self,
        fb: &mut FrameBuffer,
        sx: u16,
        sy: u16,
        snap: &GameSnapshot,
        marks: Marks,
        cell: CellIndex,
    ) {
        let id: TileId = snap.id_at(cell);
        let motion = snap.motion_at(cell);
        let (ch, mut style) = match usize::try_from(id) {
            _ if motion == TileMotion::Popping => {
                ('*', Style::new(Rgb::new(255, 255, 255), BOARD_BG).bold())
            }
            Ok(i) if i < PALETTE.len() => {
                let style = Style::new(PALETTE[i], BOARD_BG);
                let style = if motion == TileMotion::Sliding {
                    style.dim()
                } else {
                    style.bold()
                };
                (SYMBOLS[i] as char, style)
            }
            // cleared (or shrinking away) and waiting for refill
            _ => ('·', Style::new(Rgb::new(90, 90, 100), BOARD_BG).dim()),
        };
        if marks.selected == Some(cell) {
            style = style.reverse();
        }

        let mid = sx + self.cell_w / 2;
        fb.fill(sx, sy, self.cell_w, 1, ' ', style);
        fb.put(mid, sy, ch, style);

        if marks.cursor == Some(cell) && self.cell_w >= 3 {
            let bracket = Style::new(Rgb::new(255, 255, 255), style.bg).bold();
            fb.put(sx, sy, '[', bracket);
            fb.put(sx + self.cell_w - 1, sy, ']', bracket);
        }
    }

    fn draw_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        viewport: Viewport,
        panel_x: u16,
        start_y: u16,
    ) {
        if panel_x.saturating_add(PANEL_MIN_W) > viewport.width {
            return;
        }
        let label = Style::default().bold();
        let value = Style::default();

        let mut y = start_y;
        for (name, amount) in [
            ("SCORE", Some(snap.score)),
            ("BEST", Some(snap.highscore)),
            ("COMBO", Some(snap.combo as u64)),
            ("TIME", snap.remaining_ms.map(|ms| (ms as u64).div_ceil(1000))),
        ] {
            fb.text(panel_x, y, name, label);
            match amount {
                Some(n) => {
                    let end = fb.number(panel_x, y + 1, n, value);
                    if name == "TIME" {
                        fb.text(end, y + 1, "s", value);
                    }
                }
                None => {
                    fb.text(panel_x, y + 1, "--", value);
                }
            }
            y += 3;
        }
        fb.text(panel_x, y, snap.phase.name(), value.dim());
    }
}

fn draw_border(fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16, style: Style) {
    if w < 2 || h < 2 {
        return;
    }
    fb.put(x, y, '┌', style);
    fb.put(x + w - 1, y, '┐', style);
    fb.put(x, y + h - 1, '└', style);
    fb.put(x + w - 1, y + h - 1, '┘', style);
    for dx in 1..w - 1 {
        fb.put(x + dx, y, '─', style);
        fb.put(x + dx, y + h - 1, '─', style);
    }
    for dy in 1..h - 1 {
        fb.put(x, y + dy, '│', style);
        fb.put(x + w - 1, y + dy, '│', style);
    }
}

fn draw_centered(fb: &mut FrameBuffer, x: u16, w: u16, y: u16, text: &str) {
    let len = text.chars().count() as u16;
    let style = Style::new(Rgb::new(255, 255, 255), Rgb::new(0, 0, 0)).bold();
    fb.text(x + w.saturating_sub(len) / 2, y, text, style);
}
