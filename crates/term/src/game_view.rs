//! GameView: maps a [`GameSnapshot`] into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.
//!
//! Layout, centered in the viewport:
//!
//! ```text
//! ┌────────────────────┐  SCORE
//! │····················│  1200
//! │········██··········│
//! │       ...          │  HIGH ...
//! └────────────────────┘
//!
//! [<] [>] [ROT] [DOWN] [DROP] [HOLD] [PAUSE] [NEW] [SOUND]
//! ```

use crate::core::{spawn_shape, GameSnapshot, ShapeMatrix};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{ControlRegion, GameAction, PieceKind};

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

    pub fn contains(&self, other: Viewport) -> bool {
        self.width >= other.width && self.height >= other.height
    }
}

/// Session values shown next to the board that the game snapshot does not carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HudInfo {
    pub high_score: u32,
    pub sound_enabled: bool,
}

/// Piece colors, indexed by `color_index - 1`.
pub const PALETTE: [Rgb; 7] = [
    Rgb::new(0xFF, 0x0D, 0x72),
    Rgb::new(0x0D, 0xC2, 0xFF),
    Rgb::new(0x0D, 0xFF, 0x72),
    Rgb::new(0xF5, 0x38, 0xFF),
    Rgb::new(0xFF, 0x8E, 0x0D),
    Rgb::new(0xFF, 0xE1, 0x38),
    Rgb::new(0x38, 0x77, 0xF5),
];

/// Color for a stored cell value; `None` for empty (0) or unknown values.
pub fn palette_color(index: u8) -> Option<Rgb> {
    PALETTE.get(usize::from(index).checked_sub(1)?).copied()
}

/// On-screen buttons, left to right.
pub const CONTROLS: [(&str, GameAction); 9] = [
    ("<", GameAction::MoveLeft),
    (">", GameAction::MoveRight),
    ("ROT", GameAction::Rotate),
    ("DOWN", GameAction::SoftDrop),
    ("DROP", GameAction::HardDrop),
    ("HOLD", GameAction::Hold),
    ("PAUSE", GameAction::Pause),
    ("NEW", GameAction::Restart),
    ("SOUND", GameAction::ToggleSound),
];

const PANEL_GAP: u16 = 2;
const PANEL_W: u16 = 12;
/// Rows the side panel needs.
const PANEL_ROWS: u16 = 21;
/// Gap row plus the controls row.
const CONTROLS_ROWS: u16 = 2;

const BOARD_BG: Rgb = Rgb::new(30, 30, 40);
const GRID_FG: Rgb = Rgb::new(90, 90, 100);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Layout {
    start_x: u16,
    start_y: u16,
    frame_w: u16,
    frame_h: u16,
}

impl Layout {
    fn panel_x(&self) -> u16 {
        self.start_x + self.frame_w + PANEL_GAP
    }

    fn controls_y(&self) -> u16 {
        self.start_y + self.frame_h.max(PANEL_ROWS) + 1
    }
}

/// A lightweight terminal renderer for the game.
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
}

impl Default for GameView {
    fn default() -> Self {
        // Two columns per cell keeps cells roughly square in most fonts.
        Self { cell_w: 2 }
    }
}

impl GameView {
    pub fn new(cell_w: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
        }
    }

    fn frame_size(&self, board_w: u8, board_h: u8) -> (u16, u16) {
        (
            u16::from(board_w) * self.cell_w + 2,
            u16::from(board_h) + 2,
        )
    }

    /// Smallest viewport that shows a whole `board_w x board_h` game.
    pub fn min_viewport(&self, board_w: u8, board_h: u8) -> Viewport {
        let (frame_w, frame_h) = self.frame_size(board_w, board_h);
        let width = (frame_w + PANEL_GAP + PANEL_W).max(controls_width());
        let height = frame_h.max(PANEL_ROWS) + CONTROLS_ROWS;
        Viewport::new(width, height)
    }

    fn layout(&self, board_w: u8, board_h: u8, viewport: Viewport) -> Layout {
        let (frame_w, frame_h) = self.frame_size(board_w, board_h);
        let min = self.min_viewport(board_w, board_h);
        Layout {
            start_x: viewport.width.saturating_sub(min.width) / 2,
            start_y: viewport.height.saturating_sub(min.height) / 2,
            frame_w,
            frame_h,
        }
    }

    /// Clickable button regions for the current layout.
    pub fn control_regions_into(
        &self,
        snap: &GameSnapshot,
        viewport: Viewport,
        out: &mut Vec<ControlRegion>,
    ) {
        out.clear();
        let layout = self.layout(snap.board_width, snap.board_height, viewport);
        let y = layout.controls_y();
        if y >= viewport.height {
            return;
        }

        let mut x = layout.start_x;
        for (label, action) in CONTROLS {
            let width = FrameBuffer::text_width(label) + 2;
            if x.saturating_add(width) > viewport.width {
                break;
            }
            out.push(ControlRegion {
                x,
                y,
                width,
                action,
            });
            x += width + 1;
        }
    }

    pub fn control_regions(&self, snap: &GameSnapshot, viewport: Viewport) -> Vec<ControlRegion> {
        let mut out = Vec::with_capacity(CONTROLS.len());
        self.control_regions_into(snap, viewport, &mut out);
        out
    }

    /// Render the current game state into an existing framebuffer.
    ///
    /// Callers can reuse a framebuffer across frames and only resize when the
    /// terminal size changes.
    pub fn render_into(
        &self,
        snap: &GameSnapshot,
        hud: HudInfo,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().cell(' '));

        let layout = self.layout(snap.board_width, snap.board_height, viewport);
        let (sx, sy) = (layout.start_x, layout.start_y);
        let board_px_w = layout.frame_w - 2;
        let board_px_h = layout.frame_h - 2;

        let bg = CellStyle::new(GRID_FG, BOARD_BG);
        fb.fill_rect(sx + 1, sy + 1, board_px_w, board_px_h, ' ', bg);
        fb.draw_box(sx, sy, layout.frame_w, layout.frame_h, CellStyle::default());

        // Locked cells.
        for y in 0..snap.board_height {
            for x in 0..snap.board_width {
                match palette_color(snap.cell(x as usize, y as usize)) {
                    Some(color) => self.draw_block(fb, sx, sy, x as i8, y as i8, color, '█'),
                    None => self.draw_block(fb, sx, sy, x as i8, y as i8, GRID_FG, '·'),
                }
            }
        }

        if let Some(active) = snap.active {
            let color = palette_color(active.kind.color_index()).unwrap_or(GRID_FG);

            if let Some(ghost_y) = snap.ghost_y {
                if ghost_y != active.y {
                    for (dx, dy) in active.shape.minos() {
                        let ghost = color.darken(45);
                        self.draw_cell(fb, snap, sx, sy, active.x + dx, ghost_y + dy, ghost, '░');
                    }
                }
            }

            for (dx, dy) in active.shape.minos() {
                self.draw_cell(fb, snap, sx, sy, active.x + dx, active.y + dy, color, '█');
            }
        }

        self.draw_side_panel(fb, snap, hud, layout);
        self.draw_controls(fb, snap, viewport);

        if snap.game_over {
            self.draw_overlay(fb, layout, "GAME OVER", Some("R: restart"));
        } else if snap.paused {
            self.draw_overlay(fb, layout, "PAUSED", Some("P: resume"));
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, hud: HudInfo, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, hud, viewport, &mut fb);
        fb
    }

    /// Draw a piece cell, clipped to the visible board.
    #[allow(clippy::too_many_arguments)]
    fn draw_cell(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        sx: u16,
        sy: u16,
        x: i8,
        y: i8,
        color: Rgb,
        ch: char,
    ) {
        if x < 0 || y < 0 || x as u8 >= snap.board_width || y as u8 >= snap.board_height {
            return;
        }
        self.draw_block(fb, sx, sy, x, y, color, ch);
    }

    #[allow(clippy::too_many_arguments)]
    fn draw_block(&self, fb: &mut FrameBuffer, sx: u16, sy: u16, x: i8, y: i8, color: Rgb, ch: char) {
        let px = sx + 1 + (x as u16) * self.cell_w;
        let py = sy + 1 + y as u16;
        let mut style = CellStyle::new(color, BOARD_BG);
        if ch == '·' {
            style = style.dim();
        }
        fb.fill_rect(px, py, self.cell_w, 1, ch, style);
    }

    fn draw_preview(&self, fb: &mut FrameBuffer, x: u16, y: u16, shape: &ShapeMatrix, style: CellStyle) {
        for (dx, dy) in shape.minos() {
            let px = x + (dx as u16) * self.cell_w;
            fb.fill_rect(px, y + dy as u16, self.cell_w, 1, '█', style);
        }
    }

    fn draw_side_panel(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, hud: HudInfo, layout: Layout) {
        let px = layout.panel_x();
        let label = CellStyle::default().bold();
        let value = CellStyle::new(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0));

        let mut y = layout.start_y;
        for (name, number) in [
            ("SCORE", snap.score),
            ("HIGH", hud.high_score.max(snap.score)),
            ("LEVEL", snap.level),
            ("LINES", snap.lines),
        ] {
            fb.put_str(px, y, name, label);
            fb.put_u32(px, y + 1, number, value);
            y += 3;
        }

        fb.put_str(px, y, "NEXT", label);
        if let Some(kind) = snap.next {
            self.draw_preview(fb, px, y + 1, &spawn_shape(kind), piece_style(kind, false));
        }
        y += 4;

        fb.put_str(px, y, "HOLD", label);
        if let Some(kind) = snap.hold {
            self.draw_preview(fb, px, y + 1, &spawn_shape(kind), piece_style(kind, !snap.can_hold));
        }
        y += 4;

        let end = fb.put_str(px, y, "SOUND ", label);
        fb.put_str(end, y, if hud.sound_enabled { "on" } else { "off" }, value);
    }

    fn draw_controls(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, viewport: Viewport) {
        let enabled = CellStyle::new(Rgb::new(230, 230, 230), Rgb::new(50, 50, 70)).bold();
        let disabled = CellStyle::new(Rgb::new(120, 120, 120), Rgb::new(30, 30, 40)).dim();

        for region in self.control_regions(snap, viewport) {
            let style = if control_enabled(snap, region.action) {
                enabled
            } else {
                disabled
            };
            let Some(&(label, _)) = CONTROLS.iter().find(|(_, a)| *a == region.action) else {
                continue;
            };
            let x = fb.put_str(region.x, region.y, "[", style);
            let x = fb.put_str(x, region.y, label, style);
            fb.put_str(x, region.y, "]", style);
        }
    }

    fn draw_overlay(&self, fb: &mut FrameBuffer, layout: Layout, title: &str, hint: Option<&str>) {
        let style = CellStyle::new(Rgb::new(255, 255, 255), Rgb::new(0, 0, 0)).bold();
        let mid_y = layout.start_y + layout.frame_h / 2;

        let put_centered = |fb: &mut FrameBuffer, y: u16, text: &str, style: CellStyle| {
            let w = FrameBuffer::text_width(text);
            let x = layout.start_x + layout.frame_w.saturating_sub(w) / 2;
            fb.put_str(x, y, text, style);
        };

        put_centered(fb, mid_y, title, style);
        if let Some(hint) = hint {
            put_centered(fb, mid_y + 1, hint, CellStyle { bold: false, ..style });
        }
    }
}

fn controls_width() -> u16 {
    let buttons: u16 = CONTROLS
        .iter()
        .map(|(label, _)| FrameBuffer::text_width(label) + 2)
        .sum();
    buttons + CONTROLS.len() as u16 - 1
}

/// Whether clicking `action` would do anything in the current state.
pub fn control_enabled(snap: &GameSnapshot, action: GameAction) -> bool {
    match action {
        GameAction::Pause => snap.started && !snap.game_over,
        GameAction::Hold => snap.playable() && snap.can_hold,
        a if a.is_gated() => snap.playable(),
        _ => true,
    }
}

fn piece_style(kind: PieceKind, dimmed: bool) -> CellStyle {
    let color = palette_color(kind.color_index()).unwrap_or(GRID_FG);
    if dimmed {
        CellStyle::new(color.darken(50), Rgb::new(0, 0, 0)).dim()
    } else {
        CellStyle::new(color, Rgb::new(0, 0, 0))
    }
}
