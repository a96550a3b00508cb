//! Rendering layer. All terminal output for the game screen lives here.
//!
//! Each function receives a writer, an immutable view of the game state and
//! the asset catalog. No game logic runs here: world coordinates are scaled
//! down to character cells (one tile = two columns by one row) and shifted by
//! the camera.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal, QueueableCommand,
};
use tile_runner::compute::drawables;
use tile_runner::config::Config;
use tile_runner::entities::{Body, GameState, ItemKind, SessionState, Sprite};

use crate::assets::{AssetCatalog, Glyph};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_HUD_SCORE: Color = Color::Yellow;
const C_HUD_LEVEL: Color = Color::Green;
const C_HUD_STAR: Color = Color::Yellow;
const C_HINT: Color = Color::DarkGrey;
const C_INVINCIBLE: Color = Color::Yellow;

/// Rows above the play area: HUD line and top border.
const PLAY_TOP: u16 = 2;
/// Columns per tile.
const TILE_COLS: f32 = 2.0;

/// Size of the play area in character cells.
#[derive(Clone, Copy, Debug)]
pub struct Viewport {
    pub cols: u16,
    pub rows: u16,
    tile: f32,
}

impl Viewport {
    pub fn from_config(config: &Config) -> Viewport {
        let tile = config.level.tile_size;
        Viewport {
            cols: (config.session.view_width / tile * TILE_COLS).round() as u16,
            rows: (config.session.view_height / tile).round() as u16,
            tile,
        }
    }

    /// Total terminal height needed, including HUD, borders and hint.
    pub fn screen_rows(&self) -> u16 {
        self.rows + PLAY_TOP + 2
    }

    fn bottom_border(&self) -> u16 {
        PLAY_TOP + self.rows
    }
}

// ── Public entry points ───────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(
    out: &mut W,
    state: &GameState,
    assets: &AssetCatalog,
    view: &Viewport,
    config: &Config,
) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    draw_border(out, view)?;
    draw_hud(out, state, config)?;

    let blink = state.player.is_invincible() && state.frame % 8 < 4;
    for (body, sprite) in drawables(state) {
        let is_player = matches!(sprite, Sprite::PlayerSmall | Sprite::PlayerBig);
        let mut glyph = assets.glyph(sprite);
        if is_player && blink {
            glyph.color = C_INVINCIBLE;
        }
        draw_body(out, state, view, &body, glyph)?;
    }

    draw_controls_hint(out, view)?;

    match state.status {
        SessionState::LevelCleared => draw_level_cleared(out, state, view)?,
        SessionState::GameOver => draw_game_over(out, state, view)?,
        SessionState::Menu | SessionState::Playing => {}
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, view.screen_rows()))?;
    out.flush()?;
    Ok(())
}

/// Title screen with a selectable list of entries.
pub fn render_menu<W: Write>(
    out: &mut W,
    entries: &[&str],
    selected: usize,
    assets: &AssetCatalog,
    view: &Viewport,
) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    let cx = view.cols / 2 + 1;
    let title = "TILE  RUNNER";
    centred(out, cx, 3, title, Color::Cyan)?;

    for (i, entry) in entries.iter().enumerate() {
        let color = if i == selected { Color::Yellow } else { Color::White };
        let label = if i == selected {
            format!("> {entry} <")
        } else {
            entry.to_string()
        };
        centred(out, cx, 6 + 2 * i as u16, &label, color)?;
    }

    let legend_row = 7 + 2 * entries.len() as u16;
    let legend: [(ItemKind, &str); 2] = [
        (ItemKind::Mushroom, " Mushroom: grow big, survive one hit"),
        (ItemKind::Star, " Star: ten seconds of invincibility"),
    ];
    for (i, (kind, desc)) in legend.iter().enumerate() {
        let glyph = assets.item_glyph(*kind);
        out.queue(cursor::MoveTo(2, legend_row + i as u16))?;
        out.queue(style::SetForegroundColor(glyph.color))?;
        out.queue(Print(glyph.text))?;
        out.queue(style::SetForegroundColor(C_HINT))?;
        out.queue(Print(*desc))?;
    }

    out.queue(cursor::MoveTo(2, legend_row + 3))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print("Up/Down: choose   Enter: select"))?;

    out.queue(style::ResetColor)?;
    out.flush()?;
    Ok(())
}

// ── Border ────────────────────────────────────────────────────────────────────

fn draw_border<W: Write>(out: &mut W, view: &Viewport) -> std::io::Result<()> {
    let w = view.cols as usize;
    let bottom = view.bottom_border();

    out.queue(style::SetForegroundColor(C_BORDER))?;

    out.queue(cursor::MoveTo(0, PLAY_TOP - 1))?;
    out.queue(Print(format!("┌{}┐", "─".repeat(w))))?;

    out.queue(cursor::MoveTo(0, bottom))?;
    out.queue(Print(format!("└{}┘", "─".repeat(w))))?;

    for row in PLAY_TOP..bottom {
        out.queue(cursor::MoveTo(0, row))?;
        out.queue(Print("│"))?;
        out.queue(cursor::MoveTo(view.cols + 1, row))?;
        out.queue(Print("│"))?;
    }

    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, state: &GameState, config: &Config) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    out.queue(Print(format!("Score:{:>7}", state.player.score)))?;

    out.queue(style::SetForegroundColor(C_HUD_LEVEL))?;
    out.queue(Print(format!("  Level {}", state.level_number)))?;

    if state.player.is_invincible() {
        let fps = config.session.fps.max(1);
        let secs = state.player.invincible_timer.div_ceil(fps);
        out.queue(style::SetForegroundColor(C_HUD_STAR))?;
        out.queue(Print(format!("  [* {secs:>2}s]")))?;
    }

    Ok(())
}

// ── Entities ──────────────────────────────────────────────────────────────────

/// Fill the cells covered by `body`, clipped to the play area.
fn draw_body<W: Write>(
    out: &mut W,
    state: &GameState,
    view: &Viewport,
    body: &Body,
    glyph: Glyph,
) -> std::io::Result<()> {
    let (sx, sy) = state.camera.apply(body);
    let col_width = view.tile / TILE_COLS;
    let first_col = (sx / col_width).floor() as i32;
    let end_col = ((sx + body.w) / col_width).ceil() as i32;
    let first_row = (sy / view.tile).floor() as i32;
    let last_row = ((sy + body.h) / view.tile - 0.001).floor() as i32;

    out.queue(style::SetForegroundColor(glyph.color))?;
    for row in first_row.max(0)..=last_row.min(view.rows as i32 - 1) {
        let mut col = first_col;
        while col < end_col {
            if col >= 0 && col + 2 <= view.cols as i32 {
                out.queue(cursor::MoveTo(col as u16 + 1, row as u16 + PLAY_TOP))?;
                out.queue(Print(glyph.text))?;
            }
            col += TILE_COLS as i32;
        }
    }
    Ok(())
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, view: &Viewport) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, view.bottom_border() + 1))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print("← → / A D : Move   ↑ / SPACE : Jump   Q : Quit"))?;
    Ok(())
}

// ── Overlays ──────────────────────────────────────────────────────────────────

fn draw_level_cleared<W: Write>(
    out: &mut W,
    state: &GameState,
    view: &Viewport,
) -> std::io::Result<()> {
    let cx = view.cols / 2 + 1;
    let cy = PLAY_TOP + view.rows / 2;
    let banner = format!("LEVEL {} CLEARED!", state.level_number);
    centred(out, cx, cy, &banner, Color::Green)
}

fn draw_game_over<W: Write>(out: &mut W, state: &GameState, view: &Viewport) -> std::io::Result<()> {
    let score_line = format!("Final Score: {}", state.player.score);
    let lines: &[(&str, Color)] = &[
        ("╔══════════════════╗", Color::Red),
        ("║    GAME  OVER    ║", Color::Red),
        ("╚══════════════════╝", Color::Red),
        (&score_line, Color::Yellow),
        ("R - Play Again  Q - Quit", Color::White),
    ];

    let cx = view.cols / 2 + 1;
    let start_row = (PLAY_TOP + view.rows / 2).saturating_sub(lines.len() as u16 / 2);

    for (i, (msg, color)) in lines.iter().enumerate() {
        centred(out, cx, start_row + i as u16, msg, *color)?;
    }

    Ok(())
}

fn centred<W: Write>(out: &mut W, cx: u16, row: u16, text: &str, color: Color) -> std::io::Result<()> {
    let col = cx.saturating_sub(text.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(col, row))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print(text))?;
    Ok(())
}
