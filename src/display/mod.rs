//! Rendering layer — all terminal I/O lives here.
//!
//! Each function receives an immutable view of the game state and draws
//! into a `Canvas`.  No game logic is performed; this module only
//! translates state into pixels, and the canvas into terminal commands.

pub mod canvas;

use std::io::Write;

pub use canvas::{Canvas, Rgb, Viewport};

use crate::assets::Assets;
use crate::config::GameConfig;
use crate::entities::GameState;
use crate::input::Pointer;

// ── Colour palette ────────────────────────────────────────────────────────────

pub const C_BACKGROUND: Rgb = [255, 255, 255];
pub const C_HUD: Rgb = [0, 0, 0];
pub const C_CROSSHAIR: Rgb = [255, 0, 0];

/// Logical position of the score/level line.
pub const HUD_X: i32 = 10;
pub const HUD_Y: i32 = 10;

// ── Public entry points ───────────────────────────────────────────────────────

/// Compose one complete frame without touching the terminal.
pub fn compose(
    state: &GameState,
    assets: &Assets,
    viewport: Viewport,
    pointer: Pointer,
    config: &GameConfig,
) -> Canvas {
    let mut canvas = Canvas::new(viewport);

    draw_background(&mut canvas, assets, config);
    draw_targets(&mut canvas, state, assets, config);
    draw_hud(&mut canvas, state);

    let (px, py) = viewport.to_logical(pointer.column, pointer.row);
    draw_crosshair(&mut canvas, px, py, config);

    canvas
}

/// Render one complete frame and present it.
pub fn render<W: Write>(
    out: &mut W,
    state: &GameState,
    assets: &Assets,
    viewport: Viewport,
    pointer: Pointer,
    config: &GameConfig,
) -> std::io::Result<()> {
    compose(state, assets, viewport, pointer, config).present(out)
}

pub fn hud_text(state: &GameState) -> String {
    format!("Score: {}  Level: {}", state.score, state.level)
}

// ── Layers ────────────────────────────────────────────────────────────────────

fn draw_background(canvas: &mut Canvas, assets: &Assets, config: &GameConfig) {
    match &assets.background {
        Some(image) => {
            canvas.fill(C_BACKGROUND);
            canvas.blit(image, 0, 0, config.screen_width, config.screen_height);
        }
        None => canvas.fill(C_BACKGROUND),
    }
}

fn draw_targets(canvas: &mut Canvas, state: &GameState, assets: &Assets, config: &GameConfig) {
    for target in &state.targets {
        canvas.blit(
            assets.frame(target.frame_index),
            target.x,
            target.y,
            config.target_width,
            config.target_height,
        );
    }
}

fn draw_hud(canvas: &mut Canvas, state: &GameState) {
    canvas.text(HUD_X, HUD_Y, &hud_text(state), C_HUD);
}

/// Circle plus cross, centred on the pointer.  Stands in for the hidden
/// terminal cursor.
fn draw_crosshair(canvas: &mut Canvas, x: i32, y: i32, config: &GameConfig) {
    let r = config.crosshair_radius;
    let stroke = config.crosshair_stroke;
    canvas.stroke_circle(x, y, r, stroke, C_CROSSHAIR);
    canvas.hline(x - r, x + r, y, stroke, C_CROSSHAIR);
    canvas.vline(x, y - r, y + r, stroke, C_CROSSHAIR);
}
