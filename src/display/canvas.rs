/// Off-screen frame buffer for the terminal.
///
/// The logical canvas (800x600 by default) is sampled onto a grid of
/// sub-pixels: one column per terminal cell and two rows per cell, drawn
/// with the upper-half-block glyph (foreground = top, background = bottom).
/// All drawing happens here; `present` is the only place that writes to
/// the terminal.

use std::io::Write;
use std::ops::Range;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    QueueableCommand,
};
use image::RgbaImage;

use crate::config::GameConfig;

pub type Rgb = [u8; 3];

const HALF_BLOCK: char = '▀';

// ── Viewport ──────────────────────────────────────────────────────────────────

/// Mapping between terminal cells and logical canvas coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub columns: u16,
    pub rows: u16,
    pub logical_width: i32,
    pub logical_height: i32,
}

impl Viewport {
    pub fn new(columns: u16, rows: u16, config: &GameConfig) -> Self {
        Viewport {
            columns: columns.max(1),
            rows: rows.max(1),
            logical_width: config.screen_width.max(1),
            logical_height: config.screen_height.max(1),
        }
    }

    /// Logical point at the centre of cell `(column, row)`.
    pub fn to_logical(&self, column: u16, row: u16) -> (i32, i32) {
        let x = (2 * i64::from(column) + 1) * i64::from(self.logical_width)
            / (2 * i64::from(self.columns));
        let y = (2 * i64::from(row) + 1) * i64::from(self.logical_height)
            / (2 * i64::from(self.rows));
        (x as i32, y as i32)
    }
}

// ── Canvas ────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq)]
struct Glyph {
    ch: char,
    fg: Rgb,
}

pub struct Canvas {
    viewport: Viewport,
    /// Sub-pixel grid: `columns` wide, `2 * rows` tall, row-major.
    pixels: Vec<Rgb>,
    /// Text layer, one slot per terminal cell.
    glyphs: Vec<Option<Glyph>>,
}

impl Canvas {
    pub fn new(viewport: Viewport) -> Self {
        let cells = viewport.columns as usize * viewport.rows as usize;
        Canvas {
            viewport,
            pixels: vec![[0, 0, 0]; cells * 2],
            glyphs: vec![None; cells],
        }
    }

    /// Sub-pixel columns.
    pub fn width(&self) -> usize {
        self.viewport.columns as usize
    }

    /// Sub-pixel rows (twice the terminal rows).
    pub fn height(&self) -> usize {
        self.viewport.rows as usize * 2
    }

    pub fn pixel(&self, sx: usize, sy: usize) -> Rgb {
        self.pixels[sy * self.width() + sx]
    }

    /// Sub-pixel containing logical point `(x, y)`, if it is on the canvas.
    pub fn subpixel_at(&self, x: i32, y: i32) -> Option<(usize, usize)> {
        let (sw, sh) = self.subpixel_size();
        let sx = (x as f32 / sw).floor();
        let sy = (y as f32 / sh).floor();
        if sx < 0.0 || sy < 0.0 || sx as usize >= self.width() || sy as usize >= self.height() {
            return None;
        }
        Some((sx as usize, sy as usize))
    }

    pub fn glyph(&self, column: usize, row: usize) -> Option<char> {
        self.glyphs[row * self.width() + column].map(|g| g.ch)
    }

    /// Text on terminal row `row`, with untouched cells as spaces.
    pub fn text_row(&self, row: usize) -> String {
        (0..self.width())
            .map(|column| self.glyph(column, row).unwrap_or(' '))
            .collect()
    }

    fn subpixel_size(&self) -> (f32, f32) {
        (
            self.viewport.logical_width as f32 / self.width() as f32,
            self.viewport.logical_height as f32 / self.height() as f32,
        )
    }

    /// Indices whose centres fall in `[a, b)`, given a cell size and count.
    fn span(a: f32, b: f32, cell: f32, len: usize) -> Range<usize> {
        let clamp = |v: f32| v.max(0.0).min(len as f32) as usize;
        let lo = clamp((a / cell - 0.5).ceil());
        let hi = clamp((b / cell - 0.5).ceil());
        lo..hi.max(lo)
    }

    /// Like `span`, but never empty when the interval is on the canvas:
    /// thin strokes still light the sub-pixel they pass through.
    fn cover(a: f32, b: f32, cell: f32, len: usize) -> Range<usize> {
        let range = Self::span(a, b, cell, len);
        if !range.is_empty() {
            return range;
        }
        let mid = ((a + b) / 2.0 / cell).floor();
        if mid >= 0.0 && (mid as usize) < len {
            mid as usize..mid as usize + 1
        } else {
            0..0
        }
    }

    fn set(&mut self, sx: usize, sy: usize, color: Rgb) {
        let w = self.width();
        self.pixels[sy * w + sx] = color;
    }

    // ── Drawing ───────────────────────────────────────────────────────────────

    pub fn fill(&mut self, color: Rgb) {
        self.pixels.iter_mut().for_each(|p| *p = color);
    }

    /// Draw `image` scaled into the logical rectangle `(x, y, w, h)`,
    /// blending by the image's alpha channel.
    pub fn blit(&mut self, image: &RgbaImage, x: i32, y: i32, w: i32, h: i32) {
        if w <= 0 || h <= 0 || image.width() == 0 || image.height() == 0 {
            return;
        }
        let (sw, sh) = self.subpixel_size();
        let cols = Self::span(x as f32, (x + w) as f32, sw, self.width());
        let rows = Self::span(y as f32, (y + h) as f32, sh, self.height());

        for sy in rows {
            let ly = (sy as f32 + 0.5) * sh;
            let v = (((ly - y as f32) / h as f32) * image.height() as f32) as u32;
            let v = v.min(image.height() - 1);
            for sx in cols.clone() {
                let lx = (sx as f32 + 0.5) * sw;
                let u = (((lx - x as f32) / w as f32) * image.width() as f32) as u32;
                let u = u.min(image.width() - 1);

                let [r, g, b, a] = image.get_pixel(u, v).0;
                if a == 0 {
                    continue;
                }
                let under = self.pixel(sx, sy);
                self.set(sx, sy, blend(under, [r, g, b], a));
            }
        }
    }

    /// Horizontal segment from `x0` to `x1` (inclusive) at height `y`.
    pub fn hline(&mut self, x0: i32, x1: i32, y: i32, stroke: i32, color: Rgb) {
        let (sw, sh) = self.subpixel_size();
        let half = stroke.max(1) as f32 / 2.0;
        let cols = Self::cover(x0.min(x1) as f32, (x0.max(x1) + 1) as f32, sw, self.width());
        let rows = Self::cover(y as f32 - half, y as f32 + half, sh, self.height());
        for sy in rows {
            for sx in cols.clone() {
                self.set(sx, sy, color);
            }
        }
    }

    /// Vertical segment from `y0` to `y1` (inclusive) at column `x`.
    pub fn vline(&mut self, x: i32, y0: i32, y1: i32, stroke: i32, color: Rgb) {
        let (sw, sh) = self.subpixel_size();
        let half = stroke.max(1) as f32 / 2.0;
        let cols = Self::cover(x as f32 - half, x as f32 + half, sw, self.width());
        let rows = Self::cover(y0.min(y1) as f32, (y0.max(y1) + 1) as f32, sh, self.height());
        for sy in rows {
            for sx in cols.clone() {
                self.set(sx, sy, color);
            }
        }
    }

    /// Circle outline centred on `(cx, cy)`.
    pub fn stroke_circle(&mut self, cx: i32, cy: i32, radius: i32, stroke: i32, color: Rgb) {
        let (sw, sh) = self.subpixel_size();
        let r = radius.max(0) as f32;
        // Sub-pixels are much coarser than logical pixels; widen the ring so
        // it stays connected.
        let tolerance = (stroke.max(1) as f32 / 2.0).max(sw.max(sh) / 2.0);
        let reach = r + tolerance;
        let cols = Self::cover(cx as f32 - reach, cx as f32 + reach, sw, self.width());
        let rows = Self::cover(cy as f32 - reach, cy as f32 + reach, sh, self.height());

        for sy in rows {
            let dy = (sy as f32 + 0.5) * sh - cy as f32;
            for sx in cols.clone() {
                let dx = (sx as f32 + 0.5) * sw - cx as f32;
                let d = (dx * dx + dy * dy).sqrt();
                if (d - r).abs() <= tolerance {
                    self.set(sx, sy, color);
                }
            }
        }
    }

    /// Write `text` starting at the cell that contains logical `(x, y)`.
    /// Characters past the right edge are clipped.
    pub fn text(&mut self, x: i32, y: i32, text: &str, fg: Rgb) {
        let cell_w = self.viewport.logical_width as f32 / self.width() as f32;
        let cell_h = self.viewport.logical_height as f32 / self.viewport.rows as f32;
        let column = (x as f32 / cell_w).floor();
        let row = (y as f32 / cell_h).floor();
        if column < 0.0 || row < 0.0 || row as usize >= self.viewport.rows as usize {
            return;
        }
        let (column, row) = (column as usize, row as usize);
        let w = self.width();
        for (i, ch) in text.chars().enumerate() {
            if column + i >= w {
                break;
            }
            self.glyphs[row * w + column + i] = Some(Glyph { ch, fg });
        }
    }

    // ── Output ────────────────────────────────────────────────────────────────

    /// Write the whole frame to `out` and flush it.
    pub fn present<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        let w = self.width();
        let mut current: Option<(Rgb, Rgb)> = None;

        for row in 0..self.viewport.rows as usize {
            out.queue(cursor::MoveTo(0, row as u16))?;
            for column in 0..w {
                let top = self.pixels[2 * row * w + column];
                let bottom = self.pixels[(2 * row + 1) * w + column];
                let (ch, fg, bg) = match self.glyphs[row * w + column] {
                    Some(glyph) => (glyph.ch, glyph.fg, average(top, bottom)),
                    None => (HALF_BLOCK, top, bottom),
                };

                if current != Some((fg, bg)) {
                    out.queue(style::SetForegroundColor(to_color(fg)))?;
                    out.queue(style::SetBackgroundColor(to_color(bg)))?;
                    current = Some((fg, bg));
                }
                out.queue(Print(ch))?;
            }
        }

        out.queue(style::ResetColor)?;
        out.flush()?;
        Ok(())
    }
}

fn blend(under: Rgb, over: Rgb, alpha: u8) -> Rgb {
    let a = u16::from(alpha);
    let mix = |u: u8, o: u8| ((u16::from(o) * a + u16::from(u) * (255 - a)) / 255) as u8;
    [
        mix(under[0], over[0]),
        mix(under[1], over[1]),
        mix(under[2], over[2]),
    ]
}

fn average(a: Rgb, b: Rgb) -> Rgb {
    let avg = |x: u8, y: u8| ((u16::from(x) + u16::from(y)) / 2) as u8;
    [avg(a[0], b[0]), avg(a[1], b[1]), avg(a[2], b[2])]
}

fn to_color([r, g, b]: Rgb) -> Color {
    Color::Rgb { r, g, b }
}
