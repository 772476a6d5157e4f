//! Monospace bitmap fonts.
//!
//! A font is an RGBA atlas of 16 x 16 cells, one per ASCII code. The builtin
//! font is rasterised from 5x7 glyph patterns; an external atlas in the same
//! layout can be loaded from a PNG instead. Cell 0 is always solid white so
//! untextured quads can sample it.

use std::path::Path;

use anyhow::Context;
use image::{Rgba, RgbaImage};

use super::batch::UvRect;

const GRID: u32 = 16;
const BUILTIN_CELL: u32 = 8;
const BUILTIN_ADVANCE: u32 = 6;

pub struct Font {
    atlas: RgbaImage,
    cell_width: u32,
    cell_height: u32,
    advance: u32,
}

impl Font {
    pub fn builtin() -> Self {
        let size = GRID * BUILTIN_CELL;
        let mut atlas = RgbaImage::new(size, size);
        for code in 32u8..127 {
            let (cx, cy) = cell_origin(code, BUILTIN_CELL, BUILTIN_CELL);
            for (row, &bits) in glyph(code as char).iter().enumerate() {
                for col in 0..5 {
                    if (bits >> (4 - col)) & 1 == 1 {
                        atlas.put_pixel(cx + col, cy + row as u32, Rgba([255, 255, 255, 255]));
                    }
                }
            }
        }
        let mut font = Self {
            atlas,
            cell_width: BUILTIN_CELL,
            cell_height: BUILTIN_CELL,
            advance: BUILTIN_ADVANCE,
        };
        font.fill_white_cell();
        font
    }

    /// Loads a 16 x 16 cell ASCII atlas.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let atlas = image::open(path)
            .with_context(|| format!("failed to load font atlas {}", path.display()))?
            .to_rgba8();
        let (width, height) = atlas.dimensions();
        if width < GRID || height < GRID {
            anyhow::bail!("font atlas {} is only {}x{} pixels", path.display(), width, height);
        }
        let mut font = Self {
            atlas,
            cell_width: width / GRID,
            cell_height: height / GRID,
            advance: width / GRID,
        };
        font.fill_white_cell();
        log::info!("loaded font atlas {} ({}x{})", path.display(), width, height);
        Ok(font)
    }

    /// The configured atlas if one is given, the builtin font otherwise.
    pub fn from_settings(path: Option<&Path>) -> anyhow::Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::builtin()),
        }
    }

    pub fn atlas(&self) -> &RgbaImage {
        &self.atlas
    }

    /// Horizontal distance between characters at scale 1.
    pub fn advance(&self) -> f32 {
        self.advance as f32
    }

    pub fn line_height(&self) -> f32 {
        self.cell_height as f32
    }

    pub fn text_width(&self, text: &str, scale: f32) -> f32 {
        text.chars().count() as f32 * self.advance() * scale
    }

    pub fn glyph_uv(&self, c: char) -> UvRect {
        let code = if c.is_ascii() && !c.is_ascii_control() { c as u8 } else { b'?' };
        let (x, y) = cell_origin(code, self.cell_width, self.cell_height);
        self.uv(x, y, self.advance, self.cell_height)
    }

    /// A patch inside the solid white cell.
    pub fn white_uv(&self) -> UvRect {
        let (w, h) = (self.cell_width.max(2), self.cell_height.max(2));
        self.uv(1, 1, w - 2, h - 2)
    }

    fn uv(&self, x: u32, y: u32, w: u32, h: u32) -> UvRect {
        let (aw, ah) = self.atlas.dimensions();
        [
            x as f32 / aw as f32,
            y as f32 / ah as f32,
            (x + w) as f32 / aw as f32,
            (y + h) as f32 / ah as f32,
        ]
    }

    fn fill_white_cell(&mut self) {
        for y in 0..self.cell_height {
            for x in 0..self.cell_width {
                self.atlas.put_pixel(x, y, Rgba([255, 255, 255, 255]));
            }
        }
    }
}

fn cell_origin(code: u8, cell_width: u32, cell_height: u32) -> (u32, u32) {
    let code = code as u32;
    ((code % GRID) * cell_width, (code / GRID) * cell_height)
}

/// 5x7 patterns, one byte per row, most significant of the low five bits on
/// the left.
fn glyph(c: char) -> [u8; 7] {
    match c.to_ascii_uppercase() {
        'A' => [0b01110, 0b10001, 0b10001, 0b11111, 0b10001, 0b10001, 0b10001],
        'B' => [0b11110, 0b10001, 0b10001, 0b11110, 0b10001, 0b10001, 0b11110],
        'C' => [0b01110, 0b10001, 0b10000, 0b10000, 0b10000, 0b10001, 0b01110],
        'D' => [0b11110, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b11110],
        'E' => [0b11111, 0b10000, 0b10000, 0b11110, 0b10000, 0b10000, 0b11111],
        'F' => [0b11111, 0b10000, 0b10000, 0b11110, 0b10000, 0b10000, 0b10000],
        'G' => [0b01110, 0b10001, 0b10000, 0b10111, 0b10001, 0b10001, 0b01110],
        'H' => [0b10001, 0b10001, 0b10001, 0b11111, 0b10001, 0b10001, 0b10001],
        'I' => [0b11111, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b11111],
        'J' => [0b00111, 0b00010, 0b00010, 0b00010, 0b00010, 0b10010, 0b01100],
        'K' => [0b10001, 0b10010, 0b10100, 0b11000, 0b10100, 0b10010, 0b10001],
        'L' => [0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b11111],
        'M' => [0b10001, 0b11011, 0b10101, 0b10001, 0b10001, 0b10001, 0b10001],
        'N' => [0b10001, 0b11001, 0b10101, 0b10011, 0b10001, 0b10001, 0b10001],
        'O' => [0b01110, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110],
        'P' => [0b11110, 0b10001, 0b10001, 0b11110, 0b10000, 0b10000, 0b10000],
        'Q' => [0b01110, 0b10001, 0b10001, 0b10001, 0b10101, 0b10010, 0b01101],
        'R' => [0b11110, 0b10001, 0b10001, 0b11110, 0b10100, 0b10010, 0b10001],
        'S' => [0b01110, 0b10001, 0b10000, 0b01110, 0b00001, 0b10001, 0b01110],
        'T' => [0b11111, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100],
        'U' => [0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110],
        'V' => [0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01010, 0b00100],
        'W' => [0b10001, 0b10001, 0b10001, 0b10001, 0b10101, 0b11011, 0b10001],
        'X' => [0b10001, 0b10001, 0b01010, 0b00100, 0b01010, 0b10001, 0b10001],
        'Y' => [0b10001, 0b10001, 0b01010, 0b00100, 0b00100, 0b00100, 0b00100],
        'Z' => [0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b10000, 0b11111],
        '0' => [0b01110, 0b10001, 0b10011, 0b10101, 0b11001, 0b10001, 0b01110],
        '1' => [0b00100, 0b01100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110],
        '2' => [0b01110, 0b10001, 0b00001, 0b00110, 0b01000, 0b10000, 0b11111],
        '3' => [0b11111, 0b00010, 0b00100, 0b00010, 0b00001, 0b10001, 0b01110],
        '4' => [0b00010, 0b00110, 0b01010, 0b10010, 0b11111, 0b00010, 0b00010],
        '5' => [0b11111, 0b10000, 0b11110, 0b00001, 0b00001, 0b10001, 0b01110],
        '6' => [0b00110, 0b01000, 0b10000, 0b11110, 0b10001, 0b10001, 0b01110],
        '7' => [0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b01000, 0b01000],
        '8' => [0b01110, 0b10001, 0b10001, 0b01110, 0b10001, 0b10001, 0b01110],
        '9' => [0b01110, 0b10001, 0b10001, 0b01111, 0b00001, 0b00010, 0b01100],
        ':' => [0b00000, 0b00000, 0b00100, 0b00000, 0b00100, 0b00000, 0b00000],
        '/' => [0b00001, 0b00010, 0b00010, 0b00100, 0b01000, 0b01000, 0b10000],
        '<' => [0b00010, 0b00100, 0b01000, 0b10000, 0b01000, 0b00100, 0b00010],
        '>' => [0b01000, 0b00100, 0b00010, 0b00001, 0b00010, 0b00100, 0b01000],
        '-' => [0b00000, 0b00000, 0b00000, 0b11111, 0b00000, 0b00000, 0b00000],
        '+' => [0b00000, 0b00100, 0b00100, 0b11111, 0b00100, 0b00100, 0b00000],
        '.' => [0b00000, 0b00000, 0b00000, 0b00000, 0b00000, 0b01100, 0b01100],
        ',' => [0b00000, 0b00000, 0b00000, 0b00000, 0b01100, 0b00100, 0b01000],
        '!' => [0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b00000, 0b00100],
        '(' => [0b00010, 0b00100, 0b01000, 0b01000, 0b01000, 0b00100, 0b00010],
        ')' => [0b01000, 0b00100, 0b00010, 0b00010, 0b00010, 0b00100, 0b01000],
        ' ' => [0; 7],
        _ => [0b01110, 0b10001, 0b00001, 0b00010, 0b00100, 0b00000, 0b00100],
    }
}
