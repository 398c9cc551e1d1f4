//! # Raster canvas
//!
//! A thin layer over an RGB image buffer with the handful of drawing
//! primitives a schedule needs: filled rectangles, axis-aligned lines and
//! anti-aliased text. Everything is clipped to the canvas.

use image::{Rgb, RgbImage};

use crate::{font::Face, style::Color};

pub mod table;

/// An RGB drawing surface
#[derive(Clone)]
pub struct Canvas {
    image: RgbImage,
}

impl Canvas {
    /// Create a new canvas filled with `background`
    pub fn new(width: u32, height: u32, background: Color) -> Self {
        Canvas {
            image: RgbImage::from_pixel(width, height, background.0),
        }
    }

    /// The width in pixels
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    /// The height in pixels
    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Borrow the image
    pub fn image(&self) -> &RgbImage {
        &self.image
    }

    /// Turn the canvas into its image
    pub fn into_image(self) -> RgbImage {
        self.image
    }

    /// Fill the rectangle with its top left corner at (`x`, `y`)
    pub fn fill_rect(&mut self, x: i32, y: i32, width: u32, height: u32, color: Color) {
        let x0 = x.max(0) as u32;
        let y0 = y.max(0) as u32;
        let x1 = (i64::from(x) + i64::from(width)).clamp(0, i64::from(self.width())) as u32;
        let y1 = (i64::from(y) + i64::from(height)).clamp(0, i64::from(self.height())) as u32;
        for py in y0..y1 {
            for px in x0..x1 {
                self.image.put_pixel(px, py, color.0);
            }
        }
    }

    /// Draw a horizontal line from `x0` to `x1` whose top edge is at `y`
    pub fn hline(&mut self, x0: i32, x1: i32, y: i32, thickness: u32, color: Color) {
        let width = (x1 - x0).max(0) as u32;
        self.fill_rect(x0, y, width, thickness, color);
    }

    /// Draw a vertical line from `y0` to `y1`, centered on `x`
    pub fn vline(&mut self, x: i32, y0: i32, y1: i32, thickness: u32, color: Color) {
        let height = (y1 - y0).max(0) as u32;
        let left = x - (thickness / 2) as i32;
        self.fill_rect(left, y0, thickness, height, color);
    }

    /// Draw one line of text with the top of the line at `y`
    pub fn draw_text(&mut self, face: &Face, x: i32, y: i32, text: &str, color: Color) {
        let baseline = y as f32 + face.ascent().round();
        let mut pen_x = x as f32;
        for c in text.chars() {
            let glyph = face.glyph(c);
            let left = (pen_x + glyph.xmin as f32).round() as i32;
            let top = (baseline - glyph.ymin as f32).round() as i32 - glyph.height as i32;
            for (row, line) in glyph.coverage.chunks(glyph.width.max(1)).enumerate() {
                for (col, &alpha) in line.iter().enumerate() {
                    self.blend(left + col as i32, top + row as i32, color, alpha);
                }
            }
            pen_x += glyph.advance;
        }
    }

    fn blend(&mut self, x: i32, y: i32, color: Color, alpha: u8) {
        if alpha == 0 || x < 0 || y < 0 || x as u32 >= self.width() || y as u32 >= self.height() {
            return;
        }
        let Rgb(dst) = self.image.get_pixel_mut(x as u32, y as u32);
        let a = u16::from(alpha);
        for (d, s) in dst.iter_mut().zip(color.0 .0) {
            *d = ((u16::from(s) * a + u16::from(*d) * (255 - a) + 127) / 255) as u8;
        }
    }
}
