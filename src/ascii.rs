// Frame -> ASCII art: shrink the grayscale frame, then paint one glyph per pixel.
// Visual: dark areas turn into dense '@' / '%', bright areas into ':' '.' or blank.

use crate::font::{self, GlyphAtlas};
use image::imageops::{self, FilterType};
use image::{GrayImage, Rgb, RgbImage};

/// Map an 8-bit intensity onto `ramp_len` buckets: floor(p * len / 256).
/// Always < `ramp_len` because p <= 255.
#[inline]
pub fn ramp_index(p: u8, ramp_len: usize) -> usize {
    p as usize * ramp_len / 256
}

/// Size of the downscaled frame: (new_width, round(h / w * new_width * factor)).
pub fn downscaled_size(width: u32, height: u32, new_width: u32, factor: f64) -> (u32, u32) {
    if width == 0 {
        return (new_width, 0);
    }
    let h = (height as f64 / width as f64 * new_width as f64 * factor).round();
    (new_width, h.max(0.0) as u32)
}

/// Shrink a grayscale frame to `new_width`, squashing it vertically by `factor`.
/// A zero-sized result is returned empty rather than resampled.
pub fn downscale(gray: &GrayImage, new_width: u32, factor: f64) -> GrayImage {
    let (w, h) = downscaled_size(gray.width(), gray.height(), new_width, factor);
    if w == 0 || h == 0 {
        return GrayImage::new(w, h);
    }
    imageops::resize(gray, w, h, FilterType::Triangle)
}

/// Paints grayscale frames as glyph art on a white canvas.
pub struct AsciiRenderer {
    atlas: GlyphAtlas,
    scale: u32,
    color: Rgb<u8>,
}

impl AsciiRenderer {
    pub fn new(ramp: &str, scale: u32, color: Rgb<u8>) -> Self {
        Self { atlas: GlyphAtlas::for_cell(ramp, scale), scale, color }
    }

    /// Canvas is exactly (cols * scale) x (rows * scale); cell (i, j) gets its
    /// glyph with the bottom-left corner at (j * scale, (i + 1) * scale).
    pub fn render(&self, gray: &GrayImage) -> RgbImage {
        let (cols, rows) = gray.dimensions();
        let mut canvas =
            RgbImage::from_pixel(cols * self.scale, rows * self.scale, Rgb([255, 255, 255]));
        if self.atlas.is_empty() {
            return canvas;
        }

        let s = self.scale as i32;
        for (j, i, p) in gray.enumerate_pixels() {
            let mask = self.atlas.get(ramp_index(p[0], self.atlas.len()));
            if mask.is_blank() {
                continue;
            }
            font::stamp(&mut canvas, mask, j as i32 * s, (i as i32 + 1) * s, self.color);
        }
        canvas
    }
}
