// Tiny 5x7 bitmap font, scaled with box filtering so edges come out anti-aliased.
// Covers the glyph ramp plus the letters the status label needs.

use image::{Rgb, RgbImage};

pub const FONT_W: usize = 5;
pub const FONT_H: usize = 7;

/// Return a 5x7 glyph bitmap for a limited character set.
/// Each u8 is a row; the low 5 bits are the pixels (bit 4 = leftmost).
fn glyph5x7(ch: char) -> Option<[u8; 7]> {
    // seven rows in, one bitmap out
    macro_rules! g { ($a:expr,$b:expr,$c:expr,$d:expr,$e:expr,$f:expr,$g:expr) => {
        Some([$a,$b,$c,$d,$e,$f,$g])
    }; }

    match ch {
        // Ramp glyphs, densest first
        '@' => g!(0b01110,0b10001,0b10111,0b10101,0b10111,0b10000,0b01111),
        '%' => g!(0b11001,0b11010,0b00010,0b00100,0b01000,0b01011,0b10011),
        '#' => g!(0b01010,0b01010,0b11111,0b01010,0b11111,0b01010,0b01010),
        '*' => g!(0b00000,0b00100,0b10101,0b01110,0b10101,0b00100,0b00000),
        '+' => g!(0b00000,0b00100,0b00100,0b11111,0b00100,0b00100,0b00000),
        '=' => g!(0b00000,0b00000,0b11111,0b00000,0b11111,0b00000,0b00000),
        '-' => g!(0b00000,0b00000,0b00000,0b11111,0b00000,0b00000,0b00000),
        ':' => g!(0b00000,0b00100,0b00000,0b00000,0b00100,0b00000,0b00000),
        '.' => g!(0b00000,0b00000,0b00000,0b00000,0b00000,0b00000,0b00100),
        ' ' => g!(0b00000,0b00000,0b00000,0b00000,0b00000,0b00000,0b00000),

        // Uppercase letters for "ASCII MODE", "NORMAL MODE", "PAUSED"
        'A' => g!(0b01110,0b10001,0b10001,0b11111,0b10001,0b10001,0b10001),
        'C' => g!(0b01110,0b10001,0b10000,0b10000,0b10000,0b10001,0b01110),
        'D' => g!(0b11100,0b10010,0b10001,0b10001,0b10001,0b10010,0b11100),
        'E' => g!(0b11111,0b10000,0b10000,0b11110,0b10000,0b10000,0b11111),
        'I' => g!(0b01110,0b00100,0b00100,0b00100,0b00100,0b00100,0b01110),
        'L' => g!(0b10000,0b10000,0b10000,0b10000,0b10000,0b10000,0b11111),
        'M' => g!(0b10001,0b11011,0b10101,0b10101,0b10001,0b10001,0b10001),
        'N' => g!(0b10001,0b11001,0b10101,0b10011,0b10001,0b10001,0b10001),
        'O' => g!(0b01110,0b10001,0b10001,0b10001,0b10001,0b10001,0b01110),
        'P' => g!(0b11110,0b10001,0b10001,0b11110,0b10000,0b10000,0b10000),
        'R' => g!(0b11110,0b10001,0b10001,0b11110,0b10100,0b10010,0b10001),
        'S' => g!(0b01111,0b10000,0b10000,0b01110,0b00001,0b00001,0b11110),
        'U' => g!(0b10001,0b10001,0b10001,0b10001,0b10001,0b10001,0b01110),

        _ => None,
    }
}

/// One glyph rasterized to a fixed pixel size.
/// `coverage` is row-major, 0 = untouched, 255 = fully inked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlyphMask {
    pub width: u32,
    pub height: u32,
    pub coverage: Vec<u8>,
}

impl GlyphMask {
    fn blank(width: u32, height: u32) -> Self {
        Self { width, height, coverage: vec![0; (width * height) as usize] }
    }

    pub fn is_blank(&self) -> bool {
        self.coverage.iter().all(|&c| c == 0)
    }
}

/// Fraction of the source rectangle [x0,x1)x[y0,y1) (in font cells) that is inked.
fn area_coverage(rows: &[u8; 7], x0: f32, x1: f32, y0: f32, y1: f32) -> f32 {
    let area = (x1 - x0) * (y1 - y0);
    if area <= 0.0 {
        return 0.0;
    }
    let mut inked = 0.0;
    let sy_end = (y1.ceil() as usize).min(FONT_H);
    let sx_end = (x1.ceil() as usize).min(FONT_W);
    for sy in (y0.floor() as usize)..sy_end {
        let oy = (y1.min(sy as f32 + 1.0) - y0.max(sy as f32)).max(0.0);
        if oy == 0.0 { continue; }
        for sx in (x0.floor() as usize)..sx_end {
            if rows[sy] & (1 << (4 - sx)) == 0 { continue; }
            let ox = (x1.min(sx as f32 + 1.0) - x0.max(sx as f32)).max(0.0);
            inked += ox * oy;
        }
    }
    inked / area
}

/// Rasterize `ch` into a `width` x `height` coverage mask.
/// At 5x7 the result is the exact bitmap; other sizes get fractional edge coverage.
/// Characters without a bitmap come back blank.
pub fn rasterize(ch: char, width: u32, height: u32) -> GlyphMask {
    let Some(rows) = glyph5x7(ch) else {
        return GlyphMask::blank(width, height);
    };
    if width == 0 || height == 0 {
        return GlyphMask::blank(width, height);
    }

    let sx = FONT_W as f32 / width as f32;
    let sy = FONT_H as f32 / height as f32;
    let mut coverage = Vec::with_capacity((width * height) as usize);
    for oy in 0..height {
        let (y0, y1) = (oy as f32 * sy, (oy + 1) as f32 * sy);
        for ox in 0..width {
            let (x0, x1) = (ox as f32 * sx, (ox + 1) as f32 * sx);
            let c = area_coverage(&rows, x0, x1, y0, y1);
            coverage.push((c * 255.0).round().clamp(0.0, 255.0) as u8);
        }
    }
    GlyphMask { width, height, coverage }
}

/// Glyph width that keeps the 5:7 proportion for a given height.
pub fn width_for_height(height: u32) -> u32 {
    ((height * FONT_W as u32 + FONT_H as u32 / 2) / FONT_H as u32).max(1)
}

/// Blend `color` into `img` at (x,y) with `alpha` in 0..=255, if inside bounds.
#[inline]
fn blend_pixel(img: &mut RgbImage, x: i32, y: i32, color: Rgb<u8>, alpha: u8) {
    if alpha == 0 || x < 0 || y < 0 {
        return;
    }
    let (x, y) = (x as u32, y as u32);
    if x >= img.width() || y >= img.height() {
        return;
    }
    let px = img.get_pixel_mut(x, y);
    if alpha == 255 {
        *px = color;
        return;
    }
    let a = alpha as u16;
    for c in 0..3 {
        let old = px[c] as u16;
        let new = color[c] as u16;
        px[c] = ((new * a + old * (255 - a) + 127) / 255) as u8;
    }
}

/// Stamp a mask with its bottom-left corner on the baseline point (x, baseline).
pub fn stamp(img: &mut RgbImage, mask: &GlyphMask, x: i32, baseline: i32, color: Rgb<u8>) {
    let top = baseline - mask.height as i32;
    for my in 0..mask.height {
        let row = (my * mask.width) as usize;
        for mx in 0..mask.width {
            let a = mask.coverage[row + mx as usize];
            blend_pixel(img, x + mx as i32, top + my as i32, color, a);
        }
    }
}

/// Draw a text string left to right, baseline anchored at (x, baseline).
/// `bold` doubles the stroke by stamping each glyph twice, one pixel apart.
pub fn draw_text(
    img: &mut RgbImage,
    mut x: i32,
    baseline: i32,
    text: &str,
    height: u32,
    color: Rgb<u8>,
    bold: bool,
) {
    let width = width_for_height(height);
    let advance = (width + (width / 5).max(1) + u32::from(bold)) as i32;
    for ch in text.chars() {
        let mask = rasterize(ch, width, height);
        stamp(img, &mask, x, baseline, color);
        if bold {
            stamp(img, &mask, x + 1, baseline, color);
        }
        x += advance;
    }
}

/// Pre-rasterized masks for every glyph of a ramp, indexed like the ramp.
pub struct GlyphAtlas {
    masks: Vec<GlyphMask>,
}

impl GlyphAtlas {
    pub fn new(ramp: &str, width: u32, height: u32) -> Self {
        Self { masks: ramp.chars().map(|ch| rasterize(ch, width, height)).collect() }
    }

    /// Atlas sized for square cells of `scale` pixels: one pixel of leading above the glyph.
    pub fn for_cell(ramp: &str, scale: u32) -> Self {
        let height = scale.saturating_sub(1).max(1);
        Self::new(ramp, width_for_height(height).min(scale.max(1)), height)
    }

    pub fn len(&self) -> usize {
        self.masks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.masks.is_empty()
    }

    pub fn get(&self, index: usize) -> &GlyphMask {
        &self.masks[index]
    }
}
