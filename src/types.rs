// Window-side pixel buffer.

use image::RgbImage;

#[derive(Clone, Default)]
pub struct FrameBuffer {
    pub width: usize,      // how wide the frame is on screen (pixels)
    pub height: usize,     // how tall the frame is on screen (pixels)
    pub pixels: Vec<u32>,  // each entry is 0x00RRGGBB for minifb
}

impl FrameBuffer {
    /// Repack an RGB image into this buffer, reusing its allocation.
    pub fn fill_from_rgb(&mut self, img: &RgbImage) {
        let (w, h) = img.dimensions();
        self.width = w as usize;
        self.height = h as usize;
        self.pixels.clear();
        self.pixels.reserve(self.width * self.height);
        for pixel in img.pixels() {
            // Each `pixel` is Rgb<u8>. We pack it as 0x00RRGGBB.
            let r = pixel[0] as u32;
            let g = pixel[1] as u32;
            let b = pixel[2] as u32;
            self.pixels.push((r << 16) | (g << 8) | b);
        }
    }
}
