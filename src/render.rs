// Per-frame transform: pick the ASCII or plain path, then burn in the status label.

use crate::ascii::{self, AsciiRenderer};
use crate::config::{ASCII_RAMP, ViewerConfig};
use crate::overlay;
use crate::state::ModeState;
use image::RgbImage;
use image::imageops::{self, FilterType};

pub struct FrameRenderer {
    cfg: ViewerConfig,
    ascii: AsciiRenderer,
}

impl FrameRenderer {
    pub fn new(cfg: ViewerConfig) -> Self {
        let ascii = AsciiRenderer::new(ASCII_RAMP, cfg.cell_scale, cfg.glyph_color);
        Self { cfg, ascii }
    }

    /// Output depends only on (frame, mode); the source frame is never touched.
    pub fn render(&self, frame: &RgbImage, mode: &ModeState) -> RgbImage {
        let mut out = if mode.ascii_mode {
            let gray = imageops::grayscale(frame);
            let small = ascii::downscale(&gray, self.cfg.ascii_width, self.cfg.vertical_factor);
            self.ascii.render(&small)
        } else {
            imageops::resize(
                frame,
                self.cfg.normal_width,
                self.cfg.normal_height,
                FilterType::Triangle,
            )
        };
        overlay::draw_overlay(&mut out, mode, &self.cfg);
        out
    }
}
