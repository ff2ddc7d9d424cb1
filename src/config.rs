// Every fixed knob of the viewer in one place.
// Nothing is read from disk or the command line; `Default` is the configuration.

use image::Rgb;
use std::time::Duration;

/// Glyph ramp, densest first. Dark pixels pick early entries.
pub const ASCII_RAMP: &str = "@%#*+=-:. ";

#[derive(Debug, Clone)]
pub struct ViewerConfig {
    pub camera_index: u32,
    pub capture_width: u32,
    pub capture_height: u32,
    pub capture_fps: u32,

    pub window_title: String,

    /// Width of the grayscale frame fed to the glyph mapper (one glyph per pixel).
    pub ascii_width: u32,
    /// Vertical squash so glyph cells come out roughly proportional.
    pub vertical_factor: f64,
    /// Side of one glyph cell on the canvas, in pixels.
    pub cell_scale: u32,
    pub glyph_color: Rgb<u8>,

    /// Output size of the plain (non-ASCII) view.
    pub normal_width: u32,
    pub normal_height: u32,

    pub overlay_origin: (i32, i32), // baseline-left of the status label
    pub overlay_height: u32,
    pub overlay_color: Rgb<u8>,

    /// How long one key poll may take; also caps the loop rate.
    pub key_poll: Duration,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            camera_index: 0,
            capture_width: 640,
            capture_height: 480,
            capture_fps: 30,
            window_title: String::from("ASCII Webcam"),
            ascii_width: 120,
            vertical_factor: 0.55,
            cell_scale: 8,
            glyph_color: Rgb([128, 0, 128]),
            normal_width: 960,
            normal_height: 540,
            overlay_origin: (10, 30),
            overlay_height: 21,
            overlay_color: Rgb([255, 0, 0]),
            key_poll: Duration::from_millis(1),
        }
    }
}

impl ViewerConfig {
    /// Frame rate cap handed to the window so one update lasts about `key_poll`.
    pub fn target_fps(&self) -> usize {
        let ms = self.key_poll.as_millis().max(1) as usize;
        (1000 / ms).max(1)
    }
}
