// Status label burned into the top-left corner of every displayed frame.

use crate::config::ViewerConfig;
use crate::font;
use crate::state::ModeState;
use image::RgbImage;

/// "ASCII MODE" / "NORMAL MODE", with " - PAUSED" appended while paused.
pub fn status_label(mode: &ModeState) -> String {
    let mut text = String::from(if mode.ascii_mode { "ASCII MODE" } else { "NORMAL MODE" });
    if mode.paused {
        text.push_str(" - PAUSED");
    }
    text
}

/// Draw the label in bold red at the configured baseline origin.
pub fn draw_overlay(frame: &mut RgbImage, mode: &ModeState, cfg: &ViewerConfig) {
    let (x, y) = cfg.overlay_origin;
    font::draw_text(frame, x, y, &status_label(mode), cfg.overlay_height, cfg.overlay_color, true);
}
