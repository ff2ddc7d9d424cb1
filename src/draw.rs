// Window + keyboard. Shows rendered frames and turns key presses into commands.

use crate::config::ViewerConfig;
use crate::error::Error;
use crate::state::KeyCommand;
use crate::types::FrameBuffer;
use image::RgbImage;
use minifb::{Key, KeyRepeat, ScaleMode, Window, WindowOptions};

/// Where frames go and where key presses come from.
pub trait Screen {
    /// False once the user has closed the window.
    fn is_open(&self) -> bool;
    fn present(&mut self, frame: &RgbImage) -> Result<(), Error>;
    /// At most one command per poll; Quit wins when several keys arrive together.
    fn poll_key(&mut self) -> Option<KeyCommand>;
}

pub struct Drawer {
    window: Window,      // the on-screen window you see
    screen: FrameBuffer, // reused 0x00RRGGBB buffer
}

impl Drawer {
    /// Stands in for a fullscreen window: borderless, topmost, and stretching
    /// frames to fill it. minifb cannot open an exclusive fullscreen window,
    /// so it starts at the plain-view size (960x540) and the user may enlarge it.
    pub fn new(cfg: &ViewerConfig) -> Result<Self, Error> {
        let opts = WindowOptions {
            borderless: true,
            topmost: true,
            resize: true,
            scale_mode: ScaleMode::AspectRatioStretch,
            ..WindowOptions::default()
        };
        let mut window = Window::new(
            &cfg.window_title,
            cfg.normal_width as usize,
            cfg.normal_height as usize,
            opts,
        )
        .map_err(|e| Error::WindowInit(e.to_string()))?;

        // One update waits at most about one key-poll interval.
        window.set_target_fps(cfg.target_fps());

        Ok(Self { window, screen: FrameBuffer::default() })
    }
}

impl Screen for Drawer {
    fn is_open(&self) -> bool {
        self.window.is_open()
    }

    fn present(&mut self, frame: &RgbImage) -> Result<(), Error> {
        self.screen.fill_from_rgb(frame);
        self.window
            .update_with_buffer(&self.screen.pixels, self.screen.width, self.screen.height)
            .map_err(|e| Error::WindowUpdate(e.to_string()))?;
        Ok(())
    }

    fn poll_key(&mut self) -> Option<KeyCommand> {
        let pressed = |k| self.window.is_key_pressed(k, KeyRepeat::No);
        if pressed(Key::Escape) {
            Some(KeyCommand::Quit)
        } else if pressed(Key::A) {
            Some(KeyCommand::TogglePause)
        } else if pressed(Key::N) {
            Some(KeyCommand::ToggleMode)
        } else {
            None
        }
    }
}

impl Drop for Drawer {
    fn drop(&mut self) {
        tracing::info!("window closed");
    }
}
