// The viewer loop: acquire-or-reuse -> render -> present -> poll one key -> repeat.

use crate::camera::FrameSource;
use crate::draw::Screen;
use crate::error::Error;
use crate::render::FrameRenderer;
use crate::state::{Flow, ModeState};
use image::RgbImage;

/// Why the loop stopped. Both are clean exits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exit {
    Quit,
    EndOfStream,
}

pub struct Viewer<S: FrameSource, D: Screen> {
    source: S,
    screen: D,
    renderer: FrameRenderer,
    mode: ModeState,
    last_frame: Option<RgbImage>, // what we keep showing while paused
}

impl<S: FrameSource, D: Screen> Viewer<S, D> {
    pub fn new(source: S, screen: D, renderer: FrameRenderer) -> Self {
        Self { source, screen, renderer, mode: ModeState::default(), last_frame: None }
    }

    pub fn mode(&self) -> ModeState {
        self.mode
    }

    /// Make sure there is a frame to show. Paused reuses the stored frame; with
    /// nothing stored yet we grab one as if running. False means end of stream.
    fn acquire(&mut self) -> bool {
        if !self.mode.paused || self.last_frame.is_none() {
            match self.source.read() {
                Some(frame) => self.last_frame = Some(frame),
                None => return false,
            }
        }
        true
    }

    /// One pass through the loop.
    pub fn step(&mut self) -> Result<Option<Exit>, Error> {
        if !self.screen.is_open() {
            return Ok(Some(Exit::Quit));
        }

        let mode = self.mode;
        if !self.acquire() {
            return Ok(Some(Exit::EndOfStream));
        }
        let Some(frame) = self.last_frame.as_ref() else {
            return Ok(Some(Exit::EndOfStream));
        };
        let out = self.renderer.render(frame, &mode);
        self.screen.present(&out)?;

        match self.screen.poll_key().map(|cmd| self.mode.apply(cmd)) {
            Some(Flow::Quit) => Ok(Some(Exit::Quit)),
            _ => Ok(None),
        }
    }

    /// Run until quit or end of stream. The source is released on every way out,
    /// including an error from the screen.
    pub fn run(&mut self) -> Result<Exit, Error> {
        let result = loop {
            match self.step() {
                Ok(None) => continue,
                Ok(Some(exit)) => break Ok(exit),
                Err(e) => break Err(e),
            }
        };
        self.source.release();
        match &result {
            Ok(exit) => tracing::info!(?exit, "viewer stopped"),
            Err(e) => tracing::error!("viewer failed: {e}"),
        }
        result
    }

    #[cfg(test)]
    pub fn into_parts(self) -> (S, D) {
        (self.source, self.screen)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ViewerConfig;
    use crate::state::KeyCommand;
    use image::Rgb;
    use std::collections::VecDeque;

    /// Hands out a fixed list of frames, then runs dry.
    struct ScriptedSource {
        frames: VecDeque<RgbImage>,
        reads: usize,
        releases: usize,
    }

    impl ScriptedSource {
        fn new(frames: Vec<RgbImage>) -> Self {
            Self { frames: frames.into(), reads: 0, releases: 0 }
        }
    }

    impl FrameSource for ScriptedSource {
        fn read(&mut self) -> Option<RgbImage> {
            self.reads += 1;
            self.frames.pop_front()
        }
        fn release(&mut self) {
            self.releases += 1;
        }
    }

    /// Records presented frames and replays one scripted key per poll.
    struct ScriptedScreen {
        keys: VecDeque<Option<KeyCommand>>,
        shown: Vec<RgbImage>,
        open: bool,
        fail_present: bool,
    }

    impl ScriptedScreen {
        fn new(keys: Vec<Option<KeyCommand>>) -> Self {
            Self { keys: keys.into(), shown: Vec::new(), open: true, fail_present: false }
        }
    }

    impl Screen for ScriptedScreen {
        fn is_open(&self) -> bool {
            self.open
        }
        fn present(&mut self, frame: &RgbImage) -> Result<(), Error> {
            if self.fail_present {
                return Err(Error::WindowUpdate("gone".into()));
            }
            self.shown.push(frame.clone());
            Ok(())
        }
        fn poll_key(&mut self) -> Option<KeyCommand> {
            self.keys.pop_front().flatten()
        }
    }

    fn solid(v: u8) -> RgbImage {
        RgbImage::from_pixel(64, 48, Rgb([v, v, v]))
    }

    fn viewer(
        frames: Vec<RgbImage>,
        keys: Vec<Option<KeyCommand>>,
    ) -> Viewer<ScriptedSource, ScriptedScreen> {
        Viewer::new(
            ScriptedSource::new(frames),
            ScriptedScreen::new(keys),
            FrameRenderer::new(ViewerConfig::default()),
        )
    }

    #[test]
    fn end_of_stream_stops_and_releases() {
        let mut v = viewer(vec![solid(0), solid(255)], vec![]);
        assert_eq!(v.run().unwrap(), Exit::EndOfStream);
        let (src, screen) = v.into_parts();
        assert_eq!(screen.shown.len(), 2);
        assert_eq!(src.releases, 1);
    }

    #[test]
    fn escape_quits_and_releases() {
        let mut v = viewer(vec![solid(0), solid(10), solid(20)], vec![None, Some(KeyCommand::Quit)]);
        assert_eq!(v.run().unwrap(), Exit::Quit);
        let (src, screen) = v.into_parts();
        assert_eq!(screen.shown.len(), 2);
        assert_eq!(src.reads, 2);
        assert_eq!(src.releases, 1);
    }

    #[test]
    fn closed_window_counts_as_quit() {
        let mut v = viewer(vec![solid(0)], vec![]);
        v.screen.open = false;
        assert_eq!(v.run().unwrap(), Exit::Quit);
        let (src, screen) = v.into_parts();
        assert!(screen.shown.is_empty());
        assert_eq!(src.releases, 1);
    }

    #[test]
    fn present_error_still_releases() {
        let mut v = viewer(vec![solid(0)], vec![]);
        v.screen.fail_present = true;
        assert!(matches!(v.run(), Err(Error::WindowUpdate(_))));
        assert_eq!(v.into_parts().0.releases, 1);
    }

    #[test]
    fn paused_view_holds_the_same_frame() {
        // frame 0 is dark, the rest bright; pause right after the first frame
        let frames = vec![solid(0), solid(255), solid(255), solid(255)];
        let keys = vec![Some(KeyCommand::TogglePause), None, None, Some(KeyCommand::Quit)];
        let mut v = viewer(frames, keys);
        assert_eq!(v.run().unwrap(), Exit::Quit);

        let (src, screen) = v.into_parts();
        assert_eq!(src.reads, 1);
        assert_eq!(screen.shown.len(), 4);
        // frames 2..4 come from the stored frame with the PAUSED label
        assert_eq!(screen.shown[1], screen.shown[2]);
        assert_eq!(screen.shown[2], screen.shown[3]);
        assert_ne!(screen.shown[0], screen.shown[1]);
    }

    #[test]
    fn unpausing_resumes_acquisition() {
        let frames = vec![solid(0), solid(255), solid(255)];
        let keys = vec![Some(KeyCommand::TogglePause), Some(KeyCommand::TogglePause), None, None];
        let mut v = viewer(frames, keys);
        assert_eq!(v.run().unwrap(), Exit::EndOfStream);
        let (src, screen) = v.into_parts();
        // read #1, paused reuse, read #2, read #3, read #4 -> None
        assert_eq!(src.reads, 4);
        assert_eq!(screen.shown.len(), 4);
    }

    #[test]
    fn mode_toggle_switches_output_size() {
        let frames = vec![solid(40), solid(40), solid(40)];
        let keys = vec![Some(KeyCommand::ToggleMode), Some(KeyCommand::ToggleMode), None];
        let mut v = viewer(frames, keys);
        v.run().unwrap();
        assert_eq!(v.mode(), ModeState::default());
        let (_, screen) = v.into_parts();
        let sizes: Vec<_> = screen.shown.iter().map(|f| f.dimensions()).collect();
        assert_eq!(sizes, vec![(960, 400), (960, 540), (960, 400)]);
    }

    #[test]
    fn first_frame_is_ascii_with_label() {
        let frame = RgbImage::from_pixel(640, 480, Rgb([30, 30, 30]));
        let mut v = viewer(vec![frame], vec![Some(KeyCommand::Quit)]);
        assert_eq!(v.run().unwrap(), Exit::Quit);
        let (_, screen) = v.into_parts();
        let out = &screen.shown[0];
        assert_eq!(out.dimensions(), (960, 400));
        assert!(out.pixels().any(|p| *p == Rgb([128, 0, 128])));
        assert!(out.pixels().any(|p| *p == Rgb([255, 255, 255])));
        assert!((10..60).any(|x| (9..30).any(|y| *out.get_pixel(x, y) == Rgb([255, 0, 0]))));
    }
}
